use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::ledger::AttendanceLedger;
use crate::ledger::error::LedgerError;
use crate::model::work_shift::WorkShiftRequest;
#[allow(unused_imports)] // named in utoipa response bodies
use crate::model::work_shift::WorkShiftView;

/// Work shifts with duration and the lateness threshold under the current tolerance
#[utoipa::path(
    get,
    path = "/api/work-shifts/list",
    responses(
        (status = 200, description = "Work shifts ordered by id", body = [WorkShiftView])
    ),
    tag = "Work Shift"
)]
pub async fn list_work_shifts(ledger: web::Data<AttendanceLedger>) -> HttpResponse {
    HttpResponse::Ok().json(ledger.work_shift_views())
}

#[utoipa::path(
    post,
    path = "/api/work-shifts",
    request_body = WorkShiftRequest,
    responses(
        (status = 201, description = "Work shift created", body = Object, example = json!({ "id": 2 })),
        (status = 400, description = "Name is blank")
    ),
    tag = "Work Shift"
)]
pub async fn create_work_shift(
    ledger: web::Data<AttendanceLedger>,
    payload: web::Json<WorkShiftRequest>,
) -> Result<HttpResponse, LedgerError> {
    let id = ledger.create_work_shift(payload.into_inner())?;
    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

#[utoipa::path(
    put,
    path = "/api/work-shifts/{id}",
    params(("id", Path, description = "Work shift id")),
    request_body = WorkShiftRequest,
    responses(
        (status = 200, description = "Work shift updated", body = Object, example = json!({ "id": 1 })),
        (status = 400, description = "Name is blank"),
        (status = 404, description = "Work shift not found")
    ),
    tag = "Work Shift"
)]
pub async fn update_work_shift(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<u64>,
    payload: web::Json<WorkShiftRequest>,
) -> Result<HttpResponse, LedgerError> {
    let id = ledger.update_work_shift(path.into_inner(), payload.into_inner())?;
    Ok(HttpResponse::Ok().json(json!({ "id": id })))
}

/// Delete a work shift that no employee is assigned to
#[utoipa::path(
    delete,
    path = "/api/work-shifts/{id}",
    params(("id", Path, description = "Work shift id")),
    responses(
        (status = 204, description = "Work shift deleted"),
        (status = 404, description = "Work shift not found"),
        (status = 409, description = "Employees are still assigned to the shift")
    ),
    tag = "Work Shift"
)]
pub async fn delete_work_shift(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<u64>,
) -> Result<HttpResponse, LedgerError> {
    ledger.delete_work_shift(path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use super::super::test_support::*;

    fn night() -> Value {
        json!({ "name": "Night", "startTime": "22:00:00", "endTime": "06:30:00" })
    }

    #[actix_web::test]
    async fn created_shift_is_listed_with_labels() {
        let ledger = ledger();
        ledger.set_tolerance_minutes(15);
        let app = test::init_service(App::new().configure(app_data(ledger, Duration::ZERO))).await;

        let resp = test::call_service(&app, post("/api/work-shifts").set_json(night()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], 1);

        let body: Value = test::call_and_read_body_json(&app, get("/api/work-shifts/list").to_request()).await;
        assert_eq!(body[0]["name"], "Night");
        assert_eq!(body[0]["duration"], "8:30");
        assert_eq!(body[0]["lateAfter"], "22:15");
    }

    #[actix_web::test]
    async fn assigned_shift_cannot_be_deleted() {
        let ledger = ledger();
        let app = test::init_service(App::new().configure(app_data(ledger.clone(), Duration::ZERO))).await;
        test::call_service(&app, post("/api/work-shifts").set_json(night()).to_request()).await;

        let mut req = alice();
        req.work_shift_id = Some(1);
        ledger.add_employee(req).unwrap();

        let resp = test::call_service(&app, delete("/api/work-shifts/1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = test::call_service(&app, put("/api/work-shifts/9").set_json(night()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
