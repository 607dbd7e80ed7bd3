use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::info;

use crate::ledger::AttendanceLedger;
use crate::ledger::error::LedgerError;
use crate::model::employee::{EmployeeId, EmployeeRequest};
use crate::utils::pagination::{Page, PageQuery};
#[allow(unused_imports)] // named in utoipa response bodies
use crate::model::attendance::AttendanceRecord;
#[allow(unused_imports)] // named in utoipa response bodies
use crate::model::employee::Employee;
#[allow(unused_imports)] // named in utoipa response bodies
use crate::utils::pagination::EmployeePage;

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee created successfully", body = Employee),
        (status = 400, description = "Missing field, missing password or duplicate username", body = Object, example = json!({
            "message": "Password is required",
            "code": "VALIDATION"
        })),
        (status = 404, description = "Referenced work shift does not exist")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    ledger: web::Data<AttendanceLedger>,
    payload: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, LedgerError> {
    let employee = ledger.add_employee(payload.into_inner())?;
    info!(employee_id = %employee.id, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated employee list ordered by id", body = EmployeePage)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    ledger: web::Data<AttendanceLedger>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let employees = ledger.search_employees(query.search.as_deref());
    HttpResponse::Ok().json(Page::of(employees, query.page(), query.size()))
}

#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(("employee_id", Path, description = "Employee ID, e.g. EMP001")),
    responses(
        (status = 200, description = "Employee profile with live clock state", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<EmployeeId>,
) -> Result<HttpResponse, LedgerError> {
    Ok(HttpResponse::Ok().json(ledger.employee(path.into_inner())?))
}

/// Update Employee
///
/// Renaming rewrites the name shown on every existing attendance record.
/// A blank password keeps the current one.
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    params(("employee_id", Path, description = "Employee ID, e.g. EMP001")),
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee or work shift not found")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<EmployeeId>,
    payload: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, LedgerError> {
    let employee = ledger.update_employee(path.into_inner(), payload.into_inner())?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee along with all of their attendance records
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(("employee_id", Path, description = "Employee ID, e.g. EMP001")),
    responses(
        (status = 200, description = "Employee deleted", body = Object, example = json!({
            "message": "Employee deleted successfully",
            "removedRecords": 12
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<EmployeeId>,
) -> Result<HttpResponse, LedgerError> {
    let employee_id = path.into_inner();
    let removed = ledger.delete_employee(employee_id)?;
    info!(%employee_id, removed, "Employee deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully",
        "removedRecords": removed
    })))
}

/// Raw clock records, newest first
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}/records",
    params(("employee_id", Path, description = "Employee ID, e.g. EMP001")),
    responses(
        (status = 200, description = "Attendance records", body = [AttendanceRecord])
    ),
    tag = "Employee"
)]
pub async fn employee_records(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<EmployeeId>,
) -> HttpResponse {
    HttpResponse::Ok().json(ledger.records_for_employee(path.into_inner()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use super::super::test_support::*;

    #[actix_web::test]
    async fn create_then_search_paginated() {
        let ledger = ledger();
        let app = test::init_service(App::new().configure(app_data(ledger.clone(), Duration::ZERO))).await;

        let resp = test::call_service(&app, post("/api/employees").set_json(alice()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], "EMP001");
        assert_eq!(body["status"], "CheckedOut");

        for (first, username) in [("Bob", "bob"), ("Carla", "carla")] {
            let resp = test::call_service(
                &app,
                post("/api/employees")
                    .set_json(json!({
                        "firstName": first,
                        "lastName": "Pardo",
                        "email": format!("{}@example.com", username),
                        "username": username,
                        "password": "pw"
                    }))
                    .to_request(),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let resp = test::call_service(&app, get("/api/employees?search=pardo&size=1").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["totalElements"], 2);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["content"][0]["firstName"], "Bob");
        assert_eq!(body["hasNext"], true);
    }

    #[actix_web::test]
    async fn create_without_password_is_bad_request() {
        let app = test::init_service(App::new().configure(app_data(ledger(), Duration::ZERO))).await;
        let mut req = alice();
        req.password = None;

        let resp = test::call_service(&app, post("/api/employees").set_json(req).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "VALIDATION");
    }

    #[actix_web::test]
    async fn rename_shows_on_records() {
        let ledger = ledger();
        let id = ledger.add_employee(alice()).unwrap().id;
        ledger.clock_in(id);
        let app = test::init_service(App::new().configure(app_data(ledger.clone(), Duration::ZERO))).await;

        let mut req = alice();
        req.last_name = "Smith".into();
        req.password = None;
        let resp = test::call_service(
            &app,
            put(&format!("/api/employees/{}", id)).set_json(req).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, get(&format!("/api/employees/{}/records", id)).to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body[0]["employeeName"], "Alice Smith");
        assert!(ledger.authenticate("alice", "pw").is_ok());
    }

    #[actix_web::test]
    async fn delete_cascades_and_then_404s() {
        let ledger = ledger();
        let id = ledger.add_employee(alice()).unwrap().id;
        ledger.clock_in(id);
        ledger.clock_out(id);
        let app = test::init_service(App::new().configure(app_data(ledger.clone(), Duration::ZERO))).await;

        let uri = format!("/api/employees/{}", id);
        let resp = test::call_service(&app, delete(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["removedRecords"], 2);

        let resp = test::call_service(&app, get(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = test::call_service(&app, delete(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn malformed_id_is_rejected() {
        let app = test::init_service(App::new().configure(app_data(ledger(), Duration::ZERO))).await;
        let resp = test::call_service(&app, get("/api/employees/alice").to_request()).await;
        assert!(resp.status().is_client_error());
    }
}
