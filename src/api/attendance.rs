use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use super::clock_response;
use crate::ledger::AttendanceLedger;
use crate::ledger::error::LedgerError;
use crate::model::attendance::ClockResult;
use crate::model::employee::EmployeeId;
use crate::utils::scan_cooldown::ScanCooldown;
#[allow(unused_imports)] // named in utoipa response bodies
use crate::model::attendance::DailySummary;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[schema(value_type = String, example = "EMP001")]
    pub employee_id: EmployeeId,
    #[schema(example = "ACCESS-ID-6a8b2c9d")]
    pub token: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SummaryQuery {
    /// Day to summarise (UTC), defaults to today
    #[param(value_type = Option<String>, format = "date", example = "2026-01-05")]
    pub date: Option<NaiveDate>,
}

/// Clock in
#[utoipa::path(
    post,
    path = "/api/attendance/{employee_id}/clock-in",
    params(("employee_id", Path, description = "Employee ID, e.g. EMP001")),
    responses(
        (status = 200, description = "Clock-in recorded", body = ClockResult),
        (status = 404, description = "Employee not found", body = ClockResult),
        (status = 409, description = "Already clocked in", body = ClockResult)
    ),
    tag = "Attendance"
)]
pub async fn clock_in(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<EmployeeId>,
) -> impl Responder {
    clock_response(ledger.clock_in(path.into_inner()))
}

/// Clock out
#[utoipa::path(
    post,
    path = "/api/attendance/{employee_id}/clock-out",
    params(("employee_id", Path, description = "Employee ID, e.g. EMP001")),
    responses(
        (status = 200, description = "Clock-out recorded", body = ClockResult),
        (status = 404, description = "Employee not found", body = ClockResult),
        (status = 409, description = "Already clocked out", body = ClockResult)
    ),
    tag = "Attendance"
)]
pub async fn clock_out(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<EmployeeId>,
) -> impl Responder {
    clock_response(ledger.clock_out(path.into_inner()))
}

/// Flip the clock state of an employee
#[utoipa::path(
    post,
    path = "/api/attendance/{employee_id}/toggle",
    params(("employee_id", Path, description = "Employee ID, e.g. EMP001")),
    responses(
        (status = 200, description = "Clock-in or clock-out recorded", body = ClockResult),
        (status = 404, description = "Employee not found", body = ClockResult)
    ),
    tag = "Attendance"
)]
pub async fn toggle(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<EmployeeId>,
) -> impl Responder {
    clock_response(ledger.toggle_clock_status(path.into_inner()))
}

/// QR scan endpoint
///
/// Repeat scans of the same employee inside the cooldown window are refused
/// before reaching the ledger.
#[utoipa::path(
    post,
    path = "/api/attendance/scan",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Clock-in or clock-out recorded", body = ClockResult),
        (status = 400, description = "Scanned code is not the organisation QR code", body = ClockResult),
        (status = 404, description = "Employee not found", body = ClockResult),
        (status = 429, description = "Scan cooldown still active", body = ClockResult)
    ),
    tag = "Attendance"
)]
pub async fn scan(
    ledger: web::Data<AttendanceLedger>,
    cooldown: web::Data<ScanCooldown>,
    body: web::Json<ScanRequest>,
) -> impl Responder {
    let ScanRequest { employee_id, token } = body.into_inner();

    if !cooldown.try_acquire(employee_id).await {
        debug!(%employee_id, "Scan refused during cooldown");
        let name = ledger
            .employee(employee_id)
            .map(|e| e.full_name())
            .unwrap_or_default();
        return clock_response(ClockResult::failed(
            name,
            &LedgerError::ScanCooldown { employee_id },
        ));
    }

    clock_response(ledger.scan(employee_id, &token))
}

/// Daily attendance summary
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Present, late and absent counts", body = DailySummary)
    ),
    tag = "Attendance"
)]
pub async fn summary(
    ledger: web::Data<AttendanceLedger>,
    query: web::Query<SummaryQuery>,
) -> HttpResponse {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    HttpResponse::Ok().json(ledger.daily_summary(date))
}
