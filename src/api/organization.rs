use actix_web::{HttpResponse, web};
use tracing::info;

use crate::ledger::AttendanceLedger;
use crate::ledger::error::LedgerError;
#[allow(unused_imports)] // named in utoipa response bodies
use crate::model::access_code::AccessCode;

/// Late-arrival tolerance in minutes
#[utoipa::path(
    get,
    path = "/api/organization/tolerance",
    responses(
        (status = 200, description = "Current tolerance in minutes", body = u32, example = json!(10))
    ),
    tag = "Organization"
)]
pub async fn get_tolerance(ledger: web::Data<AttendanceLedger>) -> HttpResponse {
    HttpResponse::Ok().json(ledger.tolerance_minutes())
}

/// Set the late-arrival tolerance. Negative values are stored as zero.
#[utoipa::path(
    put,
    path = "/api/organization/update-tolerance",
    request_body(content = i64, description = "Minutes", example = json!(10)),
    responses(
        (status = 200, description = "Tolerance actually stored", body = u32, example = json!(10))
    ),
    tag = "Organization"
)]
pub async fn update_tolerance(
    ledger: web::Data<AttendanceLedger>,
    minutes: web::Json<i64>,
) -> HttpResponse {
    let stored = ledger.set_tolerance_minutes(minutes.into_inner());
    HttpResponse::Ok().json(stored)
}

/// The organisation QR code
#[utoipa::path(
    get,
    path = "/api/organization/current-qr",
    responses(
        (status = 200, description = "Token and display name", body = AccessCode)
    ),
    tag = "Organization"
)]
pub async fn current_qr(ledger: web::Data<AttendanceLedger>) -> HttpResponse {
    HttpResponse::Ok().json(ledger.access_code())
}

/// Issue a new QR token. Printed copies of the old code stop working.
#[utoipa::path(
    patch,
    path = "/api/organization/regenerate-qr",
    responses(
        (status = 200, description = "The new token", body = String, content_type = "text/plain",
            example = json!("ACCESS-ID-6a8b2c9d"))
    ),
    tag = "Organization"
)]
pub async fn regenerate_qr(ledger: web::Data<AttendanceLedger>) -> HttpResponse {
    let token = ledger.regenerate_access_token();
    info!("Access code regenerated");
    HttpResponse::Ok().content_type("text/plain").body(token)
}

/// Rename the QR code. The body is the new name, as plain text or a JSON string.
#[utoipa::path(
    patch,
    path = "/api/organization/update-qr-name",
    request_body(content = String, content_type = "text/plain", example = json!("Main entrance")),
    responses(
        (status = 200, description = "Renamed code", body = AccessCode),
        (status = 400, description = "Name is blank")
    ),
    tag = "Organization"
)]
pub async fn update_qr_name(
    ledger: web::Data<AttendanceLedger>,
    body: String,
) -> Result<HttpResponse, LedgerError> {
    let name = serde_json::from_str::<String>(&body).unwrap_or(body);
    let code = ledger.rename_access_code(&name)?;
    Ok(HttpResponse::Ok().json(code))
}
