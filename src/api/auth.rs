use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::ledger::AttendanceLedger;
use crate::ledger::error::LedgerError;
#[allow(unused_imports)] // named in utoipa response bodies
use crate::model::employee::Employee;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Username or email
    #[schema(example = "alice.jimenez")]
    pub username: String,
    #[schema(example = "password123")]
    pub password: String,
}

/// Employee login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = Employee),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "message": "Invalid email, username or password",
            "code": "INVALID_CREDENTIALS"
        }))
    ),
    tag = "Auth"
)]
pub async fn login(
    ledger: web::Data<AttendanceLedger>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, LedgerError> {
    let employee = ledger.authenticate(&payload.username, &payload.password)?;
    info!(employee_id = %employee.id, "Employee logged in");
    Ok(HttpResponse::Ok().json(employee))
}
