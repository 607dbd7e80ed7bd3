pub mod attendance;
pub mod auth;
pub mod employee;
pub mod history;
pub mod organization;
pub mod work_shift;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use tracing::error;

use crate::ledger::error::{LedgerError, LedgerErrorCode};
use crate::model::attendance::ClockResult;

fn status_for(code: LedgerErrorCode) -> StatusCode {
    match code {
        LedgerErrorCode::NotFound => StatusCode::NOT_FOUND,
        LedgerErrorCode::AlreadyInState | LedgerErrorCode::ShiftInUse => StatusCode::CONFLICT,
        LedgerErrorCode::Validation | LedgerErrorCode::InvalidAccessCode => StatusCode::BAD_REQUEST,
        LedgerErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        LedgerErrorCode::ScanCooldown => StatusCode::TOO_MANY_REQUESTS,
        LedgerErrorCode::InvalidDuration => StatusCode::UNPROCESSABLE_ENTITY,
        LedgerErrorCode::Credentials => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
            return HttpResponse::build(status).json(json!({
                "message": "Something went wrong, Contact with system admin"
            }));
        }
        HttpResponse::build(status).json(json!({
            "message": self.to_string(),
            "code": self.code(),
        }))
    }
}

/// Clock results always carry a body; failures also pick the matching status.
pub(crate) fn clock_response(result: ClockResult) -> HttpResponse {
    let status = result.error.map_or(StatusCode::OK, status_for);
    HttpResponse::build(status).json(result)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::test::TestRequest;
    use actix_web::web::{self, Data};

    use crate::ledger::{AttendanceLedger, LedgerSeed};
    use crate::model::access_code::AccessCode;
    use crate::model::employee::EmployeeRequest;
    use crate::routes::{self, RateLimits};
    use crate::utils::scan_cooldown::ScanCooldown;

    pub const TOKEN: &str = "ACCESS-ID-1234abcd";

    pub fn ledger() -> Arc<AttendanceLedger> {
        Arc::new(AttendanceLedger::from_seed(LedgerSeed::empty(AccessCode {
            token: TOKEN.into(),
            name: "Front door".into(),
        })))
    }

    pub fn alice() -> EmployeeRequest {
        EmployeeRequest {
            first_name: "Alice".into(),
            last_name: "Jimenez".into(),
            email: "alice@example.com".into(),
            username: "alice".into(),
            password: Some("pw".into()),
            ..Default::default()
        }
    }

    pub fn app_data(
        ledger: Arc<AttendanceLedger>,
        cooldown: Duration,
    ) -> impl FnOnce(&mut web::ServiceConfig) {
        move |cfg| {
            let limits = RateLimits::new(10_000, 10_000, 10_000).expect("limits");
            cfg.app_data(Data::from(ledger))
                .app_data(Data::new(ScanCooldown::new(cooldown)))
                .configure(|cfg| routes::configure(cfg, "/api", &limits));
        }
    }

    // the per-IP limiter needs a peer address on every request
    fn with_peer(req: TestRequest, uri: &str) -> TestRequest {
        req.uri(uri).peer_addr(SocketAddr::from(([127, 0, 0, 1], 40000)))
    }

    pub fn get(uri: &str) -> TestRequest {
        with_peer(TestRequest::get(), uri)
    }

    pub fn post(uri: &str) -> TestRequest {
        with_peer(TestRequest::post(), uri)
    }

    pub fn put(uri: &str) -> TestRequest {
        with_peer(TestRequest::put(), uri)
    }

    pub fn patch(uri: &str) -> TestRequest {
        with_peer(TestRequest::patch(), uri)
    }

    pub fn delete(uri: &str) -> TestRequest {
        with_peer(TestRequest::delete(), uri)
    }
}
