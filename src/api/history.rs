use actix_web::{HttpResponse, web};

use crate::ledger::AttendanceLedger;
use crate::model::employee::EmployeeId;
use crate::utils::pagination::{Page, PageQuery};
#[allow(unused_imports)] // named in utoipa response bodies
use crate::model::employee::EmployeeCombo;
#[allow(unused_imports)] // named in utoipa response bodies
use crate::utils::pagination::SessionPage;

/// Employee selector for the history view
#[utoipa::path(
    get,
    path = "/api/attendance-history/employees-combo",
    responses(
        (status = 200, description = "Every employee, ordered by id", body = [EmployeeCombo])
    ),
    tag = "Attendance History"
)]
pub async fn employees_combo(ledger: web::Data<AttendanceLedger>) -> HttpResponse {
    HttpResponse::Ok().json(ledger.employee_combos())
}

/// Work sessions of one employee, most recent first
///
/// Sessions are rebuilt from the raw log on every call. A session without a
/// clock-out has `clockOut` and `duration` set to null.
#[utoipa::path(
    get,
    path = "/api/attendance-history/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID, e.g. EMP001"),
        ("page", Query, description = "Zero-based page number"),
        ("size", Query, description = "Sessions per page (1-100)")
    ),
    responses(
        (status = 200, description = "Paginated work sessions", body = SessionPage)
    ),
    tag = "Attendance History"
)]
pub async fn employee_history(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<EmployeeId>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let sessions = ledger.employee_history(path.into_inner());
    HttpResponse::Ok().json(Page::of(sessions, query.page(), query.size()))
}
