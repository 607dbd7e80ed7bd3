use crate::api::attendance::ScanRequest;
use crate::api::auth::LoginRequest;
use crate::ledger::error::LedgerErrorCode;
use crate::model::access_code::AccessCode;
use crate::model::attendance::{
    AttendanceRecord, ClockResult, ClockType, DailySummary, MissingClockOut, WorkSession,
};
use crate::model::employee::{ClockStatus, Employee, EmployeeCombo, EmployeeRequest};
use crate::model::work_shift::{WorkShift, WorkShiftRequest, WorkShiftView};
use crate::utils::pagination::{EmployeePage, PageQuery, SessionPage};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "QR Attendance API",
        version = "1.0.0",
        description = r#"
## QR Attendance Ledger

Employees clock in and out by scanning the organisation QR code. Every action
is appended to an attendance log, from which work sessions and daily figures
are derived.

### 🔹 Key Features
- **Employee Management**
  - Create, update, search and delete employee profiles
- **Attendance**
  - Clock in, clock out, toggle and QR scan with a per-employee cooldown
  - Daily present / late / absent summary
- **Attendance History**
  - Work sessions reconstructed from the raw log, paginated
- **Organization**
  - Work shifts, late-arrival tolerance and the QR access code

### 📦 Response Format
- JSON-based RESTful responses
- Errors carry `message` and a machine-readable `code`
- Clock actions always answer with a `ClockResult`

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::auth::login,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::employee_records,

        crate::api::attendance::clock_in,
        crate::api::attendance::clock_out,
        crate::api::attendance::toggle,
        crate::api::attendance::scan,
        crate::api::attendance::summary,

        crate::api::history::employees_combo,
        crate::api::history::employee_history,

        crate::api::work_shift::list_work_shifts,
        crate::api::work_shift::create_work_shift,
        crate::api::work_shift::update_work_shift,
        crate::api::work_shift::delete_work_shift,

        crate::api::organization::get_tolerance,
        crate::api::organization::update_tolerance,
        crate::api::organization::current_qr,
        crate::api::organization::regenerate_qr,
        crate::api::organization::update_qr_name
    ),
    components(
        schemas(
            LoginRequest,
            Employee,
            EmployeeRequest,
            EmployeeCombo,
            EmployeePage,
            ClockStatus,
            PageQuery,
            AttendanceRecord,
            ClockType,
            ClockResult,
            LedgerErrorCode,
            ScanRequest,
            WorkSession,
            SessionPage,
            DailySummary,
            MissingClockOut,
            WorkShift,
            WorkShiftRequest,
            WorkShiftView,
            AccessCode
        )
    ),
    tags(
        (name = "Auth", description = "Employee login"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Clock actions and daily summary"),
        (name = "Attendance History", description = "Work sessions per employee"),
        (name = "Work Shift", description = "Work shift configuration"),
        (name = "Organization", description = "Tolerance and QR access code"),
    )
)]
pub struct ApiDoc;
