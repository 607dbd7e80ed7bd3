use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::ledger::error::{LedgerError, LedgerErrorCode};
use crate::model::employee::{ClockStatus, EmployeeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
pub enum ClockType {
    ClockIn,
    ClockOut,
}

impl ClockType {
    /// Status an employee is left in once this event is recorded.
    pub fn resulting_status(self) -> ClockStatus {
        match self {
            ClockType::ClockIn => ClockStatus::CheckedIn,
            ClockType::ClockOut => ClockStatus::CheckedOut,
        }
    }
}

/// One immutable entry of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 7,
    "employeeId": "EMP002",
    "employeeName": "Robert Williams",
    "timestamp": "2026-01-05T08:45:00Z",
    "type": "ClockIn"
}))]
pub struct AttendanceRecord {
    pub id: u64,
    #[schema(value_type = String, example = "EMP002")]
    pub employee_id: EmployeeId,
    /// Snapshot of the full name, rewritten when the employee is renamed.
    pub employee_name: String,
    #[schema(value_type = String, format = "date-time")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ClockType,
}

/// A clock-in paired with its clock-out, or left open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkSession {
    #[schema(value_type = String, format = "date-time")]
    pub clock_in: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub clock_out: Option<DateTime<Utc>>,
    #[schema(example = "8h 0m")]
    pub duration: Option<String>,
}

impl WorkSession {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

/// Outcome of a clock action, shaped for toast-style feedback.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "success": true,
    "message": "Robert Williams: clock-in recorded successfully at 08:45:00",
    "employeeName": "Robert Williams"
}))]
pub struct ClockResult {
    pub success: bool,
    pub message: String,
    pub employee_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<LedgerErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AttendanceRecord>,
}

impl ClockResult {
    pub fn recorded(employee_name: String, record: AttendanceRecord) -> Self {
        let action = match record.kind {
            ClockType::ClockIn => "clock-in",
            ClockType::ClockOut => "clock-out",
        };
        Self {
            success: true,
            message: format!(
                "{}: {} recorded successfully at {}",
                employee_name,
                action,
                record.timestamp.format("%H:%M:%S")
            ),
            employee_name,
            error: None,
            record: Some(record),
        }
    }

    pub fn failed(employee_name: String, err: &LedgerError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            employee_name,
            error: Some(err.code()),
            record: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissingClockOut {
    #[schema(value_type = String, example = "EMP003")]
    pub employee_id: EmployeeId,
    pub employee_name: String,
    #[schema(value_type = String, format = "date-time")]
    pub clock_in: DateTime<Utc>,
}

/// Per-day attendance figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    #[schema(value_type = String, format = "date", example = "2026-01-05")]
    pub date: NaiveDate,
    pub present: usize,
    pub on_time: usize,
    pub late: usize,
    pub absent: usize,
    pub missing_clock_out: Vec<MissingClockOut>,
}
