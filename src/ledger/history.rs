//! Session reconstruction over the raw event log.
//!
//! The log is treated as historical fact: anomalies are tolerated rather
//! than rejected. A clock-in while a session is already open closes the
//! earlier one as open-ended, and a clock-out with nothing open is dropped.

use chrono::{DateTime, Utc};

use super::error::{LedgerError, LedgerResult};
use crate::model::attendance::{AttendanceRecord, ClockType, WorkSession};
use crate::model::employee::EmployeeId;

const MILLIS_PER_MINUTE: i64 = 60 * 1000;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

/// Rendered in place of a duration whose span is negative.
pub const INVALID_DURATION: &str = "Invalid";

/// Whole hours and whole minutes between two instants, floored.
pub fn session_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> LedgerResult<(i64, i64)> {
    let millis = (end - start).num_milliseconds();
    if millis < 0 {
        return Err(LedgerError::InvalidDuration { millis });
    }
    Ok((
        millis / MILLIS_PER_HOUR,
        (millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
    ))
}

/// `"{h}h {m}m"`, or [`INVALID_DURATION`] for a negative span.
pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    match session_duration(start, end) {
        Ok((hours, minutes)) => format!("{}h {}m", hours, minutes),
        Err(_) => INVALID_DURATION.to_string(),
    }
}

/// Records of one employee, newest first.
pub fn records_for(log: &[AttendanceRecord], employee_id: EmployeeId) -> Vec<AttendanceRecord> {
    let mut records: Vec<AttendanceRecord> = log
        .iter()
        .filter(|r| r.employee_id == employee_id)
        .cloned()
        .collect();
    // stable, so same-instant records keep append order
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    records
}

/// Rebuilds the work sessions of one employee, most recent clock-in first.
pub fn reconstruct_sessions(log: &[AttendanceRecord], employee_id: EmployeeId) -> Vec<WorkSession> {
    let mut records: Vec<&AttendanceRecord> = log
        .iter()
        .filter(|r| r.employee_id == employee_id)
        .collect();
    // stable, so same-instant events keep append order
    records.sort_by_key(|r| r.timestamp);

    let mut sessions = Vec::new();
    let mut open_start: Option<DateTime<Utc>> = None;

    for record in records {
        match record.kind {
            ClockType::ClockIn => {
                if let Some(start) = open_start.replace(record.timestamp) {
                    sessions.push(open_session(start));
                }
            }
            ClockType::ClockOut => {
                if let Some(start) = open_start.take() {
                    sessions.push(WorkSession {
                        clock_in: start,
                        clock_out: Some(record.timestamp),
                        duration: Some(format_duration(start, record.timestamp)),
                    });
                }
            }
        }
    }

    if let Some(start) = open_start {
        sessions.push(open_session(start));
    }

    sessions.sort_by(|a, b| b.clock_in.cmp(&a.clock_in));
    sessions
}

/// Type of the chronologically last record of an employee, if any.
pub fn last_clock_type(log: &[AttendanceRecord], employee_id: EmployeeId) -> Option<ClockType> {
    last_of(log, employee_id, None).map(|r| r.kind)
}

/// Latest record of the given type for an employee.
pub fn last_of_type(
    log: &[AttendanceRecord],
    employee_id: EmployeeId,
    kind: ClockType,
) -> Option<&AttendanceRecord> {
    last_of(log, employee_id, Some(kind))
}

fn last_of(
    log: &[AttendanceRecord],
    employee_id: EmployeeId,
    kind: Option<ClockType>,
) -> Option<&AttendanceRecord> {
    // max_by_key returns the last maximum, so ties resolve to the later append
    log.iter()
        .filter(|r| r.employee_id == employee_id && kind.is_none_or(|k| r.kind == k))
        .max_by_key(|r| r.timestamp)
}

fn open_session(clock_in: DateTime<Utc>) -> WorkSession {
    WorkSession {
        clock_in,
        clock_out: None,
        duration: None,
    }
}
