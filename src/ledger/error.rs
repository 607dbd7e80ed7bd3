//! Ledger error types.

use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;
use utoipa::ToSchema;

use crate::model::employee::{ClockStatus, EmployeeId};

/// Recoverable failures surfaced to callers. None of them are fatal.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Unknown employee, shift or other entity.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Redundant clock action, e.g. a second clock-in without a clock-out.
    #[error("{employee_name} has already {}.", clocked_phrase(.status))]
    AlreadyInState {
        employee_name: String,
        status: ClockStatus,
    },

    /// A clock-out earlier than its clock-in.
    #[error("Invalid duration: span of {millis} ms is negative")]
    InvalidDuration { millis: i64 },

    #[error("{0}")]
    Validation(String),

    #[error("Work shift {shift_id} is still assigned to employees")]
    ShiftInUse { shift_id: u64 },

    #[error("Invalid QR code. Please scan the official QR code.")]
    InvalidAccessCode,

    #[error("Invalid email, username or password")]
    InvalidCredentials,

    #[error("Scan for {employee_id} ignored, please wait a moment before scanning again")]
    ScanCooldown { employee_id: EmployeeId },

    /// Password hashing backend failure.
    #[error("Credential error: {0}")]
    Credentials(String),
}

/// Stable machine-readable tag for each [`LedgerError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerErrorCode {
    NotFound,
    AlreadyInState,
    InvalidDuration,
    Validation,
    ShiftInUse,
    InvalidAccessCode,
    InvalidCredentials,
    ScanCooldown,
    Credentials,
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn employee_not_found(id: EmployeeId) -> Self {
        Self::not_found("Employee", id)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn code(&self) -> LedgerErrorCode {
        match self {
            LedgerError::NotFound { .. } => LedgerErrorCode::NotFound,
            LedgerError::AlreadyInState { .. } => LedgerErrorCode::AlreadyInState,
            LedgerError::InvalidDuration { .. } => LedgerErrorCode::InvalidDuration,
            LedgerError::Validation(_) => LedgerErrorCode::Validation,
            LedgerError::ShiftInUse { .. } => LedgerErrorCode::ShiftInUse,
            LedgerError::InvalidAccessCode => LedgerErrorCode::InvalidAccessCode,
            LedgerError::InvalidCredentials => LedgerErrorCode::InvalidCredentials,
            LedgerError::ScanCooldown { .. } => LedgerErrorCode::ScanCooldown,
            LedgerError::Credentials(_) => LedgerErrorCode::Credentials,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

fn clocked_phrase(status: &ClockStatus) -> &'static str {
    match status {
        ClockStatus::CheckedIn => "clocked in",
        ClockStatus::CheckedOut => "clocked out",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_render_screaming_snake_case() {
        assert_eq!(LedgerErrorCode::AlreadyInState.to_string(), "ALREADY_IN_STATE");
        assert_eq!(
            serde_json::to_value(LedgerErrorCode::NotFound).unwrap(),
            "NOT_FOUND"
        );
    }

    #[test]
    fn already_in_state_message_names_employee() {
        let err = LedgerError::AlreadyInState {
            employee_name: "Alice Jimenez".into(),
            status: ClockStatus::CheckedIn,
        };
        assert_eq!(err.to_string(), "Alice Jimenez has already clocked in.");
        assert_eq!(err.code(), LedgerErrorCode::AlreadyInState);
    }

    #[test]
    fn employee_not_found_uses_display_id() {
        let err = LedgerError::employee_not_found(EmployeeId::new(9));
        assert_eq!(err.to_string(), "Employee not found: EMP009");
    }
}
