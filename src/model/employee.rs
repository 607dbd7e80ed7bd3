use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

/// Roster identifier, rendered as `EMP001`, `EMP002`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "EMP{:03}", _0)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId(u32);

#[derive(Debug, thiserror::Error)]
#[error("invalid employee id `{0}`, expected EMP followed by digits")]
pub struct ParseEmployeeIdError(String);

impl EmployeeId {
    pub fn new(seq: u32) -> Self {
        Self(seq)
    }

    pub fn seq(self) -> u32 {
        self.0
    }
}

impl FromStr for EmployeeId {
    type Err = ParseEmployeeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix("EMP")
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| ParseEmployeeIdError(s.to_string()))?;

        digits
            .parse()
            .map(EmployeeId)
            .map_err(|_| ParseEmployeeIdError(s.to_string()))
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = ParseEmployeeIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EmployeeId> for String {
    fn from(id: EmployeeId) -> Self {
        id.to_string()
    }
}

/// Live clock state of an employee. New hires start checked out.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, StrumDisplay, EnumString, ToSchema,
)]
pub enum ClockStatus {
    CheckedIn,
    #[default]
    CheckedOut,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "EMP001",
        "firstName": "Alice",
        "lastName": "Jimenez",
        "email": "alice.j@example.com",
        "phone": "555-0101",
        "username": "alice.jimenez",
        "status": "CheckedIn",
        "lastClockIn": "2026-01-05T08:45:00Z",
        "lastClockOut": null,
        "workShiftId": 1
    })
)]
pub struct Employee {
    #[schema(value_type = String, example = "EMP001")]
    pub id: EmployeeId,

    #[schema(example = "Alice")]
    pub first_name: String,

    #[schema(example = "Jimenez")]
    pub last_name: String,

    #[schema(example = "alice.j@example.com")]
    pub email: String,

    #[schema(example = "555-0101", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "alice.jimenez")]
    pub username: String,

    /// argon2 PHC string, never leaves the process.
    #[serde(skip)]
    pub password_hash: String,

    pub status: ClockStatus,

    #[schema(value_type = Option<String>, format = "date-time")]
    pub last_clock_in: Option<DateTime<Utc>>,

    #[schema(value_type = Option<String>, format = "date-time")]
    pub last_clock_out: Option<DateTime<Utc>>,

    #[schema(example = 1, nullable = true)]
    pub work_shift_id: Option<u64>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body for both hiring and editing. An empty or missing password on edit keeps the
/// current credential.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[schema(example = "Alice")]
    pub first_name: String,
    #[schema(example = "Jimenez")]
    pub last_name: String,
    #[schema(example = "alice.j@example.com", format = "email")]
    pub email: String,
    #[schema(example = "555-0101")]
    pub phone: Option<String>,
    #[schema(example = "alice.jimenez")]
    pub username: String,
    #[schema(example = "password123")]
    pub password: Option<String>,
    #[schema(example = 1)]
    pub work_shift_id: Option<u64>,
}

/// Entry of the history-view employee selector.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCombo {
    #[schema(value_type = String, example = "EMP001")]
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Employee> for EmployeeCombo {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id,
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_id_renders_zero_padded() {
        assert_eq!(EmployeeId::new(1).to_string(), "EMP001");
        assert_eq!(EmployeeId::new(42).to_string(), "EMP042");
        assert_eq!(EmployeeId::new(1234).to_string(), "EMP1234");
    }

    #[test]
    fn employee_id_parses_back() {
        assert_eq!("EMP007".parse::<EmployeeId>().unwrap(), EmployeeId::new(7));
        assert_eq!("EMP1234".parse::<EmployeeId>().unwrap(), EmployeeId::new(1234));
        assert!("007".parse::<EmployeeId>().is_err());
        assert!("EMP".parse::<EmployeeId>().is_err());
        assert!("EMP-1".parse::<EmployeeId>().is_err());
    }

    #[test]
    fn employee_ids_order_numerically() {
        assert!(EmployeeId::new(999) < EmployeeId::new(1000));
    }

    #[test]
    fn employee_id_serializes_as_string() {
        let json = serde_json::to_string(&EmployeeId::new(3)).unwrap();
        assert_eq!(json, "\"EMP003\"");
        let back: EmployeeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EmployeeId::new(3));
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let employee = Employee {
            id: EmployeeId::new(1),
            first_name: "Alice".into(),
            last_name: "Jimenez".into(),
            email: "alice@example.com".into(),
            phone: None,
            username: "alice".into(),
            password_hash: "$argon2id$secret".into(),
            status: ClockStatus::CheckedOut,
            last_clock_in: None,
            last_clock_out: None,
            work_shift_id: None,
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["status"], "CheckedOut");
        assert_eq!(employee.full_name(), "Alice Jimenez");
    }
}
