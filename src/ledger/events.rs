//! Change notifications for ledger consumers.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::model::attendance::ClockType;
use crate::model::employee::EmployeeId;

/// Published once per successful mutation, after the state lock is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    Clocked {
        employee_id: EmployeeId,
        record_id: u64,
        kind: ClockType,
        at: DateTime<Utc>,
    },
    EmployeeAdded {
        employee_id: EmployeeId,
    },
    EmployeeUpdated {
        employee_id: EmployeeId,
        renamed: bool,
    },
    EmployeeDeleted {
        employee_id: EmployeeId,
        removed_records: usize,
    },
    ShiftsChanged,
    ToleranceChanged {
        minutes: u32,
    },
    AccessCodeChanged,
}

pub trait LedgerListener: Send + Sync {
    fn on_event(&self, event: &LedgerEvent);
}

/// Writes every ledger event to the application log.
#[derive(Debug, Default)]
pub struct TracingListener;

impl LedgerListener for TracingListener {
    fn on_event(&self, event: &LedgerEvent) {
        match event {
            LedgerEvent::Clocked {
                employee_id,
                record_id,
                kind,
                at,
            } => info!(%employee_id, record_id, %kind, at = %at, "Clock event recorded"),
            LedgerEvent::EmployeeAdded { employee_id } => info!(%employee_id, "Employee added"),
            LedgerEvent::EmployeeUpdated {
                employee_id,
                renamed,
            } => info!(%employee_id, renamed, "Employee updated"),
            LedgerEvent::EmployeeDeleted {
                employee_id,
                removed_records,
            } => info!(%employee_id, removed_records, "Employee deleted"),
            LedgerEvent::ShiftsChanged => info!("Work shifts changed"),
            LedgerEvent::ToleranceChanged { minutes } => info!(minutes, "Tolerance changed"),
            LedgerEvent::AccessCodeChanged => info!("Access code changed"),
        }
    }
}
