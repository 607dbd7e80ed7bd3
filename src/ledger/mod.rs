//! The attendance ledger: roster, append-only event log and the per-employee
//! clock state machine, plus the organisation settings scanning depends on.
//!
//! All state sits behind a single `RwLock` so every read-check-write sequence
//! (clock actions, renames, cascading deletes) is atomic for callers.

mod clock;
pub mod error;
pub mod events;
pub mod history;
mod organization;
mod roster;
mod summary;

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::access_code::AccessCode;
use crate::model::attendance::{AttendanceRecord, ClockType};
use crate::model::employee::{ClockStatus, Employee, EmployeeId};
use crate::model::work_shift::WorkShift;

use events::{LedgerEvent, LedgerListener};

/// Externally supplied starting point: an existing roster, log and settings.
#[derive(Debug, Clone)]
pub struct LedgerSeed {
    pub employees: Vec<Employee>,
    pub records: Vec<AttendanceRecord>,
    pub work_shifts: Vec<WorkShift>,
    pub tolerance_minutes: u32,
    pub access_code: AccessCode,
}

impl LedgerSeed {
    pub fn empty(access_code: AccessCode) -> Self {
        Self {
            employees: Vec::new(),
            records: Vec::new(),
            work_shifts: Vec::new(),
            tolerance_minutes: 0,
            access_code,
        }
    }
}

#[derive(Debug)]
struct LedgerState {
    roster: BTreeMap<EmployeeId, Employee>,
    log: Vec<AttendanceRecord>,
    shifts: BTreeMap<u64, WorkShift>,
    tolerance_minutes: u32,
    access_code: AccessCode,
    next_record_id: u64,
    next_employee_seq: u32,
    next_shift_id: u64,
}

impl LedgerState {
    fn from_seed(seed: LedgerSeed) -> Self {
        let next_record_id = seed.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let next_employee_seq = seed.employees.iter().map(|e| e.id.seq()).max().unwrap_or(0) + 1;
        let next_shift_id = seed.work_shifts.iter().map(|s| s.id).max().unwrap_or(0) + 1;

        let mut roster = BTreeMap::new();
        for mut employee in seed.employees {
            derive_clock_state(&mut employee, &seed.records);
            roster.insert(employee.id, employee);
        }

        Self {
            roster,
            log: seed.records,
            shifts: seed.work_shifts.into_iter().map(|s| (s.id, s)).collect(),
            tolerance_minutes: seed.tolerance_minutes,
            access_code: seed.access_code,
            next_record_id,
            next_employee_seq,
            next_shift_id,
        }
    }
}

/// Makes the supplied status agree with the log, whatever the caller claimed.
fn derive_clock_state(employee: &mut Employee, log: &[AttendanceRecord]) {
    employee.status = history::last_clock_type(log, employee.id)
        .map(ClockType::resulting_status)
        .unwrap_or(ClockStatus::CheckedOut);

    if let Some(r) = history::last_of_type(log, employee.id, ClockType::ClockIn) {
        employee.last_clock_in = Some(r.timestamp);
    }
    if let Some(r) = history::last_of_type(log, employee.id, ClockType::ClockOut) {
        employee.last_clock_out = Some(r.timestamp);
    }
}

pub struct AttendanceLedger {
    state: RwLock<LedgerState>,
    listeners: RwLock<Vec<Arc<dyn LedgerListener>>>,
}

impl AttendanceLedger {
    /// Empty ledger with a freshly generated access code.
    pub fn new(access_code_name: &str, tolerance_minutes: u32) -> Self {
        let mut seed = LedgerSeed::empty(AccessCode::generate(access_code_name));
        seed.tolerance_minutes = tolerance_minutes;
        Self::from_seed(seed)
    }

    pub fn from_seed(seed: LedgerSeed) -> Self {
        Self {
            state: RwLock::new(LedgerState::from_seed(seed)),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Registers a listener for every subsequent successful mutation.
    pub fn subscribe(&self, listener: Arc<dyn LedgerListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    fn publish(&self, event: LedgerEvent) {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener.on_event(&event);
        }
    }

    // Mutations validate before writing, so a poisoned lock still holds consistent state.
    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
