use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::error::{LedgerError, LedgerResult};
use super::events::LedgerEvent;
use super::{AttendanceLedger, LedgerState};
use crate::model::attendance::{AttendanceRecord, ClockResult, ClockType};
use crate::model::employee::{ClockStatus, EmployeeId};

struct ClockOutcome {
    employee_name: String,
    result: LedgerResult<AttendanceRecord>,
}

impl LedgerState {
    /// One transition of the clock state machine. The employee update and the
    /// log append happen together or not at all.
    fn apply_clock(&mut self, employee_id: EmployeeId, kind: ClockType, now: DateTime<Utc>) -> ClockOutcome {
        let Some(employee) = self.roster.get(&employee_id) else {
            return ClockOutcome {
                employee_name: String::new(),
                result: Err(LedgerError::employee_not_found(employee_id)),
            };
        };
        let employee_name = employee.full_name();
        let target = kind.resulting_status();

        if employee.status == target {
            return ClockOutcome {
                result: Err(LedgerError::AlreadyInState {
                    employee_name: employee_name.clone(),
                    status: target,
                }),
                employee_name,
            };
        }

        // A wall clock stepping backwards must not produce a record that sorts
        // before the employee's latest one.
        let timestamp = self
            .log
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .map(|r| r.timestamp)
            .max()
            .map_or(now, |latest| latest.max(now));

        let record = AttendanceRecord {
            id: self.next_record_id,
            employee_id,
            employee_name: employee_name.clone(),
            timestamp,
            kind,
        };

        if let Some(employee) = self.roster.get_mut(&employee_id) {
            employee.status = target;
            match kind {
                ClockType::ClockIn => employee.last_clock_in = Some(timestamp),
                ClockType::ClockOut => employee.last_clock_out = Some(timestamp),
            }
        }
        self.log.push(record.clone());
        self.next_record_id += 1;

        ClockOutcome {
            employee_name,
            result: Ok(record),
        }
    }

    fn toggle(&mut self, employee_id: EmployeeId, now: DateTime<Utc>) -> ClockOutcome {
        let kind = match self.roster.get(&employee_id).map(|e| e.status) {
            Some(ClockStatus::CheckedIn) => ClockType::ClockOut,
            _ => ClockType::ClockIn,
        };
        self.apply_clock(employee_id, kind, now)
    }
}

impl AttendanceLedger {
    pub fn clock_in(&self, employee_id: EmployeeId) -> ClockResult {
        self.clock_at(employee_id, ClockType::ClockIn, Utc::now())
    }

    pub fn clock_out(&self, employee_id: EmployeeId) -> ClockResult {
        self.clock_at(employee_id, ClockType::ClockOut, Utc::now())
    }

    /// Scan entry point: flips exactly one state per call.
    pub fn toggle_clock_status(&self, employee_id: EmployeeId) -> ClockResult {
        let outcome = self.write().toggle(employee_id, Utc::now());
        self.finish(employee_id, outcome)
    }

    /// Validates the scanned QR payload, then toggles.
    pub fn scan(&self, employee_id: EmployeeId, token: &str) -> ClockResult {
        let outcome = {
            let mut state = self.write();
            if state.access_code.matches(token) {
                state.toggle(employee_id, Utc::now())
            } else {
                ClockOutcome {
                    employee_name: state
                        .roster
                        .get(&employee_id)
                        .map(|e| e.full_name())
                        .unwrap_or_default(),
                    result: Err(LedgerError::InvalidAccessCode),
                }
            }
        };
        self.finish(employee_id, outcome)
    }

    pub(crate) fn clock_at(&self, employee_id: EmployeeId, kind: ClockType, now: DateTime<Utc>) -> ClockResult {
        let outcome = self.write().apply_clock(employee_id, kind, now);
        self.finish(employee_id, outcome)
    }

    fn finish(&self, employee_id: EmployeeId, outcome: ClockOutcome) -> ClockResult {
        match outcome.result {
            Ok(record) => {
                debug!(%employee_id, record_id = record.id, kind = %record.kind, "Clock action applied");
                self.publish(LedgerEvent::Clocked {
                    employee_id,
                    record_id: record.id,
                    kind: record.kind,
                    at: record.timestamp,
                });
                ClockResult::recorded(outcome.employee_name, record)
            }
            Err(e) => {
                warn!(%employee_id, error = %e, "Clock action rejected");
                ClockResult::failed(outcome.employee_name, &e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::{LedgerSeed, history};
    use super::super::test_support::*;
    use super::*;
    use crate::ledger::error::LedgerErrorCode;

    fn ledger_with(employees: Vec<crate::model::employee::Employee>) -> AttendanceLedger {
        let mut seed = LedgerSeed::empty(access_code());
        seed.employees = employees;
        AttendanceLedger::from_seed(seed)
    }

    fn alice_id() -> EmployeeId {
        EmployeeId::new(1)
    }

    /// Status must equal the type of the chronologically last record.
    fn assert_status_matches_log(ledger: &AttendanceLedger) {
        let state = ledger.read();
        for employee in state.roster.values() {
            let expected = history::last_clock_type(&state.log, employee.id)
                .map(ClockType::resulting_status)
                .unwrap_or(ClockStatus::CheckedOut);
            assert_eq!(employee.status, expected, "status drifted for {}", employee.id);
        }
    }

    #[test]
    fn clock_in_then_out_records_both_events() {
        let ledger = ledger_with(vec![employee(1, "Alice", "Jimenez")]);

        let result = ledger.clock_at(alice_id(), ClockType::ClockIn, at(5, 9, 0));
        assert!(result.success);
        assert_eq!(result.employee_name, "Alice Jimenez");
        assert_eq!(result.message, "Alice Jimenez: clock-in recorded successfully at 09:00:00");
        assert_eq!(result.record.as_ref().map(|r| r.id), Some(1));

        let result = ledger.clock_at(alice_id(), ClockType::ClockOut, at(5, 17, 0));
        assert!(result.success);
        assert_eq!(result.message, "Alice Jimenez: clock-out recorded successfully at 17:00:00");

        let alice = ledger.employee(alice_id()).unwrap();
        assert_eq!(alice.status, ClockStatus::CheckedOut);
        assert_eq!(alice.last_clock_in, Some(at(5, 9, 0)));
        assert_eq!(alice.last_clock_out, Some(at(5, 17, 0)));

        let history = ledger.employee_history(alice_id());
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].duration.as_deref(), Some("8h 0m"));
        assert_status_matches_log(&ledger);
    }

    #[test]
    fn double_clock_in_is_rejected_without_appending() {
        let ledger = ledger_with(vec![employee(1, "Alice", "Jimenez")]);
        assert!(ledger.clock_in(alice_id()).success);

        let second = ledger.clock_in(alice_id());
        assert!(!second.success);
        assert_eq!(second.error, Some(LedgerErrorCode::AlreadyInState));
        assert_eq!(second.message, "Alice Jimenez has already clocked in.");
        assert_eq!(second.employee_name, "Alice Jimenez");
        assert_eq!(ledger.records_for_employee(alice_id()).len(), 1);
        assert_status_matches_log(&ledger);
    }

    #[test]
    fn clock_out_while_checked_out_is_rejected() {
        let ledger = ledger_with(vec![employee(1, "Alice", "Jimenez")]);
        let result = ledger.clock_out(alice_id());
        assert!(!result.success);
        assert_eq!(result.error, Some(LedgerErrorCode::AlreadyInState));
        assert!(ledger.records_for_employee(alice_id()).is_empty());
    }

    #[test]
    fn unknown_employee_is_not_found() {
        let ledger = ledger_with(vec![]);
        for result in [
            ledger.clock_in(EmployeeId::new(7)),
            ledger.clock_out(EmployeeId::new(7)),
            ledger.toggle_clock_status(EmployeeId::new(7)),
        ] {
            assert!(!result.success);
            assert_eq!(result.error, Some(LedgerErrorCode::NotFound));
            assert_eq!(result.employee_name, "");
        }
    }

    #[test]
    fn toggle_flips_exactly_one_state_each_call() {
        let ledger = ledger_with(vec![employee(1, "Alice", "Jimenez")]);

        let first = ledger.toggle_clock_status(alice_id());
        assert_eq!(first.record.unwrap().kind, ClockType::ClockIn);
        assert_eq!(ledger.employee(alice_id()).unwrap().status, ClockStatus::CheckedIn);

        let second = ledger.toggle_clock_status(alice_id());
        assert_eq!(second.record.unwrap().kind, ClockType::ClockOut);
        assert_eq!(ledger.employee(alice_id()).unwrap().status, ClockStatus::CheckedOut);
        assert_status_matches_log(&ledger);
    }

    #[test]
    fn interleaved_calls_keep_status_in_sync_with_log() {
        let ledger = ledger_with(vec![employee(1, "Alice", "Jimenez"), employee(2, "Bob", "Williams")]);
        let bob = EmployeeId::new(2);

        ledger.clock_in(alice_id());
        ledger.clock_in(alice_id());
        ledger.clock_out(bob);
        ledger.toggle_clock_status(bob);
        ledger.clock_out(alice_id());
        ledger.toggle_clock_status(alice_id());
        ledger.clock_in(bob);

        assert_status_matches_log(&ledger);
        assert_eq!(ledger.records_for_employee(alice_id()).len(), 3);
        assert_eq!(ledger.records_for_employee(bob).len(), 1);
    }

    #[test]
    fn record_ids_are_monotonic_across_employees() {
        let ledger = ledger_with(vec![employee(1, "Alice", "Jimenez"), employee(2, "Bob", "Williams")]);
        let a = ledger.clock_in(alice_id()).record.unwrap().id;
        let b = ledger.clock_in(EmployeeId::new(2)).record.unwrap().id;
        let c = ledger.clock_out(alice_id()).record.unwrap().id;
        assert_eq!((a, b, c), (1, 2, 3));
    }

    #[test]
    fn backwards_clock_never_reorders_an_employees_log() {
        let ledger = ledger_with(vec![employee(1, "Alice", "Jimenez")]);
        ledger.clock_at(alice_id(), ClockType::ClockIn, at(5, 9, 0));
        let out = ledger.clock_at(alice_id(), ClockType::ClockOut, at(5, 8, 0));
        assert_eq!(out.record.unwrap().timestamp, at(5, 9, 0));
        assert_status_matches_log(&ledger);
        assert_eq!(ledger.employee_history(alice_id())[0].duration.as_deref(), Some("0h 0m"));
    }

    #[test]
    fn scan_with_wrong_token_changes_nothing() {
        let ledger = ledger_with(vec![employee(1, "Alice", "Jimenez")]);
        let result = ledger.scan(alice_id(), "ACCESS-ID-deadbeef");
        assert!(!result.success);
        assert_eq!(result.error, Some(LedgerErrorCode::InvalidAccessCode));
        assert_eq!(result.employee_name, "Alice Jimenez");
        assert!(ledger.records_for_employee(alice_id()).is_empty());
        assert_eq!(ledger.employee(alice_id()).unwrap().status, ClockStatus::CheckedOut);
    }

    #[test]
    fn scan_with_current_token_toggles() {
        let ledger = ledger_with(vec![employee(1, "Alice", "Jimenez")]);
        let token = ledger.access_code().token;
        assert!(ledger.scan(alice_id(), &format!("{}\n", token)).success);
        assert_eq!(ledger.employee(alice_id()).unwrap().status, ClockStatus::CheckedIn);
    }

    #[test]
    fn listeners_see_successes_only() {
        let ledger = ledger_with(vec![employee(1, "Alice", "Jimenez")]);
        let recorder = Arc::new(Recorder::default());
        ledger.subscribe(recorder.clone());

        ledger.clock_at(alice_id(), ClockType::ClockIn, at(5, 9, 0));
        ledger.clock_at(alice_id(), ClockType::ClockIn, at(5, 9, 5));
        ledger.scan(alice_id(), "wrong");

        assert_eq!(
            recorder.events(),
            vec![LedgerEvent::Clocked {
                employee_id: alice_id(),
                record_id: 1,
                kind: ClockType::ClockIn,
                at: at(5, 9, 0),
            }]
        );
    }
}
