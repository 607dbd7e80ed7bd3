use chrono::NaiveDate;

use super::{AttendanceLedger, history};
use crate::model::attendance::{ClockType, DailySummary, MissingClockOut};

impl AttendanceLedger {
    /// Dashboard figures for one UTC calendar day.
    ///
    /// Lateness compares an employee's first clock-in of the day against their
    /// shift start plus the tolerance; employees without a shift are never late.
    /// Open sessions that began before `date` are reported as missing clock-outs.
    pub fn daily_summary(&self, date: NaiveDate) -> DailySummary {
        let state = self.read();
        let (mut present, mut late) = (0, 0);
        let mut missing_clock_out = Vec::new();

        for employee in state.roster.values() {
            let first_in = state
                .log
                .iter()
                .filter(|r| {
                    r.employee_id == employee.id
                        && r.kind == ClockType::ClockIn
                        && r.timestamp.date_naive() == date
                })
                .map(|r| r.timestamp)
                .min();

            if let Some(first_in) = first_in {
                present += 1;
                let shift = employee.work_shift_id.and_then(|id| state.shifts.get(&id));
                if shift.is_some_and(|s| s.is_late(first_in.time(), state.tolerance_minutes)) {
                    late += 1;
                }
            }

            missing_clock_out.extend(
                history::reconstruct_sessions(&state.log, employee.id)
                    .into_iter()
                    .filter(|s| s.is_open() && s.clock_in.date_naive() < date)
                    .map(|s| MissingClockOut {
                        employee_id: employee.id,
                        employee_name: employee.full_name(),
                        clock_in: s.clock_in,
                    }),
            );
        }

        DailySummary {
            date,
            present,
            on_time: present - late,
            late,
            absent: state.roster.len() - present,
            missing_clock_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::super::test_support::*;
    use super::super::LedgerSeed;
    use super::*;
    use crate::model::work_shift::WorkShift;

    #[test]
    fn counts_present_late_absent_and_missing_clock_outs() {
        let mut alice = employee(1, "Alice", "Jimenez");
        let mut bob = employee(2, "Bob", "Williams");
        let carl = employee(3, "Carl", "Pardo");
        let dana = employee(4, "Dana", "Molina");
        alice.work_shift_id = Some(1);
        bob.work_shift_id = Some(1);

        let mut seed = LedgerSeed::empty(access_code());
        seed.tolerance_minutes = 10;
        seed.work_shifts = vec![WorkShift {
            id: 1,
            name: "Morning".into(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }];
        seed.records = vec![
            // carl forgot to clock out the day before
            record(1, &carl, ClockType::ClockIn, at(4, 9, 0)),
            record(2, &alice, ClockType::ClockIn, at(5, 9, 8)),
            record(3, &alice, ClockType::ClockOut, at(5, 12, 0)),
            // a later re-entry does not make alice late
            record(4, &alice, ClockType::ClockIn, at(5, 13, 0)),
            record(5, &bob, ClockType::ClockIn, at(5, 9, 25)),
        ];
        seed.employees = vec![alice, bob, carl, dana];

        let ledger = AttendanceLedger::from_seed(seed);
        let summary = ledger.daily_summary(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());

        assert_eq!(summary.present, 2);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.on_time, 1);
        assert_eq!(summary.absent, 2);
        assert_eq!(summary.missing_clock_out.len(), 1);
        assert_eq!(summary.missing_clock_out[0].employee_name, "Carl Pardo");
        assert_eq!(summary.missing_clock_out[0].clock_in, at(4, 9, 0));
    }

    #[test]
    fn empty_roster_has_all_zero_figures() {
        let ledger = AttendanceLedger::from_seed(LedgerSeed::empty(access_code()));
        let summary = ledger.daily_summary(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!((summary.present, summary.late, summary.absent), (0, 0, 0));
        assert!(summary.missing_clock_out.is_empty());
    }
}
