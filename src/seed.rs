//! Demo roster and log for local runs (`SEED_DEMO_DATA=true`).

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::auth::password::hash_password;
use crate::ledger::LedgerSeed;
use crate::ledger::error::LedgerResult;
use crate::model::access_code::AccessCode;
use crate::model::attendance::{AttendanceRecord, ClockType};
use crate::model::employee::{ClockStatus, Employee, EmployeeId};
use crate::model::work_shift::WorkShift;

const DEMO_PASSWORD: &str = "password123";

/// `days_ago` days before `now`, at the given UTC wall time.
fn past(now: DateTime<Utc>, days_ago: i64, hour: u32, minute: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    (now - Duration::days(days_ago)).date_naive().and_time(time).and_utc()
}

pub fn demo_seed(now: DateTime<Utc>, access_code_name: &str, tolerance_minutes: u32) -> LedgerResult<LedgerSeed> {
    let people = [
        (1, "Alice", "Jimenez", "555-0101"),
        (2, "Robert", "Williams", "555-0102"),
        (3, "Carl", "Pardo", "555-0103"),
        (4, "Diana", "Molina", "555-0104"),
    ];

    let mut employees = Vec::with_capacity(people.len());
    for (seq, first, last, phone) in people {
        let username = format!("{}.{}", first, last).to_lowercase();
        employees.push(Employee {
            id: EmployeeId::new(seq),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", username),
            phone: Some(phone.to_string()),
            username,
            password_hash: hash_password(DEMO_PASSWORD)?,
            // re-derived from the log by the ledger
            status: ClockStatus::CheckedOut,
            last_clock_in: None,
            last_clock_out: None,
            work_shift_id: Some(1),
        });
    }

    use ClockType::{ClockIn as In, ClockOut as Out};
    let events = [
        // Alice: two regular days
        (1, In, past(now, 2, 9, 1)),
        (1, Out, past(now, 2, 17, 3)),
        (1, In, past(now, 1, 8, 58)),
        (1, Out, past(now, 1, 17, 12)),
        // Robert: clocked in today
        (2, In, past(now, 1, 8, 30)),
        (2, Out, past(now, 1, 16, 45)),
        (2, In, past(now, 0, 8, 45)),
        // Carl: split day with a lunch break
        (3, In, past(now, 1, 9, 15)),
        (3, Out, past(now, 1, 13, 0)),
        (3, In, past(now, 1, 14, 2)),
        (3, Out, past(now, 1, 18, 5)),
        (3, In, past(now, 2, 9, 5)),
        (3, Out, past(now, 2, 17, 20)),
        // Diana has no records
    ];

    let records = events
        .into_iter()
        .enumerate()
        .map(|(i, (seq, kind, timestamp))| {
            let employee = &employees[seq - 1];
            AttendanceRecord {
                id: i as u64 + 1,
                employee_id: employee.id,
                employee_name: employee.full_name(),
                timestamp,
                kind,
            }
        })
        .collect();

    let work_shifts = vec![WorkShift {
        id: 1,
        name: "Morning".to_string(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
        end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
    }];

    Ok(LedgerSeed {
        employees,
        records,
        work_shifts,
        tolerance_minutes,
        access_code: AccessCode::generate(access_code_name),
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::ledger::AttendanceLedger;

    #[test]
    fn demo_state_is_consistent() {
        let now = Utc.with_ymd_and_hms(2026, 1, 7, 12, 0, 0).unwrap();
        let ledger = AttendanceLedger::from_seed(demo_seed(now, "Demo", 5).unwrap());

        let robert = ledger.employee(EmployeeId::new(2)).unwrap();
        assert_eq!(robert.status, ClockStatus::CheckedIn);
        assert_eq!(robert.last_clock_in, Some(past(now, 0, 8, 45)));

        let carl_sessions = ledger.employee_history(EmployeeId::new(3));
        assert_eq!(carl_sessions.len(), 3);
        assert_eq!(carl_sessions[0].duration.as_deref(), Some("4h 3m"));

        assert!(ledger.employee_history(EmployeeId::new(4)).is_empty());
        assert!(ledger.authenticate("diana.molina", DEMO_PASSWORD).is_ok());

        assert_eq!(ledger.employees().len(), 4);
        assert_eq!(ledger.tolerance_minutes(), 5);
    }
}
