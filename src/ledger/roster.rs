use tracing::debug;

use super::error::{LedgerError, LedgerResult};
use super::events::LedgerEvent;
use super::{AttendanceLedger, LedgerState, history};
use crate::auth::password::{hash_password, verify_password};
use crate::model::attendance::{AttendanceRecord, WorkSession};
use crate::model::employee::{ClockStatus, Employee, EmployeeCombo, EmployeeId, EmployeeRequest};

/// Trimmed copy of the request with required fields checked.
struct ValidatedRequest {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    username: String,
    password: Option<String>,
    work_shift_id: Option<u64>,
}

fn required(field: &str, value: &str) -> LedgerResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LedgerError::validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn validate(req: EmployeeRequest) -> LedgerResult<ValidatedRequest> {
    Ok(ValidatedRequest {
        first_name: required("First name", &req.first_name)?,
        last_name: required("Last name", &req.last_name)?,
        email: required("Email", &req.email)?,
        phone: req
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
        username: required("Username", &req.username)?,
        password: req.password.filter(|p| !p.is_empty()),
        work_shift_id: req.work_shift_id,
    })
}

impl LedgerState {
    fn check_username_free(&self, username: &str, except: Option<EmployeeId>) -> LedgerResult<()> {
        let taken = self
            .roster
            .values()
            .any(|e| Some(e.id) != except && e.username.eq_ignore_ascii_case(username));
        if taken {
            return Err(LedgerError::validation(format!(
                "Username {} is already taken",
                username
            )));
        }
        Ok(())
    }

    fn check_shift_exists(&self, shift_id: Option<u64>) -> LedgerResult<()> {
        match shift_id {
            Some(id) if !self.shifts.contains_key(&id) => Err(LedgerError::not_found("Work shift", id)),
            _ => Ok(()),
        }
    }
}

impl AttendanceLedger {
    /// Hires an employee. New hires start checked out with no clock history.
    pub fn add_employee(&self, req: EmployeeRequest) -> LedgerResult<Employee> {
        let req = validate(req)?;
        let password = req
            .password
            .as_deref()
            .ok_or_else(|| LedgerError::validation("Password is required"))?;
        // hashing is slow, keep it outside the lock
        let password_hash = hash_password(password)?;

        let employee = {
            let mut state = self.write();
            state.check_username_free(&req.username, None)?;
            state.check_shift_exists(req.work_shift_id)?;

            let employee = Employee {
                id: EmployeeId::new(state.next_employee_seq),
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                phone: req.phone,
                username: req.username,
                password_hash,
                status: ClockStatus::CheckedOut,
                last_clock_in: None,
                last_clock_out: None,
                work_shift_id: req.work_shift_id,
            };
            state.next_employee_seq += 1;
            state.roster.insert(employee.id, employee.clone());
            employee
        };

        self.publish(LedgerEvent::EmployeeAdded {
            employee_id: employee.id,
        });
        Ok(employee)
    }

    /// Edits a profile. A change of first or last name rewrites the name
    /// snapshot on every log record of that employee; nothing else on the
    /// records is touched.
    pub fn update_employee(&self, employee_id: EmployeeId, req: EmployeeRequest) -> LedgerResult<Employee> {
        let req = validate(req)?;
        let new_hash = req.password.as_deref().map(hash_password).transpose()?;

        let (employee, renamed) = {
            let mut state = self.write();
            let current = state
                .roster
                .get(&employee_id)
                .ok_or_else(|| LedgerError::employee_not_found(employee_id))?;
            let renamed = current.first_name != req.first_name || current.last_name != req.last_name;

            state.check_username_free(&req.username, Some(employee_id))?;
            state.check_shift_exists(req.work_shift_id)?;

            let updated = Employee {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                phone: req.phone,
                username: req.username,
                password_hash: new_hash.unwrap_or_else(|| current.password_hash.clone()),
                work_shift_id: req.work_shift_id,
                ..current.clone()
            };

            if renamed {
                let full_name = updated.full_name();
                let mut rewritten = 0usize;
                for record in state.log.iter_mut().filter(|r| r.employee_id == employee_id) {
                    record.employee_name.clone_from(&full_name);
                    rewritten += 1;
                }
                debug!(%employee_id, rewritten, "Rewrote name snapshots after rename");
            }
            state.roster.insert(employee_id, updated.clone());
            (updated, renamed)
        };

        self.publish(LedgerEvent::EmployeeUpdated {
            employee_id,
            renamed,
        });
        Ok(employee)
    }

    /// Removes the employee together with all of their log records.
    /// Returns the number of records removed.
    pub fn delete_employee(&self, employee_id: EmployeeId) -> LedgerResult<usize> {
        let removed_records = {
            let mut state = self.write();
            if state.roster.remove(&employee_id).is_none() {
                return Err(LedgerError::employee_not_found(employee_id));
            }
            let before = state.log.len();
            state.log.retain(|r| r.employee_id != employee_id);
            before - state.log.len()
        };

        self.publish(LedgerEvent::EmployeeDeleted {
            employee_id,
            removed_records,
        });
        Ok(removed_records)
    }

    pub fn employee(&self, employee_id: EmployeeId) -> LedgerResult<Employee> {
        self.read()
            .roster
            .get(&employee_id)
            .cloned()
            .ok_or_else(|| LedgerError::employee_not_found(employee_id))
    }

    /// Whole roster in id order.
    pub fn employees(&self) -> Vec<Employee> {
        self.read().roster.values().cloned().collect()
    }

    /// Case-insensitive match on names, email or username. A blank term matches everyone.
    pub fn search_employees(&self, term: Option<&str>) -> Vec<Employee> {
        let term = term.map(str::trim).filter(|t| !t.is_empty()).map(str::to_lowercase);
        let Some(term) = term else {
            return self.employees();
        };

        self.read()
            .roster
            .values()
            .filter(|e| {
                [&e.first_name, &e.last_name, &e.email, &e.username]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
                    || e.full_name().to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    pub fn employee_combos(&self) -> Vec<EmployeeCombo> {
        self.read().roster.values().map(EmployeeCombo::from).collect()
    }

    /// Checks a username-or-email / password pair. Failures are indistinguishable.
    pub fn authenticate(&self, identifier: &str, password: &str) -> LedgerResult<Employee> {
        let identifier = identifier.trim();
        let candidate = self
            .read()
            .roster
            .values()
            .find(|e| e.username.eq_ignore_ascii_case(identifier) || e.email.eq_ignore_ascii_case(identifier))
            .cloned();

        match candidate {
            Some(employee) if verify_password(password, &employee.password_hash) => Ok(employee),
            _ => Err(LedgerError::InvalidCredentials),
        }
    }

    /// Raw audit view, newest first. Unknown ids yield an empty list.
    pub fn records_for_employee(&self, employee_id: EmployeeId) -> Vec<AttendanceRecord> {
        history::records_for(&self.read().log, employee_id)
    }

    /// Reconstructed work sessions, most recent first. Unknown ids yield an empty list.
    pub fn employee_history(&self, employee_id: EmployeeId) -> Vec<WorkSession> {
        history::reconstruct_sessions(&self.read().log, employee_id)
    }
}
