use super::error::{LedgerError, LedgerResult};
use super::events::LedgerEvent;
use super::AttendanceLedger;
use crate::model::access_code::{generate_token, AccessCode};
use crate::model::work_shift::{WorkShift, WorkShiftRequest, WorkShiftView};

fn shift_name(req: &WorkShiftRequest) -> LedgerResult<String> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation("Work shift name is required"));
    }
    Ok(name.to_string())
}

impl AttendanceLedger {
    pub fn work_shifts(&self) -> Vec<WorkShift> {
        self.read().shifts.values().cloned().collect()
    }

    /// Shifts decorated with their duration and lateness threshold under the current tolerance.
    pub fn work_shift_views(&self) -> Vec<WorkShiftView> {
        let state = self.read();
        state
            .shifts
            .values()
            .cloned()
            .map(|s| WorkShiftView::new(s, state.tolerance_minutes))
            .collect()
    }

    pub fn create_work_shift(&self, req: WorkShiftRequest) -> LedgerResult<u64> {
        let name = shift_name(&req)?;
        let id = {
            let mut state = self.write();
            let id = state.next_shift_id;
            state.shifts.insert(
                id,
                WorkShift {
                    id,
                    name,
                    start_time: req.start_time,
                    end_time: req.end_time,
                },
            );
            state.next_shift_id += 1;
            id
        };
        self.publish(LedgerEvent::ShiftsChanged);
        Ok(id)
    }

    pub fn update_work_shift(&self, id: u64, req: WorkShiftRequest) -> LedgerResult<u64> {
        let name = shift_name(&req)?;
        {
            let mut state = self.write();
            let shift = state
                .shifts
                .get_mut(&id)
                .ok_or_else(|| LedgerError::not_found("Work shift", id))?;
            shift.name = name;
            shift.start_time = req.start_time;
            shift.end_time = req.end_time;
        }
        self.publish(LedgerEvent::ShiftsChanged);
        Ok(id)
    }

    /// Refused while any employee is still assigned to the shift.
    pub fn delete_work_shift(&self, id: u64) -> LedgerResult<()> {
        {
            let mut state = self.write();
            if !state.shifts.contains_key(&id) {
                return Err(LedgerError::not_found("Work shift", id));
            }
            if state.roster.values().any(|e| e.work_shift_id == Some(id)) {
                return Err(LedgerError::ShiftInUse { shift_id: id });
            }
            state.shifts.remove(&id);
        }
        self.publish(LedgerEvent::ShiftsChanged);
        Ok(())
    }

    pub fn tolerance_minutes(&self) -> u32 {
        self.read().tolerance_minutes
    }

    /// Negative values clamp to zero. Returns the stored value.
    pub fn set_tolerance_minutes(&self, minutes: i64) -> u32 {
        let minutes = u32::try_from(minutes.max(0)).unwrap_or(u32::MAX);
        self.write().tolerance_minutes = minutes;
        self.publish(LedgerEvent::ToleranceChanged { minutes });
        minutes
    }

    pub fn access_code(&self) -> AccessCode {
        self.read().access_code.clone()
    }

    pub fn rename_access_code(&self, name: &str) -> LedgerResult<AccessCode> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::validation("Access code name is required"));
        }
        let code = {
            let mut state = self.write();
            state.access_code.name = name.to_string();
            state.access_code.clone()
        };
        self.publish(LedgerEvent::AccessCodeChanged);
        Ok(code)
    }

    /// Issues a new token; the previous one stops validating immediately.
    pub fn regenerate_access_token(&self) -> String {
        let token = generate_token();
        self.write().access_code.token.clone_from(&token);
        self.publish(LedgerEvent::AccessCodeChanged);
        token
    }
}
