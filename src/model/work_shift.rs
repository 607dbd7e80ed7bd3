use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "name": "Morning",
    "startTime": "09:00:00",
    "endTime": "17:00:00"
}))]
pub struct WorkShift {
    pub id: u64,
    pub name: String,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkShiftRequest {
    #[schema(example = "Morning")]
    pub name: String,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,
}

impl WorkShift {
    /// Shift length in minutes. An end before the start means the shift runs past midnight.
    pub fn duration_minutes(&self) -> i64 {
        let start = minute_of_day(self.start_time);
        let mut end = minute_of_day(self.end_time);
        if end < start {
            end += MINUTES_PER_DAY;
        }
        end - start
    }

    /// `"8"` for whole hours, `"7:30"` otherwise.
    pub fn duration_label(&self) -> String {
        let minutes = self.duration_minutes();
        let (hours, mins) = (minutes / 60, minutes % 60);
        if mins > 0 {
            format!("{}:{:02}", hours, mins)
        } else {
            hours.to_string()
        }
    }

    /// Latest clock-in time still counted as punctual.
    pub fn late_after(&self, tolerance_minutes: u32) -> NaiveTime {
        // overflowing_add_signed wraps around midnight
        self.start_time
            .overflowing_add_signed(Duration::minutes(i64::from(tolerance_minutes)))
            .0
    }

    pub fn late_after_label(&self, tolerance_minutes: u32) -> String {
        self.late_after(tolerance_minutes).format("%H:%M").to_string()
    }

    pub fn is_late(&self, clock_in: NaiveTime, tolerance_minutes: u32) -> bool {
        clock_in > self.late_after(tolerance_minutes)
    }
}

/// Shift as listed to admins, with the figures the config screen previews.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkShiftView {
    #[serde(flatten)]
    pub shift: WorkShift,
    #[schema(example = "8")]
    pub duration: String,
    #[schema(example = "09:10")]
    pub late_after: String,
}

impl WorkShiftView {
    pub fn new(shift: WorkShift, tolerance_minutes: u32) -> Self {
        Self {
            duration: shift.duration_label(),
            late_after: shift.late_after_label(tolerance_minutes),
            shift,
        }
    }
}

fn minute_of_day(t: NaiveTime) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute())
}
