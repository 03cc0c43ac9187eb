use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

/// All candidate times sit on a 15-minute grid.
pub const GRID_MINUTES: u32 = 15;
/// Minimum buffer between "now" and the earliest selectable slot when the
/// current service window is about to close.
pub const LEAD_TIME_MINUTES: i64 = 30;

/// A selectable fulfillment time. Derived fresh on every generation pass,
/// never persisted or mutated.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TimeSlotCandidate {
    pub label: String,
    pub value: String,
    pub disabled: bool,
}

pub fn format_slot_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn parse_slot_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Rounds up to the next grid point; times already on the grid stay put.
/// Seconds are dropped first so 21:40:30 rounds the same as 21:40.
pub fn round_up_to_grid(t: NaiveDateTime) -> NaiveTime {
    let t = t.with_second(0).unwrap().with_nanosecond(0).unwrap();
    let rem = t.minute() % GRID_MINUTES;
    if rem == 0 {
        t.time()
    } else {
        (t + chrono::Duration::minutes((GRID_MINUTES - rem) as i64)).time()
    }
}
