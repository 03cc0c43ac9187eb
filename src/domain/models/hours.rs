use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One weekly-hours row as stored. A weekday may carry several rows
/// (distinct `slot_number`s) for split service, e.g. lunch and dinner.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct DayHours {
    pub day: String,
    pub slot_number: i32,
    pub is_open: bool,
    pub open_time: String,
    pub close_time: String,
}

/// A resolved, validated open period within a day. Invariant: `open < close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningInterval {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub slot_number: i32,
}

impl OpeningInterval {
    /// Half-open: a restaurant closing at 22:00 is not open at 22:00.
    pub fn contains(&self, t: NaiveTime) -> bool {
        self.open <= t && t < self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_is_half_open() {
        let interval = OpeningInterval {
            open: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            slot_number: 0,
        };
        assert!(interval.contains(NaiveTime::from_hms_opt(11, 0, 0).unwrap()));
        assert!(interval.contains(NaiveTime::from_hms_opt(21, 59, 59).unwrap()));
        assert!(!interval.contains(NaiveTime::from_hms_opt(22, 0, 0).unwrap()));
        assert!(!interval.contains(NaiveTime::from_hms_opt(10, 45, 0).unwrap()));
    }
}
