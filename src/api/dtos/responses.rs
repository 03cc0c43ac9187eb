use crate::domain::models::order::OrderType;
use crate::domain::models::slot::TimeSlotCandidate;
use serde::Serialize;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub order_type: OrderType,
    /// Name of the special event whose custom slots replaced the
    /// hours-derived list, when event mode applied.
    pub event: Option<String>,
    pub slots: Vec<TimeSlotCandidate>,
}

#[derive(Serialize)]
pub struct TodayHoursResponse {
    pub open_now: bool,
    /// "11:00 - 22:00" per interval; empty when closed today.
    pub intervals: Vec<String>,
}
