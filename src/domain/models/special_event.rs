use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::warn;

/// One custom slot inside an event's pre-order window.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EventTimeSlot {
    pub time: String,
    pub max_orders: u32,
}

/// An admin-defined special event (e.g. a holiday pre-order day). When one
/// is active for a future target date, its slot list replaces hours-derived
/// generation entirely.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SpecialEvent {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub event_date: NaiveDate,
    pub is_active: bool,
    pub time_slots_json: String,
}

impl SpecialEvent {
    /// Parses the stored slot list. A malformed column yields no slots,
    /// which keeps the day on normal hours-derived generation.
    pub fn time_slots(&self) -> Vec<EventTimeSlot> {
        serde_json::from_str(&self.time_slots_json).unwrap_or_else(|e| {
            warn!(event = %self.id, "malformed time_slots_json, ignoring event slots: {}", e);
            Vec::new()
        })
    }
}
