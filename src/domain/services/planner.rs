use crate::domain::models::order::OrderType;
use crate::domain::models::slot::TimeSlotCandidate;
use crate::domain::models::special_event::EventTimeSlot;
use crate::domain::services::blocked::BlockedSlotRegistry;
use crate::domain::services::capacity::OrderCapacityTracker;
use crate::domain::services::hours::OpeningHoursResolver;
use crate::domain::services::slots::{generate_slots, SlotSnapshot};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Inputs of one generation pass.
#[derive(Debug, Clone)]
pub struct SlotQuery {
    pub restaurant_id: String,
    pub date: NaiveDate,
    pub order_type: OrderType,
    pub event_slots: Vec<EventTimeSlot>,
}

/// Immutable, hashable request descriptor. Two queries with equal keys
/// would fetch and compute the same thing, so a pass for one can be
/// skipped or reused for the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotQueryKey {
    restaurant_id: String,
    date: NaiveDate,
    order_type: OrderType,
    event_signature: String,
}

impl SlotQuery {
    pub fn key(&self) -> SlotQueryKey {
        let event_signature = self
            .event_slots
            .iter()
            .map(|s| format!("{}@{}", s.time, s.max_orders))
            .collect::<Vec<_>>()
            .join(",");
        SlotQueryKey {
            restaurant_id: self.restaurant_id.clone(),
            date: self.date,
            order_type: self.order_type,
            event_signature,
        }
    }
}

/// The candidate list of one pass, stamped with the generation that
/// produced it. A stamped result may only be applied while its generation
/// is still the latest issued (last request wins, not last response).
#[derive(Debug, Clone)]
pub struct PlannedSlots {
    pub generation: u64,
    pub candidates: Vec<TimeSlotCandidate>,
}

pub struct SlotPlanner {
    hours: OpeningHoursResolver,
    capacity: OrderCapacityTracker,
    blocked: BlockedSlotRegistry,
    generation: AtomicU64,
}

impl SlotPlanner {
    pub fn new(
        hours: OpeningHoursResolver,
        capacity: OrderCapacityTracker,
        blocked: BlockedSlotRegistry,
    ) -> Self {
        Self {
            hours,
            capacity,
            blocked,
            generation: AtomicU64::new(0),
        }
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Reads an immutable snapshot from the three stores, all fetches in
    /// flight at once. Leaf failures already degraded to safe defaults
    /// inside each service, so this cannot fail.
    pub async fn snapshot(&self, query: &SlotQuery) -> SlotSnapshot {
        let (intervals, usage, blocked) = tokio::join!(
            self.hours.intervals_for(&query.restaurant_id, query.date),
            self.capacity.usage_for_date(&query.restaurant_id, query.date),
            self.blocked
                .blocked_times(&query.restaurant_id, query.date, query.order_type),
        );
        SlotSnapshot {
            intervals,
            usage,
            blocked,
            event_slots: query.event_slots.clone(),
        }
    }

    /// One full generation pass. Always returns a (possibly empty) list.
    pub async fn plan(&self, query: &SlotQuery, now: NaiveDateTime) -> PlannedSlots {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            restaurant = %query.restaurant_id,
            date = %query.date,
            order_type = %query.order_type,
            generation,
            "slot generation pass"
        );
        let snapshot = self.snapshot(query).await;
        let candidates = generate_slots(&snapshot, query.order_type, query.date, now);
        PlannedSlots {
            generation,
            candidates,
        }
    }
}
