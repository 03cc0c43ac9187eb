use crate::domain::models::hours::OpeningInterval;
use crate::domain::models::order::OrderType;
use crate::domain::models::slot::{
    format_slot_time, parse_slot_time, round_up_to_grid, TimeSlotCandidate, GRID_MINUTES,
    LEAD_TIME_MINUTES,
};
use crate::domain::models::special_event::EventTimeSlot;
use crate::domain::services::capacity::SlotUsage;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashSet;

/// Everything one generation pass reads. Assembled once per pass from the
/// three leaf stores; `generate_slots` is a pure function of this snapshot
/// plus the clock.
#[derive(Debug, Clone)]
pub struct SlotSnapshot {
    pub intervals: Vec<OpeningInterval>,
    pub usage: SlotUsage,
    pub blocked: HashSet<NaiveTime>,
    /// Custom slots for an active special event on the target date.
    /// When non-empty (and the date is ahead of today) they replace
    /// hours-derived generation entirely.
    pub event_slots: Vec<EventTimeSlot>,
}

/// Produces the ordered candidate list for one target date.
///
/// Re-running with the same snapshot and the same `now` yields an identical
/// list; all variation between passes comes from the snapshot or the clock.
pub fn generate_slots(
    snapshot: &SlotSnapshot,
    order_type: OrderType,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<TimeSlotCandidate> {
    let event_mode = !snapshot.event_slots.is_empty() && date > now.date();

    let mut candidates = if event_mode {
        event_candidates(snapshot, order_type)
    } else {
        hours_candidates(snapshot, order_type, date, now)
    };

    candidates.sort_by(|a, b| a.value.cmp(&b.value));
    candidates.dedup_by(|a, b| a.value == b.value);
    candidates
}

fn hours_candidates(
    snapshot: &SlotSnapshot,
    order_type: OrderType,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<TimeSlotCandidate> {
    let lead = Duration::minutes(LEAD_TIME_MINUTES);
    let step = Duration::minutes(GRID_MINUTES as i64);
    let today = date == now.date();
    let cutoff = now + lead;

    let mut out = Vec::new();
    for interval in &snapshot.intervals {
        // Kitchen ramp-up: the first quarter hour after opening is never
        // offered.
        let raw_start = interval.open + step;
        let raw_end = interval.close;

        // While closing is at least the lead time away, the whole window
        // stays selectable, including slots earlier than "now". Only inside
        // the final stretch does the lead time gate the start.
        let min_start = if !today || date.and_time(raw_end) - now >= lead {
            raw_start
        } else {
            if cutoff.date() > date {
                // Lead time spills past midnight; nothing left today.
                continue;
            }
            raw_start.max(round_up_to_grid(cutoff))
        };

        let mut t = min_start;
        while t < raw_end {
            let is_passed = cutoff > date.and_time(t);
            let is_full = snapshot.usage.count(order_type, t) >= order_type.slot_limit();
            let is_blocked = snapshot.blocked.contains(&t);
            out.push(TimeSlotCandidate {
                label: format_slot_time(t),
                value: format_slot_time(t),
                disabled: is_passed || is_full || is_blocked,
            });
            t += step;
        }
    }
    out
}

fn event_candidates(snapshot: &SlotSnapshot, order_type: OrderType) -> Vec<TimeSlotCandidate> {
    snapshot
        .event_slots
        .iter()
        .map(|slot| match parse_slot_time(&slot.time) {
            Some(t) => {
                let is_full = snapshot.usage.count(order_type, t) >= slot.max_orders;
                let is_blocked = snapshot.blocked.contains(&t);
                TimeSlotCandidate {
                    label: format_slot_time(t),
                    value: format_slot_time(t),
                    disabled: is_full || is_blocked,
                }
            }
            // Fail closed: a malformed upstream time is shown but never
            // selectable.
            None => TimeSlotCandidate {
                label: slot.time.clone(),
                value: slot.time.clone(),
                disabled: true,
            },
        })
        .collect()
}
