use crate::domain::models::order::OrderType;
use crate::domain::models::slot::parse_slot_time;
use crate::domain::ports::BlockedSlotRepository;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

pub struct BlockedSlotRegistry {
    repo: Arc<dyn BlockedSlotRepository>,
}

impl BlockedSlotRegistry {
    pub fn new(repo: Arc<dyn BlockedSlotRepository>) -> Self {
        Self { repo }
    }

    /// Times blocked for `date` as seen by one order type: an entry applies
    /// when its service type is `both` or matches the request. Malformed
    /// time values are dropped with a warning.
    pub async fn blocked_times(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
        order_type: OrderType,
    ) -> HashSet<NaiveTime> {
        let rows = match super::fetch_with_retry("blocked slots", || {
            self.repo.list_for_date(restaurant_id, date)
        })
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!(
                    restaurant = restaurant_id,
                    "blocked slots unavailable, assuming none: {}", e
                );
                return HashSet::new();
            }
        };

        rows.iter()
            .filter(|b| b.service_type.applies_to(order_type))
            .filter_map(|b| match parse_slot_time(&b.blocked_time) {
                Some(t) => Some(t),
                None => {
                    warn!(
                        restaurant = restaurant_id,
                        "skipping blocked slot with malformed time {:?}", b.blocked_time
                    );
                    None
                }
            })
            .collect()
    }
}
