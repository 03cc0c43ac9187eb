use crate::domain::models::order::{OrderRecord, OrderType};
use crate::domain::ports::OrderRepository;
use chrono::{NaiveDate, NaiveTime, Timelike};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Per-slot order counts for one target date, split by order type.
/// Built from a single batched query, then consulted in memory for every
/// candidate.
#[derive(Debug, Default, Clone)]
pub struct SlotUsage {
    delivery: HashMap<NaiveTime, u32>,
    pickup: HashMap<NaiveTime, u32>,
}

impl SlotUsage {
    pub fn from_orders(orders: &[OrderRecord]) -> Self {
        let mut usage = Self::default();
        for order in orders {
            if !order.payment_status.counts_toward_capacity() {
                continue;
            }
            let t = order
                .scheduled_for
                .time()
                .with_second(0)
                .unwrap()
                .with_nanosecond(0)
                .unwrap();
            let map = match order.order_type {
                OrderType::Delivery => &mut usage.delivery,
                OrderType::Pickup => &mut usage.pickup,
            };
            *map.entry(t).or_insert(0) += 1;
        }
        usage
    }

    pub fn count(&self, order_type: OrderType, t: NaiveTime) -> u32 {
        let map = match order_type {
            OrderType::Delivery => &self.delivery,
            OrderType::Pickup => &self.pickup,
        };
        map.get(&t).copied().unwrap_or(0)
    }
}

pub struct OrderCapacityTracker {
    repo: Arc<dyn OrderRepository>,
}

impl OrderCapacityTracker {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// Usage for `[date 00:00, date+1 00:00)`. On a persistent fetch
    /// failure the pass proceeds with zero counts rather than aborting.
    pub async fn usage_for_date(&self, restaurant_id: &str, date: NaiveDate) -> SlotUsage {
        let start = date.and_hms_opt(0, 0, 0).unwrap();
        let end = (date + chrono::Duration::days(1)).and_hms_opt(0, 0, 0).unwrap();

        match super::fetch_with_retry("scheduled orders", || {
            self.repo.list_scheduled(restaurant_id, start, end)
        })
        .await
        {
            Ok(orders) => SlotUsage::from_orders(&orders),
            Err(e) => {
                warn!(
                    restaurant = restaurant_id,
                    "order counts unavailable, assuming empty slots: {}", e
                );
                SlotUsage::default()
            }
        }
    }
}
