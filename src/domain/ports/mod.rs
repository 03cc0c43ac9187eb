use crate::domain::models::{
    blocked::BlockedSlot,
    hours::DayHours,
    order::{Order, OrderRecord},
    special_event::SpecialEvent,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

#[async_trait]
pub trait OpeningHoursRepository: Send + Sync {
    /// All configured hours rows for one restaurant, every weekday and
    /// service interval included.
    async fn weekly_hours(&self, restaurant_id: &str) -> Result<Vec<DayHours>, AppError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Every non-failed order scheduled inside `[start, end)`. One batched
    /// query per generation pass; callers must not loop this per slot.
    async fn list_scheduled(
        &self,
        restaurant_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<OrderRecord>, AppError>;

    /// Inserts the order only if the slot still has room for its order
    /// type. Count and insert run in one transaction so two concurrent
    /// customers cannot both take the last opening.
    async fn reserve(&self, order: &Order, max_allowed: u32) -> Result<Order, AppError>;
}

#[async_trait]
pub trait BlockedSlotRepository: Send + Sync {
    async fn list_for_date(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<BlockedSlot>, AppError>;
}

#[async_trait]
pub trait SpecialEventRepository: Send + Sync {
    async fn find_active_by_date(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
    ) -> Result<Option<SpecialEvent>, AppError>;
}
