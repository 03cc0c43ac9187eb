use crate::domain::models::order::OrderType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ServiceType {
    Delivery,
    Pickup,
    Both,
}

impl ServiceType {
    pub fn applies_to(&self, order_type: OrderType) -> bool {
        match self {
            ServiceType::Both => true,
            ServiceType::Delivery => order_type == OrderType::Delivery,
            ServiceType::Pickup => order_type == OrderType::Pickup,
        }
    }
}

/// An administrator-blocked time value for one date.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BlockedSlot {
    pub id: String,
    pub restaurant_id: String,
    pub blocked_date: NaiveDate,
    pub blocked_time: String,
    pub service_type: ServiceType,
    pub reason: Option<String>,
}
