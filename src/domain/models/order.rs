use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderType {
    Delivery,
    Pickup,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Delivery => write!(f, "delivery"),
            OrderType::Pickup => write!(f, "pickup"),
        }
    }
}

impl OrderType {
    /// Fixed per-slot admission limit. Business constants, not
    /// per-restaurant configuration.
    pub fn slot_limit(&self) -> u32 {
        match self {
            OrderType::Delivery => 1,
            OrderType::Pickup => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
}

impl PaymentStatus {
    /// Only paid and pending orders hold a slot; failed payments do not.
    pub fn counts_toward_capacity(&self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Pending)
    }
}

/// Read-only projection used by the capacity tracker. One row per
/// scheduled order inside the target-date window.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRecord {
    pub scheduled_for: NaiveDateTime,
    pub order_type: OrderType,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Order {
    pub id: String,
    pub restaurant_id: String,
    pub order_type: OrderType,
    pub scheduled_for: NaiveDateTime,
    pub payment_status: PaymentStatus,
    pub customer_name: Option<String>,
    pub created_at: NaiveDateTime,
}

pub struct NewOrderParams {
    pub restaurant_id: String,
    pub order_type: OrderType,
    pub scheduled_for: NaiveDateTime,
    pub customer_name: Option<String>,
}

impl Order {
    pub fn new(params: NewOrderParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            restaurant_id: params.restaurant_id,
            order_type: params.order_type,
            scheduled_for: params.scheduled_for,
            payment_status: PaymentStatus::Pending,
            customer_name: params.customer_name,
            created_at: Utc::now().naive_utc(),
        }
    }
}
