use crate::domain::models::order::OrderType;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SlotsQuery {
    /// Target date, defaults to today.
    pub date: Option<String>,
    pub order_type: OrderType,
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub order_type: OrderType,
    /// Target date, "YYYY-MM-DD".
    pub date: String,
    /// Slot value, "HH:MM".
    pub time: String,
    pub customer_name: Option<String>,
}
