use crate::api::dtos::requests::CreateOrderRequest;
use crate::domain::models::order::{NewOrderParams, Order};
use crate::domain::models::slot::{parse_slot_time, GRID_MINUTES};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Timelike};
use std::sync::Arc;
use tracing::info;

/// Places an order for a slot. The capacity check runs again inside the
/// insert transaction, so a candidate list that went stale since the last
/// generation pass cannot oversell a slot.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;
    let time = parse_slot_time(&payload.time)
        .ok_or_else(|| AppError::Validation("Invalid time format".into()))?;
    if time.minute() % GRID_MINUTES != 0 {
        return Err(AppError::Validation(format!(
            "Slot times sit on a {}-minute grid",
            GRID_MINUTES
        )));
    }

    // An active event for the slot's date lends its own per-slot limit.
    let max_allowed = match state.event_repo.find_active_by_date(&restaurant_id, date).await? {
        Some(event) => event
            .time_slots()
            .iter()
            .find(|s| parse_slot_time(&s.time) == Some(time))
            .map(|s| s.max_orders)
            .unwrap_or_else(|| payload.order_type.slot_limit()),
        None => payload.order_type.slot_limit(),
    };

    let order = Order::new(NewOrderParams {
        restaurant_id,
        order_type: payload.order_type,
        scheduled_for: date.and_time(time),
        customer_name: payload.customer_name,
    });

    let created = state.order_repo.reserve(&order, max_allowed).await?;
    info!(
        order = %created.id,
        slot = %payload.time,
        order_type = %created.order_type,
        "slot reserved"
    );
    Ok(Json(created))
}
