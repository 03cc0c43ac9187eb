use crate::api::dtos::{requests::SlotsQuery, responses::SlotsResponse};
use crate::domain::services::planner::SlotQuery;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
    Query(params): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let now = chrono::Local::now().naive_local();
    let date = match &params.date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid date format".into()))?,
        None => now.date(),
    };

    // Custom event slots only override generation for a future date.
    let event = if date > now.date() {
        state.event_repo.find_active_by_date(&restaurant_id, date).await?
    } else {
        None
    };

    let event_slots = event.as_ref().map(|e| e.time_slots()).unwrap_or_default();
    let event_name = match &event {
        Some(e) if !event_slots.is_empty() => Some(e.name.clone()),
        _ => None,
    };

    let query = SlotQuery {
        restaurant_id,
        date,
        order_type: params.order_type,
        event_slots,
    };

    let plan = state.planner.plan(&query, now).await;

    Ok(Json(SlotsResponse {
        date: date.to_string(),
        order_type: params.order_type,
        event: event_name,
        slots: plan.candidates,
    }))
}
