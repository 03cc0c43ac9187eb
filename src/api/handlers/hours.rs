use crate::api::dtos::responses::TodayHoursResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// Today's service windows and whether the restaurant is open right now.
pub async fn get_today_hours(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
) -> impl IntoResponse {
    let now = chrono::Local::now().naive_local();
    let intervals = state.hours.intervals_for(&restaurant_id, now.date()).await;

    let open_now = intervals.iter().any(|i| i.contains(now.time()));

    Json(TodayHoursResponse {
        open_now,
        intervals: intervals
            .iter()
            .map(|i| format!("{} - {}", i.open.format("%H:%M"), i.close.format("%H:%M")))
            .collect(),
    })
}
