use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::api::handlers::{health, hours, order, slots};
use crate::state::AppState;
use tower_http::{
    classify::ServerErrorsFailureClass,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Public ordering flow
        .route("/api/v1/restaurants/{restaurant_id}/hours/today", get(hours::get_today_hours))
        .route("/api/v1/restaurants/{restaurant_id}/slots", get(slots::get_slots))
        .route("/api/v1/restaurants/{restaurant_id}/orders", post(order::create_order))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
