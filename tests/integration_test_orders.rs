mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{future_date, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn place_order(app: &TestApp, payload: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/restaurants/r1/orders")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    ).await.unwrap()
}

#[tokio::test]
async fn second_delivery_order_for_same_slot_conflicts() {
    let app = TestApp::new().await;
    let date = future_date(2).to_string();
    let payload = json!({"order_type": "delivery", "date": date, "time": "12:30"});

    let first = place_order(&app, payload.clone()).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = place_order(&app, payload).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn pickup_allows_two_orders_then_conflicts() {
    let app = TestApp::new().await;
    let date = future_date(2).to_string();
    let payload = json!({"order_type": "pickup", "date": date, "time": "18:00"});

    assert_eq!(place_order(&app, payload.clone()).await.status(), StatusCode::OK);
    assert_eq!(place_order(&app, payload.clone()).await.status(), StatusCode::OK);
    assert_eq!(place_order(&app, payload).await.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn order_types_do_not_share_capacity() {
    let app = TestApp::new().await;
    let date = future_date(2).to_string();

    let delivery = json!({"order_type": "delivery", "date": date, "time": "19:15"});
    let pickup = json!({"order_type": "pickup", "date": date, "time": "19:15"});

    assert_eq!(place_order(&app, delivery).await.status(), StatusCode::OK);
    assert_eq!(place_order(&app, pickup).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn event_max_orders_raises_the_reservation_limit() {
    let app = TestApp::new().await;
    let date = future_date(5);
    app.seed_special_event(
        "r1",
        "NYE",
        date,
        r#"[{"time":"20:00","max_orders":3}]"#,
    ).await;

    let payload = json!({"order_type": "delivery", "date": date.to_string(), "time": "20:00"});
    assert_eq!(place_order(&app, payload.clone()).await.status(), StatusCode::OK);
    assert_eq!(place_order(&app, payload.clone()).await.status(), StatusCode::OK);
    assert_eq!(place_order(&app, payload.clone()).await.status(), StatusCode::OK);
    assert_eq!(place_order(&app, payload).await.status(), StatusCode::CONFLICT);

    // A slot the event does not cover keeps the default limit.
    let uncovered = json!({"order_type": "delivery", "date": date.to_string(), "time": "20:30"});
    assert_eq!(place_order(&app, uncovered.clone()).await.status(), StatusCode::OK);
    assert_eq!(place_order(&app, uncovered).await.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_times_are_rejected() {
    let app = TestApp::new().await;
    let date = future_date(2).to_string();

    let bad_time = json!({"order_type": "pickup", "date": date, "time": "25:99"});
    assert_eq!(place_order(&app, bad_time).await.status(), StatusCode::BAD_REQUEST);

    let off_grid = json!({"order_type": "pickup", "date": date, "time": "12:10"});
    assert_eq!(place_order(&app, off_grid).await.status(), StatusCode::BAD_REQUEST);

    let bad_date = json!({"order_type": "pickup", "date": "not-a-date", "time": "12:15"});
    assert_eq!(place_order(&app, bad_date).await.status(), StatusCode::BAD_REQUEST);
}
