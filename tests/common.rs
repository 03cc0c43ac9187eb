use ordering_backend::{
    api::router::create_router,
    config::Config,
    infra::factory::build_state,
    state::AppState,
};
use axum::Router;
use chrono::{Duration, NaiveDate};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
        };

        let state = Arc::new(build_state(config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Same hours every day of the week, one service interval.
    pub async fn seed_week_hours(&self, restaurant_id: &str, open: &str, close: &str) {
        for day in [
            "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
        ] {
            sqlx::query(
                "INSERT INTO opening_hours (restaurant_id, day, slot_number, is_open, open_time, close_time)
                 VALUES (?, ?, 0, 1, ?, ?)",
            )
            .bind(restaurant_id)
            .bind(day)
            .bind(open)
            .bind(close)
            .execute(&self.pool)
            .await
            .unwrap();
        }
    }

    pub async fn seed_blocked_slot(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
        time: &str,
        service_type: &str,
    ) {
        sqlx::query(
            "INSERT INTO blocked_time_slots (id, restaurant_id, blocked_date, blocked_time, service_type, reason)
             VALUES (?, ?, ?, ?, ?, NULL)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(restaurant_id)
        .bind(date)
        .bind(time)
        .bind(service_type)
        .execute(&self.pool)
        .await
        .unwrap();
    }

    pub async fn seed_special_event(
        &self,
        restaurant_id: &str,
        name: &str,
        date: NaiveDate,
        time_slots_json: &str,
    ) {
        sqlx::query(
            "INSERT INTO special_events (id, restaurant_id, name, event_date, is_active, time_slots_json)
             VALUES (?, ?, ?, ?, 1, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(restaurant_id)
        .bind(name)
        .bind(date)
        .bind(time_slots_json)
        .execute(&self.pool)
        .await
        .unwrap();
    }

    pub async fn seed_order(
        &self,
        restaurant_id: &str,
        order_type: &str,
        date: NaiveDate,
        time: &str,
        payment_status: &str,
    ) {
        let scheduled = format!("{}T{}:00", date, time)
            .parse::<chrono::NaiveDateTime>()
            .unwrap();
        sqlx::query(
            "INSERT INTO orders (id, restaurant_id, order_type, scheduled_for, payment_status, customer_name, created_at)
             VALUES (?, ?, ?, ?, ?, NULL, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(restaurant_id)
        .bind(order_type)
        .bind(scheduled)
        .bind(payment_status)
        .bind(chrono::Utc::now().naive_utc())
        .execute(&self.pool)
        .await
        .unwrap();
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

/// A date safely in the future so lead-time gating never interferes.
#[allow(dead_code)]
pub fn future_date(days: i64) -> NaiveDate {
    chrono::Local::now().date_naive() + Duration::days(days)
}
