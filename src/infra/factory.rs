use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::blocked::BlockedSlotRegistry;
use crate::domain::services::capacity::OrderCapacityTracker;
use crate::domain::services::hours::OpeningHoursResolver;
use crate::domain::services::planner::SlotPlanner;
use crate::infra::repositories::{
    sqlite_blocked_slot_repo::SqliteBlockedSlotRepo, sqlite_event_repo::SqliteSpecialEventRepo,
    sqlite_hours_repo::SqliteOpeningHoursRepo, sqlite_order_repo::SqliteOrderRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    build_state(config.clone(), pool)
}

pub fn build_state(config: Config, pool: SqlitePool) -> AppState {
    let hours_repo = Arc::new(SqliteOpeningHoursRepo::new(pool.clone()));
    let order_repo = Arc::new(SqliteOrderRepo::new(pool.clone()));
    let blocked_repo = Arc::new(SqliteBlockedSlotRepo::new(pool.clone()));
    let event_repo = Arc::new(SqliteSpecialEventRepo::new(pool));

    let hours = OpeningHoursResolver::new(hours_repo);
    let planner = Arc::new(SlotPlanner::new(
        hours.clone(),
        OrderCapacityTracker::new(order_repo.clone()),
        BlockedSlotRegistry::new(blocked_repo),
    ));

    AppState {
        config,
        hours,
        order_repo,
        event_repo,
        planner,
    }
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
