use crate::domain::models::blocked::BlockedSlot;
use crate::domain::ports::BlockedSlotRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteBlockedSlotRepo {
    pool: SqlitePool,
}

impl SqliteBlockedSlotRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlockedSlotRepository for SqliteBlockedSlotRepo {
    async fn list_for_date(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<BlockedSlot>, AppError> {
        sqlx::query_as::<_, BlockedSlot>(
            "SELECT * FROM blocked_time_slots
             WHERE restaurant_id = ? AND blocked_date = ?
             ORDER BY blocked_time",
        )
        .bind(restaurant_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
