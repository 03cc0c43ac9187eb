use crate::domain::models::special_event::SpecialEvent;
use crate::domain::ports::SpecialEventRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteSpecialEventRepo {
    pool: SqlitePool,
}

impl SqliteSpecialEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpecialEventRepository for SqliteSpecialEventRepo {
    async fn find_active_by_date(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
    ) -> Result<Option<SpecialEvent>, AppError> {
        sqlx::query_as::<_, SpecialEvent>(
            "SELECT * FROM special_events
             WHERE restaurant_id = ? AND event_date = ? AND is_active = 1",
        )
        .bind(restaurant_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
