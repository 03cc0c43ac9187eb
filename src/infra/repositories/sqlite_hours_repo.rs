use crate::domain::models::hours::DayHours;
use crate::domain::ports::OpeningHoursRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteOpeningHoursRepo {
    pool: SqlitePool,
}

impl SqliteOpeningHoursRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OpeningHoursRepository for SqliteOpeningHoursRepo {
    async fn weekly_hours(&self, restaurant_id: &str) -> Result<Vec<DayHours>, AppError> {
        sqlx::query_as::<_, DayHours>(
            "SELECT day, slot_number, is_open, open_time, close_time
             FROM opening_hours WHERE restaurant_id = ?
             ORDER BY day, slot_number",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
