use crate::domain::models::order::{Order, OrderRecord};
use crate::domain::ports::OrderRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{Row, SqlitePool};

pub struct SqliteOrderRepo {
    pool: SqlitePool,
}

impl SqliteOrderRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepo {
    async fn list_scheduled(
        &self,
        restaurant_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<OrderRecord>, AppError> {
        sqlx::query_as::<_, OrderRecord>(
            "SELECT scheduled_for, order_type, payment_status
             FROM orders
             WHERE restaurant_id = ? AND scheduled_for >= ? AND scheduled_for < ?
               AND payment_status IN ('paid', 'pending')",
        )
        .bind(restaurant_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn reserve(&self, order: &Order, max_allowed: u32) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM orders
             WHERE restaurant_id = ? AND order_type = ? AND scheduled_for = ?
               AND payment_status IN ('paid', 'pending')",
        )
        .bind(&order.restaurant_id)
        .bind(order.order_type)
        .bind(order.scheduled_for)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let current = row.get::<i64, _>("count") as u32;
        if current >= max_allowed {
            return Err(AppError::Conflict(format!(
                "Slot limit of {} {} orders reached for this time",
                max_allowed, order.order_type
            )));
        }

        let created = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (id, restaurant_id, order_type, scheduled_for, payment_status, customer_name, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&order.id)
        .bind(&order.restaurant_id)
        .bind(order.order_type)
        .bind(order.scheduled_for)
        .bind(order.payment_status)
        .bind(&order.customer_name)
        .bind(order.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }
}
