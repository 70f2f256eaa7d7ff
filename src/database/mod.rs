use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::error::BotError;
use crate::models::ConfirmedBooking;

#[derive(Clone, Debug)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, BotError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(1800))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Database { pool })
    }

    pub async fn init(&self) -> Result<(), BotError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id TEXT PRIMARY KEY,
                chat_id BIGINT NOT NULL,
                booking_date DATE NOT NULL,
                time_label TEXT NOT NULL,
                counselor_id TEXT NOT NULL,
                session_type TEXT NOT NULL,
                is_anonymous BOOLEAN NOT NULL DEFAULT false,
                is_urgent BOOLEAN NOT NULL DEFAULT false,
                concerns TEXT NOT NULL DEFAULT '',
                price INTEGER NOT NULL,
                created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_bookings_chat_id ON bookings(chat_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn insert_booking(&self, booking: &ConfirmedBooking) -> Result<(), BotError> {
        sqlx::query(
            r#"
            INSERT INTO bookings
            (id, chat_id, booking_date, time_label, counselor_id, session_type,
             is_anonymous, is_urgent, concerns, price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&booking.id)
        .bind(booking.chat_id)
        .bind(booking.booking_date)
        .bind(&booking.time_label)
        .bind(&booking.counselor_id)
        .bind(&booking.session_type)
        .bind(booking.is_anonymous)
        .bind(booking.is_urgent)
        .bind(&booking.concerns)
        .bind(booking.price)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn bookings_for_chat(&self, chat_id: i64, limit: i64) -> Result<Vec<ConfirmedBooking>, BotError> {
        let bookings = sqlx::query_as::<_, ConfirmedBooking>(
            "SELECT id, chat_id, booking_date, time_label, counselor_id, session_type, \
             is_anonymous, is_urgent, concerns, price, created_at \
             FROM bookings WHERE chat_id = $1 \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(chat_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }
}
