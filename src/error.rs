use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value {value:?} for {key}")]
    Config { key: String, value: String },

    #[error("Booking is incomplete")]
    IncompleteBooking,
}
