pub mod callbacks;
pub mod commands;
pub mod messages;
pub mod utils;

pub use callbacks::callback_handler;
pub use commands::{command_handler, Command};
pub use messages::message_handler;

use std::error::Error;
use std::time::Duration;

use tokio::time;

use crate::bot_state::BotState;

pub type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Evicts idle booking drafts on a fixed interval.
pub async fn cleanup_drafts_task(state: BotState, every: Duration) {
    let mut interval = time::interval(every);

    loop {
        interval.tick().await;
        state.cleanup_cache().await;
    }
}
