use teloxide::{prelude::*, utils::command::BotCommands};

mod bot_state;
mod config;
mod database;
mod error;
mod handlers;
mod models;
mod screening;
mod wizard;

use crate::bot_state::BotState;
use crate::config::Config;
use crate::database::Database;
use crate::handlers::{callback_handler, command_handler, message_handler, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting Sukoon booking bot...");

    let config = Config::from_env()?;

    let db = match config.database_url.as_deref() {
        Some(database_url) => {
            let db = Database::new(database_url).await?;
            db.init().await?;
            log::info!("✅ Database initialized");
            Some(db)
        }
        None => {
            log::warn!("DATABASE_URL is not set, confirmed bookings will only be logged");
            None
        }
    };

    let cleanup_interval = config.cleanup_interval;
    let state = BotState::new(config, db);

    let state_clone = state.clone();
    tokio::spawn(async move {
        handlers::cleanup_drafts_task(state_clone, cleanup_interval).await;
    });

    let bot = Bot::from_env();
    bot.set_my_commands(Command::bot_commands()).await?;

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
