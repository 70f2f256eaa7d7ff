use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;

use crate::bot_state::BotState;
use crate::handlers::utils::{escape_markdown_v2, format_bookings, format_emergency, main_menu_keyboard, render_step};
use crate::handlers::HandlerResult;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "start the bot")]
    Start,
    #[command(description = "show help")]
    Help,
    #[command(description = "book a counselling session")]
    Book,
    #[command(description = "list your confirmed bookings")]
    MyBookings,
    #[command(description = "emergency helplines")]
    Emergency,
}

pub async fn command_handler(bot: Bot, msg: Message, cmd: Command, state: BotState) -> HandlerResult {
    match cmd {
        Command::Start => handle_start(bot, msg).await?,
        Command::Help => handle_help(bot, msg).await?,
        Command::Book => start_booking(&bot, msg.chat.id, &state).await?,
        Command::MyBookings => show_bookings(&bot, msg.chat.id, &state).await?,
        Command::Emergency => show_emergency(&bot, msg.chat.id).await?,
    }
    Ok(())
}

async fn handle_start(bot: Bot, msg: Message) -> HandlerResult {
    let start_text = format!(
        "👋 *{}*\n\n{}\n\n{}",
        escape_markdown_v2("Welcome to Sukoon!"),
        escape_markdown_v2(
            "Book a confidential session with a certified counselor, or just talk to me about \
             what's on your mind."
        ),
        escape_markdown_v2(
            "If you are in danger or thinking about harming yourself, tap \"🆘 Emergency help\" \
             or use /emergency right away."
        ),
    );

    bot.send_message(msg.chat.id, start_text)
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(main_menu_keyboard())
        .await?;

    Ok(())
}

async fn handle_help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

pub async fn start_booking(bot: &Bot, chat_id: ChatId, state: &BotState) -> HandlerResult {
    let draft = state.start_booking(chat_id).await;
    let (text, keyboard) = render_step(state, &draft);

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

pub async fn show_bookings(bot: &Bot, chat_id: ChatId, state: &BotState) -> HandlerResult {
    if !state.has_store() {
        bot.send_message(chat_id, "Booking history is not available right now.")
            .await?;
        return Ok(());
    }

    let text = match state.bookings(chat_id).await {
        Ok(bookings) => format_bookings(&bookings, state.counselors()),
        Err(e) => {
            log::error!("Error loading bookings for chat {}: {}", chat_id, e);
            escape_markdown_v2("❌ Could not load your bookings, please try again later.")
        }
    };

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .await?;

    Ok(())
}

pub async fn show_emergency(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, format_emergency())
        .parse_mode(ParseMode::MarkdownV2)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("/book", "sukoon_bot").ok(), Some(Command::Book));
        assert_eq!(Command::parse("/mybookings", "sukoon_bot").ok(), Some(Command::MyBookings));
        assert_eq!(Command::parse("/emergency", "sukoon_bot").ok(), Some(Command::Emergency));
        assert!(Command::parse("/persona", "sukoon_bot").is_err());
    }
}
