use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot_state::BotState;
use crate::handlers::commands::{show_bookings, show_emergency, start_booking};
use crate::handlers::utils::{
    format_crisis_alert, render_step, MAX_CONCERNS_CHARS, MENU_BOOK, MENU_BOOKINGS, MENU_EMERGENCY,
};
use crate::handlers::HandlerResult;
use crate::models::Step;
use crate::screening;
use crate::wizard::Action;

pub async fn message_handler(bot: Bot, msg: Message, state: BotState) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    // commands are handled by command_handler
    if text.starts_with('/') {
        return Ok(());
    }
    let chat_id = msg.chat.id;
    let writing_concerns = state.draft(chat_id).await.step == Step::Details;

    match text {
        MENU_BOOK => start_booking(&bot, chat_id, &state).await?,
        MENU_BOOKINGS => show_bookings(&bot, chat_id, &state).await?,
        MENU_EMERGENCY => show_emergency(&bot, chat_id).await?,
        _ if writing_concerns => {
            if screening::contains_crisis_language(text) {
                log::warn!("⚠️ Crisis language in booking concerns from chat {}", chat_id);
                send_crisis_alert(&bot, chat_id).await?;
            }

            let concerns = text.trim();
            if concerns.chars().count() > MAX_CONCERNS_CHARS {
                log::debug!("✂️ Concerns from chat {} rejected: {} chars", chat_id, concerns.chars().count());
                bot.send_message(
                    chat_id,
                    format!(
                        "That note is too long. Please keep it under {MAX_CONCERNS_CHARS} characters, \
                         your previous note is kept."
                    ),
                )
                .await?;
                return Ok(());
            }

            let dispatched = state.dispatch(chat_id, Action::SetConcerns(concerns.to_string())).await;
            let (reply, keyboard) = render_step(&state, dispatched.transition.draft());
            bot.send_message(chat_id, reply)
                .parse_mode(ParseMode::MarkdownV2)
                .reply_markup(keyboard)
                .await?;
        }
        _ => {
            let reply = screening::companion_reply(text);
            bot.send_message(chat_id, reply.text).await?;

            if reply.is_crisis {
                log::warn!("⚠️ Crisis language in chat {}", chat_id);
                send_crisis_alert(&bot, chat_id).await?;
            }
        }
    }

    Ok(())
}

async fn send_crisis_alert(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, format_crisis_alert())
        .parse_mode(ParseMode::MarkdownV2)
        .await?;
    Ok(())
}
