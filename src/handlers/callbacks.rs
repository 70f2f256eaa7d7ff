use chrono::NaiveDate;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot_state::{BotState, Dispatched};
use crate::handlers::utils::{escape_markdown_v2, guard_notice, render_step, CALLBACK_IGNORE};
use crate::handlers::HandlerResult;
use crate::models::{SlotCatalog, Step};
use crate::wizard::Action;

/// Decodes inline-button data into a wizard action. `None` for disabled buttons and junk.
pub fn action_from_callback(data: &str, slots: &SlotCatalog) -> Option<Action> {
    match data {
        CALLBACK_IGNORE => None,
        "next" => Some(Action::Next),
        "back" => Some(Action::Back),
        "confirm" => Some(Action::Confirm),
        "reset" => Some(Action::Reset),
        "toggle_anonymous" => Some(Action::ToggleAnonymous),
        "toggle_urgent" => Some(Action::ToggleUrgent),
        data if data.starts_with("date_") => data
            .strip_prefix("date_")
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
            .map(Action::SelectDate),
        data if data.starts_with("time_") => data
            .strip_prefix("time_")
            .and_then(|id| slots.find_by_id(id))
            .map(|slot| Action::SelectTime(slot.time.clone())),
        data if data.starts_with("counselor_") => data
            .strip_prefix("counselor_")
            .map(|id| Action::SelectCounselor(id.to_string())),
        data if data.starts_with("type_") => data
            .strip_prefix("type_")
            .and_then(|raw| raw.parse().ok())
            .map(Action::SetSessionType),
        _ => None,
    }
}

pub async fn callback_handler(bot: Bot, q: CallbackQuery, state: BotState) -> HandlerResult {
    let (Some(data), Some(message)) = (q.data.as_deref(), q.message.as_ref()) else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();

    let Some(action) = action_from_callback(data, state.slots()) else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    let confirming = action == Action::Confirm;
    let Dispatched { transition, changed } = state.dispatch(chat_id, action).await;

    if let Some(guard) = transition.guard() {
        bot.answer_callback_query(q.id.clone()).text(guard_notice(guard)).await?;
        return Ok(());
    }
    bot.answer_callback_query(q.id.clone()).await?;

    // Telegram rejects an edit that leaves text and markup as they are
    if !changed {
        return Ok(());
    }

    let draft = transition.into_draft();
    if confirming && draft.step == Step::Confirmed {
        match state.record_booking(chat_id, &draft).await {
            Ok(booking) => log::info!("📅 Booking {} confirmed for chat {}", booking.id, chat_id),
            Err(e) => {
                log::error!("Error recording booking for chat {}: {}", chat_id, e);
                bot.send_message(
                    chat_id,
                    escape_markdown_v2("⚠️ Your booking is confirmed here, but we couldn't save it. Please contact support."),
                )
                .parse_mode(ParseMode::MarkdownV2)
                .await?;
            }
        }
    }

    let (text, keyboard) = render_step(&state, &draft);
    bot.edit_message_text(chat_id, message_id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionType;

    #[test]
    fn decodes_wizard_callbacks() {
        let slots = SlotCatalog::default();

        assert_eq!(
            action_from_callback("date_2025-09-20", &slots),
            Some(Action::SelectDate(NaiveDate::from_ymd_opt(2025, 9, 20).unwrap()))
        );
        assert_eq!(
            action_from_callback("time_2", &slots),
            Some(Action::SelectTime("10:00 AM".to_string()))
        );
        assert_eq!(
            action_from_callback("counselor_2", &slots),
            Some(Action::SelectCounselor("2".to_string()))
        );
        assert_eq!(
            action_from_callback("type_in-person", &slots),
            Some(Action::SetSessionType(SessionType::InPerson))
        );
        assert_eq!(action_from_callback("toggle_urgent", &slots), Some(Action::ToggleUrgent));
        assert_eq!(action_from_callback("reset", &slots), Some(Action::Reset));
    }

    #[test]
    fn ignores_disabled_and_malformed_callbacks() {
        let slots = SlotCatalog::default();

        for data in ["ignore", "date_tomorrow", "date_2025-02-30", "time_99", "type_phone", "select_ai_x", ""] {
            assert_eq!(action_from_callback(data, &slots), None, "{data}");
        }
    }
}
