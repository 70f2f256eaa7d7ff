use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup};

use crate::bot_state::BotState;
use crate::models::helpline::URGENT_HELPLINE;
use crate::models::{BookingDraft, ConfirmedBooking, CounselorCatalog, SessionType, Step, EMERGENCY_STEPS, HELPLINES};
use crate::screening;
use crate::wizard::{BookingSummary, Guard};

pub const MENU_BOOK: &str = "📅 Book a session";
pub const MENU_BOOKINGS: &str = "📋 My bookings";
pub const MENU_EMERGENCY: &str = "🆘 Emergency help";

pub const CALLBACK_IGNORE: &str = "ignore";

/// Longest concerns note accepted at the details step.
pub const MAX_CONCERNS_CHARS: usize = 1000;
/// Telegram's limit for a message text.
pub const MESSAGE_TEXT_LIMIT: usize = 4096;

/// Escapes text for MarkdownV2.
pub fn escape_markdown_v2(text: &str) -> String {
    let specials = ['\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!'];
    let mut out = String::with_capacity(text.len() * 2);

    for ch in text.chars() {
        if specials.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with `…`.
pub fn clip(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}

fn bold(text: &str) -> String {
    format!("*{}*", escape_markdown_v2(text))
}

/// Reply keyboard under the input field.
pub fn main_menu_keyboard() -> ReplyMarkup {
    ReplyMarkup::Keyboard(
        KeyboardMarkup::new(vec![
            vec![KeyboardButton::new(MENU_BOOK)],
            vec![KeyboardButton::new(MENU_BOOKINGS), KeyboardButton::new(MENU_EMERGENCY)],
        ])
        .resize_keyboard(),
    )
}

fn ignore_button(label: String) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, CALLBACK_IGNORE)
}

fn checkbox(checked: bool, label: &str) -> String {
    if checked {
        format!("☑️ {label}")
    } else {
        format!("⬜ {label}")
    }
}

pub fn make_datetime_keyboard(state: &BotState, draft: &BookingDraft) -> InlineKeyboardMarkup {
    let mut keyboard: Vec<Vec<InlineKeyboardButton>> = Vec::new();

    let date_buttons: Vec<InlineKeyboardButton> = state
        .slots()
        .candidate_dates(state.today())
        .into_iter()
        .map(|candidate| {
            if !candidate.enabled {
                ignore_button(format!("✖ {}", candidate.label()))
            } else if draft.selected_date == Some(candidate.date) {
                InlineKeyboardButton::callback(format!("✅ {}", candidate.label()), format!("date_{}", candidate.date))
            } else {
                InlineKeyboardButton::callback(candidate.label(), format!("date_{}", candidate.date))
            }
        })
        .collect();
    keyboard.extend(date_buttons.chunks(3).map(|row| row.to_vec()));

    if draft.selected_date.is_some() {
        let time_buttons: Vec<InlineKeyboardButton> = state
            .slots()
            .time_slots
            .iter()
            .map(|slot| {
                if !slot.available {
                    ignore_button(format!("{} (Booked)", slot.time))
                } else if draft.selected_time.as_deref() == Some(slot.time.as_str()) {
                    InlineKeyboardButton::callback(format!("✅ {}", slot.time), format!("time_{}", slot.id))
                } else {
                    InlineKeyboardButton::callback(slot.time.clone(), format!("time_{}", slot.id))
                }
            })
            .collect();
        keyboard.extend(time_buttons.chunks(3).map(|row| row.to_vec()));
    }

    if draft.has_date_and_time() {
        keyboard.push(vec![InlineKeyboardButton::callback("Next: Choose Counselor ▶️", "next")]);
    }

    InlineKeyboardMarkup::new(keyboard)
}

pub fn make_counselor_keyboard(counselors: &CounselorCatalog) -> InlineKeyboardMarkup {
    let mut keyboard: Vec<Vec<InlineKeyboardButton>> = counselors
        .iter()
        .map(|counselor| {
            vec![InlineKeyboardButton::callback(
                format!("👤 {} ⭐ {}", counselor.name, counselor.rating),
                format!("counselor_{}", counselor.id),
            )]
        })
        .collect();

    keyboard.push(vec![InlineKeyboardButton::callback("◀️ Back", "back")]);
    InlineKeyboardMarkup::new(keyboard)
}

pub fn make_details_keyboard(draft: &BookingDraft) -> InlineKeyboardMarkup {
    let session_row: Vec<InlineKeyboardButton> = SessionType::ALL
        .iter()
        .map(|session_type| {
            let label = format!("{} (₹{})", session_type.label(), session_type.price());
            let label = if draft.session_type == *session_type {
                format!("✅ {label}")
            } else {
                label
            };
            InlineKeyboardButton::callback(label, format!("type_{}", session_type.as_str()))
        })
        .collect();

    InlineKeyboardMarkup::new(vec![
        session_row,
        vec![InlineKeyboardButton::callback(
            checkbox(draft.is_anonymous, "Book anonymously"),
            "toggle_anonymous",
        )],
        vec![InlineKeyboardButton::callback(
            checkbox(draft.is_urgent, "This is urgent"),
            "toggle_urgent",
        )],
        vec![
            InlineKeyboardButton::callback("◀️ Back", "back"),
            InlineKeyboardButton::callback("Review Booking ▶️", "next"),
        ],
    ])
}

pub fn make_review_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("◀️ Back", "back"),
        InlineKeyboardButton::callback("✅ Confirm Booking", "confirm"),
    ]])
}

pub fn make_confirmed_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "📅 Book Another Session",
        "reset",
    )]])
}

fn step_header(step: Step) -> String {
    match step {
        Step::Confirmed => format!("✅ {}", bold(step.title())),
        other => format!("📅 {}", bold(&format!("Step {} of 4: {}", other.number(), other.title()))),
    }
}

/// Text and keyboard for the step the draft is at, in MarkdownV2.
pub fn render_step(state: &BotState, draft: &BookingDraft) -> (String, InlineKeyboardMarkup) {
    let header = step_header(draft.step);

    match draft.step {
        Step::DateTime => {
            let mut text = format!("{header}\n{}", escape_markdown_v2("Select your preferred date and time slot."));
            if let Some(date) = draft.selected_date {
                text.push_str(&format!("\n\n{} {}", bold("Date:"), escape_markdown_v2(&date.to_string())));
                match &draft.selected_time {
                    Some(time) => text.push_str(&format!("\n{} {}", bold("Time:"), escape_markdown_v2(time))),
                    None => text.push_str(&format!("\n{}", escape_markdown_v2("Now pick a time."))),
                }
            }
            (text, make_datetime_keyboard(state, draft))
        }
        Step::Counselor => {
            let mut text = format!("{header}\n{}", escape_markdown_v2("Choose a counselor that matches your needs."));
            for counselor in state.counselors().iter() {
                text.push_str(&format!(
                    "\n\n{}\n{}\n{}\n{}",
                    bold(&counselor.name),
                    escape_markdown_v2(&format!("⭐ {} • {}", counselor.rating, counselor.experience)),
                    escape_markdown_v2(&counselor.bio),
                    escape_markdown_v2(&format!(
                        "{} | {}",
                        counselor.specialties.join(", "),
                        counselor.languages.join(", ")
                    )),
                ));
            }
            (text, make_counselor_keyboard(state.counselors()))
        }
        Step::Details => {
            let mut text = format!(
                "{header}\n{}\n\n{} {}\n{} {}",
                escape_markdown_v2("Provide session details and preferences."),
                bold("Session type:"),
                escape_markdown_v2(&format!("{} (₹{})", draft.session_type.label(), draft.price())),
                bold("What would you like to discuss?"),
                if draft.concerns.trim().is_empty() {
                    escape_markdown_v2("Send a message to share what's on your mind (optional).")
                } else {
                    escape_markdown_v2(&clip(draft.concerns.trim(), MAX_CONCERNS_CHARS))
                },
            );
            if draft.is_urgent {
                text.push_str(&format!(
                    "\n\n⚠️ {}",
                    escape_markdown_v2(&format!(
                        "For immediate crisis support, please call our 24/7 helpline at {URGENT_HELPLINE}."
                    ))
                ));
            }
            (text, make_details_keyboard(draft))
        }
        Step::Review => {
            let summary = BookingSummary::from_draft(draft, state.counselors())
                .map(|mut summary| {
                    summary.concerns = summary.concerns.map(|concerns| clip(&concerns, MAX_CONCERNS_CHARS));
                    escape_markdown_v2(&summary.to_string())
                })
                .unwrap_or_else(|| escape_markdown_v2("Some selections are missing, go back to complete them."));
            let text = format!(
                "{header}\n{}\n\n{}\n{summary}\n\n{}\n{}",
                escape_markdown_v2("Review and confirm your booking."),
                bold("Booking Summary"),
                bold("What's Next:"),
                escape_markdown_v2(
                    "• You'll receive a confirmation with all session details.\n\
                     • A reminder will be sent 24 hours before your appointment.\n\
                     • You can reschedule or cancel up to 4 hours before the session."
                ),
            );
            (text, make_review_keyboard())
        }
        Step::Confirmed => {
            let counselor = draft
                .selected_counselor_id
                .as_deref()
                .and_then(|id| state.counselors().find_by_id(id))
                .map(|c| c.name.as_str())
                .unwrap_or("your counselor");
            let text = format!(
                "{header}\n{}",
                escape_markdown_v2(&format!("Your session with {counselor} is confirmed. Take care until then!")),
            );
            (text, make_confirmed_keyboard())
        }
    }
}

/// Short notice shown when a tap does not change the draft.
pub fn guard_notice(guard: Guard) -> &'static str {
    match guard {
        Guard::WrongStep => "That option is no longer available.",
        Guard::DateNotSelectable => "That date can't be booked.",
        Guard::DateRequired => "Pick a date first.",
        Guard::SlotUnavailable => "That time slot is already booked.",
        Guard::DateAndTimeRequired => "Choose both a date and a time first.",
        Guard::UnknownCounselor => "That counselor is not available.",
    }
}

pub fn format_emergency() -> String {
    let mut text = format!(
        "🆘 {}\n{}",
        bold("Emergency Support"),
        escape_markdown_v2("You're not alone. Help is available 24/7. Reach out when you need support.")
    );

    for step in EMERGENCY_STEPS {
        text.push_str(&format!(
            "\n\n{}\n{}\n➡️ {}",
            bold(step.title),
            escape_markdown_v2(step.description),
            escape_markdown_v2(step.action)
        ));
    }

    text.push_str(&format!("\n\n📞 {}", bold("Helplines")));
    for helpline in HELPLINES {
        text.push_str(&format!(
            "\n\n{}\n`{}`\n{}",
            bold(helpline.name),
            helpline.number,
            escape_markdown_v2(&format!(
                "{} ({}, {})",
                helpline.description,
                helpline.availability,
                helpline.languages.join(", ")
            )),
        ));
    }
    text
}

pub fn format_crisis_alert() -> String {
    let mut text = format!("⚠️ {}\n{}", bold("Immediate Support Recommended"), escape_markdown_v2(&screening::crisis_message()));
    for helpline in crate::models::helpline::crisis_helplines() {
        text.push_str(&format!("\n📞 {} `{}`", escape_markdown_v2(helpline.name), helpline.number));
    }
    text
}

pub fn format_bookings(bookings: &[ConfirmedBooking], counselors: &CounselorCatalog) -> String {
    if bookings.is_empty() {
        return format!(
            "📋 {}\n\n{}",
            bold("Your bookings"),
            escape_markdown_v2("You have no confirmed bookings yet.")
        );
    }

    let mut text = format!("📋 {}", bold("Your bookings"));
    for booking in bookings {
        let counselor = counselors
            .find_by_id(&booking.counselor_id)
            .map(|c| c.name.as_str())
            .unwrap_or("Counselor");
        text.push_str(&format!(
            "\n\n{}\n{}",
            bold(&format!("{} {}", booking.booking_date, booking.time_label)),
            escape_markdown_v2(&format!("{counselor} • {} • ₹{}", booking.session_type, booking.price)),
        ));
    }
    text
}
