use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Length of every counselling session, in minutes.
pub const SESSION_MINUTES: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionType {
    #[default]
    Video,
    Audio,
    InPerson,
}

impl SessionType {
    pub const ALL: [SessionType; 3] = [SessionType::Video, SessionType::Audio, SessionType::InPerson];

    /// Price in rupees. Display only, nothing is charged.
    pub fn price(self) -> u32 {
        match self {
            SessionType::Video => 1500,
            SessionType::Audio => 1200,
            SessionType::InPerson => 2000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionType::Video => "video",
            SessionType::Audio => "audio",
            SessionType::InPerson => "in-person",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionType::Video => "Video Call",
            SessionType::Audio => "Voice Call",
            SessionType::InPerson => "In-Person",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(SessionType::Video),
            "audio" => Ok(SessionType::Audio),
            "in-person" => Ok(SessionType::InPerson),
            other => Err(format!("unknown session type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Step {
    #[default]
    DateTime,
    Counselor,
    Details,
    Review,
    Confirmed,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::DateTime => 1,
            Step::Counselor => 2,
            Step::Details => 3,
            Step::Review => 4,
            Step::Confirmed => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::DateTime => "Choose Date & Time",
            Step::Counselor => "Select Counselor",
            Step::Details => "Session Details",
            Step::Review => "Confirmation",
            Step::Confirmed => "Booking Confirmed!",
        }
    }
}

/// In-progress booking owned by one chat.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingDraft {
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<String>,
    pub selected_counselor_id: Option<String>,
    pub session_type: SessionType,
    pub is_anonymous: bool,
    pub concerns: String,
    pub is_urgent: bool,
    pub step: Step,
}

impl BookingDraft {
    pub fn has_date_and_time(&self) -> bool {
        self.selected_date.is_some() && self.selected_time.is_some()
    }

    pub fn price(&self) -> u32 {
        self.session_type.price()
    }
}

/// A confirmed booking as recorded by the store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConfirmedBooking {
    pub id: String,
    pub chat_id: i64,
    pub booking_date: NaiveDate,
    pub time_label: String,
    pub counselor_id: String,
    pub session_type: String,
    pub is_anonymous: bool,
    pub is_urgent: bool,
    pub concerns: String,
    pub price: i32,
    pub created_at: DateTime<Utc>,
}

impl ConfirmedBooking {
    /// Builds the record for a draft that reached review. `None` while a selection is missing.
    pub fn from_draft(id: String, chat_id: i64, draft: &BookingDraft, created_at: DateTime<Utc>) -> Option<Self> {
        Some(Self {
            id,
            chat_id,
            booking_date: draft.selected_date?,
            time_label: draft.selected_time.clone()?,
            counselor_id: draft.selected_counselor_id.clone()?,
            session_type: draft.session_type.as_str().to_string(),
            is_anonymous: draft.is_anonymous,
            is_urgent: draft.is_urgent,
            concerns: draft.concerns.clone(),
            price: draft.price() as i32,
            created_at,
        })
    }
}
