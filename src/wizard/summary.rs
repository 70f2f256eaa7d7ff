use chrono::NaiveDate;
use std::fmt;

use crate::models::{BookingDraft, CounselorCatalog, SessionType, SESSION_MINUTES};

/// Review-step view of a draft. Derived, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub date: NaiveDate,
    pub time: String,
    pub counselor_name: String,
    pub session_type: SessionType,
    pub duration_minutes: u32,
    pub total: u32,
    pub is_anonymous: bool,
    pub is_urgent: bool,
    pub concerns: Option<String>,
}

impl BookingSummary {
    /// `None` until date, time and a known counselor are all chosen.
    pub fn from_draft(draft: &BookingDraft, counselors: &CounselorCatalog) -> Option<Self> {
        let counselor = counselors.find_by_id(draft.selected_counselor_id.as_deref()?)?;
        let concerns = draft.concerns.trim();

        Some(Self {
            date: draft.selected_date?,
            time: draft.selected_time.clone()?,
            counselor_name: counselor.name.clone(),
            session_type: draft.session_type,
            duration_minutes: SESSION_MINUTES,
            total: draft.session_type.price(),
            is_anonymous: draft.is_anonymous,
            is_urgent: draft.is_urgent,
            concerns: (!concerns.is_empty()).then(|| concerns.to_string()),
        })
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

impl fmt::Display for BookingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Date: {}", self.date.format("%Y-%m-%d"))?;
        writeln!(f, "Time: {}", self.time)?;
        writeln!(f, "Counselor: {}", self.counselor_name)?;
        writeln!(f, "Session Type: {}", self.session_type.label())?;
        writeln!(f, "Duration: {} minutes", self.duration_minutes)?;
        writeln!(f, "Anonymous: {}", yes_no(self.is_anonymous))?;
        writeln!(f, "Urgent: {}", yes_no(self.is_urgent))?;
        if let Some(concerns) = &self.concerns {
            writeln!(f, "Concerns: {concerns}")?;
        }
        write!(f, "Total Cost: ₹{}", self.total)
    }
}
