use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HORIZON_DAYS: u32 = 14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub time: String,
    pub available: bool,
}

impl TimeSlot {
    fn new(id: &str, time: &str, available: bool) -> Self {
        Self {
            id: id.to_string(),
            time: time.to_string(),
            available,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateDate {
    pub date: NaiveDate,
    pub enabled: bool,
}

impl CandidateDate {
    /// Short label for keyboards, e.g. `Sat, Sep 20`.
    pub fn label(&self) -> String {
        self.date.format("%a, %b %-d").to_string()
    }
}

/// Bookable dates and the fixed daily time slots.
#[derive(Debug, Clone, Serialize)]
pub struct SlotCatalog {
    pub horizon_days: u32,
    pub time_slots: Vec<TimeSlot>,
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            time_slots: vec![
                TimeSlot::new("1", "09:00 AM", true),
                TimeSlot::new("2", "10:00 AM", true),
                TimeSlot::new("3", "11:00 AM", false),
                TimeSlot::new("4", "02:00 PM", true),
                TimeSlot::new("5", "03:00 PM", true),
                TimeSlot::new("6", "04:00 PM", true),
                TimeSlot::new("7", "05:00 PM", false),
            ],
        }
    }
}

impl SlotCatalog {
    pub fn with_horizon(horizon_days: u32) -> Self {
        Self {
            horizon_days,
            ..Self::default()
        }
    }

    /// The `horizon_days` days following `today`. Sundays are listed but disabled.
    pub fn candidate_dates(&self, today: NaiveDate) -> Vec<CandidateDate> {
        (1..=i64::from(self.horizon_days))
            .filter_map(|offset| today.checked_add_signed(Duration::days(offset)))
            .map(|date| CandidateDate {
                date,
                enabled: date.weekday() != Weekday::Sun,
            })
            .collect()
    }

    pub fn is_selectable_date(&self, today: NaiveDate, date: NaiveDate) -> bool {
        let offset = (date - today).num_days();
        offset >= 1 && offset <= i64::from(self.horizon_days) && date.weekday() != Weekday::Sun
    }

    pub fn find_by_id(&self, id: &str) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|slot| slot.id == id)
    }

    pub fn find_by_time(&self, time: &str) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|slot| slot.time == time)
    }

    pub fn is_available(&self, time: &str) -> bool {
        self.find_by_time(time).is_some_and(|slot| slot.available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn only_sundays_are_disabled() {
        let catalog = SlotCatalog::default();
        let dates = catalog.candidate_dates(day(2025, 9, 15));

        assert_eq!(dates.len(), 14);
        assert_eq!(dates[0].date, day(2025, 9, 16));
        assert_eq!(dates[13].date, day(2025, 9, 29));
        for candidate in &dates {
            assert_eq!(candidate.enabled, candidate.date.weekday() != Weekday::Sun);
        }
        assert_eq!(dates.iter().filter(|c| !c.enabled).count(), 2);
    }

    #[test]
    fn today_and_days_past_the_horizon_are_not_selectable() {
        let catalog = SlotCatalog::default();
        let today = day(2025, 9, 15);

        assert!(!catalog.is_selectable_date(today, today));
        assert!(catalog.is_selectable_date(today, day(2025, 9, 16)));
        assert!(catalog.is_selectable_date(today, day(2025, 9, 29)));
        assert!(!catalog.is_selectable_date(today, day(2025, 9, 30)));
        assert!(!catalog.is_selectable_date(today, day(2025, 9, 21)));
    }

    #[test]
    fn booked_slots_are_unavailable() {
        let catalog = SlotCatalog::default();
        assert!(catalog.is_available("10:00 AM"));
        assert!(!catalog.is_available("11:00 AM"));
        assert!(!catalog.is_available("05:00 PM"));
        assert!(!catalog.is_available("11:30 PM"));
        assert_eq!(catalog.find_by_id("4").map(|s| s.time.as_str()), Some("02:00 PM"));
    }

    #[test]
    fn label_is_short_weekday_month_day() {
        let candidate = CandidateDate { date: day(2025, 9, 20), enabled: true };
        assert_eq!(candidate.label(), "Sat, Sep 20");
    }

    #[test]
    fn horizon_is_configurable() {
        let catalog = SlotCatalog::with_horizon(3);
        assert_eq!(catalog.candidate_dates(day(2025, 9, 15)).len(), 3);
    }
}
