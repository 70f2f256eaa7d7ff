//! Booking wizard: a pure reducer over [`BookingDraft`].
//!
//! Every action either applies (guard holds) or is ignored and the draft is
//! handed back untouched. Nothing here performs I/O; confirming a booking is
//! only a step change, recording it is up to the caller.

pub mod summary;

use chrono::NaiveDate;
use crate::models::{BookingDraft, CounselorCatalog, SessionType, SlotCatalog, Step};

pub use summary::BookingSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectDate(NaiveDate),
    /// Time-of-day label, e.g. `10:00 AM`.
    SelectTime(String),
    SelectCounselor(String),
    SetSessionType(SessionType),
    ToggleAnonymous,
    ToggleUrgent,
    SetConcerns(String),
    Next,
    Back,
    Confirm,
    Reset,
}

/// Why an action left the draft unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    WrongStep,
    DateNotSelectable,
    DateRequired,
    SlotUnavailable,
    DateAndTimeRequired,
    UnknownCounselor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Applied(BookingDraft),
    Ignored { draft: BookingDraft, guard: Guard },
}

impl Transition {
    pub fn draft(&self) -> &BookingDraft {
        match self {
            Transition::Applied(draft) | Transition::Ignored { draft, .. } => draft,
        }
    }

    pub fn into_draft(self) -> BookingDraft {
        match self {
            Transition::Applied(draft) | Transition::Ignored { draft, .. } => draft,
        }
    }

    pub fn guard(&self) -> Option<Guard> {
        match self {
            Transition::Applied(_) => None,
            Transition::Ignored { guard, .. } => Some(*guard),
        }
    }
}

/// Catalog snapshots plus the calendar day the candidate dates are counted from.
#[derive(Debug, Clone, Copy)]
pub struct BookingWizard<'a> {
    slots: &'a SlotCatalog,
    counselors: &'a CounselorCatalog,
    today: NaiveDate,
}

impl<'a> BookingWizard<'a> {
    pub fn new(slots: &'a SlotCatalog, counselors: &'a CounselorCatalog, today: NaiveDate) -> Self {
        Self { slots, counselors, today }
    }

    pub fn reduce(&self, draft: BookingDraft, action: Action) -> Transition {
        match self.check(&draft, &action) {
            Some(guard) => Transition::Ignored { draft, guard },
            None => Transition::Applied(apply(draft, action)),
        }
    }

    fn check(&self, draft: &BookingDraft, action: &Action) -> Option<Guard> {
        let allowed = match (draft.step, action) {
            (Step::DateTime, Action::SelectDate(date)) => {
                if !self.slots.is_selectable_date(self.today, *date) {
                    return Some(Guard::DateNotSelectable);
                }
                true
            }
            (Step::DateTime, Action::SelectTime(time)) => {
                if draft.selected_date.is_none() {
                    return Some(Guard::DateRequired);
                }
                if !self.slots.is_available(time) {
                    return Some(Guard::SlotUnavailable);
                }
                true
            }
            (Step::DateTime, Action::Next) => {
                if !draft.has_date_and_time() {
                    return Some(Guard::DateAndTimeRequired);
                }
                true
            }
            (Step::Counselor, Action::SelectCounselor(id)) => {
                if !self.counselors.contains(id) {
                    return Some(Guard::UnknownCounselor);
                }
                true
            }
            (Step::Counselor, Action::Back) => true,
            (
                Step::Details,
                Action::SetSessionType(_)
                | Action::ToggleAnonymous
                | Action::ToggleUrgent
                | Action::SetConcerns(_)
                | Action::Back
                | Action::Next,
            ) => true,
            (Step::Review, Action::Back | Action::Confirm) => true,
            (Step::Confirmed, Action::Reset) => true,
            _ => false,
        };

        if allowed {
            None
        } else {
            Some(Guard::WrongStep)
        }
    }
}

/// Applies an action whose guard already holds.
fn apply(mut draft: BookingDraft, action: Action) -> BookingDraft {
    match action {
        Action::SelectDate(date) => draft.selected_date = Some(date),
        Action::SelectTime(time) => draft.selected_time = Some(time),
        Action::SelectCounselor(id) => {
            draft.selected_counselor_id = Some(id);
            draft.step = Step::Details;
        }
        Action::SetSessionType(session_type) => draft.session_type = session_type,
        Action::ToggleAnonymous => draft.is_anonymous = !draft.is_anonymous,
        Action::ToggleUrgent => draft.is_urgent = !draft.is_urgent,
        Action::SetConcerns(text) => draft.concerns = text,
        Action::Next => {
            draft.step = match draft.step {
                Step::DateTime => Step::Counselor,
                Step::Details => Step::Review,
                other => other,
            }
        }
        Action::Back => {
            draft.step = match draft.step {
                Step::Counselor | Step::Details => Step::DateTime,
                Step::Review => Step::Details,
                other => other,
            }
        }
        Action::Confirm => draft.step = Step::Confirmed,
        Action::Reset => return BookingDraft::default(),
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixture {
        slots: SlotCatalog,
        counselors: CounselorCatalog,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                slots: SlotCatalog::default(),
                counselors: CounselorCatalog::default(),
            }
        }

        // Monday, so 2025-09-20 is an enabled Saturday and 2025-09-21 a Sunday.
        fn wizard(&self) -> BookingWizard<'_> {
            BookingWizard::new(&self.slots, &self.counselors, day(2025, 9, 15))
        }
    }

    fn run(wizard: &BookingWizard<'_>, actions: Vec<Action>) -> BookingDraft {
        actions
            .into_iter()
            .fold(BookingDraft::default(), |draft, action| wizard.reduce(draft, action).into_draft())
    }

    #[test]
    fn full_booking_scenario() {
        let fixture = Fixture::new();
        let wizard = fixture.wizard();

        let draft = run(
            &wizard,
            vec![
                Action::SelectDate(day(2025, 9, 20)),
                Action::SelectTime("10:00 AM".to_string()),
                Action::Next,
            ],
        );
        assert_eq!(draft.step.number(), 2);

        let draft = wizard.reduce(draft, Action::SelectCounselor("2".to_string())).into_draft();
        assert_eq!(draft.step.number(), 3);
        assert_eq!(draft.selected_counselor_id.as_deref(), Some("2"));

        let draft = wizard.reduce(draft, Action::SetSessionType(SessionType::Audio)).into_draft();
        let draft = wizard.reduce(draft, Action::Next).into_draft();
        assert_eq!(draft.step.number(), 4);
        let summary = BookingSummary::from_draft(&draft, &fixture.counselors).unwrap();
        assert_eq!(summary.total, 1200);

        let draft = wizard.reduce(draft, Action::Confirm).into_draft();
        assert_eq!(draft.step, Step::Confirmed);
        assert_eq!(draft.step.number(), 5);
    }

    #[test]
    fn next_with_only_a_date_stays_on_first_step() {
        let fixture = Fixture::new();
        let wizard = fixture.wizard();
        let draft = run(&wizard, vec![Action::SelectDate(day(2025, 9, 20))]);

        let transition = wizard.reduce(draft.clone(), Action::Next);
        assert_eq!(transition.guard(), Some(Guard::DateAndTimeRequired));
        assert_eq!(transition.draft(), &draft);
        assert_eq!(transition.draft().step.number(), 1);
    }

    #[test]
    fn next_without_any_selection_is_ignored() {
        let fixture = Fixture::new();
        let transition = fixture.wizard().reduce(BookingDraft::default(), Action::Next);
        assert_eq!(transition.guard(), Some(Guard::DateAndTimeRequired));
        assert_eq!(transition.into_draft(), BookingDraft::default());
    }

    #[test]
    fn unavailable_slot_does_not_change_selected_time() {
        let fixture = Fixture::new();
        let wizard = fixture.wizard();
        let draft = run(
            &wizard,
            vec![Action::SelectDate(day(2025, 9, 20)), Action::SelectTime("09:00 AM".to_string())],
        );

        let transition = wizard.reduce(draft, Action::SelectTime("11:00 AM".to_string()));
        assert_eq!(transition.guard(), Some(Guard::SlotUnavailable));
        assert_eq!(transition.draft().selected_time.as_deref(), Some("09:00 AM"));

        let transition = wizard.reduce(transition.into_draft(), Action::SelectTime("07:00 PM".to_string()));
        assert_eq!(transition.guard(), Some(Guard::SlotUnavailable));
    }

    #[test]
    fn time_requires_a_date_first() {
        let fixture = Fixture::new();
        let transition = fixture
            .wizard()
            .reduce(BookingDraft::default(), Action::SelectTime("10:00 AM".to_string()));
        assert_eq!(transition.guard(), Some(Guard::DateRequired));
    }

    #[test]
    fn sundays_and_out_of_range_dates_are_rejected() {
        let fixture = Fixture::new();
        let wizard = fixture.wizard();

        for date in [day(2025, 9, 21), day(2025, 9, 15), day(2025, 9, 14), day(2025, 10, 1)] {
            let transition = wizard.reduce(BookingDraft::default(), Action::SelectDate(date));
            assert_eq!(transition.guard(), Some(Guard::DateNotSelectable), "{date}");
            assert!(transition.draft().selected_date.is_none());
        }
    }

    #[test]
    fn unknown_counselor_keeps_counselor_step() {
        let fixture = Fixture::new();
        let wizard = fixture.wizard();
        let draft = run(
            &wizard,
            vec![
                Action::SelectDate(day(2025, 9, 20)),
                Action::SelectTime("10:00 AM".to_string()),
                Action::Next,
            ],
        );

        let transition = wizard.reduce(draft, Action::SelectCounselor("9".to_string()));
        assert_eq!(transition.guard(), Some(Guard::UnknownCounselor));
        assert_eq!(transition.draft().step, Step::Counselor);
        assert!(transition.draft().selected_counselor_id.is_none());
    }

    #[test]
    fn back_navigation() {
        let fixture = Fixture::new();
        let wizard = fixture.wizard();
        let at_details = run(
            &wizard,
            vec![
                Action::SelectDate(day(2025, 9, 20)),
                Action::SelectTime("10:00 AM".to_string()),
                Action::Next,
                Action::SelectCounselor("1".to_string()),
            ],
        );
        assert_eq!(at_details.step, Step::Details);

        let back = wizard.reduce(at_details.clone(), Action::Back).into_draft();
        assert_eq!(back.step, Step::DateTime);
        assert_eq!(back.selected_counselor_id.as_deref(), Some("1"));
        assert_eq!(back.selected_time.as_deref(), Some("10:00 AM"));

        let at_review = wizard.reduce(at_details, Action::Next).into_draft();
        assert_eq!(at_review.step, Step::Review);
        assert_eq!(wizard.reduce(at_review, Action::Back).into_draft().step, Step::Details);

        let at_counselor = run(
            &wizard,
            vec![
                Action::SelectDate(day(2025, 9, 20)),
                Action::SelectTime("10:00 AM".to_string()),
                Action::Next,
            ],
        );
        assert_eq!(wizard.reduce(at_counselor, Action::Back).into_draft().step, Step::DateTime);
    }

    #[test]
    fn details_edits_apply_in_place() {
        let fixture = Fixture::new();
        let wizard = fixture.wizard();
        let draft = run(
            &wizard,
            vec![
                Action::SelectDate(day(2025, 9, 20)),
                Action::SelectTime("10:00 AM".to_string()),
                Action::Next,
                Action::SelectCounselor("3".to_string()),
                Action::SetSessionType(SessionType::InPerson),
                Action::ToggleAnonymous,
                Action::ToggleUrgent,
                Action::ToggleUrgent,
                Action::SetConcerns("exam stress".to_string()),
            ],
        );

        assert_eq!(draft.step, Step::Details);
        assert_eq!(draft.session_type, SessionType::InPerson);
        assert!(draft.is_anonymous);
        assert!(!draft.is_urgent);
        assert_eq!(draft.concerns, "exam stress");
        assert_eq!(draft.price(), 2000);
    }

    #[test]
    fn actions_outside_their_step_are_ignored() {
        let fixture = Fixture::new();
        let wizard = fixture.wizard();

        for action in [
            Action::Confirm,
            Action::Reset,
            Action::Back,
            Action::ToggleUrgent,
            Action::SelectCounselor("1".to_string()),
            Action::SetConcerns("hi".to_string()),
        ] {
            let transition = wizard.reduce(BookingDraft::default(), action);
            assert_eq!(transition.guard(), Some(Guard::WrongStep));
            assert_eq!(transition.into_draft(), BookingDraft::default());
        }
    }

    #[test]
    fn confirmed_is_terminal_until_reset() {
        let fixture = Fixture::new();
        let wizard = fixture.wizard();
        let confirmed = run(
            &wizard,
            vec![
                Action::SelectDate(day(2025, 9, 20)),
                Action::SelectTime("10:00 AM".to_string()),
                Action::Next,
                Action::SelectCounselor("2".to_string()),
                Action::ToggleAnonymous,
                Action::SetConcerns("sleep".to_string()),
                Action::Next,
                Action::Confirm,
            ],
        );
        assert_eq!(confirmed.step, Step::Confirmed);

        for action in [Action::Back, Action::Next, Action::Confirm, Action::SelectDate(day(2025, 9, 22))] {
            assert_eq!(wizard.reduce(confirmed.clone(), action).guard(), Some(Guard::WrongStep));
        }

        let reset = wizard.reduce(confirmed, Action::Reset);
        assert_eq!(reset.guard(), None);
        assert_eq!(reset.into_draft(), BookingDraft::default());
    }
}
