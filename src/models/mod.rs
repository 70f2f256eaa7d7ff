pub mod booking;
pub mod counselor;
pub mod helpline;
pub mod time_slot;

pub use booking::{BookingDraft, ConfirmedBooking, SessionType, Step, SESSION_MINUTES};
pub use counselor::CounselorCatalog;
pub use helpline::{EMERGENCY_STEPS, HELPLINES};
pub use time_slot::SlotCatalog;
