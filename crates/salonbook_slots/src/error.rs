// --- File: crates/salonbook_slots/src/error.rs ---
use crate::time::TimeOfDay;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD or DD-MM-YYYY")]
    InvalidDate(String),
    #[error("Unknown weekday '{0}'")]
    InvalidWeekday(String),
    #[error("Venue is closed on {0}")]
    VenueClosed(NaiveDate),
    #[error("{start} + {duration_minutes} min is outside opening hours {open}-{close}")]
    OutsideOpeningHours {
        start: TimeOfDay,
        duration_minutes: u32,
        open: TimeOfDay,
        close: TimeOfDay,
    },
    #[error("Start time {start} on {date} is no longer bookable")]
    SlotInPast { date: NaiveDate, start: TimeOfDay },
    #[error("No staff member can perform all requested services")]
    NoEligibleStaff,
    #[error("No professional is available at {start} for {duration_minutes} minutes")]
    NoStaffAvailable {
        start: TimeOfDay,
        duration_minutes: u32,
    },
    #[error("Staff member {staff_id} is already booked at {start}")]
    StaffUnavailable { staff_id: String, start: TimeOfDay },
    #[error("Unknown staff member: {0}")]
    UnknownStaff(String),
}
