// --- File: crates/salonbook_slots/src/lib.rs ---
//! Slot availability and staff assignment for salon and spa bookings.
//!
//! Everything in this crate is synchronous and free of I/O: callers fetch the
//! venue, roster and existing bookings, then ask the engine which start times
//! are bookable and who should receive an "any professional" booking.
pub mod assignment;
#[cfg(test)]
mod assignment_test;
pub mod calendar;
pub mod eligibility;
pub mod error;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod models;
pub mod schedule;
pub mod time;

pub use assignment::{
    confirm_specific, free_eligible_staff, resolve_any, resolve_staff, FirstSelector,
    RandomSelector, StaffSelector,
};
pub use calendar::{overlaps, BookingCalendar, DayCalendar};
pub use eligibility::{can_perform_all, eligible_staff};
pub use error::SlotError;
pub use logic::{earliest_start, generate_slots, SlotQuery, SlotSummary};
pub use models::{
    required_duration, Booking, DayTiming, Service, ServiceId, SlotStatus, StaffChoice, StaffId, StaffMember,
    TimeSlot, Venue, VenueKind,
};
pub use schedule::{resolve_day_window, DaySchedule, DayWindow, MissingWeekday, SchedulingPolicy};
pub use time::{parse_date_key, parse_weekday, DateKeyFormat, TimeOfDay, MINUTES_PER_DAY};
