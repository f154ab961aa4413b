// --- File: crates/salonbook_slots/src/schedule.rs ---
use crate::models::DayTiming;
use crate::time::TimeOfDay;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Open window for one date, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
}

impl DayWindow {
    pub fn contains(&self, start: TimeOfDay, duration_minutes: u32) -> bool {
        start >= self.open
            && start.minutes().saturating_add(duration_minutes) <= self.close.minutes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySchedule {
    Open(DayWindow),
    Closed,
}

impl DaySchedule {
    pub fn window(&self) -> Option<DayWindow> {
        match self {
            DaySchedule::Open(window) => Some(*window),
            DaySchedule::Closed => None,
        }
    }
}

/// How to treat a weekday that has no row in the venue's timing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingWeekday {
    #[default]
    Fallback,
    Closed,
}

/// Tunables of the slot engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingPolicy {
    /// Window used when a weekday is missing and `missing_weekday` is `Fallback`.
    pub fallback_window: DayWindow,
    pub missing_weekday: MissingWeekday,
    /// Advance applied after a candidate that collides with an active booking.
    pub probe_step_minutes: u32,
    /// Same-day lead time: starts at or before `now + buffer` are never offered.
    pub same_day_buffer_minutes: u32,
    /// Assumed length of an existing booking that does not state one.
    pub default_booking_duration_minutes: u32,
}

pub const DEFAULT_PROBE_STEP_MINUTES: u32 = 15;
pub const DEFAULT_SAME_DAY_BUFFER_MINUTES: u32 = 15;
pub const DEFAULT_BOOKING_DURATION_MINUTES: u32 = 30;

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            fallback_window: DayWindow {
                open: TimeOfDay::saturating(10 * 60),
                close: TimeOfDay::saturating(20 * 60),
            },
            missing_weekday: MissingWeekday::Fallback,
            probe_step_minutes: DEFAULT_PROBE_STEP_MINUTES,
            same_day_buffer_minutes: DEFAULT_SAME_DAY_BUFFER_MINUTES,
            default_booking_duration_minutes: DEFAULT_BOOKING_DURATION_MINUTES,
        }
    }
}

/// Resolves the venue's open window for `date` from its per-weekday table.
///
/// A row with `is_open = false` closes the day. A missing row follows
/// `policy.missing_weekday`. A row whose close is not after its open is
/// treated as closed.
pub fn resolve_day_window(
    timings: &HashMap<Weekday, DayTiming>,
    date: NaiveDate,
    policy: &SchedulingPolicy,
) -> DaySchedule {
    let weekday = date.weekday();
    let Some(timing) = timings.get(&weekday) else {
        debug!("No timing row for {:?}, applying {:?}", weekday, policy.missing_weekday);
        return match policy.missing_weekday {
            MissingWeekday::Fallback => DaySchedule::Open(policy.fallback_window),
            MissingWeekday::Closed => DaySchedule::Closed,
        };
    };

    if !timing.is_open {
        return DaySchedule::Closed;
    }
    if timing.close <= timing.open {
        warn!(
            "Timing row for {:?} closes at {} before opening at {}, treating as closed",
            weekday, timing.close, timing.open
        );
        return DaySchedule::Closed;
    }
    DaySchedule::Open(DayWindow {
        open: timing.open,
        close: timing.close,
    })
}
