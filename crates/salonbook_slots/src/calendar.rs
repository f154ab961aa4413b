// --- File: crates/salonbook_slots/src/calendar.rs ---
//! Existing bookings indexed by date and staff member.
use crate::models::{Booking, StaffId};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Half-open overlap: `[a_start, a_end)` and `[b_start, b_end)` overlap iff
/// each starts strictly before the other ends. Back-to-back windows do not
/// overlap.
///
/// Every overlap decision in the engine goes through this function.
pub fn overlaps(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && b_start < a_end
}

/// Bookings for one date, grouped per staff member and sorted by start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayCalendar {
    by_staff: BTreeMap<StaffId, Vec<Booking>>,
}

static EMPTY_DAY: DayCalendar = DayCalendar {
    by_staff: BTreeMap::new(),
};

impl DayCalendar {
    pub fn from_bookings(bookings: impl IntoIterator<Item = Booking>) -> Self {
        let mut day = Self::default();
        for booking in bookings {
            day.insert(booking);
        }
        day
    }

    pub fn insert(&mut self, booking: Booking) {
        let entries = self.by_staff.entry(booking.staff_id.clone()).or_default();
        let at = entries.partition_point(|b| b.start <= booking.start);
        entries.insert(at, booking);
    }

    pub fn is_empty(&self) -> bool {
        self.by_staff.values().all(Vec::is_empty)
    }

    pub fn len(&self) -> usize {
        self.by_staff.values().map(Vec::len).sum()
    }

    pub fn bookings_for(&self, staff_id: &str) -> &[Booking] {
        self.by_staff.get(staff_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `staff_id` has nothing overlapping `[start, start + duration)`.
    pub fn is_free(&self, staff_id: &str, start: u32, duration: u32) -> bool {
        let end = start.saturating_add(duration);
        !self
            .bookings_for(staff_id)
            .iter()
            .any(|b| overlaps(start, end, b.start_minutes(), b.end_minutes()))
    }

    /// The booking in progress at minute `at`, if any.
    pub fn active_at(&self, staff_id: &str, at: u32) -> Option<&Booking> {
        self.bookings_for(staff_id)
            .iter()
            .find(|b| b.start_minutes() <= at && at < b.end_minutes())
    }

    /// Earliest start of a booking that begins after `start` and still
    /// overlaps `[start, start + duration)`.
    pub fn next_conflict_start(&self, staff_id: &str, start: u32, duration: u32) -> Option<u32> {
        let end = start.saturating_add(duration);
        self.bookings_for(staff_id)
            .iter()
            .filter(|b| b.start_minutes() > start)
            .find(|b| overlaps(start, end, b.start_minutes(), b.end_minutes()))
            .map(Booking::start_minutes)
    }
}

/// Bookings for a venue across dates. A date with no entry is a free day.
#[derive(Debug, Clone, Default)]
pub struct BookingCalendar {
    days: BTreeMap<NaiveDate, DayCalendar>,
}

impl BookingCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, booking: Booking) {
        self.days.entry(date).or_default().insert(booking);
    }

    pub fn set_day(&mut self, date: NaiveDate, day: DayCalendar) {
        self.days.insert(date, day);
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn day(&self, date: NaiveDate) -> &DayCalendar {
        self.days.get(&date).unwrap_or(&EMPTY_DAY)
    }
}
