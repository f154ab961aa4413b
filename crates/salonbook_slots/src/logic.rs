// --- File: crates/salonbook_slots/src/logic.rs ---
use crate::calendar::DayCalendar;
use crate::eligibility::targeted_staff;
use crate::models::{ServiceId, SlotStatus, StaffChoice, StaffMember, TimeSlot};
use crate::schedule::{DaySchedule, SchedulingPolicy};
use crate::time::{round_up_to_step, TimeOfDay};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

/// Everything the generator needs for one date. Borrowed so that a caller can
/// recompute cheaply whenever the selection changes.
#[derive(Debug, Clone)]
pub struct SlotQuery<'a> {
    pub date: NaiveDate,
    pub schedule: DaySchedule,
    /// Sum of the selected services' durations, in minutes.
    pub required_duration: u32,
    pub requested_services: &'a [ServiceId],
    pub staff_choice: &'a StaffChoice,
    pub roster: &'a [StaffMember],
    pub calendar: &'a DayCalendar,
    /// Venue-local wall clock time.
    pub now: NaiveDateTime,
}

/// Earliest minute at which a candidate may start on `date`, or `None` if the
/// whole date is in the past.
///
/// For today this is the first multiple of the probe step strictly after
/// `now + buffer`, never earlier than `open`.
pub fn earliest_start(
    open: TimeOfDay,
    date: NaiveDate,
    now: NaiveDateTime,
    policy: &SchedulingPolicy,
) -> Option<u32> {
    let today = now.date();
    if date < today {
        return None;
    }
    if date > today {
        return Some(open.minutes());
    }
    let cutoff = TimeOfDay::from_naive_time(now.time()).minutes() + policy.same_day_buffer_minutes;
    let first = round_up_to_step(cutoff + 1, policy.probe_step_minutes.max(1));
    Some(first.max(open.minutes()))
}

/// Produces the labelled candidate start times for one date.
///
/// The walk starts at the venue's open time (or the same-day cutoff) and
/// ends once `cursor + required_duration` would pass closing time. At each
/// cursor, over the eligible part of the targeted staff pool:
///
/// * nobody eligible: `mismatch`, advance by the required duration;
/// * someone free for the whole window: `available`, advance by the
///   required duration;
/// * someone's booking is in progress at the cursor: `booked`, advance by
///   the probe step;
/// * otherwise every eligible member has a booking starting inside the
///   window: jump to the earliest of those starts without emitting.
///
/// The result is ascending, duplicate free, and depends only on the query.
pub fn generate_slots(query: &SlotQuery<'_>, policy: &SchedulingPolicy) -> Vec<TimeSlot> {
    let DaySchedule::Open(window) = query.schedule else {
        debug!("Venue closed on {}, no slots", query.date);
        return Vec::new();
    };
    let duration = query.required_duration;
    if duration == 0 {
        debug!("Required duration is zero, no slots");
        return Vec::new();
    }
    let Some(start) = earliest_start(window.open, query.date, query.now, policy) else {
        debug!("{} is in the past, no slots", query.date);
        return Vec::new();
    };
    let probe_step = policy.probe_step_minutes.max(1);
    let close = window.close.minutes();

    let eligible: Vec<&StaffMember> = targeted_staff(query.roster, query.staff_choice)
        .into_iter()
        .filter(|member| member.can_perform_all(query.requested_services))
        .collect();

    debug!(
        "Generating slots for {} {}-{} duration={}min eligible={} first_candidate={}",
        query.date,
        window.open,
        window.close,
        duration,
        eligible.len(),
        TimeOfDay::saturating(start)
    );

    let mut slots = Vec::new();
    let mut cursor = start;
    while cursor.saturating_add(duration) <= close {
        let at = TimeOfDay::saturating(cursor);

        if eligible.is_empty() {
            slots.push(TimeSlot {
                start: at,
                status: SlotStatus::Mismatch,
                staff_ids: Vec::new(),
            });
            cursor = cursor.saturating_add(duration);
            continue;
        }

        let free: Vec<String> = eligible
            .iter()
            .filter(|member| query.calendar.is_free(&member.id, cursor, duration))
            .map(|member| member.id.clone())
            .collect();
        if !free.is_empty() {
            slots.push(TimeSlot {
                start: at,
                status: SlotStatus::Available,
                staff_ids: free,
            });
            cursor = cursor.saturating_add(duration);
            continue;
        }

        let someone_active = eligible
            .iter()
            .any(|member| query.calendar.active_at(&member.id, cursor).is_some());
        if someone_active {
            slots.push(TimeSlot {
                start: at,
                status: SlotStatus::Booked,
                staff_ids: Vec::new(),
            });
            cursor = cursor.saturating_add(probe_step);
            continue;
        }

        // Everyone is blocked by a booking that starts inside the window, so no
        // start before the earliest of those can be free.
        let next = eligible
            .iter()
            .filter_map(|member| query.calendar.next_conflict_start(&member.id, cursor, duration))
            .min();
        match next {
            Some(next) if next > cursor => {
                debug!("Skipping from {} to {}", at, TimeOfDay::saturating(next));
                cursor = next;
            }
            _ => cursor = cursor.saturating_add(probe_step),
        }
    }
    slots
}

/// Per-status counts of a generated slot list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotSummary {
    pub available: usize,
    pub booked: usize,
    pub mismatch: usize,
}

impl SlotSummary {
    pub fn of(slots: &[TimeSlot]) -> Self {
        slots.iter().fold(Self::default(), |mut summary, slot| {
            match slot.status {
                SlotStatus::Available => summary.available += 1,
                SlotStatus::Booked => summary.booked += 1,
                SlotStatus::Mismatch => summary.mismatch += 1,
            }
            summary
        })
    }
}
