// --- File: crates/salonbook_slots/src/assignment.rs ---
//! Final staff resolution at submission time.
use crate::calendar::DayCalendar;
use crate::error::SlotError;
use crate::models::{ServiceId, StaffChoice, StaffMember};
use crate::time::TimeOfDay;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Picks one of several equally valid candidates.
pub trait StaffSelector {
    /// Returns an index into `candidates`, which is never empty.
    fn choose(&mut self, candidates: &[&StaffMember]) -> usize;
}

/// Uniform random choice. No weighting by workload or seniority.
#[derive(Debug, Clone)]
pub struct RandomSelector<R> {
    rng: R,
}

impl<R: Rng> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSelector<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> StaffSelector for RandomSelector<R> {
    fn choose(&mut self, candidates: &[&StaffMember]) -> usize {
        self.rng.gen_range(0..candidates.len())
    }
}

/// Always the first candidate in roster order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSelector;

impl StaffSelector for FirstSelector {
    fn choose(&mut self, _candidates: &[&StaffMember]) -> usize {
        0
    }
}

/// Staff who can perform every requested service and have nothing booked in
/// `[start, start + duration)`, in roster order.
pub fn free_eligible_staff<'a>(
    roster: &'a [StaffMember],
    requested: &[ServiceId],
    calendar: &DayCalendar,
    start: TimeOfDay,
    duration_minutes: u32,
) -> Vec<&'a StaffMember> {
    roster
        .iter()
        .filter(|member| member.can_perform_all(requested))
        .filter(|member| calendar.is_free(&member.id, start.minutes(), duration_minutes))
        .collect()
}

/// Chooses who receives an "any professional" booking.
///
/// `calendar` must be freshly fetched: a grid computed earlier may already be
/// stale. A single candidate is returned without consulting `selector`.
pub fn resolve_any<'a, S>(
    roster: &'a [StaffMember],
    requested: &[ServiceId],
    calendar: &DayCalendar,
    start: TimeOfDay,
    duration_minutes: u32,
    selector: &mut S,
) -> Result<&'a StaffMember, SlotError>
where
    S: StaffSelector + ?Sized,
{
    if !roster.iter().any(|member| member.can_perform_all(requested)) {
        return Err(SlotError::NoEligibleStaff);
    }
    let candidates = free_eligible_staff(roster, requested, calendar, start, duration_minutes);
    debug!(
        "{} candidate(s) free at {} for {} min",
        candidates.len(),
        start,
        duration_minutes
    );
    let chosen = match candidates.as_slice() {
        [] => {
            return Err(SlotError::NoStaffAvailable {
                start,
                duration_minutes,
            })
        }
        [only] => *only,
        many => {
            let index = selector.choose(many).min(many.len() - 1);
            many[index]
        }
    };
    info!("Assigned staff {} at {}", chosen.id, start);
    Ok(chosen)
}

/// Re-validates a customer-chosen staff member at submission time.
pub fn confirm_specific<'a>(
    roster: &'a [StaffMember],
    staff_id: &str,
    requested: &[ServiceId],
    calendar: &DayCalendar,
    start: TimeOfDay,
    duration_minutes: u32,
) -> Result<&'a StaffMember, SlotError> {
    let member = roster
        .iter()
        .find(|m| m.id == staff_id)
        .ok_or_else(|| SlotError::UnknownStaff(staff_id.to_string()))?;
    if !member.can_perform_all(requested) {
        return Err(SlotError::NoEligibleStaff);
    }
    if !calendar.is_free(&member.id, start.minutes(), duration_minutes) {
        return Err(SlotError::StaffUnavailable {
            staff_id: member.id.clone(),
            start,
        });
    }
    Ok(member)
}

/// Resolves the final staff member for either kind of choice.
pub fn resolve_staff<'a, S>(
    choice: &StaffChoice,
    roster: &'a [StaffMember],
    requested: &[ServiceId],
    calendar: &DayCalendar,
    start: TimeOfDay,
    duration_minutes: u32,
    selector: &mut S,
) -> Result<&'a StaffMember, SlotError>
where
    S: StaffSelector + ?Sized,
{
    match choice {
        StaffChoice::Any => resolve_any(roster, requested, calendar, start, duration_minutes, selector),
        StaffChoice::Specific(id) => {
            confirm_specific(roster, id, requested, calendar, start, duration_minutes)
        }
    }
}
