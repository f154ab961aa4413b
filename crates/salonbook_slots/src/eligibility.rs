// --- File: crates/salonbook_slots/src/eligibility.rs ---
use crate::models::{ServiceId, StaffChoice, StaffMember};
use std::collections::BTreeSet;

/// Conjunctive capability check: true only if every requested service is in
/// `capabilities`. An empty request is vacuously satisfied, so callers must
/// reject empty selections before generating slots.
pub fn can_perform_all(requested: &[ServiceId], capabilities: &BTreeSet<ServiceId>) -> bool {
    requested.iter().all(|id| capabilities.contains(id))
}

impl StaffMember {
    pub fn can_perform_all(&self, requested: &[ServiceId]) -> bool {
        can_perform_all(requested, &self.capabilities)
    }
}

/// Staff members able to perform every requested service, in roster order.
pub fn eligible_staff<'a>(roster: &'a [StaffMember], requested: &[ServiceId]) -> Vec<&'a StaffMember> {
    roster
        .iter()
        .filter(|member| member.can_perform_all(requested))
        .collect()
}

/// The part of the roster a slot query targets: everyone for "any", or the
/// single chosen member (empty if the id is not on the roster).
pub fn targeted_staff<'a>(roster: &'a [StaffMember], choice: &StaffChoice) -> Vec<&'a StaffMember> {
    match choice {
        StaffChoice::Any => roster.iter().collect(),
        StaffChoice::Specific(id) => roster.iter().filter(|m| &m.id == id).collect(),
    }
}
