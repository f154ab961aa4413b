// --- File: crates/salonbook_slots/src/models.rs ---
use crate::calendar::BookingCalendar;
use crate::time::TimeOfDay;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

pub type ServiceId = String;
pub type StaffId = String;

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueKind {
    Salon,
    Spa,
}

impl VenueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VenueKind::Salon => "salon",
            VenueKind::Spa => "spa",
        }
    }
}

impl fmt::Display for VenueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening hours for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTiming {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
    pub is_open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub price: f64,
    pub duration_minutes: u32,
}

/// Total duration of an ordered service selection.
pub fn required_duration(services: &[Service]) -> u32 {
    services
        .iter()
        .fold(0u32, |total, s| total.saturating_add(s.duration_minutes))
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub role: String,
    pub experience: Option<String>,
    /// Services this person is qualified to perform.
    pub capabilities: BTreeSet<ServiceId>,
}

/// An already committed appointment, used only for overlap checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub staff_id: StaffId,
    pub start: TimeOfDay,
    pub duration_minutes: u32,
    pub appointment_id: Option<String>,
}

impl Booking {
    pub fn start_minutes(&self) -> u32 {
        self.start.minutes()
    }

    /// Exclusive end, in minutes since midnight. May run past 24:00.
    pub fn end_minutes(&self) -> u32 {
        self.start.minutes().saturating_add(self.duration_minutes)
    }
}

#[derive(Debug, Clone)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub kind: VenueKind,
    pub timings: HashMap<Weekday, DayTiming>,
    pub services: Vec<Service>,
    /// Bookings embedded in the venue payload, if the backend sends them.
    pub bookings: BookingCalendar,
}

impl Venue {
    /// Looks up the requested services in the venue's catalogue, keeping the
    /// request order. Returns the ids that are not offered as the error.
    pub fn select_services(&self, ids: &[ServiceId]) -> Result<Vec<Service>, Vec<ServiceId>> {
        let mut selected = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        for id in ids {
            match self.services.iter().find(|s| &s.id == id) {
                Some(service) => selected.push(service.clone()),
                None => missing.push(id.clone()),
            }
        }
        if missing.is_empty() {
            Ok(selected)
        } else {
            Err(missing)
        }
    }
}

/// Who should perform the appointment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StaffChoice {
    /// Any professional; the system picks at booking time.
    #[default]
    Any,
    Specific(StaffId),
}

impl StaffChoice {
    /// `"any"` or an empty value selects any professional.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => StaffChoice::Any,
            Some(v) if v.eq_ignore_ascii_case("any") => StaffChoice::Any,
            Some(v) => StaffChoice::Specific(v.to_string()),
        }
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    /// Qualified staff exist but none is free for the full window.
    Booked,
    /// Nobody in the targeted pool can perform every requested service.
    Mismatch,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:30"))]
    pub start: TimeOfDay,
    pub status: SlotStatus,
    /// Staff free for the whole window at this start. Empty unless available.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub staff_ids: Vec<StaffId>,
}
