// --- File: crates/salonbook_booking/src/models.rs ---
use crate::error::BookingError;
use chrono::NaiveDate;
use salonbook_slots::{ServiceId, StaffId, TimeOfDay, VenueKind};
use serde::Serialize;

/// Identifies a venue on the booking backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VenueRef {
    pub kind: VenueKind,
    pub id: String,
}

impl VenueRef {
    pub fn new(kind: VenueKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Customer identity for a submission, handed in by the caller.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct AuthContext {
    pub customer_id: String,
    pub token: String,
}

impl AuthContext {
    pub fn new(customer_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            token: token.into(),
        }
    }

    /// Fails with `AuthRequired` when either part is missing or blank.
    pub fn ensure_present(&self) -> Result<(), BookingError> {
        if self.customer_id.trim().is_empty() || self.token.trim().is_empty() {
            return Err(BookingError::AuthRequired);
        }
        Ok(())
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("customer_id", &self.customer_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Venue id keyed by venue kind on the wire: `salonId` or `spaId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VenueIdField {
    #[serde(rename = "salonId")]
    Salon(String),
    #[serde(rename = "spaId")]
    Spa(String),
}

impl From<&VenueRef> for VenueIdField {
    fn from(venue: &VenueRef) -> Self {
        match venue.kind {
            VenueKind::Salon => VenueIdField::Salon(venue.id.clone()),
            VenueKind::Spa => VenueIdField::Spa(venue.id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    pub service_id: ServiceId,
    pub price: f64,
    pub duration: u32,
}

/// Payload posted to the backend to create an appointment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(rename = "type")]
    pub kind: VenueKind,
    #[serde(flatten)]
    pub venue_id: VenueIdField,
    pub customer_id: String,
    pub employee_id: StaffId,
    pub services: Vec<ServiceLine>,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub payment_id: String,
}

/// Payload posted to the backend to move an existing appointment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    #[serde(rename = "type")]
    pub kind: VenueKind,
    pub place_id: String,
    pub appointment_id: String,
    pub new_date: NaiveDate,
    pub new_start_time: TimeOfDay,
}

/// What the backend reports back after accepting a write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackendAck {
    pub appointment_id: Option<String>,
    pub message: Option<String>,
}
