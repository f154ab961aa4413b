// --- File: crates/salonbook_booking/src/error.rs ---
use salonbook_common::SalonbookError;
use salonbook_slots::SlotError;
use thiserror::Error;

/// Service name used when reporting backend failures.
pub const BACKEND_SERVICE: &str = "booking-backend";

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Please log in to book an appointment")]
    AuthRequired,
    #[error("Select at least one service")]
    NoServicesSelected,
    #[error("Service(s) not offered by this venue: {0}")]
    UnknownService(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Slot(#[from] SlotError),
    /// The backend refused the booking. The message is the backend's own.
    #[error("{0}")]
    SubmissionRejected(String),
    #[error("Booking backend error (status {status:?}): {message}")]
    Backend { status: Option<u16>, message: String },
    #[error("Malformed backend data: {0}")]
    Parse(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for BookingError {
    fn from(err: reqwest::Error) -> Self {
        BookingError::Backend {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Parse(err.to_string())
    }
}

impl From<BookingError> for SalonbookError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::AuthRequired => SalonbookError::AuthError(err.to_string()),
            BookingError::NoServicesSelected
            | BookingError::UnknownService(_)
            | BookingError::InvalidRequest(_) => SalonbookError::ValidationError(err.to_string()),
            BookingError::Slot(slot) => match slot {
                SlotError::NoEligibleStaff
                | SlotError::NoStaffAvailable { .. }
                | SlotError::StaffUnavailable { .. } => {
                    SalonbookError::ConflictError(slot.to_string())
                }
                SlotError::UnknownStaff(_) => SalonbookError::NotFoundError(slot.to_string()),
                _ => SalonbookError::ValidationError(slot.to_string()),
            },
            BookingError::SubmissionRejected(message) => SalonbookError::ConflictError(message),
            BookingError::Backend { .. } | BookingError::Parse(_) => {
                SalonbookError::ExternalServiceError {
                    service_name: BACKEND_SERVICE.to_string(),
                    message: err.to_string(),
                }
            }
            BookingError::Config(message) => SalonbookError::ConfigError(message),
        }
    }
}
