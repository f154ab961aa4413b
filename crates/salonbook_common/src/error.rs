// --- File: crates/salonbook_common/src/error.rs ---
use thiserror::Error;

/// The base error type shared by all salonbook crates.
///
/// Each crate keeps its own error enum and converts into this one at the
/// HTTP boundary by implementing `From<CrateError> for SalonbookError`.
#[derive(Error, Debug)]
pub enum SalonbookError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Customer identity or session token missing
    #[error("Authentication required: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The upstream booking backend failed or rejected a request
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// The requested time can no longer be served
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SalonbookError {
    fn status_code(&self) -> u16 {
        match self {
            SalonbookError::ConfigError(_) => 500,
            SalonbookError::AuthError(_) => 401,
            SalonbookError::ValidationError(_) => 400,
            SalonbookError::ExternalServiceError { .. } => 502,
            SalonbookError::ConflictError(_) => 409,
            SalonbookError::NotFoundError(_) => 404,
        }
    }
}
