// --- File: crates/salonbook_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{HttpStatusCode, SalonbookError};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};
