// --- File: crates/salonbook_booking/src/lib.rs ---
//! Booking flow around the slot engine: backend access, slot computation,
//! submission, rescheduling and the HTTP routes.
pub mod client;
pub mod doc;
pub mod error;
#[cfg(test)]
mod fixtures;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod policy;
pub mod routes;
pub mod service;
pub mod session;
pub mod wire;

pub use client::HttpBookingBackend;
pub use error::BookingError;
pub use handlers::BookingState;
pub use logic::{
    compute_slots, reschedule_booking, submit_booking, BookingDraft, BookingOutcome,
    RescheduleDraft, SlotsRequest, SlotsResponse,
};
pub use models::{AuthContext, BackendAck, BookingRequest, RescheduleRequest, VenueRef};
pub use service::BookingBackend;
pub use session::{SlotSession, SlotTicket};
