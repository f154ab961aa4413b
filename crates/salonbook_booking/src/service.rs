// --- File: crates/salonbook_booking/src/service.rs ---
//! The booking backend seam.
//!
//! Venue data, rosters and the appointment ledger are owned by an external
//! backend. Everything the booking flow needs from it goes through
//! [`BookingBackend`], so the flow can be tested against a mock.
use crate::error::BookingError;
use crate::models::{AuthContext, BackendAck, BookingRequest, RescheduleRequest, VenueRef};
use async_trait::async_trait;
use chrono::NaiveDate;
use salonbook_slots::{DayCalendar, StaffMember, Venue};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// Venue details: timings, service catalogue and any embedded bookings.
    async fn fetch_venue(&self, venue: &VenueRef) -> Result<Venue, BookingError>;

    async fn fetch_staff(&self, venue: &VenueRef) -> Result<Vec<StaffMember>, BookingError>;

    /// Existing bookings for one date. A date without bookings is an empty day.
    async fn fetch_bookings(
        &self,
        venue: &VenueRef,
        date: NaiveDate,
    ) -> Result<DayCalendar, BookingError>;

    /// Posts a new appointment. A refusal is `SubmissionRejected` carrying the
    /// backend's message.
    async fn submit_booking(
        &self,
        auth: &AuthContext,
        request: &BookingRequest,
    ) -> Result<BackendAck, BookingError>;

    async fn reschedule_booking(
        &self,
        auth: &AuthContext,
        request: &RescheduleRequest,
    ) -> Result<BackendAck, BookingError>;
}
