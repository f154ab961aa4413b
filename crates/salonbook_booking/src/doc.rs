// File: crates/salonbook_booking/src/doc.rs

#![cfg(feature = "openapi")]
use crate::handlers::{
    BookSlotRequest, BookingResponse, RescheduleResponse, RescheduleSlotRequest, SlotsQuery,
};
use crate::logic::SlotsResponse;
use salonbook_slots::{SlotStatus, TimeSlot, VenueKind};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_slots_handler,
        crate::handlers::book_slot_handler,
        crate::handlers::reschedule_handler
    ),
    components(
        schemas(
            SlotsQuery,
            SlotsResponse,
            TimeSlot,
            SlotStatus,
            VenueKind,
            BookSlotRequest,
            BookingResponse,
            RescheduleSlotRequest,
            RescheduleResponse
        )
    ),
    tags(
        (name = "Booking", description = "Salon and spa slot availability and booking API")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct BookingApiDoc;
