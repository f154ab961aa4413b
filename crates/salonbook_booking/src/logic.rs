// --- File: crates/salonbook_booking/src/logic.rs ---
use crate::error::BookingError;
use crate::models::{
    AuthContext, BackendAck, BookingRequest, RescheduleRequest, ServiceLine, VenueIdField,
    VenueRef,
};
use crate::service::BookingBackend;
use chrono::{NaiveDate, NaiveDateTime};
use salonbook_slots::{
    generate_slots, required_duration, resolve_day_window, resolve_staff, DayCalendar,
    SchedulingPolicy, Service, ServiceId, SlotError, SlotQuery, SlotSummary, StaffChoice,
    StaffId, StaffMember, StaffSelector, TimeOfDay, TimeSlot, Venue, VenueKind,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One slot-grid request: venue, date, services and staff filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotsRequest {
    pub venue: VenueRef,
    pub date: NaiveDate,
    pub services: Vec<ServiceId>,
    pub staff: StaffChoice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotsResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date", example = "2025-05-05"))]
    pub date: NaiveDate,
    pub venue_id: String,
    pub venue_type: VenueKind,
    /// Sum of the selected services' durations, in minutes.
    pub required_duration: u32,
    /// True when the venue does not open on this date.
    pub closed: bool,
    pub slots: Vec<TimeSlot>,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub summary: SlotSummary,
}

/// A customer's confirmed choice, not yet validated against fresh data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub venue: VenueRef,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub services: Vec<ServiceId>,
    pub staff: StaffChoice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingOutcome {
    pub request: BookingRequest,
    pub ack: BackendAck,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleDraft {
    pub venue: VenueRef,
    pub appointment_id: String,
    pub new_date: NaiveDate,
    pub new_start: TimeOfDay,
}

/// Everything fetched for one venue and date.
struct DaySnapshot {
    venue: Venue,
    roster: Vec<StaffMember>,
    calendar: DayCalendar,
}

async fn load_day<B>(backend: &B, venue_ref: &VenueRef, date: NaiveDate) -> Result<DaySnapshot, BookingError>
where
    B: BookingBackend + ?Sized,
{
    let venue = backend.fetch_venue(venue_ref).await?;
    let roster = backend.fetch_staff(venue_ref).await?;
    let calendar = if venue.bookings.contains_date(date) {
        debug!("Using bookings embedded in venue payload for {}", date);
        venue.bookings.day(date).clone()
    } else {
        backend.fetch_bookings(venue_ref, date).await?
    };
    debug!(
        "Loaded {} {}: {} staff, {} bookings on {}",
        venue_ref.kind,
        venue_ref.id,
        roster.len(),
        calendar.len(),
        date
    );
    Ok(DaySnapshot {
        venue,
        roster,
        calendar,
    })
}

fn select_services(venue: &Venue, ids: &[ServiceId]) -> Result<Vec<Service>, BookingError> {
    if ids.is_empty() {
        return Err(BookingError::NoServicesSelected);
    }
    venue
        .select_services(ids)
        .map_err(|missing| BookingError::UnknownService(missing.join(", ")))
}

/// Computes the labelled slot grid for one venue and date from freshly
/// fetched data.
pub async fn compute_slots<B>(
    backend: &B,
    policy: &SchedulingPolicy,
    request: &SlotsRequest,
    now: NaiveDateTime,
) -> Result<SlotsResponse, BookingError>
where
    B: BookingBackend + ?Sized,
{
    if request.services.is_empty() {
        return Err(BookingError::NoServicesSelected);
    }
    let day = load_day(backend, &request.venue, request.date).await?;
    let services = select_services(&day.venue, &request.services)?;
    let duration = required_duration(&services);
    let schedule = resolve_day_window(&day.venue.timings, request.date, policy);

    let query = SlotQuery {
        date: request.date,
        schedule,
        required_duration: duration,
        requested_services: &request.services,
        staff_choice: &request.staff,
        roster: &day.roster,
        calendar: &day.calendar,
        now,
    };
    let slots = generate_slots(&query, policy);
    let summary = SlotSummary::of(&slots);
    info!(
        "Slots for {} {} on {}: {} available, {} booked, {} mismatch",
        request.venue.kind,
        request.venue.id,
        request.date,
        summary.available,
        summary.booked,
        summary.mismatch
    );

    Ok(SlotsResponse {
        date: request.date,
        venue_id: day.venue.id,
        venue_type: request.venue.kind,
        required_duration: duration,
        closed: schedule.window().is_none(),
        slots,
        summary,
    })
}

/// Whether `start` on `date` is still far enough in the future to book.
fn ensure_not_past(
    date: NaiveDate,
    start: TimeOfDay,
    now: NaiveDateTime,
    policy: &SchedulingPolicy,
) -> Result<(), SlotError> {
    let today = now.date();
    let past = if date < today {
        true
    } else if date == today {
        let cutoff = TimeOfDay::from_naive_time(now.time()).minutes() + policy.same_day_buffer_minutes;
        start.minutes() <= cutoff
    } else {
        false
    };
    if past {
        return Err(SlotError::SlotInPast { date, start });
    }
    Ok(())
}

/// Placeholder payment reference sent with every booking.
pub fn payment_reference() -> String {
    format!("pay_{}", Uuid::new_v4().simple())
}

/// Validates a draft against freshly fetched data, resolves the staff member
/// and posts the booking.
///
/// Nothing is sent when the customer is not authenticated, the time no longer
/// fits, or no qualified staff member is free at the chosen start.
pub async fn submit_booking<B, S>(
    backend: &B,
    policy: &SchedulingPolicy,
    auth: &AuthContext,
    draft: &BookingDraft,
    selector: &mut S,
    now: NaiveDateTime,
) -> Result<BookingOutcome, BookingError>
where
    B: BookingBackend + ?Sized,
    S: StaffSelector + Send + ?Sized,
{
    auth.ensure_present()?;
    if draft.services.is_empty() {
        return Err(BookingError::NoServicesSelected);
    }

    let day = load_day(backend, &draft.venue, draft.date).await?;
    let services = select_services(&day.venue, &draft.services)?;
    let duration = required_duration(&services);

    let window = resolve_day_window(&day.venue.timings, draft.date, policy)
        .window()
        .ok_or(SlotError::VenueClosed(draft.date))?;
    if !window.contains(draft.start, duration) {
        return Err(SlotError::OutsideOpeningHours {
            start: draft.start,
            duration_minutes: duration,
            open: window.open,
            close: window.close,
        }
        .into());
    }
    ensure_not_past(draft.date, draft.start, now, policy)?;

    let staff = resolve_staff(
        &draft.staff,
        &day.roster,
        &draft.services,
        &day.calendar,
        draft.start,
        duration,
        selector,
    )?;
    let employee_id: StaffId = staff.id.clone();

    let request = BookingRequest {
        kind: draft.venue.kind,
        venue_id: VenueIdField::from(&draft.venue),
        customer_id: auth.customer_id.clone(),
        employee_id,
        services: services
            .iter()
            .map(|s| ServiceLine {
                service_id: s.id.clone(),
                price: s.price,
                duration: s.duration_minutes,
            })
            .collect(),
        date: draft.date,
        start_time: draft.start,
        payment_id: payment_reference(),
    };

    match backend.submit_booking(auth, &request).await {
        Ok(ack) => {
            info!(
                "Booked {} with {} on {} at {}",
                request.customer_id, request.employee_id, request.date, request.start_time
            );
            Ok(BookingOutcome { request, ack })
        }
        Err(err) => {
            warn!("Booking submission failed: {}", err);
            Err(err)
        }
    }
}

/// Moves an existing appointment.
pub async fn reschedule_booking<B>(
    backend: &B,
    auth: &AuthContext,
    draft: &RescheduleDraft,
) -> Result<BackendAck, BookingError>
where
    B: BookingBackend + ?Sized,
{
    auth.ensure_present()?;
    if draft.appointment_id.trim().is_empty() {
        return Err(BookingError::InvalidRequest(
            "appointment id is required".to_string(),
        ));
    }
    let request = RescheduleRequest {
        kind: draft.venue.kind,
        place_id: draft.venue.id.clone(),
        appointment_id: draft.appointment_id.clone(),
        new_date: draft.new_date,
        new_start_time: draft.new_start,
    };
    backend.reschedule_booking(auth, &request).await
}
