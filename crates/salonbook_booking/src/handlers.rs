// --- File: crates/salonbook_booking/src/handlers.rs ---
use crate::client::HttpBookingBackend;
use crate::error::BookingError;
use crate::logic::{
    compute_slots, reschedule_booking, submit_booking, BookingDraft, RescheduleDraft,
    SlotsRequest, SlotsResponse,
};
use crate::models::{AuthContext, VenueRef};
use crate::policy::{scheduling_policy, venue_now, venue_time_zone};
use crate::service::BookingBackend;
use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    response::Json,
};
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use rand::rngs::StdRng;
use salonbook_common::SalonbookError;
use salonbook_config::AppConfig;
use salonbook_slots::{
    parse_date_key, RandomSelector, SchedulingPolicy, StaffChoice, TimeOfDay, VenueKind,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Header carrying the logged-in customer's id.
pub const CUSTOMER_ID_HEADER: &str = "x-customer-id";

/// Shared state of the booking routes.
#[derive(Clone)]
pub struct BookingState {
    pub backend: Arc<dyn BookingBackend>,
    pub policy: SchedulingPolicy,
    pub time_zone: Tz,
}

impl BookingState {
    pub fn from_config(config: &AppConfig) -> Result<Self, BookingError> {
        let policy = scheduling_policy(&config.scheduling)?;
        let backend = HttpBookingBackend::new(
            &config.backend,
            policy.default_booking_duration_minutes,
        )?;
        Ok(Self {
            backend: Arc::new(backend),
            policy,
            time_zone: venue_time_zone(&config.scheduling)?,
        })
    }

    pub fn now(&self) -> NaiveDateTime {
        venue_now(self.time_zone)
    }
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SlotsQuery {
    pub venue_type: VenueKind,
    pub venue_id: String,
    /// YYYY-MM-DD or DD-MM-YYYY
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05"))]
    pub date: String,
    /// Comma separated service ids
    #[cfg_attr(feature = "openapi", schema(example = "svc-cut,svc-wash"))]
    pub services: String,
    /// Staff id, or "any" (the default)
    #[serde(default)]
    pub staff: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookSlotRequest {
    pub venue_type: VenueKind,
    pub venue_id: String,
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "10:30"))]
    pub start_time: String,
    pub services: Vec<String>,
    #[serde(default)]
    pub staff: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    pub appointment_id: Option<String>,
    pub employee_id: String,
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "10:30"))]
    pub start_time: String,
    pub payment_id: String,
    pub message: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RescheduleSlotRequest {
    pub venue_type: VenueKind,
    pub venue_id: String,
    pub appointment_id: String,
    pub new_date: String,
    pub new_start_time: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RescheduleResponse {
    pub success: bool,
    pub appointment_id: String,
    pub message: String,
}

/// Reads `Authorization: Bearer <token>` and the customer id header. Missing
/// values become empty strings and are rejected by the flow.
pub fn auth_from_headers(headers: &HeaderMap) -> AuthContext {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .trim()
            .to_string()
    };
    let authorization = header(AUTHORIZATION.as_str());
    let token = match authorization.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim().to_string(),
        _ => authorization,
    };
    AuthContext::new(header(CUSTOMER_ID_HEADER), token)
}

fn split_services(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_start(raw: &str) -> Result<TimeOfDay, BookingError> {
    Ok(TimeOfDay::parse(raw)?)
}

/// Handler for the labelled slot grid of one venue and date.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/slots",
    params(SlotsQuery),
    responses(
        (status = 200, description = "Labelled candidate start times", body = SlotsResponse),
        (status = 400, description = "Invalid date, unknown service or no service selected"),
        (status = 502, description = "Booking backend unavailable")
    ),
    tag = "Booking"
))]
pub async fn get_slots_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, SalonbookError> {
    let request = SlotsRequest {
        venue: VenueRef::new(query.venue_type, query.venue_id),
        date: parse_date_key(&query.date).map_err(BookingError::from)?,
        services: split_services(&query.services),
        staff: StaffChoice::from_param(query.staff.as_deref()),
    };
    let response = compute_slots(state.backend.as_ref(), &state.policy, &request, state.now()).await?;
    Ok(Json(response))
}

/// Handler to book a slot. "Any professional" is resolved here against
/// freshly fetched bookings.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/book",
    request_body = BookSlotRequest,
    params(
        ("Authorization" = String, Header, description = "Bearer token of the logged-in customer"),
        ("X-Customer-Id" = String, Header, description = "Id of the logged-in customer")
    ),
    responses(
        (status = 200, description = "Booking accepted", body = BookingResponse),
        (status = 400, description = "Invalid request, closed day or time outside opening hours"),
        (status = 401, description = "Customer is not logged in"),
        (status = 409, description = "No professional free at that time, or the backend rejected the booking"),
        (status = 502, description = "Booking backend unavailable")
    ),
    tag = "Booking"
))]
pub async fn book_slot_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
    Json(payload): Json<BookSlotRequest>,
) -> Result<Json<BookingResponse>, SalonbookError> {
    let auth = auth_from_headers(&headers);
    let draft = BookingDraft {
        venue: VenueRef::new(payload.venue_type, payload.venue_id),
        date: parse_date_key(&payload.date).map_err(BookingError::from)?,
        start: parse_start(&payload.start_time)?,
        services: payload.services,
        staff: StaffChoice::from_param(payload.staff.as_deref()),
    };
    let mut selector = RandomSelector::<StdRng>::from_entropy();
    let outcome = submit_booking(
        state.backend.as_ref(),
        &state.policy,
        &auth,
        &draft,
        &mut selector,
        state.now(),
    )
    .await?;

    info!("Booking confirmed with {}", outcome.request.employee_id);
    Ok(Json(BookingResponse {
        success: true,
        appointment_id: outcome.ack.appointment_id,
        employee_id: outcome.request.employee_id,
        date: outcome.request.date.to_string(),
        start_time: outcome.request.start_time.to_string(),
        payment_id: outcome.request.payment_id,
        message: outcome
            .ack
            .message
            .unwrap_or_else(|| "Appointment booked successfully.".to_string()),
    }))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/reschedule",
    request_body = RescheduleSlotRequest,
    responses(
        (status = 200, description = "Appointment moved", body = RescheduleResponse),
        (status = 401, description = "Customer is not logged in"),
        (status = 409, description = "The backend rejected the new time")
    ),
    tag = "Booking"
))]
pub async fn reschedule_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
    Json(payload): Json<RescheduleSlotRequest>,
) -> Result<Json<RescheduleResponse>, SalonbookError> {
    let auth = auth_from_headers(&headers);
    let draft = RescheduleDraft {
        venue: VenueRef::new(payload.venue_type, payload.venue_id),
        appointment_id: payload.appointment_id,
        new_date: parse_date_key(&payload.new_date).map_err(BookingError::from)?,
        new_start: parse_start(&payload.new_start_time)?,
    };
    let ack = reschedule_booking(state.backend.as_ref(), &auth, &draft).await?;
    Ok(Json(RescheduleResponse {
        success: true,
        appointment_id: ack.appointment_id.unwrap_or(draft.appointment_id),
        message: ack
            .message
            .unwrap_or_else(|| "Appointment rescheduled successfully.".to_string()),
    }))
}
