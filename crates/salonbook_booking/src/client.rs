// --- File: crates/salonbook_booking/src/client.rs ---
//! `reqwest` implementation of [`BookingBackend`].
use crate::error::BookingError;
use crate::models::{AuthContext, BackendAck, BookingRequest, RescheduleRequest, VenueRef};
use crate::policy::date_key_format;
use crate::service::BookingBackend;
use crate::wire::{backend_error_message, parse_ack, BookingsPayload, RosterPayload, VenuePayload};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use salonbook_common::create_client;
use salonbook_config::BackendConfig;
use salonbook_slots::{DateKeyFormat, DayCalendar, StaffMember, Venue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct HttpBookingBackend {
    client: Client,
    base_url: String,
    date_keys: DateKeyFormat,
    default_booking_duration: u32,
}

impl HttpBookingBackend {
    pub fn new(config: &BackendConfig, default_booking_duration: u32) -> Result<Self, BookingError> {
        let client = create_client(config.timeout_secs, true)
            .map_err(|e| BookingError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(
            client,
            &config.base_url,
            date_key_format(config.date_key_format),
            default_booking_duration,
        ))
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        date_keys: DateKeyFormat,
        default_booking_duration: u32,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            date_keys,
            default_booking_duration,
        }
    }

    fn venue_url(&self, venue: &VenueRef) -> String {
        format!("{}/api/{}/{}", self.base_url, venue.kind, venue.id)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, BookingError> {
        debug!("GET {}", url);
        let response = self.client.get(url).query(query).send().await?;
        let body = read_success(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        auth: &AuthContext,
        body: &B,
    ) -> Result<BackendAck, BookingError> {
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .bearer_auth(&auth.token)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = backend_error_message(status.as_u16(), &text);
            warn!("Backend rejected POST {} with {}: {}", url, status, message);
            return Err(BookingError::SubmissionRejected(message));
        }
        Ok(parse_ack(&text))
    }
}

async fn read_success(response: Response) -> Result<String, BookingError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        Ok(text)
    } else {
        Err(BookingError::Backend {
            status: Some(status.as_u16()),
            message: backend_error_message(status.as_u16(), &text),
        })
    }
}

#[async_trait]
impl BookingBackend for HttpBookingBackend {
    async fn fetch_venue(&self, venue: &VenueRef) -> Result<Venue, BookingError> {
        let payload: VenuePayload = self.get_json(&self.venue_url(venue), &[]).await?;
        payload.into_venue(venue.kind, self.default_booking_duration)
    }

    async fn fetch_staff(&self, venue: &VenueRef) -> Result<Vec<StaffMember>, BookingError> {
        let url = format!("{}/employees", self.venue_url(venue));
        let payload: RosterPayload = self.get_json(&url, &[]).await?;
        payload.into_roster()
    }

    async fn fetch_bookings(
        &self,
        venue: &VenueRef,
        date: NaiveDate,
    ) -> Result<DayCalendar, BookingError> {
        let url = format!("{}/slots", self.venue_url(venue));
        let key = self.date_keys.format(date);
        let payload: BookingsPayload = self.get_json(&url, &[("date", key)]).await?;
        payload.into_day(self.default_booking_duration)
    }

    async fn submit_booking(
        &self,
        auth: &AuthContext,
        request: &BookingRequest,
    ) -> Result<BackendAck, BookingError> {
        let url = format!("{}/api/appointments", self.base_url);
        let ack = self.post_json(&url, auth, request).await?;
        info!(
            "Backend accepted booking for {} at {} {} (appointment {:?})",
            request.employee_id, request.date, request.start_time, ack.appointment_id
        );
        Ok(ack)
    }

    async fn reschedule_booking(
        &self,
        auth: &AuthContext,
        request: &RescheduleRequest,
    ) -> Result<BackendAck, BookingError> {
        let url = format!("{}/api/appointments/reschedule", self.base_url);
        let ack = self.post_json(&url, auth, request).await?;
        info!(
            "Backend moved appointment {} to {} {}",
            request.appointment_id, request.new_date, request.new_start_time
        );
        Ok(ack)
    }
}
