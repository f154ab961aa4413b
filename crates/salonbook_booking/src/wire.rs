// --- File: crates/salonbook_booking/src/wire.rs ---
//! Backend payloads and their conversion into validated engine types.
//!
//! The backend is loosely shaped: staff ids arrive as `empid`, `staffId` or
//! `_id`, prices as numbers or numeric strings, date keys in either
//! convention. Everything is normalised here so the engine can assume
//! well-formed data.
use crate::error::BookingError;
use crate::models::BackendAck;
use salonbook_slots::{
    parse_date_key, parse_weekday, Booking, BookingCalendar, DayCalendar, DayTiming, Service,
    SlotError, StaffMember, TimeOfDay, Venue, VenueKind, MINUTES_PER_DAY,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

/// A number that may be sent as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Whole, non-negative minutes, at most one day.
    pub fn as_minutes(&self) -> Option<u32> {
        let value = self.as_f64()?;
        (value >= 0.0 && value.fract() == 0.0 && value <= f64::from(MINUTES_PER_DAY))
            .then_some(value as u32)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingPayload {
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
    #[serde(default = "default_true")]
    pub is_open: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default, rename = "_id")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub price: Numeric,
    #[serde(alias = "durationMinutes")]
    pub duration: Numeric,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    #[serde(default)]
    pub empid: Option<String>,
    #[serde(default)]
    pub staff_id: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(alias = "start", alias = "time")]
    pub start_time: String,
    #[serde(default)]
    pub duration: Option<Numeric>,
    #[serde(default)]
    pub appointment_id: Option<String>,
    #[serde(default, rename = "_id")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenuePayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "_id")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<VenueKind>,
    #[serde(default)]
    pub timings: HashMap<String, TimingPayload>,
    #[serde(default)]
    pub services: Vec<ServicePayload>,
    #[serde(default)]
    pub slots_by_date: HashMap<String, Vec<BookingPayload>>,
}

/// A staff member's service entry: a bare id or an object carrying one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StaffServiceRef {
    Id(String),
    Object {
        #[serde(default, rename = "serviceId")]
        service_id: Option<String>,
        #[serde(default, rename = "_id")]
        object_id: Option<String>,
        #[serde(default)]
        id: Option<String>,
    },
}

impl StaffServiceRef {
    fn into_id(self) -> Option<String> {
        match self {
            StaffServiceRef::Id(id) => Some(id),
            StaffServiceRef::Object {
                service_id,
                object_id,
                id,
            } => service_id.or(id).or(object_id),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPayload {
    #[serde(default)]
    pub empid: Option<String>,
    #[serde(default)]
    pub staff_id: Option<String>,
    #[serde(default, rename = "_id")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub experience: Option<Value>,
    #[serde(default)]
    pub services: Vec<StaffServiceRef>,
}

/// Roster responses come either bare or wrapped.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RosterPayload {
    List(Vec<StaffPayload>),
    Wrapped {
        #[serde(alias = "staff", alias = "data")]
        employees: Vec<StaffPayload>,
    },
}

/// Per-date booking responses come either bare or wrapped.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BookingsPayload {
    List(Vec<BookingPayload>),
    Wrapped {
        #[serde(alias = "slots", alias = "appointments", alias = "data")]
        bookings: Vec<BookingPayload>,
    },
}

/// Bad times, weekdays or date keys in backend data are the backend's fault,
/// not the caller's.
fn malformed(err: SlotError) -> BookingError {
    BookingError::Parse(err.to_string())
}

fn first_present(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

fn is_cancelled(status: Option<&str>) -> bool {
    status.is_some_and(|s| {
        let s = s.trim();
        s.eq_ignore_ascii_case("cancelled") || s.eq_ignore_ascii_case("canceled")
    })
}

impl ServicePayload {
    pub fn into_service(self) -> Result<Service, BookingError> {
        let id = first_present([self.service_id, self.id, self.object_id])
            .ok_or_else(|| BookingError::Parse("service without an id".to_string()))?;
        let price = self.price.as_f64().ok_or_else(|| {
            BookingError::Parse(format!("service {id} has a non-numeric price {:?}", self.price))
        })?;
        let duration_minutes = self.duration.as_minutes().ok_or_else(|| {
            BookingError::Parse(format!(
                "service {id} has an invalid duration {:?}",
                self.duration
            ))
        })?;
        Ok(Service {
            id,
            name: self.name,
            price,
            duration_minutes,
        })
    }
}

impl BookingPayload {
    /// `None` for cancelled entries, which do not block anyone.
    pub fn into_booking(self, default_duration: u32) -> Result<Option<Booking>, BookingError> {
        if is_cancelled(self.status.as_deref()) {
            return Ok(None);
        }
        let staff_id = first_present([self.empid, self.staff_id, self.employee_id])
            .ok_or_else(|| BookingError::Parse("booking without a staff id".to_string()))?;
        let start = TimeOfDay::parse(&self.start_time).map_err(malformed)?;
        let duration_minutes = match &self.duration {
            None => default_duration,
            Some(value) => value.as_minutes().ok_or_else(|| {
                BookingError::Parse(format!(
                    "booking for {staff_id} at {start} has an invalid duration {value:?}"
                ))
            })?,
        };
        Ok(Some(Booking {
            staff_id,
            start,
            duration_minutes,
            appointment_id: first_present([self.appointment_id, self.object_id]),
        }))
    }
}

/// Converts a list of booking payloads into one day's calendar.
pub fn day_calendar_from(
    payloads: Vec<BookingPayload>,
    default_duration: u32,
) -> Result<DayCalendar, BookingError> {
    let mut bookings = Vec::with_capacity(payloads.len());
    for payload in payloads {
        if let Some(booking) = payload.into_booking(default_duration)? {
            bookings.push(booking);
        }
    }
    Ok(DayCalendar::from_bookings(bookings))
}

impl BookingsPayload {
    pub fn into_day(self, default_duration: u32) -> Result<DayCalendar, BookingError> {
        let payloads = match self {
            BookingsPayload::List(list) => list,
            BookingsPayload::Wrapped { bookings } => bookings,
        };
        day_calendar_from(payloads, default_duration)
    }
}

impl StaffPayload {
    pub fn into_member(self) -> Result<StaffMember, BookingError> {
        let id = first_present([self.empid, self.staff_id, self.id, self.object_id])
            .ok_or_else(|| BookingError::Parse(format!("staff member '{}' has no id", self.name)))?;
        let experience = match self.experience {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        let capabilities = self
            .services
            .into_iter()
            .filter_map(StaffServiceRef::into_id)
            .collect();
        Ok(StaffMember {
            id,
            name: self.name,
            role: self.role,
            experience,
            capabilities,
        })
    }
}

impl RosterPayload {
    pub fn into_roster(self) -> Result<Vec<StaffMember>, BookingError> {
        let payloads = match self {
            RosterPayload::List(list) => list,
            RosterPayload::Wrapped { employees } => employees,
        };
        payloads.into_iter().map(StaffPayload::into_member).collect()
    }
}

impl VenuePayload {
    /// `kind` is the type the venue was requested as; a payload that states a
    /// different type is rejected.
    pub fn into_venue(self, kind: VenueKind, default_duration: u32) -> Result<Venue, BookingError> {
        if let Some(stated) = self.kind {
            if stated != kind {
                return Err(BookingError::Parse(format!(
                    "requested a {kind} but the backend returned a {stated}"
                )));
            }
        }
        let id = first_present([self.id, self.object_id])
            .ok_or_else(|| BookingError::Parse("venue without an id".to_string()))?;

        let mut timings = HashMap::with_capacity(self.timings.len());
        for (day, timing) in self.timings {
            match parse_weekday(&day) {
                Ok(weekday) => {
                    timings.insert(weekday, timing_from(&day, timing)?);
                }
                Err(_) => warn!("Ignoring timing row '{}' of venue {}", day, id),
            }
        }

        let services = self
            .services
            .into_iter()
            .map(ServicePayload::into_service)
            .collect::<Result<Vec<_>, _>>()?;

        // Keys in both conventions may name the same date. A date with a
        // malformed entry is left out, so it is fetched per date later.
        let mut by_date: BTreeMap<_, Vec<Booking>> = BTreeMap::new();
        let mut broken = BTreeSet::new();
        for (key, payloads) in self.slots_by_date {
            let date = match parse_date_key(&key) {
                Ok(date) => date,
                Err(_) => {
                    warn!("Venue {} lists bookings under an unreadable date '{}'", id, key);
                    continue;
                }
            };
            let parsed: Result<Vec<_>, _> = payloads
                .into_iter()
                .map(|payload| payload.into_booking(default_duration))
                .collect();
            match parsed {
                Ok(entries) => by_date
                    .entry(date)
                    .or_default()
                    .extend(entries.into_iter().flatten()),
                Err(e) => {
                    warn!("Dropping embedded bookings of venue {} on {}: {}", id, date, e);
                    broken.insert(date);
                }
            }
        }
        let mut bookings = BookingCalendar::new();
        for (date, entries) in by_date {
            if !broken.contains(&date) {
                bookings.set_day(date, DayCalendar::from_bookings(entries));
            }
        }

        debug!(
            "Parsed venue {} with {} timing rows and {} services",
            id,
            timings.len(),
            services.len()
        );
        Ok(Venue {
            id,
            name: self.name,
            kind,
            timings,
            services,
            bookings,
        })
    }
}

fn timing_from(day: &str, timing: TimingPayload) -> Result<DayTiming, BookingError> {
    if !timing.is_open {
        return Ok(DayTiming {
            open: TimeOfDay::MIDNIGHT,
            close: TimeOfDay::MIDNIGHT,
            is_open: false,
        });
    }
    let parse = |value: Option<String>, which: &str| -> Result<TimeOfDay, BookingError> {
        let raw = value.ok_or_else(|| {
            BookingError::Parse(format!("{day} is open but has no {which} time"))
        })?;
        TimeOfDay::parse(&raw).map_err(malformed)
    };
    Ok(DayTiming {
        open: parse(timing.open, "open")?,
        close: parse(timing.close, "close")?,
        is_open: true,
    })
}

/// Error text for a non-2xx backend response: the body's `message`, then its
/// `error`, then the raw body.
pub fn backend_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let text = value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| value.get("error").and_then(Value::as_str))
            .or_else(|| {
                value
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
            });
        if let Some(text) = text {
            return text.to_string();
        }
    }
    let raw = body.trim();
    if raw.is_empty() {
        warn!("Backend returned status {} with an empty body", status);
        format!("Request failed with status {status}")
    } else {
        raw.to_string()
    }
}

/// Reads the appointment id and message out of a success response. Unknown
/// or empty bodies give an empty acknowledgement.
pub fn parse_ack(body: &str) -> BackendAck {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return BackendAck::default();
    };
    let text = |v: Option<&Value>| v.and_then(Value::as_str).map(str::to_string);
    let appointment = value.get("appointment").or_else(|| value.get("data"));
    let appointment_id = text(value.get("appointmentId"))
        .or_else(|| text(appointment.and_then(|a| a.get("_id"))))
        .or_else(|| text(appointment.and_then(|a| a.get("id"))))
        .or_else(|| text(value.get("_id")))
        .or_else(|| text(value.get("id")));
    BackendAck {
        appointment_id,
        message: text(value.get("message")),
    }
}
