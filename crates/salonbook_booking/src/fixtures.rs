// --- File: crates/salonbook_booking/src/fixtures.rs ---
//! Builders shared by the unit tests of this crate.
use crate::models::AuthContext;
use crate::service::MockBookingBackend;
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use salonbook_slots::{
    Booking, BookingCalendar, DayCalendar, DayTiming, Service, StaffMember, TimeOfDay, Venue,
    VenueKind,
};

pub fn t(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::from_hm(hour, minute).unwrap()
}

/// Monday 5 May 2025.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
}

pub fn the_week_before() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 4, 28)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub fn auth() -> AuthContext {
    AuthContext::new("cust-1", "token-abc")
}

fn service(id: &str, price: f64, duration_minutes: u32) -> Service {
    Service {
        id: id.to_string(),
        name: id.trim_start_matches("svc-").to_string(),
        price,
        duration_minutes,
    }
}

/// Open 10:00-20:00 every day; offers a 30 minute cut and a 60 minute colour.
pub fn glow_studio() -> Venue {
    let timings = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .map(|day| {
        (
            day,
            DayTiming {
                open: t(10, 0),
                close: t(20, 0),
                is_open: true,
            },
        )
    })
    .collect();
    Venue {
        id: "salon-1".to_string(),
        name: "Glow Studio".to_string(),
        kind: VenueKind::Salon,
        timings,
        services: vec![
            service("svc-cut", 300.0, 30),
            service("svc-color", 1200.0, 60),
        ],
        bookings: BookingCalendar::new(),
    }
}

fn member(id: &str, capabilities: &[&str]) -> StaffMember {
    StaffMember {
        id: id.to_string(),
        name: format!("Staff {id}"),
        role: "Stylist".to_string(),
        experience: None,
        capabilities: capabilities.iter().map(|s| s.to_string()).collect(),
    }
}

/// `emp-1` cuts and colours, `emp-2` only cuts.
pub fn roster() -> Vec<StaffMember> {
    vec![
        member("emp-1", &["svc-cut", "svc-color"]),
        member("emp-2", &["svc-cut"]),
    ]
}

pub fn booking(staff_id: &str, start: TimeOfDay, duration_minutes: u32) -> Booking {
    Booking {
        staff_id: staff_id.to_string(),
        start,
        duration_minutes,
        appointment_id: None,
    }
}

/// Both stylists busy from 10:00, `emp-1` until 11:00 and `emp-2` until 10:30.
pub fn busy_morning() -> DayCalendar {
    DayCalendar::from_bookings([
        booking("emp-1", t(10, 0), 60),
        booking("emp-2", t(10, 0), 30),
    ])
}

/// A backend serving `venue`, the standard roster and `calendar` for any
/// date. Writes are left to the individual test.
pub fn backend_serving(venue: Venue, calendar: DayCalendar) -> MockBookingBackend {
    let mut backend = MockBookingBackend::new();
    backend
        .expect_fetch_venue()
        .returning(move |_| Ok(venue.clone()));
    backend.expect_fetch_staff().returning(|_| Ok(roster()));
    backend
        .expect_fetch_bookings()
        .returning(move |_, _| Ok(calendar.clone()));
    backend
}
