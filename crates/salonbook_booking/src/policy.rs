// --- File: crates/salonbook_booking/src/policy.rs ---
//! Turns the loaded configuration into engine settings.
use crate::error::BookingError;
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use salonbook_config::{DateKeyStyle, MissingWeekdayPolicy, SchedulingConfig};
use salonbook_slots::{DateKeyFormat, DayWindow, MissingWeekday, SchedulingPolicy, TimeOfDay};
use std::str::FromStr;

/// Builds the engine policy from `[scheduling]`.
pub fn scheduling_policy(config: &SchedulingConfig) -> Result<SchedulingPolicy, BookingError> {
    let open = parse_config_time("scheduling.fallback_open", &config.fallback_open)?;
    let close = parse_config_time("scheduling.fallback_close", &config.fallback_close)?;
    if close <= open {
        return Err(BookingError::Config(format!(
            "scheduling.fallback_close ({close}) must be after fallback_open ({open})"
        )));
    }
    if config.probe_step_minutes == 0 {
        return Err(BookingError::Config(
            "scheduling.probe_step_minutes must be greater than zero".to_string(),
        ));
    }

    Ok(SchedulingPolicy {
        fallback_window: DayWindow { open, close },
        missing_weekday: match config.missing_weekday {
            MissingWeekdayPolicy::Fallback => MissingWeekday::Fallback,
            MissingWeekdayPolicy::Closed => MissingWeekday::Closed,
        },
        probe_step_minutes: config.probe_step_minutes,
        same_day_buffer_minutes: config.same_day_buffer_minutes,
        default_booking_duration_minutes: config.default_booking_duration_minutes,
    })
}

fn parse_config_time(key: &str, value: &str) -> Result<TimeOfDay, BookingError> {
    TimeOfDay::parse(value).map_err(|e| BookingError::Config(format!("{key}: {e}")))
}

/// The venues' time zone, e.g. `Asia/Kolkata`.
pub fn venue_time_zone(config: &SchedulingConfig) -> Result<Tz, BookingError> {
    Tz::from_str(config.time_zone.trim()).map_err(|_| {
        BookingError::Config(format!(
            "scheduling.time_zone '{}' is not a known IANA zone",
            config.time_zone
        ))
    })
}

/// Current wall-clock time at the venues.
pub fn venue_now(time_zone: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&time_zone).naive_local()
}

pub fn date_key_format(style: DateKeyStyle) -> DateKeyFormat {
    match style {
        DateKeyStyle::Iso => DateKeyFormat::Iso,
        DateKeyStyle::DayFirst => DateKeyFormat::DayFirst,
    }
}
