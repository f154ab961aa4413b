// --- File: crates/salonbook_slots/src/time.rs ---
//! Minute-of-day arithmetic and date key handling.
use crate::error::SlotError;
use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time as minutes since midnight, `00:00` through `24:00`.
///
/// `24:00` only makes sense as a closing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Values past the end of the day are clamped to `24:00`.
    pub const fn saturating(minutes: u32) -> Self {
        if minutes > MINUTES_PER_DAY {
            Self(MINUTES_PER_DAY)
        } else {
            Self(minutes)
        }
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::from_minutes(hour * 60 + minute)
    }

    /// Drops seconds.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self(time.hour() * 60 + time.minute())
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn round_up_to(self, step: u32) -> Self {
        Self::saturating(round_up_to_step(self.0, step))
    }

    /// Accepts `HH:MM`, `H:MM` and `HH:MM:SS` (seconds are dropped).
    pub fn parse(input: &str) -> Result<Self, SlotError> {
        let invalid = || SlotError::InvalidTime(input.to_string());
        let mut parts = input.trim().split(':');
        let hour: u32 = parts
            .next()
            .filter(|h| !h.is_empty() && h.len() <= 2)
            .and_then(|h| h.parse().ok())
            .ok_or_else(invalid)?;
        let minute: u32 = parts
            .next()
            .filter(|m| m.len() == 2)
            .and_then(|m| m.parse().ok())
            .ok_or_else(invalid)?;
        if let Some(seconds) = parts.next() {
            let valid = seconds.len() == 2 && seconds.parse::<u32>().is_ok_and(|s| s < 60);
            if !valid {
                return Err(invalid());
            }
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Smallest multiple of `step` that is >= `minutes`. A zero step is a no-op.
pub fn round_up_to_step(minutes: u32, step: u32) -> u32 {
    if step == 0 {
        return minutes;
    }
    minutes.div_ceil(step) * step
}

/// Date key convention used by a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateKeyFormat {
    /// `YYYY-MM-DD`
    #[default]
    Iso,
    /// `DD-MM-YYYY`
    DayFirst,
}

impl DateKeyFormat {
    pub fn format(self, date: NaiveDate) -> String {
        match self {
            DateKeyFormat::Iso => date.format("%Y-%m-%d").to_string(),
            DateKeyFormat::DayFirst => date.format("%d-%m-%Y").to_string(),
        }
    }
}

/// Normalises a date key in either `YYYY-MM-DD` or `DD-MM-YYYY` form
/// (`/` separators are accepted too). An ISO datetime prefix such as
/// `2025-03-14T00:00:00.000Z` is reduced to its date part.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, SlotError> {
    let trimmed = key.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    let normalized = date_part.replace('/', "-");
    let year_first = normalized.split('-').next().is_some_and(|p| p.len() == 4);
    let pattern = if year_first { "%Y-%m-%d" } else { "%d-%m-%Y" };
    NaiveDate::parse_from_str(&normalized, pattern)
        .map_err(|_| SlotError::InvalidDate(key.to_string()))
}

/// English weekday names, case-insensitive; three-letter forms are accepted.
pub fn parse_weekday(name: &str) -> Result<Weekday, SlotError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Ok(Weekday::Mon),
        "tuesday" | "tue" => Ok(Weekday::Tue),
        "wednesday" | "wed" => Ok(Weekday::Wed),
        "thursday" | "thu" => Ok(Weekday::Thu),
        "friday" | "fri" => Ok(Weekday::Fri),
        "saturday" | "sat" => Ok(Weekday::Sat),
        "sunday" | "sun" => Ok(Weekday::Sun),
        _ => Err(SlotError::InvalidWeekday(name.to_string())),
    }
}
