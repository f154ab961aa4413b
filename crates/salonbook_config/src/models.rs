// --- File: crates/salonbook_config/src/models.rs ---

use config::ConfigError;
use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which date key convention the booking backend expects on outbound calls.
/// Inbound keys are accepted in either form.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateKeyStyle {
    /// `YYYY-MM-DD`
    #[default]
    Iso,
    /// `DD-MM-YYYY`
    DayFirst,
}

// --- Booking Backend Config ---
// Venue, staff and appointment data are owned by this service.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    pub base_url: String, // Mandatory, e.g. APP__BACKEND__BASE_URL
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub date_key_format: DateKeyStyle,
}

/// What to do when a venue's timing table has no entry for the requested weekday.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingWeekdayPolicy {
    /// Use the fallback window (10:00-20:00 unless configured otherwise).
    #[default]
    Fallback,
    /// Treat the day as closed.
    Closed,
}

// --- Scheduling Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulingConfig {
    #[serde(default = "default_fallback_open")]
    pub fallback_open: String,
    #[serde(default = "default_fallback_close")]
    pub fallback_close: String,
    #[serde(default)]
    pub missing_weekday: MissingWeekdayPolicy,
    /// Step used to probe past an active booking and to round the same-day cutoff.
    #[serde(default = "default_fifteen")]
    pub probe_step_minutes: u32,
    /// Minimum lead time for same-day bookings.
    #[serde(default = "default_fifteen")]
    pub same_day_buffer_minutes: u32,
    /// Duration assumed for existing bookings that do not carry one.
    #[serde(default = "default_booking_duration")]
    pub default_booking_duration_minutes: u32,
    /// IANA time zone of the venues, used to derive "today" and "now".
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            fallback_open: default_fallback_open(),
            fallback_close: default_fallback_close(),
            missing_weekday: MissingWeekdayPolicy::default(),
            probe_step_minutes: default_fifteen(),
            same_day_buffer_minutes: default_fifteen(),
            default_booking_duration_minutes: default_booking_duration(),
            time_zone: default_time_zone(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}

impl AppConfig {
    /// Rejects values that would stall the slot walk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduling.probe_step_minutes == 0 {
            return Err(ConfigError::Message(
                "scheduling.probe_step_minutes must be greater than zero".to_string(),
            ));
        }
        if self.scheduling.default_booking_duration_minutes == 0 {
            return Err(ConfigError::Message(
                "scheduling.default_booking_duration_minutes must be greater than zero"
                    .to_string(),
            ));
        }
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::Message("backend.base_url is empty".to_string()));
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_fallback_open() -> String {
    "10:00".to_string()
}

fn default_fallback_close() -> String {
    "20:00".to_string()
}

fn default_fifteen() -> u32 {
    15
}

fn default_booking_duration() -> u32 {
    30
}

fn default_time_zone() -> String {
    "UTC".to_string()
}
