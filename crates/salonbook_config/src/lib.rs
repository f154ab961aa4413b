// --- File: crates/salonbook_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File, FileFormat};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub mod models;
pub use models::*;

/// Prefix for environment overrides, e.g. `APP__BACKEND__BASE_URL`.
pub const DEFAULT_PREFIX: &str = "APP";

/// Loads the application configuration.
///
/// Sources, later ones winning:
/// 1. `config/default.{toml,yaml,json}`
/// 2. `config/{RUN_ENV}.{toml,yaml,json}` (`RUN_ENV` defaults to `debug`)
/// 3. environment variables prefixed with `APP` using `__` as separator
///
/// The directory can be moved with `CONFIG_DIR`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());
    let config_dir = PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Parses a TOML document into an `AppConfig`, applying the same defaults and
/// validation as [`load_config`]. Used by tests and tooling.
pub fn load_config_from_str(toml: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    config.validate()?;
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment exactly once.
///
/// `DOTENV_OVERRIDE` selects another file; a first CLI argument starting with
/// `.env` is honoured as well. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 8086

        [backend]
        base_url = "http://localhost:5000"
    "#;

    #[test]
    fn test_minimal_config_gets_scheduling_defaults() {
        let config = load_config_from_str(MINIMAL).expect("minimal config should load");
        assert_eq!(config.server.port, 8086);
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.backend.date_key_format, DateKeyStyle::Iso);
        assert_eq!(config.scheduling.fallback_open, "10:00");
        assert_eq!(config.scheduling.fallback_close, "20:00");
        assert_eq!(config.scheduling.missing_weekday, MissingWeekdayPolicy::Fallback);
        assert_eq!(config.scheduling.probe_step_minutes, 15);
        assert_eq!(config.scheduling.same_day_buffer_minutes, 15);
        assert_eq!(config.scheduling.default_booking_duration_minutes, 30);
        assert_eq!(config.scheduling.time_zone, "UTC");
    }

    #[test]
    fn test_scheduling_overrides() {
        let toml = format!(
            "{MINIMAL}\n[scheduling]\nmissing_weekday = \"closed\"\nprobe_step_minutes = 10\ntime_zone = \"Asia/Kolkata\"\n"
        );
        let config = load_config_from_str(&toml).expect("config should load");
        assert_eq!(config.scheduling.missing_weekday, MissingWeekdayPolicy::Closed);
        assert_eq!(config.scheduling.probe_step_minutes, 10);
        assert_eq!(config.scheduling.time_zone, "Asia/Kolkata");
        // untouched fields keep their defaults
        assert_eq!(config.scheduling.same_day_buffer_minutes, 15);
    }

    #[test]
    fn test_zero_probe_step_is_rejected() {
        let toml = format!("{MINIMAL}\n[scheduling]\nprobe_step_minutes = 0\n");
        let err = load_config_from_str(&toml).unwrap_err();
        assert!(err.to_string().contains("probe_step_minutes"));
    }

    #[test]
    fn test_missing_backend_section_fails() {
        let toml = "[server]\nhost = \"0.0.0.0\"\nport = 1\n";
        assert!(load_config_from_str(toml).is_err());
    }
}
