//! Process configuration read from environment variables.

use crate::error::AppError;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

/// Configuration of one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Log output format (`ROSEBLOOM_LOG_FORMAT`).
    pub log_format: LogFormat,
    /// Print every stage event as a JSON line (`ROSEBLOOM_EMIT_EVENTS`).
    pub emit_events: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            emit_events: false,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an unsupported value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an unsupported value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let log_format = match lookup("ROSEBLOOM_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") => defaults.log_format,
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(value) if value.eq_ignore_ascii_case("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "ROSEBLOOM_LOG_FORMAT must be json or pretty, got {other:?}"
                )));
            }
        };

        let emit_events = match lookup("ROSEBLOOM_EMIT_EVENTS") {
            None => defaults.emit_events,
            Some(value) => value.trim().parse::<bool>().map_err(|e| {
                AppError::Config(format!("ROSEBLOOM_EMIT_EVENTS must be true or false: {e}"))
            })?,
        };

        Ok(Self {
            log_format,
            emit_events,
        })
    }
}
