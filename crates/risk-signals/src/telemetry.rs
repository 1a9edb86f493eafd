//! Tracing setup. The output format follows the runtime environment:
//! development gets pretty multi-line events with targets, test and
//! production get compact single-line records without ANSI escapes.

use crate::config::{AppEnvironment, TelemetryConfig};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    Directives { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Directives { value, .. } => {
                write!(f, "invalid log filter directives '{value}'")
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Directives { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

fn parse_directives(value: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(value).map_err(|source| TelemetryError::Directives {
        value: value.to_string(),
        source,
    })
}

/// Install the global subscriber. `RUST_LOG` wins when set; otherwise the
/// configured level applies to the whole service.
pub fn init(environment: AppEnvironment, config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_directives(&config.log_level)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match environment {
        AppEnvironment::Development => builder
            .pretty()
            .with_target(true)
            .try_init()
            .map_err(TelemetryError::Subscriber),
        AppEnvironment::Test | AppEnvironment::Production => builder
            .compact()
            .with_target(false)
            .with_ansi(false)
            .try_init()
            .map_err(TelemetryError::Subscriber),
    }
}
