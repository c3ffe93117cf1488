use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("APP_LOG_LEVEL '{directive}' is not a valid tracing filter: {source}")]
    InvalidFilter {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// `RUST_LOG` wins when it parses; otherwise the configured level applies.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::InvalidFilter {
        directive: config.log_level.clone(),
        source,
    })
}

/// Install the global subscriber. Logs go to stderr so command output stays parseable.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_level_names_the_directive() {
        std::env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "pickup_match=[".to_string(),
        };

        match env_filter(&config) {
            Err(err @ TelemetryError::InvalidFilter { .. }) => {
                assert!(err.to_string().starts_with("APP_LOG_LEVEL 'pickup_match=['"));
            }
            other => panic!("expected filter error, got {other:?}"),
        }
    }

    #[test]
    fn configured_level_applies_without_rust_log() {
        std::env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "pickup_match=debug,warn".to_string(),
        };

        let filter = env_filter(&config).expect("filter parses");
        assert!(filter.to_string().contains("pickup_match=debug"));
    }
}
