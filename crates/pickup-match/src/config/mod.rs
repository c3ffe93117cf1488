use crate::workflows::recruitment::domain::{CapacityPolicy, ParseCapacityPolicyError};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub matching: MatchingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let capacity_policy = match env::var("APP_CAPACITY_POLICY") {
            Ok(raw) => raw
                .parse::<CapacityPolicy>()
                .map_err(|source| ConfigError::InvalidCapacityPolicy { source })?,
            Err(_) => CapacityPolicy::default(),
        };

        let roster_csv = env::var("APP_ROSTER_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            matching: MatchingConfig {
                capacity_policy,
                roster_csv,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Rules applied by the recruitment and application stores.
#[derive(Debug, Clone, Default)]
pub struct MatchingConfig {
    pub capacity_policy: CapacityPolicy,
    /// Optional CSV of postings loaded at startup.
    pub roster_csv: Option<PathBuf>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCapacityPolicy { source: ParseCapacityPolicyError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCapacityPolicy { source } => {
                write!(f, "APP_CAPACITY_POLICY is invalid: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidCapacityPolicy { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_CAPACITY_POLICY");
        env::remove_var("APP_ROSTER_CSV");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.matching.capacity_policy, CapacityPolicy::Overbook);
        assert!(config.matching.roster_csv.is_none());
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("APP_CAPACITY_POLICY", "hard-cap");
        env::set_var("APP_ROSTER_CSV", "fixtures/roster.csv");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.matching.capacity_policy, CapacityPolicy::HardCap);
        assert_eq!(
            config.matching.roster_csv,
            Some(PathBuf::from("fixtures/roster.csv"))
        );
        reset_env();
    }

    #[test]
    fn rejects_unknown_capacity_policy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_CAPACITY_POLICY", "sometimes");
        let error = AppConfig::load().expect_err("policy is invalid");
        assert!(error.to_string().contains("sometimes"));
        reset_env();
    }
}
