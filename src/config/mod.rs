use std::env;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DEFAULT_NATIONALITY_WILDCARDS: [&str; 2] = ["all", "todos"];

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
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat(raw))?,
            Err(_) => LogFormat::Compact,
        };

        let nationality_wildcards = match env::var("MATCH_NATIONALITY_WILDCARDS") {
            Ok(raw) => parse_list(&raw),
            Err(_) => MatchingConfig::default().nationality_wildcards,
        };

        let match_additional_citizenship = match env::var("MATCH_ADDITIONAL_CITIZENSHIP") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidBoolean {
                key: "MATCH_ADDITIONAL_CITIZENSHIP",
                value: raw,
            })?,
            Err(_) => false,
        };

        let reference_date = match env::var("MATCH_REFERENCE_DATE") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|source| ConfigError::InvalidDate { value: raw, source })?,
            ),
            _ => None,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level, format },
            matching: MatchingConfig {
                nationality_wildcards,
                match_additional_citizenship,
                reference_date,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Policy dials for the eligibility engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Tokens in a nationality list that mean "open to every country". They extend the
    /// built-in `all` wildcard, which cannot be switched off.
    pub nationality_wildcards: Vec<String>,
    /// Let secondary citizenships satisfy the nationality criterion.
    pub match_additional_citizenship: bool,
    /// Fixed evaluation date; `None` means the local calendar date.
    pub reference_date: Option<NaiveDate>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            nationality_wildcards: DEFAULT_NATIONALITY_WILDCARDS
                .iter()
                .map(|token| token.to_string())
                .collect(),
            match_additional_citizenship: false,
            reference_date: None,
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLogFormat(String),
    InvalidBoolean {
        key: &'static str,
        value: String,
    },
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'json' (found '{value}')")
            }
            ConfigError::InvalidBoolean { key, value } => {
                write!(f, "{key} must be true or false (found '{value}')")
            }
            ConfigError::InvalidDate { value, .. } => {
                write!(f, "MATCH_REFERENCE_DATE must be YYYY-MM-DD (found '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidLogFormat(_) | ConfigError::InvalidBoolean { .. } => None,
            ConfigError::InvalidDate { source, .. } => Some(source),
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
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_LOG_FORMAT");
        env::remove_var("MATCH_NATIONALITY_WILDCARDS");
        env::remove_var("MATCH_ADDITIONAL_CITIZENSHIP");
        env::remove_var("MATCH_REFERENCE_DATE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert_eq!(config.matching, MatchingConfig::default());
        assert_eq!(config.matching.nationality_wildcards, vec!["all", "todos"]);
    }

    #[test]
    fn reads_matching_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("APP_LOG_FORMAT", "JSON");
        env::set_var("MATCH_NATIONALITY_WILDCARDS", " any , , worldwide");
        env::set_var("MATCH_ADDITIONAL_CITIZENSHIP", "yes");
        env::set_var("MATCH_REFERENCE_DATE", "2025-03-01");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.telemetry.format, LogFormat::Json);
        assert_eq!(
            config.matching.nationality_wildcards,
            vec!["any".to_string(), "worldwide".to_string()]
        );
        assert!(config.matching.match_additional_citizenship);
        assert_eq!(
            config.matching.reference_date,
            Some(NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"))
        );
    }

    #[test]
    fn rejects_malformed_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MATCH_REFERENCE_DATE", "01/03/2025");
        let err = AppConfig::load().expect_err("date must be ISO formatted");
        assert!(matches!(err, ConfigError::InvalidDate { .. }));

        reset_env();
        env::set_var("MATCH_ADDITIONAL_CITIZENSHIP", "maybe");
        let err = AppConfig::load().expect_err("flag must be boolean");
        assert!(err.to_string().contains("MATCH_ADDITIONAL_CITIZENSHIP"));

        reset_env();
        env::set_var("APP_LOG_FORMAT", "xml");
        let err = AppConfig::load().expect_err("unknown log format");
        assert!(matches!(err, ConfigError::InvalidLogFormat(value) if value == "xml"));
        reset_env();
    }
}
