//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Working-time rules.
    #[serde(default)]
    pub timesheet: TimesheetConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8777
}

fn default_request_timeout() -> u64 {
    30
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT settings as read from configuration sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiration in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    3600 // 1 hour
}

fn default_refresh_token_expiry() -> u64 {
    31_536_000 // 365 days
}

/// Working-time rules applied when computing required hours.
#[derive(Debug, Clone, Deserialize)]
pub struct TimesheetConfig {
    /// Hours required on every workday that is not on leave.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: Decimal,
}

impl Default for TimesheetConfig {
    fn default() -> Self {
        Self {
            hours_per_day: default_hours_per_day(),
        }
    }
}

fn default_hours_per_day() -> Decimal {
    Decimal::from(8)
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `TIMEKEEP__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TIMEKEEP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_from_environment_with_defaults() {
        temp_env::with_vars(
            [
                ("TIMEKEEP__DATABASE__URL", Some("postgres://localhost/timekeep")),
                ("TIMEKEEP__JWT__SECRET", Some("secret")),
                ("TIMEKEEP__SERVER__PORT", None),
                ("TIMEKEEP__TIMESHEET__HOURS_PER_DAY", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/timekeep");
                assert_eq!(config.server.port, 8777);
                assert_eq!(config.timesheet.hours_per_day, dec!(8));
                assert_eq!(config.jwt.access_token_expiry_secs, 3600);
            },
        );
    }

    #[test]
    fn test_environment_overrides_hours_per_day() {
        temp_env::with_vars(
            [
                ("TIMEKEEP__DATABASE__URL", Some("postgres://localhost/timekeep")),
                ("TIMEKEEP__JWT__SECRET", Some("secret")),
                ("TIMEKEEP__TIMESHEET__HOURS_PER_DAY", Some("7.5")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.timesheet.hours_per_day, dec!(7.5));
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars(
            [
                ("TIMEKEEP__DATABASE__URL", None::<&str>),
                ("TIMEKEEP__JWT__SECRET", Some("secret")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
