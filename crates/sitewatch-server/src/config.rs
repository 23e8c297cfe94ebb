//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use sitewatch_alerts::AlertPolicy;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Synthetic detection feed settings.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Violation alerting policy.
    #[serde(default)]
    pub alerts: AlertPolicy,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Busy timeout for SQLite connections, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled SQLite connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "sitewatch_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Synthetic detection feed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Whether the synthetic feed runs at all. Disable when a real
    /// detector feed supplies events.
    #[serde(default = "default_generator_enabled")]
    pub enabled: bool,

    /// Seconds between synthesized detection events.
    #[serde(default = "default_generator_interval_secs")]
    pub interval_secs: u64,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    5000
}

fn default_db_path() -> String {
    "sitewatch.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_pool_max_size() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_generator_enabled() -> bool {
    true
}

fn default_generator_interval_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: default_generator_enabled(),
            interval_secs: default_generator_interval_secs(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `SITEWATCH_HOST` overrides `server.host`
/// - `SITEWATCH_PORT` overrides `server.port`
/// - `SITEWATCH_DB_PATH` overrides `database.path`
/// - `SITEWATCH_LOG_LEVEL` overrides `logging.level`
/// - `SITEWATCH_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `SITEWATCH_GENERATOR_ENABLED` overrides `generator.enabled`
/// - `SITEWATCH_GENERATOR_INTERVAL_SECS` overrides `generator.interval_secs`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(host) = std::env::var("SITEWATCH_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("SITEWATCH_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(db_path) = std::env::var("SITEWATCH_DB_PATH") {
        config.database.path = db_path;
    }
    if let Ok(level) = std::env::var("SITEWATCH_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("SITEWATCH_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Ok(enabled) = std::env::var("SITEWATCH_GENERATOR_ENABLED") {
        config.generator.enabled = enabled == "true" || enabled == "1";
    }
    if let Ok(interval) = std::env::var("SITEWATCH_GENERATOR_INTERVAL_SECS") {
        if let Ok(parsed) = interval.parse() {
            config.generator.interval_secs = parsed;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_reference_deployment() {
        let config = load_config(None).expect("defaults should load");

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.path, "sitewatch.db");
        assert!(config.generator.enabled);
        assert_eq!(config.generator.interval_secs, 10);
        assert_eq!(config.alerts.violation_threshold, 1);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let toml_src = r#"
            [server]
            port = 8080

            [generator]
            enabled = false

            [alerts]
            violation_threshold = 3
        "#;
        let config: Config = toml::from_str(toml_src).expect("should parse");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, default_host());
        assert!(!config.generator.enabled);
        assert_eq!(config.generator.interval_secs, 10);
        assert_eq!(config.alerts.violation_threshold, 3);
        assert_eq!(config.database.pool_max_size, 4);
    }
}
