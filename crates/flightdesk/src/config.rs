//! Configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level configuration shared by the server and the CLI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Flight store settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Chart output settings.
    #[serde(default)]
    pub charts: ChartsConfig,
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

/// Flight store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// SQLite busy timeout, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,

    /// Whether to create the store and its tables when they are missing.
    /// When unset, a store that does not exist is a startup error.
    #[serde(default)]
    pub migrate: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "flightdesk_db=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Chart output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartsConfig {
    /// Directory rendered SVG charts are written to.
    #[serde(default = "default_chart_dir")]
    pub output_dir: PathBuf,

    /// Whether to hand each chart to the desktop's default viewer.
    #[serde(default = "default_true")]
    pub open_viewer: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    5000
}

fn default_db_path() -> String {
    "data/flights.sqlite3".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_pool_max_size() -> u32 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_chart_dir() -> PathBuf {
    PathBuf::from("charts")
}

fn default_true() -> bool {
    true
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
            migrate: false,
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

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_chart_dir(),
            open_viewer: true,
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

/// Resolves which configuration file to load.
///
/// Order: first command-line argument, then `FLIGHTDESK_CONFIG_PATH`, then
/// `flightdesk.toml` in the working directory. Returns the path and a label
/// naming where it came from.
pub fn resolve_config_path() -> (String, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (path, "cli-arg");
    }

    if let Ok(path) = std::env::var("FLIGHTDESK_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (path, "env-var");
        }
    }

    ("flightdesk.toml".to_string(), "default")
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `FLIGHTDESK_HOST` overrides `server.host`
/// - `FLIGHTDESK_PORT` overrides `server.port`
/// - `FLIGHTDESK_DB_PATH` overrides `database.path`
/// - `FLIGHTDESK_DB_MIGRATE` overrides `database.migrate`
/// - `FLIGHTDESK_LOG_LEVEL` overrides `logging.level`
/// - `FLIGHTDESK_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `FLIGHTDESK_CHART_DIR` overrides `charts.output_dir`
/// - `FLIGHTDESK_OPEN_CHARTS` overrides `charts.open_viewer`
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

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn parse_flag(value: &str) -> bool {
    value == "true" || value == "1"
}

fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(host) = var("FLIGHTDESK_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = var("FLIGHTDESK_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(db_path) = var("FLIGHTDESK_DB_PATH") {
        config.database.path = db_path;
    }
    if let Some(migrate) = var("FLIGHTDESK_DB_MIGRATE") {
        config.database.migrate = parse_flag(&migrate);
    }
    if let Some(level) = var("FLIGHTDESK_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = var("FLIGHTDESK_LOG_JSON") {
        config.logging.json = parse_flag(&json);
    }
    if let Some(dir) = var("FLIGHTDESK_CHART_DIR") {
        config.charts.output_dir = PathBuf::from(dir);
    }
    if let Some(open) = var("FLIGHTDESK_OPEN_CHARTS") {
        config.charts.open_viewer = parse_flag(&open);
    }
}
