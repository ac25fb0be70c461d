//! Application configuration
//!
//! Loaded from a TOML file, by default `~/.config/court-booking/config.toml`.
//! Every section and field is optional; anything left out keeps its default.
//!
//! ```toml
//! [server]
//! api_host = "0.0.0.0"
//! api_port = 8080
//!
//! [storage]
//! backend = "memory"
//!
//! [opening_hours]
//! opening_time = "08:00:00"
//! closing_time = "20:00:00"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::booking::OpeningHoursPolicy;
use crate::infrastructure::database::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("court-booking")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub database: DatabaseSettings,
    pub opening_hours: OpeningHoursConfig,
    pub events: EventsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Database,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "database" | "db" | "sqlite" => Ok(Self::Database),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid(format!(
                "unknown storage backend '{}', expected 'database' or 'memory'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
            min_connections: db.min_connections,
        }
    }
}

impl From<&DatabaseSettings> for DatabaseConfig {
    fn from(s: &DatabaseSettings) -> Self {
        DatabaseConfig {
            url: s.url.clone(),
            max_connections: s.max_connections,
            min_connections: s.min_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHoursConfig {
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
}

impl Default for OpeningHoursConfig {
    fn default() -> Self {
        Self {
            opening_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            closing_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventPublisherKind {
    /// In-process bus feeding the WebSocket stream
    #[default]
    Bus,
    /// Log only
    Log,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    pub publisher: EventPublisherKind,
    pub bus_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            publisher: EventPublisherKind::Bus,
            bus_capacity: crate::application::events::DEFAULT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `court_booking=debug,info`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.api_port == 0 {
            return Err(ConfigError::Invalid("server.api_port must not be 0".into()));
        }

        if self.storage.backend == StorageBackend::Database && self.database.url.trim().is_empty()
        {
            return Err(ConfigError::Invalid("database.url must not be empty".into()));
        }

        if self.events.bus_capacity == 0 {
            return Err(ConfigError::Invalid(
                "events.bus_capacity must be at least 1".into(),
            ));
        }

        self.opening_hours_policy()?;
        Ok(())
    }

    pub fn opening_hours_policy(&self) -> Result<OpeningHoursPolicy, ConfigError> {
        OpeningHoursPolicy::new(
            self.opening_hours.opening_time,
            self.opening_hours.closing_time,
        )
        .map_err(|e| ConfigError::Invalid(format!("opening_hours: {}", e)))
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::from(&self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        cfg.validate().unwrap();

        let policy = cfg.opening_hours_policy().unwrap();
        assert_eq!(policy.opening_time(), NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(policy.closing_time(), NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert_eq!(cfg.storage.backend, StorageBackend::Database);
        assert_eq!(cfg.events.publisher, EventPublisherKind::Bus);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            api_port = 9090

            [storage]
            backend = "memory"

            [opening_hours]
            opening_time = "07:30:00"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(
            cfg.opening_hours.opening_time,
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
        assert_eq!(
            cfg.opening_hours.closing_time,
            NaiveTime::from_hms_opt(20, 0, 0).unwrap()
        );
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn inverted_opening_hours_are_rejected() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [opening_hours]
            opening_time = "20:00:00"
            closing_time = "08:00:00"
            "#,
        )
        .unwrap();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("Closing time must be after opening time"));
    }

    #[test]
    fn zero_port_and_empty_url_are_rejected() {
        let mut cfg = AppConfig::default();
        cfg.server.api_port = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.database.url = "  ".into();
        assert!(cfg.validate().is_err());

        // The URL is irrelevant when bookings live in memory.
        cfg.storage.backend = StorageBackend::Memory;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unknown_backend_fails_to_parse() {
        assert!(toml::from_str::<AppConfig>("[storage]\nbackend = \"redis\"").is_err());
        assert!("redis".parse::<StorageBackend>().is_err());
        assert_eq!("Memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("court-booking-does-not-exist.toml");
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.server.api_port, 8080);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let path = std::env::temp_dir().join(format!(
            "court-booking-bad-{}.toml",
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, "[server\napi_port = ").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("court-booking-bad-"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn database_config_follows_settings() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "sqlite::memory:".into();
        cfg.database.max_connections = 1;
        let db = cfg.database_config();
        assert_eq!(db.url, "sqlite::memory:");
        assert_eq!(db.max_connections, 1);
    }
}
