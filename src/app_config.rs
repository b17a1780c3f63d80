use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::database::connection::DEFAULT_DB_FILENAME;

// Application configuration: loading, validating and saving settings.

/// Environment variable that overrides the database location
pub const DATABASE_PATH_ENV: &str = "KYRA_DATABASE_PATH";

/// Set when running on a hosted instance; moves the default database to the temp dir
pub const CLOUD_ENV: &str = "KYRA_CLOUD";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "kyra.json";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Persistence settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// HTTP dashboard settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Database configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Dashboard server configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_database_path() -> PathBuf {
    if std::env::var_os(CLOUD_ENV).is_some() {
        std::env::temp_dir().join(DEFAULT_DB_FILENAME)
    } else {
        PathBuf::from(DEFAULT_DB_FILENAME)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Config {
    /// Load the configuration file, creating it with defaults when missing
    pub fn load_or_create<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        if config_path.exists() {
            let file = File::open(config_path)
                .with_context(|| format!("Failed to open config file: {:?}", config_path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
            return Ok(config);
        }

        warn!(
            "Config file not found at {:?}, creating default config.",
            config_path
        );
        let config = Config::default();
        config.save(config_path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, config_path: P) -> Result<()> {
        let config_path = config_path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(config_path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", config_path))?;
        Ok(())
    }

    /// Apply environment overrides (currently only the database path)
    pub fn apply_env_overrides(&mut self) {
        if let Some(path) = std::env::var_os(DATABASE_PATH_ENV) {
            if !path.is_empty() {
                self.database.path = PathBuf::from(path);
            }
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(anyhow!("Database path must not be empty"));
        }

        if self.server.host.trim().is_empty() {
            return Err(anyhow!("Server host must not be empty"));
        }

        if self.server.port == 0 {
            return Err(anyhow!("Server port must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
