use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data_source: DataSourceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the delivery and award datasets are read from.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSourceConfig {
    /// Two CSV exports on disk.
    Csv {
        /// Ball-by-ball export (Striker, Bowler, runs_scored, wicket_confirmation, ball_no).
        deliveries_path: PathBuf,
        /// Match results export (Player_of_Match).
        awards_path: PathBuf,
    },
    /// A PostgreSQL database holding the `deliveries` and `match_awards` tables.
    Postgres {
        /// Name of the environment variable that holds the connection URL.
        #[serde(default = "default_url_env")]
        url_env: String,
    },
}

/// Settings for the optional HTTP query surface.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Log level and optional log file directory.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. "info" or "crease=debug". `RUST_LOG` wins when set.
    #[serde(default = "default_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_url_env() -> String {
    "DATABASE_URL".to_string()
}
fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_port() -> u16 {
    3000
}
fn default_level() -> String {
    "info".to_string()
}

// --- Default Implementations ---
// This allows a user to omit the `[server]` and `[logging]` sections from their toml
// and still have it work with sensible defaults.

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: None,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Config {
    /// Checks values serde cannot: empty paths, a zero port, a blank level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.data_source {
            DataSourceConfig::Csv {
                deliveries_path,
                awards_path,
            } => {
                if deliveries_path.as_os_str().is_empty() {
                    return Err(ConfigError::ValidationError(
                        "data_source.deliveries_path must not be empty".to_string(),
                    ));
                }
                if awards_path.as_os_str().is_empty() {
                    return Err(ConfigError::ValidationError(
                        "data_source.awards_path must not be empty".to_string(),
                    ));
                }
            }
            DataSourceConfig::Postgres { url_env } => {
                if url_env.trim().is_empty() {
                    return Err(ConfigError::ValidationError(
                        "data_source.url_env must name an environment variable".to_string(),
                    ));
                }
            }
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
