use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, DataSourceConfig, LoggingConfig, ServerConfig};

/// Prefix for environment overrides, e.g. `CREASE__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "CREASE";

/// Loads the application configuration from a TOML file plus environment overrides.
///
/// This function is the primary entry point for this crate. It reads the configuration file,
/// layers `CREASE__*` environment variables on top, deserializes the result into our
/// strongly-typed `Config` struct and validates it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), source = ?config.data_source, addr = %config.server.addr(), "Configuration loaded.");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::{IpAddr, Ipv4Addr};
    use std::path::PathBuf;
    use tempfile::Builder;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_csv_source_with_defaults() {
        let file = write_toml(
            r#"
            [data_source]
            kind = "csv"
            deliveries_path = "data/ipl_dataset.csv"
            awards_path = "data/team_performance.csv"
            "#,
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(
            config.data_source,
            DataSourceConfig::Csv {
                deliveries_path: PathBuf::from("data/ipl_dataset.csv"),
                awards_path: PathBuf::from("data/team_performance.csv"),
            }
        );
        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.directory, None);
    }

    #[test]
    fn test_loads_postgres_source() {
        let file = write_toml(
            r#"
            [data_source]
            kind = "postgres"

            [server]
            host = "0.0.0.0"
            port = 8080

            [logging]
            level = "debug"
            directory = "logs"
            "#,
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(
            config.data_source,
            DataSourceConfig::Postgres {
                url_env: "DATABASE_URL".to_string()
            }
        );
        assert_eq!(config.server.addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.logging.directory, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_empty_path_fails_validation() {
        let file = write_toml(
            r#"
            [data_source]
            kind = "csv"
            deliveries_path = ""
            awards_path = "awards.csv"
            "#,
        );
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_zero_port_fails_validation() {
        let file = write_toml(
            r#"
            [data_source]
            kind = "postgres"

            [server]
            port = 0
            "#,
        );
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ValidationError(msg)) if msg.contains("port")
        ));
    }

    #[test]
    fn test_unknown_source_kind_is_load_error() {
        let file = write_toml(
            r#"
            [data_source]
            kind = "excel"
            "#,
        );
        assert!(matches!(load_config(file.path()), Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        assert!(matches!(
            load_config(Path::new("/no/such/crease.toml")),
            Err(ConfigError::LoadError(_))
        ));
    }
}
