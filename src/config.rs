use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub pagination: PaginationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Where listings live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    /// JSON seed file; the whole dataset for the memory backend
    #[serde(default = "default_properties_path")]
    pub properties_path: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    pub max_connections: Option<u32>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            properties_path: default_properties_path(),
            database_url: default_database_url(),
            max_connections: None,
        }
    }
}

fn default_properties_path() -> String { "data/properties.json".to_string() }
fn default_database_url() -> String { "sqlite://data/app.db".to_string() }

/// Page size rules for the listing endpoint
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationSettings {
    #[serde(default = "default_page_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_page_limit")]
    pub max_limit: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_page_limit(),
            max_limit: default_max_page_limit(),
        }
    }
}

fn default_page_limit() -> usize { 20 }
fn default_max_page_limit() -> usize { 200 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    /// JSON or TOML file with global weights; defaults are used when unset or unreadable
    #[serde(default = "default_weights_path")]
    pub weights_path: Option<String>,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights_path: default_weights_path(),
        }
    }
}

fn default_weights_path() -> Option<String> { Some("configs/weights.json".to_string()) }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PROPMATCH)
    /// 5. Short-form variables (STORAGE, PROPERTIES_PATH, DATABASE_URL, WEIGHTS_PATH)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PROPMATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PROPMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PROPMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the short-form deployment variables on top of the layered config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("STORAGE", "storage.backend"),
        ("PROPERTIES_PATH", "storage.properties_path"),
        ("DATABASE_URL", "storage.database_url"),
        ("WEIGHTS_PATH", "scoring.weights_path"),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (var, key) in overrides {
        if let Ok(value) = env::var(var) {
            if !value.is_empty() {
                builder = builder.set_override(key, value)?;
            }
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.storage.backend, StorageBackend::Memory);
        assert_eq!(settings.pagination.default_limit, 20);
        assert_eq!(settings.pagination.max_limit, 200);
        assert_eq!(settings.scoring.weights_path.as_deref(), Some("configs/weights.json"));
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[storage]
backend = "sqlite"
database_url = "sqlite::memory:"
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.storage.backend, StorageBackend::Sqlite);
        assert_eq!(settings.storage.properties_path, "data/properties.json");
        assert_eq!(settings.logging.level, "info");
    }
}
