use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::storage::{MongoConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storage backend selection
///
/// MongoDB host, port and credential come from the `MONGO_*` environment
/// variables; only the backend and database name live here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `mongo`
    pub backend: String,
    /// MongoDB database holding the collections
    pub database: String,
    /// MongoDB connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageType::InMemory.to_string(),
            database: "restlet".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl StorageSettings {
    /// Resolves the settings into a storage configuration, reading `MONGO_*` variables
    pub fn to_storage_config(&self) -> Result<StorageConfig, DomainError> {
        self.to_storage_config_with(|name| std::env::var(name).ok())
    }

    pub fn to_storage_config_with<F>(&self, lookup: F) -> Result<StorageConfig, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self.backend.parse::<StorageType>()? {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Mongo => {
                let mongo = MongoConfig::from_lookup(self.database.clone(), lookup)?
                    .with_connect_timeout(self.connect_timeout_secs);
                Ok(StorageConfig::mongo(mongo))
            }
        }
    }
}

impl AppConfig {
    /// Loads `config/default`, `config/local` and `APP__*` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(Self::environment())
    }

    /// Loads the configuration files layered under the given environment source
    pub fn load_with(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(environment)
            .build()?;

        config.try_deserialize()
    }

    pub fn environment() -> config::Environment {
        config::Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        AppConfig::environment().source(Some(map))
    }

    #[test]
    fn test_load_with_environment_overrides() {
        let config = AppConfig::load_with(environment(&[
            ("APP__STORAGE__BACKEND", "mongo"),
            ("APP__SERVER__PORT", "9090"),
        ]))
        .unwrap();

        assert_eq!(config.storage.backend, "mongo");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_load_with_invalid_value_fails() {
        let result = AppConfig::load_with(environment(&[
            ("APP__STORAGE__BACKEND", "mongo"),
            ("APP__SERVER__PORT", "notaport"),
        ]));

        assert!(result.is_err());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.storage.database, "restlet");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"storage":{"backend":"mongo"},"logging":{"format":"json"}}"#)
                .unwrap();

        assert_eq!(config.storage.backend, "mongo");
        assert_eq!(config.storage.database, "restlet");
        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_memory_backend_resolves_to_in_memory() {
        let storage = StorageSettings::default()
            .to_storage_config_with(|_| None)
            .unwrap();

        assert_eq!(storage.storage_type(), StorageType::InMemory);
    }

    #[test]
    fn test_mongo_backend_reads_lookup() {
        let settings = StorageSettings {
            backend: "mongo".to_string(),
            database: "films".to_string(),
            connect_timeout_secs: 5,
        };

        let storage = settings
            .to_storage_config_with(|name| match name {
                "MONGO_HOST" => Some("db".to_string()),
                _ => None,
            })
            .unwrap();

        match storage {
            StorageConfig::Mongo(mongo) => {
                assert_eq!(mongo.host, "db");
                assert_eq!(mongo.port, 27017);
                assert_eq!(mongo.database, "films");
                assert_eq!(mongo.connect_timeout_secs, 5);
            }
            other => panic!("expected mongo config, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_backend_is_configuration_error() {
        let settings = StorageSettings {
            backend: "cassandra".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            settings.to_storage_config_with(|_| None),
            Err(DomainError::Configuration { .. })
        ));
    }
}
