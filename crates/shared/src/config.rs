//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Object storage configuration.
    pub storage: StorageSettings,
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
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
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

/// Object storage settings as they appear in configuration sources.
///
/// The server binary maps these onto the core storage provider types;
/// only the fields matching the selected `provider` are required.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Provider selector: `s3`, `azblob`, or `local`.
    pub provider: String,
    /// Base URL under which uploaded objects are publicly resolvable.
    pub public_url_base: String,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,

    /// S3 endpoint URL (`provider = "s3"`).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// S3 bucket name (`provider = "s3"`).
    #[serde(default)]
    pub bucket: Option<String>,
    /// S3 access key id (`provider = "s3"`).
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// S3 secret access key (`provider = "s3"`).
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// S3 region (`provider = "s3"`).
    #[serde(default)]
    pub region: Option<String>,

    /// Azure storage account (`provider = "azblob"`).
    #[serde(default)]
    pub account: Option<String>,
    /// Azure access key (`provider = "azblob"`).
    #[serde(default)]
    pub access_key: Option<String>,
    /// Azure container (`provider = "azblob"`).
    #[serde(default)]
    pub container: Option<String>,

    /// Root directory (`provider = "local"`).
    #[serde(default)]
    pub root: Option<String>,
}

fn default_max_upload_size() -> u64 {
    10 * 1024 * 1024
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PINBOARD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
