//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// Extractor (media probe) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorConfig {
    /// Path or name of the probe binary
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Hard deadline for a single probe invocation
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional proxy URL handed to the probe (e.g. the bundled Tor
    /// SOCKS endpoint)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Maximum number of search results requested from the probe
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Extra arguments appended to every probe invocation
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_binary() -> String {
    "yt-dlx".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_search_limit() -> u32 {
    15
}

impl ExtractorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Storage configuration for downloaded media
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub base_path: String,
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
}

fn default_storage_path() -> String {
    "./downloads".to_string()
}

fn default_url_prefix() -> String {
    "http://localhost:8080/files".to_string()
}

impl Settings {
    /// Load settings from the default configuration file and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/gateway.yaml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();

        let format = if config_path
            .extension()
            .map_or(false, |ext| ext == "yaml" || ext == "yml")
        {
            FileFormat::Yaml
        } else {
            FileFormat::Toml
        };

        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("extractor.binary", default_binary())?
            .set_default("extractor.timeout_secs", default_timeout_secs() as i64)?
            .set_default("extractor.search_limit", default_search_limit() as i64)?
            .set_default("extractor.extra_args", Vec::<String>::new())?
            .set_default("storage.base_path", default_storage_path())?
            .set_default("storage.url_prefix", default_url_prefix())?;

        if config_path.exists() {
            builder = builder.add_source(File::from(config_path).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix("YTDLX_GATEWAY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Server port cannot be 0".to_string(),
            )));
        }

        if self.extractor.binary.trim().is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "Extractor binary cannot be empty".to_string(),
            )));
        }

        if self.extractor.timeout_secs == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Extractor timeout cannot be 0".to_string(),
            )));
        }

        if self.extractor.search_limit == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Search limit must be at least 1".to_string(),
            )));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            extractor: ExtractorConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

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
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            timeout_secs: default_timeout_secs(),
            proxy: None,
            search_limit: default_search_limit(),
            extra_args: vec![],
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: default_storage_path(),
            url_prefix: default_url_prefix(),
        }
    }
}
