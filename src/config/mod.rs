//! Configuration module

pub mod settings;

pub use settings::{ExtractorConfig, LoggingConfig, ServerConfig, Settings, StorageConfig};
