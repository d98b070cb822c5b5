//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for configuration storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the config file. Missing file yields [`AppConfig::empty`].
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Write `config`, replacing the file
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write a file holding every default. Fails with
    /// [`ConfigError::AlreadyExists`] when one is present.
    async fn init(&self) -> Result<(), ConfigError>;
}
