//! # Configuration
//!
//! TOML configuration for the `arise` binary. Every section has defaults, so
//! a partial file (or an empty one) is valid.
//!
//! ```toml
//! [profile]
//! default_username = "Hunter"
//!
//! [storage]
//! data_dir = "./data"
//! backend = "sled"   # or "json"
//!
//! [logging]
//! level = "info"
//! file = "arise.log"
//!
//! [gacha]
//! reveal_delay_ms = 500
//! ```
//!
//! ```rust,no_run
//! use arise::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Config::create_default("arise.toml").await?;
//!     let config = Config::load("arise.toml").await?;
//!     println!("data in {}", config.storage.data_dir);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::game::backend::BackendKind;

pub const DEFAULT_CONFIG_PATH: &str = "arise.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Name given to a freshly seeded player
    #[serde(default = "default_username")]
    pub default_username: String,
}

fn default_username() -> String {
    "Hunter".to_string()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            default_username: default_username(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub backend: BackendKind,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backend: BackendKind::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: Some("arise.log".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GachaConfig {
    /// Pause before a draw result is printed. 0 disables it.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
}

fn default_reveal_delay_ms() -> u64 {
    500
}

impl Default for GachaConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: default_reveal_delay_ms(),
        }
    }
}

impl GachaConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub gacha: GachaConfig,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Load `path`, or fall back to defaults when it does not exist.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if fs::metadata(path).await.is_err() {
            log::debug!("config {} not found, using defaults", path);
            return Ok(Config::default());
        }
        Self::load(path).await
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
