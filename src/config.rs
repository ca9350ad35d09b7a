//! Application configuration
//!
//! [`LynzConfig`] is read from a JSON file; every field has a default, so an
//! empty object is a valid configuration. A few environment variables
//! override the file (see [`LynzConfig::apply_env_overrides`]).

use anyhow::Context;
use app_platform::AuthorizationStatus;
use app_state::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use storage::KvConfig;

/// Overrides [`StorageConfig::path`]
pub const DATA_DIR_ENV: &str = "LYNZ_DATA_DIR";

/// Overrides [`LogConfig::directive`]
pub const LOG_ENV: &str = "LYNZ_LOG";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LynzConfig {
    /// On-device storage
    pub storage: StorageConfig,
    /// Log output
    pub log: LogConfig,
    /// Screen store runtime
    pub store: StoreSettings,
    /// Answers given by the headless permission prompts
    pub permissions: PermissionAnswers,
}

impl LynzConfig {
    /// Read a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse a configuration from JSON text
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Configuration with throwaway storage
    pub fn ephemeral() -> Self {
        Self {
            storage: StorageConfig {
                temporary: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Apply `LYNZ_DATA_DIR` and `LYNZ_LOG` when set
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            self.storage.path = PathBuf::from(dir);
        }
        if let Ok(directive) = std::env::var(LOG_ENV) {
            self.log.directive = directive;
        }
        self
    }
}

/// Storage section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database directory
    pub path: PathBuf,
    /// Keep everything in a throwaway database
    pub temporary: bool,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Background flush interval; `None` flushes only on demand
    pub flush_every_ms: Option<u64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let kv = KvConfig::default();
        Self {
            path: kv.path,
            temporary: kv.temporary,
            cache_capacity: kv.cache_capacity,
            flush_every_ms: kv.flush_every_ms,
        }
    }
}

impl StorageConfig {
    /// Key-value store configuration for this section
    pub fn kv_config(&self) -> KvConfig {
        let config = if self.temporary {
            KvConfig::temporary()
        } else {
            KvConfig::new(&self.path)
        };
        config
            .cache_capacity(self.cache_capacity)
            .flush_every_ms(self.flush_every_ms)
    }
}

/// Log section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub directive: String,
    /// Colored output
    pub ansi: bool,
    /// Print the event target
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directive: "info".to_string(),
            ansi: true,
            with_target: true,
        }
    }
}

/// Store runtime section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Pause between the steps of a sequence effect, in milliseconds
    pub sequence_step_ms: u64,
    /// Maximum number of intents one dispatch may chain synchronously
    pub max_chain: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        let defaults = StoreConfig::default();
        Self {
            sequence_step_ms: defaults.sequence_step.as_millis() as u64,
            max_chain: defaults.max_chain,
        }
    }
}

impl StoreSettings {
    /// Store configuration shared by every screen
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .sequence_step(Duration::from_millis(self.sequence_step_ms))
            .max_chain(self.max_chain)
    }
}

/// Permission section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionAnswers {
    /// Answer to the tracking prompt
    pub tracking: AuthorizationStatus,
    /// Answer to the notification prompt
    pub notifications: AuthorizationStatus,
}

impl Default for PermissionAnswers {
    fn default() -> Self {
        Self {
            tracking: AuthorizationStatus::Authorized,
            notifications: AuthorizationStatus::Authorized,
        }
    }
}
