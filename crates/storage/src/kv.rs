//! Key-value store backing all local persistence
//!
//! A thin, type-safe layer over sled. Values are stored as JSON; keys can be
//! built from scopes joined with `:` (e.g. `["settings", "onboarding_shown"]`).

use serde::{de::DeserializeOwned, Serialize};
use sled::Db;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Separator between key scopes
pub const SCOPE_SEPARATOR: &str = ":";

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: PathBuf,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None for flushing only on demand)
    pub flush_every_ms: Option<u64>,
    /// Delete the database when the store is dropped
    pub temporary: bool,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lynz_kv.db"),
            cache_capacity: 16 * 1024 * 1024, // 16MB
            use_compression: true,
            flush_every_ms: Some(500),
            temporary: false,
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Configuration for a throwaway database (tests, previews)
    pub fn temporary() -> Self {
        Self {
            temporary: true,
            ..Default::default()
        }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Key-value store implementation
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl KvStore {
    /// Open a key-value store with configuration
    pub fn new(config: KvConfig) -> Result<Self> {
        let mut db_config = sled::Config::new()
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression)
            .flush_every_ms(config.flush_every_ms);

        db_config = if config.temporary {
            db_config.temporary(true)
        } else {
            db_config.path(&config.path)
        };

        let db = db_config.open()?;
        tracing::debug!(path = %config.path.display(), temporary = config.temporary, "opened kv store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Create an in-memory key-value store (for testing)
    pub fn in_memory() -> Result<Self> {
        Self::new(KvConfig::temporary())
    }

    /// Build a key from scopes
    pub fn scoped_key(scopes: &[&str]) -> Result<String> {
        if scopes.is_empty() || scopes.iter().any(|scope| scope.is_empty()) {
            return Err(KvError::InvalidKey(scopes.join(SCOPE_SEPARATOR)));
        }
        Ok(scopes.join(SCOPE_SEPARATOR))
    }

    /// Get a value by key
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Get a value by scoped key
    pub fn get_scoped<T>(&self, scopes: &[&str]) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.get(&Self::scoped_key(scopes)?)
    }

    /// Set a value by key
    pub fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.db.insert(key.as_bytes(), bytes)?;
        Ok(())
    }

    /// Set a value by scoped key
    pub fn set_scoped<T>(&self, scopes: &[&str], value: &T) -> Result<()>
    where
        T: Serialize,
    {
        self.set(&Self::scoped_key(scopes)?, value)
    }

    /// Remove a value by key (returns whether it existed)
    pub fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }

    /// Remove a value by scoped key
    pub fn remove_scoped(&self, scopes: &[&str]) -> Result<bool> {
        self.remove(&Self::scoped_key(scopes)?)
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.db.contains_key(key.as_bytes())?)
    }

    /// Get all keys with a given prefix
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for item in self.db.scan_prefix(prefix.as_bytes()) {
            let (key, _) = item?;
            if let Ok(key) = String::from_utf8(key.to_vec()) {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    /// Decode every value whose key starts with `prefix`, in key order
    pub fn values_with_prefix<T>(&self, prefix: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut values = Vec::new();
        for item in self.db.scan_prefix(prefix.as_bytes()) {
            let (_, bytes) = item?;
            values.push(serde_json::from_slice(&bytes)?);
        }
        Ok(values)
    }

    /// Remove every key starting with `prefix`, returning how many were removed
    pub fn remove_prefix(&self, prefix: &str) -> Result<usize> {
        let mut count = 0;
        for key in self.keys_with_prefix(prefix)? {
            if self.remove(&key)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Clear all data
    pub fn clear(&self) -> Result<()> {
        self.db.clear()?;
        Ok(())
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Get the number of keys in the store
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

/// Scoped key-value store for app-level settings
#[derive(Clone)]
pub struct SettingsStore {
    kv: KvStore,
}

impl SettingsStore {
    const SCOPE: &'static str = "settings";

    /// Create a new settings store
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Get a setting
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.kv.get_scoped(&[Self::SCOPE, key])
    }

    /// Get a setting, falling back to `T::default()`
    pub fn get_or_default<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.get(key)?.unwrap_or_default())
    }

    /// Set a setting
    pub fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        self.kv.set_scoped(&[Self::SCOPE, key], value)
    }

    /// Remove a setting
    pub fn remove(&self, key: &str) -> Result<bool> {
        self.kv.remove_scoped(&[Self::SCOPE, key])
    }
}
