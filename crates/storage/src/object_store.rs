//! Object store for domain records
//!
//! Records are stored as JSON documents under `{kind}:{id}` keys of the
//! [`KvStore`], wrapped in a [`StoredObject`] envelope that carries the kind
//! tag and creation/update timestamps. Domain types opt in through the
//! [`Persistable`] trait.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

use crate::kv::{KvError, KvStore, SCOPE_SEPARATOR};

/// Object store error types
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    /// Underlying key-value store error
    #[error("Storage error: {0}")]
    Kv(#[from] KvError),

    /// Payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No record with this kind and id
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind
        kind: ObjectKind,
        /// Record id
        id: String,
    },

    /// A record with this kind and id already exists
    #[error("{kind} already exists: {id}")]
    AlreadyExists {
        /// Record kind
        kind: ObjectKind,
        /// Record id
        id: String,
    },
}

/// Result type for object store operations
pub type Result<T> = std::result::Result<T, ObjectStoreError>;

// =============================================================================
// Kinds
// =============================================================================

/// Kind tag of a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// A shoot plan
    Plan,
    /// A user-defined task category
    TaskCategory,
}

impl ObjectKind {
    /// Every kind, in declaration order
    pub const ALL: [ObjectKind; 2] = [ObjectKind::Plan, ObjectKind::TaskCategory];

    /// Storage name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Plan => "plan",
            ObjectKind::TaskCategory => "task_category",
        }
    }

    fn prefix(&self) -> String {
        format!("{}{}", self.as_str(), SCOPE_SEPARATOR)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain type that can live in the [`ObjectStore`]
pub trait Persistable: Serialize + DeserializeOwned {
    /// Kind tag records of this type are stored under
    const KIND: ObjectKind;

    /// Stable identifier of this value
    fn object_id(&self) -> String;
}

// =============================================================================
// Records
// =============================================================================

/// Envelope stored for every record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Record id
    pub id: String,
    /// Kind tag
    pub kind: ObjectKind,
    /// JSON payload
    pub data: serde_json::Value,
    /// When the record was first saved
    pub created_at: DateTime<Utc>,
    /// When the record was last saved
    pub updated_at: DateTime<Utc>,
}

impl StoredObject {
    /// Decode the payload
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Filter, order and limit for [`ObjectStore::fetch_all`]
///
/// Without a sort comparator, records come back in creation order.
pub struct FetchRequest<T> {
    predicate: Option<Predicate<T>>,
    sort: Option<Comparator<T>>,
    limit: Option<usize>,
}

impl<T> Default for FetchRequest<T> {
    fn default() -> Self {
        Self {
            predicate: None,
            sort: None,
            limit: None,
        }
    }
}

impl<T> FetchRequest<T> {
    /// Fetch every record
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only records matching `predicate`
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Order records with `compare`
    pub fn sort_by(mut self, compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        self.sort = Some(Box::new(compare));
        self
    }

    /// Return at most `limit` records
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl<T> fmt::Debug for FetchRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchRequest")
            .field("filtered", &self.predicate.is_some())
            .field("sorted", &self.sort.is_some())
            .field("limit", &self.limit)
            .finish()
    }
}

// =============================================================================
// Object Store
// =============================================================================

/// Kind-tagged document store over a [`KvStore`]
#[derive(Clone)]
pub struct ObjectStore {
    kv: KvStore,
}

impl ObjectStore {
    /// Create an object store over `kv`
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Create an object store backed by a temporary database
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(KvStore::in_memory()?))
    }

    /// Underlying key-value store
    pub fn kv(&self) -> &KvStore {
        &self.kv
    }

    fn key(kind: ObjectKind, id: &str) -> Result<String> {
        Ok(KvStore::scoped_key(&[kind.as_str(), id])?)
    }

    /// Load the raw record for `kind`/`id`
    pub fn fetch_record(&self, kind: ObjectKind, id: &str) -> Result<Option<StoredObject>> {
        Ok(self.kv.get(&Self::key(kind, id)?)?)
    }

    fn write<T: Persistable>(&self, value: &T, created_at: Option<DateTime<Utc>>) -> Result<StoredObject> {
        let id = value.object_id();
        let now = Utc::now();
        let record = StoredObject {
            id: id.clone(),
            kind: T::KIND,
            data: serde_json::to_value(value)?,
            created_at: created_at.unwrap_or(now),
            updated_at: now,
        };
        self.kv.set(&Self::key(T::KIND, &id)?, &record)?;
        tracing::debug!(kind = %T::KIND, id = %id, "stored object");
        Ok(record)
    }

    /// Insert or replace a record, keeping the original creation time
    pub fn save<T: Persistable>(&self, value: &T) -> Result<StoredObject> {
        let existing = self.fetch_record(T::KIND, &value.object_id())?;
        self.write(value, existing.map(|record| record.created_at))
    }

    /// Insert a new record; fails if one with the same id exists
    pub fn create<T: Persistable>(&self, value: &T) -> Result<StoredObject> {
        let id = value.object_id();
        if self.fetch_record(T::KIND, &id)?.is_some() {
            return Err(ObjectStoreError::AlreadyExists { kind: T::KIND, id });
        }
        self.write(value, None)
    }

    /// Replace an existing record; fails if there is none
    pub fn update<T: Persistable>(&self, value: &T) -> Result<StoredObject> {
        let id = value.object_id();
        match self.fetch_record(T::KIND, &id)? {
            Some(existing) => self.write(value, Some(existing.created_at)),
            None => Err(ObjectStoreError::NotFound { kind: T::KIND, id }),
        }
    }

    /// Fetch one record by id
    pub fn fetch<T: Persistable>(&self, id: &str) -> Result<Option<T>> {
        self.fetch_record(T::KIND, id)?
            .map(|record| record.decode())
            .transpose()
    }

    /// Fetch every record of `T`'s kind matching `request`
    pub fn fetch_all<T: Persistable>(&self, request: FetchRequest<T>) -> Result<Vec<T>> {
        let mut records: Vec<StoredObject> = self.kv.values_with_prefix(&T::KIND.prefix())?;
        records.sort_by_key(|record| record.created_at);

        let mut values = Vec::with_capacity(records.len());
        for record in &records {
            let value: T = record.decode()?;
            if request.predicate.as_ref().map_or(true, |keep| keep(&value)) {
                values.push(value);
            }
        }

        if let Some(compare) = &request.sort {
            values.sort_by(|a, b| compare(a, b));
        }
        if let Some(limit) = request.limit {
            values.truncate(limit);
        }
        Ok(values)
    }

    /// Number of records of `kind`
    pub fn count(&self, kind: ObjectKind) -> Result<usize> {
        Ok(self.kv.keys_with_prefix(&kind.prefix())?.len())
    }

    /// Delete one record by id; fails if there is none
    pub fn delete<T: Persistable>(&self, id: &str) -> Result<()> {
        if self.kv.remove(&Self::key(T::KIND, id)?)? {
            tracing::debug!(kind = %T::KIND, id = %id, "deleted object");
            Ok(())
        } else {
            Err(ObjectStoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })
        }
    }

    /// Delete every record of `kind`, returning how many were removed
    pub fn delete_all(&self, kind: ObjectKind) -> Result<usize> {
        let removed = self.kv.remove_prefix(&kind.prefix())?;
        tracing::info!(kind = %kind, removed, "deleted all objects");
        Ok(removed)
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        Ok(self.kv.flush()?)
    }
}
