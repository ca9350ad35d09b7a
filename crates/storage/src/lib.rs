//! Storage layer for Lynz
//!
//! This crate provides the sled-backed key-value store and the object store
//! that persists domain records as kind-tagged JSON documents.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod object_store;

pub use kv::{KvConfig, KvError, KvStore, SettingsStore};
pub use object_store::{
    FetchRequest, ObjectKind, ObjectStore, ObjectStoreError, Persistable, StoredObject,
};
