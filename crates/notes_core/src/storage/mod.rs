//! Fail-safe key-value persistence.
//!
//! # Responsibility
//! - Define the `KeyValueStore` capability over raw string storage.
//! - Wrap any store in `StorageAdapter`, which encodes values as JSON and
//!   absorbs every storage failure.
//!
//! # Invariants
//! - `StorageAdapter` operations never fail and never panic.
//! - Absorbed failures are logged as metadata only (key and error kind).

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[cfg(target_family = "wasm")]
mod local_storage;
mod memory;
#[cfg(not(target_family = "wasm"))]
mod sqlite;

#[cfg(target_family = "wasm")]
pub use local_storage::BrowserLocalStorage;
pub use memory::{MemoryStore, NullStore};
#[cfg(not(target_family = "wasm"))]
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a raw key-value backend.
#[derive(Debug)]
pub enum StoreError {
    /// The backend is disabled, sandboxed or missing.
    Unavailable(String),
    /// Writing would exceed the backend's capacity.
    QuotaExceeded { needed: usize, quota: usize },
    #[cfg(not(target_family = "wasm"))]
    Db(crate::db::DbError),
    /// Any other backend-specific failure.
    Backend(String),
}

impl StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "store_unavailable",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            #[cfg(not(target_family = "wasm"))]
            Self::Db(_) => "db_error",
            Self::Backend(_) => "backend_error",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::QuotaExceeded { needed, quota } => {
                write!(f, "storage quota exceeded: need {needed} bytes, quota {quota}")
            }
            #[cfg(not(target_family = "wasm"))]
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "storage backend error: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            #[cfg(not(target_family = "wasm"))]
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(not(target_family = "wasm"))]
impl From<crate::db::DbError> for StoreError {
    fn from(value: crate::db::DbError) -> Self {
        Self::Db(value)
    }
}

#[cfg(not(target_family = "wasm"))]
impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(crate::db::DbError::Sqlite(value))
    }
}

/// Raw string-keyed storage backend.
///
/// Implementations report failures honestly; `StorageAdapter` decides to
/// swallow them.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove_item(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

/// Best-effort structured storage over a `KeyValueStore`.
#[derive(Debug, Default, Clone)]
pub struct StorageAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads and JSON-decodes the value under `key`.
    ///
    /// Returns `None` when the store is unavailable, the key is absent, or the
    /// payload does not decode as `T`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get_item(key) {
            Ok(raw) => raw?,
            Err(err) => {
                log_absorbed("read", key, &err);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=storage_read module=storage status=error key={} error_code=decode_failed error={}",
                    key, err
                );
                None
            }
        }
    }

    /// JSON-encodes `value` and stores it under `key`; no-op on any failure.
    pub fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(
                    "event=storage_write module=storage status=error key={} error_code=encode_failed error={}",
                    key, err
                );
                return;
            }
        };

        if let Err(err) = self.store.set_item(key, &encoded) {
            log_absorbed("write", key, &err);
        }
    }

    /// Removes `key`; no-op on any failure.
    pub fn remove(&mut self, key: &str) {
        if let Err(err) = self.store.remove_item(key) {
            log_absorbed("remove", key, &err);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn log_absorbed(op: &str, key: &str, err: &StoreError) {
    warn!(
        "event=storage_{} module=storage status=error key={} error_code={} error={}",
        op,
        key,
        err.code(),
        err
    );
}
