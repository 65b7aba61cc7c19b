//! Gatehouse Storage
//!
//! This module provides persistence for accounts and the session slots:
//!
//! - **kv**: the `KeyValueStore` trait and the in-memory backend
//! - **file**: single JSON file backend (native only)
//! - **sqlite**: SQLite table backend (native only)
//! - **credentials**: the user-list repository on top of any backend
//! - **types**: `User`, `CurrentUser` and the storage key names
//! - **error**: Error types
//!
//! # Layout
//!
//! ```text
//! users          → JSON array of User
//! authToken      → active session token
//! currentUser    → {"name": .., "email": ..}
//! rememberedUser → last login identifier (only with "remember me")
//! ```

pub mod credentials;
pub mod error;
#[cfg(feature = "native")]
pub mod file;
pub mod kv;
#[cfg(feature = "native")]
pub mod sqlite;
pub mod types;

// Re-export commonly used types
pub use credentials::{CredentialError, CredentialStore, UniqueField};
pub use error::{StorageError, StorageResult};
#[cfg(feature = "native")]
pub use file::JsonFileStore;
pub use kv::{KeyValueStore, MemoryStore, SharedStore};
#[cfg(feature = "native")]
pub use sqlite::SqliteStore;
pub use types::{
    CurrentUser, User, AUTH_TOKEN_KEY, CURRENT_USER_KEY, REMEMBERED_USER_KEY, USERS_KEY,
};

#[cfg(feature = "native")]
use crate::config::{BackendKind, StorageConfig};

/// Open the backend selected by `config`
#[cfg(feature = "native")]
pub fn open_backend(config: &StorageConfig) -> StorageResult<SharedStore> {
    use std::rc::Rc;

    let data_path = config.data_path();
    let data_dir = data_path.as_path();
    let store: SharedStore = match config.backend {
        BackendKind::Memory => Rc::new(MemoryStore::new()),
        BackendKind::File => Rc::new(JsonFileStore::open(data_dir)?),
        BackendKind::Sqlite => Rc::new(SqliteStore::open(data_dir)?),
    };

    tracing::debug!(backend = store.backend(), data_dir = %config.data_dir, "Opened storage backend");
    Ok(store)
}
