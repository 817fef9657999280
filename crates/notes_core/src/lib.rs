//! Core domain logic for a local, single-user notes app.
//!
//! The `NoteRepository` owns the note collection and mirrors it to a
//! best-effort key-value store. Presentation layers construct one repository
//! and call into it; nothing here is global.

pub mod clock;
pub mod config;
#[cfg(not(target_family = "wasm"))]
pub mod db;
#[cfg(not(target_family = "wasm"))]
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{RepositoryConfig, NOTES_STORAGE_KEY};
#[cfg(not(target_family = "wasm"))]
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{generate_note_id, NewNote, Note, NoteId, NoteUpdate};
pub use model::sanitize::sanitize_notes;
pub use repo::note_repo::NoteRepository;
pub use repo::seed::{seed_notes, TIPS_TITLE, WELCOME_TITLE};
pub use repo::{RepoError, RepoResult};
pub use search::NoteQuery;
#[cfg(target_family = "wasm")]
pub use storage::BrowserLocalStorage;
#[cfg(not(target_family = "wasm"))]
pub use storage::SqliteStore;
pub use storage::{
    KeyValueStore, MemoryStore, NullStore, StorageAdapter, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
