//! Repository configuration.

/// Storage key holding the serialized note collection.
pub const NOTES_STORAGE_KEY: &str = "notes.v1";

/// Options for constructing a `NoteRepository`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Key under which the collection is mirrored.
    pub storage_key: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            storage_key: NOTES_STORAGE_KEY.to_string(),
        }
    }
}

impl RepositoryConfig {
    pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
        }
    }
}
