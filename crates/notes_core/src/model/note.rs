//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted in the key-value mirror.
//! - Provide create/update input shapes used by the repository.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `created_at` is set once; `updated_at` never precedes it.
//! - Persisted field names are camelCase (`createdAt`, `updatedAt`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque note identifier.
///
/// Kept as a plain string so identifiers written by older payloads stay valid.
pub type NoteId = String;

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable unique identifier.
    pub id: NoteId,
    /// Display title. Expected to be non-blank.
    pub title: String,
    /// Free-form body text, may be empty.
    pub content: String,
    /// Ordered tag list, may be empty.
    pub tags: Vec<String>,
    /// Creation instant, serialized as RFC 3339.
    pub created_at: DateTime<Utc>,
    /// Last modification instant, serialized as RFC 3339.
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Builds a note from a create payload, stamping both timestamps with `now`.
    pub fn from_new(id: NoteId, input: NewNote, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            content: input.content.unwrap_or_default(),
            tags: input.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges provided update fields onto this note.
    ///
    /// # Invariants
    /// - `id` and `created_at` are never touched.
    /// - `updated_at` becomes `now`, but never moves backwards.
    /// - Any caller-supplied `updated_at` on the update is ignored.
    pub fn apply_update(&mut self, update: NoteUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        self.updated_at = now.max(self.updated_at).max(self.created_at);
    }

    /// Timestamp used for recency ordering.
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Input for creating one note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    /// Defaults to the empty string.
    pub content: Option<String>,
    /// Defaults to no tags.
    pub tags: Option<Vec<String>>,
}

impl NewNote {
    /// Creates a payload with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Partial update for an existing note.
///
/// `None` fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub id: NoteId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Accepted for symmetry with `Note`; the repository always overrides it.
    pub updated_at: Option<DateTime<Utc>>,
}

impl NoteUpdate {
    pub fn for_id(id: impl Into<NoteId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

impl From<Note> for NoteUpdate {
    /// Full replacement update carrying every editable field.
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: Some(note.title),
            content: Some(note.content),
            tags: Some(note.tags),
            updated_at: Some(note.updated_at),
        }
    }
}

/// Generates a new note identifier.
///
/// UUIDv7 text: a millisecond timestamp prefix followed by random bits, so ids
/// are time-ordered within a process and unique with overwhelming probability.
pub fn generate_note_id() -> NoteId {
    Uuid::now_v7().to_string()
}
