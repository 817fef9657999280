//! In-memory note repository mirrored to a key-value store.
//!
//! # Responsibility
//! - Load, sanitize and seed the collection at construction.
//! - Provide create/get/list/update/delete and substring search.
//! - Persist the full collection after each effective mutation.
//!
//! # Invariants
//! - Note ids are unique within the collection.
//! - `created_at` never changes after creation; `updated_at` never decreases.
//! - A failed update or a delete of an unknown id writes nothing.

use crate::clock::{Clock, SystemClock};
use crate::config::RepositoryConfig;
use crate::model::note::{generate_note_id, NewNote, Note, NoteUpdate};
use crate::model::sanitize::sanitize_notes;
use crate::repo::seed::seed_notes;
use crate::repo::{RepoError, RepoResult};
use crate::search::NoteQuery;
use crate::storage::{KeyValueStore, StorageAdapter};
use log::{debug, info};
use serde_json::Value;
use std::collections::BTreeSet;

/// Owner of the canonical note collection.
///
/// Constructed once by the composition root and passed by reference to
/// consumers; there is no process-wide instance.
pub struct NoteRepository<S, C = SystemClock> {
    notes: Vec<Note>,
    storage: StorageAdapter<S>,
    config: RepositoryConfig,
    clock: C,
}

impl<S: KeyValueStore> NoteRepository<S> {
    /// Loads the repository from `store` with default config and the system clock.
    pub fn new(store: S) -> Self {
        Self::with_config(store, RepositoryConfig::default(), SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> NoteRepository<S, C> {
    /// Loads the repository, seeding and persisting defaults when the mirror
    /// holds no usable notes.
    pub fn with_config(store: S, config: RepositoryConfig, clock: C) -> Self {
        let storage = StorageAdapter::new(store);
        let loaded = storage
            .read::<Value>(&config.storage_key)
            .map(|payload| sanitize_notes(&payload))
            .unwrap_or_default();

        let mut repo = Self {
            notes: loaded,
            storage,
            config,
            clock,
        };

        if repo.notes.is_empty() {
            repo.notes = seed_notes(repo.clock.now());
            repo.sort();
            repo.persist();
            info!(
                "event=notes_load module=repo status=seeded key={} count={}",
                repo.config.storage_key,
                repo.notes.len()
            );
        } else {
            repo.sort();
            info!(
                "event=notes_load module=repo status=ok key={} count={}",
                repo.config.storage_key,
                repo.notes.len()
            );
        }

        repo
    }

    /// Lists notes newest first, optionally filtered by a substring query.
    ///
    /// A query that is blank after trimming returns every note.
    pub fn list_notes(&self, query: Option<&str>) -> Vec<Note> {
        match NoteQuery::parse(query) {
            Some(query) => self
                .notes
                .iter()
                .filter(|note| query.matches(note))
                .cloned()
                .collect(),
            None => self.notes.clone(),
        }
    }

    /// Gets one note by id.
    pub fn get_note(&self, id: &str) -> Option<Note> {
        self.notes.iter().find(|note| note.id == id).cloned()
    }

    /// Creates one note and persists the collection.
    pub fn create_note(&mut self, input: NewNote) -> Note {
        let note = Note::from_new(generate_note_id(), input, self.clock.now());
        self.notes.insert(0, note.clone());
        self.sort();
        self.persist();
        info!(
            "event=note_create module=repo status=ok note_id={} count={}",
            note.id,
            self.notes.len()
        );
        note
    }

    /// Merges `update` onto the stored note with the same id.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no note has `update.id`; nothing changes.
    pub fn update_note(&mut self, update: NoteUpdate) -> RepoResult<Note> {
        let now = self.clock.now();
        let position = self.notes.iter().position(|note| note.id == update.id);
        let Some(index) = position else {
            info!(
                "event=note_update module=repo status=error error_code=not_found note_id={}",
                update.id
            );
            return Err(RepoError::NotFound(update.id));
        };

        let stored = &mut self.notes[index];
        stored.apply_update(update, now);
        let updated = stored.clone();
        self.sort();
        self.persist();
        info!(
            "event=note_update module=repo status=ok note_id={}",
            updated.id
        );
        Ok(updated)
    }

    /// Deletes the note with `id` if present.
    ///
    /// Returns whether a note was removed. Unknown ids are a silent no-op.
    pub fn delete_note(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            debug!("event=note_delete module=repo status=noop note_id={id}");
            return false;
        }

        self.persist();
        info!(
            "event=note_delete module=repo status=ok note_id={} count={}",
            id,
            self.notes.len()
        );
        true
    }

    /// Distinct tags across all notes, sorted case-insensitively.
    pub fn list_tags(&self) -> Vec<String> {
        let unique: BTreeSet<(String, &String)> = self
            .notes
            .iter()
            .flat_map(|note| note.tags.iter())
            .map(|tag| (tag.to_lowercase(), tag))
            .collect();
        unique.into_iter().map(|(_, tag)| tag.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn storage(&self) -> &StorageAdapter<S> {
        &self.storage
    }

    /// Releases the underlying store, e.g. to reopen a repository over it.
    pub fn into_storage(self) -> S {
        self.storage.into_store()
    }

    fn sort(&mut self) {
        // `sort_by` is stable: equal timestamps keep their relative order.
        self.notes
            .sort_by(|left, right| right.sort_key().cmp(&left.sort_key()));
    }

    fn persist(&mut self) {
        self.storage.write(&self.config.storage_key, &self.notes);
    }
}
