//! Domain model for the local notes collection.
//!
//! # Responsibility
//! - Define the canonical `Note` record and its create/update inputs.
//! - Recover valid notes from loosely-typed persisted payloads.
//!
//! # Invariants
//! - Every note is identified by a stable, unique `NoteId`.
//! - `created_at <= updated_at` for every note.

pub mod note;
pub mod sanitize;
