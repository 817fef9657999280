//! Note repository: the owner of the in-memory collection and its mirror.
//!
//! # Responsibility
//! - Hold the canonical note collection for the process lifetime.
//! - Mirror every mutation to the key-value store through `StorageAdapter`.
//!
//! # Invariants
//! - The collection is always sorted by `updated_at DESC`, ties in insertion
//!   order.
//! - `NotFound` from `update_note` is the only error the repository surfaces.

use crate::model::note::NoteId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note_repo;
pub mod seed;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error surfaced by repository operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound(NoteId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for RepoError {}
