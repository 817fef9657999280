//! Note search.
//!
//! # Responsibility
//! - Normalize free-text queries.
//! - Match notes by case-insensitive substring over title, content and tags.
//!
//! # Invariants
//! - Blank queries never filter.
//! - Matching is plain substring containment; no tokenizing or fuzziness.

pub mod query;

pub use query::NoteQuery;
