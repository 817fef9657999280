//! Default notes installed on first run or after unrecoverable mirror data.

use crate::model::note::{generate_note_id, Note};
use chrono::{DateTime, Duration, Utc};

pub const WELCOME_TITLE: &str = "Welcome to Notes";
pub const TIPS_TITLE: &str = "Tips";

/// Builds the two seed notes relative to `now`.
///
/// "Welcome to Notes" is stamped one hour ago, "Tips" ten minutes ago.
pub fn seed_notes(now: DateTime<Utc>) -> Vec<Note> {
    vec![
        seed(
            WELCOME_TITLE,
            "This is your local notebook. Notes are stored in this browser or \
             device only.\n\nCreate a note, give it a title and some tags, and \
             it shows up at the top of the list.",
            &["welcome", "getting-started"],
            now - Duration::hours(1),
        ),
        seed(
            TIPS_TITLE,
            "Search matches titles, content and tags, ignoring case.\n\
             The most recently edited note is always listed first.",
            &["tips", "search"],
            now - Duration::minutes(10),
        ),
    ]
}

fn seed(title: &str, content: &str, tags: &[&str], stamped_at: DateTime<Utc>) -> Note {
    Note {
        id: generate_note_id(),
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        created_at: stamped_at,
        updated_at: stamped_at,
    }
}
