use crate::model::note::Note;

/// Normalized, case-folded search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteQuery {
    needle: String,
}

impl NoteQuery {
    /// Parses raw user input; returns `None` when it is absent or blank.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    /// The case-folded needle.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, note: &Note) -> bool {
        self.contained_in(&note.title)
            || self.contained_in(&note.content)
            || note.tags.iter().any(|tag| self.contained_in(tag))
    }

    fn contained_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }
}
