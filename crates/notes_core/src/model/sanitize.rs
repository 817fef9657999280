//! Recovery of notes from loosely-typed persisted payloads.
//!
//! # Responsibility
//! - Turn whatever was decoded from the key-value mirror into valid `Note`s.
//! - Drop records that cannot satisfy the note invariants.
//!
//! # Invariants
//! - Output ids are unique; the first occurrence of a duplicate id wins.
//! - Output notes satisfy `created_at <= updated_at`.
//! - Sanitization never fails; unusable input yields an empty list.

use crate::model::note::Note;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Sanitizes a decoded payload into valid notes, preserving input order.
///
/// Rules:
/// - Non-array payloads and non-object elements are ignored.
/// - Elements missing `id`, `title`, `createdAt` or `updatedAt` (absent,
///   `null` or blank) are dropped.
/// - Numbers and booleans are coerced to strings for text fields and tags.
/// - `content` defaults to empty; `tags` default to empty.
/// - Timestamps accept RFC 3339 strings or epoch milliseconds.
pub fn sanitize_notes(payload: &Value) -> Vec<Note> {
    let Some(items) = payload.as_array() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut notes = Vec::with_capacity(items.len());
    for item in items {
        let Some(note) = item.as_object().and_then(sanitize_note) else {
            continue;
        };
        if seen.insert(note.id.clone()) {
            notes.push(note);
        }
    }
    notes
}

fn sanitize_note(raw: &Map<String, Value>) -> Option<Note> {
    let id = required_text(raw.get("id"))?;
    let title = required_text(raw.get("title"))?;
    let created_at = timestamp(raw.get("createdAt"))?;
    let updated_at = timestamp(raw.get("updatedAt"))?;

    let content = raw.get("content").and_then(coerce_text).unwrap_or_default();
    let tags = raw
        .get("tags")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(coerce_text).collect())
        .unwrap_or_default();

    Some(Note {
        id,
        title,
        content,
        tags,
        created_at,
        updated_at: updated_at.max(created_at),
    })
}

fn required_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(coerce_text)
        .filter(|text| !text.trim().is_empty())
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// RFC 3339 only covers four-digit years; anything outside cannot be written
// back in a form the string path accepts.
const MAX_RFC3339_YEAR: i32 = 9999;

fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let parsed = match value? {
        Value::String(text) => DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc)),
        Value::Number(number) => epoch_millis(number)
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }?;
    (0..=MAX_RFC3339_YEAR)
        .contains(&parsed.year())
        .then_some(parsed)
}

fn epoch_millis(number: &serde_json::Number) -> Option<i64> {
    if let Some(millis) = number.as_i64() {
        return Some(millis);
    }
    // JavaScript hosts may write integral epochs as floats (`1.7e12`).
    let value = number.as_f64()?;
    let in_range = value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value < i64::MAX as f64;
    in_range.then_some(value as i64)
}
