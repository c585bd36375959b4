use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::entity::{parse_timestamp, Note};
use crate::error::{NoteError, Result};

/// Serialize the whole collection as a JSON array.
pub fn encode_notes(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string_pretty(notes)?)
}

/// Parse a persisted collection.
///
/// Fails with [`NoteError::StorageRead`] only when the blob is not a JSON
/// array at all. Individual records are checked field by field: unusable
/// records are skipped, missing optional fields take their defaults.
pub fn decode_notes(raw: &str) -> Result<Vec<Note>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| NoteError::StorageRead(e.to_string()))?;

    let records = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(NoteError::StorageRead(format!(
                "expected an array of notes, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut seen = HashSet::new();
    let mut notes = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let Some(note) = record.as_object().and_then(parse_note_from_map) else {
            tracing::warn!(index, "skipping malformed note record");
            continue;
        };
        if !seen.insert(note.id.clone()) {
            tracing::warn!(index, id = %note.id, "skipping note with duplicate id");
            continue;
        }
        notes.push(note);
    }

    Ok(notes)
}

fn parse_note_from_map(map: &Map<String, Value>) -> Option<Note> {
    let id = match map.get("id")? {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        _ => return None,
    };

    let timestamp = |field: &str| map.get(field).and_then(Value::as_str).and_then(parse_timestamp);
    let (created_at, updated_at) = match (timestamp("createdAt"), timestamp("updatedAt")) {
        (Some(c), Some(u)) => (c, u),
        (Some(c), None) => (c, c),
        (None, Some(u)) => (u, u),
        (None, None) => return None,
    };

    let text = |field: &str| {
        map.get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    };
    let tags = map
        .get("tags")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    let pinned = map.get("pinned").and_then(Value::as_bool).unwrap_or(false);

    Some(Note {
        id,
        title: text("title"),
        content: text("content"),
        tags,
        pinned,
        created_at,
        updated_at,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
