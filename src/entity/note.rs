// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub pinned: bool,
    #[serde(with = "super::iso8601")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "super::iso8601")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// True when any tag contains `needle` (already lowercased).
    pub(crate) fn has_tag_containing(&self, needle: &str) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
    }

    /// First eight characters of the id, for display.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// The fields a user fills in when saving a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
    /// Comma-separated, as typed
    pub tags: String,
    pub pinned: bool,
}

impl NoteForm {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: impl Into<String>,
        pinned: bool,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: tags.into(),
            pinned,
        }
    }

    /// Prefill a form from an existing note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.join(", "),
            pinned: note.pinned,
        }
    }
}

/// Split a comma-separated tag string, trimming entries and dropping empty ones.
/// Order and duplicates are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_trims_and_drops_empty() {
        assert_eq!(
            parse_tags(" work , ,home,, work "),
            vec!["work".to_string(), "home".to_string(), "work".to_string()]
        );
        assert!(parse_tags("   ").is_empty());
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_form_from_note_joins_tags() {
        let now = Utc::now();
        let note = Note {
            id: "1700000000000".to_string(),
            title: "Groceries".to_string(),
            content: "milk".to_string(),
            tags: vec!["home".to_string(), "errands".to_string()],
            pinned: true,
            created_at: now,
            updated_at: now,
        };

        let form = NoteForm::from_note(&note);
        assert_eq!(form.tags, "home, errands");
        assert!(form.pinned);
        assert_eq!(parse_tags(&form.tags), note.tags);
        assert_eq!(note.short_id(), "17000000");
    }

    #[test]
    fn test_serializes_camel_case_iso_timestamps() {
        let ts = chrono::DateTime::parse_from_rfc3339("2024-01-02T03:04:05.678Z")
            .unwrap()
            .with_timezone(&Utc);
        let note = Note {
            id: "n1".to_string(),
            title: "t".to_string(),
            content: "c".to_string(),
            tags: vec![],
            pinned: false,
            created_at: ts,
            updated_at: ts,
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["createdAt"], "2024-01-02T03:04:05.678Z");
        assert_eq!(json["updatedAt"], "2024-01-02T03:04:05.678Z");
        assert_eq!(json["pinned"], false);
    }
}
