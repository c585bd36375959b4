use chrono::{DateTime, Local, Utc};

use crate::entity::Note;

const DATE_FORMAT: &str = "%d %b %Y %H:%M";

/// Timestamp in local time for display.
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(DATE_FORMAT).to_string()
}

/// Tags joined for display, or a placeholder when there are none.
pub fn format_tags(note: &Note) -> String {
    if note.tags.is_empty() {
        "(no tags)".to_string()
    } else {
        note.tags.join(", ")
    }
}

/// Multi-line listing entry.
pub fn format_summary(note: &Note) -> String {
    let marker = if note.pinned { '*' } else { ' ' };
    format!(
        "{} {} {}\n      tags: {}\n      created {}, updated {}",
        marker,
        note.short_id(),
        note.title,
        format_tags(note),
        format_date(&note.created_at),
        format_date(&note.updated_at)
    )
}

/// Full view of one note.
pub fn format_detail(note: &Note) -> String {
    let mut out = format!("Note {}{}\n", note.id, if note.pinned { " (pinned)" } else { "" });
    out.push_str(&format!("Title: {}\n", note.title));
    out.push_str(&format!("Tags: {}\n", format_tags(note)));
    out.push_str(&format!("Created: {}\n", format_date(&note.created_at)));
    out.push_str(&format!("Updated: {}\n", format_date(&note.updated_at)));
    out.push_str(&format!("\n{}", note.content));
    out
}

/// Message shown when a listing comes back empty.
pub fn empty_message(filter: Option<&str>) -> String {
    match filter.map(str::trim).filter(|t| !t.is_empty()) {
        Some(tag) => format!("No notes match tag '{}'.", tag),
        None => "No notes yet. Run 'notepin add <title>' to create one.".to_string(),
    }
}
