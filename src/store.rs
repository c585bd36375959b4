//! The note collection and its persistence.
//!
//! [`NoteStore`] is the single owner of the in-memory notes. Every mutation
//! is written back through the injected [`Storage`] before it returns; if
//! that write fails the in-memory change is undone, so the collection and
//! the stored copy never drift apart.

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::entity::{parse_tags, Note, SortOrder};
use crate::error::{NoteError, Result};
use crate::storage::{decode_notes, encode_notes, Storage, DEFAULT_KEY};

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

pub struct NoteStore<S: Storage> {
    storage: S,
    key: String,
    notes: Vec<Note>,
    clock: Clock,
}

impl<S: Storage> NoteStore<S> {
    /// Load the collection stored under the default key.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_KEY)
    }

    /// Load the collection stored under `key`.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            notes: Vec::new(),
            clock: Box::new(Utc::now),
        };
        store.notes = store.load();
        store
    }

    /// Replace the time source used for `createdAt`/`updatedAt`.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Read the persisted collection.
    ///
    /// Never fails: a missing key, an unreadable backend, or malformed data
    /// all yield an empty collection.
    pub fn load(&self) -> Vec<Note> {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored notes");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read stored notes");
                return Vec::new();
            }
        };

        match decode_notes(&raw) {
            Ok(notes) => {
                tracing::debug!(key = %self.key, count = notes.len(), "loaded notes");
                notes
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ignoring stored notes");
                Vec::new()
            }
        }
    }

    /// Discard in-memory state and load again from storage.
    pub fn reload(&mut self) {
        self.notes = self.load();
    }

    /// Write the whole collection to storage.
    pub fn persist(&self) -> Result<()> {
        let raw = encode_notes(&self.notes)?;
        self.storage.write(&self.key, &raw)?;
        tracing::debug!(key = %self.key, count = self.notes.len(), "persisted notes");
        Ok(())
    }

    /// Notes in collection (insertion) order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Resolve an exact id or a unique id prefix to a full id.
    pub fn resolve(&self, id_or_prefix: &str) -> Result<String> {
        if let Some(note) = self.get(id_or_prefix) {
            return Ok(note.id.clone());
        }

        let needle = id_or_prefix.trim();
        if needle.is_empty() {
            return Err(NoteError::NotFound(id_or_prefix.to_string()));
        }

        let mut matches = self.notes.iter().filter(|n| n.id.starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(note), None) => Ok(note.id.clone()),
            (Some(_), Some(_)) => Err(NoteError::AmbiguousId(needle.to_string())),
            (None, _) => Err(NoteError::NotFound(needle.to_string())),
        }
    }

    /// Notes whose tags match `filter_tag`, pinned notes first.
    ///
    /// The filter is a case-insensitive substring test against each tag; a
    /// missing or blank filter matches everything. Pinned and unpinned notes
    /// are sorted separately by `updatedAt` and never interleave.
    pub fn list(&self, filter_tag: Option<&str>, sort: SortOrder) -> Vec<Note> {
        let needle = filter_tag
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());

        let (mut pinned, mut regular): (Vec<Note>, Vec<Note>) = self
            .notes
            .iter()
            .filter(|n| needle.as_deref().map_or(true, |t| n.has_tag_containing(t)))
            .cloned()
            .partition(|n| n.pinned);

        let by_date = |a: &Note, b: &Note| match sort {
            SortOrder::Newest => b.updated_at.cmp(&a.updated_at),
            SortOrder::Oldest => a.updated_at.cmp(&b.updated_at),
        };
        pinned.sort_by(by_date);
        regular.sort_by(by_date);

        pinned.extend(regular);
        pinned
    }

    /// Validate and append a new note, then persist.
    pub fn create(&mut self, title: &str, content: &str, tags: &str, pinned: bool) -> Result<Note> {
        let (title, content) = validate(title, content)?;

        let now = self.now();
        let note = Note {
            id: self.fresh_id(),
            title,
            content,
            tags: parse_tags(tags),
            pinned,
            created_at: now,
            updated_at: now,
        };

        self.notes.push(note.clone());
        if let Err(e) = self.persist() {
            self.notes.pop();
            return Err(e);
        }

        tracing::info!(id = %note.id, pinned = note.pinned, "created note");
        Ok(note)
    }

    /// Rewrite an existing note's fields, keeping its id and `createdAt`.
    pub fn update(
        &mut self,
        id: &str,
        title: &str,
        content: &str,
        tags: &str,
        pinned: bool,
    ) -> Result<Note> {
        let index = self.index_of(id)?;
        let (title, content) = validate(title, content)?;

        let previous = self.notes[index].clone();
        // updatedAt never moves backwards, even if the wall clock does
        let updated_at = self.now().max(previous.updated_at);
        let note = Note {
            id: previous.id.clone(),
            title,
            content,
            tags: parse_tags(tags),
            pinned,
            created_at: previous.created_at,
            updated_at,
        };

        self.notes[index] = note.clone();
        if let Err(e) = self.persist() {
            self.notes[index] = previous;
            return Err(e);
        }

        tracing::info!(id = %note.id, pinned = note.pinned, "updated note");
        Ok(note)
    }

    /// Remove a note and persist. Returns the removed note.
    pub fn delete(&mut self, id: &str) -> Result<Note> {
        let index = self.index_of(id)?;

        let removed = self.notes.remove(index);
        if let Err(e) = self.persist() {
            self.notes.insert(index, removed);
            return Err(e);
        }

        tracing::info!(id = %removed.id, "deleted note");
        Ok(removed)
    }

    /// Current time at the precision the persisted format keeps.
    fn now(&self) -> DateTime<Utc> {
        (self.clock)().trunc_subsecs(3)
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn validate(title: &str, content: &str) -> Result<(String, String)> {
    let title = title.trim();
    let content = content.trim();

    if title.is_empty() || content.is_empty() {
        return Err(NoteError::Validation(
            "title and content must not be empty".to_string(),
        ));
    }

    Ok((title.to_string(), content.to_string()))
}
