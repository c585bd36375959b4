//! Presentation-side state around a [`NoteStore`].
//!
//! A front end forwards user intents here and renders whatever listing comes
//! back. The session remembers which note is being edited, the active tag
//! filter and the sort order, so `submit` knows whether to create or update.

use crate::entity::{Note, NoteForm, SortOrder};
use crate::error::{NoteError, Result};
use crate::storage::Storage;
use crate::store::NoteStore;

pub struct Session<S: Storage> {
    store: NoteStore<S>,
    editing: Option<String>,
    filter: Option<String>,
    sort: SortOrder,
}

impl<S: Storage> Session<S> {
    pub fn new(store: NoteStore<S>) -> Self {
        Self {
            store,
            editing: None,
            filter: None,
            sort: SortOrder::default(),
        }
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    /// Id of the note the next `submit` will update.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Current listing with the active filter and sort order.
    pub fn render(&self) -> Vec<Note> {
        self.store.list(self.filter.as_deref(), self.sort)
    }

    /// Start a new note: blank form, next submit creates.
    pub fn request_create(&mut self) -> NoteForm {
        self.editing = None;
        NoteForm::default()
    }

    /// Start editing `id`: form prefilled from the note, next submit updates it.
    pub fn request_edit(&mut self, id: &str) -> Result<NoteForm> {
        let note = self
            .store
            .get(id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;
        let form = NoteForm::from_note(note);
        self.editing = Some(note.id.clone());
        Ok(form)
    }

    /// Delete `id` once the user has confirmed. Unconfirmed requests change nothing.
    pub fn request_delete(&mut self, id: &str, confirmed: bool) -> Result<Vec<Note>> {
        if confirmed {
            self.store.delete(id)?;
            if self.editing.as_deref() == Some(id) {
                self.editing = None;
            }
        }
        Ok(self.render())
    }

    pub fn set_filter(&mut self, tag: &str) -> Vec<Note> {
        let tag = tag.trim();
        self.filter = (!tag.is_empty()).then(|| tag.to_string());
        self.render()
    }

    pub fn clear_filter(&mut self) -> Vec<Note> {
        self.filter = None;
        self.render()
    }

    pub fn set_sort(&mut self, order: SortOrder) -> Vec<Note> {
        self.sort = order;
        self.render()
    }

    /// Save the form. Creates a note unless an edit is in progress.
    ///
    /// On failure the edit target is kept so the form can be corrected and
    /// submitted again.
    pub fn submit(&mut self, form: &NoteForm) -> Result<Vec<Note>> {
        match self.editing.clone() {
            Some(id) => {
                self.store
                    .update(&id, &form.title, &form.content, &form.tags, form.pinned)?;
            }
            None => {
                self.store
                    .create(&form.title, &form.content, &form.tags, form.pinned)?;
            }
        }
        self.editing = None;
        Ok(self.render())
    }

    /// Abandon the current form.
    pub fn cancel(&mut self) {
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn session(storage: &MemoryStorage) -> Session<&MemoryStorage> {
        Session::new(NoteStore::open(storage))
    }

    #[test]
    fn test_submit_without_edit_creates() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);

        let form = session.request_create();
        assert_eq!(form, NoteForm::default());

        let listed = session
            .submit(&NoteForm::new("Title", "Body", "a, b", false))
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Title");
        assert!(session.editing().is_none());
    }

    #[test]
    fn test_edit_flow_updates_in_place() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        session
            .submit(&NoteForm::new("Draft", "v1", "work", false))
            .unwrap();
        let id = session.store().notes()[0].id.clone();

        let mut form = session.request_edit(&id).unwrap();
        assert_eq!(form, NoteForm::new("Draft", "v1", "work", false));
        assert_eq!(session.editing(), Some(id.as_str()));

        form.title = "Final".to_string();
        form.pinned = true;
        let listed = session.submit(&form).unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].title, "Final");
        assert!(listed[0].pinned);
        assert!(session.editing().is_none());
    }

    #[test]
    fn test_failed_submit_keeps_edit_target() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        session.submit(&NoteForm::new("t", "c", "", false)).unwrap();
        let id = session.store().notes()[0].id.clone();

        session.request_edit(&id).unwrap();
        let result = session.submit(&NoteForm::new("t", "  ", "", false));

        assert!(matches!(result, Err(NoteError::Validation(_))));
        assert_eq!(session.editing(), Some(id.as_str()));
        assert_eq!(session.store().notes()[0].content, "c");
    }

    #[test]
    fn test_request_edit_unknown_id() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);

        assert!(matches!(
            session.request_edit("nope"),
            Err(NoteError::NotFound(_))
        ));
        assert!(session.editing().is_none());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        session.submit(&NoteForm::new("t", "c", "", false)).unwrap();
        let id = session.store().notes()[0].id.clone();

        assert_eq!(session.request_delete(&id, false).unwrap().len(), 1);
        assert!(session.request_delete(&id, true).unwrap().is_empty());
        assert!(matches!(
            session.request_delete(&id, true),
            Err(NoteError::NotFound(_))
        ));
    }

    #[test]
    fn test_deleting_edited_note_clears_edit_target() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        session.submit(&NoteForm::new("t", "c", "", false)).unwrap();
        let id = session.store().notes()[0].id.clone();

        session.request_edit(&id).unwrap();
        session.request_delete(&id, true).unwrap();
        assert!(session.editing().is_none());
    }

    #[test]
    fn test_filter_and_sort_apply_to_render() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        session
            .submit(&NoteForm::new("a", "a", "Work-2024", false))
            .unwrap();
        session.submit(&NoteForm::new("b", "b", "home", false)).unwrap();

        let listed = session.set_filter("  work ");
        assert_eq!(session.filter(), Some("work"));
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "a");

        assert_eq!(session.set_filter("   ").len(), 2);
        assert!(session.filter().is_none());

        session.set_filter("home");
        assert_eq!(session.clear_filter().len(), 2);

        session.set_sort(SortOrder::Oldest);
        assert_eq!(session.sort(), SortOrder::Oldest);
        assert_eq!(session.render().len(), 2);
    }

    #[test]
    fn test_cancel_drops_edit_target() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        session.submit(&NoteForm::new("t", "c", "", false)).unwrap();
        let id = session.store().notes()[0].id.clone();

        session.request_edit(&id).unwrap();
        session.cancel();
        session.submit(&NoteForm::new("new", "note", "", false)).unwrap();

        assert_eq!(session.store().len(), 2);
    }
}
