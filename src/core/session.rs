//! The editing session seen by the UI
//!
//! [`EditorSession`] owns the live [`DocumentModel`] and its
//! [`DocumentStore`]. Every observable change ends up persisted: setters save
//! immediately, and in-place edits through [`EditorSession::field_mut`] are
//! flushed by [`EditorSession::sync`] once per frame.

use std::path::Path;

use super::document::{DocumentModel, Field, TemplateSeed, Theme};
use super::store::{DocumentStore, Storage};
use crate::export::print::{self, PrintError, PrintSettings, PrintSurface};
use crate::export::render::{render_preview, RenderedDocument};

pub struct EditorSession<S> {
    model: DocumentModel,
    store: DocumentStore<S>,
    seed: TemplateSeed,
    /// Snapshot last handed to the store, successfully or not
    persisted: DocumentModel,
}

impl<S: Storage> EditorSession<S> {
    /// Start from the template, then overlay whatever is stored
    pub fn open(storage: S, seed: TemplateSeed) -> Self {
        let defaults = DocumentModel::from_seed_today(&seed);
        Self::with_defaults(storage, seed, defaults)
    }

    /// Load over `defaults` and write the result back at once, so values
    /// taken from the defaults (the document date in particular) stay fixed
    /// for later sessions
    pub fn with_defaults(storage: S, seed: TemplateSeed, defaults: DocumentModel) -> Self {
        let mut store = DocumentStore::new(storage, defaults);
        let model = store.load();
        store.save(&model);
        Self {
            persisted: model.clone(),
            model,
            store,
            seed,
        }
    }

    pub fn model(&self) -> &DocumentModel {
        &self.model
    }

    #[allow(dead_code)]
    pub fn store(&self) -> &DocumentStore<S> {
        &self.store
    }

    #[allow(dead_code)]
    pub fn field(&self, field: Field) -> &str {
        self.model.field(field)
    }

    /// Replace a field and persist
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.model.field_mut(field) = value.into();
        self.sync();
    }

    /// Mutable access for in-place editing; call [`Self::sync`] afterwards
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        self.model.field_mut(field)
    }

    pub fn theme(&self) -> Theme {
        self.model.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.model.theme = theme;
        self.sync();
    }

    /// Outline items, recomputed from the index text on every call
    #[allow(dead_code)]
    pub fn index_items(&self) -> Vec<&str> {
        self.model.index_items()
    }

    /// Persist the model if it changed since the last save attempt
    ///
    /// A failed save is not retried until the model changes again.
    pub fn sync(&mut self) -> bool {
        if self.model == self.persisted {
            return false;
        }
        self.store.save(&self.model);
        self.persisted = self.model.clone();
        true
    }

    /// Restore title and body from the template
    pub fn reset_to_template(&mut self) {
        tracing::info!("Resetting title and body to template");
        self.model.reset_to_template(&self.seed);
        self.sync();
    }

    pub fn render(&self) -> RenderedDocument {
        render_preview(&self.model)
    }

    /// Standalone printable document for the current model
    pub fn print_document(&self, settings: &PrintSettings) -> String {
        print::build_print_document(&self.render(), settings)
    }

    /// Render, build and hand the document to `surface`
    pub fn export_to_print(&self, surface: &dyn PrintSurface, settings: &PrintSettings) {
        print::trigger_print(surface, &self.print_document(settings));
    }

    /// Save the standalone document to a file of the user's choosing
    pub fn export_to_file(&self, path: &Path, settings: &PrintSettings) -> Result<(), PrintError> {
        print::write_document(path, &self.print_document(settings))?;
        tracing::info!("Exported document to: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{MemoryStorage, StorageError, STORAGE_KEY};
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn defaults() -> DocumentModel {
        let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        DocumentModel::from_seed(&TemplateSeed::default(), date)
    }

    fn session(storage: MemoryStorage) -> EditorSession<MemoryStorage> {
        EditorSession::with_defaults(storage, TemplateSeed::default(), defaults())
    }

    /// Storage that counts writes through a shared handle
    #[derive(Clone, Default)]
    struct CountingStorage {
        inner: Rc<RefCell<MemoryStorage>>,
        writes: Rc<RefCell<usize>>,
    }

    impl Storage for CountingStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.borrow().read(key)
        }
        fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            *self.writes.borrow_mut() += 1;
            self.inner.borrow_mut().write(key, value)
        }
        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.inner.borrow_mut().remove(key)
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        opened: RefCell<Vec<String>>,
    }

    impl PrintSurface for RecordingSurface {
        fn open(&self, document: &str) -> Result<(), PrintError> {
            self.opened.borrow_mut().push(document.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_fresh_session_uses_defaults() {
        let session = session(MemoryStorage::default());
        assert_eq!(session.model(), &defaults());
        assert_eq!(session.theme(), Theme::Light);
    }

    #[test]
    fn test_edits_survive_reopen() {
        let mut first = session(MemoryStorage::default());
        first.set_field(Field::Author, "Ana");
        first.set_theme(Theme::Dark);
        let storage = first.store().storage().clone();

        let second = session(storage);
        assert_eq!(second.field(Field::Author), "Ana");
        assert_eq!(second.theme(), Theme::Dark);
        assert_eq!(second.field(Field::Title), defaults().title);
    }

    #[test]
    fn test_in_place_edit_needs_sync() {
        let storage = CountingStorage::default();
        let mut session =
            EditorSession::with_defaults(storage.clone(), TemplateSeed::default(), defaults());
        assert_eq!(*storage.writes.borrow(), 1);
        assert!(!session.sync());

        session.field_mut(Field::Conclusion).push_str(" Fim.");
        assert!(session.sync());
        assert!(!session.sync());
        assert_eq!(*storage.writes.borrow(), 2);

        let stored = storage.inner.borrow().read(STORAGE_KEY).unwrap().unwrap();
        assert!(stored.contains("Fim."));
    }

    #[test]
    fn test_doc_date_fixed_at_first_open() {
        let first = session(MemoryStorage::default());
        assert_eq!(first.model().doc_date, "01/10/2024");
        let storage = first.store().storage().clone();
        assert!(storage.read(STORAGE_KEY).unwrap().is_some());

        let next_day = NaiveDate::from_ymd_opt(2024, 10, 2).unwrap();
        let reopened = EditorSession::with_defaults(
            storage,
            TemplateSeed::default(),
            DocumentModel::from_seed(&TemplateSeed::default(), next_day),
        );
        assert_eq!(reopened.model().doc_date, "01/10/2024");
    }

    #[test]
    fn test_missing_doc_date_is_filled_and_kept() {
        let mut storage = MemoryStorage::default();
        storage.write(STORAGE_KEY, r#"{"author":"Ana"}"#).unwrap();
        let first = session(storage);
        assert_eq!(first.model().doc_date, "01/10/2024");

        let next_day = NaiveDate::from_ymd_opt(2024, 10, 2).unwrap();
        let reopened = EditorSession::with_defaults(
            first.store().storage().clone(),
            TemplateSeed::default(),
            DocumentModel::from_seed(&TemplateSeed::default(), next_day),
        );
        assert_eq!(reopened.model().doc_date, "01/10/2024");
        assert_eq!(reopened.field(Field::Author), "Ana");
    }

    #[test]
    fn test_index_items() {
        let mut session = session(MemoryStorage::default());
        session.set_field(Field::IndexText, "A\n\nB\nC");
        assert_eq!(session.index_items(), ["A", "B", "C"]);
        session.set_field(Field::IndexText, "");
        assert!(session.index_items().is_empty());
    }

    #[test]
    fn test_reset_to_template_keeps_author() {
        let mut session = session(MemoryStorage::default());
        session.set_field(Field::Body, "rascunho");
        session.set_field(Field::Title, "Outro");
        session.set_field(Field::Author, "Ana");

        session.reset_to_template();
        assert_eq!(session.field(Field::Title), defaults().title);
        assert_eq!(session.field(Field::Body), defaults().body);
        assert_eq!(session.field(Field::Author), "Ana");

        let reopened = EditorSession::with_defaults(
            session.store().storage().clone(),
            TemplateSeed::default(),
            defaults(),
        );
        assert_eq!(reopened.model(), session.model());
    }

    #[test]
    fn test_cleared_storage_reopens_with_defaults() {
        let mut first = session(MemoryStorage::default());
        first.set_field(Field::Author, "Ana");
        let mut storage = first.store().storage().clone();
        storage.write(STORAGE_KEY, "{corrupted").unwrap();

        assert_eq!(session(storage).model(), &defaults());
    }

    #[test]
    fn test_export_to_print() {
        let mut session = session(MemoryStorage::default());
        session.set_field(Field::Author, "Ana");
        session.set_field(Field::ClassName, "11.º A");

        let surface = RecordingSurface::default();
        session.export_to_print(&surface, &PrintSettings::default());

        let opened = surface.opened.borrow();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].contains("Ana • 11.º A"));
        assert!(opened[0].contains("size: A4"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trabalho.html");
        let session = session(MemoryStorage::default());
        session
            .export_to_file(&path, &PrintSettings::default())
            .unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert_eq!(html, session.print_document(&PrintSettings::default()));
    }
}
