//! Mock page store for testing.
//!
//! Provides [`MockPageStore`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::key::storage_key;
use crate::page::Page;
use crate::storage::{PageStore, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock page store for testing.
///
/// Stores page bodies in memory keyed by title. Use the builder methods to
/// seed pages or to make every operation fail with a given error kind.
///
/// # Example
///
/// ```ignore
/// use jot_storage::{MockPageStore, PageStore, StorageErrorKind};
///
/// let store = MockPageStore::new().with_page("Home", "Hello");
/// assert_eq!(store.load("Home").unwrap().body, b"Hello");
///
/// let broken = MockPageStore::new().failing_with(StorageErrorKind::PermissionDenied);
/// assert!(broken.load("Home").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockPageStore {
    pages: RwLock<HashMap<String, Vec<u8>>>,
    failure: Option<StorageErrorKind>,
}

impl MockPageStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.pages.write().unwrap().insert(title.into(), body.into());
        self
    }

    /// Make every load and save fail with `kind`.
    #[must_use]
    pub fn failing_with(mut self, kind: StorageErrorKind) -> Self {
        self.failure = Some(kind);
        self
    }

    /// Stored body for a title, bypassing failure injection.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn body(&self, title: &str) -> Option<Vec<u8>> {
        self.pages.read().unwrap().get(title).cloned()
    }

    /// Number of stored pages.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.read().unwrap().len()
    }

    /// Whether no pages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self, title: &str) -> Result<(), StorageError> {
        storage_key(title).map_err(|e| e.with_backend(BACKEND))?;
        match self.failure {
            Some(kind) => Err(StorageError::new(kind).with_backend(BACKEND)),
            None => Ok(()),
        }
    }
}

impl PageStore for MockPageStore {
    fn load(&self, title: &str) -> Result<Page, StorageError> {
        self.check(title)?;
        self.pages
            .read()
            .unwrap()
            .get(title)
            .map(|body| Page::new(title, body.clone()))
            .ok_or_else(|| StorageError::not_found(title).with_backend(BACKEND))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        self.check(&page.title)?;
        self.pages
            .write()
            .unwrap()
            .insert(page.title.clone(), page.body.clone());
        Ok(())
    }
}
