//! Filesystem page store.
//!
//! Provides [`FsPageStore`], which keeps one file per page under a root
//! directory. File names come from [`storage_key`](crate::storage_key); file
//! contents are the raw body bytes with no header or framing.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::key::storage_key;
use crate::page::Page;
use crate::storage::{PageStore, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem page store.
///
/// Saves write the body to a temporary file inside the root and then rename it
/// over the page file, so a concurrent load sees either the old or the new body
/// in full. There is no locking: when two saves for the same title race, the
/// last rename wins.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use jot_storage::{FsPageStore, Page, PageStore};
///
/// let store = FsPageStore::new(PathBuf::from("pages"));
/// store.save(&Page::new("Home", "Hello"))?;
/// ```
#[derive(Debug, Clone)]
pub struct FsPageStore {
    /// Root directory holding page files.
    root: PathBuf,
}

impl FsPageStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory does not need to exist yet; it is created on first save.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the file path for a title.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidPath` error if the title has no storage key.
    pub fn path_for(&self, title: &str) -> Result<PathBuf, StorageError> {
        let key = storage_key(title).map_err(|e| e.with_backend(BACKEND))?;
        Ok(self.root.join(key))
    }

    /// Write `body` to `path` through a temporary file in the root.
    fn write_atomic(&self, path: &Path, body: &[u8]) -> Result<(), StorageError> {
        let io_err = |e, p: &Path| StorageError::io(e, Some(p.to_path_buf())).with_backend(BACKEND);

        fs::create_dir_all(&self.root).map_err(|e| io_err(e, &self.root))?;

        let mut tmp = NamedTempFile::new_in(&self.root).map_err(|e| io_err(e, &self.root))?;
        tmp.write_all(body).map_err(|e| io_err(e, tmp.path()))?;
        tmp.as_file().sync_all().map_err(|e| io_err(e, tmp.path()))?;
        tmp.persist(path).map_err(|e| io_err(e.error, path))?;

        Ok(())
    }
}

impl PageStore for FsPageStore {
    fn load(&self, title: &str) -> Result<Page, StorageError> {
        let path = self.path_for(title)?;
        let body = fs::read(&path)
            .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;
        tracing::debug!(title, path = %path.display(), bytes = body.len(), "Loaded page");
        Ok(Page::new(title, body))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        let path = self.path_for(&page.title)?;
        self.write_atomic(&path, &page.body)?;
        tracing::debug!(
            title = %page.title,
            path = %path.display(),
            bytes = page.body.len(),
            "Saved page"
        );
        Ok(())
    }
}
