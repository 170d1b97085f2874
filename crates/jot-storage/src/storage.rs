//! Page store trait and error types.
//!
//! Provides the core [`PageStore`] trait for loading and saving pages by title,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Title Convention
//!
//! All `title` parameters are page titles exactly as the user supplied them.
//! Backends derive their own keys (see [`storage_key`](crate::storage_key))
//! and never use a title as a path directly.

use std::path::PathBuf;

use crate::page::Page;

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// No page is stored under the title.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Title cannot be turned into a storage key.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create an error for a title that has no valid storage key.
    #[must_use]
    pub fn invalid_title(title: &str) -> Self {
        Self::new(StorageErrorKind::InvalidPath).with_source(InvalidTitle(title.chars().count()))
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// Whether the error means the page simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid title",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Source attached to [`StorageErrorKind::InvalidPath`] errors.
#[derive(Debug, thiserror::Error)]
#[error("title of {0} characters cannot be used as a storage key")]
struct InvalidTitle(usize);

/// Storage abstraction for pages.
///
/// Implementations are shared by every request handler, so they must be
/// `Send + Sync` and must not keep per-request state. Concurrent saves to the
/// same title are allowed to race; the last completed save wins, but a load
/// never observes a partially written body.
pub trait PageStore: Send + Sync {
    /// Load the page stored under `title`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with kind [`StorageErrorKind::NotFound`] if no
    /// page is stored under the title, [`StorageErrorKind::InvalidPath`] if the
    /// title cannot name a page, or another kind for backend failures.
    fn load(&self, title: &str) -> Result<Page, StorageError>;

    /// Persist the page, replacing any previous body for its title.
    ///
    /// The page is not validated here; callers run [`Page::validate`] first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the title has no storage key or the write fails.
    fn save(&self, page: &Page) -> Result<(), StorageError>;
}
