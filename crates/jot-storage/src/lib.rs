//! Page model, validation and storage for jot.
//!
//! This crate provides the [`Page`] value handled by every request, the
//! presence rules a page must satisfy before it is persisted, and a
//! [`PageStore`] trait abstracting where pages live:
//!
//! - **Unit testing** handlers without touching the real filesystem
//! - **Safe storage keys** derived from user-supplied titles
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Page`] with [`Page::validate`] returning [`ValidationError`]
//! - [`PageStore`] trait with `load()` and `save()` methods
//! - [`FsPageStore`] storing one file per page under a root directory
//! - [`MockPageStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use jot_storage::{FsPageStore, Page, PageStore};
//!
//! let store = FsPageStore::new(PathBuf::from("pages"));
//! let page = Page::new("Home", "Hello");
//! page.validate()?;
//! store.save(&page)?;
//! assert_eq!(store.load("Home")?.body, b"Hello");
//! ```

mod fs;
mod key;
#[cfg(feature = "mock")]
mod mock;
mod page;
mod storage;

pub use fs::FsPageStore;
pub use key::{MAX_KEY_LEN, storage_key};
#[cfg(feature = "mock")]
pub use mock::MockPageStore;
pub use page::{Page, ValidationError};
pub use storage::{PageStore, StorageError, StorageErrorKind};
