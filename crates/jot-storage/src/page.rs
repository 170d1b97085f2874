//! Page value and validation rules.

use std::borrow::Cow;

use crate::key;

/// One named document.
///
/// Constructed per request: read from a store, synthesized as an empty draft,
/// or built from submitted form fields. Only a validated page should be saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Page title, also the source of the storage key.
    pub title: String,
    /// Raw document content.
    pub body: Vec<u8>,
}

/// Reason a page was rejected before persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Title is empty after trimming whitespace.
    #[error("Page Title cannot be empty")]
    TitleRequired,
    /// Body is empty after trimming whitespace.
    #[error("Page Body cannot be empty")]
    BodyRequired,
    /// Title has a `.` or `..` segment, which URL resolution would rewrite.
    #[error("Page Title cannot contain \".\" or \"..\" path segments")]
    TitleDotSegment,
    /// Title is too long to be used as a storage key.
    #[error("Page Title cannot be longer than {} bytes once encoded", key::MAX_KEY_LEN)]
    TitleTooLong,
}

impl Page {
    /// Create a page from a title and body.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Create an empty draft for a title that has no stored page yet.
    #[must_use]
    pub fn draft(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Check the page may be persisted.
    ///
    /// Pure checks: the title and the body must each contain something other
    /// than whitespace, and the title must fit in a storage key. Titles travel
    /// in URL paths with `/` kept, so no `/`-separated segment may be `.` or
    /// `..`; clients resolve those segments away and would reach another page.
    ///
    /// # Errors
    ///
    /// Returns the first rule the page violates, title rules first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if has_dot_segment(&self.title) {
            return Err(ValidationError::TitleDotSegment);
        }
        if !key::fits(&self.title) {
            return Err(ValidationError::TitleTooLong);
        }
        if self.body_text().trim().is_empty() {
            return Err(ValidationError::BodyRequired);
        }
        Ok(())
    }
}

/// Whether any `/`-separated segment of the title is `.` or `..`.
fn has_dot_segment(title: &str) -> bool {
    title.split('/').any(|segment| segment == "." || segment == "..")
}
