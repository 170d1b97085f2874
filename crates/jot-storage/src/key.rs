//! Title to storage key mapping.
//!
//! Titles come straight from request paths and form fields, so they are never
//! joined onto a filesystem path as-is. Every byte outside `[A-Za-z0-9_-]` is
//! percent-encoded (including `%` itself), which makes the mapping injective
//! and leaves no way to express `/`, `\`, `..` or NUL in the resulting name.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::storage::StorageError;

/// Characters escaped in storage keys.
const TITLE_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// File extension appended to every key.
const KEY_EXTENSION: &str = "txt";

/// Maximum storage key length in bytes.
///
/// Stays below the common 255-byte filename limit.
pub const MAX_KEY_LEN: usize = 240;

/// Encode a title without checking its length.
fn encode(title: &str) -> String {
    format!("{}.{KEY_EXTENSION}", utf8_percent_encode(title, TITLE_ESCAPE))
}

/// Check whether a non-empty title produces a key within [`MAX_KEY_LEN`].
pub(crate) fn fits(title: &str) -> bool {
    encode(title).len() <= MAX_KEY_LEN
}

/// Resolve the storage key (file name) for a title.
///
/// # Examples
///
/// ```
/// assert_eq!(jot_storage::storage_key("Home").unwrap(), "Home.txt");
/// assert_eq!(jot_storage::storage_key("a/b").unwrap(), "a%2Fb.txt");
/// ```
///
/// # Errors
///
/// Returns an [`InvalidPath`](crate::StorageErrorKind::InvalidPath) error if the
/// title is empty or its key would exceed [`MAX_KEY_LEN`].
pub fn storage_key(title: &str) -> Result<String, StorageError> {
    if title.is_empty() {
        return Err(StorageError::invalid_title(title));
    }
    let key = encode(title);
    if key.len() > MAX_KEY_LEN {
        return Err(StorageError::invalid_title(title));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::StorageErrorKind;

    #[test]
    fn test_plain_title_is_kept() {
        assert_eq!(storage_key("FrontPage").unwrap(), "FrontPage.txt");
        assert_eq!(storage_key("release-notes_2").unwrap(), "release-notes_2.txt");
    }

    #[test]
    fn test_separators_are_escaped() {
        assert_eq!(
            storage_key("../etc/passwd").unwrap(),
            "%2E%2E%2Fetc%2Fpasswd.txt"
        );
        assert_eq!(storage_key("a\\b").unwrap(), "a%5Cb.txt");
        assert_eq!(storage_key("nul\0byte").unwrap(), "nul%00byte.txt");
    }

    #[test]
    fn test_dot_titles_are_escaped() {
        assert_eq!(storage_key(".").unwrap(), "%2E.txt");
        assert_eq!(storage_key("..").unwrap(), "%2E%2E.txt");
    }

    #[test]
    fn test_percent_is_escaped() {
        // "a%2Fb" and "a/b" must not share a key
        assert_eq!(storage_key("a%2Fb").unwrap(), "a%252Fb.txt");
        assert_ne!(storage_key("a%2Fb").unwrap(), storage_key("a/b").unwrap());
    }

    #[test]
    fn test_whitespace_and_unicode() {
        assert_eq!(storage_key("My Page").unwrap(), "My%20Page.txt");
        assert_eq!(storage_key("café").unwrap(), "caf%C3%A9.txt");
    }

    #[test]
    fn test_distinct_titles_have_distinct_keys() {
        let titles = ["Home", "home", "Home ", " Home", "Home.txt", "Home%2Etxt"];
        let mut keys: Vec<_> = titles.iter().map(|t| storage_key(t).unwrap()).collect();
        keys.sort();
        keys.dedup();

        assert_eq!(keys.len(), titles.len());
    }

    #[test]
    fn test_empty_title_rejected() {
        let err = storage_key("").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_long_title_rejected() {
        let title = "x".repeat(MAX_KEY_LEN);
        let err = storage_key(&title).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
        assert!(!fits(&title));
    }

    #[test]
    fn test_key_length_boundary() {
        // 236 chars + ".txt" is exactly the limit
        let title = "x".repeat(MAX_KEY_LEN - 4);

        assert!(fits(&title));
        assert_eq!(storage_key(&title).unwrap().len(), MAX_KEY_LEN);
    }
}
