//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::convert::Infallible;

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is only expanded when the value also contains a braced
/// reference.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    if let Some(var_name) = first_unset_required(value) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var_name}}} not set"),
        });
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, Infallible> {
        Ok(std::env::var(var).ok())
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} could not be expanded", e.var_name),
    })
}

/// Find the first `${VAR}` reference without a default whose variable is unset.
fn first_unset_required(value: &str) -> Option<&str> {
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let end = after.find('}')?;
        let inner = &after[..end];
        if !inner.contains(":-") && std::env::var(inner).is_err() {
            return Some(inner);
        }
        rest = &after[end + 1..];
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("JOT_TEST_VAR_SIMPLE", "hello");
        }
        let result = expand_env("${JOT_TEST_VAR_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("JOT_TEST_VAR_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("JOT_UNSET_VAR_TEST");
        }
        let result = expand_env("${JOT_UNSET_VAR_TEST:-pages}", "test.field").unwrap();
        assert_eq!(result, "pages");
    }

    #[test]
    fn test_expand_with_default_uses_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("JOT_TEST_VAR_DEFAULT", "wiki");
        }
        let result = expand_env("${JOT_TEST_VAR_DEFAULT:-pages}", "test.field").unwrap();
        assert_eq!(result, "wiki");
        unsafe {
            std::env::remove_var("JOT_TEST_VAR_DEFAULT");
        }
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("JOT_MISSING_VAR_TEST");
        }
        let err = expand_env("data/${JOT_MISSING_VAR_TEST}", "pages.dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("JOT_MISSING_VAR_TEST"));
        assert!(err.to_string().contains("pages.dir"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("literal string", "test.field").unwrap();
        assert_eq!(result, "literal string");
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("$VAR", "test.field").unwrap();
        assert_eq!(result, "$VAR");
    }

    #[test]
    fn test_first_unset_required_skips_defaults() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("JOT_SCAN_UNSET");
        }
        assert_eq!(first_unset_required("${JOT_SCAN_UNSET:-x}"), None);
        assert_eq!(
            first_unset_required("a/${JOT_SCAN_UNSET}/b"),
            Some("JOT_SCAN_UNSET")
        );
    }
}
