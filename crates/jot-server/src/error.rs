//! Error types and the error-to-response mapping.
//!
//! Every handler failure is a [`ServerError`]. [`map_error`] is the single
//! place that decides the status code: it classifies the error into an
//! [`ErrorCategory`], renders that category's error template, and degrades to a
//! plain-text 500 whenever classification or rendering is not possible.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use jot_storage::{StorageError, StorageErrorKind, ValidationError};

use crate::templates::{ErrorPayload, RenderError, Renderer, TemplateData};

/// Closed set of error categories surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Requested title has no stored page.
    NotFound,
    /// Submitted page failed validation.
    BadRequest,
    /// Storage or rendering failure unrelated to user input.
    InternalError,
}

impl ErrorCategory {
    /// HTTP status for the category.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logical name of the category's error template.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::BadRequest => "bad-request",
            Self::InternalError => "internal-error",
        }
    }
}

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No page is stored under the title.
    #[error("Page not found: {title}")]
    PageNotFound {
        /// Requested title.
        title: String,
        /// Store error that reported the missing page.
        source: StorageError,
    },

    /// Submitted page failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Submitted form could not be decoded.
    #[error("Invalid form submission: {0}")]
    Form(#[from] FormRejection),

    /// Storage failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Template lookup or execution failure.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Failure with no category; never rendered through a template.
    #[error("{0}")]
    Unclassified(String),
}

impl ServerError {
    /// Classify a failed page load.
    ///
    /// A title that cannot name a stored page is reported the same way as a
    /// missing page.
    #[must_use]
    pub fn from_load(title: &str, err: StorageError) -> Self {
        match err.kind {
            StorageErrorKind::NotFound | StorageErrorKind::InvalidPath => Self::PageNotFound {
                title: title.to_owned(),
                source: err,
            },
            _ => Self::Storage(err),
        }
    }

    /// Error category, or `None` for unclassified failures.
    #[must_use]
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::PageNotFound { .. } => Some(ErrorCategory::NotFound),
            Self::Validation(_) | Self::Form(_) => Some(ErrorCategory::BadRequest),
            Self::Storage(_) | Self::Render(_) => Some(ErrorCategory::InternalError),
            Self::Unclassified(_) => None,
        }
    }
}

/// Turn a failure into a terminating response.
///
/// Unclassified failures and failures while rendering the error template both
/// produce a plain-text 500 with a diagnostic message; nothing here returns an
/// error or retries.
pub(crate) fn map_error(renderer: &dyn Renderer, err: &ServerError) -> Response {
    tracing::error!(error = %err, "Request failed");

    let Some(category) = err.category() else {
        return plain_internal_error(format!(
            "{err} does not have an appropriate status code"
        ));
    };

    let payload = ErrorPayload {
        message: err.to_string(),
    };
    match renderer.render(category.template(), &TemplateData::Error(&payload)) {
        Ok(body) => (category.status(), Html(body)).into_response(),
        Err(render_err) => plain_internal_error(format!(
            "template execution error for {}: {render_err}",
            category.template()
        )),
    }
}

/// Plain-text 500 response carrying a diagnostic message.
fn plain_internal_error(message: String) -> Response {
    tracing::error!(message = %message, "Falling back to plain error response");
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::http::header;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Renderer that records requested names and echoes the error message.
    #[derive(Default)]
    struct RecordingRenderer {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Renderer for RecordingRenderer {
        fn render(&self, name: &str, data: &TemplateData<'_>) -> Result<String, RenderError> {
            self.calls.lock().unwrap().push(name.to_owned());
            if self.fail {
                return Err(RenderError::Template(minijinja::Error::new(
                    minijinja::ErrorKind::TemplateNotFound,
                    "missing",
                )));
            }
            match data {
                TemplateData::Error(payload) => Ok(format!("{name}: {}", payload.message)),
                TemplateData::Page(page) => Ok(page.title.to_owned()),
            }
        }
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_category_status_codes() {
        assert_eq!(ErrorCategory::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCategory::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCategory::InternalError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_classification() {
        let not_found =
            ServerError::from_load("Home", StorageError::not_found("/pages/Home.txt"));
        let invalid = ServerError::from_load("", StorageError::invalid_title(""));
        let denied = ServerError::from_load(
            "Home",
            StorageError::new(StorageErrorKind::PermissionDenied),
        );

        assert_eq!(not_found.category(), Some(ErrorCategory::NotFound));
        assert_eq!(invalid.category(), Some(ErrorCategory::NotFound));
        assert_eq!(denied.category(), Some(ErrorCategory::InternalError));
        assert_eq!(
            ServerError::from(ValidationError::BodyRequired).category(),
            Some(ErrorCategory::BadRequest)
        );
        assert_eq!(ServerError::Unclassified("?".to_owned()).category(), None);
    }

    #[test]
    fn test_not_found_message() {
        let err = ServerError::from_load("Missing", StorageError::not_found("/pages/Missing.txt"));

        assert_eq!(err.to_string(), "Page not found: Missing");
    }

    #[tokio::test]
    async fn test_map_error_renders_category_template() {
        let renderer = RecordingRenderer::default();
        let err = ServerError::from(ValidationError::TitleRequired);

        let response = map_error(&renderer, &err);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(
            body_string(response).await,
            "bad-request: Page Title cannot be empty"
        );
        assert_eq!(*renderer.calls.lock().unwrap(), vec!["bad-request"]);
    }

    #[tokio::test]
    async fn test_map_error_unclassified_never_renders() {
        let renderer = RecordingRenderer::default();
        let err = ServerError::Unclassified("mystery failure".to_owned());

        let response = map_error(&renderer, &err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        assert_eq!(
            body_string(response).await,
            "mystery failure does not have an appropriate status code"
        );
        assert!(renderer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_map_error_render_failure_falls_back() {
        let renderer = RecordingRenderer {
            fail: true,
            ..Default::default()
        };
        let err = ServerError::from_load("Missing", StorageError::not_found("/pages/Missing.txt"));

        let response = map_error(&renderer, &err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(body.starts_with("template execution error for not-found"));
        // Exactly one rendering attempt, no retry through another template
        assert_eq!(*renderer.calls.lock().unwrap(), vec!["not-found"]);
    }
}
