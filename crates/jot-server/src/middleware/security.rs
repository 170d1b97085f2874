//! Security headers middleware.
//!
//! Adds security headers to every response, including error pages and the
//! plain-text fallbacks produced by the error mapper.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use axum::response::Response;

/// Content-Security-Policy header value.
///
/// Pages are server-rendered HTML with no scripts; forms only post back here.
const CSP: &str = "default-src 'self'; \
                   script-src 'none'; \
                   style-src 'self' 'unsafe-inline'; \
                   img-src 'self' data:; \
                   form-action 'self'; \
                   frame-ancestors 'none'";

/// Headers set on every response, overriding handler values.
const SECURITY_HEADERS: [(&str, &str); 3] = [
    ("content-security-policy", CSP),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
];

/// Insert [`SECURITY_HEADERS`] into a response.
///
/// Used with `axum::middleware::map_response`.
pub(crate) async fn security_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_csp_value() {
        assert!(CSP.contains("default-src 'self'"));
        assert!(CSP.contains("script-src 'none'"));
        assert!(CSP.contains("form-action 'self'"));
        assert!(CSP.contains("frame-ancestors 'none'"));
    }

    #[tokio::test]
    async fn test_security_headers_override_existing() {
        let response = ([("x-frame-options", "SAMEORIGIN")], "body").into_response();

        let response = security_headers(response).await;

        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["content-security-policy"], CSP);
    }
}
