//! Error types for the site.
//!
//! Page routes render errors as simple HTML error pages; the JSON API routes
//! answer with an `{"error": ...}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};
use serde::Serialize;

/// Error type for HTML page routes.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The request could not be understood (malformed multipart body, etc.).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No route matched.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (rendering, etc.).
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad Request",
                format!("The form could not be read: {msg}"),
            ),
            Self::NotFound(path) => (
                StatusCode::NOT_FOUND,
                "Not Found",
                format!("There is nothing at {path}."),
            ),
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error",
                    "An internal error occurred. Please try again later.".to_string(),
                )
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) " | SOD 2025" }
                    meta name="robots" content="noindex";
                    style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "Back to SOD 2025" }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}

/// Error type for the JSON API routes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Appending to the registrations sheet failed.
    #[error("sheet update failed: {0}")]
    Sheet(#[from] crate::sheets::SheetsError),

    /// The request body was not valid JSON for the endpoint.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Every failure maps to the same opaque message; the cause is logged.
        tracing::error!(error = %self, "sheet update error");
        let body = ErrorResponse {
            error: "Failed to update sheet",
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_bad_request() {
        let err = SiteError::BadRequest("missing boundary".to_string());
        assert_eq!(err.to_string(), "bad request: missing boundary");
    }

    #[test]
    fn error_display_internal() {
        let err = SiteError::Internal(anyhow::anyhow!("something broke"));
        assert_eq!(err.to_string(), "internal error: something broke");
    }

    #[test]
    fn error_into_response_bad_request() {
        let err = SiteError::BadRequest("test".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_into_response_not_found() {
        let err = SiteError::NotFound("/nope".to_string());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_into_response_internal() {
        let err = SiteError::Internal(anyhow::anyhow!("boom"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn api_error_is_always_500() {
        let err = ApiError::InvalidBody("expected value at line 1".to_string());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
