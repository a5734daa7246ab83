//! Request-level errors and how each surface renders them.
//!
//! `AppError` renders as JSON for the API. Page handlers wrap it in
//! `PageError`, which renders the same outcomes as HTML.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use todo_core::ValidationErrors;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("invalid page")]
    InvalidPage,

    #[error("validation failed: {0:?}")]
    Invalid(ValidationErrors),

    /// The request body could not be decoded.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("storage failure: {0}")]
    Store(#[from] StoreError),

    #[error("template rendering failed: {0}")]
    Render(#[from] tera::Error),
}

impl AppError {
    fn log_if_fatal(&self) {
        if matches!(self, AppError::Store(_) | AppError::Render(_)) {
            error!(error = %self, "request failed");
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log_if_fatal();
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response()
            }
            AppError::InvalidPage => {
                (StatusCode::NOT_FOUND, Json(json!({"detail": "Invalid page."}))).into_response()
            }
            AppError::Invalid(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            AppError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(json!({"detail": detail}))).into_response()
            }
            AppError::Store(_) | AppError::Render(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "A server error occurred."})),
            )
                .into_response(),
        }
    }
}

/// HTML rendition of `AppError` for the page routes.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        PageError(AppError::Store(err))
    }
}

impl From<tera::Error> for PageError {
    fn from(err: tera::Error) -> Self {
        PageError(AppError::Render(err))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.0.log_if_fatal();
        match self.0 {
            AppError::NotFound | AppError::InvalidPage => (
                StatusCode::NOT_FOUND,
                Html(
                    "<h1>Not Found</h1><p>The requested resource was not found on this server.</p>",
                ),
            )
                .into_response(),
            AppError::Invalid(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, Html("<h1>Bad Request (400)</h1>")).into_response()
            }
            AppError::Store(_) | AppError::Render(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Server Error (500)</h1>"),
            )
                .into_response(),
        }
    }
}

/// Parse a path identifier; anything but a plain non-negative integer is 404.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound);
    }
    raw.parse().map_err(|_| AppError::NotFound)
}
