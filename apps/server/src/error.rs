//! Error types for the outreach server
//!
//! Two error kinds matter at the boundary: locally detectable bad input
//! (`InvalidArgument`, mapped to 400) and everything downstream
//! (`Database`/`Internal`/`Other`, mapped to an opaque 500). Neither kind is
//! retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fixed message returned on internal failures; details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "The server encountered an error processing the request.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            // Client errors carry an empty body, matching existing clients'
            // expectations for bad-request responses.
            Error::InvalidArgument(msg) => {
                tracing::debug!(error = %msg, "Rejected invalid request");
                StatusCode::BAD_REQUEST.into_response()
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            Error::Database(_) | Error::Internal(_) | Error::Other(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": INTERNAL_ERROR_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}
