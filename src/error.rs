use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("\"{0}\" may refer to more than one page")]
    Disambiguation(String),

    #[error("Page id \"{0}\" does not match any pages")]
    PageNotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Coarse classification of a failed call to an external collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    Disambiguation,
    NotFound,
    Generic,
}

impl Error {
    pub fn kind(&self) -> UpstreamErrorKind {
        match self {
            Error::Disambiguation(_) => UpstreamErrorKind::Disambiguation,
            Error::PageNotFound(_) => UpstreamErrorKind::NotFound,
            _ => UpstreamErrorKind::Generic,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::PageNotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Disambiguation(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Json(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Reqwest(err) => (StatusCode::BAD_GATEWAY, format!("External service error: {}", err)),
            Error::Upstream(msg) => (StatusCode::BAD_GATEWAY, format!("External service error: {}", msg)),
            Error::Template(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while rendering the page.".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
