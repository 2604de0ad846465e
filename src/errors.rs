use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("authentication required")]
    Unauthenticated,
    #[error("validation failed: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),
    #[error("unknown status filter: {0}")]
    UnknownStatus(String),
    #[error("job not found")]
    JobNotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Missing identity navigates back to the landing page instead of
        // surfacing an error payload.
        if let Error::Unauthenticated = self {
            tracing::warn!("unauthenticated request, redirecting to landing");
            return Redirect::to("/").into_response();
        }
        let (status, message) = match &self {
            Error::InvalidInput(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            Error::UnknownStatus(s) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("unknown status filter: {}", s),
            ),
            Error::JobNotFound => (StatusCode::NOT_FOUND, "job not found".into()),
            _ => {
                tracing::error!("request failed: {}", &self);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
