use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::warn;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Liborg(#[from] liborg::Error),
    #[error("Resource Not Found: {0}")]
    NotFound(String),
    #[error("The provided query string was rejected: {0}")]
    UnprocessableEntityQueryRejection(#[source] QueryRejection),
    #[error("Required parameter '{0}' is missing")]
    RequiredParameterMissing(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn to_client_status(&self) -> (StatusCode, String) {
        match self {
            Error::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            Error::Liborg(liborg::Error::DatabaseRowNotFound(_)) => {
                (StatusCode::NOT_FOUND, "Resource Not Found".to_string())
            }
            Error::Liborg(liborg::Error::DatabaseForeignKeyViolation(_)) => (
                StatusCode::CONFLICT,
                "A referenced resource does not exist".to_string(),
            ),
            Error::Liborg(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Library error".to_string(),
            ),
            Error::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            Error::UnprocessableEntityQueryRejection(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "The query string was not in the expected format. The request could not be processed.".to_string(),
            ),
            Error::RequiredParameterMissing(param) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Missing parameter '{param}'"),
            ),
            Error::Other(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unknown error".to_string(),
            ),
        }
    }
}

// Tell axum how to convert `Error` into a response.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        warn!("Got error for response: {self:?}");
        let (status, message) = self.to_client_status();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
