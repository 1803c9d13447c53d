use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    ValidationError(#[from] crate::validation::ValidationError),

    #[error("Invalid request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Access denied: missing bearer token")]
    MissingToken,

    #[error("Session expired or token invalid")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Server misconfigured: {0} is not set")]
    ServerMisconfigured(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("A post with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(JsonRejection::MissingJsonContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::MalformedBody(_) | ApiError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingToken | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateSlug(_) => StatusCode::CONFLICT,
            ApiError::ServerMisconfigured(_)
            | ApiError::DatabaseError(_)
            | ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::DatabaseError(ref err) => {
                // Log the detailed error but don't expose it to the client
                error!(error = %err, "Database error occurred");
                "Internal server error".to_string()
            }
            ApiError::ServerMisconfigured(setting) => {
                error!(setting, "Authentication requested but not configured");
                self.to_string()
            }
            ApiError::MalformedBody(ref rejection) => {
                warn!(error = %rejection.body_text(), "Rejected request body");
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}
