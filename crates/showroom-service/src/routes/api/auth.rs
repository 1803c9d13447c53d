use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::AppState;
use crate::errors::ApiError;
use crate::extractors::JsonBody;

/// Either `email` or `username` identifies the administrator; `email` wins
/// when both are sent. A missing password is a failed login, not a bad body.
#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: Option<String>,
    email: Option<String>,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    success: bool,
    token: String,
}

#[instrument(skip_all, fields(has_email = payload.email.is_some(), has_username = payload.username.is_some()))]
async fn login<S: AppState>(
    State(state): State<S>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, ApiError> {
    debug!("Processing login request");

    let identifier = payload.email.or(payload.username).unwrap_or_default();

    let token = state
        .auth()
        .login(&identifier, &payload.password)
        .inspect_err(|err| {
            if matches!(err, ApiError::InvalidCredentials) {
                warn!("Login attempt with invalid credentials");
            }
        })?;

    info!("Issued admin token");

    Ok(ResponseJson(LoginResponse {
        success: true,
        token,
    }))
}

pub fn create_auth_router<S: AppState>() -> Router<S> {
    Router::new().route("/login", post(login::<S>))
}
