use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::auth::AdminSession;
use crate::errors::ApiError;
use crate::extractors::{JsonBody, PathParam};
use crate::models::{NewNotification, Notification};
use crate::validation::require_text;
use crate::{AppState, repositories::NotificationRepository};

pub const RECENT_NOTIFICATIONS_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
struct AddNotificationRequest {
    #[serde(alias = "pageOrigin")]
    page: String,
}

#[derive(Debug, Serialize)]
struct SuccessResponse {
    success: bool,
}

#[derive(Debug, Serialize)]
struct BulkResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<usize>,
}

/// Logs a visitor's contact click. Public: anyone can record one.
#[instrument(skip_all, fields(page = %payload.page))]
async fn add_notification<S: AppState>(
    State(state): State<S>,
    JsonBody(payload): JsonBody<AddNotificationRequest>,
) -> Result<(StatusCode, ResponseJson<SuccessResponse>), ApiError> {
    let new_notification = NewNotification {
        page_origin: require_text("page", payload.page)?,
    };

    let notification = state
        .notification_repo()
        .create(&new_notification)
        .await?;

    info!(id = notification.id, "Recorded contact notification");
    Ok((
        StatusCode::CREATED,
        ResponseJson(SuccessResponse { success: true }),
    ))
}

#[instrument(skip_all)]
async fn list_notifications<S: AppState>(
    State(state): State<S>,
    _admin: AdminSession,
) -> Result<ResponseJson<Vec<Notification>>, ApiError> {
    debug!("Processing list notifications request");

    let notifications = state
        .notification_repo()
        .list_recent(RECENT_NOTIFICATIONS_LIMIT)
        .await?;

    info!(
        returned_count = notifications.len(),
        unread = notifications.iter().filter(|n| !n.read).count(),
        "Successfully retrieved notifications"
    );
    Ok(ResponseJson(notifications))
}

#[instrument(skip_all)]
async fn mark_all_read<S: AppState>(
    State(state): State<S>,
    _admin: AdminSession,
) -> Result<ResponseJson<BulkResponse>, ApiError> {
    let updated = state.notification_repo().mark_all_read().await?;

    info!(updated, "Marked notifications as read");
    Ok(ResponseJson(BulkResponse {
        success: true,
        updated: Some(updated),
        deleted: None,
    }))
}

#[instrument(skip_all)]
async fn clear_all<S: AppState>(
    State(state): State<S>,
    _admin: AdminSession,
) -> Result<ResponseJson<BulkResponse>, ApiError> {
    let deleted = state.notification_repo().clear_all().await?;

    info!(deleted, "Cleared notifications");
    Ok(ResponseJson(BulkResponse {
        success: true,
        updated: None,
        deleted: Some(deleted),
    }))
}

#[instrument(skip_all, fields(id = %id))]
async fn delete_notification<S: AppState>(
    State(state): State<S>,
    _admin: AdminSession,
    PathParam(id): PathParam<i32>,
) -> Result<ResponseJson<SuccessResponse>, ApiError> {
    if !state.notification_repo().delete(id).await? {
        debug!("Notification not found");
        return Err(ApiError::NotFound("Notification"));
    }

    info!("Deleted notification");
    Ok(ResponseJson(SuccessResponse { success: true }))
}

pub fn create_notification_router<S: AppState>() -> Router<S> {
    Router::new()
        .route("/notifications", get(list_notifications::<S>))
        .route("/notifications/add", post(add_notification::<S>))
        .route("/notifications/mark-as-read", put(mark_all_read::<S>))
        .route("/notifications/clear-all", delete(clear_all::<S>))
        .route("/notifications/{id}", delete(delete_notification::<S>))
}
