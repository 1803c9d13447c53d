use crate::AppState;
use axum::Router;

pub mod auth;
pub mod notifications;
pub mod posts;
pub mod vehicles;

pub fn create_api_router<S: AppState>() -> Router<S> {
    Router::new()
        .merge(auth::create_auth_router())
        .merge(vehicles::create_vehicle_router())
        .merge(posts::create_post_router())
        .merge(notifications::create_notification_router())
}
