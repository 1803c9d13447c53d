use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{
    HeaderValue, Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod extractors;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod validation;

use auth::AdminAuth;
use config::AppConfig;
use repositories::{
    NotificationRepository, PostRepository, SharedConnection, SqliteNotificationRepository,
    SqlitePostRepository, SqliteVehicleRepository, VehicleRepository,
};

pub trait AppState: Clone + Send + Sync + 'static {
    type Vehicles: VehicleRepository;
    type Posts: PostRepository;
    type Notifications: NotificationRepository;

    fn vehicle_repo(&self) -> Self::Vehicles;
    fn post_repo(&self) -> Self::Posts;
    fn notification_repo(&self) -> Self::Notifications;
    fn auth(&self) -> &AdminAuth;
}

#[derive(Clone)]
pub struct DefaultAppState {
    db: SharedConnection,
    auth: Arc<AdminAuth>,
}

impl DefaultAppState {
    pub fn new(db: SharedConnection, auth: AdminAuth) -> Self {
        Self {
            db,
            auth: Arc::new(auth),
        }
    }
}

impl AppState for DefaultAppState {
    type Vehicles = SqliteVehicleRepository;
    type Posts = SqlitePostRepository;
    type Notifications = SqliteNotificationRepository;

    fn vehicle_repo(&self) -> Self::Vehicles {
        SqliteVehicleRepository::new(self.db.clone())
    }

    fn post_repo(&self) -> Self::Posts {
        SqlitePostRepository::new(self.db.clone())
    }

    fn notification_repo(&self) -> Self::Notifications {
        SqliteNotificationRepository::new(self.db.clone())
    }

    fn auth(&self) -> &AdminAuth {
        &self.auth
    }
}

/// Only the configured frontend origins may call the API from a browser.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(_) if origin == "*" => {
                warn!("Ignoring wildcard CORS origin; credentialed requests need explicit origins");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// The full application: routes plus the HTTP middleware stack.
pub fn create_app<S: AppState>(state: S, config: &AppConfig) -> Router {
    routes::create_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs,
                ))),
        )
        .with_state(state)
}
