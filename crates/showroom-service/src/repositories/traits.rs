use crate::errors::ApiError;
use crate::models::{
    NewNotification, NewPost, NewVehicle, Notification, Post, PostChanges, Vehicle, VehicleChanges,
};
use async_trait::async_trait;

/// Which posts a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostVisibility {
    PublishedOnly,
    IncludeDrafts,
}

#[async_trait]
pub trait VehicleRepository: Clone + Send + Sync + 'static {
    /// Newest first.
    async fn list(&self) -> Result<Vec<Vehicle>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, ApiError>;
    async fn create(&self, vehicle: &NewVehicle) -> Result<Vehicle, ApiError>;
    async fn update(&self, id: i32, changes: &VehicleChanges) -> Result<Option<Vehicle>, ApiError>;
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
    /// Atomically adds one to the view counter and returns the new value.
    async fn increment_views(&self, id: i32) -> Result<Option<i64>, ApiError>;
}

#[async_trait]
pub trait PostRepository: Clone + Send + Sync + 'static {
    async fn list(&self, visibility: PostVisibility) -> Result<Vec<Post>, ApiError>;
    async fn find_by_slug(
        &self,
        slug: &str,
        visibility: PostVisibility,
    ) -> Result<Option<Post>, ApiError>;
    async fn create(&self, post: &NewPost) -> Result<Post, ApiError>;
    async fn update(&self, id: i32, changes: &PostChanges) -> Result<Option<Post>, ApiError>;
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

#[async_trait]
pub trait NotificationRepository: Clone + Send + Sync + 'static {
    async fn create(&self, notification: &NewNotification) -> Result<Notification, ApiError>;
    async fn list_recent(&self, limit: i64) -> Result<Vec<Notification>, ApiError>;
    async fn mark_all_read(&self) -> Result<usize, ApiError>;
    async fn clear_all(&self) -> Result<usize, ApiError>;
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}
