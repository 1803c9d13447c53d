use super::traits::NotificationRepository;
use super::{SharedConnection, lock};
use crate::errors::ApiError;
use crate::models::{NewNotification, Notification};
use crate::schema::notifications;
use async_trait::async_trait;
use diesel::prelude::*;

#[derive(Clone)]
pub struct SqliteNotificationRepository {
    db: SharedConnection,
}

impl SqliteNotificationRepository {
    pub fn new(db: SharedConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepository {
    async fn create(&self, notification: &NewNotification) -> Result<Notification, ApiError> {
        let mut conn = lock(&self.db)?;
        let result = diesel::insert_into(notifications::table)
            .values(notification)
            .returning(Notification::as_returning())
            .get_result(&mut *conn)?;
        Ok(result)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Notification>, ApiError> {
        let mut conn = lock(&self.db)?;
        let result = notifications::table
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .limit(limit)
            .select(Notification::as_select())
            .load(&mut *conn)?;
        Ok(result)
    }

    async fn mark_all_read(&self) -> Result<usize, ApiError> {
        let mut conn = lock(&self.db)?;
        let updated = diesel::update(notifications::table.filter(notifications::read.eq(false)))
            .set(notifications::read.eq(true))
            .execute(&mut *conn)?;
        Ok(updated)
    }

    async fn clear_all(&self) -> Result<usize, ApiError> {
        let mut conn = lock(&self.db)?;
        let deleted = diesel::delete(notifications::table).execute(&mut *conn)?;
        Ok(deleted)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut conn = lock(&self.db)?;
        let deleted = diesel::delete(notifications::table.find(id)).execute(&mut *conn)?;
        Ok(deleted > 0)
    }
}
