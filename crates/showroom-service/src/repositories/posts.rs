use super::traits::{PostRepository, PostVisibility};
use super::{SharedConnection, lock};
use crate::errors::ApiError;
use crate::models::{NewPost, Post, PostChanges};
use crate::schema::posts;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

#[derive(Clone)]
pub struct SqlitePostRepository {
    db: SharedConnection,
}

impl SqlitePostRepository {
    pub fn new(db: SharedConnection) -> Self {
        Self { db }
    }
}

/// The unique index on `slug` is the last line of defence against two posts
/// sharing a slug; report it as a conflict rather than a storage failure.
fn slug_conflict(err: DieselError, slug: &str) -> ApiError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ApiError::DuplicateSlug(slug.to_string())
        }
        other => other.into(),
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn list(&self, visibility: PostVisibility) -> Result<Vec<Post>, ApiError> {
        let mut conn = lock(&self.db)?;
        let mut query = posts::table
            .order((posts::created_at.desc(), posts::id.desc()))
            .select(Post::as_select())
            .into_boxed();

        if visibility == PostVisibility::PublishedOnly {
            query = query.filter(posts::published.eq(true));
        }

        Ok(query.load(&mut *conn)?)
    }

    async fn find_by_slug(
        &self,
        slug: &str,
        visibility: PostVisibility,
    ) -> Result<Option<Post>, ApiError> {
        let mut conn = lock(&self.db)?;
        let mut query = posts::table
            .filter(posts::slug.eq(slug))
            .select(Post::as_select())
            .into_boxed();

        if visibility == PostVisibility::PublishedOnly {
            query = query.filter(posts::published.eq(true));
        }

        Ok(query.first(&mut *conn).optional()?)
    }

    async fn create(&self, post: &NewPost) -> Result<Post, ApiError> {
        let mut conn = lock(&self.db)?;
        diesel::insert_into(posts::table)
            .values(post)
            .returning(Post::as_returning())
            .get_result(&mut *conn)
            .map_err(|err| slug_conflict(err, &post.slug))
    }

    async fn update(&self, id: i32, changes: &PostChanges) -> Result<Option<Post>, ApiError> {
        let mut conn = lock(&self.db)?;
        if changes.is_empty() {
            let current = posts::table
                .find(id)
                .select(Post::as_select())
                .first(&mut *conn)
                .optional()?;
            return Ok(current);
        }

        diesel::update(posts::table.find(id))
            .set(changes)
            .returning(Post::as_returning())
            .get_result(&mut *conn)
            .optional()
            .map_err(|err| slug_conflict(err, changes.slug.as_deref().unwrap_or_default()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut conn = lock(&self.db)?;
        let deleted = diesel::delete(posts::table.find(id)).execute(&mut *conn)?;
        Ok(deleted > 0)
    }
}
