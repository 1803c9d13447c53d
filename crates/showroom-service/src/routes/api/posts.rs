use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::auth::AdminSession;
use crate::errors::ApiError;
use crate::extractors::{JsonBody, PathParam};
use crate::models::{DEFAULT_POST_AUTHOR, NewPost, Post, PostCategory, PostChanges};
use crate::repositories::{PostRepository, PostVisibility};
use crate::validation::{
    ValidationError, derive_slug, optional_text, require_text, validate_image_url,
};
use crate::AppState;

/// A client-supplied `slug` is ignored; the slug is always derived from the
/// title on the server.
#[derive(Debug, Deserialize)]
struct CreatePostRequest {
    title: String,
    content: String,
    excerpt: Option<String>,
    image: String,
    #[serde(default)]
    category: PostCategory,
    author: Option<String>,
    published: Option<bool>,
}

impl TryFrom<CreatePostRequest> for NewPost {
    type Error = ValidationError;

    fn try_from(request: CreatePostRequest) -> Result<Self, Self::Error> {
        let title = require_text("title", request.title)?;
        let slug = derive_slug(&title)?;

        Ok(NewPost {
            title,
            slug,
            content: require_text("content", request.content)?,
            excerpt: optional_text(request.excerpt),
            image: validate_image_url(&request.image)?,
            category: request.category,
            author: optional_text(request.author)
                .unwrap_or_else(|| DEFAULT_POST_AUTHOR.to_string()),
            published: request.published.unwrap_or(true),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct UpdatePostRequest {
    title: Option<String>,
    content: Option<String>,
    excerpt: Option<String>,
    image: Option<String>,
    category: Option<PostCategory>,
    author: Option<String>,
    published: Option<bool>,
}

impl TryFrom<UpdatePostRequest> for PostChanges {
    type Error = ValidationError;

    fn try_from(request: UpdatePostRequest) -> Result<Self, Self::Error> {
        let title = request
            .title
            .map(|title| require_text("title", title))
            .transpose()?;
        let slug = title.as_deref().map(derive_slug).transpose()?;

        Ok(PostChanges {
            title,
            slug,
            content: request
                .content
                .map(|content| require_text("content", content))
                .transpose()?,
            excerpt: optional_text(request.excerpt),
            image: request
                .image
                .as_deref()
                .map(validate_image_url)
                .transpose()?,
            category: request.category,
            author: optional_text(request.author),
            published: request.published,
        })
    }
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

fn visibility(admin: &Option<AdminSession>) -> PostVisibility {
    match admin {
        Some(_) => PostVisibility::IncludeDrafts,
        None => PostVisibility::PublishedOnly,
    }
}

#[instrument(skip_all, fields(admin = admin.is_some()))]
async fn list_posts<S: AppState>(
    State(state): State<S>,
    admin: Option<AdminSession>,
) -> Result<ResponseJson<Vec<Post>>, ApiError> {
    debug!("Processing list posts request");

    let posts = state.post_repo().list(visibility(&admin)).await?;

    info!(returned_count = posts.len(), "Successfully retrieved posts");
    Ok(ResponseJson(posts))
}

#[instrument(skip_all, fields(slug = %slug, admin = admin.is_some()))]
async fn get_post_by_slug<S: AppState>(
    State(state): State<S>,
    admin: Option<AdminSession>,
    PathParam(slug): PathParam<String>,
) -> Result<ResponseJson<Post>, ApiError> {
    debug!("Processing get post request");

    match state
        .post_repo()
        .find_by_slug(&slug, visibility(&admin))
        .await?
    {
        Some(post) => {
            info!(id = post.id, "Successfully retrieved post");
            Ok(ResponseJson(post))
        }
        None => {
            debug!("Post not found");
            Err(ApiError::NotFound("Post"))
        }
    }
}

#[instrument(skip_all, fields(title = %payload.title))]
async fn create_post<S: AppState>(
    State(state): State<S>,
    _admin: AdminSession,
    JsonBody(payload): JsonBody<CreatePostRequest>,
) -> Result<(StatusCode, ResponseJson<Post>), ApiError> {
    debug!("Processing create post request");

    let new_post = NewPost::try_from(payload)?;
    debug!(slug = %new_post.slug, "Derived slug from title");

    let post_repo = state.post_repo();

    if post_repo
        .find_by_slug(&new_post.slug, PostVisibility::IncludeDrafts)
        .await?
        .is_some()
    {
        warn!(slug = %new_post.slug, "Slug already taken");
        return Err(ApiError::DuplicateSlug(new_post.slug));
    }

    let post = post_repo.create(&new_post).await?;

    info!(id = post.id, slug = %post.slug, "Successfully created post");
    Ok((StatusCode::CREATED, ResponseJson(post)))
}

#[instrument(skip_all, fields(id = %id))]
async fn update_post<S: AppState>(
    State(state): State<S>,
    _admin: AdminSession,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<UpdatePostRequest>,
) -> Result<ResponseJson<Post>, ApiError> {
    debug!("Processing update post request");

    let changes = PostChanges::try_from(payload)?;
    let post_repo = state.post_repo();

    if let Some(slug) = &changes.slug {
        let existing = post_repo
            .find_by_slug(slug, PostVisibility::IncludeDrafts)
            .await?;
        if existing.is_some_and(|other| other.id != id) {
            warn!(slug = %slug, "Slug already taken by another post");
            return Err(ApiError::DuplicateSlug(slug.clone()));
        }
    }

    let post = post_repo
        .update(id, &changes)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    info!(id = post.id, slug = %post.slug, "Successfully updated post");
    Ok(ResponseJson(post))
}

#[instrument(skip_all, fields(id = %id))]
async fn delete_post<S: AppState>(
    State(state): State<S>,
    _admin: AdminSession,
    PathParam(id): PathParam<i32>,
) -> Result<ResponseJson<MessageResponse>, ApiError> {
    debug!("Processing delete post request");

    if !state.post_repo().delete(id).await? {
        debug!("Post not found");
        return Err(ApiError::NotFound("Post"));
    }

    info!("Successfully deleted post");
    Ok(ResponseJson(MessageResponse {
        message: "Post deleted".to_string(),
    }))
}

// `{key}` is a slug for GET and a numeric id for PUT/DELETE: one path
// pattern has to serve both.
pub fn create_post_router<S: AppState>() -> Router<S> {
    Router::new()
        .route("/posts", get(list_posts::<S>).post(create_post::<S>))
        .route("/posts/add", post(create_post::<S>))
        .route(
            "/posts/{key}",
            get(get_post_by_slug::<S>)
                .put(update_post::<S>)
                .delete(delete_post::<S>),
        )
}
