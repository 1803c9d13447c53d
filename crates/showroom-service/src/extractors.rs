use axum::extract::{FromRequest, FromRequestParts, Path};

use crate::errors::ApiError;

/// `axum::Json` with rejections reported as [`ApiError`], so malformed bodies,
/// missing required fields and unknown enum values all surface as a 400 with a
/// `message` field.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with rejections reported as [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);
