//! Request extractors
//!
//! `ApiJson` behaves like `axum::Json` but rejects malformed bodies with the
//! API's JSON error format instead of axum's plain-text rejection.

use axum::extract::FromRequest;

use crate::api::error::ApiError;

/// JSON request body whose rejection is an `ApiError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
