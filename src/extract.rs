//! Request extractors with the application's error envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections render as `400 {"error": ...}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
