//! Request extractors.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` with the rejection routed through [`AppError`].
///
/// Malformed bodies, unknown enum values and wrong content types all come
/// back as a 400 in the standard `{error, code}` shape instead of axum's
/// plain-text 415/422 responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with the rejection routed through [`AppError`],
/// so a bad query string answers with the same JSON error body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
