//! Shared response envelope types for API handlers.
//!
//! Entity responses use a `{ "data": ... }` envelope. The statistics
//! endpoint is the exception and returns its object bare.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "total": n }` envelope for paginated lists.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    /// Number of matching rows across all pages.
    pub total: i64,
}
