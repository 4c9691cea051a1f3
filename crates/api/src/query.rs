//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /api/fallen`.
#[derive(Debug, Default, Deserialize)]
pub struct FallenListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Stored service type value, e.g. `volunteer`.
    pub service_type: Option<String>,
    /// Free-text search over names and hometown.
    pub q: Option<String>,
}
