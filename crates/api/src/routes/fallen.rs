//! Route definitions for the `/fallen` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::fallen;
use crate::state::AppState;

/// Routes mounted at `/fallen`.
///
/// ```text
/// GET /                  -> list_fallen (?limit, offset, service_type, q)
/// GET /{id}              -> get_fallen
/// GET /{id}/comments     -> get_fallen_comments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fallen::list_fallen))
        .route("/{id}", get(fallen::get_fallen))
        .route("/{id}/comments", get(fallen::get_fallen_comments))
}
