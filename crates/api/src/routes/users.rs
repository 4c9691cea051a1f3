//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /{id}    -> get_public_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(users::get_public_profile))
}
