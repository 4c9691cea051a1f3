pub mod fallen;
pub mod health;
pub mod statistics;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /statistics                 site-wide statistics (camelCase JSON)
///
/// /fallen                     list approved records (?limit, offset, service_type, q)
/// /fallen/{id}                record page with memories and comments
/// /fallen/{id}/comments       record-level comment tree
///
/// /users/{id}                 public profile
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/statistics", statistics::router())
        .nest("/fallen", fallen::router())
        .nest("/users", users::router())
}
