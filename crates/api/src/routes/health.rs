//! Health route, mounted at the root rather than under `/api`.

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// ```text
/// GET /health            -> get_health
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health::get_health))
}
