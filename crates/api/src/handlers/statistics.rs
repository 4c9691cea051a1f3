//! Handler for the site-wide statistics page.

use axum::extract::State;
use axum::Json;
use memorial_core::statistics::{aggregate, Statistics};
use memorial_db::repositories::{AwardRepo, FallenRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/statistics
///
/// Loads every visible record and every approved award row, then
/// aggregates them. Both reads run concurrently on the pool; a failure in
/// either fails the request. The object is returned without a `data`
/// envelope.
pub async fn get_statistics(State(state): State<AppState>) -> AppResult<Json<Statistics>> {
    let (fallen, award_fallen_ids) = tokio::try_join!(
        FallenRepo::list_visible(&state.pool),
        AwardRepo::list_approved_fallen_ids(&state.pool),
    )?;

    tracing::debug!(
        fallen = fallen.len(),
        awards = award_fallen_ids.len(),
        "Aggregating statistics"
    );

    Ok(Json(aggregate(&fallen, &award_fallen_ids)))
}
