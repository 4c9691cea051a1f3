//! Handler for public user profiles.

use axum::extract::State;
use axum::Json;
use memorial_core::error::CoreError;
use memorial_core::profile::{assemble_connections, profile_counts, ConnectionView, ProfileCounts};
use memorial_core::types::DbId;
use memorial_db::models::fallen::FallenSummary;
use memorial_db::models::profile::Profile;
use memorial_db::repositories::{ConnectionRepo, FallenRepo, ProfileRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::ApiPath;
use crate::response::DataResponse;
use crate::state::AppState;

/// Public profile page returned by `GET /api/users/{id}`.
#[derive(Debug, Serialize)]
pub struct PublicProfile {
    pub profile: Profile,
    /// Visible records the user created.
    pub heroes: Vec<FallenSummary>,
    /// Approved connections to visible records.
    pub connections: Vec<ConnectionView<FallenSummary>>,
    pub counts: ProfileCounts,
}

/// GET /api/users/{id}
pub async fn get_public_profile(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<PublicProfile>>> {
    let mut tx = memorial_db::begin_snapshot(&state.pool).await?;

    let profile = ProfileRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))?;

    let heroes = FallenRepo::list_visible_by_owner(&mut *tx, id).await?;
    let connections = ConnectionRepo::list_approved_for_user(&mut *tx, id).await?;
    let fallen_ids: Vec<DbId> = connections.iter().map(|c| c.fallen_id).collect();
    let connected = FallenRepo::list_visible_by_ids(&mut *tx, &fallen_ids).await?;

    let connections = assemble_connections(&connections, &connected);
    let counts = profile_counts(&heroes, &connections);

    tracing::debug!(
        user_id = id,
        heroes = counts.heroes_count,
        connections = counts.connections_count,
        "Assembled public profile"
    );

    Ok(Json(DataResponse {
        data: PublicProfile {
            profile,
            heroes,
            connections,
            counts,
        },
    }))
}
