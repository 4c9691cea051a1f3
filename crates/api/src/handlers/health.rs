//! Liveness and schema readiness.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    /// `ok` when the database answers and every embedded migration is
    /// applied, otherwise `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Absent when the database is unreachable or has no migration ledger.
    pub migrations: Option<MigrationReport>,
}

#[derive(Debug, Serialize)]
pub struct MigrationReport {
    pub applied: usize,
    pub known: usize,
    pub pending: usize,
}

/// GET /health
///
/// Always answers 200 so load balancers can tell a degraded instance from a
/// dead one by the body.
pub async fn get_health(State(state): State<AppState>) -> Json<ServiceHealth> {
    let db_healthy = memorial_db::health_check(&state.pool).await.is_ok();

    let migrations = if db_healthy {
        match memorial_db::migration_status(&state.pool).await {
            Ok(status) => Some(MigrationReport {
                applied: status.applied,
                known: status.known,
                pending: status.pending(),
            }),
            Err(err) => {
                tracing::warn!(error = %err, "Could not read migration ledger");
                None
            }
        }
    } else {
        None
    };

    let current = migrations.as_ref().is_some_and(|m| m.pending == 0);
    let status = if db_healthy && current { "ok" } else { "degraded" };
    if !current {
        tracing::warn!(db_healthy, ?migrations, "Health check degraded");
    }

    Json(ServiceHealth {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        migrations,
    })
}
