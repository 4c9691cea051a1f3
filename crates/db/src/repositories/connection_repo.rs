//! Repository for the `fallen_connections` table.

use memorial_core::labels::ModerationStatus;
use memorial_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::connection::Connection;

const COLUMNS: &str = "id, fallen_id, user_id, relationship, created_at";

pub struct ConnectionRepo;

impl ConnectionRepo {
    /// Approved connections declared by a user, oldest first.
    pub async fn list_approved_for_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
    ) -> Result<Vec<Connection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fallen_connections
             WHERE user_id = $1 AND status = $2
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Connection>(&query)
            .bind(user_id)
            .bind(ModerationStatus::Approved.as_str())
            .fetch_all(executor)
            .await
    }
}
