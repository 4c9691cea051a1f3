//! Repository for the `profiles` table.

use memorial_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::profile::Profile;

const COLUMNS: &str = "id, display_name, avatar_url, bio, created_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
