//! Repository for the `media` table.

use memorial_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::media::Media;

const COLUMNS: &str = "id, url, thumbnail_url, media_type, caption, created_at";

pub struct MediaRepo;

impl MediaRepo {
    /// Batch lookup. Unknown ids are simply absent from the result.
    pub async fn list_by_ids<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
    ) -> Result<Vec<Media>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM media WHERE id = ANY($1)");
        sqlx::query_as::<_, Media>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }
}
