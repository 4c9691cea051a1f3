use memorial_core::memory_assembly::MediaRow;
use memorial_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    pub id: DbId,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub media_type: String,
    pub caption: Option<String>,
    pub created_at: Timestamp,
}

impl MediaRow for Media {
    fn id(&self) -> DbId {
        self.id
    }
}
