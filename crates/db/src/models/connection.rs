use memorial_core::profile::ConnectionFacts;
use memorial_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `fallen_connections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Connection {
    pub id: DbId,
    pub fallen_id: DbId,
    pub user_id: DbId,
    pub relationship: String,
    pub created_at: Timestamp,
}

impl ConnectionFacts for Connection {
    fn id(&self) -> DbId {
        self.id
    }
    fn fallen_id(&self) -> DbId {
        self.fallen_id
    }
    fn relationship(&self) -> &str {
        &self.relationship
    }
}
