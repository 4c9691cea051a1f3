//! Memory item and memory addition models.

use memorial_core::memory_assembly::{AdditionRow, MediaHolder};
use memorial_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `memory_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemoryItem {
    pub id: DbId,
    pub fallen_id: DbId,
    pub author_id: DbId,
    pub author_name: Option<String>,
    pub title: String,
    pub content: String,
    /// Media references in display order.
    pub media_ids: Vec<DbId>,
    pub created_at: Timestamp,
}

/// A row from the `memory_additions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemoryAddition {
    pub id: DbId,
    pub memory_item_id: DbId,
    pub author_id: DbId,
    pub author_name: Option<String>,
    pub content: String,
    pub media_ids: Vec<DbId>,
    pub created_at: Timestamp,
}

impl MediaHolder for MemoryItem {
    fn id(&self) -> DbId {
        self.id
    }
    fn media_ids(&self) -> &[DbId] {
        &self.media_ids
    }
}

impl MediaHolder for MemoryAddition {
    fn id(&self) -> DbId {
        self.id
    }
    fn media_ids(&self) -> &[DbId] {
        &self.media_ids
    }
}

impl AdditionRow for MemoryAddition {
    fn memory_item_id(&self) -> DbId {
        self.memory_item_id
    }
}
