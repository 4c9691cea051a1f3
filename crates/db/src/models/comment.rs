use memorial_core::comment_tree::Threaded;
use memorial_core::memory_assembly::MemoryComment;
use memorial_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A visible row from the `comments` table joined with its author's name.
///
/// Exactly one of `fallen_id`, `memory_item_id` and `memory_addition_id`
/// is set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub author_id: DbId,
    pub author_name: Option<String>,
    pub author_avatar_url: Option<String>,
    pub content: String,
    pub fallen_id: Option<DbId>,
    pub memory_item_id: Option<DbId>,
    pub memory_addition_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl Threaded for Comment {
    fn id(&self) -> DbId {
        self.id
    }
    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
}

impl MemoryComment for Comment {
    fn memory_item_id(&self) -> Option<DbId> {
        self.memory_item_id
    }
    fn memory_addition_id(&self) -> Option<DbId> {
        self.memory_addition_id
    }
}
