//! Repository for the `memory_items` and `memory_additions` tables.

use memorial_core::labels::ModerationStatus;
use memorial_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::memory::{MemoryAddition, MemoryItem};

/// Read access to memories and their additions.
pub struct MemoryRepo;

impl MemoryRepo {
    /// Approved, non-deleted memory items of one record, oldest first.
    pub async fn list_visible_items<'e>(
        executor: impl PgExecutor<'e>,
        fallen_id: DbId,
    ) -> Result<Vec<MemoryItem>, sqlx::Error> {
        sqlx::query_as::<_, MemoryItem>(
            "SELECT m.id, m.fallen_id, m.author_id, p.display_name AS author_name,
                    m.title, m.content, m.media_ids, m.created_at
             FROM memory_items m
             LEFT JOIN profiles p ON p.id = m.author_id
             WHERE m.fallen_id = $1 AND m.status = $2 AND m.is_deleted = false
             ORDER BY m.created_at ASC, m.id ASC",
        )
        .bind(fallen_id)
        .bind(ModerationStatus::Approved.as_str())
        .fetch_all(executor)
        .await
    }

    /// Approved, non-deleted additions attached to any of `item_ids`.
    pub async fn list_visible_additions<'e>(
        executor: impl PgExecutor<'e>,
        item_ids: &[DbId],
    ) -> Result<Vec<MemoryAddition>, sqlx::Error> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, MemoryAddition>(
            "SELECT a.id, a.memory_item_id, a.author_id, p.display_name AS author_name,
                    a.content, a.media_ids, a.created_at
             FROM memory_additions a
             LEFT JOIN profiles p ON p.id = a.author_id
             WHERE a.memory_item_id = ANY($1) AND a.status = $2 AND a.is_deleted = false
             ORDER BY a.created_at ASC, a.id ASC",
        )
        .bind(item_ids)
        .bind(ModerationStatus::Approved.as_str())
        .fetch_all(executor)
        .await
    }
}
