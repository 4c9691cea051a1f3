//! Repository for the `comments` table.

use memorial_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::comment::Comment;

/// Columns selected from `comments c` joined with `profiles p`.
const COLUMNS: &str = "c.id, c.parent_id, c.author_id, p.display_name AS author_name, \
    p.avatar_url AS author_avatar_url, c.content, c.fallen_id, c.memory_item_id, \
    c.memory_addition_id, c.created_at";

/// Read access to visible comments. Rows come back in `created_at` order,
/// the order the tree builder relies on.
pub struct CommentRepo;

impl CommentRepo {
    /// Visible comments posted directly on a fallen record's page.
    pub async fn list_visible_for_fallen<'e>(
        executor: impl PgExecutor<'e>,
        fallen_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments c
             LEFT JOIN profiles p ON p.id = c.author_id
             WHERE c.fallen_id = $1 AND c.is_hidden = false AND c.is_deleted = false
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(fallen_id)
            .fetch_all(executor)
            .await
    }

    /// Visible comments on any of the given memory items or additions, in a
    /// single query. The caller partitions them by target.
    pub async fn list_visible_for_memories<'e>(
        executor: impl PgExecutor<'e>,
        item_ids: &[DbId],
        addition_ids: &[DbId],
    ) -> Result<Vec<Comment>, sqlx::Error> {
        if item_ids.is_empty() && addition_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM comments c
             LEFT JOIN profiles p ON p.id = c.author_id
             WHERE (c.memory_item_id = ANY($1) OR c.memory_addition_id = ANY($2))
               AND c.is_hidden = false AND c.is_deleted = false
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(item_ids)
            .bind(addition_ids)
            .fetch_all(executor)
            .await
    }
}
