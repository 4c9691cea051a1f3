use memorial_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `timeline_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimelineItem {
    pub id: DbId,
    pub fallen_id: DbId,
    pub event_date: Option<Date>,
    pub year: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}
