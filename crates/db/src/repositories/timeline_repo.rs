//! Repository for the `timeline_items` table.

use memorial_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::timeline::TimelineItem;

const COLUMNS: &str = "id, fallen_id, event_date, year, title, description, created_at";

pub struct TimelineRepo;

impl TimelineRepo {
    /// Timeline of one record in chronological order.
    ///
    /// Sorted by effective year (the year of `event_date`, else `year`),
    /// undated items last. Within a year, year-only items come first, then
    /// dated items by date; ties by id.
    pub async fn list_for_fallen<'e>(
        executor: impl PgExecutor<'e>,
        fallen_id: DbId,
    ) -> Result<Vec<TimelineItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM timeline_items
             WHERE fallen_id = $1
             ORDER BY COALESCE(EXTRACT(YEAR FROM event_date)::int, year) ASC NULLS LAST,
                      event_date ASC NULLS FIRST, id ASC"
        );
        sqlx::query_as::<_, TimelineItem>(&query)
            .bind(fallen_id)
            .fetch_all(executor)
            .await
    }
}
