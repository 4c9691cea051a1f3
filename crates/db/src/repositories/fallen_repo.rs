//! Repository for the `fallen` table.

use memorial_core::labels::ModerationStatus;
use memorial_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::fallen::{Fallen, FallenListFilter, FallenSummary};

/// Column list for full `fallen` rows.
const COLUMNS: &str = "id, owner_id, first_name, last_name, middle_name, birth_date, \
    death_date, hometown, service_type, military_unit, rank, biography, photo_url, \
    status, is_deleted, created_at, updated_at";

/// Column list for [`FallenSummary`].
const SUMMARY_COLUMNS: &str = "id, first_name, last_name, middle_name, birth_date, \
    death_date, hometown, service_type, photo_url";

/// Visibility predicate; `$1` is the approved status.
const VISIBLE: &str = "status = $1 AND is_deleted = false";

/// Listing predicate on top of [`VISIBLE`]: `$2` service type, `$3` pattern.
const LIST_FILTER: &str = "($2::text IS NULL OR service_type = $2) \
    AND ($3::text IS NULL OR last_name ILIKE $3 OR first_name ILIKE $3 OR hometown ILIKE $3)";

/// Read access to fallen records.
pub struct FallenRepo;

impl FallenRepo {
    /// Find an approved, non-deleted record by id.
    pub async fn find_visible<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Fallen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fallen WHERE {VISIBLE} AND id = $2");
        sqlx::query_as::<_, Fallen>(&query)
            .bind(ModerationStatus::Approved.as_str())
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// All approved, non-deleted records, oldest first. Feeds statistics.
    pub async fn list_visible<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<FallenSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM fallen WHERE {VISIBLE} ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, FallenSummary>(&query)
            .bind(ModerationStatus::Approved.as_str())
            .fetch_all(executor)
            .await
    }

    /// One page of visible records, most recent death first.
    pub async fn list_page<'e>(
        executor: impl PgExecutor<'e>,
        filter: &FallenListFilter,
    ) -> Result<Vec<FallenSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM fallen
             WHERE {VISIBLE} AND {LIST_FILTER}
             ORDER BY death_date DESC NULLS LAST, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, FallenSummary>(&query)
            .bind(ModerationStatus::Approved.as_str())
            .bind(&filter.service_type)
            .bind(&filter.pattern)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(executor)
            .await
    }

    /// Number of visible records matching the listing filter, ignoring
    /// limit and offset.
    pub async fn count_page<'e>(
        executor: impl PgExecutor<'e>,
        filter: &FallenListFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM fallen WHERE {VISIBLE} AND {LIST_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(ModerationStatus::Approved.as_str())
            .bind(&filter.service_type)
            .bind(&filter.pattern)
            .fetch_one(executor)
            .await
    }

    /// Visible records created by a user, newest first.
    pub async fn list_visible_by_owner<'e>(
        executor: impl PgExecutor<'e>,
        owner_id: DbId,
    ) -> Result<Vec<FallenSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM fallen
             WHERE {VISIBLE} AND owner_id = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, FallenSummary>(&query)
            .bind(ModerationStatus::Approved.as_str())
            .bind(owner_id)
            .fetch_all(executor)
            .await
    }

    /// Visible records among `ids`, in no particular order.
    pub async fn list_visible_by_ids<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
    ) -> Result<Vec<FallenSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM fallen WHERE {VISIBLE} AND id = ANY($2)"
        );
        sqlx::query_as::<_, FallenSummary>(&query)
            .bind(ModerationStatus::Approved.as_str())
            .bind(ids)
            .fetch_all(executor)
            .await
    }
}
