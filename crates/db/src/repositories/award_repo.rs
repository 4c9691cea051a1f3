//! Repository for the `awards` and `fallen_awards` tables.

use memorial_core::labels::ModerationStatus;
use memorial_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::award::FallenAwardDetail;

/// Read access to awards granted to fallen records.
pub struct AwardRepo;

impl AwardRepo {
    /// The `fallen_id` of every approved award row, one entry per row.
    pub async fn list_approved_fallen_ids<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT fallen_id FROM fallen_awards WHERE status = $1 ORDER BY id ASC",
        )
        .bind(ModerationStatus::Approved.as_str())
        .fetch_all(executor)
        .await
    }

    /// Approved awards of one record with their definitions, by award date.
    pub async fn list_approved_for_fallen<'e>(
        executor: impl PgExecutor<'e>,
        fallen_id: DbId,
    ) -> Result<Vec<FallenAwardDetail>, sqlx::Error> {
        sqlx::query_as::<_, FallenAwardDetail>(
            "SELECT fa.id, fa.fallen_id, fa.award_id, a.name AS award_name,
                    a.description AS award_description, a.image_url AS award_image_url,
                    fa.citation, fa.awarded_date
             FROM fallen_awards fa
             JOIN awards a ON a.id = fa.award_id
             WHERE fa.fallen_id = $1 AND fa.status = $2
             ORDER BY fa.awarded_date ASC NULLS LAST, fa.id ASC",
        )
        .bind(fallen_id)
        .bind(ModerationStatus::Approved.as_str())
        .fetch_all(executor)
        .await
    }
}
