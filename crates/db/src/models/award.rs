//! Award models.

use memorial_core::types::{Date, DbId};
use serde::Serialize;
use sqlx::FromRow;

/// An approved `fallen_awards` row joined with its `awards` definition.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FallenAwardDetail {
    pub id: DbId,
    pub fallen_id: DbId,
    pub award_id: DbId,
    pub award_name: String,
    pub award_description: Option<String>,
    pub award_image_url: Option<String>,
    pub citation: Option<String>,
    pub awarded_date: Option<Date>,
}
