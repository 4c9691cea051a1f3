//! Fallen record models.

use memorial_core::fallen::FallenFacts;
use memorial_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A full row from the `fallen` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fallen {
    pub id: DbId,
    pub owner_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub birth_date: Option<Date>,
    pub death_date: Option<Date>,
    pub hometown: Option<String>,
    pub service_type: Option<String>,
    pub military_unit: Option<String>,
    pub rank: Option<String>,
    pub biography: Option<String>,
    pub photo_url: Option<String>,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The columns needed for cards, listings and statistics.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FallenSummary {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub birth_date: Option<Date>,
    pub death_date: Option<Date>,
    pub hometown: Option<String>,
    pub service_type: Option<String>,
    pub photo_url: Option<String>,
}

/// Filters for the paginated listing. `pattern` is an escaped `ILIKE`
/// pattern; `service_type` is a validated stored value.
#[derive(Debug, Clone, Default)]
pub struct FallenListFilter {
    pub service_type: Option<String>,
    pub pattern: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

macro_rules! impl_fallen_facts {
    ($ty:ty) => {
        impl FallenFacts for $ty {
            fn id(&self) -> DbId {
                self.id
            }
            fn first_name(&self) -> &str {
                &self.first_name
            }
            fn last_name(&self) -> &str {
                &self.last_name
            }
            fn middle_name(&self) -> Option<&str> {
                self.middle_name.as_deref()
            }
            fn hometown(&self) -> Option<&str> {
                self.hometown.as_deref()
            }
            fn service_type(&self) -> Option<&str> {
                self.service_type.as_deref()
            }
            fn birth_date(&self) -> Option<Date> {
                self.birth_date
            }
            fn death_date(&self) -> Option<Date> {
                self.death_date
            }
            fn photo_url(&self) -> Option<&str> {
                self.photo_url.as_deref()
            }
        }
    };
}

impl_fallen_facts!(Fallen);
impl_fallen_facts!(FallenSummary);
