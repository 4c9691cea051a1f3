//! Read-only view of a fallen record as consumed by the aggregation and
//! assembly code, plus the derived values computed from it.

use chrono::Datelike;

use crate::types::{Date, DbId};

/// Accessors the core needs from a fallen record row.
///
/// Implemented by the database model; tests implement it on small fixtures.
pub trait FallenFacts {
    fn id(&self) -> DbId;
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;
    fn middle_name(&self) -> Option<&str>;
    fn hometown(&self) -> Option<&str>;
    fn service_type(&self) -> Option<&str>;
    fn birth_date(&self) -> Option<Date>;
    fn death_date(&self) -> Option<Date>;
    fn photo_url(&self) -> Option<&str>;

    /// "Last First Middle", skipping blank parts.
    fn display_name(&self) -> String {
        full_name(self.last_name(), self.first_name(), self.middle_name())
    }

    /// Age at death, see [`age_at_death`].
    fn age(&self) -> Option<i32> {
        age_at_death(self.birth_date(), self.death_date())
    }
}

/// Join name parts with single spaces, skipping blank ones.
pub fn full_name(last: &str, first: &str, middle: Option<&str>) -> String {
    [Some(last), Some(first), middle]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Age at death as the difference of calendar years.
///
/// Returns `None` when either date is missing or the death year precedes
/// the birth year.
pub fn age_at_death(birth: Option<Date>, death: Option<Date>) -> Option<i32> {
    let age = death?.year() - birth?.year();
    (age >= 0).then_some(age)
}
