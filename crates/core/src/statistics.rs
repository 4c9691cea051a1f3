//! Site-wide statistics over approved fallen records.
//!
//! [`aggregate`] is a pure function of the fetched rows: the caller loads all
//! approved, non-deleted fallen records plus the fallen ids of all approved
//! award rows, and gets back every summary view in one pass each.

use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use crate::fallen::FallenFacts;
use crate::labels::{service_type_label, UNSPECIFIED_LABEL};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of hometown buckets kept in `byRegion`.
pub const TOP_REGIONS: usize = 10;

/// Length of the `youngest`, `oldest` and `mostDecorated` lists.
pub const TOP_LIST_SIZE: usize = 5;

/// Number of most recent year-month buckets kept in `byMonth`.
pub const MONTH_WINDOW: usize = 18;

/// Fixed age brackets as `(label, inclusive upper bound)`. The last bracket
/// is open-ended; ages below the first lower bound fall in the first one.
pub const AGE_BRACKETS: &[(&str, Option<i32>)] = &[
    ("18-25", Some(25)),
    ("26-35", Some(35)),
    ("36-45", Some(45)),
    ("46-55", Some(55)),
    ("56+", None),
];

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Full statistics payload served by `GET /api/statistics`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub overview: Overview,
    pub by_region: Vec<NamedCount>,
    pub by_service_type: Vec<NamedCount>,
    pub by_age: Vec<AgeBucket>,
    pub by_month: Vec<MonthBucket>,
    pub youngest: Vec<AgeEntry>,
    pub oldest: Vec<AgeEntry>,
    pub most_decorated: Vec<DecoratedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_heroes: usize,
    pub total_regions: usize,
    /// Mean age at death, rounded; `0` when no age is computable.
    pub avg_age: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBucket {
    pub range: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    /// `YYYY-MM` of the death date.
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeEntry {
    pub id: DbId,
    pub name: String,
    pub age: i32,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedEntry {
    pub id: DbId,
    pub name: String,
    pub awards_count: usize,
    pub photo_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute every statistics view from the fetched rows.
///
/// `award_fallen_ids` holds one entry per approved award row; ids that do
/// not belong to a record in `fallen` are ignored.
pub fn aggregate<F: FallenFacts>(fallen: &[F], award_fallen_ids: &[DbId]) -> Statistics {
    let aged: Vec<(&F, i32)> = fallen
        .iter()
        .filter_map(|f| f.age().map(|age| (f, age)))
        .collect();

    Statistics {
        overview: overview(fallen, &aged),
        by_region: by_region(fallen),
        by_service_type: by_service_type(fallen),
        by_age: by_age(&aged),
        by_month: by_month(fallen),
        youngest: youngest(&aged),
        oldest: oldest(&aged),
        most_decorated: most_decorated(fallen, award_fallen_ids),
    }
}

fn overview<F: FallenFacts>(fallen: &[F], aged: &[(&F, i32)]) -> Overview {
    let regions: HashSet<&str> = fallen
        .iter()
        .filter_map(|f| f.hometown().map(str::trim))
        .filter(|h| !h.is_empty())
        .collect();

    let avg_age = if aged.is_empty() {
        0
    } else {
        let sum: i64 = aged.iter().map(|(_, age)| i64::from(*age)).sum();
        (sum as f64 / aged.len() as f64).round() as i64
    };

    Overview {
        total_heroes: fallen.len(),
        total_regions: regions.len(),
        avg_age,
    }
}

fn by_region<F: FallenFacts>(fallen: &[F]) -> Vec<NamedCount> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for f in fallen {
        let region = match f.hometown().map(str::trim) {
            Some(h) if !h.is_empty() => h.to_string(),
            _ => UNSPECIFIED_LABEL.to_string(),
        };
        *counts.entry(region).or_default() += 1;
    }
    rank(counts, Some(TOP_REGIONS))
}

fn by_service_type<F: FallenFacts>(fallen: &[F]) -> Vec<NamedCount> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for f in fallen {
        *counts.entry(service_type_label(f.service_type())).or_default() += 1;
    }
    rank(counts, None)
}

/// Sort buckets by count descending. The sort is stable, so equal counts
/// keep the order in which their key was first seen.
fn rank(counts: IndexMap<String, usize>, limit: Option<usize>) -> Vec<NamedCount> {
    let mut ranked: Vec<NamedCount> = counts
        .into_iter()
        .map(|(name, count)| NamedCount { name, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

/// Index into [`AGE_BRACKETS`] for an age.
pub fn age_bracket(age: i32) -> usize {
    AGE_BRACKETS
        .iter()
        .position(|(_, max)| max.map_or(true, |max| age <= max))
        .unwrap_or(AGE_BRACKETS.len() - 1)
}

fn by_age<F>(aged: &[(&F, i32)]) -> Vec<AgeBucket> {
    let mut counts = [0usize; AGE_BRACKETS.len()];
    for (_, age) in aged {
        counts[age_bracket(*age)] += 1;
    }
    AGE_BRACKETS
        .iter()
        .zip(counts)
        .map(|(&(range, _), count)| AgeBucket { range, count })
        .collect()
}

fn by_month<F: FallenFacts>(fallen: &[F]) -> Vec<MonthBucket> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for death in fallen.iter().filter_map(|f| f.death_date()) {
        *counts.entry(death.format("%Y-%m").to_string()).or_default() += 1;
    }
    let skip = counts.len().saturating_sub(MONTH_WINDOW);
    counts
        .into_iter()
        .skip(skip)
        .map(|(month, count)| MonthBucket { month, count })
        .collect()
}

fn age_entry<F: FallenFacts>(f: &F, age: i32) -> AgeEntry {
    AgeEntry {
        id: f.id(),
        name: f.display_name(),
        age,
        photo_url: f.photo_url().map(str::to_string),
    }
}

fn youngest<F: FallenFacts>(aged: &[(&F, i32)]) -> Vec<AgeEntry> {
    let mut sorted = aged.to_vec();
    sorted.sort_by_key(|(_, age)| *age);
    sorted
        .into_iter()
        .take(TOP_LIST_SIZE)
        .map(|(f, age)| age_entry(f, age))
        .collect()
}

fn oldest<F: FallenFacts>(aged: &[(&F, i32)]) -> Vec<AgeEntry> {
    let mut sorted = aged.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
        .into_iter()
        .take(TOP_LIST_SIZE)
        .map(|(f, age)| age_entry(f, age))
        .collect()
}

fn most_decorated<F: FallenFacts>(fallen: &[F], award_fallen_ids: &[DbId]) -> Vec<DecoratedEntry> {
    let by_id: HashMap<DbId, &F> = fallen.iter().map(|f| (f.id(), f)).collect();

    let mut counts: IndexMap<DbId, usize> = IndexMap::new();
    for id in award_fallen_ids.iter().filter(|id| by_id.contains_key(id)) {
        *counts.entry(*id).or_default() += 1;
    }

    let mut ranked: Vec<(DbId, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(TOP_LIST_SIZE)
        .filter_map(|(id, awards_count)| {
            by_id.get(&id).map(|f| DecoratedEntry {
                id,
                name: f.display_name(),
                awards_count,
                photo_url: f.photo_url().map(str::to_string),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
