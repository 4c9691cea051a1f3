//! Public user profile assembly.

use std::collections::HashMap;

use serde::Serialize;

use crate::fallen::FallenFacts;
use crate::labels::relationship_label;
use crate::types::DbId;

/// A user's declared relationship to a fallen record.
pub trait ConnectionFacts {
    fn id(&self) -> DbId;
    fn fallen_id(&self) -> DbId;
    fn relationship(&self) -> &str;
}

/// A connection joined with the record it points at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionView<F> {
    pub id: DbId,
    pub relationship: String,
    pub relationship_label: String,
    pub fallen: F,
}

/// Counters shown on the profile header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileCounts {
    pub heroes_count: usize,
    pub connections_count: usize,
}

/// Join connections with the visible fallen records they reference.
///
/// Connections to records not in `fallen` (unapproved or deleted) are
/// dropped. Order follows `connections`.
pub fn assemble_connections<C, F>(connections: &[C], fallen: &[F]) -> Vec<ConnectionView<F>>
where
    C: ConnectionFacts,
    F: FallenFacts + Clone,
{
    let by_id: HashMap<DbId, &F> = fallen.iter().map(|f| (f.id(), f)).collect();
    connections
        .iter()
        .filter_map(|c| {
            by_id.get(&c.fallen_id()).map(|f| ConnectionView {
                id: c.id(),
                relationship: c.relationship().to_string(),
                relationship_label: relationship_label(c.relationship()),
                fallen: (*f).clone(),
            })
        })
        .collect()
}

pub fn profile_counts<F, V>(heroes: &[F], connections: &[V]) -> ProfileCounts {
    ProfileCounts {
        heroes_count: heroes.len(),
        connections_count: connections.len(),
    }
}
