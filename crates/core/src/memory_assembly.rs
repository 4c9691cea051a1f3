//! Memory section of a fallen record's page.
//!
//! Memory items, their additions, the comments on both and the referenced
//! media are fetched as flat row sets (one query each) and joined here by
//! id. Inputs are borrowed; every output value is newly built.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::comment_tree::{build_comments_tree, count_nested_comments, CommentNode, Threaded};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Row accessors
// ---------------------------------------------------------------------------

/// A row that references media by id, in display order.
pub trait MediaHolder {
    fn id(&self) -> DbId;
    fn media_ids(&self) -> &[DbId];
}

/// An addition row, attached to a memory item.
pub trait AdditionRow: MediaHolder {
    fn memory_item_id(&self) -> DbId;
}

/// A comment row that targets a memory item or one of its additions.
pub trait MemoryComment: Threaded {
    fn memory_item_id(&self) -> Option<DbId>;
    fn memory_addition_id(&self) -> Option<DbId>;
}

/// A media row.
pub trait MediaRow {
    fn id(&self) -> DbId;
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// An addition with its media and comment tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledAddition<A, C, M> {
    #[serde(flatten)]
    pub addition: A,
    pub media: Vec<M>,
    pub comments: Vec<CommentNode<C>>,
    pub comments_count: usize,
}

/// A memory item with its media, comment tree and additions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledMemory<I, A, C, M> {
    #[serde(flatten)]
    pub item: I,
    pub media: Vec<M>,
    pub comments: Vec<CommentNode<C>>,
    pub additions: Vec<AssembledAddition<A, C, M>>,
    /// Comments on the item and on all of its additions, replies included.
    pub comments_count: usize,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Distinct media ids referenced by the items and additions, in first-seen
/// order. Used to load all media with a single query.
pub fn collect_media_ids<I: MediaHolder, A: MediaHolder>(items: &[I], additions: &[A]) -> Vec<DbId> {
    let mut seen = HashSet::new();
    items
        .iter()
        .flat_map(|i| i.media_ids().iter())
        .chain(additions.iter().flat_map(|a| a.media_ids().iter()))
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Resolve `ids` against the lookup in the given order, skipping ids with no
/// media row.
pub fn resolve_media<M: Clone>(ids: &[DbId], lookup: &HashMap<DbId, &M>) -> Vec<M> {
    ids.iter()
        .filter_map(|id| lookup.get(id).map(|m| (*m).clone()))
        .collect()
}

/// Comments split by the entity they belong to.
///
/// A comment with an addition id belongs to that addition even when it also
/// carries the item id. Comments with neither are ignored.
#[derive(Debug)]
pub struct CommentPartition<C> {
    pub by_item: HashMap<DbId, Vec<C>>,
    pub by_addition: HashMap<DbId, Vec<C>>,
}

impl<C: MemoryComment + Clone> CommentPartition<C> {
    pub fn new(comments: &[C]) -> Self {
        let mut by_item: HashMap<DbId, Vec<C>> = HashMap::new();
        let mut by_addition: HashMap<DbId, Vec<C>> = HashMap::new();
        for c in comments {
            if let Some(addition_id) = c.memory_addition_id() {
                by_addition.entry(addition_id).or_default().push(c.clone());
            } else if let Some(item_id) = c.memory_item_id() {
                by_item.entry(item_id).or_default().push(c.clone());
            }
        }
        Self {
            by_item,
            by_addition,
        }
    }

    fn tree_for_item(&self, id: DbId) -> Vec<CommentNode<C>> {
        self.by_item
            .get(&id)
            .map(|rows| build_comments_tree(rows))
            .unwrap_or_default()
    }

    fn tree_for_addition(&self, id: DbId) -> Vec<CommentNode<C>> {
        self.by_addition
            .get(&id)
            .map(|rows| build_comments_tree(rows))
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Join memory items with their additions, comment trees and media.
///
/// Item order follows `items`; addition order follows `additions`.
/// Additions whose item is not in `items` are dropped.
pub fn assemble_memories<I, A, C, M>(
    items: &[I],
    additions: &[A],
    comments: &[C],
    media: &[M],
) -> Vec<AssembledMemory<I, A, C, M>>
where
    I: MediaHolder + Clone,
    A: AdditionRow + Clone,
    C: MemoryComment + Clone,
    M: MediaRow + Clone,
{
    let lookup: HashMap<DbId, &M> = media.iter().map(|m| (m.id(), m)).collect();
    let partition = CommentPartition::new(comments);

    let mut additions_by_item: HashMap<DbId, Vec<&A>> = HashMap::new();
    for a in additions {
        additions_by_item.entry(a.memory_item_id()).or_default().push(a);
    }

    items
        .iter()
        .map(|item| {
            let assembled_additions: Vec<AssembledAddition<A, C, M>> = additions_by_item
                .get(&item.id())
                .map(Vec::as_slice)
                .unwrap_or_default()
                .iter()
                .map(|a| {
                    let comments = partition.tree_for_addition(a.id());
                    AssembledAddition {
                        addition: (*a).clone(),
                        media: resolve_media(a.media_ids(), &lookup),
                        comments_count: count_nested_comments(&comments),
                        comments,
                    }
                })
                .collect();

            let comments = partition.tree_for_item(item.id());
            let comments_count = count_nested_comments(&comments)
                + assembled_additions
                    .iter()
                    .map(|a| a.comments_count)
                    .sum::<usize>();

            AssembledMemory {
                item: item.clone(),
                media: resolve_media(item.media_ids(), &lookup),
                comments,
                additions: assembled_additions,
                comments_count,
            }
        })
        .collect()
}

/// Total comments across assembled memories, additions included.
pub fn total_memory_comments<I, A, C, M>(memories: &[AssembledMemory<I, A, C, M>]) -> usize {
    memories.iter().map(|m| m.comments_count).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
