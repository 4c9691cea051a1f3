//! Reply trees built from flat, parent-referencing comment rows.
//!
//! Rows arrive ordered by `created_at` ascending. The builder keeps that
//! order among roots and among the replies of each parent, and places every
//! input row in the output exactly once:
//!
//! - a row whose `parent_id` is absent, equal to its own id, or not present
//!   in the input (an orphan, e.g. a reply to a hidden comment) is a root;
//! - rows in a parent cycle, and rows hanging below one, are unreachable
//!   from any root. For each such group the cycle member that comes first in
//!   input order is promoted to a root (after the regular roots) and the
//!   cycle is cut at that point;
//! - nesting stops at [`MAX_NESTING`] levels. A reply that would sit deeper
//!   is attached next to its parent, under the deepest ancestor that still
//!   has room, in reading order.
//!
//! Building, counting and dropping are iterative. Serialization recurses, so
//! the nesting limit is what keeps it bounded.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::DbId;

/// Deepest level a reply tree is built to; a root is level 1.
pub const MAX_NESTING: usize = 32;

/// A row that can take part in a reply tree.
pub trait Threaded {
    fn id(&self) -> DbId;
    fn parent_id(&self) -> Option<DbId>;
}

/// A row together with its nested replies.
///
/// The row's own fields are flattened into the node when serialized, next to
/// a `replies` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentNode<T> {
    #[serde(flatten)]
    pub comment: T,
    pub replies: Vec<CommentNode<T>>,
}

impl<T> Drop for CommentNode<T> {
    fn drop(&mut self) {
        // Flatten descendants onto a heap stack so each node drops with no
        // replies left.
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.replies);
        }
    }
}

/// Build the reply forest for `comments`.
pub fn build_comments_tree<T: Threaded + Clone>(comments: &[T]) -> Vec<CommentNode<T>> {
    let n = comments.len();

    // First occurrence wins when ids repeat.
    let mut index: HashMap<DbId, usize> = HashMap::with_capacity(n);
    for (i, c) in comments.iter().enumerate() {
        index.entry(c.id()).or_insert(i);
    }

    let parent: Vec<Option<usize>> = comments
        .iter()
        .enumerate()
        .map(|(i, c)| {
            c.parent_id()
                .and_then(|p| index.get(&p).copied())
                .filter(|&p| p != i)
        })
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots: Vec<usize> = Vec::new();
    for (i, p) in parent.iter().enumerate() {
        match p {
            Some(p) => children[*p].push(i),
            None => roots.push(i),
        }
    }

    let mut walk = Walk::new(n);
    for &root in &roots {
        walk.visit(root, &children);
    }
    for i in 0..n {
        if !walk.visited[i] {
            let entry = cycle_entry(i, &parent);
            roots.push(entry);
            walk.visit(entry, &children);
        }
    }

    // Pre-order puts every node before the nodes attached under it, so
    // finishing in reverse pre-order always finds the replies ready.
    let mut slots: Vec<Option<CommentNode<T>>> = (0..n).map(|_| None).collect();
    for &node in walk.order.iter().rev() {
        let replies = walk.attached[node]
            .iter()
            .filter_map(|&child| slots[child].take())
            .collect();
        slots[node] = Some(CommentNode {
            comment: comments[node].clone(),
            replies,
        });
    }

    roots.iter().filter_map(|&root| slots[root].take()).collect()
}

/// Depth-first traversal state shared by all roots of one forest.
struct Walk {
    visited: Vec<bool>,
    /// Nodes in pre-order.
    order: Vec<usize>,
    /// Replies each node will hold, after the nesting limit is applied.
    attached: Vec<Vec<usize>>,
}

impl Walk {
    fn new(n: usize) -> Self {
        Self {
            visited: vec![false; n],
            order: Vec::with_capacity(n),
            attached: vec![Vec::new(); n],
        }
    }

    /// Visit the subtree under `root` without recursion.
    fn visit(&mut self, root: usize, children: &[Vec<usize>]) {
        self.visited[root] = true;
        self.order.push(root);

        // (node, next child to look at, level, node it is attached under)
        let mut stack: Vec<(usize, usize, usize, Option<usize>)> = vec![(root, 0, 1, None)];
        while let Some(top) = stack.last_mut() {
            let (node, cursor, level, anchor) = *top;
            let Some(&child) = children[node].get(cursor) else {
                stack.pop();
                continue;
            };
            top.1 += 1;
            if self.visited[child] {
                continue;
            }
            self.visited[child] = true;
            self.order.push(child);

            let (child_anchor, child_level) = match anchor {
                Some(up) if level >= MAX_NESTING => (up, level),
                _ => (node, level + 1),
            };
            self.attached[child_anchor].push(child);
            stack.push((child, 0, child_level, Some(child_anchor)));
        }
    }
}

/// The cycle member to promote for the unreachable row `start`.
///
/// Following parents from an unreachable row always ends in a cycle; the
/// member that comes first in input order is returned.
fn cycle_entry(start: usize, parent: &[Option<usize>]) -> usize {
    let mut path: Vec<usize> = Vec::new();
    let mut seen: HashSet<usize> = HashSet::new();
    let mut current = start;
    while seen.insert(current) {
        path.push(current);
        match parent[current] {
            Some(p) => current = p,
            None => return current,
        }
    }
    let cycle_start = path.iter().position(|&i| i == current).unwrap_or(0);
    path[cycle_start..].iter().copied().min().unwrap_or(current)
}

/// Total number of nodes in a forest, replies included.
pub fn count_nested_comments<T>(nodes: &[CommentNode<T>]) -> usize {
    let mut count = 0;
    let mut stack: Vec<&CommentNode<T>> = nodes.iter().collect();
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.replies.iter());
    }
    count
}

/// Deepest nesting level in a forest; a lone root has depth 1.
pub fn tree_depth<T>(nodes: &[CommentNode<T>]) -> usize {
    let mut deepest = 0;
    let mut stack: Vec<(&CommentNode<T>, usize)> = nodes.iter().map(|n| (n, 1)).collect();
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(node.replies.iter().map(|r| (r, depth + 1)));
    }
    deepest
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Row {
        id: DbId,
        parent_id: Option<DbId>,
    }

    impl Threaded for Row {
        fn id(&self) -> DbId {
            self.id
        }
        fn parent_id(&self) -> Option<DbId> {
            self.parent_id
        }
    }

    fn row(id: DbId, parent_id: Option<DbId>) -> Row {
        Row { id, parent_id }
    }

    /// Render a forest as `id(child child)` for compact assertions.
    fn shape(nodes: &[CommentNode<Row>]) -> String {
        nodes
            .iter()
            .map(|n| {
                if n.replies.is_empty() {
                    n.comment.id.to_string()
                } else {
                    format!("{}({})", n.comment.id, shape(&n.replies))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn builds_nested_replies_in_input_order() {
        let rows = vec![row(1, None), row(2, Some(1)), row(3, Some(1)), row(4, Some(2))];
        let tree = build_comments_tree(&rows);

        assert_eq!(shape(&tree), "1(2(4) 3)");
        assert_eq!(count_nested_comments(&tree), 4);
        assert_eq!(tree_depth(&tree), 3);
    }

    #[test]
    fn flat_input_yields_roots_without_replies() {
        let rows: Vec<Row> = (1..=5).map(|id| row(id, None)).collect();
        let tree = build_comments_tree(&rows);

        assert_eq!(tree.len(), 5);
        assert!(tree.iter().all(|n| n.replies.is_empty()));
        assert_eq!(shape(&tree), "1 2 3 4 5");
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        let tree = build_comments_tree::<Row>(&[]);
        assert!(tree.is_empty());
        assert_eq!(count_nested_comments(&tree), 0);
        assert_eq!(tree_depth(&tree), 0);
    }

    #[test]
    fn reply_listed_before_its_parent_is_still_attached() {
        let rows = vec![row(2, Some(1)), row(1, None)];
        assert_eq!(shape(&build_comments_tree(&rows)), "1(2)");
    }

    #[test]
    fn orphans_are_promoted_to_roots_in_place() {
        let rows = vec![row(1, None), row(2, Some(99)), row(3, Some(2)), row(4, None)];
        let tree = build_comments_tree(&rows);

        assert_eq!(shape(&tree), "1 2(3) 4");
        assert_eq!(count_nested_comments(&tree), rows.len());
    }

    #[test]
    fn self_parented_row_is_a_root() {
        let rows = vec![row(1, Some(1)), row(2, Some(1))];
        assert_eq!(shape(&build_comments_tree(&rows)), "1(2)");
    }

    #[test]
    fn cycles_are_cut_at_first_member() {
        let rows = vec![row(1, None), row(2, Some(3)), row(3, Some(2)), row(4, Some(3))];
        let tree = build_comments_tree(&rows);

        assert_eq!(shape(&tree), "1 2(3(4))");
        assert_eq!(count_nested_comments(&tree), rows.len());
    }

    #[test]
    fn cycle_is_entered_at_a_member_even_when_a_dangling_reply_comes_first() {
        // 4 hangs below the 2 <-> 3 cycle and is listed before both.
        let rows = vec![row(4, Some(3)), row(2, Some(3)), row(3, Some(2))];
        let tree = build_comments_tree(&rows);

        assert_eq!(shape(&tree), "2(3(4))");
        assert_eq!(count_nested_comments(&tree), rows.len());
    }

    #[test]
    fn replies_past_the_nesting_limit_stay_at_the_last_level() {
        let rows: Vec<Row> = (1..=40)
            .map(|id| row(id, if id == 1 { None } else { Some(id - 1) }))
            .collect();
        let tree = build_comments_tree(&rows);

        assert_eq!(tree_depth(&tree), MAX_NESTING);
        assert_eq!(count_nested_comments(&tree), rows.len());

        let mut last_with_room = &tree[0];
        for _ in 2..MAX_NESTING {
            last_with_room = &last_with_room.replies[0];
        }
        let flattened: Vec<DbId> = last_with_room.replies.iter().map(|n| n.comment.id).collect();
        let expected: Vec<DbId> = (MAX_NESTING as DbId..=40).collect();
        assert_eq!(flattened, expected);
        assert!(last_with_room.replies.iter().all(|n| n.replies.is_empty()));
    }

    #[test]
    fn very_deep_chain_builds_serializes_and_drops_on_a_small_stack() {
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(|| {
                let rows: Vec<Row> = (1..=100_000)
                    .map(|id| row(id, if id == 1 { None } else { Some(id - 1) }))
                    .collect();
                let tree = build_comments_tree(&rows);

                assert_eq!(tree.len(), 1);
                assert_eq!(count_nested_comments(&tree), 100_000);
                assert_eq!(tree_depth(&tree), MAX_NESTING);

                let bytes = serde_json::to_vec(&tree).unwrap();
                assert!(!bytes.is_empty());
                drop(tree);
            })
            .unwrap();

        handle.join().unwrap();
    }

    #[test]
    fn builder_does_not_mutate_input() {
        let rows = vec![row(1, None), row(2, Some(1))];
        let before = rows.clone();
        let _ = build_comments_tree(&rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn node_serializes_flattened_with_replies() {
        let tree = build_comments_tree(&[row(1, None), row(2, Some(1))]);
        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(json[0]["id"], 1);
        assert!(json[0]["parent_id"].is_null());
        assert_eq!(json[0]["replies"][0]["id"], 2);
        assert_eq!(json[0]["replies"][0]["replies"], serde_json::json!([]));
    }
}
