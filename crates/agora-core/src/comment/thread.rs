//! Comment thread reconstruction
//!
//! Turns the flat comment list of a post into an ordered forest of root
//! comments, each owning its nested replies. Linking is done in two passes
//! over the input (index by id, then attach to parents), so replies may
//! appear before their parent in the input. Runs in O(n) time and O(n)
//! auxiliary space.

use super::model::Comment;
use crate::types::CommentId;
use std::collections::HashMap;
use tracing::warn;

/// A comment with its direct replies, which recursively carry their own
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CommentNode {
    /// The comment itself
    pub comment: Comment,
    /// Direct replies in input discovery order
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    /// Wrap a comment with no replies attached yet
    pub fn new(comment: Comment) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }

    /// Total number of comments in this subtree, including the root
    pub fn len(&self) -> usize {
        1 + self.replies.iter().map(CommentNode::len).sum::<usize>()
    }

    /// Whether this node has any replies
    pub fn is_leaf(&self) -> bool {
        self.replies.is_empty()
    }

    /// Pre-order traversal collecting comment ids
    pub fn flatten(&self) -> Vec<CommentId> {
        let mut out = Vec::with_capacity(self.len());
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids(&self, out: &mut Vec<CommentId>) {
        out.push(self.comment.id);
        for reply in &self.replies {
            reply.collect_ids(out);
        }
    }
}

/// Pre-order traversal over a whole forest
pub fn flatten_forest(forest: &[CommentNode]) -> Vec<CommentId> {
    let mut out = Vec::new();
    for node in forest {
        node.collect_ids(&mut out);
    }
    out
}

/// Build the reply forest for one post's comments.
///
/// Root comments are returned sorted ascending by `created_at` (stable, so
/// ties keep input order); within a parent, replies keep input order. A
/// comment whose parent id is absent from the input is treated as a root
/// rather than dropped or rejected — a deliberate leniency, surfaced only as
/// a warning. Every input comment appears exactly once in the output:
/// members of a cyclic parent chain (which the write path forbids but
/// arbitrary input may contain) are promoted to roots instead of being lost,
/// and assembly tracks visited nodes so it never loops.
pub fn build_forest(comments: Vec<Comment>) -> Vec<CommentNode> {
    let n = comments.len();

    // First pass: index every comment by id.
    let mut by_id: HashMap<CommentId, usize> = HashMap::with_capacity(n);
    for (i, comment) in comments.iter().enumerate() {
        by_id.insert(comment.id, i);
    }

    // Second pass, in input order: resolve each comment to its parent slot
    // or to the root set.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots: Vec<usize> = Vec::new();
    for (i, comment) in comments.iter().enumerate() {
        match comment.parent_id {
            Some(parent_id) => match by_id.get(&parent_id) {
                Some(&p) if p != i => children[p].push(i),
                Some(_) => {
                    warn!(comment = %comment.id, "comment references itself as parent; treating as root");
                    roots.push(i);
                }
                None => {
                    warn!(
                        comment = %comment.id,
                        parent = %parent_id,
                        "parent comment not present in input; treating as root"
                    );
                    roots.push(i);
                }
            },
            None => roots.push(i),
        }
    }

    // Assemble owned trees bottom-up.
    let mut slots: Vec<Option<CommentNode>> =
        comments.into_iter().map(|c| Some(CommentNode::new(c))).collect();
    let mut visited = vec![false; n];

    let mut forest: Vec<CommentNode> = Vec::with_capacity(roots.len());
    for root in roots {
        if let Some(node) = assemble(root, &children, &mut slots, &mut visited) {
            forest.push(node);
        }
    }

    // Anything still unvisited belongs to a cyclic cluster unreachable from
    // any root. Promote the first member encountered in input order.
    for i in 0..n {
        if !visited[i] {
            if let Some(node) = slots[i].as_ref() {
                warn!(comment = %node.comment.id, "cyclic parent chain detected; promoting comment to root");
            }
            if let Some(node) = assemble(i, &children, &mut slots, &mut visited) {
                forest.push(node);
            }
        }
    }

    forest.sort_by_key(|node| node.comment.created_at);
    forest
}

/// Build the subtree rooted at `root` with an explicit stack, attaching each
/// finished child to its parent's slot. Returns `None` when the root was
/// already consumed by an earlier traversal.
fn assemble(
    root: usize,
    children: &[Vec<usize>],
    slots: &mut [Option<CommentNode>],
    visited: &mut [bool],
) -> Option<CommentNode> {
    if visited[root] {
        return None;
    }
    visited[root] = true;

    // (index, next child cursor)
    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
    while let Some(frame) = stack.last_mut() {
        let (idx, cursor) = *frame;
        if let Some(&child) = children[idx].get(cursor) {
            frame.1 += 1;
            if !visited[child] {
                visited[child] = true;
                stack.push((child, 0));
            }
        } else {
            stack.pop();
            if let Some(node) = slots[idx].take() {
                match stack.last() {
                    Some(&(parent, _)) => {
                        if let Some(parent_node) = slots[parent].as_mut() {
                            parent_node.replies.push(node);
                        }
                    }
                    None => return Some(node),
                }
            }
        }
    }

    None
}
