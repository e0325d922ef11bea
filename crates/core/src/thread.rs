//! Comment-tree materialization.
//!
//! Turns the comment rows of one discussion into a flat, depth-annotated
//! sequence ordered so that every comment follows its parent and each
//! subtree is contiguous. The same breadth-expanding closure serves both
//! scopes; only the base case differs (see [`ThreadRoot`]).
//!
//! The parent graph is expected to be a forest. Rows that break that
//! expectation are never traversed blindly:
//!
//! - a parent cycle reachable from the scope, or sitting among the rows the
//!   scope could not reach, fails with [`CoreError::DataIntegrity`];
//! - rows owned by a different discussion, or whose parent is missing from
//!   the discussion, are skipped and listed in [`Materialized::skipped`].

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// A row that can take part in a comment tree.
pub trait ThreadNode {
    fn node_id(&self) -> DbId;
    fn parent_id(&self) -> Option<DbId>;
    fn discussion_id(&self) -> DbId;
}

/// Root-selection strategy: which rows form level 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadRoot {
    /// Top-level comments (no parent) of a discussion.
    Discussion(DbId),
    /// Direct replies of one comment. The comment itself is not emitted.
    Replies { discussion_id: DbId, comment_id: DbId },
}

impl ThreadRoot {
    pub fn discussion_id(&self) -> DbId {
        match *self {
            ThreadRoot::Discussion(id) => id,
            ThreadRoot::Replies { discussion_id, .. } => discussion_id,
        }
    }

    /// The parent value shared by every base-case row.
    fn seed_parent(&self) -> Option<DbId> {
        match *self {
            ThreadRoot::Discussion(_) => None,
            ThreadRoot::Replies { comment_id, .. } => Some(comment_id),
        }
    }
}

/// One materialized row: the stored record plus its computed position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leveled<T> {
    #[serde(flatten)]
    pub node: T,
    /// Depth below the scope, 0 for base-case rows.
    pub level: u32,
    /// Ids from the base-case row down to this row, serialized as `"1,3,9"`.
    #[serde(serialize_with = "serialize_path")]
    pub path: Vec<DbId>,
}

/// Why a row was left out of a materialized tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The row belongs to another discussion than the scope.
    ForeignDiscussion,
    /// The row's parent is not a comment of the scope's discussion.
    MissingParent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub id: DbId,
    pub reason: SkipReason,
}

/// Result of a materialization: ordered rows plus the report of skipped rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Materialized<T> {
    pub rows: Vec<Leveled<T>>,
    pub skipped: Vec<SkippedRow>,
}

/* --------------------------------------------------------------------------
Materialization
-------------------------------------------------------------------------- */

/// Materialize the tree for `root` out of `rows`.
///
/// `rows` is the candidate set loaded from the store, normally every comment
/// of the scope's discussion. `max_level` drops rows deeper than the limit
/// after the full closure has been computed, so surviving rows keep the
/// level and path they have in the unfiltered tree.
pub fn materialize<T: ThreadNode>(
    rows: Vec<T>,
    root: ThreadRoot,
    max_level: Option<u32>,
) -> Result<Materialized<T>, CoreError> {
    let discussion_id = root.discussion_id();
    let mut skipped = Vec::new();

    // Group candidates by parent. Foreign rows never enter the graph.
    let mut children: HashMap<Option<DbId>, Vec<T>> = HashMap::new();
    let mut known: HashSet<DbId> = HashSet::new();
    for row in rows {
        if row.discussion_id() != discussion_id {
            skipped.push(SkippedRow {
                id: row.node_id(),
                reason: SkipReason::ForeignDiscussion,
            });
            continue;
        }
        if !known.insert(row.node_id()) {
            return Err(CoreError::DataIntegrity(format!(
                "comment {} appears more than once in discussion {discussion_id}",
                row.node_id()
            )));
        }
        children.entry(row.parent_id()).or_default().push(row);
    }

    let mut visited: HashSet<DbId> = HashSet::new();
    if let ThreadRoot::Replies { comment_id, .. } = root {
        visited.insert(comment_id);
    }

    let mut out: Vec<Leveled<T>> = Vec::new();
    let mut frontier: Vec<usize> = Vec::new();

    for node in children.remove(&root.seed_parent()).unwrap_or_default() {
        visited.insert(node.node_id());
        frontier.push(out.len());
        out.push(Leveled {
            path: vec![node.node_id()],
            node,
            level: 0,
        });
    }

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for idx in frontier {
            let parent_id = out[idx].node.node_id();
            let Some(kids) = children.remove(&Some(parent_id)) else {
                continue;
            };
            let level = out[idx].level + 1;
            let parent_path = out[idx].path.clone();
            for node in kids {
                let id = node.node_id();
                if !visited.insert(id) {
                    return Err(CoreError::DataIntegrity(format!(
                        "comment {id} is its own ancestor (path {})",
                        join_path(&parent_path)
                    )));
                }
                let mut path = parent_path.clone();
                path.push(id);
                next.push(out.len());
                out.push(Leveled { node, level, path });
            }
        }
        frontier = next;
    }

    if let ThreadRoot::Discussion(_) = root {
        report_unreached(children, &mut skipped)?;
    }

    if let Some(max) = max_level {
        out.retain(|row| row.level <= max);
    }

    out.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(Materialized { rows: out, skipped })
}

/// Classify rows a discussion-wide closure did not reach.
///
/// Every comment of a discussion is reachable from its top-level comments
/// unless its ancestor chain is broken (skipped) or loops (error).
fn report_unreached<T: ThreadNode>(
    leftover: HashMap<Option<DbId>, Vec<T>>,
    skipped: &mut Vec<SkippedRow>,
) -> Result<(), CoreError> {
    let parent_of: HashMap<DbId, Option<DbId>> = leftover
        .values()
        .flatten()
        .map(|row| (row.node_id(), row.parent_id()))
        .collect();

    let mut ids: Vec<DbId> = parent_of.keys().copied().collect();
    ids.sort_unstable();

    for id in ids {
        let mut seen = HashSet::from([id]);
        let mut cursor = parent_of.get(&id).copied().flatten();
        while let Some(ancestor) = cursor {
            if !seen.insert(ancestor) {
                return Err(CoreError::DataIntegrity(format!(
                    "comment {id} is caught in a parent cycle through comment {ancestor}"
                )));
            }
            cursor = parent_of.get(&ancestor).copied().flatten();
        }
        skipped.push(SkippedRow {
            id,
            reason: SkipReason::MissingParent,
        });
    }

    Ok(())
}

/* --------------------------------------------------------------------------
Path formatting
-------------------------------------------------------------------------- */

/// Comma-joined id sequence, e.g. `"1,3,9"`.
pub fn join_path(path: &[DbId]) -> String {
    path.iter()
        .map(DbId::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn serialize_path<S: serde::Serializer>(path: &[DbId], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&join_path(path))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
