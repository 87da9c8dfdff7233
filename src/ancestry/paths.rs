// src/ancestry/paths.rs

use crate::config::SearchConfig;
use crate::error::{AncestryError, Result};
use crate::graph::{checked_parents, timestamp, CommitGraph};
use crate::model::{CommitId, CommitPath};
use std::collections::HashSet;
use tracing::debug;

struct Frame<'g> {
    id: &'g CommitId,
    time: i64,
    next_parent: usize,
    reached: bool,
}

/// All simple parent-edge paths from `from` back to `to`, each listed
/// descendant first.
///
/// `from` must not be older than `to`. Branches whose timestamp drops below
/// `to`'s without reaching it are pruned, and commits proven unable to reach
/// `to` are remembered for the rest of the call. An empty result means `to`
/// is not an ancestor of `from`.
pub fn find_paths_between<'g, G: CommitGraph + ?Sized>(
    graph: &'g G,
    from: &'g CommitId,
    to: &'g CommitId,
    config: &SearchConfig,
) -> Result<Vec<CommitPath>> {
    let from_time = timestamp(graph, from)?;
    let to_time = timestamp(graph, to)?;
    if from_time < to_time {
        return Err(AncestryError::InvalidOrdering {
            descendant: from.clone(),
            ancestor: to.clone(),
        });
    }
    if from == to {
        return Ok(vec![vec![from.clone()]]);
    }

    let mut budget = config.budget();
    budget.visit()?;

    let mut paths = Vec::new();
    let mut dead: HashSet<&CommitId> = HashSet::new();
    let mut on_path: HashSet<&CommitId> = HashSet::from([from]);
    let mut stack = vec![Frame {
        id: from,
        time: from_time,
        next_parent: 0,
        reached: false,
    }];

    while let Some(top) = stack.last_mut() {
        let parents = checked_parents(graph, top.id)?;
        let Some(parent) = parents.get(top.next_parent) else {
            let Some(done) = stack.pop() else { break };
            on_path.remove(done.id);
            if !done.reached {
                dead.insert(done.id);
            } else if let Some(below) = stack.last_mut() {
                below.reached = true;
            }
            continue;
        };
        top.next_parent += 1;

        if dead.contains(parent) || on_path.contains(parent) {
            continue;
        }
        let parent_time = timestamp(graph, parent)?;
        budget.check_edge(top.id, top.time, parent, parent_time)?;

        if parent == to {
            top.reached = true;
            let mut path: CommitPath = stack.iter().map(|f| f.id.clone()).collect();
            path.push(to.clone());
            paths.push(path);
            continue;
        }
        if parent_time < to_time {
            dead.insert(parent);
            continue;
        }

        budget.visit()?;
        on_path.insert(parent);
        stack.push(Frame {
            id: parent,
            time: parent_time,
            next_parent: 0,
            reached: false,
        });
    }

    debug!(%from, %to, paths = paths.len(), visited = budget.visited(), "path enumeration finished");
    Ok(paths)
}
