// src/ancestry/dominance.rs

use crate::config::SearchConfig;
use crate::error::Result;
use crate::graph::{checked_parents, timestamp, CommitGraph};
use crate::model::CommitId;
use std::collections::HashSet;
use tracing::debug;

/// Whether every ancestry path from `merge` to a root passes through
/// `branch_point`.
///
/// Rather than listing paths one by one, this looks for any root reachable
/// from `merge` without stepping on `branch_point`; finding one disproves
/// dominance. Each commit is expanded at most once per call.
pub fn is_dominated<G: CommitGraph + ?Sized>(
    graph: &G,
    merge: &CommitId,
    branch_point: &CommitId,
    config: &SearchConfig,
) -> Result<bool> {
    let mut budget = config.budget();
    // both ids must exist even when the answer is trivial
    timestamp(graph, branch_point)?;
    if merge == branch_point {
        return Ok(true);
    }

    let mut seen: HashSet<&CommitId> = HashSet::from([merge]);
    let mut stack: Vec<(&CommitId, i64)> = vec![(merge, timestamp(graph, merge)?)];

    while let Some((id, time)) = stack.pop() {
        budget.visit()?;
        let parents = checked_parents(graph, id)?;
        if parents.is_empty() {
            debug!(root = %id, %branch_point, "root reached around branch point");
            return Ok(false);
        }
        for parent in parents {
            let parent_time = timestamp(graph, parent)?;
            budget.check_edge(id, time, parent, parent_time)?;
            if parent == branch_point || !seen.insert(parent) {
                continue;
            }
            stack.push((parent, parent_time));
        }
    }

    Ok(true)
}
