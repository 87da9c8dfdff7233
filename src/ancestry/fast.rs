// src/ancestry/fast.rs

//! Best-effort two-cursor walk.
//!
//! Only first parents are followed, so the answer may be an older ancestor
//! than the true merge base, and on heavily tangled histories the walk can
//! get long. The budget in [`SearchConfig`] bounds it.

use crate::config::{Budget, SearchConfig};
use crate::error::Result;
use crate::graph::{checked_parents, timestamp, CommitGraph};
use crate::model::{AncestorResult, CommitId, Diagnostic, Side, Traced};
use tracing::{debug, trace};

/// Find a commit where the two lines of work joined by `merge` diverged,
/// following first parents only.
///
/// A single-parent commit passes straight through to its parent. A root
/// commit has no lines of work to compare and yields `NotFound`. When a
/// cursor runs out of parents the result is `NotFound` and the stray side is
/// reported as a diagnostic.
pub fn find_common_parent_fast<G: CommitGraph + ?Sized>(
    graph: &G,
    merge: &CommitId,
    config: &SearchConfig,
) -> Result<Traced<AncestorResult>> {
    let mut budget = config.budget();
    budget.visit()?;

    let parents = checked_parents(graph, merge)?;
    let merge_time = timestamp(graph, merge)?;
    for parent in parents {
        budget.check_edge(merge, merge_time, parent, timestamp(graph, parent)?)?;
    }

    let (a, b) = match parents {
        [] => return Ok(done(AncestorResult::NotFound, Vec::new(), &budget)),
        [only] => return Ok(done(AncestorResult::Found(only.clone()), Vec::new(), &budget)),
        [a, b, ..] => (a.clone(), b.clone()),
    };

    walk(graph, a, b, &mut budget)
}

fn walk<G: CommitGraph + ?Sized>(
    graph: &G,
    mut a: CommitId,
    mut b: CommitId,
    budget: &mut Budget,
) -> Result<Traced<AncestorResult>> {
    let mut a_time = timestamp(graph, &a)?;
    let mut b_time = timestamp(graph, &b)?;

    while a != b {
        budget.visit()?;
        // ties move the second cursor
        let (side, cursor, cursor_time) = if a_time > b_time {
            (Side::First, &mut a, &mut a_time)
        } else {
            (Side::Second, &mut b, &mut b_time)
        };

        let parents = checked_parents(graph, cursor)?;
        let Some(next) = parents.first() else {
            debug!(commit = %cursor, %side, "encountered stray ending at branch");
            let mut strays = vec![Diagnostic::StrayBranch {
                side,
                commit: cursor.clone(),
            }];
            let (other_side, other) = match side {
                Side::First => (Side::Second, &b),
                Side::Second => (Side::First, &a),
            };
            if checked_parents(graph, other)?.is_empty() {
                strays.push(Diagnostic::StrayBranch {
                    side: other_side,
                    commit: other.clone(),
                });
            }
            return Ok(done(AncestorResult::NotFound, strays, budget));
        };

        let next_time = timestamp(graph, next)?;
        budget.check_edge(cursor, *cursor_time, next, next_time)?;
        trace!(from = %cursor, to = %next, %side, "advance");
        *cursor = next.clone();
        *cursor_time = next_time;
    }

    debug!(commit = %a, visited = budget.visited(), "common parent found");
    Ok(done(AncestorResult::Found(a), Vec::new(), budget))
}

fn done(value: AncestorResult, diagnostics: Vec<Diagnostic>, budget: &Budget) -> Traced<AncestorResult> {
    Traced {
        value,
        diagnostics,
        visited: budget.visited(),
    }
}
