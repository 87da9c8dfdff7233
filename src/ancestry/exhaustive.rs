// src/ancestry/exhaustive.rs

//! Exhaustive common-ancestor search.
//!
//! Both cursors walk back like the fast walk, always moving the newer one,
//! but when that cursor sits on a merge the pair is split into one pair per
//! merge parent. Pairs are tracked unordered in a per-call visited set, so a
//! subproblem reached through several merges is explored once. Every pair
//! where the cursors coincide is a candidate.

use crate::config::{Budget, SearchConfig};
use crate::error::Result;
use crate::graph::{checked_parents, timestamp, CommitGraph};
use crate::model::{AncestorResult, CommitId, Diagnostic, Traced};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, trace, warn};

type PairKey = (CommitId, CommitId);

fn key(a: &CommitId, b: &CommitId) -> PairKey {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// A cursor position. `depth` counts the longest run of same-second
/// ancestors below the commit, so a descendant always sorts above its
/// ancestor even when their timestamps are equal.
#[derive(Debug, Clone)]
struct Cursor {
    id: CommitId,
    time: i64,
    depth: u32,
}

impl Cursor {
    fn rank(&self) -> (i64, u32) {
        (self.time, self.depth)
    }
}

/// Cursor pair ordered newest first. Remaining ties go to the lower id.
struct Pair {
    newer: Cursor,
    older: Cursor,
}

impl Pair {
    fn new(a: Cursor, b: Cursor) -> Self {
        if (a.rank(), &b.id) >= (b.rank(), &a.id) {
            Pair { newer: a, older: b }
        } else {
            Pair { newer: b, older: a }
        }
    }
}

/// Every coincidence point reachable by walking `c1` and `c2` back, with
/// merges explored on all parents. The result is `ManyFound` sorted by id;
/// an empty list means the lines of work never meet.
pub fn find_all_common_ancestors<G: CommitGraph + ?Sized>(
    graph: &G,
    c1: &CommitId,
    c2: &CommitId,
    config: &SearchConfig,
) -> Result<Traced<AncestorResult>> {
    let mut budget = config.budget();
    let mut search = Search {
        graph,
        seen: HashSet::new(),
        found: BTreeSet::new(),
        depths: HashMap::new(),
    };

    let start = Pair::new(
        search.cursor(c1.clone(), timestamp(graph, c1)?)?,
        search.cursor(c2.clone(), timestamp(graph, c2)?)?,
    );
    let mut work = vec![start];
    while let Some(pair) = work.pop() {
        if let Err(e) = search.run(pair, &mut work, &mut budget) {
            if e.is_search_aborted() {
                warn!(%c1, %c2, visited = budget.visited(), "common ancestor search aborted");
            }
            return Err(e);
        }
    }

    let found: Vec<CommitId> = search.found.into_iter().collect();
    let diagnostics = found.iter().cloned().map(Diagnostic::Candidate).collect();
    Ok(Traced {
        value: AncestorResult::ManyFound(found),
        diagnostics,
        visited: budget.visited(),
    })
}

struct Search<'g, G: ?Sized> {
    graph: &'g G,
    seen: HashSet<PairKey>,
    found: BTreeSet<CommitId>,
    depths: HashMap<CommitId, u32>,
}

impl<G: CommitGraph + ?Sized> Search<'_, G> {
    /// Walk one pair until it coincides, strays, joins a pair already seen,
    /// or splits at a merge (pushing the halves onto `work`).
    fn run(&mut self, mut pair: Pair, work: &mut Vec<Pair>, budget: &mut Budget) -> Result<()> {
        loop {
            if !self.seen.insert(key(&pair.newer.id, &pair.older.id)) {
                return Ok(());
            }
            budget.visit()?;

            if pair.newer.id == pair.older.id {
                debug!(commit = %pair.newer.id, "candidate parent");
                self.found.insert(pair.newer.id);
                return Ok(());
            }

            // Only the newer cursor moves. Splitting an older merge early
            // would step past it before the newer line could arrive there.
            let newer_parents = self.parents(&pair.newer, budget)?;
            if newer_parents.len() == 2 {
                for p in newer_parents {
                    work.push(Pair::new(p, pair.older.clone()));
                }
                return Ok(());
            }

            let Some(next) = newer_parents.into_iter().next() else {
                trace!(commit = %pair.newer.id, "stray branch");
                return Ok(());
            };
            trace!(from = %pair.newer.id, to = %next.id, "advance");
            pair = Pair::new(next, pair.older);
        }
    }

    fn parents(&mut self, cursor: &Cursor, budget: &Budget) -> Result<Vec<Cursor>> {
        let graph = self.graph;
        let mut out = Vec::with_capacity(2);
        for p in checked_parents(graph, &cursor.id)? {
            let p_time = timestamp(graph, p)?;
            budget.check_edge(&cursor.id, cursor.time, p, p_time)?;
            out.push(self.cursor(p.clone(), p_time)?);
        }
        Ok(out)
    }

    fn cursor(&mut self, id: CommitId, time: i64) -> Result<Cursor> {
        let depth = self.depth(&id, time)?;
        Ok(Cursor { id, time, depth })
    }

    /// Longest chain of parents sharing `time`, memoized for the call.
    /// Only same-second parents are followed, so this stays local.
    fn depth(&mut self, id: &CommitId, time: i64) -> Result<u32> {
        if let Some(&d) = self.depths.get(id) {
            return Ok(d);
        }
        let graph = self.graph;
        let mut open: HashSet<CommitId> = HashSet::from([id.clone()]);
        let mut stack = vec![id.clone()];
        while let Some(top) = stack.last() {
            let mut depth = 0;
            let mut pending = None;
            for p in checked_parents(graph, top)? {
                if timestamp(graph, p)? != time || open.contains(p) {
                    continue;
                }
                match self.depths.get(p) {
                    Some(&d) => depth = depth.max(d + 1),
                    None => {
                        pending = Some(p.clone());
                        break;
                    }
                }
            }
            match pending {
                Some(p) => {
                    open.insert(p.clone());
                    stack.push(p);
                }
                None => {
                    if let Some(done) = stack.pop() {
                        open.remove(&done);
                        self.depths.insert(done, depth);
                    }
                }
            }
        }
        Ok(self.depths.get(id).copied().unwrap_or(0))
    }
}
