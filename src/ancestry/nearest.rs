// src/ancestry/nearest.rs

use crate::ancestry::exhaustive::find_all_common_ancestors;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::graph::{checked_parents, timestamp, CommitGraph};
use crate::model::{AncestorResult, CommitId, Traced};
use std::cmp::Reverse;

/// The most recent common ancestor of the two parents of `merge`.
///
/// `None` when `merge` is not a merge commit or its parents share no
/// history. Among candidates with the same timestamp the lowest id wins.
pub fn find_nearest_common_parent<G: CommitGraph + ?Sized>(
    graph: &G,
    merge: &CommitId,
    config: &SearchConfig,
) -> Result<Traced<Option<CommitId>>> {
    let parents = checked_parents(graph, merge)?;
    let [first, second] = parents else {
        return Ok(Traced {
            value: None,
            diagnostics: Vec::new(),
            visited: 0,
        });
    };

    let all = find_all_common_ancestors(graph, first, second, config)?;
    let candidates = match &all.value {
        AncestorResult::ManyFound(ids) => ids.as_slice(),
        AncestorResult::Found(id) => std::slice::from_ref(id),
        AncestorResult::NotFound => &[],
    };

    let mut best: Option<(i64, Reverse<&CommitId>)> = None;
    for id in candidates {
        let rank = (timestamp(graph, id)?, Reverse(id));
        if best.as_ref().map_or(true, |b| rank > *b) {
            best = Some(rank);
        }
    }

    Ok(Traced {
        value: best.map(|(_, Reverse(id))| id.clone()),
        diagnostics: all.diagnostics,
        visited: all.visited,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::HistoryGraph;

    #[test]
    fn picks_the_newest_candidate() {
        let graph = HistoryGraph::builder()
            .commit("A", 1, &[])
            .commit("B", 2, &["A"])
            .commit("C", 3, &["A"])
            .commit("M1", 4, &["B", "C"])
            .commit("M2", 5, &["C", "B"])
            .commit("X", 6, &["M1"])
            .commit("Y", 7, &["M2"])
            .commit("Z", 8, &["X", "Y"])
            .build();
        let out = find_nearest_common_parent(&graph, &"Z".into(), &SearchConfig::default()).unwrap();
        assert_eq!(out.value, Some("C".into()));
    }

    #[test]
    fn equal_timestamps_prefer_lowest_id() {
        let graph = HistoryGraph::builder()
            .commit("A", 1, &[])
            .commit("Q", 2, &["A"])
            .commit("P", 2, &["A"])
            .commit("M1", 3, &["P", "Q"])
            .commit("M2", 3, &["Q", "P"])
            .commit("Z", 4, &["M1", "M2"])
            .build();
        let out = find_nearest_common_parent(&graph, &"Z".into(), &SearchConfig::default()).unwrap();
        assert_eq!(out.value, Some("P".into()));
    }

    #[test]
    fn ordinary_commit_is_not_applicable() {
        let graph = HistoryGraph::builder()
            .commit("A", 1, &[])
            .commit("B", 2, &["A"])
            .build();
        let out = find_nearest_common_parent(&graph, &"B".into(), &SearchConfig::default()).unwrap();
        assert_eq!(out.value, None);
    }
}
