// src/scan.rs

use crate::ancestry::{find_common_parent_fast, find_nearest_common_parent};
use crate::config::SearchConfig;
use crate::error::AncestryError;
use crate::graph::HistoryGraph;
use crate::model::{AncestorResult, CommitId, Diagnostic};
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;

/// Fast and exhaustive answers for one merge commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub merge: CommitId,
    pub fast: Result<AncestorResult, AncestryError>,
    pub nearest: Result<Option<CommitId>, AncestryError>,
    pub diagnostics: Vec<Diagnostic>,
}

impl MergeReport {
    /// The two strategies produced different definite answers
    pub fn disagrees(&self) -> bool {
        match (&self.fast, &self.nearest) {
            (Ok(AncestorResult::Found(fast)), Ok(Some(nearest))) => fast != nearest,
            _ => false,
        }
    }
}

/// Run both ancestor strategies on every merge in `graph`.
///
/// Merges are processed in parallel; each query gets its own budget, so one
/// pathological merge only aborts its own report. Output is newest first.
pub fn scan_merges(graph: &HistoryGraph, config: &SearchConfig, show_progress: bool) -> Vec<MergeReport> {
    let merges = graph.merges();
    let bar = if show_progress {
        ProgressBar::new(merges.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    bar.set_message("Scanning merges");

    merges
        .into_par_iter()
        .progress_with(bar)
        .map(|merge| {
            let (fast, mut diagnostics) = match find_common_parent_fast(graph, &merge, config) {
                Ok(t) => (Ok(t.value), t.diagnostics),
                Err(e) => (Err(e), Vec::new()),
            };
            let nearest = match find_nearest_common_parent(graph, &merge, config) {
                Ok(t) => {
                    diagnostics.extend(t.diagnostics);
                    Ok(t.value)
                }
                Err(e) => Err(e),
            };
            MergeReport {
                merge,
                fast,
                nearest,
                diagnostics,
            }
        })
        .collect()
}
