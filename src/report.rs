// src/report.rs

use crate::analyzer::{Contributors, DiffSummary};
use crate::graph::CommitGraph;
use crate::model::{AncestorResult, CommitId, CommitPath, Diagnostic};
use crate::scan::MergeReport;
use crate::validate::ValidationReport;
use chrono::TimeZone;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Markdown link to a commit on GitHub
pub fn commit_link(owner: &str, repo: &str, id: &CommitId) -> String {
    format!("[{id}](https://github.com/{owner}/{repo}/commit/{id})")
}

fn when<G: CommitGraph + ?Sized>(graph: &G, id: &CommitId) -> String {
    graph
        .timestamp_of(id)
        .and_then(|ts| chrono::Utc.timestamp_opt(ts, 0).single())
        .map_or_else(|| "unknown date".to_string(), |t| t.to_rfc2822())
}

/// `abc1234 (Tue, 1 Jul 2003 10:52:37 +0000)`
pub fn describe<G: CommitGraph + ?Sized>(graph: &G, id: &CommitId) -> String {
    format!("{} ({})", id.short(), when(graph, id))
}

pub fn ancestor_result<G: CommitGraph + ?Sized>(graph: &G, result: &AncestorResult) -> String {
    match result {
        AncestorResult::Found(id) => describe(graph, id),
        AncestorResult::NotFound => "none (no shared history)".to_string(),
        AncestorResult::ManyFound(ids) if ids.is_empty() => "none (no shared history)".to_string(),
        AncestorResult::ManyFound(ids) => ids
            .iter()
            .map(|id| describe(graph, id))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub fn diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        let _ = writeln!(out, "  note: {d}");
    }
    out
}

pub fn paths(paths: &[CommitPath]) -> String {
    if paths.is_empty() {
        return "no paths\n".to_string();
    }
    let mut out = String::new();
    for (i, path) in paths.iter().enumerate() {
        let chain: Vec<&str> = path.iter().map(CommitId::short).collect();
        let _ = writeln!(out, "{:>4}: {}", i + 1, chain.join(" -> "));
    }
    out
}

pub fn validation(report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} commits, {} root(s)", report.commits, report.roots.len());
    for issue in report.errors() {
        let _ = writeln!(out, "error: {issue}");
    }
    for issue in report.issues.iter().filter(|i| i.is_warning()) {
        let _ = writeln!(out, "warning: {issue}");
    }
    let verdict = if report.is_valid() { "history looks valid" } else { "history is malformed" };
    let _ = writeln!(out, "{verdict}");
    out
}

pub fn merge_scan<G: CommitGraph + ?Sized>(graph: &G, reports: &[MergeReport]) -> String {
    let mut out = String::new();
    for r in reports {
        let fast = match &r.fast {
            Ok(result) => ancestor_result(graph, result),
            Err(e) => e.to_string(),
        };
        let nearest = match &r.nearest {
            Ok(Some(id)) => describe(graph, id),
            Ok(None) => "none".to_string(),
            Err(e) => e.to_string(),
        };
        let flag = if r.disagrees() { " *" } else { "" };
        let _ = writeln!(out, "{}  fast: {}  nearest: {}{}", r.merge.short(), fast, nearest, flag);
    }
    let disagreements = reports.iter().filter(|r| r.disagrees()).count();
    let _ = writeln!(out, "{} merges, {} where the fast walk differs (*)", reports.len(), disagreements);
    out
}

pub fn diff_summary(summary: &DiffSummary) -> String {
    let mut out = String::new();
    for path in &summary.added {
        let _ = writeln!(out, "Added: {path}");
    }
    for path in &summary.deleted {
        let _ = writeln!(out, "Deleted: {path}");
    }
    for (old, new) in &summary.renamed {
        let _ = writeln!(out, "Renamed: {old} -> {new}");
    }
    for path in &summary.modified {
        let _ = writeln!(out, "Modified: {path}");
    }
    out
}

pub fn ownership(counts: &BTreeMap<(String, String), usize>) -> String {
    let mut out = String::new();
    for ((author, path), n) in counts {
        let _ = writeln!(out, "{n:>5}  {author}  {path}");
    }
    out
}

pub fn contributors(c: &Contributors) -> String {
    format!(
        "authors: {}\ncommitters: {}\n",
        c.authors.join(", "),
        c.committers.join(", ")
    )
}
