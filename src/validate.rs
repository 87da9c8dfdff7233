// src/validate.rs

use crate::graph::HistoryGraph;
use crate::model::CommitId;
use std::fmt;

/// Something about a history that the ancestry walks assume away
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    TooManyParents { commit: CommitId, count: usize },
    NonMonotonicTimestamp {
        commit: CommitId,
        parent: CommitId,
        child_time: i64,
        parent_time: i64,
    },
    /// A parent id that is not in the loaded set (shallow clone or partial load)
    MissingParent { commit: CommitId, parent: CommitId },
    /// More than one root; legitimate after merging unrelated histories
    MultipleRoots(Vec<CommitId>),
}

impl Issue {
    /// Warnings do not make a history invalid
    pub fn is_warning(&self) -> bool {
        matches!(self, Issue::MultipleRoots(_))
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::TooManyParents { commit, count } => {
                write!(f, "{} has {} parents", commit, count)
            }
            Issue::NonMonotonicTimestamp {
                commit,
                parent,
                child_time,
                parent_time,
            } => write!(
                f,
                "{} ({}) is older than its parent {} ({})",
                commit, child_time, parent, parent_time
            ),
            Issue::MissingParent { commit, parent } => {
                write!(f, "{} refers to unknown parent {}", commit, parent)
            }
            Issue::MultipleRoots(roots) => write!(f, "{} root commits", roots.len()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub commits: usize,
    pub roots: Vec<CommitId>,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.iter().all(Issue::is_warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| !i.is_warning())
    }
}

/// Check a loaded history against the shape the ancestry queries expect:
/// at most two parents, parents never newer than children, every parent
/// present, and a single root.
pub fn validate_history(graph: &HistoryGraph) -> ValidationReport {
    let mut nodes: Vec<_> = graph.nodes().collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let mut report = ValidationReport {
        commits: nodes.len(),
        ..ValidationReport::default()
    };

    for node in nodes {
        if node.is_root() {
            report.roots.push(node.id.clone());
        }
        if node.parents.len() > 2 {
            report.issues.push(Issue::TooManyParents {
                commit: node.id.clone(),
                count: node.parents.len(),
            });
        }
        for parent in &node.parents {
            match graph.get(parent) {
                None => report.issues.push(Issue::MissingParent {
                    commit: node.id.clone(),
                    parent: parent.clone(),
                }),
                Some(p) if p.timestamp > node.timestamp => {
                    report.issues.push(Issue::NonMonotonicTimestamp {
                        commit: node.id.clone(),
                        parent: parent.clone(),
                        child_time: node.timestamp,
                        parent_time: p.timestamp,
                    })
                }
                Some(_) => {}
            }
        }
    }

    if report.roots.len() > 1 {
        report.issues.push(Issue::MultipleRoots(report.roots.clone()));
    }
    report
}
