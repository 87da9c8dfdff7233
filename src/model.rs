// src/model.rs

use std::fmt;

/// Opaque commit identifier (usually a hex object id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        CommitId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven characters, the way `git log --oneline` prints them
    pub fn short(&self) -> &str {
        let end = self.0.char_indices().nth(7).map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitId {
    fn from(s: &str) -> Self {
        CommitId::new(s)
    }
}

/// One commit as seen by the ancestry algorithms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    pub id: CommitId,
    /// Ordered parents; the first one is the mainline
    pub parents: Vec<CommitId>,
    pub timestamp: i64,
}

impl CommitNode {
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() == 2
    }
}

/// Which of the two walk cursors a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The cursor started at the merge's first parent
    First,
    /// The cursor started at the merge's second parent
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("first"),
            Side::Second => f.write_str("second"),
        }
    }
}

/// Non-fatal observations made during a traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A cursor ran out of parents before meeting the other one
    StrayBranch { side: Side, commit: CommitId },
    /// A coincidence point found by the exhaustive search
    Candidate(CommitId),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::StrayBranch { side, commit } => {
                write!(f, "encountered stray ending on {} branch at {}", side, commit)
            }
            Diagnostic::Candidate(commit) => write!(f, "candidate parent {}", commit),
        }
    }
}

/// Outcome of an ancestor query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AncestorResult {
    /// A specific ancestor
    Found(CommitId),
    /// The two lines of work share no history
    NotFound,
    /// Every coincidence point of an exhaustive search, sorted by id
    ManyFound(Vec<CommitId>),
}

impl AncestorResult {
    pub fn found(&self) -> Option<&CommitId> {
        match self {
            AncestorResult::Found(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            AncestorResult::NotFound => true,
            AncestorResult::ManyFound(ids) => ids.is_empty(),
            AncestorResult::Found(_) => false,
        }
    }
}

/// A result value together with the diagnostics gathered while computing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traced<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of nodes the traversal visited
    pub visited: usize,
}

impl<T> Traced<T> {
    pub fn strays(&self) -> impl Iterator<Item = (Side, &CommitId)> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::StrayBranch { side, commit } => Some((*side, commit)),
            Diagnostic::Candidate(_) => None,
        })
    }
}

/// A chain of commits from a descendant back to one of its ancestors
pub type CommitPath = Vec<CommitId>;
