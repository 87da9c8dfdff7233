// src/error.rs

use crate::model::CommitId;
use std::fmt;
use thiserror::Error;

/// Why a commit breaks the shape the ancestry algorithms rely on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformation {
    /// More than two parents
    TooManyParents(usize),
    /// A parent recorded as newer than its child
    NonMonotonicTimestamp {
        parent: CommitId,
        parent_time: i64,
        child_time: i64,
    },
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformation::TooManyParents(n) => write!(f, "{} parents (at most 2 supported)", n),
            Malformation::NonMonotonicTimestamp {
                parent,
                parent_time,
                child_time,
            } => write!(
                f,
                "parent {} is newer ({}) than its child ({})",
                parent, parent_time, child_time
            ),
        }
    }
}

/// Errors reported by the ancestry queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AncestryError {
    /// The id is not part of the resolved commit set
    #[error("unknown commit: {0}")]
    UnknownCommit(CommitId),

    /// The node-visit budget ran out before the search completed
    #[error("search aborted: budget exceeded after visiting {visited} commits (limit {limit})")]
    BudgetExceeded { visited: usize, limit: usize },

    /// The wall-clock deadline passed before the search completed
    #[error("search aborted: deadline exceeded after visiting {visited} commits")]
    DeadlineExceeded { visited: usize },

    #[error("malformed history at {commit}: {problem}")]
    MalformedHistory {
        commit: CommitId,
        problem: Malformation,
    },

    /// The supposed descendant is older than the supposed ancestor
    #[error("invalid ordering: {descendant} is older than {ancestor}")]
    InvalidOrdering {
        descendant: CommitId,
        ancestor: CommitId,
    },
}

impl AncestryError {
    /// True when the search gave up, as opposed to finding a definite answer
    pub fn is_search_aborted(&self) -> bool {
        matches!(
            self,
            AncestryError::BudgetExceeded { .. } | AncestryError::DeadlineExceeded { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AncestryError>;

/// Errors from the repository access layer
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("cannot resolve revision '{spec}' to a commit")]
    BadRevision { spec: String },

    #[error("commit {0} was not loaded into the history graph")]
    NotLoaded(CommitId),

    #[error(transparent)]
    Ancestry(#[from] AncestryError),
}
