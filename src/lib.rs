// src/lib.rs

//! Ancestry queries for git histories: where two lines of work diverged,
//! which common ancestor is most recent, whether a branch point dominates a
//! merge, and every path between two commits.
//!
//! The algorithms in [`ancestry`] see history only through the
//! [`CommitGraph`] trait. [`analyzer`] loads a repository into a
//! [`HistoryGraph`] with `git2`; [`report`] turns results into text.

pub mod analyzer;
pub mod ancestry;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod report;
pub mod scan;
pub mod telemetry;
pub mod validate;

pub use ancestry::{
    find_all_common_ancestors, find_common_parent_fast, find_nearest_common_parent,
    find_paths_between, is_dominated,
};
pub use config::SearchConfig;
pub use error::{AncestryError, RepoError};
pub use graph::{CommitGraph, HistoryGraph};
pub use model::{AncestorResult, CommitId, CommitNode, Diagnostic, Side, Traced};
