// src/ancestry/mod.rs

//! Ancestry queries over a [`CommitGraph`](crate::graph::CommitGraph).
//!
//! Every query is a pure function of its inputs: visited sets and budgets
//! live only for the duration of one call, and traversals use explicit
//! work-lists so history depth never turns into stack depth.

mod dominance;
mod exhaustive;
mod fast;
mod nearest;
mod paths;

pub use dominance::is_dominated;
pub use exhaustive::find_all_common_ancestors;
pub use fast::find_common_parent_fast;
pub use nearest::find_nearest_common_parent;
pub use paths::find_paths_between;
