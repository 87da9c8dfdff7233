// src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find where lines of work in a git history diverged", long_about = None)]
pub struct Args {
    /// Path to the git repository to analyze
    #[arg(short, long, default_value = ".")]
    pub repo: PathBuf,

    /// Configuration file (defaults to .branchpoint.toml in the repository)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum commits a single query may visit (0 for no limit)
    #[arg(long)]
    pub max_visits: Option<usize>,

    /// Give up on a single query after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Accept parents with later timestamps than their children
    #[arg(long)]
    pub lenient_timestamps: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Where the two parents of a merge diverged (fast walk, nearest, all candidates)
    Base {
        /// The merge commit
        merge: String,
    },
    /// Every common ancestor candidate of two commits
    Ancestors { first: String, second: String },
    /// Whether every path from a merge back to a root passes through a commit
    Dominated { merge: String, branch_point: String },
    /// All paths from a commit back to one of its ancestors
    Paths { from: String, to: String },
    /// Unique authors and committers over all paths between two commits
    Contributors { from: String, to: String },
    /// Check the history for shapes the ancestry walks cannot handle
    Validate {
        #[arg(long, default_value = "HEAD")]
        rev: String,
    },
    /// Compare the fast walk with the exhaustive search on every merge
    Scan {
        #[arg(long, default_value = "HEAD")]
        rev: String,
    },
    /// Print markdown links to every commit on GitHub
    Links {
        /// GitHub user or organization owning the repository
        #[arg(long)]
        owner: String,
        /// GitHub repository name
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "HEAD")]
        rev: String,
    },
    /// Summarize files added, deleted, renamed and modified between two commits
    Diff { old: String, new: String },
    /// Count, per author, the commits touching each path
    Ownership {
        #[arg(long, default_value = "HEAD")]
        rev: String,
    },
}
