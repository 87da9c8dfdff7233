// src/analyzer.rs

use crate::ancestry::find_paths_between;
use crate::config::SearchConfig;
use crate::error::RepoError;
use crate::graph::HistoryGraph;
use crate::model::{CommitId, CommitNode};
use git2::{Commit, Delta, DiffOptions, Oid, Repository, Tree};
use indicatif::ProgressBar;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Author and committer names of one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct People {
    pub author: String,
    pub committer: String,
}

/// Commits reachable from a revision, loaded into memory
#[derive(Debug, Default)]
pub struct RepoHistory {
    pub graph: HistoryGraph,
    pub people: HashMap<CommitId, People>,
    /// Newest first
    pub order: Vec<CommitId>,
}

pub fn open(repo_path: &Path) -> Result<Repository, RepoError> {
    Ok(Repository::discover(repo_path)?)
}

/// Resolve any revision expression (`HEAD~2`, a branch, a sha) to a commit id
pub fn resolve(repo: &Repository, spec: &str) -> Result<CommitId, RepoError> {
    let object = repo
        .revparse_single(spec)
        .map_err(|_| RepoError::BadRevision { spec: spec.to_string() })?;
    let commit = object
        .peel_to_commit()
        .map_err(|_| RepoError::BadRevision { spec: spec.to_string() })?;
    Ok(commit_id(commit.id()))
}

fn commit_id(oid: Oid) -> CommitId {
    CommitId::new(oid.to_string())
}

fn find_commit<'r>(repo: &'r Repository, id: &CommitId) -> Result<Commit<'r>, RepoError> {
    let oid = Oid::from_str(id.as_str()).map_err(|_| RepoError::NotLoaded(id.clone()))?;
    Ok(repo.find_commit(oid)?)
}

/// Walk every commit reachable from any of `revs` and build the in-memory graph
pub fn load_history(repo: &Repository, revs: &[&str], show_progress: bool) -> Result<RepoHistory, RepoError> {
    let mut revwalk = repo.revwalk()?;
    for rev in revs {
        let tip = resolve(repo, rev)?;
        revwalk.push(Oid::from_str(tip.as_str())?)?;
    }
    revwalk.set_sorting(git2::Sort::TIME)?;

    let bar = if show_progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    bar.set_message("Loading commits");

    let mut history = RepoHistory::default();
    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        let id = commit_id(commit.id());
        history.graph.insert(CommitNode {
            id: id.clone(),
            parents: commit.parent_ids().map(commit_id).collect(),
            timestamp: commit.time().seconds(),
        });
        history.people.insert(
            id.clone(),
            People {
                author: commit.author().name().unwrap_or("Unknown").to_string(),
                committer: commit.committer().name().unwrap_or("Unknown").to_string(),
            },
        );
        history.order.push(id);
        bar.inc(1);
    }
    bar.finish_with_message("Commits loaded");
    info!(commits = history.graph.len(), tips = ?revs, "history loaded");

    Ok(history)
}

/// How a path changed between two commits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub added: Vec<String>,
    pub deleted: Vec<String>,
    pub renamed: Vec<(String, String)>,
    pub modified: Vec<String>,
}

impl DiffSummary {
    /// The path each change is best known by: new path for additions and
    /// renames, old path otherwise
    pub fn all_paths(&self) -> Vec<&str> {
        self.added
            .iter()
            .map(String::as_str)
            .chain(self.deleted.iter().map(String::as_str))
            .chain(self.renamed.iter().map(|(_, new)| new.as_str()))
            .chain(self.modified.iter().map(String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.renamed.is_empty() && self.modified.is_empty()
    }
}

/// Files added, deleted, renamed and modified going from `old` to `new`
pub fn summarize_diff(repo: &Repository, old: &CommitId, new: &CommitId) -> Result<DiffSummary, RepoError> {
    let old_tree = find_commit(repo, old)?.tree()?;
    let new_tree = find_commit(repo, new)?.tree()?;
    diff_trees(repo, Some(&old_tree), &new_tree)
}

fn diff_trees(repo: &Repository, old: Option<&Tree>, new: &Tree) -> Result<DiffSummary, RepoError> {
    let mut diff_opts = DiffOptions::new();
    diff_opts.include_untracked(false);
    diff_opts.ignore_filemode(true);

    let mut diff = repo.diff_tree_to_tree(old, Some(new), Some(&mut diff_opts))?;
    diff.find_similar(Some(git2::DiffFindOptions::new().renames(true)))?;

    let mut summary = DiffSummary::default();
    for delta in diff.deltas() {
        let old_path = delta.old_file().path().and_then(|p| p.to_str()).map(String::from);
        let new_path = delta.new_file().path().and_then(|p| p.to_str()).map(String::from);

        match delta.status() {
            Delta::Added => summary.added.extend(new_path),
            Delta::Deleted => summary.deleted.extend(old_path),
            Delta::Renamed => {
                if let (Some(old), Some(new)) = (old_path, new_path) {
                    summary.renamed.push((old, new));
                }
            }
            Delta::Modified | Delta::Typechange => summary.modified.extend(old_path),
            _ => {}
        }
    }
    Ok(summary)
}

/// Number of commits each author made touching each path.
///
/// Merge commits are skipped; root commits count every file they add.
pub fn ownership(repo: &Repository, history: &RepoHistory, show_progress: bool) -> Result<BTreeMap<(String, String), usize>, RepoError> {
    let bar = if show_progress {
        ProgressBar::new(history.order.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    bar.set_message("Counting ownership");

    let mut counts = BTreeMap::new();
    for id in &history.order {
        bar.inc(1);
        let commit = find_commit(repo, id)?;
        let parent_tree = match commit.parent_count() {
            0 => None,
            1 => Some(commit.parent(0)?.tree()?),
            _ => continue,
        };
        let summary = diff_trees(repo, parent_tree.as_ref(), &commit.tree()?)?;
        let author = history
            .people
            .get(id)
            .map_or_else(|| "Unknown".to_string(), |p| p.author.clone());
        for path in summary.all_paths() {
            *counts.entry((author.clone(), path.to_string())).or_insert(0) += 1;
        }
    }
    bar.finish_and_clear();
    debug!(entries = counts.len(), "ownership computed");

    Ok(counts)
}

/// Distinct authors and committers, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contributors {
    pub authors: Vec<String>,
    pub committers: Vec<String>,
}

/// Unique authors and committers along a sequence of commits
pub fn contributors<'a>(history: &RepoHistory, commits: impl IntoIterator<Item = &'a CommitId>) -> Result<Contributors, RepoError> {
    let mut seen_authors = HashSet::new();
    let mut seen_committers = HashSet::new();
    let mut out = Contributors::default();

    for id in commits {
        let people = history.people.get(id).ok_or_else(|| RepoError::NotLoaded(id.clone()))?;
        if seen_authors.insert(people.author.as_str()) {
            out.authors.push(people.author.clone());
        }
        if seen_committers.insert(people.committer.as_str()) {
            out.committers.push(people.committer.clone());
        }
    }
    Ok(out)
}

/// Unique authors and committers over every path from `from` back to `to`
pub fn contributors_between(
    history: &RepoHistory,
    from: &CommitId,
    to: &CommitId,
    config: &SearchConfig,
) -> Result<Contributors, RepoError> {
    for id in [from, to] {
        if !history.graph.contains(id) {
            return Err(RepoError::NotLoaded(id.clone()));
        }
    }
    let paths = find_paths_between(&history.graph, from, to, config)?;
    contributors(history, paths.iter().flatten())
}
