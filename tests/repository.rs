use branchpoint::analyzer::{self, load_history, ownership, resolve, summarize_diff};
use branchpoint::report::commit_link;
use branchpoint::{
    find_common_parent_fast, find_nearest_common_parent, find_paths_between, is_dominated,
    AncestorResult, AncestryError, SearchConfig,
};
use git2::{Oid, Repository, Signature, Time};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    repo: Repository,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        Fixture { _dir: dir, repo }
    }

    fn workdir(&self) -> &Path {
        self.repo.workdir().unwrap()
    }

    /// Commit the current worktree with the given parents and time
    fn commit(&self, author: &str, when: i64, message: &str, parents: &[Oid]) -> Oid {
        let mut index = self.repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.update_all(["*"].iter(), None).unwrap();
        index.write().unwrap();
        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::new(author, &format!("{author}@example.com"), &Time::new(when, 0)).unwrap();
        let parents: Vec<_> = parents.iter().map(|p| self.repo.find_commit(*p).unwrap()).collect();
        let parent_refs: Vec<_> = parents.iter().collect();
        self.repo
            .commit(None, &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn write(&self, path: &str, text: &str) {
        fs::write(self.workdir().join(path), text).unwrap();
    }

    fn point_head(&self, oid: Oid) {
        self.repo.reference("refs/heads/main", oid, true, "test").unwrap();
        self.repo.set_head("refs/heads/main").unwrap();
    }
}

/// base -> (left, right) -> merge
fn diamond_repo() -> (Fixture, [Oid; 4]) {
    let fx = Fixture::new();
    fx.write("a.txt", "one\n");
    let base = fx.commit("ann", 1_000, "base", &[]);
    fx.write("left.txt", "left\n");
    let left = fx.commit("bob", 2_000, "left", &[base]);
    fs::remove_file(fx.workdir().join("left.txt")).unwrap();
    fx.write("a.txt", "one\ntwo\n");
    let right = fx.commit("cat", 2_500, "right", &[base]);
    fx.write("left.txt", "left\n");
    let merge = fx.commit("ann", 3_000, "merge", &[left, right]);
    fx.point_head(merge);
    (fx, [base, left, right, merge])
}

#[test]
fn loads_graph_and_finds_merge_base() {
    let (fx, [base, _, _, merge]) = diamond_repo();
    let history = load_history(&fx.repo, &["HEAD"], false).unwrap();
    assert_eq!(history.graph.len(), 4);
    assert_eq!(history.order.first().map(|c| c.to_string()), Some(merge.to_string()));

    let merge_id = resolve(&fx.repo, "HEAD").unwrap();
    let cfg = SearchConfig::default();
    let fast = find_common_parent_fast(&history.graph, &merge_id, &cfg).unwrap();
    assert_eq!(fast.value, AncestorResult::Found(base.to_string().as_str().into()));
    let nearest = find_nearest_common_parent(&history.graph, &merge_id, &cfg).unwrap();
    assert_eq!(nearest.value.map(|c| c.to_string()), Some(base.to_string()));
}

#[test]
fn bad_revision_is_reported() {
    let (fx, _) = diamond_repo();
    let err = resolve(&fx.repo, "no-such-branch").unwrap_err();
    assert!(err.to_string().contains("no-such-branch"));
}

#[test]
fn diff_summary_classifies_changes() {
    let (fx, [base, left, right, _]) = diamond_repo();
    let (base, left, right) = (
        base.to_string().as_str().into(),
        left.to_string().as_str().into(),
        right.to_string().as_str().into(),
    );

    let summary = summarize_diff(&fx.repo, &base, &left).unwrap();
    assert_eq!(summary.added, vec!["left.txt".to_string()]);
    assert!(summary.modified.is_empty());

    let summary = summarize_diff(&fx.repo, &base, &right).unwrap();
    assert_eq!(summary.modified, vec!["a.txt".to_string()]);
    assert!(summary.added.is_empty());

    let summary = summarize_diff(&fx.repo, &left, &base).unwrap();
    assert_eq!(summary.deleted, vec!["left.txt".to_string()]);
}

#[test]
fn ownership_skips_merges() {
    let (fx, _) = diamond_repo();
    let history = load_history(&fx.repo, &["HEAD"], false).unwrap();
    let counts = ownership(&fx.repo, &history, false).unwrap();

    assert_eq!(counts.get(&("ann".to_string(), "a.txt".to_string())), Some(&1));
    assert_eq!(counts.get(&("bob".to_string(), "left.txt".to_string())), Some(&1));
    assert_eq!(counts.get(&("cat".to_string(), "a.txt".to_string())), Some(&1));
    // the merge re-adds left.txt relative to its second parent but is skipped
    assert_eq!(counts.len(), 3);
}

#[test]
fn contributors_between_merge_and_base() {
    let (fx, _) = diamond_repo();
    let history = load_history(&fx.repo, &["HEAD"], false).unwrap();
    let from = resolve(&fx.repo, "HEAD").unwrap();
    let to = resolve(&fx.repo, "HEAD~1~1").unwrap();
    let out = analyzer::contributors_between(&history, &from, &to, &SearchConfig::default()).unwrap();
    assert_eq!(out.authors, vec!["ann", "bob", "cat"]);
}

#[test]
fn links_cover_every_commit() {
    let (fx, _) = diamond_repo();
    let history = load_history(&fx.repo, &["HEAD"], false).unwrap();
    let links: Vec<String> = history.order.iter().map(|id| commit_link("me", "proj", id)).collect();
    assert_eq!(links.len(), 4);
    assert!(links
        .iter()
        .all(|l| l.starts_with('[') && l.contains("](https://github.com/me/proj/commit/")));
}

/// base -> left, base -> right, with right the newer tip
fn siblings_repo() -> (Fixture, [Oid; 3]) {
    let fx = Fixture::new();
    fx.write("a.txt", "one\n");
    let base = fx.commit("ann", 1_000, "base", &[]);
    fx.write("b.txt", "left\n");
    let left = fx.commit("bob", 2_000, "left", &[base]);
    fx.write("c.txt", "right\n");
    let right = fx.commit("cat", 3_000, "right", &[base]);
    fx.point_head(right);
    (fx, [base, left, right])
}

#[test]
fn queries_between_siblings_load_both_tips() {
    let (fx, [_, left, right]) = siblings_repo();
    let (left, right) = (left.to_string(), right.to_string());
    let history = load_history(&fx.repo, &[right.as_str(), left.as_str()], false).unwrap();
    assert_eq!(history.graph.len(), 3);

    let (from, to) = (resolve(&fx.repo, &right).unwrap(), resolve(&fx.repo, &left).unwrap());
    let cfg = SearchConfig::default();
    assert_eq!(find_paths_between(&history.graph, &from, &to, &cfg).unwrap(), Vec::<Vec<_>>::new());
    assert!(!is_dominated(&history.graph, &from, &to, &cfg).unwrap());
    let out = analyzer::contributors_between(&history, &from, &to, &cfg).unwrap();
    assert!(out.authors.is_empty());

    let err = find_paths_between(&history.graph, &to, &from, &cfg).unwrap_err();
    assert_eq!(err, AncestryError::InvalidOrdering { descendant: to.clone(), ancestor: from.clone() });
}

#[test]
fn loading_one_tip_leaves_the_sibling_out() {
    let (fx, [_, left, right]) = siblings_repo();
    let history = load_history(&fx.repo, &[right.to_string().as_str()], false).unwrap();
    let left = resolve(&fx.repo, &left.to_string()).unwrap();
    assert!(!history.graph.contains(&left));
}
