// src/graph.rs

use crate::error::{AncestryError, Malformation, Result};
use crate::model::{CommitId, CommitNode};
use std::collections::HashMap;

/// Read-only access to commit parents and timestamps.
///
/// This is the only capability the ancestry algorithms use. `None` means the
/// id is outside the resolved commit set.
pub trait CommitGraph {
    fn parents_of(&self, id: &CommitId) -> Option<&[CommitId]>;

    fn timestamp_of(&self, id: &CommitId) -> Option<i64>;
}

impl<G: CommitGraph + ?Sized> CommitGraph for &G {
    fn parents_of(&self, id: &CommitId) -> Option<&[CommitId]> {
        (**self).parents_of(id)
    }

    fn timestamp_of(&self, id: &CommitId) -> Option<i64> {
        (**self).timestamp_of(id)
    }
}

/// In-memory commit graph keyed by id
#[derive(Debug, Clone, Default)]
pub struct HistoryGraph {
    nodes: HashMap<CommitId, CommitNode>,
}

impl HistoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> HistoryBuilder {
        HistoryBuilder::default()
    }

    pub fn insert(&mut self, node: CommitNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn get(&self, id: &CommitId) -> Option<&CommitNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &CommitId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = &CommitNode> {
        self.nodes.values()
    }

    /// Ids of all two-parent commits, newest first (ties by id)
    pub fn merges(&self) -> Vec<CommitId> {
        let mut merges: Vec<&CommitNode> = self.nodes.values().filter(|n| n.is_merge()).collect();
        merges.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        merges.into_iter().map(|n| n.id.clone()).collect()
    }
}

impl CommitGraph for HistoryGraph {
    fn parents_of(&self, id: &CommitId) -> Option<&[CommitId]> {
        self.nodes.get(id).map(|n| n.parents.as_slice())
    }

    fn timestamp_of(&self, id: &CommitId) -> Option<i64> {
        self.nodes.get(id).map(|n| n.timestamp)
    }
}

/// Fluent construction of a [`HistoryGraph`], mostly for fixtures
#[derive(Debug, Default)]
pub struct HistoryBuilder {
    graph: HistoryGraph,
}

impl HistoryBuilder {
    pub fn commit(mut self, id: &str, timestamp: i64, parents: &[&str]) -> Self {
        self.graph.insert(CommitNode {
            id: CommitId::new(id),
            parents: parents.iter().map(|p| CommitId::new(*p)).collect(),
            timestamp,
        });
        self
    }

    pub fn build(self) -> HistoryGraph {
        self.graph
    }
}

/// Parents of `id`, checked for the two-parent limit
pub(crate) fn checked_parents<'g, G: CommitGraph + ?Sized>(
    graph: &'g G,
    id: &CommitId,
) -> Result<&'g [CommitId]> {
    let parents = graph
        .parents_of(id)
        .ok_or_else(|| AncestryError::UnknownCommit(id.clone()))?;
    if parents.len() > 2 {
        return Err(AncestryError::MalformedHistory {
            commit: id.clone(),
            problem: Malformation::TooManyParents(parents.len()),
        });
    }
    Ok(parents)
}

pub(crate) fn timestamp<G: CommitGraph + ?Sized>(graph: &G, id: &CommitId) -> Result<i64> {
    graph
        .timestamp_of(id)
        .ok_or_else(|| AncestryError::UnknownCommit(id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_are_listed_newest_first() {
        let graph = HistoryGraph::builder()
            .commit("A", 1, &[])
            .commit("B", 2, &["A"])
            .commit("C", 2, &["A"])
            .commit("M1", 3, &["B", "C"])
            .commit("M2", 4, &["M1", "C"])
            .build();
        assert_eq!(graph.merges(), vec![CommitId::new("M2"), CommitId::new("M1")]);
    }

    #[test]
    fn octopus_parents_are_rejected() {
        let graph = HistoryGraph::builder()
            .commit("A", 1, &[])
            .commit("B", 1, &[])
            .commit("C", 1, &[])
            .commit("O", 2, &["A", "B", "C"])
            .build();
        let err = checked_parents(&graph, &"O".into()).unwrap_err();
        assert!(matches!(
            err,
            AncestryError::MalformedHistory { problem: Malformation::TooManyParents(3), .. }
        ));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let graph = HistoryGraph::new();
        assert_eq!(
            timestamp(&graph, &"X".into()),
            Err(AncestryError::UnknownCommit("X".into()))
        );
    }
}
