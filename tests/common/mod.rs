#![allow(dead_code)]

use branchpoint::{CommitId, HistoryGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn id(s: &str) -> CommitId {
    CommitId::new(s)
}

/// A(1) <- B(2), C(2) <- M(3)
pub fn diamond() -> HistoryGraph {
    HistoryGraph::builder()
        .commit("A", 1, &[])
        .commit("B", 2, &["A"])
        .commit("C", 2, &["A"])
        .commit("M", 3, &["B", "C"])
        .build()
}

/// Two merges feeding a third. The first-parent walk from `TOP` skips the
/// side branch that carries the newest shared commit `S`.
///
/// ```text
/// R - A - B ------ M1 - TOP
///      \          /    /
///       S - D - /     /
///        \           /
///         E ------ M2
/// ```
pub fn nested_merges() -> HistoryGraph {
    HistoryGraph::builder()
        .commit("R", 1, &[])
        .commit("A", 2, &["R"])
        .commit("S", 3, &["A"])
        .commit("B", 4, &["A"])
        .commit("D", 5, &["S"])
        .commit("E", 6, &["S"])
        .commit("M1", 7, &["B", "D"])
        .commit("M2", 8, &["E", "B"])
        .commit("TOP", 9, &["M1", "M2"])
        .build()
}

/// A long ladder of criss-crossing merges; every rung doubles the number of
/// first-parent/second-parent routes.
pub fn ladder(rungs: usize) -> HistoryGraph {
    let mut b = HistoryGraph::builder()
        .commit("base", 0, &[])
        .commit("l0", 1, &["base"])
        .commit("r0", 1, &["base"]);
    for i in 1..=rungs {
        let (pl, pr) = (format!("l{}", i - 1), format!("r{}", i - 1));
        let t = i as i64 + 1;
        b = b
            .commit(&format!("l{i}"), t, &[pl.as_str(), pr.as_str()])
            .commit(&format!("r{i}"), t, &[pr.as_str(), pl.as_str()]);
    }
    b.build()
}

/// Linear history `n0 <- n1 <- ... <- n{len-1}`
pub fn chain(len: usize) -> HistoryGraph {
    let mut b = HistoryGraph::builder().commit("n0", 0, &[]);
    for i in 1..len {
        let parent = format!("n{}", i - 1);
        b = b.commit(&format!("n{i}"), i as i64, &[parent.as_str()]);
    }
    b.build()
}

/// Random DAG where every commit points only to older commits, a few of them
/// merges. Ids are `c<index>` and timestamps equal the index, so parents are
/// always strictly older.
pub fn random_dag(seed: u64, size: usize) -> HistoryGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = (0..size).map(|i| format!("c{i}")).collect();
    let mut b = HistoryGraph::builder().commit(&names[0], 0, &[]);
    for i in 1..size {
        let first = rng.gen_range(i.saturating_sub(4)..i);
        if rng.gen_bool(0.3) {
            let second = rng.gen_range(0..i);
            if second != first {
                b = b.commit(&names[i], i as i64, &[names[first].as_str(), names[second].as_str()]);
                continue;
            }
        }
        b = b.commit(&names[i], i as i64, &[names[first].as_str()]);
    }
    b.build()
}

/// `O` has three parents; `X` sits on top of it and `Y` on the root.
pub fn octopus() -> HistoryGraph {
    HistoryGraph::builder()
        .commit("A", 1, &[])
        .commit("B", 2, &["A"])
        .commit("C", 2, &["A"])
        .commit("D", 2, &["A"])
        .commit("O", 3, &["B", "C", "D"])
        .commit("X", 4, &["O"])
        .commit("Y", 3, &["A"])
        .build()
}

/// `B` claims to be newer than its child `C`.
pub fn backdated() -> HistoryGraph {
    HistoryGraph::builder()
        .commit("A", 1, &[])
        .commit("B", 9, &["A"])
        .commit("C", 2, &["B"])
        .commit("X", 3, &["C"])
        .commit("Y", 2, &["A"])
        .build()
}

/// `C` and its parent `B` were committed in the same second.
pub fn same_second() -> HistoryGraph {
    HistoryGraph::builder()
        .commit("A", 1, &[])
        .commit("B", 2, &["A"])
        .commit("C", 2, &["B"])
        .commit("M", 3, &["B", "C"])
        .build()
}
