//! Friend recommendations.
//!
//! Candidates are friends-of-friends who are not already friends. Each is
//! ranked by the number of short simple paths connecting it to the person.

use rustc_hash::FxHashSet;

use socnet_core::{NodeId, SocnetResult};
use socnet_storage::GraphRead;

use super::path::PathCounter;
use super::traversal::FriendsWithinDepth;

/// A recommendation candidate and its rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedCandidate {
    /// Candidate node.
    pub node: NodeId,
    /// Number of simple paths to the candidate within the bound.
    pub rank: usize,
}

/// Path-count recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommender {
    counter: PathCounter,
}

impl Recommender {
    /// Rank candidates by paths of at most `path_length` hops.
    pub fn new(path_length: usize) -> Self {
        Self {
            counter: PathCounter::new(path_length),
        }
    }

    /// Top `k` candidates for `person`, highest rank first.
    ///
    /// Ties keep breadth-first discovery order.
    pub fn recommend<R: GraphRead + ?Sized>(
        &self,
        reader: &R,
        person: NodeId,
        k: usize,
    ) -> SocnetResult<Vec<RankedCandidate>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let friends: FxHashSet<NodeId> = FriendsWithinDepth::new(reader, person, 1)
            .map(|step| step.map(|s| s.node))
            .collect::<SocnetResult<_>>()?;

        let mut ranked = Vec::new();
        for step in FriendsWithinDepth::new(reader, person, 2) {
            let node = step?.node;
            if node == person || friends.contains(&node) {
                continue;
            }
            let rank = self.counter.count(reader, person, node)?;
            ranked.push(RankedCandidate { node, rank });
        }

        ranked.sort_by(|a, b| b.rank.cmp(&a.rank));
        ranked.truncate(k);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socnet_core::EdgeKind;
    use socnet_storage::{GraphStore, GraphWrite, MemoryGraphStore};

    fn graph(n: usize, links: &[(usize, usize)]) -> (MemoryGraphStore, Vec<NodeId>) {
        let store = MemoryGraphStore::new();
        let nodes = store
            .run_atomic(|txn| {
                let nodes: Vec<NodeId> = (0..n).map(|_| txn.create_node()).collect::<Result<_, _>>()?;
                for &(a, b) in links {
                    txn.create_edge(nodes[a], nodes[b], EdgeKind::Friend)?;
                }
                Ok(nodes)
            })
            .unwrap();
        (store, nodes)
    }

    #[test]
    fn excludes_self_and_friends() {
        let (store, n) = graph(4, &[(0, 1), (0, 2), (1, 2), (1, 3)]);
        let got = Recommender::new(2).recommend(&store, n[0], 10).unwrap();
        assert_eq!(got, vec![RankedCandidate { node: n[3], rank: 1 }]);
    }

    #[test]
    fn ranks_by_mutual_paths() {
        // 0's friends: 1, 2. 3 is reachable via 1 and 2, 4 only via 2.
        let (store, n) = graph(5, &[(0, 1), (0, 2), (1, 3), (2, 3), (2, 4)]);
        let got = Recommender::new(2).recommend(&store, n[0], 10).unwrap();
        let nodes: Vec<_> = got.iter().map(|c| c.node).collect();
        assert_eq!(nodes, vec![n[3], n[4]]);
        assert_eq!(got[0].rank, 2);
        assert_eq!(got[1].rank, 1);
    }

    #[test]
    fn ties_keep_discovery_order() {
        let (store, n) = graph(5, &[(0, 1), (0, 2), (2, 4), (1, 3)]);
        let got = Recommender::new(2).recommend(&store, n[0], 10).unwrap();
        let nodes: Vec<_> = got.iter().map(|c| c.node).collect();
        assert_eq!(nodes, vec![n[3], n[4]]);
    }

    #[test]
    fn truncates_to_k() {
        let (store, n) = graph(5, &[(0, 1), (1, 2), (1, 3), (1, 4)]);
        assert_eq!(Recommender::new(2).recommend(&store, n[0], 2).unwrap().len(), 2);
        assert!(Recommender::new(2).recommend(&store, n[0], 0).unwrap().is_empty());
    }

    #[test]
    fn no_friends_no_candidates() {
        let (store, n) = graph(2, &[]);
        assert!(Recommender::new(2).recommend(&store, n[0], 5).unwrap().is_empty());
    }
}
