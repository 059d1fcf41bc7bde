//! Friendship lookup.

use socnet_core::{Direction, EdgeKind, NodeId, SocnetResult};
use socnet_storage::{EdgeRef, GraphRead};

/// The FRIEND edge joining `a` and `b`, whichever way it points.
///
/// Scans `a`'s FRIEND edges only, so cost is O(degree(a)). Works against the
/// live store and against an open unit of work alike.
pub fn find_friendship_edge<R: GraphRead + ?Sized>(
    reader: &R,
    a: NodeId,
    b: NodeId,
) -> SocnetResult<Option<EdgeRef>> {
    Ok(reader
        .edges_of(a, EdgeKind::Friend, Direction::Both)?
        .into_iter()
        .find(|edge| edge.other_endpoint(a) == Some(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use socnet_storage::{GraphStore, GraphWrite, MemoryGraphStore};

    fn setup() -> (MemoryGraphStore, Vec<NodeId>) {
        let store = MemoryGraphStore::new();
        let nodes = store
            .run_atomic(|txn| (0..3).map(|_| txn.create_node()).collect())
            .unwrap();
        (store, nodes)
    }

    #[test]
    fn found_from_either_endpoint() {
        let (store, n) = setup();
        let id = store
            .run_atomic(|txn| txn.create_edge(n[0], n[1], EdgeKind::Friend))
            .unwrap();

        assert_eq!(find_friendship_edge(&store, n[0], n[1]).unwrap().map(|e| e.id), Some(id));
        assert_eq!(find_friendship_edge(&store, n[1], n[0]).unwrap().map(|e| e.id), Some(id));
        assert!(find_friendship_edge(&store, n[0], n[2]).unwrap().is_none());
    }

    #[test]
    fn other_kinds_are_ignored() {
        let (store, n) = setup();
        store
            .run_atomic(|txn| txn.create_edge(n[0], n[1], EdgeKind::Status))
            .unwrap();
        assert!(find_friendship_edge(&store, n[0], n[1]).unwrap().is_none());
    }

    #[test]
    fn sees_uncommitted_edges_inside_unit_of_work() {
        let (store, n) = setup();
        let found = store
            .run_atomic(|txn| {
                txn.create_edge(n[2], n[0], EdgeKind::Friend)?;
                find_friendship_edge(&*txn, n[0], n[2])
            })
            .unwrap();
        assert!(found.is_some());
    }
}
