use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;

use crate::moves::path_cost;
use crate::node::NodeArena;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Predecessor map used by the two halves of a bidirectional search:
/// position → index of the predecessor entry in the same map, with
/// [crate::node::NO_PARENT] marking the root.
pub type VisitedMap = FxIndexMap<Point, usize>;

/// Walks parent references from `terminal` back to the root and returns
/// the positions in start→goal order together with the total accumulated
/// cost recorded on the terminal node.
pub fn reconstruct(arena: &NodeArena, terminal: usize) -> (Vec<Point>, f64) {
    let total_cost = arena[terminal].cost;
    let mut path: Vec<Point> = itertools::unfold(terminal, |ix| {
        arena.get(*ix).map(|node| {
            *ix = node.parent;
            node.pos
        })
    })
    .collect();
    path.reverse();
    (path, total_cost)
}

fn chain(map: &VisitedMap, from: usize) -> Vec<Point> {
    itertools::unfold(from, |ix| {
        map.get_index(*ix).map(|(pos, &parent)| {
            *ix = parent;
            *pos
        })
    })
    .collect()
}

/// Splices the two halves of a bidirectional search at `meet`, which must
/// be present in both maps. The forward chain is reversed into start→meet
/// order; the backward chain already runs meet→goal because its root is
/// the goal itself. The meeting node appears exactly once and the returned
/// cost is that of the assembled sequence.
pub fn merge_bidirectional(
    forward: &VisitedMap,
    backward: &VisitedMap,
    meet: Point,
) -> (Vec<Point>, f64) {
    let forward_ix = forward.get_index_of(&meet).unwrap();
    let mut path = chain(forward, forward_ix);
    path.reverse();
    let backward_ix = backward.get_index_of(&meet).unwrap();
    path.extend(chain(backward, backward_ix).into_iter().skip(1));
    let cost = path_cost(&path);
    (path, cost)
}
