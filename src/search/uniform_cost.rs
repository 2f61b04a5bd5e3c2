use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::FxHashSet;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};

use crate::moves::neighbors;
use crate::node::NodeArena;
use crate::reconstruct::{reconstruct, FxIndexMap};
use crate::search::{ObstacleInjector, RunState, Search, StepResult};
use crate::search_grid::SearchGrid;

/// Heap entry ordered by accumulated cost, smallest first; equal costs
/// fall back to insertion order so results are reproducible.
#[derive(Clone, Copy, Debug)]
struct CostHolder {
    cost: f64,
    seq: u64,
    index: usize,
}

impl PartialEq for CostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for CostHolder {}

impl PartialOrd for CostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse the cost ordering, then prefer
        // the earlier insertion on equal cost.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Uniform-cost search: a cost-keyed priority queue with lazy deletion.
/// A cheaper route to an already-discovered position is re-pushed rather
/// than decrease-keyed; stale entries are skipped when popped because the
/// position is already expanded.
#[derive(Clone, Debug)]
pub struct UniformCost {
    arena: NodeArena,
    heap: BinaryHeap<CostHolder>,
    best: FxIndexMap<Point, f64>,
    expanded: FxHashSet<Point>,
    seq: u64,
}

impl UniformCost {
    pub fn new(grid: &SearchGrid) -> UniformCost {
        let (arena, root) = NodeArena::with_root(grid.start());
        let mut heap = BinaryHeap::new();
        heap.push(CostHolder {
            cost: 0.0,
            seq: 0,
            index: root,
        });
        let mut best = FxIndexMap::default();
        best.insert(grid.start(), 0.0);
        UniformCost {
            arena,
            heap,
            best,
            expanded: FxHashSet::default(),
            seq: 0,
        }
    }
}

impl Search for UniformCost {
    fn step(
        &mut self,
        grid: &mut SearchGrid,
        injector: &mut ObstacleInjector,
        state: &mut RunState,
    ) -> StepResult {
        injector.inject(grid);
        let Some(CostHolder { cost, index, .. }) = self.heap.pop() else {
            return StepResult::Failed;
        };
        let node = self.arena[index];
        // The cell may have been walled after it was pushed.
        if !grid.is_free(node.pos) {
            return StepResult::Running;
        }
        // Lazy deletion: a stale entry for an already-expanded position.
        if !self.expanded.insert(node.pos) {
            return StepResult::Running;
        }
        state.explored.insert(node.pos);
        if node.pos == grid.goal() {
            let (path, cost) = reconstruct(&self.arena, index);
            return StepResult::Succeeded { path, cost };
        }
        for (n_pos, move_cost) in neighbors(grid, node.pos) {
            let new_cost = cost + move_cost;
            match self.best.entry(n_pos) {
                Vacant(e) => {
                    e.insert(new_cost);
                }
                Occupied(mut e) => {
                    if new_cost < *e.get() {
                        e.insert(new_cost);
                    } else {
                        continue;
                    }
                }
            }
            state.frontier.insert(n_pos);
            let child = self.arena.push(n_pos, index, new_cost, node.depth + 1);
            self.seq += 1;
            self.heap.push(CostHolder {
                cost: new_cost,
                seq: self.seq,
                index: child,
            });
        }
        StepResult::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{run, Algorithm, Headless};
    use std::f64::consts::SQRT_2;

    #[test]
    fn diagonal_route_beats_four_orthogonal_moves() {
        // 5x5 open interior: the diagonal route costs 2*sqrt(2) ~ 2.828,
        // strictly less than the 4 orthogonal moves costing 4.
        let mut grid = SearchGrid::new(7, 7, Point::new(1, 1), Point::new(3, 3));
        let outcome = run(
            Algorithm::UniformCost,
            &mut grid,
            &mut ObstacleInjector::disabled(),
            &mut Headless,
        )
        .unwrap();
        assert!((outcome.cost - 2.0 * SQRT_2).abs() < 1e-9);
        assert!(outcome.cost < 4.0);
        assert_eq!(outcome.path.len(), 3);
    }

    #[test]
    fn a_wall_forces_the_cheapest_detour() {
        //  S..    start (1,1), goal (3,1), wall at (2,1): cheapest route
        //  .#.    steps diagonally around the wall for 2*sqrt(2).
        let mut grid = SearchGrid::new(7, 7, Point::new(1, 1), Point::new(3, 1));
        grid.set_wall(Point::new(2, 1));
        let outcome = run(
            Algorithm::UniformCost,
            &mut grid,
            &mut ObstacleInjector::disabled(),
            &mut Headless,
        )
        .unwrap();
        assert!((outcome.cost - 2.0 * SQRT_2).abs() < 1e-9);
        assert_eq!(outcome.path.len(), 3);
    }

    #[test]
    fn repeated_runs_are_reproducible() {
        let reference = {
            let mut grid = SearchGrid::new(9, 9, Point::new(1, 1), Point::new(7, 7));
            run(
                Algorithm::UniformCost,
                &mut grid,
                &mut ObstacleInjector::disabled(),
                &mut Headless,
            )
            .unwrap()
        };
        for _ in 0..3 {
            let mut grid = SearchGrid::new(9, 9, Point::new(1, 1), Point::new(7, 7));
            let outcome = run(
                Algorithm::UniformCost,
                &mut grid,
                &mut ObstacleInjector::disabled(),
                &mut Headless,
            )
            .unwrap();
            assert_eq!(outcome, reference);
        }
    }
}
