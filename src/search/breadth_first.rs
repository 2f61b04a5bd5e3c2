use std::collections::VecDeque;

use fxhash::FxHashSet;
use grid_util::point::Point;

use crate::moves::neighbors;
use crate::node::NodeArena;
use crate::reconstruct::reconstruct;
use crate::search::{ObstacleInjector, RunState, Search, StepResult};
use crate::search_grid::SearchGrid;

/// Breadth-first search: FIFO frontier with a global discovered set
/// checked at enqueue time, so every position is enqueued at most once.
/// Finds a minimum-move-count path on a static board.
#[derive(Clone, Debug)]
pub struct BreadthFirst {
    arena: NodeArena,
    queue: VecDeque<usize>,
    discovered: FxHashSet<Point>,
}

impl BreadthFirst {
    pub fn new(grid: &SearchGrid) -> BreadthFirst {
        let (arena, root) = NodeArena::with_root(grid.start());
        let mut discovered = FxHashSet::default();
        discovered.insert(grid.start());
        BreadthFirst {
            arena,
            queue: VecDeque::from([root]),
            discovered,
        }
    }
}

impl Search for BreadthFirst {
    fn step(
        &mut self,
        grid: &mut SearchGrid,
        injector: &mut ObstacleInjector,
        state: &mut RunState,
    ) -> StepResult {
        injector.inject(grid);
        let Some(current) = self.queue.pop_front() else {
            return StepResult::Failed;
        };
        let node = self.arena[current];
        // The cell may have been walled after it was enqueued.
        if !grid.is_free(node.pos) {
            return StepResult::Running;
        }
        state.explored.insert(node.pos);
        if node.pos == grid.goal() {
            let (path, cost) = reconstruct(&self.arena, current);
            return StepResult::Succeeded { path, cost };
        }
        for (n_pos, move_cost) in neighbors(grid, node.pos) {
            if self.discovered.insert(n_pos) {
                state.frontier.insert(n_pos);
                let child = self
                    .arena
                    .push(n_pos, current, node.cost + move_cost, node.depth + 1);
                self.queue.push_back(child);
            }
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
    fn two_diagonal_moves_across_the_open_board() {
        // 5x5 open interior, start and goal two diagonal steps apart.
        let mut grid = SearchGrid::new(7, 7, Point::new(1, 1), Point::new(3, 3));
        let outcome = run(
            Algorithm::BreadthFirst,
            &mut grid,
            &mut ObstacleInjector::disabled(),
            &mut Headless,
        )
        .unwrap();
        assert_eq!(outcome.path.len(), 3);
        assert_eq!(outcome.path.first(), Some(&Point::new(1, 1)));
        assert_eq!(outcome.path.last(), Some(&Point::new(3, 3)));
        assert!((outcome.cost - 2.0 * SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn the_whole_ring_is_explored_before_any_distance_two_cell() {
        // Start in the middle so all 8 neighbours are free.
        let mut grid = SearchGrid::new(7, 7, Point::new(3, 3), Point::new(5, 5));
        let mut searcher = BreadthFirst::new(&grid);
        let mut injector = ObstacleInjector::disabled();
        let mut state = RunState::default();
        // Step 1 expands the start, steps 2-9 the eight ring cells.
        for _ in 0..9 {
            assert_eq!(
                searcher.step(&mut grid, &mut injector, &mut state),
                StepResult::Running
            );
        }
        assert_eq!(state.explored.len(), 9);
        let start = Point::new(3, 3);
        assert!(state
            .explored
            .iter()
            .all(|p| p.move_distance(&start) <= 1));
    }

    #[test]
    fn walled_off_goal_exhausts_the_frontier() {
        let mut grid = SearchGrid::new(7, 7, Point::new(1, 1), Point::new(5, 5));
        grid.set_wall(Point::new(4, 4));
        grid.set_wall(Point::new(5, 4));
        grid.set_wall(Point::new(4, 5));
        let outcome = run(
            Algorithm::BreadthFirst,
            &mut grid,
            &mut ObstacleInjector::disabled(),
            &mut Headless,
        )
        .unwrap();
        assert!(!outcome.is_success());
        assert_eq!(outcome.cost, 0.0);
    }
}
