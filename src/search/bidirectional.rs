use std::collections::VecDeque;

use grid_util::point::Point;

use crate::moves::neighbors;
use crate::node::NO_PARENT;
use crate::reconstruct::{merge_bidirectional, VisitedMap};
use crate::search::{ObstacleInjector, RunState, Search, StepResult};
use crate::search_grid::SearchGrid;

/// Bidirectional breadth-first search: one FIFO frontier rooted at the
/// start, one at the goal, one pop from each per step. Each side keeps its
/// own predecessor map; the run succeeds the moment one side discovers a
/// position the other side has already visited, and fails when either
/// frontier runs dry.
#[derive(Clone, Debug)]
pub struct Bidirectional {
    forward: VecDeque<usize>,
    backward: VecDeque<usize>,
    forward_visited: VisitedMap,
    backward_visited: VisitedMap,
}

impl Bidirectional {
    pub fn new(grid: &SearchGrid, state: &mut RunState) -> Bidirectional {
        let mut forward_visited = VisitedMap::default();
        let mut backward_visited = VisitedMap::default();
        forward_visited.insert(grid.start(), NO_PARENT);
        backward_visited.insert(grid.goal(), NO_PARENT);
        state.frontier.insert(grid.start());
        state.frontier.insert(grid.goal());
        Bidirectional {
            forward: VecDeque::from([0]),
            backward: VecDeque::from([0]),
            forward_visited,
            backward_visited,
        }
    }

    /// Pops and expands one node of one side. Returns the meeting position
    /// if this expansion discovered a cell the other side already visited.
    fn expand(
        queue: &mut VecDeque<usize>,
        own: &mut VisitedMap,
        other: &VisitedMap,
        grid: &SearchGrid,
        state: &mut RunState,
    ) -> Option<Point> {
        let current = queue.pop_front()?;
        let pos = *own.get_index(current).unwrap().0;
        // The cell may have been walled after it was discovered.
        if !grid.is_free(pos) {
            return None;
        }
        state.explored.insert(pos);
        for (n_pos, _) in neighbors(grid, pos) {
            if own.contains_key(&n_pos) {
                continue;
            }
            let (entry, _) = own.insert_full(n_pos, current);
            queue.push_back(entry);
            state.frontier.insert(n_pos);
            if other.contains_key(&n_pos) {
                return Some(n_pos);
            }
        }
        None
    }
}

impl Search for Bidirectional {
    fn step(
        &mut self,
        grid: &mut SearchGrid,
        injector: &mut ObstacleInjector,
        state: &mut RunState,
    ) -> StepResult {
        injector.inject(grid);
        if self.forward.is_empty() || self.backward.is_empty() {
            return StepResult::Failed;
        }
        if let Some(meet) = Self::expand(
            &mut self.forward,
            &mut self.forward_visited,
            &self.backward_visited,
            grid,
            state,
        ) {
            let (path, cost) =
                merge_bidirectional(&self.forward_visited, &self.backward_visited, meet);
            return StepResult::Succeeded { path, cost };
        }
        if let Some(meet) = Self::expand(
            &mut self.backward,
            &mut self.backward_visited,
            &self.forward_visited,
            grid,
            state,
        ) {
            let (path, cost) =
                merge_bidirectional(&self.forward_visited, &self.backward_visited, meet);
            return StepResult::Succeeded { path, cost };
        }
        StepResult::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{run, Algorithm, Headless};

    #[test]
    fn the_merged_path_runs_start_to_goal() {
        let mut grid = SearchGrid::new(11, 9, Point::new(1, 1), Point::new(9, 7));
        let outcome = run(
            Algorithm::Bidirectional,
            &mut grid,
            &mut ObstacleInjector::disabled(),
            &mut Headless,
        )
        .unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.path.first(), Some(&Point::new(1, 1)));
        assert_eq!(outcome.path.last(), Some(&Point::new(9, 7)));
        for pair in outcome.path.windows(2) {
            assert_eq!(pair[0].move_distance(&pair[1]), 1);
        }
        assert!(outcome.cost > 0.0);
    }

    #[test]
    fn adjacent_start_and_goal_meet_immediately() {
        let mut grid = SearchGrid::new(7, 7, Point::new(1, 1), Point::new(2, 2));
        let outcome = run(
            Algorithm::Bidirectional,
            &mut grid,
            &mut ObstacleInjector::disabled(),
            &mut Headless,
        )
        .unwrap();
        assert_eq!(outcome.path, vec![Point::new(1, 1), Point::new(2, 2)]);
    }

    #[test]
    fn walled_off_goal_exhausts_a_frontier() {
        let mut grid = SearchGrid::new(9, 9, Point::new(1, 1), Point::new(7, 7));
        grid.set_wall(Point::new(6, 6));
        grid.set_wall(Point::new(7, 6));
        grid.set_wall(Point::new(6, 7));
        let outcome = run(
            Algorithm::Bidirectional,
            &mut grid,
            &mut ObstacleInjector::disabled(),
            &mut Headless,
        )
        .unwrap();
        assert!(!outcome.is_success());
        assert_eq!(outcome.cost, 0.0);
    }
}
