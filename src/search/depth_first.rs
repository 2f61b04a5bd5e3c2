use fxhash::FxHashSet;
use grid_util::point::Point;

use crate::moves::neighbors;
use crate::node::NodeArena;
use crate::reconstruct::reconstruct;
use crate::search::{ObstacleInjector, RunState, Search, StepResult};
use crate::search_grid::SearchGrid;

/// Depth-first search: LIFO frontier with neighbours pushed in reverse
/// canonical order, so canonical order is what gets popped. The visited
/// set is consulted both when pushing and when popping; a position that
/// entered the stack twice through different routes expands only once.
#[derive(Clone, Debug)]
pub struct DepthFirst {
    arena: NodeArena,
    stack: Vec<usize>,
    visited: FxHashSet<Point>,
}

impl DepthFirst {
    pub fn new(grid: &SearchGrid) -> DepthFirst {
        let (arena, root) = NodeArena::with_root(grid.start());
        DepthFirst {
            arena,
            stack: vec![root],
            visited: FxHashSet::default(),
        }
    }
}

impl Search for DepthFirst {
    fn step(
        &mut self,
        grid: &mut SearchGrid,
        injector: &mut ObstacleInjector,
        state: &mut RunState,
    ) -> StepResult {
        injector.inject(grid);
        let Some(current) = self.stack.pop() else {
            return StepResult::Failed;
        };
        let node = self.arena[current];
        // The cell may have been walled after it was pushed.
        if !grid.is_free(node.pos) {
            return StepResult::Running;
        }
        if !self.visited.insert(node.pos) {
            return StepResult::Running;
        }
        state.explored.insert(node.pos);
        if node.pos == grid.goal() {
            let (path, cost) = reconstruct(&self.arena, current);
            return StepResult::Succeeded { path, cost };
        }
        for (n_pos, move_cost) in neighbors(grid, node.pos).into_iter().rev() {
            if !self.visited.contains(&n_pos) {
                let child = self
                    .arena
                    .push(n_pos, current, node.cost + move_cost, node.depth + 1);
                self.stack.push(child);
            }
        }
        StepResult::Running
    }
}
