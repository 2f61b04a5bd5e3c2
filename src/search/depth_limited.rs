use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};

use crate::moves::neighbors;
use crate::node::NodeArena;
use crate::reconstruct::{reconstruct, FxIndexMap};
use crate::search::{ObstacleInjector, RunState, Search, StepResult};
use crate::search_grid::SearchGrid;

/// Depth-limited search: depth-first with a hard bound. A pop whose depth
/// exceeds the limit is discarded without touching the explored set. A
/// position is re-expanded only when reached at a strictly smaller depth
/// than before, which prunes cycles without blocking legitimate deeper
/// re-entry through a different route below the limit.
#[derive(Clone, Debug)]
pub struct DepthLimited {
    arena: NodeArena,
    stack: Vec<usize>,
    visited_at_depth: FxIndexMap<Point, u32>,
    limit: u32,
}

impl DepthLimited {
    pub fn new(grid: &SearchGrid, limit: u32) -> DepthLimited {
        let (arena, root) = NodeArena::with_root(grid.start());
        DepthLimited {
            arena,
            stack: vec![root],
            visited_at_depth: FxIndexMap::default(),
            limit,
        }
    }
}

impl Search for DepthLimited {
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
        if node.depth > self.limit {
            return StepResult::Running;
        }
        state.explored.insert(node.pos);
        if node.pos == grid.goal() {
            let (path, cost) = reconstruct(&self.arena, current);
            return StepResult::Succeeded { path, cost };
        }
        match self.visited_at_depth.entry(node.pos) {
            Occupied(mut e) => {
                if *e.get() <= node.depth {
                    return StepResult::Running;
                }
                e.insert(node.depth);
            }
            Vacant(e) => {
                e.insert(node.depth);
            }
        }
        for (n_pos, move_cost) in neighbors(grid, node.pos).into_iter().rev() {
            let child = self
                .arena
                .push(n_pos, current, node.cost + move_cost, node.depth + 1);
            self.stack.push(child);
        }
        StepResult::Running
    }
}
