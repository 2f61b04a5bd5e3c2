use log::debug;

use crate::search::{DepthLimited, ObstacleInjector, RunState, Search, StepResult};
use crate::search_grid::SearchGrid;

/// Iterative deepening: repeated depth-limited runs with limits 1, 2, …
/// up to width × height. The frontier/explored visualization is cleared
/// between depth iterations but the board is not reset, so later
/// iterations search among whatever obstacles earlier ones accumulated.
#[derive(Clone, Debug)]
pub struct IterativeDeepening {
    inner: DepthLimited,
    limit: u32,
    max_limit: u32,
}

impl IterativeDeepening {
    pub fn new(grid: &SearchGrid) -> IterativeDeepening {
        IterativeDeepening {
            inner: DepthLimited::new(grid, 1),
            limit: 1,
            max_limit: (grid.width() * grid.height()) as u32,
        }
    }
}

impl Search for IterativeDeepening {
    fn step(
        &mut self,
        grid: &mut SearchGrid,
        injector: &mut ObstacleInjector,
        state: &mut RunState,
    ) -> StepResult {
        match self.inner.step(grid, injector, state) {
            StepResult::Failed if self.limit < self.max_limit => {
                self.limit += 1;
                debug!("deepening to limit {}", self.limit);
                state.clear();
                self.inner = DepthLimited::new(grid, self.limit);
                StepResult::Running
            }
            other => other,
        }
    }
}
