//! The search engine: six classical algorithms behind one step contract.
//!
//! Every call to [Search::step] performs one expansion iteration: obstacle
//! injection, a frontier pop (exhaustion means failure), a re-check that
//! the popped cell is still free (it may have been walled after it was
//! discovered), then explored marking, the goal check and neighbour
//! expansion. The caller drives the loop: [run] polls the [Host] for
//! cancellation before every step and yields one visualization frame after
//! it, so pacing and rendering cadence never leak into the algorithms.

mod bidirectional;
mod breadth_first;
mod depth_first;
mod depth_limited;
mod iterative_deepening;
mod uniform_cost;

pub use bidirectional::Bidirectional;
pub use breadth_first::BreadthFirst;
pub use depth_first::DepthFirst;
pub use depth_limited::DepthLimited;
pub use iterative_deepening::IterativeDeepening;
pub use uniform_cost::UniformCost;

use core::fmt;

use fxhash::FxHashSet;
use grid_util::point::Point;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::search_grid::SearchGrid;
use crate::DEFAULT_DEPTH_LIMIT;

/// Selects one of the six algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    BreadthFirst,
    DepthFirst,
    UniformCost,
    DepthLimited { limit: u32 },
    IterativeDeepening,
    Bidirectional,
}

impl Algorithm {
    /// All six, with the default depth limit, in selection-panel order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::UniformCost,
        Algorithm::DepthLimited {
            limit: DEFAULT_DEPTH_LIMIT,
        },
        Algorithm::IterativeDeepening,
        Algorithm::Bidirectional,
    ];

    /// Parses a selection name (`BFS`, `DFS`, `UCS`, `DLS`, `IDDFS` or
    /// `BIDIR`), case-insensitively.
    pub fn from_name(name: &str) -> Option<Algorithm> {
        match name.to_ascii_uppercase().as_str() {
            "BFS" => Some(Algorithm::BreadthFirst),
            "DFS" => Some(Algorithm::DepthFirst),
            "UCS" => Some(Algorithm::UniformCost),
            "DLS" => Some(Algorithm::DepthLimited {
                limit: DEFAULT_DEPTH_LIMIT,
            }),
            "IDDFS" => Some(Algorithm::IterativeDeepening),
            "BIDIR" => Some(Algorithm::Bidirectional),
            _ => None,
        }
    }

    /// Builds the stepping searcher for this algorithm, seeded from the
    /// grid's start cell (and its goal, for the bidirectional frontier).
    pub fn searcher(self, grid: &SearchGrid, state: &mut RunState) -> Box<dyn Search> {
        match self {
            Algorithm::BreadthFirst => Box::new(BreadthFirst::new(grid)),
            Algorithm::DepthFirst => Box::new(DepthFirst::new(grid)),
            Algorithm::UniformCost => Box::new(UniformCost::new(grid)),
            Algorithm::DepthLimited { limit } => Box::new(DepthLimited::new(grid, limit)),
            Algorithm::IterativeDeepening => Box::new(IterativeDeepening::new(grid)),
            Algorithm::Bidirectional => Box::new(Bidirectional::new(grid, state)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Algorithm::BreadthFirst => "BFS",
            Algorithm::DepthFirst => "DFS",
            Algorithm::UniformCost => "UCS",
            Algorithm::DepthLimited { .. } => "DLS",
            Algorithm::IterativeDeepening => "IDDFS",
            Algorithm::Bidirectional => "BIDIR",
        };
        write!(f, "{}", name)
    }
}

/// Visualization bookkeeping for one search invocation, owned by the
/// caller and reset at the start of every run. `frontier` holds discovered
/// positions, `explored` the expanded ones and `path` the final result.
/// Correctness never depends on these sets; the algorithms keep their own
/// books.
#[derive(Clone, Debug, Default)]
pub struct RunState {
    pub frontier: FxHashSet<Point>,
    pub explored: FxHashSet<Point>,
    pub path: Vec<Point>,
}

impl RunState {
    /// Empties all three sets. [run_with_state] does this on entry; a host
    /// implementing a reset command pairs it with [SearchGrid::reset].
    pub fn clear(&mut self) {
        self.frontier.clear();
        self.explored.clear();
        self.path.clear();
    }
}

/// Outcome of one expansion step. `Succeeded` and `Failed` are terminal.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    Running,
    Succeeded { path: Vec<Point>, cost: f64 },
    Failed,
}

/// Final result handed back to the host: the start→goal positions and the
/// accumulated cost, or an empty path with zero cost when the frontier ran
/// dry.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub path: Vec<Point>,
    pub cost: f64,
}

impl SearchOutcome {
    pub fn failure() -> SearchOutcome {
        SearchOutcome {
            path: Vec::new(),
            cost: 0.0,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.path.is_empty()
    }
}

/// The per-step source of environment change: each call gives the board a
/// `probability` chance to grow one new wall. Seeded so runs are
/// reproducible.
#[derive(Clone, Debug)]
pub struct ObstacleInjector {
    probability: f64,
    rng: StdRng,
}

impl ObstacleInjector {
    pub fn new(probability: f64, seed: u64) -> ObstacleInjector {
        ObstacleInjector {
            probability,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// An injector that never fires, for static-board runs.
    pub fn disabled() -> ObstacleInjector {
        ObstacleInjector::new(0.0, 0)
    }

    pub fn inject(&mut self, grid: &mut SearchGrid) -> bool {
        grid.inject_random_obstacle(self.probability, &mut self.rng)
    }
}

/// One expansion per call. Implementations own their frontier structure
/// and node bookkeeping; the shared step contract is documented at module
/// level.
pub trait Search {
    fn step(
        &mut self,
        grid: &mut SearchGrid,
        injector: &mut ObstacleInjector,
        state: &mut RunState,
    ) -> StepResult;
}

/// The host seam: rendering and input stay outside the core. Both hooks
/// default to no-ops so library consumers and tests can run headless.
pub trait Host {
    /// Polled once before every expansion; returning [true] aborts the run
    /// and discards all of its state.
    fn cancel_requested(&mut self) -> bool {
        false
    }

    /// Called once after every expansion with the current board and run
    /// state, purely observationally. Pacing belongs here, not in the
    /// core.
    fn frame(&mut self, grid: &SearchGrid, state: &RunState) {
        let _ = (grid, state);
    }
}

/// A [Host] that never cancels and drops every frame.
pub struct Headless;

impl Host for Headless {}

/// Runs `algorithm` to completion (or cancellation) on `grid` with a fresh
/// [RunState]. Returns [None] if the host cancelled.
pub fn run(
    algorithm: Algorithm,
    grid: &mut SearchGrid,
    injector: &mut ObstacleInjector,
    host: &mut impl Host,
) -> Option<SearchOutcome> {
    let mut state = RunState::default();
    run_with_state(algorithm, grid, injector, host, &mut state)
}

/// As [run], but threads a caller-owned [RunState] (cleared on entry) so
/// the host can keep rendering the final frontier/explored sets after the
/// run ends.
pub fn run_with_state(
    algorithm: Algorithm,
    grid: &mut SearchGrid,
    injector: &mut ObstacleInjector,
    host: &mut impl Host,
    state: &mut RunState,
) -> Option<SearchOutcome> {
    state.clear();
    info!(
        "starting {} from {} to {}",
        algorithm,
        grid.start(),
        grid.goal()
    );
    let mut search = algorithm.searcher(grid, state);
    loop {
        if host.cancel_requested() {
            info!("{} cancelled by host", algorithm);
            state.clear();
            return None;
        }
        let step = search.step(grid, injector, state);
        if let StepResult::Succeeded { path, .. } = &step {
            state.path = path.clone();
        }
        host.frame(grid, state);
        match step {
            StepResult::Running => {}
            StepResult::Succeeded { path, cost } => {
                info!(
                    "{} reached the goal: {} positions, cost {:.3}",
                    algorithm,
                    path.len(),
                    cost
                );
                return Some(SearchOutcome { path, cost });
            }
            StepResult::Failed => {
                info!("{} exhausted its frontier", algorithm);
                return Some(SearchOutcome::failure());
            }
        }
    }
}
