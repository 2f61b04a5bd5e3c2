use std::thread;
use std::time::Duration;

use grid_search::{run_with_state, Algorithm, Host, ObstacleInjector, RunState, SearchGrid};

/// A host that paces the search at roughly the demonstrator's animation
/// speed and reports progress every 50 expansions.
struct ConsoleHost {
    frames: usize,
}

impl Host for ConsoleHost {
    fn frame(&mut self, _grid: &SearchGrid, state: &RunState) {
        self.frames += 1;
        if self.frames % 50 == 0 {
            println!(
                "step {}: {} explored, {} discovered",
                self.frames,
                state.explored.len(),
                state.frontier.len()
            );
        }
        thread::sleep(Duration::from_millis(2));
    }
}

// Runs uniform-cost search across the standard board while walls keep
// appearing, then prints the final board.
fn main() {
    let mut grid = SearchGrid::standard();
    let mut injector = ObstacleInjector::new(0.05, 42);
    let mut host = ConsoleHost { frames: 0 };
    let mut state = RunState::default();
    let outcome = run_with_state(
        Algorithm::UniformCost,
        &mut grid,
        &mut injector,
        &mut host,
        &mut state,
    );
    println!("{}", grid);
    match outcome {
        Some(outcome) if outcome.is_success() => println!(
            "Goal reached in {} moves, cost {:.3}",
            outcome.path.len() - 1,
            outcome.cost
        ),
        Some(_) => println!("The frontier ran dry before reaching the goal"),
        None => println!("Cancelled"),
    }
}
