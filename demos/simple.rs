use grid_search::{run, Algorithm, Headless, ObstacleInjector, Point, SearchGrid};

// In this demo a path is found on a board with shape
// #######
// #S....#
// #.###.#
// #.....#
// #.....#
// #....G#
// #######
// S marks the start
// G marks the goal
fn main() {
    let mut grid = SearchGrid::new(7, 7, Point::new(1, 1), Point::new(5, 5));
    grid.set_wall(Point::new(2, 2));
    grid.set_wall(Point::new(3, 2));
    grid.set_wall(Point::new(4, 2));
    let mut injector = ObstacleInjector::disabled();
    let outcome = run(
        Algorithm::BreadthFirst,
        &mut grid,
        &mut injector,
        &mut Headless,
    );
    match outcome {
        Some(outcome) if outcome.is_success() => {
            println!("A path has been found (cost {:.3}):", outcome.cost);
            for p in outcome.path {
                println!("{:?}", p);
            }
        }
        Some(_) => println!("No path exists"),
        None => println!("Cancelled"),
    }
}
