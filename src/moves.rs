use std::f64::consts::SQRT_2;

use grid_util::point::Point;

use crate::search_grid::SearchGrid;

/// The eight moves in canonical order: Up, Up-Right, Right, Down-Right,
/// Down, Down-Left, Left, Up-Left. Orthogonal moves cost 1, diagonal moves
/// cost sqrt(2). The order is load-bearing: it decides tie-breaks in the
/// stack-based searches (which push neighbours reversed so this order is
/// the one popped) and is the canonical enumeration order everywhere else.
pub const DIRECTIONS: [(i32, i32, f64); 8] = [
    (0, -1, 1.0),
    (1, -1, SQRT_2),
    (1, 0, 1.0),
    (1, 1, SQRT_2),
    (0, 1, 1.0),
    (-1, 1, SQRT_2),
    (-1, 0, 1.0),
    (-1, -1, SQRT_2),
];

/// Enumerates the free neighbours of `pos` with their move costs,
/// preserving canonical direction order. Out-of-bounds and walled cells
/// are filtered out.
pub fn neighbors(grid: &SearchGrid, pos: Point) -> Vec<(Point, f64)> {
    DIRECTIONS
        .iter()
        .map(|&(dx, dy, cost)| (Point::new(pos.x + dx, pos.y + dy), cost))
        .filter(|&(p, _)| grid.is_free(p))
        .collect()
}

/// Cost of a single move between two 8-adjacent cells.
pub fn step_cost(from: Point, to: Point) -> f64 {
    if from.x != to.x && from.y != to.y {
        SQRT_2
    } else {
        1.0
    }
}

/// Total move cost of an already-assembled path.
pub fn path_cost(path: &[Point]) -> f64 {
    path.windows(2).map(|w| step_cost(w[0], w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_is_preserved() {
        let grid = SearchGrid::new(7, 7, Point::new(1, 1), Point::new(5, 5));
        let all = neighbors(&grid, Point::new(3, 3));
        let expected = [
            Point::new(3, 2),
            Point::new(4, 2),
            Point::new(4, 3),
            Point::new(4, 4),
            Point::new(3, 4),
            Point::new(2, 4),
            Point::new(2, 3),
            Point::new(2, 2),
        ];
        assert_eq!(all.len(), 8);
        for (got, want) in all.iter().zip(expected) {
            assert_eq!(got.0, want);
        }
    }

    #[test]
    fn walls_and_bounds_are_filtered() {
        let mut grid = SearchGrid::new(7, 7, Point::new(1, 1), Point::new(5, 5));
        grid.set_wall(Point::new(2, 2));
        // (1,1) touches the border ring on five sides and the new wall on a
        // sixth; only Right and Down survive.
        let free = neighbors(&grid, Point::new(1, 1));
        let positions: Vec<Point> = free.iter().map(|&(p, _)| p).collect();
        assert_eq!(positions, vec![Point::new(2, 1), Point::new(1, 2)]);
    }

    #[test]
    fn diagonal_moves_cost_sqrt_two() {
        let grid = SearchGrid::new(7, 7, Point::new(1, 1), Point::new(5, 5));
        for (p, cost) in neighbors(&grid, Point::new(3, 3)) {
            let expected = step_cost(Point::new(3, 3), p);
            assert_eq!(cost, expected);
        }
        let diagonal = [
            Point::new(1, 1),
            Point::new(2, 2),
            Point::new(3, 3),
        ];
        assert!((path_cost(&diagonal) - 2.0 * SQRT_2).abs() < 1e-12);
        let straight = [Point::new(1, 1), Point::new(2, 1), Point::new(3, 1)];
        assert_eq!(path_cost(&straight), 2.0);
    }
}
