use core::fmt;

use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use rand::seq::SliceRandom;
use rand::Rng;

/// [SearchGrid] owns the occupancy matrix the algorithms in [crate::search]
/// run on. A cell is either free ([false] in the backing [BoolGrid]) or a
/// wall ([true]). The outer ring is always walled and the start and goal
/// cells are always free; every mutation this type offers preserves both
/// invariants. Connected components over the free cells are maintained in a
/// [UnionFind] structure so hosts and tests can ask whether a path can
/// exist at all without running a search.
#[derive(Clone, Debug)]
pub struct SearchGrid {
    grid: BoolGrid,
    start: Point,
    goal: Point,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl SearchGrid {
    /// Creates a board with a walled border ring and a free interior.
    /// Start and goal must be distinct interior cells.
    pub fn new(width: usize, height: usize, start: Point, goal: Point) -> SearchGrid {
        assert!(width >= 3 && height >= 3, "board needs an interior");
        let mut grid = SearchGrid {
            grid: BoolGrid::new(width, height, false),
            start,
            goal,
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        assert!(
            grid.is_interior(start) && grid.is_interior(goal),
            "start and goal must be interior cells"
        );
        assert!(start != goal, "start and goal must differ");
        grid.paint_border();
        grid.generate_components();
        grid
    }

    /// The fixed demonstrator board: 35x25 cells, start near the top-left
    /// corner, goal near the bottom-right.
    pub fn standard() -> SearchGrid {
        SearchGrid::new(
            crate::DEFAULT_COLS,
            crate::DEFAULT_ROWS,
            Point::new(1, 1),
            Point::new(
                (crate::DEFAULT_COLS - 2) as i32,
                (crate::DEFAULT_ROWS - 2) as i32,
            ),
        )
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn in_bounds(&self, pos: Point) -> bool {
        pos.x >= 0 && pos.y >= 0 && self.grid.index_in_bounds(pos.x as usize, pos.y as usize)
    }

    fn is_interior(&self, pos: Point) -> bool {
        pos.x >= 1
            && pos.y >= 1
            && (pos.x as usize) < self.grid.width - 1
            && (pos.y as usize) < self.grid.height - 1
    }

    /// True iff `pos` is in bounds and not a wall.
    pub fn is_free(&self, pos: Point) -> bool {
        self.in_bounds(pos) && !self.grid.get_point(pos)
    }

    /// Marks a cell as a wall. The start and goal cells (and anything out
    /// of bounds) are silently refused: those are invariants, not errors.
    pub fn set_wall(&mut self, pos: Point) {
        if !self.in_bounds(pos) || pos == self.start || pos == self.goal {
            return;
        }
        if !self.grid.get_point(pos) {
            self.components_dirty = true;
        }
        self.grid.set_point(pos, true);
    }

    /// Restores the initial board: free interior, walled border ring.
    /// Search bookkeeping is owned elsewhere and is not touched here.
    pub fn reset(&mut self) {
        for y in 1..self.grid.height - 1 {
            for x in 1..self.grid.width - 1 {
                self.grid.set(x, y, false);
            }
        }
        self.paint_border();
        self.generate_components();
    }

    fn paint_border(&mut self) {
        let (w, h) = (self.grid.width, self.grid.height);
        for x in 0..w {
            self.grid.set(x, 0, true);
            self.grid.set(x, h - 1, true);
        }
        for y in 0..h {
            self.grid.set(0, y, true);
            self.grid.set(w - 1, y, true);
        }
    }

    /// With the given probability, walls one cell chosen uniformly from the
    /// currently eligible ones (interior, free, neither start nor goal) and
    /// returns [true]. Once no eligible cell remains, every call returns
    /// [false].
    pub fn inject_random_obstacle(&mut self, probability: f64, rng: &mut impl Rng) -> bool {
        if probability <= 0.0 || !rng.gen_bool(probability.min(1.0)) {
            return false;
        }
        let eligible = self.eligible_cells();
        match eligible.choose(rng) {
            Some(&pos) => {
                self.set_wall(pos);
                debug!("obstacle appeared at {}", pos);
                true
            }
            None => false,
        }
    }

    fn eligible_cells(&self) -> Vec<Point> {
        let mut cells = Vec::new();
        for y in 1..self.grid.height as i32 - 1 {
            for x in 1..self.grid.width as i32 - 1 {
                let p = Point::new(x, y);
                if p != self.start && p != self.goal && !self.grid.get_point(p) {
                    cells.push(p);
                }
            }
        }
        cells
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components
            .find(self.grid.get_ix(point.x as usize, point.y as usize))
    }

    /// Checks whether two cells lie in the same 8-connected free region.
    pub fn reachable(&self, from: &Point, to: &Point) -> bool {
        !self.unreachable(from, to)
    }

    /// Checks whether two cells lie in different 8-connected free regions.
    /// Walls and out-of-bounds cells are unreachable from everything.
    pub fn unreachable(&self, from: &Point, to: &Point) -> bool {
        if self.is_free(*from) && self.is_free(*to) {
            let from_ix = self.grid.get_ix(from.x as usize, from.y as usize);
            let to_ix = self.grid.get_ix(to.x as usize, to.y as usize);
            !self.components.equiv(from_ix, to_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links 8-connected free
    /// neighbours into the same component.
    pub fn generate_components(&mut self) {
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                let point = Point::new(x, y);
                if self.grid.get_point(point) {
                    continue;
                }
                let parent_ix = self.grid.get_ix(x as usize, y as usize);
                let neighbours = [
                    Point::new(point.x, point.y + 1),
                    Point::new(point.x + 1, point.y),
                    Point::new(point.x + 1, point.y + 1),
                    Point::new(point.x + 1, point.y - 1),
                ]
                .into_iter()
                .filter(|p| self.is_free(*p))
                .map(|p| self.grid.get_ix(p.x as usize, p.y as usize))
                .collect::<Vec<usize>>();
                for ix in neighbours {
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

impl fmt::Display for SearchGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height as i32 {
            for x in 0..self.grid.width as i32 {
                let p = Point::new(x, y);
                let c = if p == self.start {
                    'S'
                } else if p == self.goal {
                    'G'
                } else if self.grid.get_point(p) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
