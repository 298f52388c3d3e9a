use crate::config::{GRID_SIZE, SPAWN};
use crate::game::Profile;
use crate::io::RandomSource;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Border,
}

impl Cell {
    pub fn is_solid(self) -> bool {
        !matches!(self, Cell::Empty)
    }
}

/// Grid coordinate, row first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbour one step away, if it stays on the grid.
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Pos> {
        let row = self.row as i32 + d_row;
        let col = self.col as i32 + d_col;
        if Grid::in_bounds(row, col) {
            Some(Pos::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// North, south, west, east; off-grid neighbours are skipped.
    pub fn orthogonal(self) -> impl Iterator<Item = Pos> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub cells: Vec<Cell>,
}

impl Grid {
    /// Border ring around an empty interior.
    pub fn new() -> Self {
        let mut grid = Self {
            cells: vec![Cell::Empty; GRID_SIZE * GRID_SIZE],
        };
        for i in 0..GRID_SIZE {
            grid.set(Pos::new(0, i), Cell::Border);
            grid.set(Pos::new(GRID_SIZE - 1, i), Cell::Border);
            grid.set(Pos::new(i, 0), Cell::Border);
            grid.set(Pos::new(i, GRID_SIZE - 1), Cell::Border);
        }
        grid
    }

    /// Fresh map for `profile`: random interior walls, spawn pocket kept clear.
    pub fn generate(profile: &Profile, rng: &mut impl RandomSource) -> Self {
        let mut grid = Self::new();
        for row in 1..GRID_SIZE - 1 {
            for col in 1..GRID_SIZE - 1 {
                let draw = rng.next_in_range(0, profile.wall_range);
                let cell = if draw != 0 { Cell::Wall } else { Cell::Empty };
                grid.set(Pos::new(row, col), cell);
            }
        }
        for pos in spawn_pocket() {
            grid.set(pos, Cell::Empty);
        }
        grid
    }

    pub fn in_bounds(row: i32, col: i32) -> bool {
        (0..GRID_SIZE as i32).contains(&row) && (0..GRID_SIZE as i32).contains(&col)
    }

    fn idx(pos: Pos) -> usize {
        pos.row * GRID_SIZE + pos.col
    }

    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[Self::idx(pos)]
    }

    /// Signed lookup; anything off the grid reads as `None`.
    pub fn get_signed(&self, row: i32, col: i32) -> Option<Cell> {
        if Self::in_bounds(row, col) {
            Some(self.get(Pos::new(row as usize, col as usize)))
        } else {
            None
        }
    }

    pub fn set(&mut self, pos: Pos, value: Cell) {
        let idx = Self::idx(pos);
        self.cells[idx] = value;
    }

    /// Turns a destructible wall into floor. Borders are never touched.
    pub fn break_wall(&mut self, pos: Pos) -> bool {
        if self.get(pos) == Cell::Wall {
            self.set(pos, Cell::Empty);
            true
        } else {
            false
        }
    }

    pub fn is_walkable(&self, row: i32, col: i32) -> bool {
        self.get_signed(row, col).is_some_and(|cell| !cell.is_solid())
    }

    pub fn walls_remaining(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Wall).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// The 2x2 block anchored at the spawn cell.
pub fn spawn_pocket() -> [Pos; 4] {
    let (r, c) = SPAWN;
    [
        Pos::new(r, c),
        Pos::new(r, c + 1),
        Pos::new(r + 1, c),
        Pos::new(r + 1, c + 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Difficulty;
    use crate::io::StdRandom;
    use proptest::prelude::*;

    fn on_ring(row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row == GRID_SIZE - 1 || col == GRID_SIZE - 1
    }

    #[test]
    fn spawn_pocket_is_always_clear() {
        let profile = Difficulty::High.profile();
        let mut rng = StdRandom::seeded(3);
        for _ in 0..20 {
            let grid = Grid::generate(&profile, &mut rng);
            for pos in spawn_pocket() {
                assert_eq!(grid.get(pos), Cell::Empty);
            }
        }
    }

    #[test]
    fn interior_never_contains_border() {
        let grid = Grid::generate(&Difficulty::Medium.profile(), &mut StdRandom::seeded(11));
        for row in 1..GRID_SIZE - 1 {
            for col in 1..GRID_SIZE - 1 {
                assert_ne!(grid.get(Pos::new(row, col)), Cell::Border);
            }
        }
    }

    #[test]
    fn denser_difficulty_makes_more_walls() {
        let mut totals = Vec::new();
        for d in [Difficulty::Low, Difficulty::High] {
            let mut rng = StdRandom::seeded(99);
            let total: usize = (0..30)
                .map(|_| Grid::generate(&d.profile(), &mut rng).walls_remaining())
                .sum();
            totals.push(total);
        }
        assert!(totals[1] > totals[0]);
    }

    #[test]
    fn consecutive_maps_differ_without_reseeding() {
        let profile = Difficulty::Medium.profile();
        let mut rng = StdRandom::seeded(5);
        let first = Grid::generate(&profile, &mut rng);
        let second = Grid::generate(&profile, &mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn break_wall_leaves_borders_alone() {
        let mut grid = Grid::new();
        assert!(!grid.break_wall(Pos::new(0, 4)));
        assert_eq!(grid.get(Pos::new(0, 4)), Cell::Border);
        grid.set(Pos::new(4, 4), Cell::Wall);
        assert!(grid.break_wall(Pos::new(4, 4)));
        assert_eq!(grid.get(Pos::new(4, 4)), Cell::Empty);
    }

    #[test]
    fn orthogonal_skips_off_grid_neighbours() {
        assert_eq!(Pos::new(0, 0).orthogonal().count(), 2);
        assert_eq!(Pos::new(5, 5).orthogonal().count(), 4);
    }

    proptest! {
        #[test]
        fn prop_outer_ring_is_border(seed in any::<u64>(), level in 1u8..=3) {
            let profile = Difficulty::from_level(level).unwrap().profile();
            let grid = Grid::generate(&profile, &mut StdRandom::seeded(seed));
            for row in 0..GRID_SIZE {
                for col in 0..GRID_SIZE {
                    let cell = grid.get(Pos::new(row, col));
                    prop_assert_eq!(cell == Cell::Border, on_ring(row, col));
                }
            }
        }
    }
}
