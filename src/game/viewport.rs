//! Fog of war: the 8x8 matrix shows the slice of the 16x16 grid around the
//! player, who always sits at surface cell (3, 3).

use crate::config::{VIEW_OFFSET, VIEW_SIZE};
use crate::game::{Cell, Grid, Pos};

pub const PLAYER_CELL: (usize, usize) = (VIEW_OFFSET as usize, VIEW_OFFSET as usize);

/// What one matrix cell shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tile {
    /// Off the grid; never drawn.
    #[default]
    Blank,
    Floor,
    Wall,
    Border,
    Player,
    Bomb,
}

impl Tile {
    /// Static tiles that light regardless of blink state.
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Wall | Tile::Border)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    pub tiles: [[Tile; VIEW_SIZE]; VIEW_SIZE],
}

impl Surface {
    #[cfg(test)]
    pub(crate) fn get(&self, row: usize, col: usize) -> Tile {
        self.tiles[row][col]
    }
}

/// Surface coordinates of `pos` as seen from `player`, if it is visible.
pub fn to_surface(player: Pos, pos: Pos) -> Option<(usize, usize)> {
    let row = pos.row as i32 - player.row as i32 + VIEW_OFFSET;
    let col = pos.col as i32 - player.col as i32 + VIEW_OFFSET;
    let range = 0..VIEW_SIZE as i32;
    if range.contains(&row) && range.contains(&col) {
        Some((row as usize, col as usize))
    } else {
        None
    }
}

pub fn contains(player: Pos, pos: Pos) -> bool {
    to_surface(player, pos).is_some()
}

pub fn project(grid: &Grid, player: Pos, bomb: Option<Pos>) -> Surface {
    let mut tiles = [[Tile::Blank; VIEW_SIZE]; VIEW_SIZE];
    for (r, row) in tiles.iter_mut().enumerate() {
        for (c, tile) in row.iter_mut().enumerate() {
            let grid_row = player.row as i32 - VIEW_OFFSET + r as i32;
            let grid_col = player.col as i32 - VIEW_OFFSET + c as i32;
            *tile = match grid.get_signed(grid_row, grid_col) {
                Some(Cell::Empty) => Tile::Floor,
                Some(Cell::Wall) => Tile::Wall,
                Some(Cell::Border) => Tile::Border,
                None => Tile::Blank,
            };
        }
    }
    if let Some((r, c)) = bomb.and_then(|b| to_surface(player, b)) {
        tiles[r][c] = Tile::Bomb;
    }
    let (pr, pc) = PLAYER_CELL;
    tiles[pr][pc] = Tile::Player;
    Surface { tiles }
}
