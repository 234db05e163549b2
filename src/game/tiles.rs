//! # Tile Grid
//!
//! The physical, fixed-size representation of a floor.

use crate::Position;
use serde::{Deserialize, Serialize};

/// Kinds of tile a floor can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Never carved
    Empty,
    /// Walkable room or corridor floor
    Floor,
    /// Solid rock
    Wall,
    /// Closed door; opening it turns the tile back into floor
    Door,
    /// Loot marker
    Treasure,
    /// Static enemy marker
    Enemy,
    /// Start room footprint
    Start,
    /// Exit room footprint and stairs block
    Exit,
}

impl TileKind {
    /// Whether the tile kind blocks movement on its own.
    ///
    /// Doors are not solid here; their passability depends on the door record.
    pub fn is_solid(self) -> bool {
        matches!(self, TileKind::Empty | TileKind::Wall)
    }

    /// Single-character glyph used by debug dumps.
    pub fn glyph(self) -> char {
        match self {
            TileKind::Empty => ' ',
            TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::Door => '+',
            TileKind::Treasure => '$',
            TileKind::Enemy => 'e',
            TileKind::Start => 's',
            TileKind::Exit => '>',
        }
    }
}

/// Fixed-size 2-D tile array, stored row-major as `tiles[y][x]`.
///
/// Reads outside the grid return [`TileKind::Wall`], so callers never need a
/// bounds branch before asking about a neighbour.
///
/// # Examples
///
/// ```
/// use delve::{Position, TileGrid, TileKind};
///
/// let mut grid = TileGrid::new(4, 3, TileKind::Floor);
/// assert_eq!(grid.get(Position::new(1, 1)), TileKind::Floor);
/// assert_eq!(grid.get(Position::new(-1, 0)), TileKind::Wall);
/// assert!(!grid.set(Position::new(4, 0), TileKind::Door));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Vec<TileKind>>,
}

impl TileGrid {
    /// Creates a grid filled with `fill`.
    pub fn new(width: u32, height: u32, fill: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![fill; width as usize]; height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks whether a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Reads a tile, returning `Wall` outside the grid.
    pub fn get(&self, pos: Position) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[pos.y as usize][pos.x as usize]
    }

    /// Writes a tile. Out-of-bounds writes are ignored and return `false`.
    pub fn set(&mut self, pos: Position, kind: TileKind) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        self.tiles[pos.y as usize][pos.x as usize] = kind;
        true
    }

    /// Resets every tile to `kind`.
    pub fn fill(&mut self, kind: TileKind) {
        for row in &mut self.tiles {
            row.fill(kind);
        }
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> + '_ {
        self.tiles.iter().map(Vec::as_slice)
    }

    /// Counts the tiles of the given kind.
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&tile| tile == kind)
            .count()
    }

    /// All positions holding the given kind, in row-major order.
    pub fn positions_of(&self, kind: TileKind) -> Vec<Position> {
        let mut positions = Vec::new();
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                if tile == kind {
                    positions.push(Position::new(x as i32, y as i32));
                }
            }
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_are_wall() {
        let grid = TileGrid::new(5, 5, TileKind::Floor);
        assert_eq!(grid.get(Position::new(-1, 2)), TileKind::Wall);
        assert_eq!(grid.get(Position::new(2, -1)), TileKind::Wall);
        assert_eq!(grid.get(Position::new(5, 0)), TileKind::Wall);
        assert_eq!(grid.get(Position::new(0, 5)), TileKind::Wall);
        assert_eq!(grid.get(Position::new(4, 4)), TileKind::Floor);
    }

    #[test]
    fn test_set_and_count() {
        let mut grid = TileGrid::new(6, 4, TileKind::Wall);
        assert!(grid.set(Position::new(1, 1), TileKind::Floor));
        assert!(grid.set(Position::new(2, 1), TileKind::Door));
        assert!(!grid.set(Position::new(6, 1), TileKind::Floor));

        assert_eq!(grid.count(TileKind::Floor), 1);
        assert_eq!(grid.count(TileKind::Wall), 22);
        assert_eq!(grid.positions_of(TileKind::Door), vec![Position::new(2, 1)]);
    }

    #[test]
    fn test_fill_resets_every_tile() {
        let mut grid = TileGrid::new(3, 3, TileKind::Empty);
        grid.set(Position::new(0, 0), TileKind::Exit);
        grid.fill(TileKind::Wall);
        assert_eq!(grid.count(TileKind::Wall), 9);
        assert_eq!(grid.rows().count(), 3);
    }

    #[test]
    fn test_solid_kinds() {
        assert!(TileKind::Empty.is_solid());
        assert!(TileKind::Wall.is_solid());
        assert!(!TileKind::Door.is_solid());
        assert!(!TileKind::Start.is_solid());
        assert!(!TileKind::Exit.is_solid());
    }
}
