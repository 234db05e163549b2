//! # Generation Module
//!
//! Procedural floor generation: room layout, room graph, corridors and doors,
//! stairs, and enemy spawn placement.
//!
//! The stages run in a fixed order, each reading the previous stage's output:
//! layout → connectivity → corridors → stairs. [`DungeonGenerator`] drives the
//! pipeline; [`Floor::generate`](crate::Floor::generate) is the usual entry point.

pub mod connectivity;
pub mod corridors;
pub mod dungeon;
pub mod encounters;
pub mod layout;
pub mod stairs;

pub use connectivity::*;
pub use corridors::*;
pub use dungeon::*;
pub use encounters::*;
pub use layout::*;
pub use stairs::*;

use crate::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_ROOM_COUNT, MIN_ROOM_SIDE,
};
use crate::{DelveError, DelveResult, Position, TileKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Stable room identifier: the room's index in creation order.
pub type RoomId = u32;

/// Configuration for floor generation.
///
/// Every field is an explicit input; nothing is read from global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles
    pub grid_width: u32,
    /// Grid height in tiles
    pub grid_height: u32,
    /// Smallest sampled room side
    pub min_room_side: u32,
    /// Largest sampled room side
    pub max_room_side: u32,
    /// Gap kept between the grid edge and a room origin
    pub placement_margin: u32,
    /// Room count used when the caller does not pick one
    pub default_room_count: usize,
}

impl GenerationConfig {
    /// Creates the standard configuration for the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert!(config.min_room_side >= 3);
    /// assert!(config.max_room_side >= config.min_room_side);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            min_room_side: MIN_ROOM_SIDE,
            max_room_side: 6,
            placement_margin: 2,
            default_room_count: DEFAULT_ROOM_COUNT,
        }
    }

    /// Creates a configuration with small rooms on a tight grid for tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            grid_width: 20,
            grid_height: 14,
            min_room_side: 3,
            max_room_side: 4,
            placement_margin: 1,
            default_room_count: 5,
        }
    }

    /// Parses a JSON configuration and validates it.
    ///
    /// Missing fields take their [`Default`] values.
    pub fn from_json(json: &str) -> DelveResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }

    /// Span of origins the layout may sample along one axis.
    ///
    /// Origins are drawn from `margin .. margin + span`, where the span
    /// leaves room for the largest room plus its clamping margin.
    pub(crate) fn origin_span(&self, extent: u32) -> u32 {
        extent.saturating_sub(self.max_room_side + 2 * self.placement_margin)
    }

    /// Rejects configurations that generation cannot honour.
    pub fn validate(&self) -> DelveResult<()> {
        if self.min_room_side < MIN_ROOM_SIDE {
            return Err(DelveError::InvalidConfig(format!(
                "min_room_side {} is below {}",
                self.min_room_side, MIN_ROOM_SIDE
            )));
        }
        if self.max_room_side < self.min_room_side {
            return Err(DelveError::InvalidConfig(format!(
                "max_room_side {} is below min_room_side {}",
                self.max_room_side, self.min_room_side
            )));
        }
        if self.placement_margin == 0 {
            return Err(DelveError::InvalidConfig(
                "placement_margin must keep rooms off the grid edge".to_string(),
            ));
        }
        for (axis, extent) in [("width", self.grid_width), ("height", self.grid_height)] {
            if self.origin_span(extent) == 0 {
                return Err(DelveError::InvalidConfig(format!(
                    "grid {} {} leaves no room origins for rooms up to {} tiles",
                    axis, extent, self.max_room_side
                )));
            }
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Semantic kind of a room, assigned by creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    /// Ordinary room
    Floor,
    /// First room created; the player starts here
    Start,
    /// Last room created
    Exit,
}

impl RoomKind {
    /// Kind for the room at `index` out of `count` rooms.
    pub fn for_index(index: usize, count: usize) -> Self {
        if index == 0 {
            RoomKind::Start
        } else if index + 1 == count {
            RoomKind::Exit
        } else {
            RoomKind::Floor
        }
    }

    /// Tile painted over the room's footprint.
    pub fn tile(self) -> TileKind {
        match self {
            RoomKind::Floor => TileKind::Floor,
            RoomKind::Start => TileKind::Start,
            RoomKind::Exit => TileKind::Exit,
        }
    }
}

/// A rectangular room on the grid.
///
/// Rooms have no walls of their own: the whole footprint is walkable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier for this room
    pub id: RoomId,
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room
    pub width: u32,
    /// Height of the room
    pub height: u32,
    /// Semantic kind of this room
    pub kind: RoomKind,
    /// Whether every enemy in this room has been defeated
    pub cleared: bool,
}

impl Room {
    /// Creates a new, uncleared room.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Room, RoomKind};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 4, 3, RoomKind::Floor);
    /// assert_eq!(room.center(), Position::new(7, 6));
    /// assert!(room.contains(Position::new(8, 7)));
    /// assert!(!room.contains(Position::new(9, 7)));
    /// ```
    pub fn new(id: RoomId, top_left: Position, width: u32, height: u32, kind: RoomKind) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
            kind,
            cleared: false,
        }
    }

    /// Gets the bottom-right corner of the room.
    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 - 1,
            self.top_left.y + self.height as i32 - 1,
        )
    }

    /// Gets the center position of the room.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Gets the area of the room in tiles.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width as i32
            && pos.y < self.top_left.y + self.height as i32
    }

    /// Manhattan distance between the two room centers.
    pub fn center_distance(&self, other: &Room) -> u32 {
        self.center().manhattan_distance(other.center())
    }

    /// Gets all positions within this room.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area() as usize);
        for y in self.top_left.y..(self.top_left.y + self.height as i32) {
            for x in self.top_left.x..(self.top_left.x + self.width as i32) {
                positions.push(Position::new(x, y));
            }
        }
        positions
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.grid_width, 25);
        assert_eq!(config.grid_height, 18);
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_config_rejects_small_rooms() {
        let mut config = GenerationConfig::new(1);
        config.min_room_side = 2;
        assert!(matches!(config.validate(), Err(DelveError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_rejects_inverted_sides() {
        let mut config = GenerationConfig::new(1);
        config.max_room_side = 3;
        config.min_room_side = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_tiny_grid() {
        let mut config = GenerationConfig::new(1);
        config.grid_width = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_json_fills_defaults() {
        let config = GenerationConfig::from_json(r#"{ "seed": 99, "grid_width": 30 }"#)
            .expect("partial config parses");
        assert_eq!(config.seed, 99);
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 18);
    }

    #[test]
    fn test_config_from_json_errors() {
        assert!(matches!(
            GenerationConfig::from_json("not json"),
            Err(DelveError::Serde(_))
        ));
        assert!(matches!(
            GenerationConfig::from_json(r#"{ "min_room_side": 1 }"#),
            Err(DelveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_room_kind_by_creation_order() {
        assert_eq!(RoomKind::for_index(0, 4), RoomKind::Start);
        assert_eq!(RoomKind::for_index(1, 4), RoomKind::Floor);
        assert_eq!(RoomKind::for_index(3, 4), RoomKind::Exit);
        assert_eq!(RoomKind::for_index(0, 1), RoomKind::Start);
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(1, Position::new(5, 5), 10, 8, RoomKind::Floor);

        assert_eq!(room.bottom_right(), Position::new(14, 12));
        assert_eq!(room.center(), Position::new(10, 9));
        assert_eq!(room.area(), 80);
        assert_eq!(room.positions().len(), 80);

        assert!(room.contains(Position::new(5, 5)));
        assert!(room.contains(Position::new(14, 12)));
        assert!(!room.contains(Position::new(4, 5)));
        assert!(!room.contains(Position::new(15, 12)));
        assert!(!room.cleared);
    }

    #[test]
    fn test_room_center_distance() {
        let room1 = Room::new(1, Position::new(5, 5), 10, 8, RoomKind::Floor);
        let room3 = Room::new(3, Position::new(20, 20), 5, 5, RoomKind::Floor);

        assert_eq!(room1.center_distance(&room3), room3.center_distance(&room1));
        assert_eq!(room1.center_distance(&room3), (22 - 10) + (22 - 9));
    }
}
