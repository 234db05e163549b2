//! # Dungeon Generation
//!
//! The floor generation pipeline and the checks a finished floor must pass.
//!
//! The pipeline:
//! 1. Lays out rooms randomly (overlap allowed)
//! 2. Links them into the weighted room graph
//! 3. Paints rooms and carves chain corridors with doors
//! 4. Places the stairs in the room furthest from the start

use crate::{
    carve_corridors, connect_rooms, layout_rooms, paint_rooms, place_stairs, DelveError,
    DelveResult, Door, Floor, GenerationConfig, Generator, Graph, Room, RoomId, Stairs, TileGrid,
    TileKind,
};
use log::info;
use rand::rngs::StdRng;

/// Everything one generation pass produces, before it is installed on a floor.
#[derive(Debug, Clone)]
pub struct FloorLayout {
    pub grid: TileGrid,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub graph: Graph<RoomId>,
    pub stairs: Option<Stairs>,
}

/// Runs the full pipeline for `room_count` rooms.
///
/// Fewer than two rooms is not an error: such floors simply have no
/// corridors and no stairs.
pub fn build_layout(
    config: &GenerationConfig,
    room_count: usize,
    rng: &mut StdRng,
) -> DelveResult<FloorLayout> {
    config.validate()?;
    info!(
        "Generating floor with {} rooms on a {}x{} grid",
        room_count, config.grid_width, config.grid_height
    );

    let mut grid = TileGrid::new(config.grid_width, config.grid_height, TileKind::Wall);
    let rooms = layout_rooms(config, room_count, rng);
    let graph = connect_rooms(&rooms, rng);

    paint_rooms(&mut grid, &rooms);
    let doors = carve_corridors(&mut grid, &rooms);
    let stairs = rooms
        .first()
        .and_then(|start| place_stairs(&mut grid, &rooms, &graph, start.id));

    info!(
        "Generation complete: {} rooms, {} doors, stairs {}",
        rooms.len(),
        doors.len(),
        if stairs.is_some() { "placed" } else { "absent" }
    );

    Ok(FloorLayout {
        grid,
        rooms,
        doors,
        graph,
        stairs,
    })
}

/// Generator producing whole floors.
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator {
    /// Room count override; `None` uses the config's default
    pub room_count: Option<usize>,
}

impl DungeonGenerator {
    /// Creates a generator using the configured room count.
    pub fn new() -> Self {
        Self { room_count: None }
    }

    /// Creates a generator for a fixed room count.
    pub fn with_room_count(room_count: usize) -> Self {
        Self {
            room_count: Some(room_count),
        }
    }
}

impl Generator<Floor> for DungeonGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<Floor> {
        let mut floor = Floor::new(config);
        floor.generate(self.room_count.unwrap_or(config.default_room_count), rng)?;
        self.validate(&floor, config)?;
        Ok(floor)
    }

    fn validate(&self, floor: &Floor, _config: &GenerationConfig) -> DelveResult<()> {
        validate_floor(floor)
    }

    fn generator_type(&self) -> &'static str {
        "DungeonGenerator"
    }
}

/// Checks the invariants every generated floor must satisfy.
///
/// - every room is reachable from the start room over the room graph
/// - every door record sits on a `Door` tile while closed and a `Floor` tile
///   while open, with no two records sharing a tile
/// - floors with two or more rooms have stairs
pub fn validate_floor(floor: &Floor) -> DelveResult<()> {
    let rooms = floor.rooms();
    if let Some(start) = floor.start_room_id() {
        let reachable = floor.reachable_rooms(start);
        if let Some(room) = rooms.iter().find(|room| !reachable.contains(&room.id)) {
            return Err(DelveError::GenerationFailed(format!(
                "Room {} is not connected to the start room",
                room.id
            )));
        }
    }

    for (index, door) in floor.doors().iter().enumerate() {
        let expected = if door.is_open {
            TileKind::Floor
        } else {
            TileKind::Door
        };
        let actual = floor.tile(door.position);
        if actual != expected {
            return Err(DelveError::InvalidState(format!(
                "Door at ({}, {}) is {} but its tile is {:?}",
                door.position.x,
                door.position.y,
                if door.is_open { "open" } else { "closed" },
                actual
            )));
        }
        if floor.doors()[..index]
            .iter()
            .any(|other| other.position == door.position)
        {
            return Err(DelveError::InvalidState(format!(
                "Two doors share tile ({}, {})",
                door.position.x, door.position.y
            )));
        }
    }

    if rooms.len() >= 2 && floor.stairs().is_none() {
        return Err(DelveError::GenerationFailed(
            "Floor has several rooms but no stairs".to_string(),
        ));
    }

    Ok(())
}
