//! # Floor
//!
//! The dungeon-level object for one depth. It owns the tile grid, the rooms,
//! the doors, and the room graph, and replaces all of them together whenever
//! a floor is generated.

use crate::{
    build_layout, next_step_toward, DelveResult, Door, FloorLayout, GenerationConfig, Graph,
    Position, Room, RoomId, Stairs, TileGrid, TileKind, UNREACHABLE,
};
use log::{debug, info};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Room-graph traversal strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Traversal {
    /// Breadth-first, nearest links first
    Breadth,
    /// Depth-first, first link first
    Depth,
}

/// Serializable view of a floor for external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorSnapshot {
    pub tiles: TileGrid,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub stairs: Option<Stairs>,
}

/// One dungeon floor.
#[derive(Debug, Clone)]
pub struct Floor {
    config: GenerationConfig,
    grid: TileGrid,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    graph: Graph<RoomId>,
    stairs: Option<Stairs>,
}

impl Floor {
    /// Creates an ungenerated floor: an all-`Empty` grid with no rooms.
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            config: config.clone(),
            grid: TileGrid::new(config.grid_width, config.grid_height, TileKind::Empty),
            rooms: Vec::new(),
            doors: Vec::new(),
            graph: Graph::new(),
            stairs: None,
        }
    }

    /// Wraps a hand-built grid with no rooms or doors.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Floor, Position, TileGrid, TileKind};
    ///
    /// let floor = Floor::from_grid(TileGrid::new(10, 10, TileKind::Floor));
    /// let step = floor.find_next_move_to_player(Position::new(5, 5), Position::new(5, 1));
    /// assert_eq!(step, Position::new(5, 4));
    /// ```
    pub fn from_grid(grid: TileGrid) -> Self {
        let config = GenerationConfig {
            grid_width: grid.width(),
            grid_height: grid.height(),
            ..GenerationConfig::default()
        };
        Self {
            config,
            grid,
            rooms: Vec::new(),
            doors: Vec::new(),
            graph: Graph::new(),
            stairs: None,
        }
    }

    /// Rebuilds rooms, graph, grid, doors, and stairs for `room_count` rooms.
    ///
    /// All previous state is replaced. Fails only when the floor's
    /// configuration is invalid, in which case the floor is left untouched.
    pub fn generate(&mut self, room_count: usize, rng: &mut StdRng) -> DelveResult<()> {
        let layout = build_layout(&self.config, room_count, rng)?;
        self.install(layout);
        Ok(())
    }

    /// Replaces the floor's state with a prebuilt layout.
    pub fn install(&mut self, layout: FloorLayout) {
        self.grid = layout.grid;
        self.rooms = layout.rooms;
        self.doors = layout.doors;
        self.graph = layout.graph;
        self.stairs = layout.stairs;
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.get(room_id as usize)
    }

    pub fn graph(&self) -> &Graph<RoomId> {
        &self.graph
    }

    /// Id of the start room, if the floor has rooms.
    pub fn start_room_id(&self) -> Option<RoomId> {
        self.rooms.first().map(|room| room.id)
    }

    /// Reads a tile; outside the grid this is `Wall`.
    pub fn tile(&self, pos: Position) -> TileKind {
        self.grid.get(pos)
    }

    /// Writes a tile; ignored outside the grid.
    ///
    /// This is a raw write. Use [`open_door`](Self::open_door) and
    /// [`close_door`](Self::close_door) for door tiles.
    pub fn set_tile(&mut self, pos: Position, kind: TileKind) {
        self.grid.set(pos, kind);
    }

    /// Whether an actor may stand on the tile.
    pub fn is_walkable(&self, pos: Position) -> bool {
        match self.tile(pos) {
            TileKind::Door => self.can_pass_door(pos),
            kind => !kind.is_solid(),
        }
    }

    /// Next cell for an enemy chasing the player, or the enemy's own cell when
    /// there is no path.
    pub fn find_next_move_to_player(&self, enemy: Position, player: Position) -> Position {
        next_step_toward(enemy, player, |pos| self.is_walkable(pos))
    }

    /// Room the tile belongs to. On overlap the later room wins, matching the
    /// paint order.
    pub fn room_id_at(&self, pos: Position) -> Option<RoomId> {
        self.rooms
            .iter()
            .rev()
            .find(|room| room.contains(pos))
            .map(|room| room.id)
    }

    /// Rooms reachable from `room_id` over the room graph, in BFS order.
    pub fn reachable_rooms(&self, room_id: RoomId) -> Vec<RoomId> {
        self.graph.bfs(&room_id)
    }

    /// Visitation order of a room-graph traversal from `start`.
    pub fn traverse_rooms(&self, start: RoomId, traversal: Traversal) -> Vec<RoomId> {
        let order = match traversal {
            Traversal::Breadth => self.graph.bfs(&start),
            Traversal::Depth => self.graph.dfs(&start),
        };
        debug!("{:?} traversal from room {}: {:?}", traversal, start, order);
        order
    }

    /// Reachable rooms and their graph distance from `start`, by room id.
    pub fn room_distances(&self, start: RoomId) -> Vec<(RoomId, u32)> {
        let mut distances: Vec<(RoomId, u32)> = self
            .graph
            .dijkstra(&start)
            .into_iter()
            .filter(|&(_, distance)| distance != UNREACHABLE)
            .collect();
        distances.sort_unstable();
        distances
    }

    /// Cheapest room sequence from `from_room` to `to_room`, both included.
    pub fn find_shortest_path(&self, from_room: RoomId, to_room: RoomId) -> Option<Vec<RoomId>> {
        self.graph.shortest_path(&from_room, &to_room)
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door_at(&self, pos: Position) -> Option<&Door> {
        self.doors.iter().find(|door| door.position == pos)
    }

    fn door_at_mut(&mut self, pos: Position) -> Option<&mut Door> {
        self.doors.iter_mut().find(|door| door.position == pos)
    }

    /// Opens the door at `pos`, turning its tile into floor.
    ///
    /// Returns `false` if there is no closed door there.
    pub fn open_door(&mut self, pos: Position) -> bool {
        match self.door_at_mut(pos) {
            Some(door) if !door.is_open => door.is_open = true,
            _ => return false,
        }
        self.grid.set(pos, TileKind::Floor);
        debug!("Door opened at ({}, {})", pos.x, pos.y);
        true
    }

    /// Closes the door at `pos`, restoring its door tile.
    ///
    /// Returns `false` if there is no open door there.
    pub fn close_door(&mut self, pos: Position) -> bool {
        match self.door_at_mut(pos) {
            Some(door) if door.is_open => door.is_open = false,
            _ => return false,
        }
        self.grid.set(pos, TileKind::Door);
        debug!("Door closed at ({}, {})", pos.x, pos.y);
        true
    }

    /// Whether the door at `pos` lets actors through. Tiles without a door
    /// record are always passable here.
    pub fn can_pass_door(&self, pos: Position) -> bool {
        self.door_at(pos).is_none_or(Door::is_passable)
    }

    /// Records the enemy count left in a room after a turn.
    ///
    /// The first time the count is zero the room is marked cleared and every
    /// `open_on_clear` door touching it opens. Returns whether the room was
    /// cleared by this call.
    pub fn check_room_clear(&mut self, room_id: RoomId, enemy_count: usize) -> bool {
        let Some(room) = self.rooms.get_mut(room_id as usize) else {
            return false;
        };
        if enemy_count > 0 || room.cleared {
            return false;
        }
        room.cleared = true;
        info!("Room {} cleared, opening doors", room_id);

        let to_open: Vec<Position> = self
            .doors
            .iter()
            .filter(|door| door.open_on_clear && door.connects(room_id))
            .map(|door| door.position)
            .collect();
        for pos in to_open {
            self.open_door(pos);
        }
        true
    }

    pub fn stairs(&self) -> Option<Stairs> {
        self.stairs
    }

    /// Room holding the stairs.
    pub fn stairs_room(&self) -> Option<RoomId> {
        self.stairs.map(|stairs| stairs.room_id)
    }

    /// Stairs column, or -1 when this floor has none.
    pub fn stairs_x(&self) -> i32 {
        self.stairs.map_or(-1, |stairs| stairs.position.x)
    }

    /// Stairs row, or -1 when this floor has none.
    pub fn stairs_y(&self) -> i32 {
        self.stairs.map_or(-1, |stairs| stairs.position.y)
    }

    /// Whether `pos` is on or next to (diagonals included) the stairs anchor.
    pub fn is_adjacent_to_stairs(&self, pos: Position) -> bool {
        self.stairs
            .is_some_and(|stairs| stairs.position.chebyshev_distance(pos) <= 1)
    }

    /// Serializable copy of the floor's state.
    pub fn snapshot(&self) -> FloorSnapshot {
        FloorSnapshot {
            tiles: self.grid.clone(),
            rooms: self.rooms.clone(),
            doors: self.doors.clone(),
            stairs: self.stairs,
        }
    }
}
