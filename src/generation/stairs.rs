//! # Stairs Placement
//!
//! Puts the exit stairs in the room furthest from the start, measured over
//! the weighted room graph.

use crate::{Graph, Position, Room, RoomId, TileGrid, TileKind, UNREACHABLE};
use log::debug;
use serde::{Deserialize, Serialize};

/// Where the stairs ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stairs {
    /// Top-left tile of the 2x2 stairs block, the room center
    pub position: Position,
    /// Room holding the stairs
    pub room_id: RoomId,
    /// Graph distance from the start room
    pub distance: u32,
}

/// The reachable room with the greatest Dijkstra distance from `start`.
///
/// Ties go to the lowest room id.
pub fn furthest_room(graph: &Graph<RoomId>, start: RoomId) -> Option<(RoomId, u32)> {
    graph
        .dijkstra(&start)
        .into_iter()
        .filter(|&(_, distance)| distance != UNREACHABLE)
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
}

/// Places a 2x2 `Exit` block centered in the furthest room.
///
/// Tiles of the block that would fall outside the room are skipped. Floors
/// with fewer than two rooms get no stairs.
pub fn place_stairs(
    grid: &mut TileGrid,
    rooms: &[Room],
    graph: &Graph<RoomId>,
    start: RoomId,
) -> Option<Stairs> {
    if rooms.len() < 2 {
        debug!("Not enough rooms for stairs");
        return None;
    }

    let (room_id, distance) = furthest_room(graph, start)?;
    let room = rooms.iter().find(|room| room.id == room_id)?;
    let center = room.center();

    for dy in 0..2 {
        for dx in 0..2 {
            let tile = Position::new(center.x + dx, center.y + dy);
            if room.contains(tile) {
                grid.set(tile, TileKind::Exit);
            }
        }
    }

    debug!(
        "Stairs (2x2) placed at ({}, {}) in room {} at distance {}",
        center.x, center.y, room_id, distance
    );
    Some(Stairs {
        position: center,
        room_id,
        distance,
    })
}
