//! # Room Connectivity
//!
//! Builds the weighted room graph: a chain through every room in creation
//! order, plus a few random extra links for cycles.

use crate::{Graph, Room, RoomId};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Weight of the link between two rooms: Manhattan distance of their
/// centers, at least 1.
pub fn link_weight(a: &Room, b: &Room) -> u32 {
    a.center_distance(b).max(1)
}

/// Links rooms into a graph keyed by room id.
///
/// Rooms `i` and `i + 1` are always linked, so the graph is connected. With
/// more than three rooms, `room_count / 2` extra links are attempted between
/// random pairs; a pair that picks the same room twice is skipped. Extra links
/// may duplicate existing ones.
pub fn connect_rooms(rooms: &[Room], rng: &mut StdRng) -> Graph<RoomId> {
    let mut graph = Graph::new();
    for room in rooms {
        graph.add_vertex(room.id);
    }

    for pair in rooms.windows(2) {
        graph.add_bidirectional_edge(pair[0].id, pair[1].id, link_weight(&pair[0], &pair[1]));
    }

    if rooms.len() > 3 {
        for _ in 0..rooms.len() / 2 {
            let first = rng.gen_range(0..rooms.len());
            let second = rng.gen_range(0..rooms.len());
            if first == second {
                continue;
            }
            let (a, b) = (&rooms[first], &rooms[second]);
            graph.add_bidirectional_edge(a.id, b.id, link_weight(a, b));
            debug!("Extra link between rooms {} and {}", a.id, b.id);
        }
    }

    graph
}
