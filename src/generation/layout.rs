//! # Room Layout
//!
//! Random rectangular room placement on a fixed grid.
//!
//! Rooms are not checked for overlap. The carver paints rooms in creation
//! order, so on overlap the later room's footprint wins; floor density relies
//! on this.

use crate::config::MIN_ROOM_SIDE;
use crate::{GenerationConfig, Position, Room, RoomKind};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Places `room_count` rooms with random origin and size.
///
/// The first room is tagged `Start`, the last `Exit`, the rest `Floor`. A room
/// that would run into the grid's last column or row is shrunk, but never
/// below three tiles per side.
pub fn layout_rooms(config: &GenerationConfig, room_count: usize, rng: &mut StdRng) -> Vec<Room> {
    let mut rooms = Vec::with_capacity(room_count);

    for index in 0..room_count {
        let room = sample_room(config, index, room_count, rng);
        debug!(
            "Created room {} at ({}, {}) size {}x{}",
            room.id, room.top_left.x, room.top_left.y, room.width, room.height
        );
        rooms.push(room);
    }

    rooms
}

fn sample_room(config: &GenerationConfig, index: usize, room_count: usize, rng: &mut StdRng) -> Room {
    let margin = config.placement_margin as i32;
    let x = margin + rng.gen_range(0..config.origin_span(config.grid_width)) as i32;
    let y = margin + rng.gen_range(0..config.origin_span(config.grid_height)) as i32;
    let width = rng.gen_range(config.min_room_side..=config.max_room_side);
    let height = rng.gen_range(config.min_room_side..=config.max_room_side);

    let width = clamp_side(x, width, config.grid_width);
    let height = clamp_side(y, height, config.grid_height);

    Room::new(
        index as u32,
        Position::new(x, y),
        width,
        height,
        RoomKind::for_index(index, room_count),
    )
}

/// Shrinks a side so the room stops short of the grid's last line.
fn clamp_side(origin: i32, side: u32, extent: u32) -> u32 {
    let side = if origin + side as i32 >= extent as i32 - 1 {
        (extent as i32 - origin - 2).max(0) as u32
    } else {
        side
    };
    side.max(MIN_ROOM_SIDE)
}
