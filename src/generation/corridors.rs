//! # Corridor and Door Carving
//!
//! Rasterizes the room chain into the tile grid.
//!
//! Each consecutive pair of rooms gets an L-shaped corridor: a horizontal leg
//! along the first room's center row, then a vertical leg down the second
//! room's center column. Only the chain is carved. The random extra links in
//! the room graph have no corridor.

use crate::{Door, Position, Room, TileGrid, TileKind};
use log::debug;

/// Paints every room footprint with its kind's tile, in creation order.
pub fn paint_rooms(grid: &mut TileGrid, rooms: &[Room]) {
    for room in rooms {
        for pos in room.positions() {
            grid.set(pos, room.kind.tile());
        }
    }
}

/// Carves corridors between consecutive rooms and returns the doors placed.
///
/// Corridors only turn `Wall` or `Empty` tiles into `Floor`. A door goes on the
/// first corridor tile outside the room a leg leaves (horizontal leg) or just
/// before the room a leg enters (vertical leg), so each pair gets at most two.
pub fn carve_corridors(grid: &mut TileGrid, rooms: &[Room]) -> Vec<Door> {
    let mut doors = Vec::new();

    for pair in rooms.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        carve_horizontal_leg(grid, rooms, from, to, &mut doors);
        carve_vertical_leg(grid, rooms, from, to, &mut doors);
    }

    debug!("Carved {} doors", doors.len());
    doors
}

fn carve_horizontal_leg(
    grid: &mut TileGrid,
    rooms: &[Room],
    from: &Room,
    to: &Room,
    doors: &mut Vec<Door>,
) {
    let y = from.center().y;
    let (x1, x2) = (from.center().x, to.center().x);

    for x in x1.min(x2)..=x1.max(x2) {
        carve(grid, Position::new(x, y));
    }

    let exit_x = if x1 < x2 {
        Some(from.top_left.x + from.width as i32).filter(|&x| x <= x2)
    } else if x1 > x2 {
        Some(from.top_left.x - 1).filter(|&x| x >= x2)
    } else {
        None
    };

    if let Some(x) = exit_x {
        place_door(grid, rooms, Position::new(x, y), from, to, doors);
    }
}

fn carve_vertical_leg(
    grid: &mut TileGrid,
    rooms: &[Room],
    from: &Room,
    to: &Room,
    doors: &mut Vec<Door>,
) {
    let x = to.center().x;
    let (y1, y2) = (from.center().y, to.center().y);

    for y in y1.min(y2)..=y1.max(y2) {
        carve(grid, Position::new(x, y));
    }

    let entry_y = if y1 < y2 {
        Some(to.top_left.y - 1).filter(|&y| y >= y1)
    } else if y1 > y2 {
        Some(to.top_left.y + to.height as i32).filter(|&y| y <= y1)
    } else {
        None
    };

    if let Some(y) = entry_y {
        place_door(grid, rooms, Position::new(x, y), from, to, doors);
    }
}

fn carve(grid: &mut TileGrid, pos: Position) {
    if grid.in_bounds(pos) && matches!(grid.get(pos), TileKind::Wall | TileKind::Empty) {
        grid.set(pos, TileKind::Floor);
    }
}

/// Puts a door on a corridor tile that belongs to no room and has no door yet.
fn place_door(
    grid: &mut TileGrid,
    rooms: &[Room],
    pos: Position,
    from: &Room,
    to: &Room,
    doors: &mut Vec<Door>,
) {
    if grid.get(pos) != TileKind::Floor
        || rooms.iter().any(|room| room.contains(pos))
        || doors.iter().any(|door| door.position == pos)
    {
        return;
    }

    grid.set(pos, TileKind::Door);
    doors.push(Door::corridor(pos, from.id, to.id));
    debug!(
        "Door placed at ({}, {}) between rooms {} and {}",
        pos.x, pos.y, from.id, to.id
    );
}
