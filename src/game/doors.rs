//! # Doors
//!
//! Door records carved at room boundaries.

use crate::{Position, RoomId};
use serde::{Deserialize, Serialize};

/// A door between two rooms.
///
/// Every door record has exactly one tile on the grid: a `Door` tile while
/// closed, a `Floor` tile while open. The owning [`Floor`](crate::Floor) keeps
/// the two in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    /// Grid position of the door tile
    pub position: Position,
    /// Rooms this door connects
    pub rooms: (RoomId, RoomId),
    /// Whether the door is currently open
    pub is_open: bool,
    /// Whether passing a closed door needs a key
    pub requires_key: bool,
    /// Whether clearing either room opens this door
    pub open_on_clear: bool,
}

impl Door {
    /// Creates a closed corridor door that opens when a room is cleared.
    pub fn corridor(position: Position, room_a: RoomId, room_b: RoomId) -> Self {
        Self {
            position,
            rooms: (room_a, room_b),
            is_open: false,
            requires_key: false,
            open_on_clear: true,
        }
    }

    /// Whether an actor may step onto this door.
    pub fn is_passable(&self) -> bool {
        self.is_open || !self.requires_key
    }

    /// Whether the door touches the given room.
    pub fn connects(&self, room_id: RoomId) -> bool {
        self.rooms.0 == room_id || self.rooms.1 == room_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor_door_defaults() {
        let door = Door::corridor(Position::new(4, 2), 0, 1);
        assert!(!door.is_open);
        assert!(!door.requires_key);
        assert!(door.open_on_clear);
        assert!(door.connects(0));
        assert!(door.connects(1));
        assert!(!door.connects(2));
    }

    #[test]
    fn test_passability() {
        let mut door = Door::corridor(Position::new(4, 2), 0, 1);
        assert!(door.is_passable());

        door.requires_key = true;
        assert!(!door.is_passable());

        door.is_open = true;
        assert!(door.is_passable());
    }
}
