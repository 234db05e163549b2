//! # Encounter Generation
//!
//! Per-depth level configuration and enemy spawn placement.
//!
//! Enemies are spread over rooms `1..` in creation order so the start room
//! stays empty. Inside a room an enemy takes the center, or failing that one
//! of the inset corners, keeping clear of the player.

use crate::config::SAFE_SPAWN_DISTANCE;
use crate::{ActorRole, DelveError, DelveResult, Encounter, Enemy, Floor, Position, Room};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Floors with fewer rooms than this get no enemies.
pub const MIN_ROOMS_FOR_SPAWNS: usize = 4;

/// Level data for one dungeon depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Dungeon depth, starting at 1
    pub depth: u32,
    /// Rooms to generate on this floor
    pub room_count: usize,
    /// Regular enemies to spawn
    pub enemy_count: usize,
    /// Whether a boss guards the stairs
    pub boss: bool,
    /// Roles cycled through when spawning regular enemies
    pub roster: Vec<ActorRole>,
}

impl LevelConfig {
    /// Creates the standard level for `depth`.
    ///
    /// Every fifth depth is a boss floor.
    pub fn for_depth(depth: u32) -> Self {
        let depth = depth.max(1);
        Self {
            depth,
            enemy_count: 3 + depth as usize / 2,
            boss: depth % 5 == 0,
            ..Self::default()
        }
    }

    /// Parses a JSON level description and validates it.
    pub fn from_json(json: &str) -> DelveResult<Self> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> DelveResult<()> {
        if self.depth == 0 {
            return Err(DelveError::InvalidConfig("depth starts at 1".to_string()));
        }
        if self.room_count == 0 {
            return Err(DelveError::InvalidConfig(
                "a level needs at least one room".to_string(),
            ));
        }
        if self.enemy_count > 0 && self.roster.is_empty() {
            return Err(DelveError::InvalidConfig(format!(
                "{} enemies requested with an empty roster",
                self.enemy_count
            )));
        }
        Ok(())
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            room_count: crate::config::DEFAULT_ROOM_COUNT,
            enemy_count: 4,
            boss: false,
            roster: vec![ActorRole::Melee, ActorRole::Ranged],
        }
    }
}

/// Places a level's enemies on a generated floor.
#[derive(Debug, Clone)]
pub struct EncounterGenerator {
    level: LevelConfig,
}

impl EncounterGenerator {
    pub fn new(level: LevelConfig) -> Self {
        Self { level }
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    /// Spawns the level's enemies, keeping them away from `player`.
    pub fn populate(&self, floor: &Floor, player: Position) -> Encounter {
        let mut encounter = Encounter::new();
        let rooms = floor.rooms();
        if rooms.len() < MIN_ROOMS_FOR_SPAWNS {
            debug!(
                "Only {} rooms, spawning no enemies (need {})",
                rooms.len(),
                MIN_ROOMS_FOR_SPAWNS
            );
            return encounter;
        }

        let spawn_rooms = &rooms[1..];
        for index in 0..self.level.enemy_count {
            let roster = &self.level.roster;
            let Some(&role) = roster.get(index % roster.len().max(1)) else {
                break;
            };
            // A full room passes its enemy on to the next one in the cycle
            let position = (0..spawn_rooms.len())
                .map(|offset| &spawn_rooms[(index + offset) % spawn_rooms.len()])
                .find_map(|room| spawn_position(floor, room, player, &encounter));
            let Some(position) = position else {
                debug!("No free spawn tile left after {} enemies", index);
                break;
            };
            let name = format!("{:?} {}", role, index + 1).to_lowercase();
            encounter.spawn(Enemy::new(name, role, position, self.level.depth));
        }

        if self.level.boss {
            let room = floor.stairs_room().and_then(|id| floor.room(id));
            match room.and_then(|room| spawn_position(floor, room, player, &encounter)) {
                Some(position) => {
                    let boss = Enemy::new("boss", ActorRole::Boss, position, self.level.depth);
                    encounter.spawn(boss);
                }
                None => debug!("No free tile for the boss"),
            }
        }

        info!(
            "Spawned {} enemies for depth {}",
            encounter.len(),
            self.level.depth
        );
        encounter
    }
}

/// Spawn spots in preference order: center, then the four corners inset by one.
pub fn spawn_candidates(room: &Room) -> Vec<Position> {
    let near = room.top_left + Position::new(1, 1);
    let far = room.bottom_right() - Position::new(1, 1);
    vec![
        room.center(),
        near,
        Position::new(far.x, near.y),
        Position::new(near.x, far.y),
        far,
    ]
}

/// Picks an open tile in `room`: a walkable tile holding neither the player
/// nor an enemy.
///
/// Candidates are tried before the rest of the room, and tiles at least
/// [`SAFE_SPAWN_DISTANCE`] from the player before closer ones. Returns `None`
/// when the room has no open tile.
fn spawn_position(
    floor: &Floor,
    room: &Room,
    player: Position,
    encounter: &Encounter,
) -> Option<Position> {
    let open = |pos: &Position| {
        *pos != player
            && floor.is_walkable(*pos)
            && !encounter.enemies().iter().any(|enemy| enemy.position == *pos)
    };
    let safe = |pos: &Position| pos.manhattan_distance(player) >= SAFE_SPAWN_DISTANCE;

    let candidates = spawn_candidates(room);
    let tiles = room.positions();
    candidates
        .iter()
        .copied()
        .filter(open)
        .find(safe)
        .or_else(|| candidates.iter().copied().find(open))
        .or_else(|| tiles.iter().copied().filter(open).find(safe))
        .or_else(|| tiles.iter().copied().find(open))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FloorLayout, GenerationConfig, Graph, RoomKind, TileGrid, TileKind};
    use std::collections::HashSet;

    fn floor_with_rooms(rooms: usize, seed: u64) -> Floor {
        let config = GenerationConfig::new(seed);
        let mut floor = Floor::new(&config);
        floor
            .generate(rooms, &mut config.create_rng())
            .expect("valid config");
        floor
    }

    /// A start room and three 3x3 rooms in a row on an open 20x6 grid.
    fn small_room_floor() -> Floor {
        let mut floor = Floor::from_grid(TileGrid::new(20, 6, TileKind::Floor));
        floor.install(FloorLayout {
            grid: TileGrid::new(20, 6, TileKind::Floor),
            rooms: vec![
                Room::new(0, Position::new(1, 1), 3, 3, RoomKind::Start),
                Room::new(1, Position::new(6, 1), 3, 3, RoomKind::Floor),
                Room::new(2, Position::new(11, 1), 3, 3, RoomKind::Floor),
                Room::new(3, Position::new(16, 1), 3, 3, RoomKind::Exit),
            ],
            doors: Vec::new(),
            graph: Graph::new(),
            stairs: None,
        });
        floor
    }

    fn assert_no_stacking(encounter: &Encounter, player: Position) {
        let positions: HashSet<Position> =
            encounter.enemies().iter().map(|enemy| enemy.position).collect();
        assert_eq!(positions.len(), encounter.len(), "two enemies share a cell");
        assert!(!positions.contains(&player), "an enemy spawned on the player");
    }

    #[test]
    fn test_level_defaults_and_depth_scaling() {
        let level = LevelConfig::default();
        assert!(level.validate().is_ok());
        assert!(!level.boss);

        let deep = LevelConfig::for_depth(10);
        assert_eq!(deep.depth, 10);
        assert_eq!(deep.enemy_count, 8);
        assert!(deep.boss);
        assert_eq!(LevelConfig::for_depth(0).depth, 1);
    }

    #[test]
    fn test_level_from_json() {
        let level = LevelConfig::from_json(r#"{ "depth": 4, "roster": ["ranged"] }"#)
            .expect("level parses");
        assert_eq!(level.depth, 4);
        assert_eq!(level.roster, vec![ActorRole::Ranged]);
        assert_eq!(level.room_count, 8);

        assert!(LevelConfig::from_json(r#"{ "depth": 0 }"#).is_err());
        assert!(LevelConfig::from_json(r#"{ "enemy_count": 2, "roster": [] }"#).is_err());
    }

    #[test]
    fn test_spawn_candidates_order() {
        let room = Room::new(1, Position::new(2, 2), 5, 5, RoomKind::Floor);
        assert_eq!(
            spawn_candidates(&room),
            vec![
                Position::new(4, 4),
                Position::new(3, 3),
                Position::new(5, 3),
                Position::new(3, 5),
                Position::new(5, 5),
            ]
        );
    }

    #[test]
    fn test_spawn_avoids_player() {
        let floor = Floor::from_grid(TileGrid::new(10, 10, TileKind::Floor));
        let room = Room::new(1, Position::new(2, 2), 5, 5, RoomKind::Floor);
        let encounter = Encounter::new();
        // Center (4, 4) is next to the player, so the first far corner wins
        let spot = spawn_position(&floor, &room, Position::new(4, 5), &encounter);
        assert_eq!(spot, Some(Position::new(3, 3)));
    }

    #[test]
    fn test_spawn_never_lands_on_player() {
        let floor = Floor::from_grid(TileGrid::new(10, 10, TileKind::Floor));
        let room = Room::new(1, Position::new(2, 2), 3, 3, RoomKind::Floor);
        let spot = spawn_position(&floor, &room, room.center(), &Encounter::new());
        assert!(spot.is_some_and(|spot| spot != room.center() && room.contains(spot)));
    }

    #[test]
    fn test_small_rooms_fill_without_stacking() {
        let floor = small_room_floor();
        let player = Position::new(2, 2);
        let level = LevelConfig {
            enemy_count: 6,
            ..LevelConfig::default()
        };
        let encounter = EncounterGenerator::new(level).populate(&floor, player);

        assert_eq!(encounter.len(), 6);
        assert_no_stacking(&encounter, player);
        for enemy in encounter.enemies() {
            assert_ne!(floor.room_id_at(enemy.position), Some(0));
        }
    }

    #[test]
    fn test_full_rooms_stop_spawning() {
        let floor = small_room_floor();
        let player = Position::new(2, 2);
        let level = LevelConfig {
            enemy_count: 30,
            ..LevelConfig::default()
        };
        let encounter = EncounterGenerator::new(level).populate(&floor, player);

        // Three 3x3 spawn rooms hold 27 enemies at most
        assert_eq!(encounter.len(), 27);
        assert_no_stacking(&encounter, player);
    }

    #[test]
    fn test_deep_floors_never_stack_spawns() {
        for seed in 0..200 {
            let floor = floor_with_rooms(8, seed);
            let player = floor.rooms()[0].center();
            let encounter =
                EncounterGenerator::new(LevelConfig::for_depth(10)).populate(&floor, player);
            assert_eq!(encounter.len(), 9, "seed {}", seed);
            assert_no_stacking(&encounter, player);
        }
    }

    #[test]
    fn test_small_floor_spawns_nothing() {
        let floor = floor_with_rooms(3, 11);
        let encounter =
            EncounterGenerator::new(LevelConfig::default()).populate(&floor, Position::new(0, 0));
        assert!(encounter.is_empty());
    }

    #[test]
    fn test_enemies_skip_start_room() {
        let floor = floor_with_rooms(8, 12);
        let start = floor.rooms()[0].center();
        let level = LevelConfig {
            enemy_count: 6,
            ..LevelConfig::default()
        };
        let encounter = EncounterGenerator::new(level).populate(&floor, start);

        assert_eq!(encounter.len(), 6);
        for (index, enemy) in encounter.enemies().iter().enumerate() {
            assert!(floor.rooms()[index + 1].contains(enemy.position));
        }
        assert_eq!(encounter.enemies()[0].role, ActorRole::Melee);
        assert_eq!(encounter.enemies()[1].role, ActorRole::Ranged);
    }

    #[test]
    fn test_boss_guards_stairs() {
        let floor = floor_with_rooms(8, 13);
        let level = LevelConfig {
            depth: 5,
            boss: true,
            enemy_count: 0,
            ..LevelConfig::default()
        };
        let encounter = EncounterGenerator::new(level).populate(&floor, Position::new(0, 0));

        assert_eq!(encounter.len(), 1);
        let boss = &encounter.enemies()[0];
        assert_eq!(boss.role, ActorRole::Boss);
        assert_eq!(boss.tier.level(), 4);
        let stairs_room = floor
            .stairs_room()
            .and_then(|id| floor.room(id))
            .expect("eight rooms get stairs");
        assert!(stairs_room.contains(boss.position));
    }
}
