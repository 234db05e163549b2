//! # Enemies
//!
//! Enemy actors and the per-turn decision loop that moves them.
//!
//! An [`Encounter`] owns a floor's enemies and their [`TurnScheduler`]. Each
//! turn the scheduled enemy either reports an attack (when the player is in
//! range) or moves one cell, by random step or by pathfinder depending on
//! its [`AiTier`]. Moves are checked against the positions other enemies
//! hold right now, so later actors see earlier actors' moves.

use crate::{
    ai_tier, new_actor_id, ActorId, ActorRole, AiTier, Floor, Position, RoomId, TurnScheduler,
};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An enemy on the current floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: ActorId,
    pub name: String,
    pub role: ActorRole,
    pub position: Position,
    /// Manhattan distance at which the enemy attacks instead of moving
    pub attack_range: u32,
    pub tier: AiTier,
}

impl Enemy {
    /// Creates an enemy with its role's attack range and the tier for `depth`.
    pub fn new(name: impl Into<String>, role: ActorRole, position: Position, depth: u32) -> Self {
        Self {
            id: new_actor_id(),
            name: name.into(),
            role,
            position,
            attack_range: role.attack_range(),
            tier: ai_tier(depth, role),
        }
    }

    pub fn in_attack_range(&self, target: Position) -> bool {
        self.position.manhattan_distance(target) <= self.attack_range
    }
}

/// What one enemy did with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The player was in range; damage is resolved elsewhere
    Attacked { enemy: ActorId },
    /// The enemy stepped to a new cell
    Moved {
        enemy: ActorId,
        from: Position,
        to: Position,
    },
    /// No move: no path, nowhere to step, or the cell was taken
    Held { enemy: ActorId },
}

/// Result of one full round of enemy turns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    pub outcomes: Vec<TurnOutcome>,
    /// Rooms first cleared at the end of this round
    pub cleared_rooms: Vec<RoomId>,
}

impl RoundReport {
    pub fn attacks(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, TurnOutcome::Attacked { .. }))
            .count()
    }
}

/// The enemies of one floor and the order they act in.
#[derive(Debug, Clone, Default)]
pub struct Encounter {
    enemies: Vec<Enemy>,
    scheduler: TurnScheduler<ActorId>,
}

impl Encounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an encounter whose turn order follows `enemies`.
    pub fn with_enemies(enemies: Vec<Enemy>) -> Self {
        let mut encounter = Self::new();
        for enemy in enemies {
            encounter.spawn(enemy);
        }
        encounter
    }

    /// Adds an enemy at the back of the turn order.
    pub fn spawn(&mut self, enemy: Enemy) -> ActorId {
        let id = enemy.id;
        debug!(
            "Spawned {} ({:?}, {}) at ({}, {})",
            enemy.name, enemy.role, enemy.tier, enemy.position.x, enemy.position.y
        );
        self.scheduler.add(id);
        self.enemies.push(enemy);
        id
    }

    /// Removes a defeated enemy so it gets no further turns.
    pub fn remove(&mut self, id: ActorId) -> Option<Enemy> {
        self.scheduler.remove(&id);
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub fn enemy(&self, id: ActorId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn scheduler(&self) -> &TurnScheduler<ActorId> {
        &self.scheduler
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Whether an enemy other than `except` stands on `pos`.
    pub fn is_occupied(&self, pos: Position, except: ActorId) -> bool {
        self.enemies
            .iter()
            .any(|enemy| enemy.id != except && enemy.position == pos)
    }

    /// Number of enemies standing inside `room_id`.
    pub fn enemies_in_room(&self, floor: &Floor, room_id: RoomId) -> usize {
        self.enemies
            .iter()
            .filter(|enemy| floor.room_id_at(enemy.position) == Some(room_id))
            .count()
    }

    /// Gives the next scheduled enemy its turn.
    ///
    /// Returns `None` when there are no enemies.
    pub fn take_turn(
        &mut self,
        floor: &Floor,
        player: Position,
        rng: &mut StdRng,
    ) -> Option<TurnOutcome> {
        let id = self.scheduler.process_next(|id| id)?;
        let enemy = self.enemy(id)?.clone();

        if enemy.in_attack_range(player) {
            debug!("{} attacks the player", enemy.name);
            return Some(TurnOutcome::Attacked { enemy: id });
        }

        let target = if enemy.tier.uses_pathfinder() {
            floor.find_next_move_to_player(enemy.position, player)
        } else {
            random_step(floor, enemy.position, rng)
        };

        if target == enemy.position || target == player || self.is_occupied(target, id) {
            return Some(TurnOutcome::Held { enemy: id });
        }

        if let Some(moving) = self.enemies.iter_mut().find(|enemy| enemy.id == id) {
            moving.position = target;
        }
        debug!(
            "{} moves ({}, {}) -> ({}, {})",
            enemy.name, enemy.position.x, enemy.position.y, target.x, target.y
        );
        Some(TurnOutcome::Moved {
            enemy: id,
            from: enemy.position,
            to: target,
        })
    }

    /// Runs one turn for every enemy, then reports per-room enemy counts to
    /// the floor so cleared rooms open their doors.
    pub fn run_round(
        &mut self,
        floor: &mut Floor,
        player: Position,
        rng: &mut StdRng,
    ) -> RoundReport {
        let mut report = RoundReport::default();
        for _ in 0..self.scheduler.len() {
            if let Some(outcome) = self.take_turn(floor, player, rng) {
                report.outcomes.push(outcome);
            }
        }

        let room_ids: Vec<RoomId> = floor.rooms().iter().map(|room| room.id).collect();
        for room_id in room_ids {
            let count = self.enemies_in_room(floor, room_id);
            if floor.check_room_clear(room_id, count) {
                report.cleared_rooms.push(room_id);
            }
        }
        report
    }
}

/// A uniformly random walkable neighbor, or `from` when boxed in.
fn random_step(floor: &Floor, from: Position, rng: &mut StdRng) -> Position {
    let options: Vec<Position> = from
        .cardinal_adjacent_positions()
        .into_iter()
        .filter(|&pos| floor.is_walkable(pos))
        .collect();
    if options.is_empty() {
        return from;
    }
    options[rng.gen_range(0..options.len())]
}
