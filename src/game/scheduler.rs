//! # Turn Scheduler
//!
//! Round-robin FIFO queue of actor handles. Each call to
//! [`TurnScheduler::process_next`] gives one actor its turn and sends it to
//! the back of the queue.

use crate::ActorId;
use log::trace;
use std::collections::VecDeque;

/// Round-robin scheduler over actor handles `H`.
///
/// The roster is the full set of scheduled actors. The queue holds the
/// actors still waiting in the current round; when it drains it is refilled
/// from the roster and a new round starts.
///
/// # Examples
///
/// ```
/// use delve::TurnScheduler;
///
/// let mut scheduler = TurnScheduler::with_roster(vec!["goblin", "orc"]);
/// assert_eq!(scheduler.process_next(|actor| actor.len()), Some(6));
/// assert_eq!(scheduler.next(), Some(&"orc"));
/// ```
#[derive(Debug, Clone)]
pub struct TurnScheduler<H = ActorId> {
    roster: Vec<H>,
    queue: VecDeque<H>,
    rounds_started: u64,
}

impl<H: Clone + PartialEq> TurnScheduler<H> {
    pub fn new() -> Self {
        Self {
            roster: Vec::new(),
            queue: VecDeque::new(),
            rounds_started: 0,
        }
    }

    /// Creates a scheduler whose first round runs in roster order.
    pub fn with_roster(roster: Vec<H>) -> Self {
        let mut scheduler = Self::new();
        for actor in roster {
            scheduler.add(actor);
        }
        scheduler
    }

    /// Adds an actor to the roster and to the back of the current queue.
    ///
    /// Adding an actor that is already scheduled does nothing.
    pub fn add(&mut self, actor: H) {
        if self.roster.contains(&actor) {
            return;
        }
        self.roster.push(actor.clone());
        self.queue.push_back(actor);
    }

    /// Removes an actor from the roster and from every queued slot.
    ///
    /// Returns whether the actor was scheduled.
    pub fn remove(&mut self, actor: &H) -> bool {
        let before = self.roster.len();
        self.roster.retain(|scheduled| scheduled != actor);
        self.queue.retain(|queued| queued != actor);
        before != self.roster.len()
    }

    /// The actor whose turn is next, refilling the queue if it has drained.
    pub fn next(&mut self) -> Option<&H> {
        self.refill_if_drained();
        self.queue.front()
    }

    /// Pops the next actor, runs its turn, and re-enqueues it at the back.
    ///
    /// Returns `None` without calling `turn` when the roster is empty.
    pub fn process_next<R, F>(&mut self, turn: F) -> Option<R>
    where
        F: FnOnce(H) -> R,
    {
        self.refill_if_drained();
        let actor = self.queue.pop_front()?;
        self.queue.push_back(actor.clone());
        Some(turn(actor))
    }

    /// Discards the current queue and starts a fresh round in roster order.
    pub fn reset_round(&mut self) {
        self.queue = self.roster.iter().cloned().collect();
        self.rounds_started += 1;
    }

    /// Actors in roster order.
    pub fn roster(&self) -> &[H] {
        &self.roster
    }

    /// Actors waiting in the current queue, front first.
    pub fn queued(&self) -> impl Iterator<Item = &H> + '_ {
        self.queue.iter()
    }

    pub fn contains(&self, actor: &H) -> bool {
        self.roster.contains(actor)
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Number of times the queue has been refilled from the roster.
    ///
    /// A drained queue restarts silently, so callers that need round
    /// boundaries compare this counter before and after a turn.
    pub fn rounds_started(&self) -> u64 {
        self.rounds_started
    }

    fn refill_if_drained(&mut self) {
        if self.queue.is_empty() && !self.roster.is_empty() {
            trace!("Turn queue drained, refilling {} actors", self.roster.len());
            self.reset_round();
        }
    }
}

impl<H: Clone + PartialEq> Default for TurnScheduler<H> {
    fn default() -> Self {
        Self::new()
    }
}
