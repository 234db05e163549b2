//! # Adaptive AI Policy
//!
//! Maps dungeon depth and actor role to an intelligence tier. The movement
//! layer in [`Encounter`](crate::Encounter) reads the tier to pick between
//! random steps and the grid pathfinder.

use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Behavior tier of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AiTier {
    /// Tier 0: undirected random movement
    Wander = 0,
    /// Tier 1: always pursue via the pathfinder
    Chase = 1,
    /// Tier 2: pursue, same pathfinder as tier 1
    Pursue = 2,
    /// Tier 3: reserved for coordinated flanking
    Flank = 3,
    /// Tier 4: bosses and the deepest floors
    Boss = 4,
}

impl AiTier {
    /// Numeric tier level, 0 through 4.
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            AiTier::Wander => "wander",
            AiTier::Chase => "chase",
            AiTier::Pursue => "pursue",
            AiTier::Flank => "flank",
            AiTier::Boss => "boss",
        }
    }

    /// Whether movement at this tier is driven by the grid pathfinder.
    pub fn uses_pathfinder(self) -> bool {
        self != AiTier::Wander
    }
}

impl fmt::Display for AiTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (tier {})", self.name(), self.level())
    }
}

/// Combat role of an enemy type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Melee,
    Ranged,
    Boss,
}

impl ActorRole {
    /// Manhattan distance at which this role attacks instead of moving.
    pub fn attack_range(self) -> u32 {
        match self {
            ActorRole::Melee | ActorRole::Boss => 1,
            ActorRole::Ranged => 4,
        }
    }
}

impl FromStr for ActorRole {
    type Err = DelveError;

    fn from_str(s: &str) -> DelveResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "melee" => Ok(ActorRole::Melee),
            "ranged" => Ok(ActorRole::Ranged),
            "boss" => Ok(ActorRole::Boss),
            other => Err(DelveError::InvalidConfig(format!(
                "Unknown actor role '{}'",
                other
            ))),
        }
    }
}

/// Tier for an actor of `role` on floor `depth` (1-based).
///
/// Bosses are always tier 4. Depth 0 is treated like depth 1.
///
/// # Examples
///
/// ```
/// use delve::{ai_tier, ActorRole, AiTier};
///
/// assert_eq!(ai_tier(1, ActorRole::Melee), AiTier::Wander);
/// assert_eq!(ai_tier(4, ActorRole::Ranged), AiTier::Chase);
/// assert_eq!(ai_tier(1, ActorRole::Boss), AiTier::Boss);
/// ```
pub fn ai_tier(depth: u32, role: ActorRole) -> AiTier {
    if role == ActorRole::Boss {
        return AiTier::Boss;
    }
    match depth {
        0..=2 => AiTier::Wander,
        3..=4 => AiTier::Chase,
        5..=6 => AiTier::Pursue,
        7..=8 => AiTier::Flank,
        _ => AiTier::Boss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_by_depth() {
        let tiers: Vec<u8> = (1..=10)
            .map(|depth| ai_tier(depth, ActorRole::Melee).level())
            .collect();
        assert_eq!(tiers, vec![0, 0, 1, 1, 2, 2, 3, 3, 4, 4]);
        assert_eq!(ai_tier(0, ActorRole::Ranged), AiTier::Wander);
        assert_eq!(ai_tier(250, ActorRole::Ranged), AiTier::Boss);
    }

    #[test]
    fn test_boss_always_top_tier() {
        for depth in 0..12 {
            assert_eq!(ai_tier(depth, ActorRole::Boss), AiTier::Boss);
        }
    }

    #[test]
    fn test_only_wander_skips_pathfinder() {
        assert!(!AiTier::Wander.uses_pathfinder());
        assert!(AiTier::Chase.uses_pathfinder());
        assert!(AiTier::Boss.uses_pathfinder());
        assert!(AiTier::Flank > AiTier::Pursue);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Boss".parse::<ActorRole>().ok(), Some(ActorRole::Boss));
        assert_eq!("melee".parse::<ActorRole>().ok(), Some(ActorRole::Melee));
        assert!(matches!(
            "dragon".parse::<ActorRole>(),
            Err(DelveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&ActorRole::Ranged).expect("serializes");
        assert_eq!(json, "\"ranged\"");
        let role: ActorRole = serde_json::from_str("\"boss\"").expect("parses");
        assert_eq!(role, ActorRole::Boss);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(AiTier::Pursue.to_string(), "pursue (tier 2)");
    }
}
