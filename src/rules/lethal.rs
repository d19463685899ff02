//! Elimination rules.
//!
//! A player loses when any of these holds:
//! - life is 0
//! - a single source has dealt `LETHAL_COMMANDER_DAMAGE` or more
//! - the player has `LETHAL_POISON` or more poison counters
//!
//! Evaluated fresh on every query; nothing is cached on the player.

use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerId};

/// Commander damage from a single source that eliminates a player.
pub const LETHAL_COMMANDER_DAMAGE: i64 = 21;

/// Poison counters that eliminate a player.
pub const LETHAL_POISON: i64 = 10;

/// Name of the poison counter.
pub const POISON_COUNTER: &str = "poison";

/// Why a player was eliminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// Life total reached 0.
    LifeDepleted,
    /// One source dealt lethal commander damage.
    CommanderDamage {
        /// The source player.
        from: PlayerId,
        /// Accumulated damage from that source.
        amount: i64,
    },
    /// Lethal poison counters.
    Poison(i64),
}

impl std::fmt::Display for LossReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LossReason::LifeDepleted => write!(f, "life reached 0"),
            LossReason::CommanderDamage { amount, .. } => {
                write!(f, "{} commander damage from a single source", amount)
            }
            LossReason::Poison(count) => write!(f, "{} poison counters", count),
        }
    }
}

/// Determine whether and why `player` has lost.
///
/// Life is checked first, then commander damage, then poison. When
/// several sources are lethal the heaviest is reported, ties going to
/// the lowest id.
#[must_use]
pub fn loss_reason(player: &Player) -> Option<LossReason> {
    if player.life() <= 0 {
        return Some(LossReason::LifeDepleted);
    }

    let lethal_source = player
        .commander_damage_sources()
        .filter(|&(_, amount)| amount >= LETHAL_COMMANDER_DAMAGE)
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)));
    if let Some((from, amount)) = lethal_source {
        return Some(LossReason::CommanderDamage { from, amount });
    }

    let poison = player.counter(POISON_COUNTER);
    if poison >= LETHAL_POISON {
        return Some(LossReason::Poison(poison));
    }

    None
}
