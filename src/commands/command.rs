//! Typed commands and their arguments.
//!
//! The host's chat adapter tokenises user input into a `Command`; the
//! argument parsers here (`LifeChange`, `DiceSpec`) do the validation
//! the model deliberately skips.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::dice::DiceSpec;
use crate::core::{ChannelId, PlayerId};
use crate::error::CommandError;

/// Cards in an opening hand, and the largest hand a mulligan may keep.
pub const OPENING_HAND_SIZE: i64 = 7;

fn opening_hand_size() -> i64 {
    OPENING_HAND_SIZE
}

/// Who issued a command, and where.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub channel: ChannelId,
    pub actor: PlayerId,
    pub display_name: String,
}

impl Invocation {
    pub fn new(channel: ChannelId, actor: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            channel,
            actor,
            display_name: display_name.into(),
        }
    }
}

/// A life total change.
///
/// `+5` and `-3` are relative; a bare `35` sets the total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeChange {
    Relative(i64),
    Set(i64),
}

impl LifeChange {
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let trimmed = input.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| CommandError::InvalidAmount(input.to_string()))?;

        if trimmed.starts_with('+') || trimmed.starts_with('-') {
            Ok(LifeChange::Relative(value))
        } else {
            Ok(LifeChange::Set(value))
        }
    }
}

impl FromStr for LifeChange {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Every command the dispatcher understands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Open a new game with the actor as first player.
    Start,
    /// Join the forming game.
    Join,
    /// Move the forming game to active.
    Begin,
    /// Leave the game.
    Leave,
    /// End and discard the game.
    End,
    /// Show every player's state.
    Status,
    /// Change the actor's life total.
    Life(LifeChange),
    /// Deal commander damage from the actor to `target`.
    CommanderDamage { target: PlayerId, amount: i64 },
    /// Add to one of the actor's counters. Names are case-insensitive.
    Counter { name: String, amount: i64 },
    /// Reset one counter, or all when `name` is `None`.
    ResetCounters { name: Option<String> },
    /// Roll dice.
    Roll(DiceSpec),
    /// Flip coins.
    Flip { times: i64 },
    /// Announce a mulligan down to `cards`, which defaults to a full hand.
    Mulligan {
        #[serde(default = "opening_hand_size")]
        cards: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_life_change_relative() {
        assert_eq!(LifeChange::parse("+5").unwrap(), LifeChange::Relative(5));
        assert_eq!(LifeChange::parse("-3").unwrap(), LifeChange::Relative(-3));
        assert_eq!(LifeChange::parse("+0").unwrap(), LifeChange::Relative(0));
    }

    #[test]
    fn test_life_change_absolute() {
        assert_eq!(LifeChange::parse("35").unwrap(), LifeChange::Set(35));
        assert_eq!(" 12 ".parse::<LifeChange>().unwrap(), LifeChange::Set(12));
    }

    #[test]
    fn test_life_change_invalid() {
        for input in ["", "abc", "+", "5.5", "--3", "1e3"] {
            assert_eq!(
                LifeChange::parse(input),
                Err(CommandError::InvalidAmount(input.to_string())),
                "expected invalid: {input:?}"
            );
        }
    }

    #[test]
    fn test_invocation_new() {
        let inv = Invocation::new(ChannelId::new(1), PlayerId::new(2), "Alice");
        assert_eq!(inv.display_name, "Alice");
        assert_eq!(inv.actor, PlayerId::new(2));
    }

    #[test]
    fn test_mulligan_defaults_to_opening_hand() {
        let cmd: Command = serde_json::from_str(r#"{"Mulligan":{}}"#).unwrap();
        assert_eq!(cmd, Command::Mulligan { cards: OPENING_HAND_SIZE });
    }

    #[test]
    fn test_command_serialization() {
        let cmd = Command::CommanderDamage { target: PlayerId::new(3), amount: 4 };
        let json = serde_json::to_string(&cmd).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, deserialized);
    }
}
