//! Error types.
//!
//! - `ConfigError`: loading or validating a `GameConfig`
//! - `RosterError`, `BeginError`: typed reasons behind the session's
//!   boolean `add_player` and `begin`
//! - `CommandError`: every user-facing failure of the command layer.
//!   Its `Display` text is the message shown in the channel.

use thiserror::Error;

use crate::core::PlayerId;
use crate::session::Phase;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for `GameConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but violate a bound.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Why a player could not be added to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The session no longer accepts players.
    #[error("session is {0} and not accepting players")]
    Closed(Phase),

    /// The player is already in the roster.
    #[error("{0} is already in the session")]
    Duplicate(PlayerId),

    /// The roster is at capacity.
    #[error("session is full ({capacity} players)")]
    Full {
        /// Configured maximum.
        capacity: usize,
    },
}

/// Why a session could not begin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BeginError {
    /// Only a forming session can begin.
    #[error("session is {0}, not forming")]
    NotForming(Phase),

    /// Roster is below the configured minimum.
    #[error("need at least {need} players, have {have}")]
    NotEnoughPlayers {
        /// Current roster size.
        have: usize,
        /// Configured minimum.
        need: usize,
    },
}

/// User-facing command failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("A game is already in progress in this channel!")]
    GameInProgress,

    #[error("No game in progress. Start one first.")]
    NoGame,

    #[error("The game has already started!")]
    AlreadyStarted,

    #[error("Game has already begun!")]
    AlreadyBegun,

    #[error("You are already in this game!")]
    AlreadyJoined,

    #[error("Game is full! (Max {max} players)")]
    GameFull { max: usize },

    #[error("Need at least {min} players to start!")]
    NotEnoughPlayers { min: usize },

    #[error("Only players in the game can do that!")]
    NotAPlayer,

    #[error("You are not in an active game!")]
    NotInGame,

    #[error("{0} is not in this game!")]
    TargetNotInGame(PlayerId),

    #[error("You cannot deal commander damage to yourself!")]
    SelfDamage,

    #[error("Invalid amount '{0}'. Use a number, +number, or -number.")]
    InvalidAmount(String),

    #[error("You don't have any {0} counters.")]
    NoSuchCounter(String),

    #[error("Invalid dice format '{0}'. Use a format like: d20, 2d6, 4d8")]
    InvalidDice(String),

    #[error("Maximum {max} dice at once!")]
    TooManyDice { max: u32 },

    #[error("Maximum die size is {max}!")]
    DieTooLarge { max: u32 },

    #[error("Maximum {max} flips at once!")]
    TooManyFlips { max: u32 },

    #[error("Hand size must be between 0 and {max}.")]
    InvalidHandSize { max: i64 },
}

impl From<RosterError> for CommandError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::Closed(_) => CommandError::AlreadyStarted,
            RosterError::Duplicate(_) => CommandError::AlreadyJoined,
            RosterError::Full { capacity } => CommandError::GameFull { max: capacity },
        }
    }
}

impl From<BeginError> for CommandError {
    fn from(err: BeginError) -> Self {
        match err {
            BeginError::NotForming(_) => CommandError::AlreadyBegun,
            BeginError::NotEnoughPlayers { need, .. } => CommandError::NotEnoughPlayers { min: need },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_error_messages() {
        assert_eq!(
            RosterError::Full { capacity: 4 }.to_string(),
            "session is full (4 players)"
        );
        assert_eq!(
            RosterError::Duplicate(PlayerId::new(9)).to_string(),
            "Player 9 is already in the session"
        );
        assert_eq!(
            RosterError::Closed(Phase::Active).to_string(),
            "session is active and not accepting players"
        );
    }

    #[test]
    fn test_roster_error_into_command_error() {
        assert_eq!(
            CommandError::from(RosterError::Full { capacity: 4 }),
            CommandError::GameFull { max: 4 }
        );
        assert_eq!(
            CommandError::from(RosterError::Duplicate(PlayerId::new(1))),
            CommandError::AlreadyJoined
        );
    }

    #[test]
    fn test_begin_error_into_command_error() {
        let err = BeginError::NotEnoughPlayers { have: 1, need: 2 };
        assert_eq!(err.to_string(), "need at least 2 players, have 1");
        assert_eq!(CommandError::from(err), CommandError::NotEnoughPlayers { min: 2 });
    }

    #[test]
    fn test_command_error_messages() {
        assert_eq!(
            CommandError::GameFull { max: 4 }.to_string(),
            "Game is full! (Max 4 players)"
        );
        assert_eq!(
            CommandError::InvalidAmount("abc".to_string()).to_string(),
            "Invalid amount 'abc'. Use a number, +number, or -number."
        );
    }
}
