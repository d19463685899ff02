//! # commander-tracker
//!
//! Per-channel game tracking for Commander, the multiplayer card game
//! format, built to sit behind a chat bot.
//!
//! ## Design Principles
//!
//! 1. **One session per channel**: a `SessionRegistry` owns every game,
//!    created on first use and deleted when the game ends.
//!
//! 2. **Derived elimination**: whether a player is dead, and who has won,
//!    is recomputed from life, commander damage and poison on every query.
//!
//! 3. **No I/O**: the engine never sends messages or touches the network.
//!    Hosts translate chat input into `Command`s and render `Reply`s.
//!
//! ## Modules
//!
//! - `core`: Player and channel ids, players, configuration, RNG
//! - `rules`: Lethal thresholds and game outcome
//! - `session`: Sessions, rosters, the session registry
//! - `commands`: Command dispatch, argument parsing, dice and coins
//! - `error`: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{ChannelId, GameConfig, GameRng, Player, PlayerId};

pub use crate::rules::{GameResult, LossReason, LETHAL_COMMANDER_DAMAGE, LETHAL_POISON};

pub use crate::session::{Phase, Session, SessionRegistry, SessionSnapshot};

pub use crate::commands::{Command, CommandDispatcher, Invocation, LifeChange, Reply};

pub use crate::error::{BeginError, CommandError, ConfigError, RosterError};
