//! Core types: identifiers, players, configuration, RNG.
//!
//! Everything here is independent of how commands reach the engine.

pub mod channel;
pub mod config;
pub mod player;
pub mod rng;

pub use channel::ChannelId;
pub use config::{GameConfig, DEFAULT_MAX_PLAYERS, DEFAULT_MIN_PLAYERS, DEFAULT_STARTING_LIFE};
pub use player::{Player, PlayerId};
pub use rng::GameRng;
