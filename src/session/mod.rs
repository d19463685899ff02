//! Game sessions and their registry.
//!
//! ## Key Types
//!
//! - `Session`: one game in one channel, with its roster and phase
//! - `Phase`: Forming → Active → Ended
//! - `Roster`: players in join order
//! - `SessionRegistry`: owned map from channel to session
//! - `SessionSnapshot`: serializable view for rendering

pub mod game;
pub mod registry;
pub mod roster;

pub use game::{AlivePlayers, DamageSnapshot, Phase, PlayerSnapshot, Session, SessionSnapshot};
pub use registry::SessionRegistry;
pub use roster::Roster;
