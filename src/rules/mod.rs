//! Elimination and victory rules.
//!
//! Both are pure functions of current player state:
//! - `lethal`: when a player has lost, and why
//! - `outcome`: who won once at most one player survives
//!
//! Nothing here is cached. Callers re-check after every mutation.

pub mod lethal;
pub mod outcome;

pub use lethal::{loss_reason, LossReason, LETHAL_COMMANDER_DAMAGE, LETHAL_POISON, POISON_COUNTER};
pub use outcome::GameResult;
