//! Platform-neutral command layer.
//!
//! ## Key Types
//!
//! - `Invocation`: channel, actor and display name of a command
//! - `Command`: typed command with validated arguments
//! - `CommandDispatcher`: owns the session registry, runs commands
//! - `Reply`: structured result with a plain-text `Display`
//!
//! Argument validation (life amounts, dice notation, counter-name case
//! folding) happens here so the model can accept any integer.

pub mod command;
pub mod dice;
pub mod dispatcher;
pub mod reply;

pub use command::{Command, Invocation, LifeChange, OPENING_HAND_SIZE};
pub use dice::{flip_coins, CoinFace, CoinFlips, DiceRoll, DiceSpec, MAX_DICE, MAX_FLIPS, MAX_SIDES};
pub use dispatcher::CommandDispatcher;
pub use reply::{Elimination, Reply};
