//! Dice and coin utilities.
//!
//! Dice use `NdS` notation (`d20`, `2d6`), case-insensitive, with the
//! count defaulting to 1.

use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::error::CommandError;

/// Most dice rolled in one command.
pub const MAX_DICE: u32 = 100;

/// Largest die allowed.
pub const MAX_SIDES: u32 = 1000;

/// Most coins flipped in one command.
pub const MAX_FLIPS: u32 = 100;

const D20: NonZeroU32 = NonZeroU32::MIN.saturating_add(19);

/// Rolls with more dice than this report only the total.
pub const MAX_LISTED: usize = 20;

/// A validated dice expression.
///
/// Built only through [`DiceSpec::new`] or [`DiceSpec::parse`], so the
/// count and sides are always within `1..=MAX_DICE` and `1..=MAX_SIDES`.
/// Deserialization runs the same checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDiceSpec")]
pub struct DiceSpec {
    count: u32,
    sides: NonZeroU32,
}

/// Unchecked wire form of a `DiceSpec`.
#[derive(Deserialize)]
struct RawDiceSpec {
    count: u32,
    sides: u32,
}

impl TryFrom<RawDiceSpec> for DiceSpec {
    type Error = CommandError;

    fn try_from(raw: RawDiceSpec) -> Result<Self, Self::Error> {
        Self::new(raw.count, raw.sides)
    }
}

impl Default for DiceSpec {
    fn default() -> Self {
        Self { count: 1, sides: D20 }
    }
}

impl DiceSpec {
    /// `count` dice with `sides` faces each.
    pub fn new(count: u32, sides: u32) -> Result<Self, CommandError> {
        Self::checked(u64::from(count), u64::from(sides), &format!("{}d{}", count, sides))
    }

    /// Parse `NdS` notation.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let invalid = || CommandError::InvalidDice(input.to_string());
        let normalized = input.trim().to_ascii_lowercase();
        let (count, sides) = normalized.split_once('d').ok_or_else(invalid)?;

        let count: u64 = if count.is_empty() {
            1
        } else {
            parse_digits(count).ok_or_else(invalid)?
        };
        let sides: u64 = parse_digits(sides).ok_or_else(invalid)?;

        Self::checked(count, sides, input)
    }

    /// Limit checks shared by every constructor. `input` is echoed back
    /// for a zero count or zero sides.
    fn checked(count: u64, sides: u64, input: &str) -> Result<Self, CommandError> {
        if count == 0 || sides == 0 {
            return Err(CommandError::InvalidDice(input.to_string()));
        }
        if count > u64::from(MAX_DICE) {
            return Err(CommandError::TooManyDice { max: MAX_DICE });
        }
        if sides > u64::from(MAX_SIDES) {
            return Err(CommandError::DieTooLarge { max: MAX_SIDES });
        }

        // Both bounded above by u32 limits.
        let sides = NonZeroU32::new(sides as u32)
            .ok_or_else(|| CommandError::InvalidDice(input.to_string()))?;
        Ok(Self {
            count: count as u32,
            sides,
        })
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides.get()
    }

    /// Roll every die.
    pub fn roll(&self, rng: &mut GameRng) -> DiceRoll {
        let rolls: Vec<u32> = (0..self.count).map(|_| rng.roll_die(self.sides)).collect();
        let total = rolls.iter().map(|&r| u64::from(r)).sum();
        DiceRoll { rolls, total }
    }
}

/// Digits only; no sign, no whitespace. Saturates instead of overflowing.
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.parse().unwrap_or(u64::MAX))
}

impl FromStr for DiceSpec {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 1 {
            write!(f, "d{}", self.sides)
        } else {
            write!(f, "{}d{}", self.count, self.sides)
        }
    }
}

/// Outcome of rolling a `DiceSpec`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub rolls: Vec<u32>,
    pub total: u64,
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.rolls.len() == 1 {
            return write!(f, "Result: {}", self.total);
        }
        if self.rolls.len() <= MAX_LISTED {
            let listed: Vec<String> = self.rolls.iter().map(u32::to_string).collect();
            write!(f, "Rolls: {}. ", listed.join(", "))?;
        }
        write!(f, "Total: {}", self.total)
    }
}

/// One side of a coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinFace {
    Heads,
    Tails,
}

impl std::fmt::Display for CoinFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoinFace::Heads => f.write_str("Heads"),
            CoinFace::Tails => f.write_str("Tails"),
        }
    }
}

/// Outcome of flipping one or more coins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinFlips {
    pub results: Vec<CoinFace>,
}

impl CoinFlips {
    #[must_use]
    pub fn heads(&self) -> usize {
        self.results.iter().filter(|&&r| r == CoinFace::Heads).count()
    }

    #[must_use]
    pub fn tails(&self) -> usize {
        self.results.len() - self.heads()
    }
}

impl std::fmt::Display for CoinFlips {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let [single] = self.results.as_slice() {
            return write!(f, "{}!", single);
        }
        write!(f, "Heads: {}, Tails: {}", self.heads(), self.tails())?;
        if self.results.len() <= MAX_LISTED {
            let listed: Vec<String> = self.results.iter().map(CoinFace::to_string).collect();
            write!(f, ". Results: {}", listed.join(", "))?;
        }
        Ok(())
    }
}

/// Flip `times` coins. Fewer than one flip is treated as one.
pub fn flip_coins(rng: &mut GameRng, times: i64) -> Result<CoinFlips, CommandError> {
    if times > i64::from(MAX_FLIPS) {
        return Err(CommandError::TooManyFlips { max: MAX_FLIPS });
    }
    let times = times.max(1);
    let results = (0..times)
        .map(|_| if rng.gen_bool(0.5) { CoinFace::Heads } else { CoinFace::Tails })
        .collect();
    Ok(CoinFlips { results })
}
