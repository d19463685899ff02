//! Player identification and per-player combat state.
//!
//! ## PlayerId
//!
//! Opaque identifier supplied by the chat platform (a user id).
//!
//! ## Player
//!
//! Life total, commander damage per source and named counters.
//! Elimination is a derived predicate, see [`crate::rules::lethal`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::rules::{loss_reason, LossReason};

/// Player identifier, stable for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw platform id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One participant's mutable combat state.
///
/// ## Invariants
///
/// - `life` never drops below zero; every mutation clamps at the floor.
/// - `damage_taken` only grows by accumulation.
/// - Counter names are stored as given. Case folding is the caller's job.
/// - Counter values are not clamped and may go negative.
///
/// ## Example
///
/// ```
/// use commander_tracker::core::{Player, PlayerId};
///
/// let mut player = Player::new(PlayerId::new(1), "Alice", 40);
/// player.modify_life(-45);
/// assert_eq!(player.life(), 0);
/// assert!(player.is_dead());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Player {
    id: PlayerId,
    display_name: String,
    life: i64,
    damage_taken: FxHashMap<PlayerId, i64>,
    counters: FxHashMap<String, i64>,
}

impl Player {
    /// Create a player at the given starting life.
    pub fn new(id: PlayerId, display_name: impl Into<String>, starting_life: i64) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            life: starting_life.max(0),
            damage_taken: FxHashMap::default(),
            counters: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn life(&self) -> i64 {
        self.life
    }

    // === Life ===

    /// Set life to an absolute value, clamped at zero.
    pub fn set_life(&mut self, amount: i64) {
        self.life = amount.max(0);
    }

    /// Change life by a relative amount, clamped at zero.
    pub fn modify_life(&mut self, delta: i64) {
        self.life = self.life.saturating_add(delta).max(0);
    }

    // === Commander Damage ===

    /// Accumulate commander damage dealt by `from`.
    ///
    /// The amount is taken as-is; callers validate it.
    pub fn add_commander_damage(&mut self, from: PlayerId, amount: i64) {
        let total = self.damage_taken.entry(from).or_insert(0);
        *total = total.saturating_add(amount);
    }

    /// Commander damage accumulated from `from`, or 0.
    #[must_use]
    pub fn commander_damage(&self, from: PlayerId) -> i64 {
        self.damage_taken.get(&from).copied().unwrap_or(0)
    }

    /// Iterate over (source, damage) pairs, ordered by source id.
    pub fn commander_damage_sources(&self) -> impl Iterator<Item = (PlayerId, i64)> + '_ {
        let mut sources: Vec<_> = self.damage_taken.iter().map(|(&p, &d)| (p, d)).collect();
        sources.sort_unstable_by_key(|&(p, _)| p);
        sources.into_iter()
    }

    // === Counters ===

    /// Add `amount` to the named counter, creating it at 0 if absent.
    pub fn add_counter(&mut self, name: &str, amount: i64) {
        let count = self.counters.entry(name.to_string()).or_insert(0);
        *count = count.saturating_add(amount);
    }

    /// Current value of the named counter, or 0.
    #[must_use]
    pub fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Reset an existing counter to 0.
    ///
    /// Returns false if the player never had that counter.
    pub fn reset_counter(&mut self, name: &str) -> bool {
        match self.counters.get_mut(name) {
            Some(count) => {
                *count = 0;
                true
            }
            None => false,
        }
    }

    /// Remove every counter.
    pub fn clear_counters(&mut self) {
        self.counters.clear();
    }

    /// Iterate over (name, count) pairs, ordered by name.
    pub fn counters(&self) -> impl Iterator<Item = (&str, i64)> {
        let mut counters: Vec<_> = self.counters.iter().map(|(n, &c)| (n.as_str(), c)).collect();
        counters.sort_unstable_by_key(|&(n, _)| n);
        counters.into_iter()
    }

    // === Elimination ===

    /// Why this player has lost, if they have.
    ///
    /// Re-evaluated on every call.
    #[must_use]
    pub fn loss_reason(&self) -> Option<LossReason> {
        loss_reason(self)
    }

    /// True if life is 0, any single source dealt 21+ commander damage,
    /// or the player has 10+ poison counters.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.loss_reason().is_some()
    }
}
