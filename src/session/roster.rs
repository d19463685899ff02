//! Insertion-ordered player storage.
//!
//! Backed by a `Vec<Player>`. Rosters are tiny (a handful of players),
//! so lookups are linear scans and iteration order is join order.

use serde::Serialize;

use crate::core::{Player, PlayerId};

/// Players in a session, in the order they joined.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Check if a player is in the roster.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id() == id)
    }

    /// Get a player by id.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Get a mutable player by id.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    /// Append a player. The caller checks for duplicates and capacity.
    pub(crate) fn push(&mut self, player: Player) {
        debug_assert!(!self.contains(player.id()), "duplicate player {}", player.id());
        self.players.push(player);
    }

    /// Remove a player, preserving the order of the rest.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let pos = self.players.iter().position(|p| p.id() == id)?;
        Some(self.players.remove(pos))
    }

    /// Iterate over players in join order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate over player ids in join order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(Player::id)
    }
}
