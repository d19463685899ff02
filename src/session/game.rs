//! One game bound to one channel.
//!
//! ## Lifecycle
//!
//! ```text
//! Forming --begin()--> Active --end()--> Ended
//!    |                                     ^
//!    +---------------end()-----------------+
//! ```
//!
//! - `Forming`: players join. `begin` succeeds once the roster reaches
//!   `min_players`.
//! - `Active`: roster is frozen against newcomers. Players may still leave.
//! - `Ended`: terminal. The owner is expected to drop the session.
//!
//! Elimination and victory are recomputed from player state on every
//! query. With at most a handful of players this is cheap and leaves no
//! cached flag to go stale.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::roster::Roster;
use crate::core::{ChannelId, GameConfig, Player, PlayerId};
use crate::error::{BeginError, RosterError};
use crate::rules::{GameResult, LossReason};

/// Session lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting players.
    #[default]
    Forming,
    /// Game in progress.
    Active,
    /// Game over.
    Ended,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Forming => "forming",
            Phase::Active => "active",
            Phase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Players still in the game, in join order.
pub type AlivePlayers<'a> = SmallVec<[&'a Player; 4]>;

/// A game session in one channel.
///
/// ## Example
///
/// ```
/// use commander_tracker::core::{ChannelId, GameConfig, PlayerId};
/// use commander_tracker::session::{Phase, Session};
///
/// let mut session = Session::new(ChannelId::new(1), GameConfig::default());
/// assert!(session.add_player(PlayerId::new(1), "Alice"));
/// assert!(session.add_player(PlayerId::new(2), "Bob"));
/// assert!(session.begin());
/// assert_eq!(session.phase(), Phase::Active);
///
/// session.player_mut(PlayerId::new(2)).unwrap().set_life(0);
/// assert_eq!(session.check_winner().unwrap().id(), PlayerId::new(1));
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    channel: ChannelId,
    config: GameConfig,
    roster: Roster,
    phase: Phase,
}

impl Session {
    /// Create a forming session with an empty roster.
    pub fn new(channel: ChannelId, config: GameConfig) -> Self {
        Self {
            channel,
            config,
            roster: Roster::new(),
            phase: Phase::Forming,
        }
    }

    #[must_use]
    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Number of players in the roster.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    /// Check if the roster is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.config.max_players
    }

    // === Roster ===

    /// Add a player, reporting why on failure.
    ///
    /// Only a forming session accepts players. Duplicates are reported
    /// before capacity.
    pub fn try_add_player(
        &mut self,
        id: PlayerId,
        display_name: impl Into<String>,
    ) -> Result<(), RosterError> {
        if self.phase != Phase::Forming {
            return Err(RosterError::Closed(self.phase));
        }
        if self.roster.contains(id) {
            return Err(RosterError::Duplicate(id));
        }
        if self.is_full() {
            return Err(RosterError::Full {
                capacity: self.config.max_players,
            });
        }

        self.roster
            .push(Player::new(id, display_name, self.config.starting_life));
        tracing::debug!(channel = %self.channel, player = %id, size = self.roster.len(), "player joined");
        Ok(())
    }

    /// Add a player. Returns whether the player was inserted.
    pub fn add_player(&mut self, id: PlayerId, display_name: impl Into<String>) -> bool {
        self.try_add_player(id, display_name).is_ok()
    }

    /// Remove a player. Returns whether the player was present.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let removed = self.roster.remove(id).is_some();
        if removed {
            tracing::debug!(channel = %self.channel, player = %id, size = self.roster.len(), "player left");
        }
        removed
    }

    /// Get a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.get(id)
    }

    /// Get a mutable player by id.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.roster.get_mut(id)
    }

    /// Check if a player is in the roster.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.roster.contains(id)
    }

    // === Lifecycle ===

    /// Move from Forming to Active, reporting why on failure.
    pub fn try_begin(&mut self) -> Result<(), BeginError> {
        if self.phase != Phase::Forming {
            return Err(BeginError::NotForming(self.phase));
        }
        if self.roster.len() < self.config.min_players {
            return Err(BeginError::NotEnoughPlayers {
                have: self.roster.len(),
                need: self.config.min_players,
            });
        }

        self.phase = Phase::Active;
        tracing::info!(channel = %self.channel, players = self.roster.len(), "game began");
        Ok(())
    }

    /// Move from Forming to Active. Returns whether the transition happened.
    pub fn begin(&mut self) -> bool {
        self.try_begin().is_ok()
    }

    /// Move to Ended from any phase. Idempotent.
    pub fn end(&mut self) {
        if self.phase != Phase::Ended {
            tracing::info!(channel = %self.channel, from = %self.phase, "game ended");
        }
        self.phase = Phase::Ended;
    }

    // === Victory ===

    /// Players not yet eliminated, in join order.
    #[must_use]
    pub fn alive_players(&self) -> AlivePlayers<'_> {
        self.roster.iter().filter(|p| !p.is_dead()).collect()
    }

    /// The sole surviving player, if exactly one is alive.
    #[must_use]
    pub fn check_winner(&self) -> Option<&Player> {
        match self.alive_players().as_slice() {
            [winner] => Some(*winner),
            _ => None,
        }
    }

    /// Result of an active game, once at most one player survives.
    ///
    /// Always `None` outside the Active phase.
    #[must_use]
    pub fn outcome(&self) -> Option<GameResult> {
        if self.phase != Phase::Active {
            return None;
        }
        let survivors: SmallVec<[PlayerId; 4]> =
            self.alive_players().iter().map(|p| p.id()).collect();
        GameResult::from_survivors(&survivors)
    }

    // === Views ===

    /// Serializable view of the session for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let players = self
            .roster
            .iter()
            .map(|player| PlayerSnapshot {
                id: player.id(),
                display_name: player.display_name().to_string(),
                life: player.life(),
                commander_damage: player
                    .commander_damage_sources()
                    .map(|(from, amount)| DamageSnapshot {
                        from,
                        from_name: self.display_name_of(from),
                        amount,
                    })
                    .collect(),
                counters: player
                    .counters()
                    .map(|(name, count)| (name.to_string(), count))
                    .collect(),
                eliminated: player.loss_reason(),
            })
            .collect();

        let winner = match self.outcome() {
            Some(GameResult::Winner(id)) => Some(id),
            _ => None,
        };

        SessionSnapshot {
            channel: self.channel,
            phase: self.phase,
            starting_life: self.config.starting_life,
            max_players: self.config.max_players,
            players,
            winner,
        }
    }

    /// Display name of a roster member, or the id if they have left.
    fn display_name_of(&self, id: PlayerId) -> String {
        self.roster
            .get(id)
            .map_or_else(|| id.to_string(), |p| p.display_name().to_string())
    }
}

/// Commander damage from one source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageSnapshot {
    pub from: PlayerId,
    pub from_name: String,
    pub amount: i64,
}

/// One player's state at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub display_name: String,
    pub life: i64,
    /// Ordered by source id.
    pub commander_damage: Vec<DamageSnapshot>,
    /// Ordered by counter name.
    pub counters: Vec<(String, i64)>,
    pub eliminated: Option<LossReason>,
}

/// A session's state at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub channel: ChannelId,
    pub phase: Phase,
    pub starting_life: i64,
    pub max_players: usize,
    /// In join order.
    pub players: Vec<PlayerSnapshot>,
    /// Set only for an active game with one survivor.
    pub winner: Option<PlayerId>,
}

impl SessionSnapshot {
    /// Look up a player in the snapshot.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(ChannelId::new(100), GameConfig::default())
    }

    fn session_with(n: u64) -> Session {
        let mut s = session();
        for i in 1..=n {
            assert!(s.add_player(PlayerId::new(i), format!("P{}", i)));
        }
        s
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert_eq!(s.channel(), ChannelId::new(100));
        assert_eq!(s.phase(), Phase::Forming);
        assert_eq!(s.player_count(), 0);
        assert!(s.check_winner().is_none());
    }

    #[test]
    fn test_add_player_uses_starting_life() {
        let mut s = Session::new(ChannelId::new(1), GameConfig::default().with_starting_life(30));
        s.add_player(PlayerId::new(1), "Alice");
        assert_eq!(s.player(PlayerId::new(1)).unwrap().life(), 30);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut s = session_with(1);
        assert!(!s.add_player(PlayerId::new(1), "Alice again"));
        assert_eq!(s.player_count(), 1);
        assert_eq!(s.player(PlayerId::new(1)).unwrap().display_name(), "P1");
    }

    #[test]
    fn test_add_beyond_capacity_rejected() {
        let mut s = session_with(4);
        assert!(s.is_full());
        assert_eq!(
            s.try_add_player(PlayerId::new(5), "P5"),
            Err(RosterError::Full { capacity: 4 })
        );
        assert_eq!(s.player_count(), 4);
    }

    #[test]
    fn test_duplicate_reported_before_full() {
        let mut s = session_with(4);
        assert_eq!(
            s.try_add_player(PlayerId::new(2), "P2"),
            Err(RosterError::Duplicate(PlayerId::new(2)))
        );
    }

    #[test]
    fn test_add_after_begin_rejected() {
        let mut s = session_with(2);
        assert!(s.begin());
        assert_eq!(
            s.try_add_player(PlayerId::new(3), "P3"),
            Err(RosterError::Closed(Phase::Active))
        );
        assert_eq!(s.player_count(), 2);
    }

    #[test]
    fn test_remove_player() {
        let mut s = session_with(2);
        assert!(s.remove_player(PlayerId::new(1)));
        assert!(!s.remove_player(PlayerId::new(1)));
        assert_eq!(s.player_count(), 1);
        assert!(s.player(PlayerId::new(1)).is_none());
    }

    #[test]
    fn test_begin_requires_minimum() {
        let mut s = session_with(1);
        assert_eq!(
            s.try_begin(),
            Err(BeginError::NotEnoughPlayers { have: 1, need: 2 })
        );
        assert_eq!(s.phase(), Phase::Forming);

        s.add_player(PlayerId::new(2), "P2");
        assert!(s.begin());
        assert_eq!(s.phase(), Phase::Active);
    }

    #[test]
    fn test_begin_twice_rejected() {
        let mut s = session_with(2);
        assert!(s.begin());
        assert_eq!(s.try_begin(), Err(BeginError::NotForming(Phase::Active)));
        assert_eq!(s.phase(), Phase::Active);
    }

    #[test]
    fn test_end_from_any_phase() {
        let mut forming = session_with(1);
        forming.end();
        assert_eq!(forming.phase(), Phase::Ended);

        let mut active = session_with(2);
        active.begin();
        active.end();
        active.end();
        assert_eq!(active.phase(), Phase::Ended);
        assert!(!active.begin());
        assert!(!active.add_player(PlayerId::new(9), "Late"));
    }

    #[test]
    fn test_alive_players_in_join_order() {
        let mut s = session_with(4);
        s.player_mut(PlayerId::new(2)).unwrap().set_life(0);

        let alive: Vec<_> = s.alive_players().iter().map(|p| p.id()).collect();
        assert_eq!(alive, vec![PlayerId::new(1), PlayerId::new(3), PlayerId::new(4)]);
    }

    #[test]
    fn test_check_winner() {
        let mut s = session_with(3);
        s.begin();
        assert!(s.check_winner().is_none());

        s.player_mut(PlayerId::new(1)).unwrap().set_life(0);
        s.player_mut(PlayerId::new(3)).unwrap().set_life(0);
        s.player_mut(PlayerId::new(2)).unwrap().set_life(10);

        assert_eq!(s.check_winner().unwrap().id(), PlayerId::new(2));
        assert_eq!(s.outcome(), Some(GameResult::Winner(PlayerId::new(2))));
    }

    #[test]
    fn test_no_winner_when_all_dead() {
        let mut s = session_with(2);
        s.begin();
        for id in [1, 2] {
            s.player_mut(PlayerId::new(id)).unwrap().set_life(0);
        }
        assert!(s.check_winner().is_none());
        assert_eq!(s.outcome(), Some(GameResult::NoSurvivors));
    }

    #[test]
    fn test_outcome_only_when_active() {
        let s = session_with(1);
        assert!(s.check_winner().is_some());
        assert_eq!(s.outcome(), None);
    }

    #[test]
    fn test_snapshot() {
        let mut s = session_with(2);
        s.begin();
        {
            let p1 = s.player_mut(PlayerId::new(1)).unwrap();
            p1.add_commander_damage(PlayerId::new(2), 21);
            p1.add_counter("poison", 3);
        }

        let snap = s.snapshot();
        assert_eq!(snap.phase, Phase::Active);
        assert_eq!(snap.players.len(), 2);
        assert_eq!(snap.winner, Some(PlayerId::new(2)));

        let p1 = snap.player(PlayerId::new(1)).unwrap();
        assert_eq!(p1.commander_damage[0].from_name, "P2");
        assert_eq!(p1.commander_damage[0].amount, 21);
        assert_eq!(p1.counters, vec![("poison".to_string(), 3)]);
        assert!(matches!(p1.eliminated, Some(LossReason::CommanderDamage { .. })));
    }

    #[test]
    fn test_snapshot_names_departed_source_by_id() {
        let mut s = session_with(3);
        s.player_mut(PlayerId::new(1))
            .unwrap()
            .add_commander_damage(PlayerId::new(3), 5);
        s.remove_player(PlayerId::new(3));

        let snap = s.snapshot();
        let p1 = snap.player(PlayerId::new(1)).unwrap();
        assert_eq!(p1.commander_damage[0].from_name, "Player 3");
    }

    #[test]
    fn test_snapshot_serialization() {
        let s = session_with(2);
        let snap = s.snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let deserialized: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, deserialized);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Forming.to_string(), "forming");
        assert_eq!(Phase::Active.to_string(), "active");
        assert_eq!(Phase::Ended.to_string(), "ended");
    }
}
