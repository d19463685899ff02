//! Session registry.
//!
//! The `SessionRegistry` owns every live session, keyed by channel.
//! Sessions are created on first use and deleted explicitly when a game
//! ends. There is no eviction.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use super::game::Session;
use crate::core::{ChannelId, GameConfig};
use crate::error::ConfigError;

/// Owned map from channel to its session.
///
/// ## Example
///
/// ```
/// use commander_tracker::core::{ChannelId, GameConfig, PlayerId};
/// use commander_tracker::session::SessionRegistry;
///
/// let mut registry = SessionRegistry::new(GameConfig::default()).unwrap();
/// let channel = ChannelId::new(7);
///
/// registry.get_or_create(channel).add_player(PlayerId::new(1), "Alice");
/// assert_eq!(registry.get(channel).unwrap().player_count(), 1);
///
/// registry.remove(channel);
/// assert!(registry.get(channel).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SessionRegistry {
    config: GameConfig,
    sessions: FxHashMap<ChannelId, Session>,
}

impl SessionRegistry {
    /// Create an empty registry. New sessions copy `config`, which must
    /// pass [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            sessions: FxHashMap::default(),
        })
    }

    /// A fresh forming session for `channel`, not yet registered.
    #[must_use]
    pub fn new_session(&self, channel: ChannelId) -> Session {
        Session::new(channel, self.config.clone())
    }

    /// Configuration given to new sessions.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get the session for a channel.
    #[must_use]
    pub fn get(&self, channel: ChannelId) -> Option<&Session> {
        self.sessions.get(&channel)
    }

    /// Get the mutable session for a channel.
    pub fn get_mut(&mut self, channel: ChannelId) -> Option<&mut Session> {
        self.sessions.get_mut(&channel)
    }

    /// Get the session for a channel, creating a forming one if absent.
    pub fn get_or_create(&mut self, channel: ChannelId) -> &mut Session {
        let config = &self.config;
        self.sessions.entry(channel).or_insert_with(|| {
            tracing::debug!(channel = %channel, "session created");
            Session::new(channel, config.clone())
        })
    }

    /// Register `session` under its channel, discarding any previous one.
    pub fn replace(&mut self, session: Session) -> &mut Session {
        let channel = session.channel();
        match self.sessions.entry(channel) {
            Entry::Occupied(mut entry) => {
                tracing::debug!(channel = %channel, "session replaced");
                entry.insert(session);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                tracing::debug!(channel = %channel, "session created");
                entry.insert(session)
            }
        }
    }

    /// Delete the session for a channel, returning it.
    pub fn remove(&mut self, channel: ChannelId) -> Option<Session> {
        let removed = self.sessions.remove(&channel);
        if removed.is_some() {
            tracing::debug!(channel = %channel, "session removed");
        }
        removed
    }

    /// Check if a channel has a session.
    #[must_use]
    pub fn contains(&self, channel: ChannelId) -> bool {
        self.sessions.contains_key(&channel)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Iterate over channels with a session.
    pub fn channels(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.sessions.keys().copied()
    }
}
