//! Game configuration.
//!
//! Sessions read their starting life and roster bounds from a
//! `GameConfig` supplied at construction. Hosts usually build it with
//! `GameConfig::default()` plus `with_*` setters, or load it from TOML:
//!
//! ```toml
//! starting_life = 40
//! max_players = 4
//! min_players = 2
//! ```
//!
//! The lethal thresholds are fixed and live in [`crate::rules::lethal`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Commander starting life total.
pub const DEFAULT_STARTING_LIFE: i64 = 40;

/// Default roster capacity.
pub const DEFAULT_MAX_PLAYERS: usize = 4;

/// Default roster size needed to begin.
pub const DEFAULT_MIN_PLAYERS: usize = 2;

/// Per-session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Life total every player joins with.
    pub starting_life: i64,

    /// Roster capacity. `add_player` fails once reached.
    pub max_players: usize,

    /// Minimum roster size for `begin` to succeed.
    pub min_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_life: DEFAULT_STARTING_LIFE,
            max_players: DEFAULT_MAX_PLAYERS,
            min_players: DEFAULT_MIN_PLAYERS,
        }
    }
}

impl GameConfig {
    /// Set the starting life total.
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the roster capacity.
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    /// Set the minimum roster size to begin.
    #[must_use]
    pub fn with_min_players(mut self, min: usize) -> Self {
        self.min_players = min;
        self
    }

    /// Check roster bounds: `1 <= min_players <= max_players`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players == 0 {
            return Err(ConfigError::Invalid("min_players must be at least 1".to_string()));
        }
        if self.min_players > self.max_players {
            return Err(ConfigError::Invalid(format!(
                "min_players ({}) exceeds max_players ({})",
                self.min_players, self.max_players
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), ?config, "loaded game config");
        Ok(config)
    }
}
