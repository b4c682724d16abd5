//! Game configuration.
//!
//! `GameConfig` fixes the table size and pacing before setup. Every field
//! has a default, so a JSON config only needs the fields it changes:
//!
//! ```
//! use terra_futura::core::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{ "player_count": 3, "seed": 11 }"#).unwrap();
//! assert_eq!(config.player_count, 3);
//! assert_eq!(config.turns_per_player, 9);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Table size and pacing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seats at the table, 2 to 5.
    pub player_count: usize,
    /// Regular turns each player takes before the final activation.
    pub turns_per_player: u32,
    /// Face-up cards each pile exposes.
    pub visible_cards: usize,
    /// Seed for pile shuffling.
    pub seed: u64,
}

impl GameConfig {
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = 5;

    /// Create a config for `player_count` players with default pacing.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set the number of regular turns per player.
    #[must_use]
    pub fn with_turns_per_player(mut self, turns: u32) -> Self {
        self.turns_per_player = turns;
        self
    }

    /// Set the number of face-up cards per pile.
    #[must_use]
    pub fn with_visible_cards(mut self, visible: usize) -> Self {
        self.visible_cards = visible;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Regular turns in the whole game.
    #[must_use]
    pub fn total_turns(&self) -> u32 {
        self.turns_per_player * self.player_count as u32
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.turns_per_player == 0 {
            return Err(ConfigError::ZeroTurns);
        }
        if self.visible_cards == 0 {
            return Err(ConfigError::ZeroVisibleCards);
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            turns_per_player: 9,
            visible_cards: 4,
            seed: 0,
        }
    }
}
