//! Configuration types for a [`Scoreboard`](crate::Scoreboard).
//!
//! | Config Type | Purpose | Key Presets |
//! |-------------|---------|-------------|
//! | `ScoreboardConfig` | Roster limits, rounding, default language | `classic()`, `heads_up()`, `unrounded()` |
//! | `StorageKeys` | Key names in the key-value store | `with_prefix()` |
//!
//! # Example
//!
//! ```
//! use marriage_scorepad::{Language, MemoryStore, ScoreboardBuilder, ScoreboardConfig};
//!
//! let board = ScoreboardBuilder::new()
//!     .with_config(ScoreboardConfig {
//!         default_language: Language::Es,
//!         ..ScoreboardConfig::heads_up()
//!     })
//!     .open(MemoryStore::new())
//!     .expect("default config is valid");
//!
//! assert_eq!(board.players().len(), 2);
//! assert_eq!(board.players()[0].name, "Jugador 1");
//! ```

use crate::i18n::Language;
use crate::scoring::DEFAULT_SCORE_STEP;
use crate::{InvalidRequestKind, ScoreError};

/// Prefix of every storage key unless configured otherwise.
pub const DEFAULT_KEY_PREFIX: &str = "mariage";

/// Names of the keys the scoreboard reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKeys {
    /// Serialized roster.
    pub players: String,
    /// Serialized round history.
    pub history: String,
    /// Language code.
    pub language: String,
    /// Next player id counter.
    pub next_id: String,
}

impl StorageKeys {
    /// Derives all keys from a common prefix: `{prefix}_players`, `{prefix}_history`,
    /// `{prefix}_lang` and `{prefix}_next_id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use marriage_scorepad::StorageKeys;
    ///
    /// let keys = StorageKeys::with_prefix("table2");
    /// assert_eq!(keys.players, "table2_players");
    /// assert_eq!(keys.language, "table2_lang");
    /// ```
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            players: format!("{prefix}_players"),
            history: format!("{prefix}_history"),
            language: format!("{prefix}_lang"),
            next_id: format!("{prefix}_next_id"),
        }
    }

    /// All keys, in write order.
    #[must_use]
    pub fn all(&self) -> [&str; 4] {
        [&self.players, &self.history, &self.language, &self.next_id]
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }
}

/// Tunables of a scoreboard.
///
/// # Forward Compatibility
///
/// New fields may be added to this struct in future versions. Construct
/// instances with `..ScoreboardConfig::default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "ScoreboardConfig has no effect unless passed to ScoreboardBuilder::with_config()"]
pub struct ScoreboardConfig {
    /// Fewest players the roster may shrink to via `remove_player`.
    ///
    /// Default: 2
    pub min_players: usize,

    /// Number of players in a freshly created roster.
    ///
    /// Default: 3
    pub default_roster_size: usize,

    /// Every recorded delta is rounded to a multiple of this.
    ///
    /// Default: 5
    pub score_step: i32,

    /// Language used when storage holds no (valid) language preference.
    ///
    /// Default: [`Language::En`]
    pub default_language: Language,

    /// Key names in the backing store.
    ///
    /// Default: `mariage_*`
    pub storage_keys: StorageKeys,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            default_roster_size: 3,
            score_step: DEFAULT_SCORE_STEP,
            default_language: Language::En,
            storage_keys: StorageKeys::default(),
        }
    }
}

impl ScoreboardConfig {
    /// Creates a new `ScoreboardConfig` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// The usual three-handed table, same as the defaults.
    pub fn classic() -> Self {
        Self::default()
    }

    /// A two-player table.
    pub fn heads_up() -> Self {
        Self {
            default_roster_size: 2,
            ..Self::default()
        }
    }

    /// Records deltas exactly as entered.
    pub fn unrounded() -> Self {
        Self {
            score_step: 1,
            ..Self::default()
        }
    }

    /// Checks that the values are usable together.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestKind::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.min_players == 0 {
            return Err(InvalidRequestKind::InvalidConfig {
                field: "min_players",
                reason: "must be at least 1".to_owned(),
            }
            .into());
        }
        if self.default_roster_size < self.min_players {
            return Err(InvalidRequestKind::InvalidConfig {
                field: "default_roster_size",
                reason: format!(
                    "{} is below min_players ({})",
                    self.default_roster_size, self.min_players
                ),
            }
            .into());
        }
        if self.score_step < 1 {
            return Err(InvalidRequestKind::InvalidConfig {
                field: "score_step",
                reason: format!("{} is not positive", self.score_step),
            }
            .into());
        }
        let keys = self.storage_keys.all();
        if keys.iter().any(|k| k.is_empty()) {
            return Err(InvalidRequestKind::InvalidConfig {
                field: "storage_keys",
                reason: "keys must not be empty".to_owned(),
            }
            .into());
        }
        for (i, key) in keys.iter().enumerate() {
            if keys[i + 1..].contains(key) {
                return Err(InvalidRequestKind::InvalidConfig {
                    field: "storage_keys",
                    reason: format!("key '{key}' is used twice"),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ScoreboardConfig::default();
        assert_eq!(config.min_players, 2);
        assert_eq!(config.default_roster_size, 3);
        assert_eq!(config.score_step, 5);
        assert_eq!(config.default_language, Language::En);
        assert_eq!(config.storage_keys.players, "mariage_players");
        assert_eq!(config.storage_keys.history, "mariage_history");
        assert_eq!(config.storage_keys.language, "mariage_lang");
        assert_eq!(config.storage_keys.next_id, "mariage_next_id");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        for config in [
            ScoreboardConfig::new(),
            ScoreboardConfig::classic(),
            ScoreboardConfig::heads_up(),
            ScoreboardConfig::unrounded(),
        ] {
            assert!(config.validate().is_ok(), "{config:?}");
        }
        assert_eq!(ScoreboardConfig::heads_up().default_roster_size, 2);
        assert_eq!(ScoreboardConfig::unrounded().score_step, 1);
    }

    #[test]
    fn test_roster_below_minimum_is_rejected() {
        let config = ScoreboardConfig {
            default_roster_size: 1,
            ..ScoreboardConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ScoreError::InvalidRequest(InvalidRequestKind::InvalidConfig {
                field: "default_roster_size",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_min_players_is_rejected() {
        let config = ScoreboardConfig {
            min_players: 0,
            ..ScoreboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_step_is_rejected() {
        let config = ScoreboardConfig {
            score_step: 0,
            ..ScoreboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let mut keys = StorageKeys::default();
        keys.history = keys.players.clone();
        let config = ScoreboardConfig {
            storage_keys: keys,
            ..ScoreboardConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("used twice"));
    }
}
