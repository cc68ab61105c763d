//! # Marriage Scorepad
//!
//! Score keeping for the card game Marriage (Марьяж): a roster of players, a
//! history of rounds where each round gives every player a score delta, and
//! running totals derived from that history.
//!
//! The state lives in a [`Scoreboard`], which persists a full snapshot to a
//! [`KeyValueStore`] after every change and reloads it on the next
//! [`open`](ScoreboardBuilder::open). Labels and default player names come in
//! English, Russian and Spanish.
//!
//! ```
//! use marriage_scorepad::prelude::*;
//!
//! let mut board = ScoreboardBuilder::new().open(MemoryStore::new())?;
//!
//! // Form input is coerced and rounded to the nearest multiple of five.
//! board.record_round(&["12", "-7", ""], RoundTarget::New)?;
//! board.record_round(&["10", "10", "-15"], RoundTarget::New)?;
//! assert_eq!(board.leaders(), vec![0]);
//!
//! // Fix a typo in the first round.
//! board.record_round(&["5", "-5", "0"], RoundTarget::Edit(0))?;
//! let totals: Vec<i32> = board.players().iter().map(|p| p.score).collect();
//! assert_eq!(totals, vec![15, 5, -15]);
//!
//! // Reloading from the same store restores the game.
//! let board = Scoreboard::open(board.into_store())?;
//! assert_eq!(board.rounds().len(), 2);
//! # Ok::<(), ScoreError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub use codec::{CodecError, StateSection, StoredPlayer};
pub use config::{ScoreboardConfig, StorageKeys, DEFAULT_KEY_PREFIX};
pub use error::{InvalidRequestKind, ScoreError, StorageOperation};
pub use i18n::{Language, MessageKey};
pub use model::{GameState, Player, Round, RoundOutcome, RoundTarget, ScoreVec};
pub use scoreboard::{Scoreboard, ScoreboardBuilder};
pub use scoring::{ScoreInput, Trend, DEFAULT_SCORE_STEP};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use view::{HistoryCell, HistoryRow, PlayerCard, ScoreboardView};

pub mod telemetry;

pub mod codec;
pub mod config;
#[doc(hidden)]
pub mod error;
pub mod i18n;
pub mod model;
pub mod prelude;
mod scoreboard;
pub mod scoring;
pub mod storage;
pub mod view;

/// A result type alias for scoreboard operations.
pub type ScoreResult<T> = Result<T, ScoreError>;

// #############
// # PLAYER ID #
// #############

/// A stable identifier for a player.
///
/// Ids start at `1`, increase by one for every added player and are never
/// handed out twice, even after the player holding one is removed. Roster
/// order, not the id, decides which column of a round belongs to a player.
///
/// Serializes as a bare number.
///
/// # Examples
///
/// ```
/// use marriage_scorepad::PlayerId;
///
/// let id = PlayerId::new(3);
/// assert_eq!(id.as_u32(), 3);
/// assert_eq!(id.next(), PlayerId::new(4));
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a `PlayerId` from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        PlayerId(id)
    }

    /// Returns the underlying value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The id after this one. Saturates at `u32::MAX`.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        PlayerId(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlayerId {
    #[inline]
    fn from(value: u32) -> Self {
        PlayerId(value)
    }
}

impl From<PlayerId> for u32 {
    #[inline]
    fn from(id: PlayerId) -> Self {
        id.0
    }
}
