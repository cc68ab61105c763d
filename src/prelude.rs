//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use marriage_scorepad::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Scoreboard**: [`Scoreboard`], [`ScoreboardBuilder`], [`ScoreboardConfig`]
//! - **Game types**: [`Player`], [`PlayerId`], [`Round`], [`RoundTarget`], [`RoundOutcome`]
//! - **Storage**: [`KeyValueStore`], [`MemoryStore`], [`FileStore`]
//! - **Localization**: [`Language`], [`MessageKey`]
//! - **Rendering**: [`ScoreboardView`]
//! - **Error handling**: [`ScoreError`], [`ScoreResult`]
//!
//! # Example
//!
//! ```rust
//! use marriage_scorepad::prelude::*;
//!
//! let mut board = ScoreboardBuilder::new()
//!     .with_config(ScoreboardConfig::heads_up())
//!     .open(MemoryStore::new())?;
//!
//! let outcome = board.record_round(&["20", "-20"], RoundTarget::New)?;
//! assert_eq!(outcome, RoundOutcome::Appended(0));
//! assert_eq!(board.label(MessageKey::AddRound), "Add Round");
//! # Ok::<(), ScoreError>(())
//! ```

// Store
pub use crate::{Scoreboard, ScoreboardBuilder, ScoreboardConfig};

// Game types
pub use crate::{Player, PlayerId, Round, RoundOutcome, RoundTarget};

// Storage
pub use crate::{FileStore, KeyValueStore, MemoryStore};

// Localization
pub use crate::{Language, MessageKey};

// Rendering
pub use crate::ScoreboardView;

// Error handling
pub use crate::{ScoreError, ScoreResult};
