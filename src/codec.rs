//! JSON codec for the persisted game state.
//!
//! Every value the scoreboard writes to its [`KeyValueStore`] goes through this
//! module, so the stored schema lives in one place:
//!
//! - players: `[{"id":1,"name":"Player 1","score":0,"default_name":true}, ...]`
//! - history: `[{"scores":[10,-5,0]}, ...]`
//! - next id: a bare decimal number
//!
//! Player records written by older versions have no `default_name` field; they
//! decode with [`StoredPlayer::default_name`] set to `None` and the scoreboard
//! infers the flag on load.
//!
//! # Examples
//!
//! ```
//! use marriage_scorepad::codec::{decode_history, encode_history};
//! use marriage_scorepad::Round;
//!
//! let rounds = vec![Round::from_scores([10, -5, 0])];
//! let text = encode_history(&rounds).expect("encoding should succeed");
//! assert_eq!(text, r#"[{"scores":[10,-5,0]}]"#);
//!
//! let decoded = decode_history(&text).expect("decoding should succeed");
//! assert_eq!(decoded, rounds);
//! ```
//!
//! [`KeyValueStore`]: crate::storage::KeyValueStore

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

use crate::{Player, PlayerId, Round};

/// Which part of the stored state a codec error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StateSection {
    /// The player roster.
    Players,
    /// The round history.
    History,
    /// The next player id counter.
    NextId,
}

impl fmt::Display for StateSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Players => write!(f, "player list"),
            Self::History => write!(f, "round history"),
            Self::NextId => write!(f, "next player id"),
        }
    }
}

/// Errors that can occur during encoding or decoding.
///
/// The message is a `String` because `serde_json` errors only carry a
/// human-readable description (with line and column) through `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecError {
    /// The encoding operation failed.
    EncodeError {
        /// The underlying serde_json error message.
        message: String,
        /// The section being encoded.
        section: StateSection,
    },
    /// The decoding operation failed.
    DecodeError {
        /// The underlying serde_json error message.
        message: String,
        /// The section being decoded.
        section: StateSection,
    },
}

impl CodecError {
    /// Creates a new encode error with the given message and section.
    pub fn encode(message: impl Into<String>, section: StateSection) -> Self {
        Self::EncodeError {
            message: message.into(),
            section,
        }
    }

    /// Creates a new decode error with the given message and section.
    pub fn decode(message: impl Into<String>, section: StateSection) -> Self {
        Self::DecodeError {
            message: message.into(),
            section,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncodeError { message, section } => {
                write!(f, "encoding {section} failed: {message}")
            },
            Self::DecodeError { message, section } => {
                write!(f, "decoding {section} failed: {message}")
            },
        }
    }
}

impl std::error::Error for CodecError {}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// A player record as it appears in storage.
///
/// `default_name` is optional so that rosters saved before the flag existed
/// still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPlayer {
    /// Stable player id.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Total score at the time of saving. Recomputed from history on load.
    pub score: i32,
    /// Whether the name is a system default; `None` for legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_name: Option<bool>,
}

impl From<&Player> for StoredPlayer {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            score: player.score,
            default_name: Some(player.default_name),
        }
    }
}

/// Encodes any serializable value to a JSON string.
pub fn encode<T: Serialize + ?Sized>(value: &T, section: StateSection) -> CodecResult<String> {
    serde_json::to_string(value).map_err(|e| CodecError::encode(e.to_string(), section))
}

/// Decodes a JSON string into a value.
pub fn decode<T: DeserializeOwned>(text: &str, section: StateSection) -> CodecResult<T> {
    serde_json::from_str(text).map_err(|e| CodecError::decode(e.to_string(), section))
}

/// Encodes the roster in the stored player schema.
pub fn encode_players(players: &[Player]) -> CodecResult<String> {
    let records: Vec<StoredPlayer> = players.iter().map(StoredPlayer::from).collect();
    encode(&records, StateSection::Players)
}

/// Decodes a stored roster.
pub fn decode_players(text: &str) -> CodecResult<Vec<StoredPlayer>> {
    decode(text, StateSection::Players)
}

/// Encodes the round history.
pub fn encode_history(rounds: &[Round]) -> CodecResult<String> {
    encode(rounds, StateSection::History)
}

/// Decodes a stored round history.
pub fn decode_history(text: &str) -> CodecResult<Vec<Round>> {
    decode(text, StateSection::History)
}

/// Encodes the next player id counter.
pub fn encode_next_id(next_id: PlayerId) -> CodecResult<String> {
    encode(&next_id, StateSection::NextId)
}

/// Decodes the next player id counter.
pub fn decode_next_id(text: &str) -> CodecResult<PlayerId> {
    decode(text.trim(), StateSection::NextId)
}
