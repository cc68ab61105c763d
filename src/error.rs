use std::error::Error;
use std::fmt;
use std::fmt::Display;

use crate::codec::CodecError;

/// This enum contains all error messages this library can return. Most API functions will generally return a [`ScoreResult<T>`].
///
/// [`ScoreResult<T>`]: crate::ScoreResult
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScoreError {
    /// You made an invalid request, usually by passing an index that does not
    /// match the current roster or history.
    InvalidRequest(InvalidRequestKind),
    /// The key-value storage collaborator failed to read or write a key.
    Storage {
        /// The storage key that was being accessed.
        key: String,
        /// Which storage operation failed.
        operation: StorageOperation,
        /// A description of the underlying failure.
        context: String,
    },
    /// Stored data could not be encoded or decoded.
    Codec(CodecError),
    /// Stored data decoded fine but breaks a game invariant, e.g. a round
    /// whose score vector does not match the roster length.
    CorruptState {
        /// What was wrong with the stored data.
        reason: String,
    },
}

/// Storage operation that failed, see [`ScoreError::Storage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOperation {
    /// Reading a key.
    Get,
    /// Writing a key.
    Set,
    /// Deleting a key.
    Remove,
}

impl Display for StorageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("get"),
            Self::Set => f.write_str("set"),
            Self::Remove => f.write_str("remove"),
        }
    }
}

/// The reasons a request can be rejected before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum InvalidRequestKind {
    /// A player index was not below the roster length.
    PlayerIndexOutOfRange {
        /// The index that was passed.
        index: usize,
        /// The current number of players.
        len: usize,
    },
    /// A round index was not below the history length.
    RoundIndexOutOfRange {
        /// The index that was passed.
        index: usize,
        /// The current number of rounds.
        len: usize,
    },
    /// A round was submitted with a different number of entries than there are players.
    RoundLengthMismatch {
        /// The current number of players.
        expected: usize,
        /// The number of entries submitted.
        actual: usize,
    },
    /// Removing a player would drop the roster below the configured minimum.
    TooFewPlayers {
        /// The configured minimum roster size.
        min: usize,
        /// The roster size before the removal.
        current: usize,
    },
    /// A language code that is not in the translation table.
    UnknownLanguage {
        /// The rejected code.
        code: String,
    },
    /// A configuration value is outside its allowed range.
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl Display for InvalidRequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerIndexOutOfRange { index, len } => {
                write!(f, "player index {} out of range for {} players", index, len)
            },
            Self::RoundIndexOutOfRange { index, len } => {
                write!(f, "round index {} out of range for {} rounds", index, len)
            },
            Self::RoundLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "round has {} entries but the roster has {} players",
                    actual, expected
                )
            },
            Self::TooFewPlayers { min, current } => {
                write!(
                    f,
                    "cannot remove a player: {} remain and at least {} are required",
                    current, min
                )
            },
            Self::UnknownLanguage { code } => {
                write!(f, "unknown language code '{}'", code)
            },
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid configuration for {}: {}", field, reason)
            },
        }
    }
}

impl Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::InvalidRequest(kind) => {
                write!(f, "Invalid Request: {}", kind)
            },
            ScoreError::Storage {
                key,
                operation,
                context,
            } => {
                write!(f, "Storage error ({} '{}'): {}", operation, key, context)
            },
            ScoreError::Codec(err) => {
                write!(f, "Codec error: {}", err)
            },
            ScoreError::CorruptState { reason } => {
                write!(f, "Stored game state is corrupt: {}", reason)
            },
        }
    }
}

impl Error for ScoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ScoreError::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidRequestKind> for ScoreError {
    fn from(kind: InvalidRequestKind) -> Self {
        ScoreError::InvalidRequest(kind)
    }
}

impl From<CodecError> for ScoreError {
    fn from(err: CodecError) -> Self {
        ScoreError::Codec(err)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::codec::StateSection;

    #[test]
    fn test_invalid_request_display() {
        let err: ScoreError = InvalidRequestKind::PlayerIndexOutOfRange { index: 4, len: 3 }.into();
        assert_eq!(
            err.to_string(),
            "Invalid Request: player index 4 out of range for 3 players"
        );
    }

    #[test]
    fn test_too_few_players_display() {
        let err = ScoreError::from(InvalidRequestKind::TooFewPlayers { min: 2, current: 2 });
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_storage_display_names_key_and_operation() {
        let err = ScoreError::Storage {
            key: "mariage_players".to_owned(),
            operation: StorageOperation::Set,
            context: "disk full".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Storage error (set 'mariage_players'): disk full"
        );
    }

    #[test]
    fn test_codec_error_is_source() {
        let err = ScoreError::from(CodecError::decode("expected value", StateSection::History));
        assert!(err.source().is_some());
    }
}
