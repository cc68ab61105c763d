//! The in-memory game state and its structural operations.
//!
//! [`GameState`] knows nothing about storage or telemetry. Every method keeps
//! two invariants:
//!
//! - every round has exactly one delta per player, and
//! - every player's score is the column total of the history.
//!
//! The [`Scoreboard`](crate::Scoreboard) wraps these methods with persistence.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::InvalidRequestKind;
use crate::i18n::Language;
use crate::scoring::column_totals;
use crate::telemetry::{InvariantChecker, InvariantViolation};
use crate::{PlayerId, ScoreError, ScoreResult};

/// Per-round score deltas, one per player. Stored inline for tables of up to four.
pub type ScoreVec = SmallVec<[i32; 4]>;

/// A player on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    /// Stable id, never reused after the player is removed.
    pub id: PlayerId,
    /// Display name, stored verbatim.
    pub name: String,
    /// Running total, derived from the round history.
    pub score: i32,
    /// `true` while the name is a system default that follows the language.
    pub default_name: bool,
}

impl Player {
    /// Creates a player with a zero score.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, default_name: bool) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            default_name,
        }
    }
}

/// One scoring event: a delta for every player, in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Round {
    /// The deltas, positionally aligned with the roster.
    pub scores: ScoreVec,
}

impl Round {
    /// Builds a round from any sequence of deltas.
    pub fn from_scores(scores: impl IntoIterator<Item = i32>) -> Self {
        Self {
            scores: scores.into_iter().collect(),
        }
    }

    /// Number of deltas in the round.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` if the round holds no deltas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Where [`record_round`](crate::Scoreboard::record_round) puts the new deltas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RoundTarget {
    /// Append a new round.
    #[default]
    New,
    /// Replace the round at this index.
    Edit(usize),
}

impl RoundTarget {
    /// Maps the form's edit selector to a target: negative means a new round.
    #[must_use]
    pub fn from_edit_index(index: isize) -> Self {
        usize::try_from(index).map_or(Self::New, Self::Edit)
    }
}

/// What a call to [`record_round`](crate::Scoreboard::record_round) did.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// Appended as the round at this index.
    Appended(usize),
    /// Replaced the round at this index.
    Replaced(usize),
    /// Every field was empty; nothing was recorded.
    Skipped,
}

/// Roster plus round history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) players: Vec<Player>,
    pub(crate) rounds: Vec<Round>,
    pub(crate) next_id: PlayerId,
}

impl GameState {
    /// A fresh game with `size` default-named players and no history.
    #[must_use]
    pub fn with_default_roster(size: usize, language: Language) -> Self {
        let players: Vec<Player> = (0..size)
            .map(|i| {
                Player::new(
                    PlayerId::new(i as u32 + 1),
                    language.default_player_name(i),
                    true,
                )
            })
            .collect();
        Self {
            next_id: PlayerId::new(size as u32 + 1),
            players,
            rounds: Vec::new(),
        }
    }

    /// Builds a state from loaded parts and recomputes the totals.
    ///
    /// The caller is responsible for having validated round lengths.
    #[must_use]
    pub(crate) fn from_parts(players: Vec<Player>, rounds: Vec<Round>, next_id: PlayerId) -> Self {
        let mut state = Self {
            players,
            rounds,
            next_id,
        };
        state.recalculate_scores();
        state
    }

    /// The roster, in table order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The round history, oldest first.
    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// The id the next added player will receive.
    #[must_use]
    pub const fn next_id(&self) -> PlayerId {
        self.next_id
    }

    /// Current totals in roster order.
    #[must_use]
    pub fn scores(&self) -> Vec<i32> {
        self.players.iter().map(|p| p.score).collect()
    }

    /// Appends a default-named player and pads every round with a `0` delta.
    ///
    /// Fails with [`ScoreError::CorruptState`] once the id counter is at `u32::MAX`.
    pub fn add_player(&mut self, language: Language) -> ScoreResult<PlayerId> {
        let id = self.next_id;
        if id.as_u32() == u32::MAX {
            return Err(ScoreError::CorruptState {
                reason: "player id counter exhausted".to_owned(),
            });
        }
        self.next_id = id.next();
        let name = language.default_player_name(self.players.len());
        self.players.push(Player::new(id, name, true));
        for round in &mut self.rounds {
            round.scores.push(0);
        }
        Ok(id)
    }

    /// Removes the player at `index` and its column from every round.
    pub fn remove_player(&mut self, index: usize, min_players: usize) -> ScoreResult<Player> {
        self.check_player_index(index)?;
        if self.players.len() <= min_players {
            return Err(InvalidRequestKind::TooFewPlayers {
                min: min_players,
                current: self.players.len(),
            }
            .into());
        }
        let removed = self.players.remove(index);
        for round in &mut self.rounds {
            if index < round.scores.len() {
                round.scores.remove(index);
            }
        }
        self.recalculate_scores();
        Ok(removed)
    }

    /// Sets a player's name as typed and clears the default-name flag.
    pub fn rename_player(&mut self, index: usize, name: impl Into<String>) -> ScoreResult<()> {
        self.check_player_index(index)?;
        let player = &mut self.players[index];
        player.name = name.into();
        player.default_name = false;
        Ok(())
    }

    /// Appends or replaces a round of already-rounded deltas.
    pub fn record_round(&mut self, scores: ScoreVec, target: RoundTarget) -> ScoreResult<RoundOutcome> {
        if scores.len() != self.players.len() {
            return Err(InvalidRequestKind::RoundLengthMismatch {
                expected: self.players.len(),
                actual: scores.len(),
            }
            .into());
        }
        let outcome = match target {
            RoundTarget::New => {
                self.rounds.push(Round { scores });
                RoundOutcome::Appended(self.rounds.len() - 1)
            },
            RoundTarget::Edit(index) => {
                self.check_round_index(index)?;
                self.rounds[index] = Round { scores };
                RoundOutcome::Replaced(index)
            },
        };
        self.recalculate_scores();
        Ok(outcome)
    }

    /// Removes the round at `index`.
    pub fn delete_round(&mut self, index: usize) -> ScoreResult<Round> {
        self.check_round_index(index)?;
        let removed = self.rounds.remove(index);
        self.recalculate_scores();
        Ok(removed)
    }

    /// Sets every player's score to its column total.
    pub fn recalculate_scores(&mut self) {
        let totals = column_totals(self.players.len(), &self.rounds);
        for (player, total) in self.players.iter_mut().zip(totals) {
            player.score = total;
        }
    }

    /// Clears the history, zeroes all scores and restores default names.
    pub fn reset(&mut self, language: Language) {
        self.rounds.clear();
        for (i, player) in self.players.iter_mut().enumerate() {
            player.score = 0;
            player.name = language.default_player_name(i);
            player.default_name = true;
        }
    }

    /// Renames every default-named player for `language`. Returns how many names changed.
    pub fn relabel_default_names(&mut self, language: Language) -> usize {
        let mut changed = 0;
        for (i, player) in self.players.iter_mut().enumerate() {
            if !player.default_name {
                continue;
            }
            let name = language.default_player_name(i);
            if player.name != name {
                player.name = name;
                changed += 1;
            }
        }
        changed
    }

    pub(crate) fn check_player_index(&self, index: usize) -> ScoreResult<()> {
        if index < self.players.len() {
            Ok(())
        } else {
            Err(InvalidRequestKind::PlayerIndexOutOfRange {
                index,
                len: self.players.len(),
            }
            .into())
        }
    }

    pub(crate) fn check_round_index(&self, index: usize) -> ScoreResult<()> {
        if index < self.rounds.len() {
            Ok(())
        } else {
            Err(InvalidRequestKind::RoundIndexOutOfRange {
                index,
                len: self.rounds.len(),
            }
            .into())
        }
    }
}

impl InvariantChecker for GameState {
    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let player_count = self.players.len();
        if let Some((i, round)) = self
            .rounds
            .iter()
            .enumerate()
            .find(|(_, round)| round.len() != player_count)
        {
            return Err(InvariantViolation::new("GameState", "round length differs from roster")
                .with_details(format!(
                    "round={}, len={}, players={}",
                    i,
                    round.len(),
                    player_count
                )));
        }

        let totals = column_totals(player_count, &self.rounds);
        if let Some((i, player)) = self
            .players
            .iter()
            .enumerate()
            .find(|(i, player)| player.score != totals[*i])
        {
            return Err(InvariantViolation::new("GameState", "score differs from history total")
                .with_details(format!(
                    "player={}, score={}, total={}",
                    i, player.score, totals[i]
                )));
        }

        let mut ids: Vec<PlayerId> = self.players.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(InvariantViolation::new("GameState", "duplicate player id"));
        }
        if let Some(max) = ids.last() {
            if *max >= self.next_id {
                return Err(InvariantViolation::new("GameState", "player id not below next id")
                    .with_details(format!("max_id={}, next_id={}", max, self.next_id)));
            }
        }
        Ok(())
    }
}
