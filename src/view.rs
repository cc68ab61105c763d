//! Read-only view models for a presentation layer.
//!
//! A [`ScoreboardView`] is a snapshot: building one copies what a renderer
//! needs (names, totals, leader flags, history rows newest first) so the
//! renderer never has to reach back into the scoreboard.

use crate::i18n::{Language, MessageKey};
use crate::model::GameState;
use crate::scoring::{leaders, Trend};
use crate::PlayerId;

/// One player's card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCard {
    /// Roster index.
    pub index: usize,
    /// Stable id.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Running total.
    pub score: i32,
    /// Holds the best nonzero total (ties share the crown).
    pub leader: bool,
    /// Whether the remove control should be enabled.
    pub removable: bool,
}

/// One delta in a history row.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HistoryCell {
    /// The delta as recorded.
    pub delta: i32,
    /// Direction of the delta, for the arrow next to it.
    pub trend: Trend,
}

/// One round of the history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    /// Index into the round history, for edit and delete.
    pub index: usize,
    /// One-based round number as shown to the user.
    pub number: usize,
    /// Deltas in roster order.
    pub cells: Vec<HistoryCell>,
}

/// Everything needed to render the score table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreboardView {
    /// Language the labels are in.
    pub language: Language,
    /// Player cards in roster order.
    pub players: Vec<PlayerCard>,
    /// Rounds, newest first.
    pub history: Vec<HistoryRow>,
}

impl ScoreboardView {
    /// Builds a view of `state` labelled in `language`.
    #[must_use]
    pub fn build(state: &GameState, language: Language, min_players: usize) -> Self {
        let winners = leaders(&state.scores());
        let removable = state.players().len() > min_players;
        let players = state
            .players()
            .iter()
            .enumerate()
            .map(|(index, player)| PlayerCard {
                index,
                id: player.id,
                name: player.name.clone(),
                score: player.score,
                leader: winners.contains(&index),
                removable,
            })
            .collect();

        let history = state
            .rounds()
            .iter()
            .enumerate()
            .rev()
            .map(|(index, round)| HistoryRow {
                index,
                number: index + 1,
                cells: round
                    .scores
                    .iter()
                    .map(|&delta| HistoryCell {
                        delta,
                        trend: Trend::of(delta),
                    })
                    .collect(),
            })
            .collect();

        Self {
            language,
            players,
            history,
        }
    }

    /// The localized string for `key`.
    #[must_use]
    pub const fn label(&self, key: MessageKey) -> &'static str {
        self.language.text(key)
    }

    /// Column headers of the history table: the player names.
    #[must_use]
    pub fn header(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }

    /// Whether any round has been recorded.
    #[must_use]
    pub fn has_history(&self) -> bool {
        !self.history.is_empty()
    }
}
