//! Property-based tests for the scoreboard.
//!
//! These tests use proptest to drive random operation sequences through a
//! `Scoreboard` and check the state invariants after every step.
//!
//! # Invariants Tested
//!
//! - Every round has exactly one delta per player
//! - Every score equals its column total over the history
//! - The roster never shrinks below the configured minimum
//! - Player ids are unique and below the next-id counter
//! - Recorded deltas are multiples of the score step
//! - Re-saving a round with its own values changes nothing
//! - Reopening from the store restores the same state

// Allow test-specific patterns that are appropriate for test code
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use marriage_scorepad::scoring::{column_totals, round_to_step, ScoreInput};
use marriage_scorepad::telemetry::InvariantChecker;
use marriage_scorepad::{Language, MemoryStore, RoundTarget, Scoreboard, DEFAULT_SCORE_STEP};
use proptest::prelude::*;

// ============================================================================
// Operations
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    AddPlayer,
    RemovePlayer(usize),
    Rename(usize, String),
    Record(Vec<Option<i32>>, Option<usize>),
    RecordText(Vec<String>),
    DeleteRound(usize),
    Reset,
    SetLanguage(Language),
}

fn language_strategy() -> impl Strategy<Value = Language> {
    prop_oneof![Just(Language::En), Just(Language::Ru), Just(Language::Es)]
}

/// Entries for a round form; the length is deliberately not tied to the roster.
fn values_strategy() -> impl Strategy<Value = Vec<Option<i32>>> {
    prop::collection::vec(prop::option::of(-500i32..500), 0..6)
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::AddPlayer),
        2 => (0usize..6).prop_map(Op::RemovePlayer),
        1 => (0usize..6, "[a-zA-Z ]{0,8}").prop_map(|(i, n)| Op::Rename(i, n)),
        6 => (values_strategy(), prop::option::of(0usize..8)).prop_map(|(v, t)| Op::Record(v, t)),
        2 => prop::collection::vec("-?[0-9a-z]{0,4}", 0..6).prop_map(Op::RecordText),
        2 => (0usize..8).prop_map(Op::DeleteRound),
        1 => Just(Op::Reset),
        1 => language_strategy().prop_map(Op::SetLanguage),
    ]
}

fn apply(board: &mut Scoreboard<MemoryStore>, op: &Op) {
    // Rejected requests are part of the property: they must leave a valid state.
    let _ = match op {
        Op::AddPlayer => board.add_player().map(drop),
        Op::RemovePlayer(i) => board.remove_player(*i).map(drop),
        Op::Rename(i, name) => board.rename_player(*i, name.clone()),
        Op::Record(values, target) => {
            let target = target.map_or(RoundTarget::New, RoundTarget::Edit);
            board.record_round_values(values, target).map(drop)
        },
        Op::RecordText(inputs) => board.record_round(inputs.as_slice(), RoundTarget::New).map(drop),
        Op::DeleteRound(i) => board.delete_round(*i).map(drop),
        Op::Reset => board.reset_game(),
        Op::SetLanguage(lang) => board.set_language(*lang),
    };
}

fn open() -> Scoreboard<MemoryStore> {
    Scoreboard::open(MemoryStore::new()).expect("empty store opens")
}

// ============================================================================
// State invariants
// ============================================================================

proptest! {
    /// Round lengths, score totals, roster minimum and id uniqueness hold after every step
    #[test]
    fn prop_invariants_hold_under_random_operations(
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut board = open();
        for (step, op) in ops.iter().enumerate() {
            apply(&mut board, op);

            let result = board.state().check_invariants();
            prop_assert!(result.is_ok(), "step {} ({:?}): {:?}", step, op, result.err());

            let players = board.players().len();
            prop_assert!(players >= board.config().min_players);
            for round in board.rounds() {
                prop_assert_eq!(round.len(), players);
            }
            let totals = column_totals(players, board.rounds());
            let scores: Vec<i32> = board.players().iter().map(|p| p.score).collect();
            prop_assert_eq!(scores, totals);
        }
    }

    /// Every stored delta is a multiple of the score step
    #[test]
    fn prop_recorded_deltas_are_on_step(
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut board = open();
        for op in &ops {
            apply(&mut board, op);
        }
        for round in board.rounds() {
            for delta in &round.scores {
                prop_assert_eq!(delta % DEFAULT_SCORE_STEP, 0);
            }
        }
    }

    /// Reopening from the store yields the state held in memory
    #[test]
    fn prop_reopen_restores_state(
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut board = open();
        for op in &ops {
            apply(&mut board, op);
        }
        let state = board.state().clone();
        let language = board.language();

        let reopened = Scoreboard::open(board.into_store()).unwrap();
        prop_assert_eq!(reopened.state(), &state);
        prop_assert_eq!(reopened.language(), language);
    }

    /// Saving a round with its own values is a no-op
    #[test]
    fn prop_edit_with_same_values_is_idempotent(
        rounds in prop::collection::vec(prop::collection::vec(-500i32..500, 3), 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut board = open();
        for round in &rounds {
            let values: Vec<Option<i32>> = round.iter().copied().map(Some).collect();
            board.record_round_values(&values, RoundTarget::New).unwrap();
        }
        let before = board.state().clone();

        let index = pick.index(board.rounds().len());
        let values: Vec<Option<i32>> = board
            .round_inputs(index)
            .unwrap()
            .into_iter()
            .map(Some)
            .collect();
        board.record_round_values(&values, RoundTarget::Edit(index)).unwrap();
        prop_assert_eq!(board.state(), &before);
    }
}

// ============================================================================
// Scoring arithmetic
// ============================================================================

proptest! {
    /// Rounding matches round-half-away-from-zero on v / 5
    #[test]
    fn prop_rounding_law(value in -1_000_000i32..1_000_000) {
        let rounded = round_to_step(value, DEFAULT_SCORE_STEP);
        let expected = (f64::from(value) / 5.0).round() as i32 * 5;
        prop_assert_eq!(rounded, expected);
        prop_assert!((rounded - value).abs() <= 2);
    }

    /// Rounding is idempotent
    #[test]
    fn prop_rounding_idempotent(value in any::<i32>(), step in 1i32..100) {
        let once = round_to_step(value, step);
        prop_assert_eq!(round_to_step(once, step), once);
    }

    /// Decimal text of any integer parses back to it
    #[test]
    fn prop_parse_integer_text(value in any::<i32>()) {
        prop_assert_eq!(ScoreInput::parse(&value.to_string()), ScoreInput::Value(value));
    }

    /// Trailing garbage after the digits is ignored
    #[test]
    fn prop_parse_ignores_suffix(value in -10_000i32..10_000, suffix in "[a-z. ]{1,5}") {
        let text = format!("{value}{suffix}");
        prop_assert_eq!(ScoreInput::parse(&text), ScoreInput::Value(value));
    }

    /// Only the empty string counts as no input
    #[test]
    fn prop_only_empty_string_is_empty(text in ".{1,8}") {
        prop_assert!(!ScoreInput::parse(&text).is_empty());
    }
}
