//! Metamorphic tests for the scoreboard.
//!
//! These check relationships between two runs instead of fixed outputs:
//!
//! 1. **Round order invariance**: totals do not depend on the order rounds are recorded in
//! 2. **Undo symmetry**: recording then deleting a round restores the state
//! 3. **Column independence**: adding then removing a player restores history and totals
//! 4. **Language round trip**: switching away and back restores default names

// Allow test-specific patterns that are appropriate for test code
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use marriage_scorepad::{Language, MemoryStore, RoundTarget, Scoreboard};
use proptest::prelude::*;

fn rounds_strategy() -> impl Strategy<Value = Vec<Vec<i32>>> {
    prop::collection::vec(prop::collection::vec(-300i32..300, 3), 0..12)
}

fn board_with(rounds: &[Vec<i32>]) -> Scoreboard<MemoryStore> {
    let mut board = Scoreboard::open(MemoryStore::new()).unwrap();
    for round in rounds {
        let values: Vec<Option<i32>> = round.iter().copied().map(Some).collect();
        board.record_round_values(&values, RoundTarget::New).unwrap();
    }
    board
}

fn totals(board: &Scoreboard<MemoryStore>) -> Vec<i32> {
    board.players().iter().map(|p| p.score).collect()
}

proptest! {
    #[test]
    fn meta_round_order_does_not_change_totals(rounds in rounds_strategy()) {
        let forward = board_with(&rounds);
        let reversed: Vec<Vec<i32>> = rounds.iter().rev().cloned().collect();
        let backward = board_with(&reversed);
        prop_assert_eq!(totals(&forward), totals(&backward));
        prop_assert_eq!(forward.leaders(), backward.leaders());
    }

    #[test]
    fn meta_record_then_delete_restores_state(
        rounds in rounds_strategy(),
        extra in prop::collection::vec(-300i32..300, 3),
    ) {
        let mut board = board_with(&rounds);
        let before = board.state().clone();

        let values: Vec<Option<i32>> = extra.iter().copied().map(Some).collect();
        board.record_round_values(&values, RoundTarget::New).unwrap();
        board.delete_round(board.rounds().len() - 1).unwrap();
        prop_assert_eq!(board.state(), &before);
    }

    #[test]
    fn meta_add_then_remove_player_restores_columns(rounds in rounds_strategy()) {
        let mut board = board_with(&rounds);
        let history_before = board.rounds().to_vec();
        let totals_before = totals(&board);

        board.add_player().unwrap();
        board.remove_player(board.players().len() - 1).unwrap();
        prop_assert_eq!(board.rounds(), history_before.as_slice());
        prop_assert_eq!(totals(&board), totals_before);
    }

    #[test]
    fn meta_language_round_trip_restores_names(
        rounds in rounds_strategy(),
        via in prop_oneof![Just(Language::Ru), Just(Language::Es)],
    ) {
        let mut board = board_with(&rounds);
        let before = board.state().clone();

        board.set_language(via).unwrap();
        board.set_language(Language::En).unwrap();
        prop_assert_eq!(board.state(), &before);
    }
}
