//! Fuzz target for scoreboard operation sequences.
//!
//! # Safety Properties Tested
//! - No panics on arbitrary operations or form text
//! - State invariants hold after every operation, accepted or rejected
//! - Reopening from the store restores the in-memory state

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use marriage_scorepad::telemetry::InvariantChecker;
use marriage_scorepad::{Language, MemoryStore, RoundTarget, Scoreboard};

/// Operations that can be performed on a scoreboard
#[derive(Debug, Arbitrary)]
enum BoardOp {
    AddPlayer,
    RemovePlayer(u8),
    Rename { player: u8, name: String },
    /// Raw form text, one entry per field
    Record { inputs: Vec<String>, edit: Option<u8> },
    DeleteRound(u8),
    Reset,
    SetLanguage(u8),
}

fuzz_target!(|ops: Vec<BoardOp>| {
    let Ok(mut board) = Scoreboard::open(MemoryStore::new()) else {
        return;
    };

    // Limit operations to prevent timeouts
    for op in ops.iter().take(500) {
        let _ = match op {
            BoardOp::AddPlayer => {
                // Keep rounds small
                if board.players().len() >= 16 {
                    continue;
                }
                board.add_player().map(drop)
            },
            BoardOp::RemovePlayer(i) => board.remove_player(usize::from(*i)).map(drop),
            BoardOp::Rename { player, name } => board.rename_player(usize::from(*player), name.as_str()),
            BoardOp::Record { inputs, edit } => {
                let target = edit.map_or(RoundTarget::New, |i| RoundTarget::Edit(usize::from(i)));
                board.record_round(inputs.as_slice(), target).map(drop)
            },
            BoardOp::DeleteRound(i) => board.delete_round(usize::from(*i)).map(drop),
            BoardOp::Reset => board.reset_game(),
            BoardOp::SetLanguage(i) => {
                let lang = Language::ALL[usize::from(*i) % Language::ALL.len()];
                board.set_language(lang)
            },
        };

        if let Err(violation) = board.state().check_invariants() {
            panic!("invariant broken after {op:?}: {violation}");
        }
    }

    let state = board.state().clone();
    match Scoreboard::open(board.into_store()) {
        Ok(reopened) => assert_eq!(reopened.state(), &state),
        Err(e) => panic!("reopen failed: {e}"),
    }
});
