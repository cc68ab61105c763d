//! Fuzz target for loading stored state.
//!
//! Stored values come from outside the program and may be anything. Opening
//! must either fail with an error or produce a state that passes its
//! invariant checks.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use marriage_scorepad::telemetry::InvariantChecker;
use marriage_scorepad::{MemoryStore, Scoreboard, StorageKeys};

#[derive(Debug, Arbitrary)]
struct StoredValues {
    players: Option<String>,
    history: Option<String>,
    language: Option<String>,
    next_id: Option<String>,
}

fuzz_target!(|values: StoredValues| {
    let keys = StorageKeys::default();
    let entries = [
        (&keys.players, values.players),
        (&keys.history, values.history),
        (&keys.language, values.language),
        (&keys.next_id, values.next_id),
    ];
    let store = MemoryStore::from_entries(
        entries
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.clone(), v))),
    );

    if let Ok(board) = Scoreboard::open(store) {
        if let Err(violation) = board.state().check_invariants() {
            panic!("loaded state breaks invariants: {violation}");
        }
    }
});
