//! The game state store: roster, history and persistence in one owned value.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::codec::{self, StoredPlayer};
use crate::config::ScoreboardConfig;
use crate::i18n::{self, Language, MessageKey};
use crate::model::{GameState, Player, Round, RoundOutcome, RoundTarget, ScoreVec};
use crate::scoring::{self, round_to_step, ScoreInput};
use crate::storage::KeyValueStore;
use crate::telemetry::{ViolationKind, ViolationObserver, ViolationSeverity};
use crate::view::ScoreboardView;
use crate::{debug_check_invariants, report_violation_to};
use crate::{PlayerId, ScoreError, ScoreResult};

/// Builds a [`Scoreboard`] from a configuration and a storage collaborator.
///
/// # Example
///
/// ```
/// use marriage_scorepad::{Language, MemoryStore, ScoreboardBuilder};
///
/// let board = ScoreboardBuilder::new()
///     .with_language(Language::Ru)
///     .open(MemoryStore::new())
///     .expect("empty storage opens");
///
/// assert_eq!(board.language(), Language::Ru);
/// assert_eq!(board.players()[0].name, "Игрок 1");
/// ```
#[must_use = "ScoreboardBuilder must be consumed by calling open()"]
#[derive(Default)]
pub struct ScoreboardBuilder {
    config: ScoreboardConfig,
    language: Option<Language>,
    violation_observer: Option<Arc<dyn ViolationObserver>>,
}

impl std::fmt::Debug for ScoreboardBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            config,
            language,
            violation_observer,
        } = self;

        f.debug_struct("ScoreboardBuilder")
            .field("config", config)
            .field("language", language)
            .field("violation_observer", &violation_observer.is_some())
            .finish()
    }
}

impl ScoreboardBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ScoreboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Switches to `language` after loading, overriding the stored preference.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Routes violations to `observer` instead of the default tracing output.
    pub fn with_violation_observer(mut self, observer: Arc<dyn ViolationObserver>) -> Self {
        self.violation_observer = Some(observer);
        self
    }

    /// Validates the configuration and loads the game from `store`.
    ///
    /// Missing keys fall back to a fresh game: the default roster, an empty
    /// history and the configured language. Opening never writes to the store
    /// unless a language override changes the stored preference.
    ///
    /// # Errors
    ///
    /// - [`InvalidConfig`](crate::InvalidRequestKind::InvalidConfig) for a bad configuration.
    /// - [`ScoreError::Storage`] if the store cannot be read.
    /// - [`ScoreError::Codec`] if a stored value is not valid JSON of the expected shape.
    /// - [`ScoreError::CorruptState`] if the stored roster and history disagree.
    pub fn open<S: KeyValueStore>(self, store: S) -> ScoreResult<Scoreboard<S>> {
        self.config.validate()?;
        let observer = self.violation_observer;
        let language = load_language(&store, &self.config, &observer)?;
        let state = load_state(&store, &self.config, language, &observer)?;

        let mut board = Scoreboard {
            store,
            state,
            language,
            config: self.config,
            observer,
        };
        debug!(
            language = %board.language,
            players = board.state.players().len(),
            rounds = board.state.rounds().len(),
            "scoreboard opened"
        );
        debug_check_invariants!(&board.observer, board.state, "open");

        if let Some(language) = self.language {
            if language != board.language {
                board.set_language(language)?;
            }
        }
        Ok(board)
    }
}

fn load_language<S: KeyValueStore>(
    store: &S,
    config: &ScoreboardConfig,
    observer: &Option<Arc<dyn ViolationObserver>>,
) -> ScoreResult<Language> {
    let Some(code) = store.get(&config.storage_keys.language)? else {
        return Ok(config.default_language);
    };
    let code = code.trim();
    match Language::from_code(code) {
        Some(language) => Ok(language),
        None => {
            report_violation_to!(
                observer,
                ViolationSeverity::Warning,
                ViolationKind::Localization,
                "unknown stored language code '{}', using '{}'",
                code,
                config.default_language
            );
            Ok(config.default_language)
        },
    }
}

fn load_state<S: KeyValueStore>(
    store: &S,
    config: &ScoreboardConfig,
    language: Language,
    observer: &Option<Arc<dyn ViolationObserver>>,
) -> ScoreResult<GameState> {
    let keys = &config.storage_keys;
    let rounds = match store.get(&keys.history)? {
        Some(text) => codec::decode_history(&text)?,
        None => Vec::new(),
    };
    let (players, stored_scores) = match store.get(&keys.players)? {
        Some(text) => {
            let stored = codec::decode_players(&text)?;
            let scores: Vec<i32> = stored.iter().map(|p| p.score).collect();
            let players: Vec<Player> = stored
                .into_iter()
                .enumerate()
                .map(|(i, record)| player_from_record(i, record))
                .collect();
            (players, Some(scores))
        },
        None => {
            trace!("no stored roster, creating default players");
            let roster = GameState::with_default_roster(config.default_roster_size, language);
            (roster.players().to_vec(), None)
        },
    };

    if let Some((i, round)) = rounds
        .iter()
        .enumerate()
        .find(|(_, round)| round.len() != players.len())
    {
        return Err(ScoreError::CorruptState {
            reason: format!(
                "round {} has {} scores but the roster has {} players",
                i + 1,
                round.len(),
                players.len()
            ),
        });
    }

    let mut ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    ids.sort_unstable();
    if let Some(dup) = ids.windows(2).find(|w| w[0] == w[1]) {
        return Err(ScoreError::CorruptState {
            reason: format!("player id {} appears more than once", dup[0]),
        });
    }
    if ids.last().is_some_and(|max| max.as_u32() == u32::MAX) {
        return Err(ScoreError::CorruptState {
            reason: format!("player id {} leaves no room for the id counter", u32::MAX),
        });
    }
    let min_next_id = ids.last().map_or(PlayerId::new(1), |max| max.next());
    let next_id = match store.get(&keys.next_id)? {
        Some(text) => {
            let stored_next = codec::decode_next_id(&text)?;
            if stored_next < min_next_id {
                report_violation_to!(
                    observer,
                    ViolationSeverity::Warning,
                    ViolationKind::Persistence,
                    "stored next id {} is not above the highest player id, using {}",
                    stored_next,
                    min_next_id
                );
                min_next_id
            } else {
                stored_next
            }
        },
        None => min_next_id,
    };

    let mut state = GameState::from_parts(players, rounds, next_id);

    for (i, (stored_score, player)) in stored_scores
        .iter()
        .flatten()
        .zip(state.players())
        .enumerate()
    {
        if *stored_score != player.score {
            let violation = crate::telemetry::Violation::new(
                ViolationSeverity::Warning,
                ViolationKind::Persistence,
                "stored score differs from history total, using the history total",
                concat!(file!(), ":", line!()),
            )
            .with_player(i)
            .with_context("stored", stored_score.to_string())
            .with_context("computed", player.score.to_string());
            crate::telemetry::report_to_observer(observer.as_ref(), &violation);
        }
    }

    // An interrupted language switch can leave default names in another language.
    let relabelled = state.relabel_default_names(language);
    if relabelled > 0 {
        report_violation_to!(
            observer,
            ViolationSeverity::Warning,
            ViolationKind::Localization,
            "{} default player names were not in '{}', relabelled",
            relabelled,
            language
        );
    }
    Ok(state)
}

fn player_from_record(index: usize, record: StoredPlayer) -> Player {
    let default_name = record
        .default_name
        .unwrap_or_else(|| i18n::is_default_name(&record.name, index));
    Player {
        id: record.id,
        name: record.name,
        score: record.score,
        default_name,
    }
}

/// The game state store.
///
/// Owns the roster, the round history, the current language and the storage
/// collaborator. Every mutating method runs as a small transaction: it edits a
/// copy of the state, writes the full snapshot to storage and only then makes
/// the copy current. If storage fails, the error is returned and the
/// scoreboard is unchanged.
///
/// Confirmation before destructive operations ([`remove_player`](Self::remove_player),
/// [`reset_game`](Self::reset_game)) is the caller's job; the localized prompts
/// are available through [`label`](Self::label).
///
/// # Example
///
/// ```
/// use marriage_scorepad::{MemoryStore, RoundTarget, ScoreboardBuilder};
///
/// let mut board = ScoreboardBuilder::new().open(MemoryStore::new())?;
/// board.record_round(&["5", "-5", ""], RoundTarget::New)?;
/// board.record_round(&["12", "13", "-27"], RoundTarget::New)?;
///
/// let scores: Vec<i32> = board.players().iter().map(|p| p.score).collect();
/// assert_eq!(scores, vec![15, 10, -25]);
/// # Ok::<(), marriage_scorepad::ScoreError>(())
/// ```
pub struct Scoreboard<S: KeyValueStore> {
    store: S,
    state: GameState,
    language: Language,
    config: ScoreboardConfig,
    observer: Option<Arc<dyn ViolationObserver>>,
}

impl<S: KeyValueStore + std::fmt::Debug> std::fmt::Debug for Scoreboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            store,
            state,
            language,
            config,
            observer,
        } = self;

        f.debug_struct("Scoreboard")
            .field("store", store)
            .field("state", state)
            .field("language", language)
            .field("config", config)
            .field("observer", &observer.is_some())
            .finish()
    }
}

impl<S: KeyValueStore> Scoreboard<S> {
    /// Opens a scoreboard with the default configuration.
    ///
    /// Shorthand for `ScoreboardBuilder::new().open(store)`.
    pub fn open(store: S) -> ScoreResult<Self> {
        ScoreboardBuilder::new().open(store)
    }

    // ----------------------------------------------------------------
    // Queries
    // ----------------------------------------------------------------

    /// The roster, in table order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.state.players()
    }

    /// The round history, oldest first.
    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        self.state.rounds()
    }

    /// The full game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The current language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// The configuration this scoreboard was opened with.
    #[must_use]
    pub const fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    /// The storage collaborator.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the scoreboard and returns the storage collaborator.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// The localized string for `key` in the current language.
    #[must_use]
    pub const fn label(&self, key: MessageKey) -> &'static str {
        self.language.text(key)
    }

    /// Indices of the leading players; empty while the best score is zero.
    #[must_use]
    pub fn leaders(&self) -> Vec<usize> {
        scoring::leaders(&self.state.scores())
    }

    /// Whether [`remove_player`](Self::remove_player) would be accepted for a valid index.
    #[must_use]
    pub fn can_remove_player(&self) -> bool {
        self.state.players().len() > self.config.min_players
    }

    /// The deltas of round `index`, used to pre-fill an edit form.
    pub fn round_inputs(&self, index: usize) -> ScoreResult<Vec<i32>> {
        self.state.check_round_index(index)?;
        Ok(self.state.rounds()[index].scores.to_vec())
    }

    /// Builds the read-only view model for a presentation layer.
    #[must_use]
    pub fn view(&self) -> ScoreboardView {
        ScoreboardView::build(&self.state, self.language, self.config.min_players)
    }

    // ----------------------------------------------------------------
    // Mutations
    // ----------------------------------------------------------------

    /// Appends a default-named player; every existing round gets a `0` for them.
    pub fn add_player(&mut self) -> ScoreResult<PlayerId> {
        let language = self.language;
        self.transact("add_player", |state| state.add_player(language))
    }

    /// Removes the player at `index` and their column from every round.
    ///
    /// # Errors
    ///
    /// - [`PlayerIndexOutOfRange`](crate::InvalidRequestKind::PlayerIndexOutOfRange)
    /// - [`TooFewPlayers`](crate::InvalidRequestKind::TooFewPlayers) when the roster is
    ///   already at the configured minimum.
    pub fn remove_player(&mut self, index: usize) -> ScoreResult<Player> {
        let min_players = self.config.min_players;
        self.transact("remove_player", |state| state.remove_player(index, min_players))
    }

    /// Renames the player at `index`. The name is stored exactly as given.
    pub fn rename_player(&mut self, index: usize, name: impl Into<String>) -> ScoreResult<()> {
        let name = name.into();
        self.transact("rename_player", |state| state.rename_player(index, name))
    }

    /// Records a round from raw form text, one entry per player.
    ///
    /// Each entry is coerced with [`ScoreInput::parse`] and rounded to the
    /// configured step. If every entry is the empty string nothing is recorded
    /// and [`RoundOutcome::Skipped`] is returned.
    ///
    /// # Errors
    ///
    /// - [`RoundLengthMismatch`](crate::InvalidRequestKind::RoundLengthMismatch) if
    ///   `inputs` does not have one entry per player.
    /// - [`RoundIndexOutOfRange`](crate::InvalidRequestKind::RoundIndexOutOfRange) for
    ///   an edit target past the end of the history.
    pub fn record_round<T: AsRef<str>>(
        &mut self,
        inputs: &[T],
        target: RoundTarget,
    ) -> ScoreResult<RoundOutcome> {
        let parsed: Vec<ScoreInput> = inputs.iter().map(|s| ScoreInput::parse(s.as_ref())).collect();
        self.record_inputs(&parsed, target)
    }

    /// Records a round from numeric entries; `None` stands for an empty field.
    pub fn record_round_values(
        &mut self,
        values: &[Option<i32>],
        target: RoundTarget,
    ) -> ScoreResult<RoundOutcome> {
        let parsed: Vec<ScoreInput> = values.iter().copied().map(ScoreInput::from).collect();
        self.record_inputs(&parsed, target)
    }

    fn record_inputs(&mut self, inputs: &[ScoreInput], target: RoundTarget) -> ScoreResult<RoundOutcome> {
        let expected = self.state.players().len();
        if inputs.len() != expected {
            return Err(crate::InvalidRequestKind::RoundLengthMismatch {
                expected,
                actual: inputs.len(),
            }
            .into());
        }
        if let RoundTarget::Edit(index) = target {
            self.state.check_round_index(index)?;
        }
        if inputs.iter().all(|input| input.is_empty()) {
            trace!(?target, "round form left empty, nothing recorded");
            return Ok(RoundOutcome::Skipped);
        }

        let step = self.config.score_step;
        let scores: ScoreVec = inputs
            .iter()
            .map(|input| round_to_step(input.value(), step))
            .collect();
        self.transact("record_round", |state| state.record_round(scores, target))
    }

    /// Deletes round `index`.
    pub fn delete_round(&mut self, index: usize) -> ScoreResult<Round> {
        self.transact("delete_round", |state| state.delete_round(index))
    }

    /// Recomputes every total from the history and persists the result.
    ///
    /// The other mutations already do this; calling it directly is only
    /// useful after the store was edited behind the scoreboard's back.
    pub fn recalculate_scores(&mut self) -> ScoreResult<()> {
        self.transact("recalculate_scores", |state| {
            state.recalculate_scores();
            Ok(())
        })
    }

    /// Starts a new game with the same roster size: no history, zero scores,
    /// default names in the current language.
    pub fn reset_game(&mut self) -> ScoreResult<()> {
        let language = self.language;
        self.transact("reset_game", |state| {
            state.reset(language);
            Ok(())
        })
    }

    /// Switches the language, persists the preference and relabels every
    /// player that still carries a default name.
    ///
    /// The relabelled snapshot is written before the preference, and neither
    /// the language nor the roster changes in memory unless both writes
    /// succeed.
    pub fn set_language(&mut self, language: Language) -> ScoreResult<()> {
        let mut next = self.state.clone();
        let relabelled = next.relabel_default_names(language);
        if relabelled > 0 {
            self.persist(&next)?;
        }
        self.store
            .set(&self.config.storage_keys.language, language.code())?;

        self.state = next;
        self.language = language;
        debug!(language = %language, relabelled, "language switched");
        debug_check_invariants!(&self.observer, self.state, "set_language");
        Ok(())
    }

    // ----------------------------------------------------------------
    // Persistence
    // ----------------------------------------------------------------

    fn transact<R>(
        &mut self,
        operation: &'static str,
        apply: impl FnOnce(&mut GameState) -> ScoreResult<R>,
    ) -> ScoreResult<R> {
        let mut next = self.state.clone();
        let result = apply(&mut next)?;
        self.persist(&next)?;
        self.state = next;
        debug!(
            operation,
            players = self.state.players().len(),
            rounds = self.state.rounds().len(),
            "state committed"
        );
        debug_check_invariants!(&self.observer, self.state, operation);
        Ok(result)
    }

    fn persist(&mut self, state: &GameState) -> ScoreResult<()> {
        let keys = &self.config.storage_keys;
        let players = codec::encode_players(state.players())?;
        let history = codec::encode_history(state.rounds())?;
        let next_id = codec::encode_next_id(state.next_id())?;
        self.store.set(&keys.players, &players)?;
        self.store.set(&keys.history, &history)?;
        self.store.set(&keys.next_id, &next_id)?;
        Ok(())
    }
}
