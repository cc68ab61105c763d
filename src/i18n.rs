//! Static translation tables.
//!
//! Labels are looked up per call from a fixed table keyed by [`Language`] and
//! [`MessageKey`], so switching language never has to walk any state except
//! the player names that still carry a default label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidRequestKind;

/// A supported interface language.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (`en`).
    #[default]
    En,
    /// Russian (`ru`).
    Ru,
    /// Spanish (`es`).
    Es,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Language; 3] = [Language::En, Language::Ru, Language::Es];

    /// The language code persisted under the language key.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Es => "es",
        }
    }

    /// Looks up a language by its code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Returns the localized string for `key`.
    #[must_use]
    pub const fn text(self, key: MessageKey) -> &'static str {
        match self {
            Self::En => english(key),
            Self::Ru => russian(key),
            Self::Es => spanish(key),
        }
    }

    /// The default name for the player at zero-based `index`, e.g. `"Player 1"`.
    #[must_use]
    pub fn default_player_name(self, index: usize) -> String {
        format!("{} {}", self.text(MessageKey::DefaultPlayer), index + 1)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = InvalidRequestKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| InvalidRequestKind::UnknownLanguage { code: s.to_owned() })
    }
}

/// Identifiers of the translatable strings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageKey {
    /// Application title.
    Title,
    /// "Add Round" action.
    AddRound,
    /// History section heading.
    History,
    /// Heading of the round entry form.
    RoundResults,
    /// Cancel action.
    Cancel,
    /// Save action.
    Save,
    /// Prompt shown before a reset.
    ResetConfirm,
    /// Word used in default player names.
    DefaultPlayer,
    /// Tooltip of the reset action.
    NewGameTitle,
    /// Edit action.
    Edit,
    /// Delete action.
    Delete,
    /// "Add Player" action.
    AddPlayer,
    /// Prompt shown before a player is removed.
    ConfirmDeletePlayer,
}

impl MessageKey {
    /// Every key, in table order.
    pub const ALL: [MessageKey; 13] = [
        MessageKey::Title,
        MessageKey::AddRound,
        MessageKey::History,
        MessageKey::RoundResults,
        MessageKey::Cancel,
        MessageKey::Save,
        MessageKey::ResetConfirm,
        MessageKey::DefaultPlayer,
        MessageKey::NewGameTitle,
        MessageKey::Edit,
        MessageKey::Delete,
        MessageKey::AddPlayer,
        MessageKey::ConfirmDeletePlayer,
    ];
}

const fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Title => "Marriage",
        MessageKey::AddRound => "Add Round",
        MessageKey::History => "History",
        MessageKey::RoundResults => "Round Results",
        MessageKey::Cancel => "Cancel",
        MessageKey::Save => "Save",
        MessageKey::ResetConfirm => {
            "Are you sure you want to start a new game? All scores will be reset."
        },
        MessageKey::DefaultPlayer => "Player",
        MessageKey::NewGameTitle => "New Game",
        MessageKey::Edit => "Edit",
        MessageKey::Delete => "Delete",
        MessageKey::AddPlayer => "Add Player",
        MessageKey::ConfirmDeletePlayer => "Are you sure you want to remove this player?",
    }
}

const fn russian(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Title => "Марьяж",
        MessageKey::AddRound => "Добавить Раунд",
        MessageKey::History => "История",
        MessageKey::RoundResults => "Результаты Раунда",
        MessageKey::Cancel => "Отмена",
        MessageKey::Save => "Сохранить",
        MessageKey::ResetConfirm => {
            "Вы уверены, что хотите начать новую игру? Все очки будут сброшены."
        },
        MessageKey::DefaultPlayer => "Игрок",
        MessageKey::NewGameTitle => "Новая игра",
        MessageKey::Edit => "Редактировать",
        MessageKey::Delete => "Удалить",
        MessageKey::AddPlayer => "Добавить Игрока",
        MessageKey::ConfirmDeletePlayer => "Вы уверены, что хотите удалить этого игрока?",
    }
}

const fn spanish(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Title => "Matrimonio",
        MessageKey::AddRound => "Añadir Ronda",
        MessageKey::History => "Historial",
        MessageKey::RoundResults => "Resultados",
        MessageKey::Cancel => "Cancelar",
        MessageKey::Save => "Guardar",
        MessageKey::ResetConfirm => {
            "¿Estás seguro de que quieres empezar un nuevo juego? Se restablecerán todas las puntuaciones."
        },
        MessageKey::DefaultPlayer => "Jugador",
        MessageKey::NewGameTitle => "Nuevo Juego",
        MessageKey::Edit => "Editar",
        MessageKey::Delete => "Eliminar",
        MessageKey::AddPlayer => "Añadir Jugador",
        MessageKey::ConfirmDeletePlayer => "¿Estás seguro de que quieres eliminar a este jugador?",
    }
}

/// Returns `true` if `name` is the default name for position `index` in any
/// supported language.
///
/// Only used to infer the default-name flag for rosters saved before the flag
/// was stored. A user who renamed a player to, say, `"Jugador 2"` in second
/// position is indistinguishable from a default here.
#[must_use]
pub fn is_default_name(name: &str, index: usize) -> bool {
    Language::ALL
        .into_iter()
        .any(|lang| name == lang.default_player_name(index))
}
