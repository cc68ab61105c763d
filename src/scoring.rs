//! Score arithmetic: input coercion, rounding, totals and leaders.
//!
//! All functions here are pure. The scoreboard calls them after every
//! structural change, so the running totals are never updated incrementally.

use crate::Round;

/// The step every recorded delta is rounded to unless configured otherwise.
pub const DEFAULT_SCORE_STEP: i32 = 5;

/// One entry of the round form after coercion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum ScoreInput {
    /// The field was left empty.
    #[default]
    Empty,
    /// The field held text, coerced to an integer (`0` when not numeric).
    Value(i32),
}

impl ScoreInput {
    /// Coerces raw field text the way a browser's `parseInt` does.
    ///
    /// Leading whitespace and a single sign are accepted, then the longest run
    /// of ASCII digits is read and everything after it ignored. Text with no
    /// leading digits becomes `Value(0)`. Only the literal empty string is
    /// [`ScoreInput::Empty`]; a field holding just spaces still counts as input.
    ///
    /// # Examples
    ///
    /// ```
    /// use marriage_scorepad::scoring::ScoreInput;
    ///
    /// assert_eq!(ScoreInput::parse(""), ScoreInput::Empty);
    /// assert_eq!(ScoreInput::parse("  -35"), ScoreInput::Value(-35));
    /// assert_eq!(ScoreInput::parse("12.9"), ScoreInput::Value(12));
    /// assert_eq!(ScoreInput::parse("abc"), ScoreInput::Value(0));
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::Empty;
        }
        let trimmed = text.trim_start();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed.as_bytes()[1..]),
            Some(b'+') => (false, &trimmed.as_bytes()[1..]),
            _ => (false, trimmed.as_bytes()),
        };

        let mut value: i64 = 0;
        for digit in digits.iter().take_while(|b| b.is_ascii_digit()) {
            value = value
                .saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'));
        }
        if negative {
            value = -value;
        }
        let clamped = value.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        Self::Value(clamped as i32)
    }

    /// Returns `true` for [`ScoreInput::Empty`].
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The coerced value, `0` for an empty field.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::Empty => 0,
            Self::Value(v) => v,
        }
    }
}

impl From<Option<i32>> for ScoreInput {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Self::Empty, Self::Value)
    }
}

/// Rounds `value` to the nearest multiple of `step`, ties away from zero.
///
/// A `step` of 1 or less leaves the value unchanged. The result saturates at
/// the `i32` bounds.
///
/// # Examples
///
/// ```
/// use marriage_scorepad::scoring::round_to_step;
///
/// assert_eq!(round_to_step(12, 5), 10);
/// assert_eq!(round_to_step(13, 5), 15);
/// assert_eq!(round_to_step(-7, 5), -5);
/// assert_eq!(round_to_step(0, 5), 0);
/// ```
#[must_use]
pub fn round_to_step(value: i32, step: i32) -> i32 {
    if step <= 1 {
        return value;
    }
    let value = i64::from(value);
    let step = i64::from(step);
    let magnitude = value.abs();
    let remainder = magnitude % step;
    let mut rounded = magnitude - remainder;
    if remainder * 2 >= step {
        rounded += step;
    }
    let signed = if value < 0 { -rounded } else { rounded };
    signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Sums every round column-wise into one total per player.
///
/// Rounds shorter than `player_count` contribute nothing to the missing
/// columns; longer rounds have their extra entries ignored. The scoreboard
/// never holds such rounds, this only keeps the function total.
#[must_use]
pub fn column_totals(player_count: usize, rounds: &[Round]) -> Vec<i32> {
    let mut totals = vec![0i32; player_count];
    for round in rounds {
        for (total, delta) in totals.iter_mut().zip(round.scores.iter()) {
            *total = total.saturating_add(*delta);
        }
    }
    totals
}

/// Indices of the players holding the maximum score.
///
/// Nobody leads while the maximum is zero, which includes a fresh game.
///
/// # Examples
///
/// ```
/// use marriage_scorepad::scoring::leaders;
///
/// assert_eq!(leaders(&[15, 5, 15]), vec![0, 2]);
/// assert!(leaders(&[0, 0, 0]).is_empty());
/// assert!(leaders(&[0, -5, -10]).is_empty());
/// ```
#[must_use]
pub fn leaders(scores: &[i32]) -> Vec<usize> {
    let Some(&max) = scores.iter().max() else {
        return Vec::new();
    };
    if max == 0 {
        return Vec::new();
    }
    scores
        .iter()
        .enumerate()
        .filter_map(|(i, &score)| (score == max).then_some(i))
        .collect()
}

/// Direction of a single round delta, shown as an arrow in history rows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Trend {
    /// Positive delta.
    Up,
    /// Negative delta.
    Down,
    /// Zero.
    Flat,
}

impl Trend {
    /// Classifies a delta.
    #[must_use]
    pub const fn of(delta: i32) -> Self {
        if delta > 0 {
            Self::Up
        } else if delta < 0 {
            Self::Down
        } else {
            Self::Flat
        }
    }

    /// The arrow glyph, empty for [`Trend::Flat`].
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Flat => "",
        }
    }
}
