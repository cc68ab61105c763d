//! Structured telemetry for state anomalies.
//!
//! The scoreboard does not log free-form warnings when it meets something
//! unexpected (an unknown stored language, a stored total that disagrees with
//! the history, a broken invariant in a debug build). It reports a
//! [`Violation`] to a [`ViolationObserver`] instead, which can be:
//!
//! - logged via tracing (the default, [`TracingObserver`])
//! - collected programmatically for testing ([`CollectingObserver`])
//! - fanned out to several observers ([`CompositeObserver`])
//!
//! # Example
//!
//! ```
//! use marriage_scorepad::telemetry::{CollectingObserver, ViolationKind};
//! use marriage_scorepad::{MemoryStore, ScoreboardBuilder};
//! use std::sync::Arc;
//!
//! let observer = Arc::new(CollectingObserver::new());
//! let board = ScoreboardBuilder::new()
//!     .with_violation_observer(observer.clone())
//!     .open(MemoryStore::new())
//!     .expect("empty storage opens");
//!
//! assert_eq!(board.players().len(), 3);
//! assert!(observer.is_empty(), "unexpected violations");
//! ```

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Severity of a violation.
///
/// Severities are ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    /// Unexpected but recoverable; the scoreboard continued with a fallback.
    ///
    /// Example: an unknown stored language code replaced by the default.
    Warning,
    /// A state invariant is broken.
    Critical,
}

impl ViolationSeverity {
    /// Returns a string representation suitable for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories of violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ViolationKind {
    /// Stored data was readable but not what was expected.
    ///
    /// Examples:
    /// - stored total differs from the history total
    /// - next-id counter behind the highest stored id
    Persistence,
    /// Localization data issue, e.g. an unknown stored language code.
    Localization,
    /// Runtime invariant check failed.
    ///
    /// Only checked in debug builds or when the `paranoid` feature is enabled.
    Invariant,
}

impl ViolationKind {
    /// Returns a string representation suitable for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Persistence => "persistence",
            Self::Localization => "localization",
            Self::Invariant => "invariant",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded violation.
///
/// # Example
///
/// ```
/// use marriage_scorepad::telemetry::{Violation, ViolationKind, ViolationSeverity};
///
/// let violation = Violation::new(
///     ViolationSeverity::Warning,
///     ViolationKind::Persistence,
///     "stored score differs from history total",
///     "scoreboard.rs:42",
/// )
/// .with_player(1)
/// .with_context("stored", "15")
/// .with_context("computed", "10");
///
/// let json = violation.to_json().unwrap();
/// assert!(json.contains(r#""kind":"persistence""#));
/// assert!(json.contains(r#""player":1"#));
/// ```
#[derive(Debug, Clone, serde::Serialize)]
pub struct Violation {
    /// The severity level of this violation.
    pub severity: ViolationSeverity,
    /// The category of this violation.
    pub kind: ViolationKind,
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Source location where the violation was detected (file:line).
    pub location: &'static str,
    /// Roster index the violation concerns, if any.
    pub player: Option<usize>,
    /// Additional structured context as key-value pairs.
    pub context: BTreeMap<String, String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        severity: ViolationSeverity,
        kind: ViolationKind,
        message: impl Into<String>,
        location: &'static str,
    ) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            location,
            player: None,
            context: BTreeMap::new(),
        }
    }

    /// Sets the roster index this violation concerns.
    #[must_use]
    pub fn with_player(mut self, index: usize) -> Self {
        self.player = Some(index);
        self
    }

    /// Adds a context key-value pair.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Serializes this violation to a JSON string.
    ///
    /// Returns `None` if serialization fails, which does not happen for
    /// well-formed violations.
    #[must_use]
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}/{}] {} (at {}",
            self.severity, self.kind, self.message, self.location
        )?;
        if let Some(player) = self.player {
            write!(f, ", player={player}")?;
        }
        if !self.context.is_empty() {
            write!(f, ", context={:?}", self.context)?;
        }
        write!(f, ")")
    }
}

/// Trait for observing violations.
///
/// # Thread Safety
///
/// When the `sync-send` feature is enabled, observers must be `Send + Sync`.
#[cfg(feature = "sync-send")]
pub trait ViolationObserver: Send + Sync {
    /// Called when a violation is detected.
    fn on_violation(&self, violation: &Violation);
}

#[cfg(not(feature = "sync-send"))]
/// Trait for observing violations.
pub trait ViolationObserver {
    /// Called when a violation is detected.
    fn on_violation(&self, violation: &Violation);
}

/// Built-in observer that logs violations via the `tracing` crate.
///
/// `Warning` maps to `tracing::warn!`, `Critical` to `tracing::error!`. Every field is emitted as a structured tracing field.
#[derive(Debug, Default, Clone)]
pub struct TracingObserver;

impl TracingObserver {
    /// Creates a new tracing observer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ViolationObserver for TracingObserver {
    fn on_violation(&self, violation: &Violation) {
        let severity = violation.severity.as_str();
        let kind = violation.kind.as_str();
        let location = violation.location;
        let player = violation
            .player
            .map_or_else(|| "null".to_owned(), |p| p.to_string());
        let context = format!("{:?}", violation.context);

        match violation.severity {
            ViolationSeverity::Warning => {
                tracing::warn!(
                    severity,
                    kind,
                    location,
                    player = %player,
                    context = %context,
                    "{}",
                    violation.message
                );
            },
            ViolationSeverity::Critical => {
                tracing::error!(
                    severity,
                    kind,
                    location,
                    player = %player,
                    context = %context,
                    "{}",
                    violation.message
                );
            },
        }
    }
}

/// Built-in observer that collects violations for testing.
///
/// # Example
///
/// ```
/// use marriage_scorepad::telemetry::{
///     CollectingObserver, Violation, ViolationKind, ViolationObserver, ViolationSeverity,
/// };
///
/// let observer = CollectingObserver::new();
/// observer.on_violation(&Violation::new(
///     ViolationSeverity::Warning,
///     ViolationKind::Localization,
///     "unknown language",
///     "test.rs:1",
/// ));
///
/// assert_eq!(observer.len(), 1);
/// assert!(observer.has_violation(ViolationKind::Localization));
/// ```
#[derive(Debug, Default)]
pub struct CollectingObserver {
    violations: Mutex<Vec<Violation>>,
}

impl CollectingObserver {
    /// Creates a new collecting observer with an empty violation list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            violations: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of all collected violations.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        self.violations.lock().clone()
    }

    /// Returns the number of collected violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.lock().len()
    }

    /// Returns true if no violations have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.lock().is_empty()
    }

    /// Checks if any violation of the specified kind has been collected.
    #[must_use]
    pub fn has_violation(&self, kind: ViolationKind) -> bool {
        self.violations.lock().iter().any(|v| v.kind == kind)
    }

    /// Returns all violations matching the specified kind.
    #[must_use]
    pub fn violations_of_kind(&self, kind: ViolationKind) -> Vec<Violation> {
        self.violations
            .lock()
            .iter()
            .filter(|v| v.kind == kind)
            .cloned()
            .collect()
    }

    /// Clears all collected violations.
    pub fn clear(&self) {
        self.violations.lock().clear();
    }
}

impl ViolationObserver for CollectingObserver {
    fn on_violation(&self, violation: &Violation) {
        self.violations.lock().push(violation.clone());
    }
}

/// A composite observer that forwards violations to multiple observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ViolationObserver>>,
}

impl CompositeObserver {
    /// Creates a new composite observer with no child observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Adds an observer to the composite.
    pub fn add(&mut self, observer: Arc<dyn ViolationObserver>) {
        self.observers.push(observer);
    }
}

impl ViolationObserver for CompositeObserver {
    fn on_violation(&self, violation: &Violation) {
        for observer in &self.observers {
            observer.on_violation(violation);
        }
    }
}

impl std::fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("num_observers", &self.observers.len())
            .finish()
    }
}

/// Reports a violation to an optional observer, falling back to [`TracingObserver`] if `None`.
pub fn report_to_observer<O: ViolationObserver + ?Sized>(
    observer: Option<&Arc<O>>,
    violation: &Violation,
) {
    match observer {
        Some(obs) => obs.on_violation(violation),
        None => TracingObserver.on_violation(violation),
    }
}

/// Reports a violation through an `Option<Arc<dyn ViolationObserver>>`, with
/// the current file and line as location.
///
/// # Syntax
///
/// ```text
/// report_violation_to!(observer, severity, kind, "message");
/// report_violation_to!(observer, severity, kind, "message with {}", format_args);
/// ```
///
/// # Example
///
/// ```
/// use marriage_scorepad::report_violation_to;
/// use marriage_scorepad::telemetry::{
///     CollectingObserver, ViolationKind, ViolationObserver, ViolationSeverity,
/// };
/// use std::sync::Arc;
///
/// let observer: Option<Arc<dyn ViolationObserver>> = Some(Arc::new(CollectingObserver::new()));
///
/// report_violation_to!(&observer, ViolationSeverity::Warning, ViolationKind::Localization,
///     "unknown language code '{}'", "fr");
/// ```
#[macro_export]
macro_rules! report_violation_to {
    ($observer:expr, $severity:expr, $kind:expr, $msg:literal) => {{
        let violation = $crate::telemetry::Violation::new(
            $severity,
            $kind,
            $msg,
            concat!(file!(), ":", line!()),
        );
        $crate::telemetry::report_to_observer($observer.as_ref(), &violation);
    }};

    ($observer:expr, $severity:expr, $kind:expr, $fmt:literal, $($arg:tt)+) => {{
        let violation = $crate::telemetry::Violation::new(
            $severity,
            $kind,
            format!($fmt, $($arg)+),
            concat!(file!(), ":", line!()),
        );
        $crate::telemetry::report_to_observer($observer.as_ref(), &violation);
    }};
}

/// Asserts that no violations have been collected.
///
/// # Panics
///
/// Panics if the observer contains any violations, printing them for debugging.
#[macro_export]
macro_rules! assert_no_violations {
    ($observer:expr) => {{
        let violations = $observer.violations();
        assert!(
            violations.is_empty(),
            "Expected no violations, but found {}:\n{:#?}",
            violations.len(),
            violations
        );
    }};
}

/// Asserts that a violation of the specified kind was collected.
///
/// # Panics
///
/// Panics if no violation of the specified kind was found.
#[macro_export]
macro_rules! assert_violation {
    ($observer:expr, $kind:expr) => {{
        assert!(
            $observer.has_violation($kind),
            "Expected violation of kind {:?}, but found: {:#?}",
            $kind,
            $observer.violations()
        );
    }};
}

// ==========================================
// Runtime Invariant Checking
// ==========================================

/// Result of an invariant check.
#[derive(Debug, Clone, serde::Serialize)]
pub struct InvariantViolation {
    /// Name of the type whose invariant was violated.
    pub type_name: &'static str,
    /// Description of the violated invariant.
    pub invariant: String,
    /// Additional diagnostic context.
    pub details: Option<String>,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    #[must_use]
    pub fn new(type_name: &'static str, invariant: impl Into<String>) -> Self {
        Self {
            type_name,
            invariant: invariant.into(),
            details: None,
        }
    }

    /// Adds additional details to the violation.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.type_name, self.invariant)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Trait for types that maintain internal invariants.
///
/// # Example
///
/// ```
/// use marriage_scorepad::telemetry::{InvariantChecker, InvariantViolation};
///
/// struct Table {
///     players: usize,
///     columns: usize,
/// }
///
/// impl InvariantChecker for Table {
///     fn check_invariants(&self) -> Result<(), InvariantViolation> {
///         if self.players != self.columns {
///             return Err(InvariantViolation::new("Table", "column count differs from players")
///                 .with_details(format!("players={}, columns={}", self.players, self.columns)));
///         }
///         Ok(())
///     }
/// }
///
/// assert!(Table { players: 3, columns: 3 }.check_invariants().is_ok());
/// ```
pub trait InvariantChecker {
    /// Checks that all invariants of this type are satisfied.
    ///
    /// Returns `Ok(())` if all invariants hold, or an `InvariantViolation`
    /// describing the first broken invariant.
    fn check_invariants(&self) -> Result<(), InvariantViolation>;
}

/// Checks invariants in debug builds and reports failures to an observer.
///
/// Compiles to nothing in release builds unless the `paranoid` feature is enabled.
///
/// ```text
/// debug_check_invariants!(observer, expr, "context message");
/// ```
#[macro_export]
#[cfg(any(debug_assertions, feature = "paranoid"))]
macro_rules! debug_check_invariants {
    ($observer:expr, $expr:expr, $context:expr) => {{
        use $crate::telemetry::InvariantChecker as _;
        if let Err(violation) = $expr.check_invariants() {
            $crate::report_violation_to!(
                $observer,
                $crate::telemetry::ViolationSeverity::Critical,
                $crate::telemetry::ViolationKind::Invariant,
                "{} [context: {}]",
                violation,
                $context
            );
        }
    }};
}

/// No-op version for release builds without `paranoid` feature.
#[macro_export]
#[cfg(not(any(debug_assertions, feature = "paranoid")))]
macro_rules! debug_check_invariants {
    ($observer:expr, $expr:expr, $context:expr) => {{}};
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_severity_ordering() {
        assert!(ViolationSeverity::Warning < ViolationSeverity::Critical);
    }

    #[test]
    fn test_violation_kind_as_str() {
        assert_eq!(ViolationKind::Persistence.as_str(), "persistence");
        assert_eq!(ViolationKind::Localization.as_str(), "localization");
        assert_eq!(ViolationKind::Invariant.as_str(), "invariant");
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::new(
            ViolationSeverity::Warning,
            ViolationKind::Persistence,
            "next id behind stored ids",
            "scoreboard.rs:10",
        )
        .with_player(2)
        .with_context("next_id", "3");
        let text = violation.to_string();
        assert!(text.starts_with("[warning/persistence] next id behind stored ids"));
        assert!(text.contains("player=2"));
        assert!(text.contains("next_id"));
    }

    #[test]
    fn test_violation_json_null_player() {
        let violation = Violation::new(
            ViolationSeverity::Warning,
            ViolationKind::Localization,
            "unknown language",
            "test.rs:1",
        );
        let json = violation.to_json().unwrap();
        assert!(json.contains(r#""player":null"#));
        assert!(json.contains(r#""severity":"warning""#));
    }

    #[test]
    fn test_collecting_observer_filters_and_clears() {
        let observer = CollectingObserver::new();
        observer.on_violation(&Violation::new(
            ViolationSeverity::Warning,
            ViolationKind::Localization,
            "a",
            "test.rs:1",
        ));
        observer.on_violation(&Violation::new(
            ViolationSeverity::Critical,
            ViolationKind::Invariant,
            "b",
            "test.rs:2",
        ));
        assert_eq!(observer.violations_of_kind(ViolationKind::Invariant).len(), 1);
        assert!(!observer.has_violation(ViolationKind::Persistence));
        observer.clear();
        assert_no_violations!(observer);
    }

    #[test]
    fn test_composite_observer_forwards_to_all() {
        let first = Arc::new(CollectingObserver::new());
        let second = Arc::new(CollectingObserver::new());
        let mut composite = CompositeObserver::new();
        composite.add(first.clone());
        composite.add(second.clone());

        composite.on_violation(&Violation::new(
            ViolationSeverity::Warning,
            ViolationKind::Persistence,
            "c",
            "test.rs:3",
        ));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_report_macro_uses_observer() {
        let collecting = Arc::new(CollectingObserver::new());
        let observer: Option<Arc<dyn ViolationObserver>> = Some(collecting.clone());
        report_violation_to!(
            &observer,
            ViolationSeverity::Warning,
            ViolationKind::Localization,
            "unknown code {}",
            "fr"
        );
        assert_violation!(collecting, ViolationKind::Localization);
        assert_eq!(collecting.violations()[0].message, "unknown code fr");
    }
}
