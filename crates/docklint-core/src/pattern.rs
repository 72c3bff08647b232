//! Lazily compiled text patterns for rule implementations.

use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::warn;

/// Upper bound on the compiled program size of a single pattern.
const SIZE_LIMIT: usize = 1 << 20;

/// Repetition semantics for `*`, `+`, `?` and `{n,m}` in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repetition {
    /// Quantifiers match as much as possible unless suffixed with `?`.
    #[default]
    Greedy,
    /// Quantifiers match as little as possible unless suffixed with `?`.
    Lazy,
}

/// A regular expression compiled on first use.
///
/// Matching is total: an invalid source is reported once through
/// `tracing` and then never matches. The underlying engine runs in time
/// linear to the input, so hostile instruction text cannot blow up a run.
///
/// # Example
///
/// ```ignore
/// static CURL_INSECURE: Pattern = Pattern::new(r"\bcurl\b.*\s(-k|--insecure)\b");
///
/// assert!(CURL_INSECURE.matches("curl -k https://example.com"));
/// ```
#[derive(Debug)]
pub struct Pattern {
    source: Cow<'static, str>,
    repetition: Repetition,
    compiled: OnceLock<Option<Regex>>,
}

impl Pattern {
    /// Creates a greedy pattern from a static source.
    #[must_use]
    pub const fn new(source: &'static str) -> Self {
        Self {
            source: Cow::Borrowed(source),
            repetition: Repetition::Greedy,
            compiled: OnceLock::new(),
        }
    }

    /// Creates a greedy pattern from an owned source.
    #[must_use]
    pub fn owned(source: impl Into<String>) -> Self {
        Self {
            source: Cow::Owned(source.into()),
            repetition: Repetition::Greedy,
            compiled: OnceLock::new(),
        }
    }

    /// Creates a lazy pattern from a static source.
    #[must_use]
    pub const fn lazy(source: &'static str) -> Self {
        Self {
            source: Cow::Borrowed(source),
            repetition: Repetition::Lazy,
            compiled: OnceLock::new(),
        }
    }

    /// Sets the repetition semantics.
    #[must_use]
    pub fn with_repetition(mut self, repetition: Repetition) -> Self {
        self.repetition = repetition;
        self.compiled = OnceLock::new();
        self
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if `input` contains a match.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        self.regex().is_some_and(|re| re.is_match(input))
    }

    /// Returns the leftmost match in `input`, if any.
    #[must_use]
    pub fn find<'h>(&self, input: &'h str) -> Option<&'h str> {
        self.regex()?.find(input).map(|m| m.as_str())
    }

    fn regex(&self) -> Option<&Regex> {
        self.compiled
            .get_or_init(|| {
                RegexBuilder::new(&self.source)
                    .swap_greed(self.repetition == Repetition::Lazy)
                    .size_limit(SIZE_LIMIT)
                    .build()
                    .map_err(|e| warn!("Invalid pattern {:?}: {}", self.source, e))
                    .ok()
            })
            .as_ref()
    }
}

impl Clone for Pattern {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            repetition: self.repetition,
            compiled: OnceLock::new(),
        }
    }
}
