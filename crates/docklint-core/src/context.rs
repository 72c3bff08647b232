//! Per-evaluation context and the result a rule hands back.

use crate::types::{Location, Outcome};

/// State threaded through a single rule evaluation.
///
/// A fresh context is created by the caller for every evaluation. The rule
/// takes it by value and returns it, possibly with `caused_failure` set,
/// inside the [`ValidationResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    /// Source locations of the instruction being checked.
    pub locations: Vec<Location>,
    /// Whether this evaluation produced a failure.
    pub caused_failure: bool,
}

impl ValidationContext {
    /// Creates a context for the given locations.
    #[must_use]
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations,
            caused_failure: false,
        }
    }

    /// Marks this context as the cause of a failure.
    #[must_use]
    pub fn fail(mut self) -> Self {
        self.caused_failure = true;
        self
    }
}

/// Outcome of one `Rule::evaluate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Verdict.
    pub outcome: Outcome,
    /// Message for the report.
    pub details: String,
    /// Contexts the verdict pertains to.
    pub contexts: Vec<ValidationContext>,
}

impl ValidationResult {
    /// A passing result for a single context.
    #[must_use]
    pub fn success(details: impl Into<String>, context: ValidationContext) -> Self {
        Self {
            outcome: Outcome::Success,
            details: details.into(),
            contexts: vec![context],
        }
    }

    /// A failing result for a single context; the context is marked as the cause.
    #[must_use]
    pub fn failure(details: impl Into<String>, context: ValidationContext) -> Self {
        Self {
            outcome: Outcome::Failure,
            details: details.into(),
            contexts: vec![context.fail()],
        }
    }
}
