//! Core types for rule verdicts and analysis results.

use crate::context::ValidationContext;
use crate::rule::Rule;
use serde::{Deserialize, Serialize};

/// Priority of a rule, used both for severity and report ordering.
///
/// Variants are declared lowest first so that the derived [`Ord`] ranks
/// `Critical` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Style or hygiene issue.
    Low,
    /// Likely to cause build or runtime trouble.
    Medium,
    /// Breaks builds or images in common setups.
    High,
    /// Security problem or guaranteed breakage.
    Critical,
}

impl Priority {
    /// All priorities, highest first.
    pub const DESCENDING: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Returns the stable display name (e.g. "Critical").
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Two-valued verdict of a rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The checked instruction is fine.
    Success,
    /// The checked instruction violates the rule.
    Failure,
}

impl Outcome {
    /// Returns true for [`Outcome::Failure`].
    #[must_use]
    pub fn is_failure(self) -> bool {
        self == Self::Failure
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
        }
    }
}

/// Position within the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Location {
    /// Creates a location pointing at a whole line.
    #[must_use]
    pub fn new(line: usize) -> Self {
        Self { line, column: None }
    }

    /// Sets the column.
    #[must_use]
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

/// Report-facing record of one rule evaluation.
///
/// Borrows the rule from the registry that produced it; the registry
/// outlives every analysis run.
#[derive(Clone)]
pub struct Validation<'r> {
    /// Lint identifier of the rule (see [`Rule::lint_id`]).
    pub id: String,
    /// The rule that produced this validation.
    pub rule: &'r dyn Rule,
    /// Verdict.
    pub outcome: Outcome,
    /// Message shown in reports.
    pub details: String,
    /// Contexts the verdict pertains to.
    pub contexts: Vec<ValidationContext>,
}

impl<'r> Validation<'r> {
    /// Builds a validation from a rule and the result of its evaluation.
    #[must_use]
    pub fn new(rule: &'r dyn Rule, result: crate::context::ValidationResult) -> Self {
        Self {
            id: rule.lint_id(),
            rule,
            outcome: result.outcome,
            details: result.details,
            contexts: result.contexts,
        }
    }

    /// Line numbers of every location in every context, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<usize> {
        self.contexts
            .iter()
            .flat_map(|ctx| ctx.locations.iter().map(|loc| loc.line))
            .collect()
    }
}

impl std::fmt::Debug for Validation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validation")
            .field("id", &self.id)
            .field("priority", &self.rule.priority())
            .field("outcome", &self.outcome)
            .field("details", &self.details)
            .field("contexts", &self.contexts)
            .finish()
    }
}

/// A registered rule that had nothing to check in the document.
#[derive(Clone)]
pub struct SkippedRule<'r> {
    /// Lint identifier of the rule.
    pub id: String,
    /// The skipped rule.
    pub rule: &'r dyn Rule,
}

impl<'r> SkippedRule<'r> {
    /// Creates a skipped-rule record.
    #[must_use]
    pub fn new(rule: &'r dyn Rule) -> Self {
        Self {
            id: rule.lint_id(),
            rule,
        }
    }
}

impl std::fmt::Debug for SkippedRule<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SkippedRule").field(&self.id).finish()
    }
}

/// Aggregate result of one analysis run.
#[derive(Debug, Default, Clone)]
pub struct AnalysisResult<'r> {
    /// Validations in evaluation order.
    pub evaluated: Vec<Validation<'r>>,
    /// Rules with no applicable instruction in the document.
    pub not_evaluated: Vec<SkippedRule<'r>>,
}

impl<'r> AnalysisResult<'r> {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of evaluated validations that failed.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.evaluated
            .iter()
            .filter(|v| v.outcome.is_failure())
            .count()
    }

    /// Returns true if any evaluated validation failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.evaluated.iter().any(|v| v.outcome.is_failure())
    }

    /// Returns true if no registered rule was skipped.
    #[must_use]
    pub fn all_rules_evaluated(&self) -> bool {
        self.not_evaluated.is_empty()
    }

    /// Evaluated validations at the given priority, in evaluation order.
    #[must_use]
    pub fn by_priority(&self, priority: Priority) -> Vec<&Validation<'r>> {
        self.evaluated
            .iter()
            .filter(|v| v.rule.priority() == priority)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValidationResult;
    use crate::document::{Instruction, InstructionKind};

    struct FixedRule(Priority);

    impl Rule for FixedRule {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn summary(&self) -> &'static str {
            "Fixed verdict"
        }
        fn priority(&self) -> Priority {
            self.0
        }
        fn commands(&self) -> &'static [InstructionKind] {
            &[InstructionKind::Run]
        }
        fn evaluate(&self, _node: &Instruction, ctx: ValidationContext) -> ValidationResult {
            ValidationResult::success(self.summary(), ctx)
        }
    }

    fn validation<'r>(rule: &'r dyn Rule, outcome: Outcome, lines: &[&[usize]]) -> Validation<'r> {
        let contexts = lines
            .iter()
            .map(|ls| ValidationContext::new(ls.iter().copied().map(Location::new).collect()))
            .collect();
        Validation {
            id: rule.lint_id(),
            rule,
            outcome,
            details: rule.summary().to_string(),
            contexts,
        }
    }

    #[test]
    fn priority_order_is_critical_first() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);

        let mut sorted = Priority::DESCENDING.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(sorted, Priority::DESCENDING.to_vec());
    }

    #[test]
    fn priority_names_are_stable() {
        assert_eq!(Priority::Critical.to_string(), "Critical");
        assert_eq!(Priority::Low.as_str(), "Low");
    }

    #[test]
    fn lines_flatten_all_contexts_in_order() {
        let rule = FixedRule(Priority::Low);
        let v = validation(&rule, Outcome::Success, &[&[7, 3], &[12], &[]]);
        assert_eq!(v.lines(), vec![7, 3, 12]);
    }

    #[test]
    fn error_count_counts_failures_only() {
        let rule = FixedRule(Priority::Medium);
        let mut result = AnalysisResult::new();
        result
            .evaluated
            .push(validation(&rule, Outcome::Failure, &[&[1]]));
        result
            .evaluated
            .push(validation(&rule, Outcome::Success, &[&[2]]));
        result
            .evaluated
            .push(validation(&rule, Outcome::Failure, &[&[3]]));

        assert_eq!(result.error_count(), 2);
        assert!(result.has_failures());
        assert!(result.all_rules_evaluated());
    }

    #[test]
    fn by_priority_keeps_evaluation_order() {
        let low = FixedRule(Priority::Low);
        let high = FixedRule(Priority::High);
        let mut result = AnalysisResult::new();
        result.evaluated.push(validation(&low, Outcome::Success, &[&[1]]));
        result.evaluated.push(validation(&high, Outcome::Success, &[&[2]]));
        result.evaluated.push(validation(&low, Outcome::Failure, &[&[3]]));

        let lows: Vec<Vec<usize>> = result
            .by_priority(Priority::Low)
            .iter()
            .map(|v| v.lines())
            .collect();
        assert_eq!(lows, vec![vec![1], vec![3]]);
        assert!(result.by_priority(Priority::Critical).is_empty());
    }
}
