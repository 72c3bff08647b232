//! Runs registered rules over a document and collects their verdicts.

use crate::context::ValidationContext;
use crate::document::Document;
use crate::registry::RuleRegistry;
use crate::types::{AnalysisResult, SkippedRule, Validation};

use tracing::{debug, info};

/// Evaluates every rule of a registry against documents.
///
/// Evaluation is sequential: rules in registration order, and for each rule
/// the applicable instructions in document order. The resulting order is
/// what the reporter uses as the tie-break within a priority.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'r> {
    registry: &'r RuleRegistry,
}

impl<'r> Analyzer<'r> {
    /// Creates an analyzer over the given registry.
    #[must_use]
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.registry.len()
    }

    /// Analyzes a document.
    ///
    /// Every rule ends up either in `evaluated` (once per instruction it
    /// was invoked against) or in `not_evaluated`.
    #[must_use]
    pub fn analyze(&self, document: &Document) -> AnalysisResult<'r> {
        info!(
            "Analyzing {} instructions with {} rules",
            document.instructions().len(),
            self.registry.len()
        );

        let mut result = AnalysisResult::new();

        for rule in self.registry.all() {
            let mut invoked = false;

            for node in document
                .instructions()
                .iter()
                .filter(|node| rule.applies_to(node.kind()))
            {
                invoked = true;
                let ctx = ValidationContext::new(vec![node.location()]);
                let validation = Validation::new(rule, rule.evaluate(node, ctx));
                debug!(
                    "{} on line {}: {}",
                    validation.id,
                    node.start_line(),
                    validation.outcome
                );
                result.evaluated.push(validation);
            }

            if !invoked {
                debug!("No applicable instruction for rule: {}", rule.name());
                result.not_evaluated.push(SkippedRule::new(rule));
            }
        }

        info!(
            "Analysis complete: {} errors in {} validations, {} rules not evaluated",
            result.error_count(),
            result.evaluated.len(),
            result.not_evaluated.len()
        );

        result
    }
}
