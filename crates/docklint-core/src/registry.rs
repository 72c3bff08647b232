//! Append-only collection of rules.

use crate::rule::{Rule, RuleBox};
use tracing::{debug, warn};

/// Ordered collection of rules, built once before analysis starts.
///
/// Iteration order is registration order. Construct one at startup from an
/// explicit list of rule constructors and pass it by reference to the
/// [`Analyzer`](crate::Analyzer); tests can build scratch registries freely.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<RuleBox>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) {
        self.register_box(Box::new(rule));
    }

    /// Appends a boxed rule.
    ///
    /// Names are unique by convention; a duplicate is logged, not rejected.
    pub fn register_box(&mut self, rule: RuleBox) {
        if self.get(rule.name()).is_some() {
            warn!("Rule registered twice: {}", rule.name());
        }
        debug!("Registered rule: {}", rule.lint_id());
        self.rules.push(rule);
    }

    /// Appends a rule, builder style.
    #[must_use]
    pub fn with<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.register(rule);
        self
    }

    /// Returns all rules in registration order.
    pub fn all(&self) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.rules.iter().map(|rule| &**rule)
    }

    /// Looks up a rule by name or lint ID.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.all()
            .find(|rule| rule.name() == name || rule.lint_id() == name)
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<RuleBox> for RuleRegistry {
    fn from_iter<I: IntoIterator<Item = RuleBox>>(iter: I) -> Self {
        let mut registry = Self::new();
        for rule in iter {
            registry.register_box(rule);
        }
        registry
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.name()))
            .finish()
    }
}
