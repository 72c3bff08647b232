//! Built-in rule set and registry construction.

use crate::GpgWithoutBatch;
use docklint_core::{RuleBox, RuleRegistry};

/// Returns every built-in rule, in registration order.
///
/// Includes:
/// - `gpg-without-batch` - `gpg --recv-keys` without `--batch` and `--no-tty`
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(GpgWithoutBatch::new())]
}

/// Builds the registry of built-in rules.
///
/// Call once at startup and share the registry by reference.
#[must_use]
pub fn builtin_registry() -> RuleRegistry {
    all_rules().into_iter().collect()
}
