//! Rule trait for defining lint rules.

use crate::context::{ValidationContext, ValidationResult};
use crate::document::{Instruction, InstructionKind};
use crate::types::Priority;

/// Namespace prepended to rule names to form lint identifiers.
pub const LINT_ID_PREFIX: &str = "docklint:";

/// A lint rule evaluated against individual instructions.
///
/// Rules declare which instruction kinds they apply to via
/// [`Rule::commands`]; the analyzer only calls [`Rule::evaluate`] for
/// instructions of those kinds.
///
/// # Example
///
/// ```ignore
/// use docklint_core::{Instruction, InstructionKind, Priority, Rule};
/// use docklint_core::{ValidationContext, ValidationResult};
///
/// pub struct NoSudo;
///
/// impl Rule for NoSudo {
///     fn name(&self) -> &'static str { "no-sudo" }
///     fn summary(&self) -> &'static str { "Avoid sudo in RUN instructions." }
///     fn priority(&self) -> Priority { Priority::Medium }
///     fn commands(&self) -> &'static [InstructionKind] { &[InstructionKind::Run] }
///
///     fn evaluate(&self, node: &Instruction, ctx: ValidationContext) -> ValidationResult {
///         if node.arguments().is_some_and(|args| args.contains("sudo ")) {
///             ValidationResult::failure(self.summary(), ctx)
///         } else {
///             ValidationResult::success(self.summary(), ctx)
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "gpg-without-batch").
    ///
    /// Names must be unique within a registry.
    fn name(&self) -> &'static str;

    /// Returns the one-line message shown in reports.
    fn summary(&self) -> &'static str;

    /// Returns a longer explanation of the rule.
    fn details(&self) -> &'static str {
        self.summary()
    }

    /// Returns the priority of this rule.
    fn priority(&self) -> Priority;

    /// Returns the instruction kinds this rule applies to.
    fn commands(&self) -> &'static [InstructionKind];

    /// Returns an optional category.
    fn category(&self) -> Option<&'static str> {
        None
    }

    /// Returns an optional reference URL.
    fn url(&self) -> Option<&'static str> {
        None
    }

    /// Returns the identifier used to cross-reference this rule.
    fn lint_id(&self) -> String {
        format!("{LINT_ID_PREFIX}{}", self.name())
    }

    /// Returns true if this rule applies to instructions of `kind`.
    fn applies_to(&self, kind: InstructionKind) -> bool {
        self.commands().contains(&kind)
    }

    /// Checks a single instruction.
    ///
    /// # Arguments
    ///
    /// * `node` - The instruction being checked
    /// * `ctx` - A fresh context carrying the instruction's locations
    ///
    /// # Returns
    ///
    /// The verdict, with `ctx` (possibly marked as failed) embedded in its
    /// contexts. Malformed instructions must degrade to success, never panic.
    fn evaluate(&self, node: &Instruction, ctx: ValidationContext) -> ValidationResult;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
