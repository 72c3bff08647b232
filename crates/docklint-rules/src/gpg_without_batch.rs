//! Rule to flag `gpg --recv-keys` calls that may try to open a terminal.
//!
//! # Rationale
//!
//! When receiving keys, GPG prompts through `/dev/tty` unless told not to.
//! Image builds have no terminal, so the call fails. Both `--batch` and
//! `--no-tty` are required since either alone is not enough on some GPG
//! versions.
//!
//! Only `--recv-keys` calls are checked; other GPG invocations pass.

use docklint_core::{
    Instruction, InstructionKind, Pattern, Priority, Rule, ValidationContext, ValidationResult,
};
use tracing::trace;

/// Rule name for gpg-without-batch.
pub const NAME: &str = "gpg-without-batch";

static RECV_KEYS: Pattern = Pattern::new(r"(?s)\bgpg\b.*?--recv-keys.*?");

/// Flags `gpg --recv-keys` without both `--batch` and `--no-tty`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpgWithoutBatch;

impl GpgWithoutBatch {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for GpgWithoutBatch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn summary(&self) -> &'static str {
        "GPG call without --batch (or --no-tty) may error."
    }

    fn details(&self) -> &'static str {
        "Running GPG without --batch (or --no-tty) may cause GPG to fail opening /dev/tty, resulting in docker build failures."
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn commands(&self) -> &'static [InstructionKind] {
        &[InstructionKind::Run]
    }

    fn url(&self) -> Option<&'static str> {
        Some("https://bugs.debian.org/cgi-bin/bugreport.cgi?bug=913614")
    }

    fn evaluate(&self, node: &Instruction, ctx: ValidationContext) -> ValidationResult {
        let Some(args) = node.arguments() else {
            trace!("No argument tail on line {}", node.start_line());
            return ValidationResult::success(self.summary(), ctx);
        };

        if RECV_KEYS.matches(args) && !(args.contains("--batch") && args.contains("--no-tty")) {
            ValidationResult::failure(self.summary(), ctx)
        } else {
            ValidationResult::success(self.summary(), ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docklint_core::{Document, Location, Outcome};

    fn check(source: &str) -> ValidationResult {
        let doc = Document::parse(source).expect("Failed to parse");
        let node = &doc.instructions()[0];
        let ctx = ValidationContext::new(vec![node.location()]);
        GpgWithoutBatch::new().evaluate(node, ctx)
    }

    #[test]
    fn test_detects_missing_both_flags() {
        let result = check("RUN gpg --recv-keys ABC123");
        assert_eq!(result.outcome, Outcome::Failure);
        assert!(result.contexts[0].caused_failure);
        assert_eq!(result.details, GpgWithoutBatch.summary());
    }

    #[test]
    fn test_allows_batch_and_no_tty() {
        let result = check("RUN gpg --recv-keys ABC123 --batch --no-tty");
        assert_eq!(result.outcome, Outcome::Success);
        assert!(!result.contexts[0].caused_failure);
    }

    #[test]
    fn test_detects_missing_no_tty() {
        let result = check("RUN gpg --recv-keys ABC123 --batch");
        assert_eq!(result.outcome, Outcome::Failure);
    }

    #[test]
    fn test_detects_missing_batch() {
        let result = check("RUN gpg --no-tty --recv-keys ABC123");
        assert_eq!(result.outcome, Outcome::Failure);
    }

    #[test]
    fn test_ignores_other_commands() {
        let result = check("RUN apt-get update");
        assert_eq!(result.outcome, Outcome::Success);
    }

    #[test]
    fn test_ignores_gpg_without_recv_keys() {
        let result = check("RUN gpg --verify app.tar.gz.asc");
        assert_eq!(result.outcome, Outcome::Success);
    }

    #[test]
    fn test_flags_anywhere_across_continuations() {
        let result = check(
            "RUN set -eux; \\\n    export GNUPGHOME=\"$(mktemp -d)\"; \\\n    gpg --keyserver hkps://keys.openpgp.org \\\n        --recv-keys ABC123",
        );
        assert_eq!(result.outcome, Outcome::Failure);
    }

    #[test]
    fn test_checks_heredoc_body() {
        let result = check(
            "RUN <<EOF\nset -eux\ngpg --keyserver hkps://keys.openpgp.org --recv-keys ABC123\nEOF\n",
        );
        assert_eq!(result.outcome, Outcome::Failure);

        let result = check("RUN <<EOF\ngpg --batch --no-tty --recv-keys ABC123\nEOF\n");
        assert_eq!(result.outcome, Outcome::Success);
    }

    #[test]
    fn test_flags_may_appear_before_gpg() {
        let result = check("RUN gpg --batch --no-tty --keyserver k --recv-keys ABC123");
        assert_eq!(result.outcome, Outcome::Success);
    }

    #[test]
    fn test_malformed_node_passes() {
        let node = Instruction::new(InstructionKind::Run, "RUN", 7);
        let ctx = ValidationContext::new(vec![Location::new(7)]);
        let result = GpgWithoutBatch::new().evaluate(&node, ctx);
        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.contexts[0].locations, vec![Location::new(7)]);
    }

    #[test]
    fn test_metadata() {
        let rule = GpgWithoutBatch::new();
        assert_eq!(rule.lint_id(), "docklint:gpg-without-batch");
        assert_eq!(rule.priority(), Priority::Medium);
        assert_eq!(rule.commands(), &[InstructionKind::Run]);
        assert!(rule.url().is_some_and(|u| u.contains("913614")));
        assert!(rule.category().is_none());
        assert_ne!(rule.details(), rule.summary());
    }
}
