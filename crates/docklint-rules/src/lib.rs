//! # docklint-rules
//!
//! Built-in lint rules for docklint.
//!
//! ## Available Rules
//!
//! | Lint ID | Priority | Description |
//! |---------|----------|-------------|
//! | `docklint:gpg-without-batch` | Medium | `gpg --recv-keys` without both `--batch` and `--no-tty` |
//!
//! ## Usage
//!
//! ```ignore
//! use docklint_core::{Analyzer, Document};
//! use docklint_rules::builtin_registry;
//!
//! let registry = builtin_registry();
//! let result = Analyzer::new(&registry).analyze(&Document::parse(source)?);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gpg_without_batch;
mod presets;

pub use gpg_without_batch::GpgWithoutBatch;
pub use presets::{all_rules, builtin_registry};

/// Re-export core types for convenience.
pub use docklint_core::{Priority, Rule, RuleRegistry};
