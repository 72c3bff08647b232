//! # docklint-core
//!
//! Core framework for linting build-recipe scripts (Dockerfile-like
//! documents).
//!
//! This crate provides the foundational traits and types for building
//! recipe linters. It includes:
//!
//! - [`Rule`] trait for per-instruction rules
//! - [`RuleRegistry`] for collecting rules once at startup
//! - [`Analyzer`] for running a registry over a [`Document`]
//! - [`AnalysisResult`] and [`Validation`] for representing verdicts
//! - [`TextReporter`] for rendering a prioritized, color-aware table
//! - [`Pattern`] for lazily compiled text matching inside rules
//!
//! ## Example
//!
//! ```ignore
//! use docklint_core::{Analyzer, Document, RuleRegistry, TextReporter};
//!
//! let registry = RuleRegistry::new().with(MyRule::new());
//! let document = Document::parse(&std::fs::read_to_string("Dockerfile")?)?;
//!
//! let result = Analyzer::new(&registry).analyze(&document);
//! TextReporter::new(std::io::stdout()).write(&result)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod document;
mod pattern;
mod registry;
mod rule;
mod types;

pub mod reporter;

pub use analyzer::Analyzer;
pub use config::{ColorChoice, Config, ConfigError, ReportConfig};
pub use context::{ValidationContext, ValidationResult};
pub use document::{Document, Instruction, InstructionKind, ParseError};
pub use pattern::{Pattern, Repetition};
pub use registry::RuleRegistry;
pub use reporter::{ReportSink, TextReporter};
pub use rule::{Rule, RuleBox, LINT_ID_PREFIX};
pub use types::{AnalysisResult, Location, Outcome, Priority, SkippedRule, Validation};
