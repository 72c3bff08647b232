//! Tabular text report.

use super::color::Color;
use super::table::{Cell, Table};
use super::ReportSink;
use crate::config::ColorChoice;
use crate::types::{AnalysisResult, Outcome, Priority, Validation};

use std::cell::OnceCell;
use std::io::{self, Write};
use tracing::debug;

const COLUMN_PADDING: usize = 3;
const SPACER_WIDTH: usize = 28;
const SUCCESS_MARK: &str = "✔";
const FAILURE_MARK: &str = "⨯";

/// Writes analysis results as an aligned, priority-sorted table.
///
/// Whether the output is a terminal is detected on first use and cached
/// for the lifetime of the reporter. The cache is not thread-safe; use one
/// reporter per report.
///
/// # Example
///
/// ```ignore
/// let mut reporter = TextReporter::new(std::io::stdout()).color(ColorChoice::Auto);
/// reporter.write(&result)?;
/// ```
pub struct TextReporter<W> {
    out: W,
    color: ColorChoice,
    is_tty: OnceCell<bool>,
}

impl<W: ReportSink> TextReporter<W> {
    /// Creates a reporter writing to `out`, coloring only on terminals.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: ColorChoice::Auto,
            is_tty: OnceCell::new(),
        }
    }

    /// Sets when to emit colors.
    #[must_use]
    pub fn color(mut self, choice: ColorChoice) -> Self {
        self.color = choice;
        self
    }

    /// Disables colors regardless of terminal detection.
    #[must_use]
    pub fn disable_colors(self, disable: bool) -> Self {
        if disable {
            self.color(ColorChoice::Never)
        } else {
            self
        }
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consumes the reporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn is_terminal(&self) -> bool {
        *self.is_tty.get_or_init(|| {
            let tty = self.out.is_terminal();
            debug!("Report output is a terminal: {}", tty);
            tty
        })
    }

    fn colors_enabled(&self) -> bool {
        match self.color {
            ColorChoice::Never => false,
            ColorChoice::Always => true,
            ColorChoice::Auto => self.is_terminal(),
        }
    }

    /// Writes the report.
    ///
    /// # Errors
    ///
    /// Returns the first error from the underlying writer.
    pub fn write(&mut self, result: &AnalysisResult<'_>) -> io::Result<()> {
        let colors = self.colors_enabled();
        let error_count = result.error_count();

        let mut table = Table::new(COLUMN_PADDING);
        table.push(
            [" ", "Priority", "Rule", "Details", "Line(s)"]
                .into_iter()
                .map(Cell::plain)
                .collect(),
        );
        table.push(
            [" ", "--------", "----", "-------", "-------"]
                .into_iter()
                .map(Cell::plain)
                .collect(),
        );
        for priority in Priority::DESCENDING {
            for validation in result.by_priority(priority) {
                table.push(validation_row(validation));
            }
        }
        table.write_to(&mut self.out, colors)?;

        let status_color = if error_count > 0 {
            Color::BrightRed
        } else {
            Color::BrightGreen
        };
        let status = if error_count > 0 { "Failure" } else { "Success" };
        let errors = format!("{error_count} errors");

        writeln!(self.out, "{}", "-".repeat(SPACER_WIDTH))?;
        writeln!(
            self.out,
            "{} - {}/{} rules",
            status_color.paint(status, colors),
            status_color.paint(&errors, colors),
            result.evaluated.len()
        )?;
        if result.all_rules_evaluated() {
            writeln!(self.out, "* All rules were evaluated")?;
        } else {
            writeln!(
                self.out,
                "* {} rules were not evaluated",
                result.not_evaluated.len()
            )?;
        }

        self.out.flush()
    }
}

fn validation_row<'a>(validation: &'a Validation<'_>) -> Vec<Cell<'a>> {
    let indicator = match validation.outcome {
        Outcome::Success => Cell::colored(SUCCESS_MARK, Color::BrightGreen),
        Outcome::Failure => Cell::colored(FAILURE_MARK, Color::BrightRed),
    };
    let lines = validation
        .lines()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    vec![
        indicator,
        Cell::plain(validation.rule.priority().as_str()),
        Cell::plain(validation.id.as_str()),
        Cell::plain(validation.details.as_str()),
        Cell::plain(lines),
    ]
}
