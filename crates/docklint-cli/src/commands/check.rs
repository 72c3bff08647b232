//! Check command implementation.

use anyhow::{Context, Result};
use docklint_core::{Analyzer, Document, TextReporter};
use docklint_rules::builtin_registry;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::settings::Settings;

/// Runs the check command.
pub fn run(files: &[PathBuf], settings: &Settings) -> Result<()> {
    tracing::debug!("Configuration: {}", settings.source);
    let color = settings.color();

    let registry = builtin_registry();
    let analyzer = Analyzer::new(&registry);

    tracing::info!(
        "Checking {} file(s) with {} rules",
        files.len(),
        analyzer.rule_count()
    );

    let mut stdout = std::io::stdout().lock();
    let mut failed = false;

    for (i, path) in files.iter().enumerate() {
        let document = read_document(path)?;
        let result = analyzer.analyze(&document);

        if files.len() > 1 {
            if i > 0 {
                writeln!(stdout)?;
            }
            writeln!(stdout, "{}:", path.display())?;
        }

        TextReporter::new(&mut stdout)
            .color(color)
            .write(&result)
            .context("Failed to write report")?;

        failed |= result.has_failures();
    }

    // Exit with error code if any rule failed
    if failed {
        std::process::exit(1);
    }

    Ok(())
}

fn read_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Document::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
