//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

use crate::settings::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# docklint configuration

[report]
# When to color the report: "auto" (terminals only), "always", or "never".
# The --no-color flag and the NO_COLOR environment variable override this.
color = "auto"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(PROJECT_CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to configure the report", config_path.display());
    println!("  2. Run: docklint check Dockerfile");

    Ok(())
}
