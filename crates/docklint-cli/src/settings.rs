//! Run settings: the configuration file in effect plus command-line overrides.
//!
//! The first existing file wins:
//!
//! 1. the `--config` path (not checked for existence; a missing file is an error)
//! 2. `docklint.toml`, then `.docklint.toml`, in the project directory
//! 3. `config.toml` in the user directory (`$DOCKLINT_CONFIG_DIR` or `~/.docklint`)
//!
//! With none of them present the built-in defaults apply. `--no-color` and a
//! non-empty `NO_COLOR` force [`ColorChoice::Never`] over whatever the file says.

use anyhow::{Context, Result};
use docklint_core::{ColorChoice, Config};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Project-level config file names, in lookup order.
pub const PROJECT_CONFIG_NAMES: [&str; 2] = ["docklint.toml", ".docklint.toml"];

const USER_CONFIG_NAME: &str = "config.toml";

/// Where the configuration in effect came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named with `--config`.
    Flag(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the user config directory.
    User(PathBuf),
    /// No file; built-in defaults.
    BuiltIn,
}

impl ConfigSource {
    fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(p) | Self::Project(p) | Self::User(p) => Some(p),
            Self::BuiltIn => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{} (project)", p.display()),
            Self::User(p) => write!(f, "{} (user)", p.display()),
            Self::BuiltIn => f.write_str("built-in defaults"),
        }
    }
}

/// Configuration for a run with overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Effective configuration.
    pub config: Config,
    /// Where `config` was read from.
    pub source: ConfigSource,
}

impl Settings {
    /// Color choice for the report.
    #[must_use]
    pub fn color(&self) -> ColorChoice {
        self.config.report.color
    }
}

/// Loads the settings for a run started in `project_dir`.
///
/// # Errors
///
/// Fails if the selected file cannot be read or is not valid configuration.
pub fn load(project_dir: &Path, explicit: Option<&Path>, no_color_flag: bool) -> Result<Settings> {
    let no_color = no_color_flag || no_color_requested(std::env::var_os("NO_COLOR"));
    load_from(
        project_dir,
        explicit,
        user_config_dir().as_deref(),
        no_color,
    )
}

fn load_from(
    project_dir: &Path,
    explicit: Option<&Path>,
    user_dir: Option<&Path>,
    no_color: bool,
) -> Result<Settings> {
    let source = locate(project_dir, explicit, user_dir);

    let mut config = match source.path() {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };
    if matches!(source, ConfigSource::User(_)) {
        info!("Using user config: {source}");
    }

    if no_color {
        debug!("Color disabled from the command line or environment");
        config.report.color = ColorChoice::Never;
    }

    Ok(Settings { config, source })
}

fn locate(project_dir: &Path, explicit: Option<&Path>, user_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Flag(path.to_path_buf());
    }

    PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
        .map(ConfigSource::Project)
        .or_else(|| {
            user_dir
                .map(|dir| dir.join(USER_CONFIG_NAME))
                .filter(|candidate| candidate.is_file())
                .map(ConfigSource::User)
        })
        .unwrap_or(ConfigSource::BuiltIn)
}

/// `NO_COLOR` disables color when set to anything but the empty string.
fn no_color_requested(value: Option<OsString>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// User config directory: `$DOCKLINT_CONFIG_DIR`, else `~/.docklint`.
fn user_config_dir() -> Option<PathBuf> {
    match std::env::var_os("DOCKLINT_CONFIG_DIR") {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home::home_dir().map(|h| h.join(".docklint")),
    }
}
