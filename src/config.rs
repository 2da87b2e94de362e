//! Configuration file (.testprogress.conf) parsing and handling
//!
//! The .testprogress.conf file uses INI format with a [DEFAULT] section
//! holding the reporter's display settings. Every key is optional.

use crate::error::{Error, Result};
use clap::ValueEnum;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".testprogress.conf";

/// Width of the progress bar and of the summary separator rule.
pub const DEFAULT_BAR_WIDTH: usize = 80;

/// Margin applied to every line of a failure block.
pub const DEFAULT_INDENT: usize = 4;

/// How many causes of an error are printed at most.
pub const DEFAULT_MAX_CAUSE_DEPTH: usize = 32;

/// When to emit colors and styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Use colors when the terminal supports them
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorMode {
    /// Apply this mode to the process-wide `console` color switch.
    pub fn apply(self) {
        match self {
            ColorMode::Auto => {}
            ColorMode::Always => {
                console::set_colors_enabled(true);
                console::set_colors_enabled_stderr(true);
            }
            ColorMode::Never => {
                console::set_colors_enabled(false);
                console::set_colors_enabled_stderr(false);
            }
        }
    }
}

impl FromStr for ColorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(Error::Config(format!(
                "color must be one of auto, always, never (got {:?})",
                other
            ))),
        }
    }
}

/// Configuration loaded from .testprogress.conf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Width of the progress bar, in columns
    pub bar_width: usize,

    /// Indentation of failure blocks, in columns
    pub indent: usize,

    /// Color mode for terminal output
    pub color: ColorMode,

    /// Maximum number of errors printed from a single cause chain
    pub max_cause_depth: usize,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        ReporterConfig {
            bar_width: DEFAULT_BAR_WIDTH,
            indent: DEFAULT_INDENT,
            color: ColorMode::Auto,
            max_cause_depth: DEFAULT_MAX_CAUSE_DEPTH,
        }
    }
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(Error::Config(format!(
            "{} must be a positive integer (got {:?})",
            key, value
        ))),
        Ok(n) => Ok(n),
    }
}

impl ReporterConfig {
    /// Load configuration from a .testprogress.conf file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&contents)
    }

    /// Load `.testprogress.conf` from `dir` if it exists, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            log::debug!("loading configuration from {}", path.display());
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a string
    pub fn parse(contents: &str) -> Result<Self> {
        let ini: HashMap<String, HashMap<String, String>> = serde_ini::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;

        let default = ini.get("DEFAULT").ok_or_else(|| {
            Error::Config(format!("No [DEFAULT] section in {}", CONFIG_FILE_NAME))
        })?;

        let mut config = ReporterConfig::default();

        if let Some(value) = default.get("bar_width") {
            config.bar_width = parse_positive("bar_width", value)?;
        }
        if let Some(value) = default.get("indent") {
            config.indent = value.trim().parse().map_err(|_| {
                Error::Config(format!("indent must be an integer (got {:?})", value))
            })?;
        }
        if let Some(value) = default.get("color") {
            config.color = value.parse()?;
        }
        if let Some(value) = default.get("max_cause_depth") {
            config.max_cause_depth = parse_positive("max_cause_depth", value)?;
        }

        Ok(config)
    }
}
