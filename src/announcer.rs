//! Immediate failure output
//!
//! Failed and errored tests are printed as soon as they are reported, between
//! a `hide` and a `show` of the progress bar.

use crate::config::ReporterConfig;
use crate::error::Result;
use crate::outcome::{Category, TestError};
use crate::progress::ProgressDisplay;
use crate::ui::{Tone, UI};

/// Prefix every line of `text` with `width` spaces.
pub fn indent(text: &str, width: usize) -> String {
    let margin = " ".repeat(width);
    text.split('\n')
        .map(|line| format!("{}{}", margin, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header line for an interrupting failure ("Failed: <name>").
pub fn header(category: Category, test_name: &str) -> String {
    let label = match category {
        Category::Failed => "Failed",
        _ => "Errored",
    };
    format!("{}: {}", label, test_name)
}

/// Print a failure block for `test_name` without corrupting the progress bar.
pub fn announce(
    ui: &mut dyn UI,
    progress: &mut ProgressDisplay,
    config: &ReporterConfig,
    category: Category,
    test_name: &str,
    error: &TestError,
) -> Result<()> {
    progress.hide(ui)?;
    ui.output_styled(&header(category, test_name), Tone::Error)?;
    ui.output(&indent(&error.render(config.max_cause_depth), config.indent))?;
    progress.show(ui)
}
