//! Final summary of a run
//!
//! Lists every unstable test by category, then prints the verdict, the test
//! and assertion counts, and the resource usage line.

use crate::config::ReporterConfig;
use crate::error::Result;
use crate::outcome::Category;
use crate::progress::ProgressDisplay;
use crate::run_state::{OutcomeRecord, RunState};
use crate::ui::{Tone, UI};
use std::fmt;

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    NoTests,
    Success,
    /// No failures, but some tests were skipped, incomplete or risky.
    Incomplete,
    Failures,
}

impl Verdict {
    /// Pick the verdict for a finished run. The first matching rule wins.
    pub fn of(state: &RunState) -> Self {
        if state.completed() == 0 {
            Verdict::NoTests
        } else if state.total_records() == 0 {
            Verdict::Success
        } else if !Category::SUMMARY_ORDER
            .iter()
            .any(|c| c.breaks_run() && state.count(*c) > 0)
        {
            Verdict::Incomplete
        } else {
            Verdict::Failures
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::NoTests => "No tests executed!",
            Verdict::Success => "Success!",
            Verdict::Incomplete => "OK, but incomplete, skipped, or risky tests!",
            Verdict::Failures => "Failures!",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Verdict::NoTests => Tone::Notice,
            Verdict::Success | Verdict::Incomplete => Tone::Success,
            Verdict::Failures => Tone::Error,
        }
    }

    /// Whether the run should be considered successful.
    pub fn is_success(&self) -> bool {
        !matches!(self, Verdict::Failures)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// "1 test", "2 tests", "0 tests".
pub fn plural(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Lines listing the records of one category; empty when there are none.
pub fn render_category(category: Category, records: &[OutcomeRecord]) -> Vec<String> {
    if records.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(format!(
        "{} {}:",
        records.len(),
        plural_label(records.len(), category)
    ));
    for record in records {
        lines.push(format!(" * {}: {}", record.test_name, record.message));
    }
    lines
}

fn plural_label(count: usize, category: Category) -> String {
    if count == 1 {
        format!("{} test", category.label())
    } else {
        format!("{} tests", category.label())
    }
}

/// Print the summary of a finished run.
pub fn print_summary(
    ui: &mut dyn UI,
    progress: &mut ProgressDisplay,
    config: &ReporterConfig,
    state: &RunState,
    resource_usage: &str,
) -> Result<Verdict> {
    progress.hide(ui)?;
    if !progress.is_active() {
        ui.output("")?;
    }

    if state.total_records() > 0 {
        ui.output(&"-".repeat(config.bar_width))?;
        ui.output("")?;
        ui.output("Summary")?;
        ui.output("")?;
    }

    for category in Category::SUMMARY_ORDER {
        let lines = render_category(category, state.records(category));
        if lines.is_empty() {
            continue;
        }
        for line in &lines {
            ui.output(line)?;
        }
        ui.output("")?;
    }

    let verdict = Verdict::of(state);
    ui.output_styled(&format!("\n\n {}\n", verdict.message()), verdict.tone())?;
    ui.output(&format!(
        "{}, {}",
        plural(state.completed(), "test"),
        plural(state.assertions(), "assertion")
    ))?;
    ui.output(resource_usage)?;
    ui.flush()?;

    Ok(verdict)
}
