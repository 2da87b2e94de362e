//! Event handling for a single test run
//!
//! The [`Reporter`] receives lifecycle callbacks from a test runner, keeps the
//! [`RunState`] up to date, drives the progress bar, prints failures as they
//! happen and prints the summary once the last planned test has ended.

use crate::announcer;
use crate::config::ReporterConfig;
use crate::error::{Error, Result};
use crate::outcome::{classify, EventKind, TestError};
use crate::progress::ProgressDisplay;
use crate::resources::{ProcessUsage, ResourceUsage};
use crate::run_state::{RunState, SuiteInfo, TestInfo};
use crate::summary::{self, Verdict};
use crate::ui::UI;
use log::{debug, info};
use std::time::Duration;

/// Progress reporter for one run.
pub struct Reporter<'a> {
    ui: &'a mut dyn UI,
    config: ReporterConfig,
    state: RunState,
    progress: ProgressDisplay,
    resources: Box<dyn ResourceUsage>,
    suite_depth: usize,
    verdict: Option<Verdict>,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter writing to `ui`, measuring resource usage from now.
    pub fn new(ui: &'a mut dyn UI, config: ReporterConfig) -> Self {
        Reporter {
            ui,
            config,
            state: RunState::new(),
            progress: ProgressDisplay::new(),
            resources: Box::new(ProcessUsage::start()),
            suite_depth: 0,
            verdict: None,
        }
    }

    /// Replace the source of the resource usage line.
    pub fn with_resources(mut self, resources: Box<dyn ResourceUsage>) -> Self {
        self.resources = resources;
        self
    }

    /// Accumulated state of the run so far.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Current position of the progress bar, once started.
    pub fn progress_position(&self) -> Option<u64> {
        self.progress.position()
    }

    /// Verdict of the run, once the summary has been printed.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Whether the summary has been printed.
    pub fn is_finished(&self) -> bool {
        self.verdict.is_some()
    }

    /// A suite started. The first suite of the run fixes the planned test
    /// count and starts the progress bar.
    pub fn on_suite_start(&mut self, suite: &SuiteInfo) -> Result<()> {
        debug!(
            "suite started: {} ({} tests, depth {})",
            suite.name, suite.test_count, self.suite_depth
        );
        self.suite_depth += 1;
        if self.state.set_planned(suite.test_count) {
            self.progress.start(self.ui, suite.test_count)?;
        }
        Ok(())
    }

    /// A suite ended. Closing the outermost suite finishes runs that never
    /// reach a test end, such as runs without any tests.
    pub fn on_suite_end(&mut self, name: &str) -> Result<()> {
        debug!("suite ended: {}", name);
        self.suite_depth = self.suite_depth.saturating_sub(1);
        if self.suite_depth == 0 {
            self.finish_if_complete()?;
        }
        Ok(())
    }

    pub fn on_test_start(&mut self, test: &TestInfo) -> Result<()> {
        debug!("test started: {}", test.name);
        Ok(())
    }

    /// A test reported a non-passing outcome. Failures and errors are printed
    /// immediately; everything else waits for the summary.
    pub fn on_outcome(&mut self, test: &TestInfo, kind: EventKind, error: &TestError) -> Result<()> {
        let outcome = classify(kind);
        debug!("test {}: {} -> {}", test.name, kind, outcome.category);
        self.state.record_outcome(
            &test.name,
            outcome,
            error.render(self.config.max_cause_depth),
        );
        if outcome.announced {
            announcer::announce(
                self.ui,
                &mut self.progress,
                &self.config,
                outcome.category,
                &test.name,
                error,
            )?;
        }
        Ok(())
    }

    /// A test ended.
    pub fn on_test_end(&mut self, test: &TestInfo, elapsed: Duration) -> Result<()> {
        let planned = self.state.planned().ok_or_else(|| {
            Error::Contract(format!("test {} ended before any suite started", test.name))
        })?;
        if self.is_finished() || self.state.completed() >= planned {
            return Err(Error::Contract(format!(
                "test {} ended after all {} planned tests",
                test.name, planned
            )));
        }

        let completed = self.state.record_completion(test);
        debug!(
            "test ended: {} in {:?} ({}/{})",
            test.name, elapsed, completed, planned
        );
        self.progress.advance(self.ui)?;
        self.finish_if_complete()
    }

    /// Write runner output without tearing the progress bar.
    pub fn write(&mut self, text: &str) -> Result<()> {
        self.progress.hide(self.ui)?;
        self.ui.write(text)?;
        self.progress.show(self.ui)
    }

    fn finish_if_complete(&mut self) -> Result<()> {
        if self.is_finished() || !self.state.is_complete() {
            return Ok(());
        }
        info!(
            "run complete: {} tests, {} assertions, {} unstable ({} errors)",
            self.state.completed(),
            self.state.assertions(),
            self.state.total_records(),
            self.state.error_count()
        );
        let usage = self.resources.summary();
        let verdict = summary::print_summary(
            self.ui,
            &mut self.progress,
            &self.config,
            &self.state,
            &usage,
        )?;
        self.verdict = Some(verdict);
        Ok(())
    }
}
