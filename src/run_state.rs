//! Run data structures

use crate::outcome::{Category, Outcome};
use std::collections::BTreeMap;

/// A test as seen by the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestInfo {
    /// Display name of the test.
    pub name: String,
    /// Number of assertions the test performed, if the runner can tell.
    pub assertions: Option<u64>,
}

impl TestInfo {
    /// Creates a test whose assertion count is not known.
    pub fn new(name: impl Into<String>) -> Self {
        TestInfo {
            name: name.into(),
            assertions: None,
        }
    }

    /// Set the number of assertions performed
    pub fn with_assertions(mut self, assertions: u64) -> Self {
        self.assertions = Some(assertions);
        self
    }

    /// Assertions credited to the run for this test.
    ///
    /// Tests that cannot report a count are credited exactly one assertion.
    pub fn assertion_contribution(&self) -> u64 {
        self.assertions.unwrap_or(1)
    }
}

/// A suite as seen by the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteInfo {
    pub name: String,
    /// Total number of leaf tests in this suite, nested suites included.
    pub test_count: u64,
}

impl SuiteInfo {
    pub fn new(name: impl Into<String>, test_count: u64) -> Self {
        SuiteInfo {
            name: name.into(),
            test_count,
        }
    }
}

/// One unstable test, as listed in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub test_name: String,
    /// Rendered error text, causes included.
    pub message: String,
    /// Whether this record is part of the run's error tally.
    pub counts_as_error: bool,
}

/// Accumulated state of a single run.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    planned: Option<u64>,
    completed: u64,
    assertions: u64,
    outcomes: BTreeMap<Category, Vec<OutcomeRecord>>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the planned test count. Only the first call has an effect;
    /// returns whether this call set it.
    pub fn set_planned(&mut self, count: u64) -> bool {
        if self.planned.is_some() {
            return false;
        }
        self.planned = Some(count);
        true
    }

    /// Planned number of tests, once the first suite has started.
    pub fn planned(&self) -> Option<u64> {
        self.planned
    }

    /// Number of tests that have ended so far.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Total assertions credited so far.
    pub fn assertions(&self) -> u64 {
        self.assertions
    }

    /// Record the end of a test; returns the new completed count.
    pub fn record_completion(&mut self, test: &TestInfo) -> u64 {
        self.completed += 1;
        self.assertions += test.assertion_contribution();
        self.completed
    }

    /// Append an outcome record for a test.
    pub fn record_outcome(&mut self, test_name: &str, outcome: Outcome, message: String) {
        self.outcomes
            .entry(outcome.category)
            .or_default()
            .push(OutcomeRecord {
                test_name: test_name.to_string(),
                message,
                counts_as_error: outcome.counts_as_error,
            });
    }

    /// Records for a category, in arrival order.
    pub fn records(&self, category: Category) -> &[OutcomeRecord] {
        self.outcomes
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of records in a category.
    pub fn count(&self, category: Category) -> usize {
        self.records(category).len()
    }

    /// Returns the number of records across all categories.
    pub fn total_records(&self) -> usize {
        self.outcomes.values().map(Vec::len).sum()
    }

    /// Returns the number of records that count as errors, whatever category
    /// they are listed under.
    pub fn error_count(&self) -> usize {
        self.outcomes
            .values()
            .flatten()
            .filter(|r| r.counts_as_error)
            .count()
    }

    /// True once every planned test has ended.
    pub fn is_complete(&self) -> bool {
        self.planned == Some(self.completed)
    }
}
