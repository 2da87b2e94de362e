//! Outcome classification
//!
//! Maps the outcome events a test runner reports onto the categories shown in
//! the summary, and models the error payload carried by those events.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Kind of non-passing outcome reported for a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// An assertion did not hold.
    Failure,
    /// The test raised an uncaught error.
    Error,
    /// The test produced a warning.
    Warning,
    /// The test was skipped.
    Skipped,
    /// The test was marked incomplete.
    Incomplete,
    /// The test was flagged as risky.
    Risky,
}

impl EventKind {
    /// Wire name of this kind, as used by the event stream.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Failure => "failure",
            EventKind::Error => "error",
            EventKind::Warning => "warning",
            EventKind::Skipped => "skipped",
            EventKind::Incomplete => "incomplete",
            EventKind::Risky => "risky",
        }
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "failure" => Ok(EventKind::Failure),
            "error" => Ok(EventKind::Error),
            "warning" => Ok(EventKind::Warning),
            "skipped" => Ok(EventKind::Skipped),
            "incomplete" => Ok(EventKind::Incomplete),
            "risky" => Ok(EventKind::Risky),
            other => Err(Error::UnknownOutcome(other.to_string())),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary category of an unstable test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Failed,
    Errored,
    Warned,
    Skipped,
    Incomplete,
    Risky,
}

impl Category {
    /// Order in which categories are listed in the final summary.
    pub const SUMMARY_ORDER: [Category; 6] = [
        Category::Failed,
        Category::Warned,
        Category::Errored,
        Category::Skipped,
        Category::Incomplete,
        Category::Risky,
    ];

    /// Lowercase label used in summary count lines ("2 skipped tests:").
    pub fn label(&self) -> &'static str {
        match self {
            Category::Failed => "failed",
            Category::Errored => "errored",
            Category::Warned => "warned",
            Category::Skipped => "skipped",
            Category::Incomplete => "incomplete",
            Category::Risky => "risky",
        }
    }

    /// Whether a single outcome in this category makes the run a failure.
    pub fn breaks_run(&self) -> bool {
        matches!(
            self,
            Category::Failed | Category::Errored | Category::Warned
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classifying an outcome event.
///
/// `category` decides where the test is listed; `counts_as_error` decides
/// whether it also lands in the run's error tally; `announced` decides
/// whether the test is printed as soon as it is reported. Warnings are listed
/// as errored tests but stay silent until the summary. Incomplete and risky
/// tests are listed under their own heading and counted as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub category: Category,
    pub counts_as_error: bool,
    pub announced: bool,
}

/// Classify an outcome event.
pub fn classify(kind: EventKind) -> Outcome {
    let (category, counts_as_error, announced) = match kind {
        EventKind::Failure => (Category::Failed, false, true),
        EventKind::Error => (Category::Errored, true, true),
        EventKind::Warning => (Category::Errored, true, false),
        EventKind::Skipped => (Category::Skipped, false, false),
        EventKind::Incomplete => (Category::Incomplete, true, false),
        EventKind::Risky => (Category::Risky, true, false),
    };
    Outcome {
        category,
        counts_as_error,
        announced,
    }
}

/// Error payload attached to an outcome event, with its chain of causes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestError {
    /// Error class or type name, if the runner reports one.
    #[serde(default)]
    pub kind: Option<String>,
    pub message: String,
    /// The error this one was raised from.
    #[serde(default)]
    pub previous: Option<Box<TestError>>,
}

impl TestError {
    pub fn new(message: impl Into<String>) -> Self {
        TestError {
            kind: None,
            message: message.into(),
            previous: None,
        }
    }

    /// Set the error type name
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Attach the error this one was caused by
    pub fn caused_by(mut self, previous: TestError) -> Self {
        self.previous = Some(Box::new(previous));
        self
    }

    /// Iterate over this error and its causes, visiting at most `max_depth`
    /// errors.
    pub fn chain(&self, max_depth: usize) -> Chain<'_> {
        Chain {
            next: Some(self),
            remaining: max_depth,
        }
    }

    /// Render this error followed by each cause on its own line, prefixed
    /// with "Caused by".
    pub fn render(&self, max_depth: usize) -> String {
        self.chain(max_depth)
            .enumerate()
            .map(|(i, err)| {
                if i == 0 {
                    err.to_string()
                } else {
                    format!("Caused by {}", err)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Some(kind) => write!(f, "{}: {}", kind, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Bounded iterator over an error and its causes.
pub struct Chain<'a> {
    next: Option<&'a TestError>,
    remaining: usize,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a TestError;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next.take()?;
        self.remaining -= 1;
        self.next = current.previous.as_deref();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_total() {
        let cases = [
            (EventKind::Failure, Category::Failed, false),
            (EventKind::Error, Category::Errored, true),
            (EventKind::Warning, Category::Errored, true),
            (EventKind::Skipped, Category::Skipped, false),
            (EventKind::Incomplete, Category::Incomplete, true),
            (EventKind::Risky, Category::Risky, true),
        ];
        for (kind, category, counts_as_error) in cases {
            let outcome = classify(kind);
            assert_eq!(outcome.category, category, "{}", kind);
            assert_eq!(outcome.counts_as_error, counts_as_error, "{}", kind);
        }
    }

    #[test]
    fn test_only_failures_and_errors_are_announced() {
        let announced: Vec<_> = [
            EventKind::Failure,
            EventKind::Error,
            EventKind::Warning,
            EventKind::Skipped,
            EventKind::Incomplete,
            EventKind::Risky,
        ]
        .into_iter()
        .filter(|kind| classify(*kind).announced)
        .collect();
        assert_eq!(announced, vec![EventKind::Failure, EventKind::Error]);
    }

    #[test]
    fn test_warning_is_listed_as_errored_without_announcing() {
        let outcome = classify(EventKind::Warning);
        assert_eq!(outcome.category, Category::Errored);
        assert!(outcome.counts_as_error);
        assert!(!outcome.announced);
    }

    #[test]
    fn test_event_kind_from_str() {
        assert_eq!("risky".parse::<EventKind>().unwrap(), EventKind::Risky);
        let err = "exploded".parse::<EventKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownOutcome(ref k) if k == "exploded"));
    }

    #[test]
    fn test_render_without_causes() {
        let err = TestError::new("boom");
        assert_eq!(err.render(32), "boom");
    }

    #[test]
    fn test_render_with_causes() {
        let err = TestError::new("could not save")
            .with_kind("RuntimeError")
            .caused_by(TestError::new("disk full").caused_by(TestError::new("quota")));
        assert_eq!(
            err.render(32),
            "RuntimeError: could not save\nCaused by disk full\nCaused by quota"
        );
    }

    #[test]
    fn test_chain_is_bounded() {
        let mut err = TestError::new("level 0");
        for i in 1..100 {
            err = TestError::new(format!("level {}", i)).caused_by(err);
        }
        assert_eq!(err.chain(10).count(), 10);
        assert_eq!(err.chain(1000).count(), 100);
        assert_eq!(err.chain(0).count(), 0);
    }

    #[test]
    fn test_deserialize_nested_error() {
        let err: TestError = serde_json::from_str(
            r#"{"kind":"TypeError","message":"bad","previous":{"message":"root"}}"#,
        )
        .unwrap();
        assert_eq!(err.kind.as_deref(), Some("TypeError"));
        assert_eq!(err.previous.as_ref().unwrap().message, "root");
    }
}
