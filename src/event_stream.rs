//! Event stream processing
//!
//! This module reads a line-delimited JSON stream of test lifecycle events
//! and feeds it to a [`Reporter`]. One JSON object per line; blank lines and
//! lines starting with `#` are skipped.

use crate::error::{Error, Result};
use crate::outcome::{EventKind, TestError};
use crate::reporter::Reporter;
use crate::run_state::{SuiteInfo, TestInfo};
use serde::Deserialize;
use std::io::BufRead;
use std::time::Duration;

/// A single lifecycle event as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    SuiteStarted {
        name: String,
        tests: u64,
    },
    SuiteEnded {
        name: String,
    },
    TestStarted {
        name: String,
    },
    TestOutcome {
        name: String,
        outcome: String,
        #[serde(default)]
        error: Option<TestError>,
    },
    TestEnded {
        name: String,
        #[serde(default)]
        assertions: Option<u64>,
        /// Seconds the test took.
        #[serde(default)]
        time: Option<f64>,
    },
    /// Free-form output from the runner.
    Output {
        text: String,
    },
}

/// Parse one line of the stream. Returns `None` for lines that carry no
/// event.
pub fn parse_event(line: &str) -> Result<Option<Event>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

fn elapsed(time: Option<f64>) -> Duration {
    time.and_then(|t| Duration::try_from_secs_f64(t).ok())
        .unwrap_or_default()
}

/// Deliver a single event to `reporter`.
pub fn dispatch(reporter: &mut Reporter<'_>, event: Event) -> Result<()> {
    match event {
        Event::SuiteStarted { name, tests } => {
            reporter.on_suite_start(&SuiteInfo::new(name, tests))
        }
        Event::SuiteEnded { name } => reporter.on_suite_end(&name),
        Event::TestStarted { name } => reporter.on_test_start(&TestInfo::new(name)),
        Event::TestOutcome {
            name,
            outcome,
            error,
        } => {
            let kind: EventKind = outcome.parse()?;
            let error = error.unwrap_or_else(|| TestError::new(format!("Test {}", kind)));
            reporter.on_outcome(&TestInfo::new(name), kind, &error)
        }
        Event::TestEnded {
            name,
            assertions,
            time,
        } => {
            let test = TestInfo { name, assertions };
            reporter.on_test_end(&test, elapsed(time))
        }
        Event::Output { text } => reporter.write(&text),
    }
}

/// Read events from `reader` until end of input, feeding each to `reporter`.
///
/// Returns the number of events delivered. Stops at the first malformed line
/// or reporter error.
pub fn process_stream<R: BufRead>(reader: R, reporter: &mut Reporter<'_>) -> Result<usize> {
    let mut delivered = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let event = match parse_event(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(Error::Json(e)) => {
                return Err(Error::Parse {
                    line: index + 1,
                    message: e.to_string(),
                })
            }
            Err(e) => return Err(e),
        };
        dispatch(reporter, event)?;
        delivered += 1;
    }
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReporterConfig;
    use crate::outcome::Category;
    use crate::resources::StaticUsage;
    use crate::summary::Verdict;
    use crate::ui::test_ui::TestUI;

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(parse_event("").unwrap(), None);
        assert_eq!(parse_event("   ").unwrap(), None);
        assert_eq!(parse_event("# generated by runner").unwrap(), None);
    }

    #[test]
    fn test_parse_suite_started() {
        let event = parse_event(r#"{"event":"suite_started","name":"S","tests":3}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            event,
            Event::SuiteStarted {
                name: "S".to_string(),
                tests: 3
            }
        );
    }

    #[test]
    fn test_parse_test_ended_defaults() {
        let event = parse_event(r#"{"event":"test_ended","name":"T"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            event,
            Event::TestEnded {
                name: "T".to_string(),
                assertions: None,
                time: None
            }
        );
    }

    #[test]
    fn test_parse_unknown_event() {
        let result = parse_event(r#"{"event":"test_exploded","name":"T"}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_elapsed_ignores_nonsense() {
        assert_eq!(elapsed(None), Duration::ZERO);
        assert_eq!(elapsed(Some(-1.0)), Duration::ZERO);
        assert_eq!(elapsed(Some(f64::NAN)), Duration::ZERO);
        assert_eq!(elapsed(Some(f64::INFINITY)), Duration::ZERO);
        assert_eq!(elapsed(Some(1e300)), Duration::ZERO);
        assert_eq!(elapsed(Some(0.5)), Duration::from_millis(500));
    }

    #[test]
    fn test_process_stream_full_run() {
        let input = r#"
{"event":"suite_started","name":"S","tests":2}
{"event":"test_started","name":"T1"}
{"event":"test_outcome","name":"T1","outcome":"skipped","error":{"message":"no database"}}
{"event":"test_ended","name":"T1","assertions":0}
{"event":"test_started","name":"T2"}
{"event":"test_ended","name":"T2","assertions":3,"time":0.25}
{"event":"suite_ended","name":"S"}
"#;
        let mut ui = TestUI::new();
        let mut reporter = Reporter::new(&mut ui, ReporterConfig::default())
            .with_resources(Box::new(StaticUsage("usage".to_string())));
        let delivered = process_stream(input.as_bytes(), &mut reporter).unwrap();

        assert_eq!(delivered, 7);
        assert_eq!(reporter.state().assertions(), 3);
        assert_eq!(reporter.state().records(Category::Skipped)[0].message, "no database");
        assert_eq!(reporter.verdict(), Some(Verdict::Incomplete));
    }

    #[test]
    fn test_process_stream_huge_time_is_ignored() {
        let input = concat!(
            "{\"event\":\"suite_started\",\"name\":\"S\",\"tests\":1}\n",
            "{\"event\":\"test_outcome\",\"name\":\"T\",\"outcome\":\"warning\",\"error\":{\"message\":\"deprecated\"}}\n",
            "{\"event\":\"test_ended\",\"name\":\"T\",\"time\":1e300}\n",
        );
        let mut ui = TestUI::new();
        let mut reporter = Reporter::new(&mut ui, ReporterConfig::default())
            .with_resources(Box::new(StaticUsage("usage".to_string())));
        process_stream(input.as_bytes(), &mut reporter).unwrap();

        assert_eq!(reporter.state().completed(), 1);
        assert_eq!(reporter.state().records(Category::Errored)[0].message, "deprecated");
        assert_eq!(reporter.verdict(), Some(Verdict::Failures));
    }

    #[test]
    fn test_process_stream_reports_line_number() {
        let input = "{\"event\":\"suite_started\",\"name\":\"S\",\"tests\":1}\n\nnot json\n";
        let mut ui = TestUI::new();
        let mut reporter = Reporter::new(&mut ui, ReporterConfig::default());
        let err = process_stream(input.as_bytes(), &mut reporter).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn test_process_stream_unknown_outcome_is_fatal() {
        let input = concat!(
            "{\"event\":\"suite_started\",\"name\":\"S\",\"tests\":1}\n",
            "{\"event\":\"test_outcome\",\"name\":\"T\",\"outcome\":\"flaky\"}\n",
        );
        let mut ui = TestUI::new();
        let mut reporter = Reporter::new(&mut ui, ReporterConfig::default());
        let err = process_stream(input.as_bytes(), &mut reporter).unwrap_err();
        assert!(matches!(err, Error::UnknownOutcome(ref k) if k == "flaky"));
    }

    #[test]
    fn test_missing_error_payload_gets_placeholder() {
        let mut ui = TestUI::new();
        let mut reporter = Reporter::new(&mut ui, ReporterConfig::default());
        dispatch(
            &mut reporter,
            Event::SuiteStarted {
                name: "S".to_string(),
                tests: 1,
            },
        )
        .unwrap();
        dispatch(
            &mut reporter,
            Event::TestOutcome {
                name: "T".to_string(),
                outcome: "risky".to_string(),
                error: None,
            },
        )
        .unwrap();
        assert_eq!(
            reporter.state().records(Category::Risky)[0].message,
            "Test risky"
        );
    }
}
