//! testprogress - Live progress reporting for test runs
//!
//! testprogress receives the lifecycle events of a test run (suites and tests
//! starting and ending, tests failing, erroring, being skipped...), keeps a
//! progress bar up to date on the terminal, prints failures as soon as they
//! happen and prints a categorized summary once the last test has ended.
//!
//! # Architecture
//!
//! - [`reporter`]: the [`Reporter`], which receives lifecycle callbacks
//! - [`outcome`]: classification of outcome events into summary categories
//! - [`run_state`]: counts and outcome records accumulated during a run
//! - [`progress`]: the progress bar state machine
//! - [`announcer`]: immediate output of failed and errored tests
//! - [`summary`]: the final summary and verdict
//! - [`event_stream`]: line-delimited JSON event stream input
//! - [`ui`]: output sink abstraction and terminal implementation
//! - [`config`]: .testprogress.conf configuration file parsing
//! - [`resources`]: the resource usage footer line
//! - [`error`]: Error types and Result alias
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use testprogress::config::ReporterConfig;
//! use testprogress::outcome::{EventKind, TestError};
//! use testprogress::run_state::{SuiteInfo, TestInfo};
//! use testprogress::ui::UI;
//! use testprogress::Reporter;
//!
//! # fn main() -> testprogress::error::Result<()> {
//! struct PlainUI;
//! impl UI for PlainUI {
//!     fn output(&mut self, msg: &str) -> testprogress::error::Result<()> {
//!         println!("{}", msg);
//!         Ok(())
//!     }
//!     fn write(&mut self, text: &str) -> testprogress::error::Result<()> {
//!         print!("{}", text);
//!         Ok(())
//!     }
//!     fn progress_start(&mut self, _total: u64) -> testprogress::error::Result<()> {
//!         Ok(())
//!     }
//!     fn progress_draw(&mut self, _position: u64) -> testprogress::error::Result<()> {
//!         Ok(())
//!     }
//!     fn progress_clear(&mut self) -> testprogress::error::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut ui = PlainUI;
//! let mut reporter = Reporter::new(&mut ui, ReporterConfig::default());
//! reporter.on_suite_start(&SuiteInfo::new("suite", 1))?;
//!
//! let test = TestInfo::new("test_addition").with_assertions(2);
//! reporter.on_test_start(&test)?;
//! reporter.on_outcome(&test, EventKind::Failure, &TestError::new("1 + 1 != 3"))?;
//! reporter.on_test_end(&test, Duration::from_millis(3))?;
//!
//! assert!(reporter.is_finished());
//! # Ok(())
//! # }
//! ```

pub mod announcer;
pub mod config;
pub mod error;
pub mod event_stream;
pub mod outcome;
pub mod progress;
pub mod reporter;
pub mod resources;
pub mod run_state;
pub mod summary;
pub mod ui;

pub use error::{Error, Result};
pub use reporter::Reporter;
