//! User interface abstraction
//!
//! This module provides the UI trait the reporter writes through, and the
//! terminal implementation used by the command-line tool.

use crate::config::ReporterConfig;
use crate::error::Result;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

#[cfg(test)]
pub mod test_ui;

/// Visual treatment of a line of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    /// Failure headers and the failing verdict.
    Error,
    /// Passing verdicts.
    Success,
    /// Neutral verdicts, such as an empty run.
    Notice,
}

/// Abstract output sink for the reporter
///
/// The progress primitives are deliberately dumb: the reporter tracks the
/// bar's position and visibility itself and only tells the sink what to draw.
pub trait UI {
    /// Output a line of text
    fn output(&mut self, message: &str) -> Result<()>;

    /// Output a line of text with a visual treatment
    fn output_styled(&mut self, message: &str, tone: Tone) -> Result<()> {
        let _ = tone;
        self.output(message)
    }

    /// Output raw text, without a trailing newline
    fn write(&mut self, text: &str) -> Result<()>;

    /// Create the progress bar for a run of `total` tests
    fn progress_start(&mut self, total: u64) -> Result<()>;

    /// Draw the progress bar at `position`
    fn progress_draw(&mut self, position: u64) -> Result<()>;

    /// Remove the progress bar from the screen until the next draw
    fn progress_clear(&mut self) -> Result<()>;

    /// Push any buffered output to the terminal
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Terminal UI: text on stdout, progress bar on stderr
///
/// Text written while the bar is cleared is held back and written inside
/// `ProgressBar::suspend` when the bar is drawn again, so the bar never
/// overlaps it.
pub struct CliUI {
    stdout: Term,
    bar: Option<ProgressBar>,
    bar_width: usize,
    cleared: bool,
    pending: String,
}

impl CliUI {
    /// Creates a terminal UI configured from `config`.
    pub fn new(config: &ReporterConfig) -> Self {
        config.color.apply();
        CliUI {
            stdout: Term::stdout(),
            bar: None,
            bar_width: config.bar_width,
            cleared: false,
            pending: String::new(),
        }
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        if self.cleared {
            self.pending.push_str(text);
            return Ok(());
        }
        let stdout = &self.stdout;
        match &self.bar {
            Some(bar) => bar.suspend(|| stdout.write_str(text))?,
            None => stdout.write_str(text)?,
        }
        Ok(())
    }

    fn write_pending(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.pending);
        let stdout = &self.stdout;
        match &self.bar {
            Some(bar) => bar.suspend(|| stdout.write_str(&text))?,
            None => stdout.write_str(&text)?,
        }
        Ok(())
    }

    fn bar_style(&self) -> Result<ProgressStyle> {
        let template = format!(
            " {{pos}}/{{len}} [{{bar:{}}}] {{percent:>3}}% {{elapsed:>6}}/{{duration:<6}}",
            self.bar_width
        );
        Ok(ProgressStyle::with_template(&template)?.progress_chars("=> "))
    }
}

fn paint(message: &str, tone: Tone) -> String {
    match tone {
        Tone::Plain => message.to_string(),
        Tone::Error => style(message).white().on_red().to_string(),
        Tone::Success => style(message).black().on_green().to_string(),
        Tone::Notice => style(message).black().on_cyan().to_string(),
    }
}

impl UI for CliUI {
    fn output(&mut self, message: &str) -> Result<()> {
        self.emit(&format!("{}\n", message))
    }

    fn output_styled(&mut self, message: &str, tone: Tone) -> Result<()> {
        // Style line by line so background colors don't bleed past newlines.
        let painted = message
            .split('\n')
            .map(|line| paint(line, tone))
            .collect::<Vec<_>>()
            .join("\n");
        self.emit(&format!("{}\n", painted))
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.emit(text)
    }

    fn progress_start(&mut self, total: u64) -> Result<()> {
        let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
        bar.set_style(self.bar_style()?);
        self.bar = Some(bar);
        Ok(())
    }

    fn progress_draw(&mut self, position: u64) -> Result<()> {
        self.cleared = false;
        self.write_pending()?;
        if let Some(bar) = &self.bar {
            bar.set_position(position);
        }
        Ok(())
    }

    fn progress_clear(&mut self) -> Result<()> {
        if self.bar.is_some() {
            self.cleared = true;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.cleared {
            if let Some(bar) = self.bar.take() {
                bar.finish_and_clear();
            }
            self.cleared = false;
        }
        self.write_pending()?;
        self.stdout.flush()?;
        Ok(())
    }
}
