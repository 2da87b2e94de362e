//! testprogress - Show live progress for a stream of test events

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use testprogress::config::{ColorMode, ReporterConfig};
use testprogress::error::Result;
use testprogress::event_stream;
use testprogress::ui::{CliUI, UI};
use testprogress::Reporter;

#[derive(Parser)]
#[command(name = "testprogress")]
#[command(about = "Render a progress bar and summary for a test event stream", long_about = None)]
struct Cli {
    /// Event stream to read (defaults to stdin)
    input: Option<PathBuf>,

    /// Configuration file (defaults to .testprogress.conf if present)
    #[arg(short, long, env = "TESTPROGRESS_CONFIG")]
    config: Option<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum)]
    color: Option<ColorMode>,

    /// Width of the progress bar, in columns
    #[arg(long)]
    bar_width: Option<usize>,
}

fn load_config(cli: &Cli) -> Result<ReporterConfig> {
    let mut config = match &cli.config {
        Some(path) => ReporterConfig::load_from_file(path)?,
        None => ReporterConfig::discover(Path::new("."))?,
    };
    if let Some(color) = cli.color {
        config.color = color;
    }
    if let Some(width) = cli.bar_width.filter(|w| *w > 0) {
        config.bar_width = width;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(&cli)?;
    let mut ui = CliUI::new(&config);
    let mut reporter = Reporter::new(&mut ui, config);

    let delivered = match &cli.input {
        Some(path) => event_stream::process_stream(BufReader::new(File::open(path)?), &mut reporter)?,
        None => event_stream::process_stream(io::stdin().lock(), &mut reporter)?,
    };
    log::debug!("processed {} events", delivered);

    let verdict = reporter.verdict();
    let exit_code = match verdict {
        Some(verdict) if verdict.is_success() => 0,
        Some(_) => 1,
        None => {
            let state = reporter.state();
            log::warn!(
                "event stream ended after {} of {} planned tests",
                state.completed(),
                state
                    .planned()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "?".to_string())
            );
            1
        }
    };
    drop(reporter);
    // The summary flushes on its own; a cut-off stream leaves output pending.
    if verdict.is_none() {
        ui.flush()?;
    }
    Ok(exit_code)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "Error: {}", e);
            std::process::exit(1);
        }
    }
}
