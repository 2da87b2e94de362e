//! Live progress display
//!
//! Tracks where the bar is and whether it is on screen, so that any other
//! output can be interleaved with it through matched `hide`/`show` calls.

use crate::error::Result;
use crate::ui::UI;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Inactive,
    Active {
        total: u64,
        position: u64,
        visible: bool,
    },
}

/// The single progress bar of a run.
#[derive(Debug)]
pub struct ProgressDisplay {
    state: State,
}

impl ProgressDisplay {
    pub fn new() -> Self {
        ProgressDisplay {
            state: State::Inactive,
        }
    }

    /// Whether the bar has been started.
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Current position, once active.
    pub fn position(&self) -> Option<u64> {
        match self.state {
            State::Active { position, .. } => Some(position),
            State::Inactive => None,
        }
    }

    /// Whether the bar is currently on screen.
    pub fn is_visible(&self) -> bool {
        matches!(self.state, State::Active { visible: true, .. })
    }

    /// Activate the bar for `total` tests and draw it. Does nothing if the
    /// bar is already active.
    pub fn start(&mut self, ui: &mut dyn UI, total: u64) -> Result<()> {
        if self.is_active() {
            return Ok(());
        }
        ui.progress_start(total)?;
        self.state = State::Active {
            total,
            position: 0,
            visible: false,
        };
        self.show(ui)
    }

    /// Move one step forward, redrawing in place if the bar is shown.
    pub fn advance(&mut self, ui: &mut dyn UI) -> Result<()> {
        if let State::Active {
            total,
            ref mut position,
            visible,
        } = self.state
        {
            if *position >= total {
                warn!("progress already at {} of {}, not advancing", position, total);
                return Ok(());
            }
            *position += 1;
            if visible {
                ui.progress_draw(*position)?;
            }
        }
        Ok(())
    }

    /// Take the bar off screen and leave a blank line, so arbitrary output can
    /// follow.
    pub fn hide(&mut self, ui: &mut dyn UI) -> Result<()> {
        if let State::Active {
            ref mut visible, ..
        } = self.state
        {
            if *visible {
                ui.progress_clear()?;
                ui.output("")?;
                *visible = false;
            }
        }
        Ok(())
    }

    /// Draw the bar again at its current position.
    pub fn show(&mut self, ui: &mut dyn UI) -> Result<()> {
        if let State::Active {
            position,
            ref mut visible,
            ..
        } = self.state
        {
            ui.progress_draw(position)?;
            *visible = true;
        }
        Ok(())
    }
}

impl Default for ProgressDisplay {
    fn default() -> Self {
        Self::new()
    }
}
