//! Test utilities for UI testing

use crate::error::Result;
use crate::ui::{Tone, UI};

/// A single call made on the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Line(String),
    Styled(String, Tone),
    Text(String),
    Start(u64),
    Draw(u64),
    Clear,
    Flush,
}

/// A UI implementation for testing that records every call in order
pub struct TestUI {
    pub events: Vec<UiEvent>,
}

impl TestUI {
    pub fn new() -> Self {
        TestUI { events: Vec::new() }
    }

    /// All lines written, styled or not, in order.
    pub fn lines(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Line(line) | UiEvent::Styled(line, _) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    /// Positions the bar was drawn at, in order.
    pub fn draws(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Draw(pos) => Some(*pos),
                _ => None,
            })
            .collect()
    }
}

impl Default for TestUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI for TestUI {
    fn output(&mut self, message: &str) -> Result<()> {
        self.events.push(UiEvent::Line(message.to_string()));
        Ok(())
    }

    fn output_styled(&mut self, message: &str, tone: Tone) -> Result<()> {
        self.events
            .push(UiEvent::Styled(message.to_string(), tone));
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.events.push(UiEvent::Text(text.to_string()));
        Ok(())
    }

    fn progress_start(&mut self, total: u64) -> Result<()> {
        self.events.push(UiEvent::Start(total));
        Ok(())
    }

    fn progress_draw(&mut self, position: u64) -> Result<()> {
        self.events.push(UiEvent::Draw(position));
        Ok(())
    }

    fn progress_clear(&mut self) -> Result<()> {
        self.events.push(UiEvent::Clear);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.events.push(UiEvent::Flush);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_ui_lines() {
        let mut ui = TestUI::new();
        ui.output("plain").unwrap();
        ui.output_styled("loud", Tone::Error).unwrap();
        ui.write("raw").unwrap();
        assert_eq!(ui.lines(), vec!["plain", "loud"]);
        assert_eq!(ui.events.len(), 3);
    }

    #[test]
    fn test_test_ui_draws() {
        let mut ui = TestUI::new();
        ui.progress_draw(0).unwrap();
        ui.progress_clear().unwrap();
        ui.progress_draw(2).unwrap();
        assert_eq!(ui.draws(), vec![0, 2]);
    }
}
