//! Externally controlled selector
//!
//! Shows whatever entry was last requested through `set_index`, or runs
//! an automatic show while in automatic mode.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{AutoShowSelector, PatternSelector};
use crate::{
    sequence::{Selection, Sequence},
    time::Millis,
};

#[derive(Debug, Clone)]
enum Mode {
    Manual(usize),
    Automatic(AutoShowSelector),
}

#[derive(Debug, Clone)]
pub struct ExternalControlSelector {
    mode: Mode,
    change_requested: bool,
}

impl ExternalControlSelector {
    /// Selector in automatic mode with a change pending
    pub const fn new() -> Self {
        Self {
            mode: Mode::Automatic(AutoShowSelector::new()),
            change_requested: true,
        }
    }
}

impl Default for ExternalControlSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternSelector for ExternalControlSelector {
    fn change_needed(&self, now: Millis) -> bool {
        if self.change_requested {
            return true;
        }
        match &self.mode {
            Mode::Manual(_) => false,
            Mode::Automatic(auto) => auto.change_needed(now),
        }
    }

    fn change_pattern(&mut self, now: Millis, sequence: &Sequence<'_>) -> usize {
        self.change_requested = false;
        match &mut self.mode {
            Mode::Manual(index) => *index,
            Mode::Automatic(auto) => auto.change_pattern(now, sequence),
        }
    }

    fn set_index(&mut self, selection: Selection, sequence: &Sequence<'_>) -> bool {
        if !sequence.accepts(selection) {
            #[cfg(feature = "esp32-log")]
            println!("[selector] rejected selection {:?}", selection);
            return false;
        }

        self.mode = match selection {
            Selection::Manual(index) => Mode::Manual(index),
            Selection::Automatic => Mode::Automatic(AutoShowSelector::new()),
        };
        self.change_requested = true;
        true
    }

    fn selection(&self) -> Selection {
        match self.mode {
            Mode::Manual(index) => Selection::Manual(index),
            Mode::Automatic(_) => Selection::Automatic,
        }
    }
}
