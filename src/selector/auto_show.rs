//! Automatic show selector
//!
//! Cycles through every entry with a non-zero duration, showing each for
//! its duration.

use super::PatternSelector;
use crate::{
    sequence::{Selection, Sequence},
    time::Millis,
};

/// When the next automatic change happens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deadline {
    /// Change on the next check
    Due,
    At(Millis),
    /// No entry has a duration, stay put
    Never,
}

#[derive(Debug, Clone)]
pub struct AutoShowSelector {
    current: Option<usize>,
    deadline: Deadline,
}

impl AutoShowSelector {
    /// Selector that picks the first scheduled entry right away
    pub const fn new() -> Self {
        Self {
            current: None,
            deadline: Deadline::Due,
        }
    }

    /// Restart from the first scheduled entry on the next check
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Index picked by the last change, if any
    pub const fn current(&self) -> Option<usize> {
        self.current
    }
}

impl Default for AutoShowSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternSelector for AutoShowSelector {
    fn change_needed(&self, now: Millis) -> bool {
        match self.deadline {
            Deadline::Due => true,
            Deadline::At(deadline) => now.is_reached(deadline),
            Deadline::Never => false,
        }
    }

    fn change_pattern(&mut self, now: Millis, sequence: &Sequence<'_>) -> usize {
        let len = sequence.len();
        let start = self.current.map_or(0, |index| index + 1);

        let next = (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&index| sequence.get(index).is_some_and(|entry| entry.is_scheduled()));

        match next.and_then(|index| Some((index, sequence.get(index)?.duration))) {
            Some((index, duration)) => {
                self.current = Some(index);
                self.deadline = Deadline::At(now.after(duration));
                index
            }
            None => {
                self.current = Some(0);
                self.deadline = Deadline::Never;
                0
            }
        }
    }

    fn set_index(&mut self, _selection: Selection, _sequence: &Sequence<'_>) -> bool {
        false
    }

    fn selection(&self) -> Selection {
        Selection::Automatic
    }
}
