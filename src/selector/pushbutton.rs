//! Pushbutton selector
//!
//! The selector boots into the automatic show. Each debounced press of an active-low button advances to the next
//! entry. Stepping past the last entry enters automatic mode. Presses
//! made during automatic mode advance from the entry on display.

use embedded_hal::digital::InputPin;

use super::{AutoShowSelector, PatternSelector};
use crate::{
    sequence::{Selection, Sequence},
    time::Millis,
};

/// Time the button level must stay stable before it counts
pub const DEBOUNCE_INTERVAL_MS: u32 = 100;

pub struct PushbuttonSelector<P: InputPin> {
    pin: P,
    /// Raw level seen on the last poll
    last_pressed: bool,
    last_edge: Millis,
    /// Level accepted after debouncing
    debounced_pressed: bool,
    pending_presses: u16,
    jump: Option<usize>,
    /// `None` while in automatic mode
    manual: Option<usize>,
    displayed: usize,
    auto: AutoShowSelector,
}

impl<P: InputPin> PushbuttonSelector<P> {
    /// Selector starting in automatic mode
    pub const fn new(pin: P) -> Self {
        Self {
            pin,
            last_pressed: false,
            last_edge: Millis::from_ms(0),
            debounced_pressed: false,
            pending_presses: 0,
            jump: None,
            manual: None,
            displayed: 0,
            auto: AutoShowSelector::new(),
        }
    }

    /// Confirmed presses not yet applied
    pub const fn pending_presses(&self) -> u16 {
        self.pending_presses
    }

    /// Release the input pin
    pub fn release(self) -> P {
        self.pin
    }

    fn enter_automatic(&mut self) {
        self.manual = None;
        self.auto.reset();
    }
}

impl<P: InputPin> PatternSelector for PushbuttonSelector<P> {
    fn poll(&mut self, now: Millis) {
        // A failed read counts as released
        let pressed = self.pin.is_low().unwrap_or(false);

        if pressed != self.last_pressed {
            self.last_pressed = pressed;
            self.last_edge = now;
            return;
        }

        if pressed != self.debounced_pressed
            && now.elapsed_since(self.last_edge) > DEBOUNCE_INTERVAL_MS
        {
            self.debounced_pressed = pressed;
            if pressed {
                self.pending_presses = self.pending_presses.saturating_add(1);
            }
        }
    }

    fn change_needed(&self, now: Millis) -> bool {
        if self.pending_presses > 0 || self.jump.is_some() {
            return true;
        }
        self.manual.is_none() && self.auto.change_needed(now)
    }

    fn change_pattern(&mut self, now: Millis, sequence: &Sequence<'_>) -> usize {
        if let Some(index) = self.jump.take() {
            self.pending_presses = 0;
            self.manual = Some(index);
            self.displayed = index;
            return index;
        }

        if self.pending_presses > 0 {
            let len = sequence.len();
            let mut cursor = Some(self.displayed);
            for _ in 0..self.pending_presses {
                cursor = match cursor {
                    Some(index) if index + 1 < len => Some(index + 1),
                    Some(_) => None,
                    None => Some(0),
                };
            }
            self.pending_presses = 0;

            match cursor {
                Some(index) => {
                    self.manual = Some(index);
                    self.displayed = index;
                    return index;
                }
                None => self.enter_automatic(),
            }
        }

        if self.manual.is_none() {
            self.displayed = self.auto.change_pattern(now, sequence);
        }
        self.displayed
    }

    fn set_index(&mut self, selection: Selection, sequence: &Sequence<'_>) -> bool {
        if !sequence.accepts(selection) {
            return false;
        }

        match selection {
            Selection::Manual(index) => self.jump = Some(index),
            Selection::Automatic => {
                self.jump = None;
                self.pending_presses = 0;
                self.enter_automatic();
            }
        }
        true
    }

    fn selection(&self) -> Selection {
        match (self.jump, self.manual) {
            (Some(index), _) | (None, Some(index)) => Selection::Manual(index),
            (None, None) => Selection::Automatic,
        }
    }
}
