//! Pattern selectors
//!
//! A selector decides which entry of a pipeline's sequence is shown and
//! when to switch. The scheduler asks [`PatternSelector::change_needed`]
//! on every tick and commits the switch with
//! [`PatternSelector::change_pattern`].

mod auto_show;
mod external;
mod pushbutton;

pub use auto_show::AutoShowSelector;
pub use external::ExternalControlSelector;
pub use pushbutton::{DEBOUNCE_INTERVAL_MS, PushbuttonSelector};

use crate::{
    sequence::{Selection, Sequence},
    time::Millis,
};

pub trait PatternSelector {
    /// Sample inputs, called once per tick before `change_needed`
    fn poll(&mut self, _now: Millis) {}

    /// Check if the shown pattern should change now
    fn change_needed(&self, now: Millis) -> bool;

    /// Commit a pattern change and return the entry index to show
    fn change_pattern(&mut self, now: Millis, sequence: &Sequence<'_>) -> usize;

    /// Request a specific entry or automatic mode
    ///
    /// Returns `false` and leaves the selector untouched if the request
    /// is out of range or not supported.
    fn set_index(&mut self, selection: Selection, sequence: &Sequence<'_>) -> bool;

    /// Current selection mode
    fn selection(&self) -> Selection;
}
