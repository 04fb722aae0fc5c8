//! Pattern sequences
//!
//! A sequence is a fixed, read-only list of pattern entries addressed by
//! index. Selectors decide which entry a pipeline shows.

use core::fmt;

use embassy_time::Duration;

use crate::animation::PatternConfig;

/// Raw selection value that stands for automatic mode
pub const AUTOMATIC_SENTINEL: u8 = 255;

/// One pattern of a [`Sequence`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceEntry {
    /// Raw animation kind id
    pub kind: u8,
    /// Time shown in automatic mode, zero excludes the entry from it
    pub duration: Duration,
    pub config: PatternConfig,
    pub name: Option<&'static str>,
}

impl SequenceEntry {
    /// Entry whose kind is taken from its configuration
    pub const fn new(config: PatternConfig, duration: Duration) -> Self {
        Self {
            kind: config.kind().raw(),
            duration,
            config,
            name: None,
        }
    }

    /// Entry with an explicit raw kind id
    pub const fn with_raw_kind(kind: u8, config: PatternConfig, duration: Duration) -> Self {
        Self {
            kind,
            duration,
            config,
            name: None,
        }
    }

    #[must_use]
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Whether automatic mode may select this entry
    pub const fn is_scheduled(&self) -> bool {
        self.duration.as_millis() > 0
    }
}

/// Fixed, ordered list of pattern entries
#[derive(Debug, Clone, Copy)]
pub struct Sequence<'a> {
    entries: &'a [SequenceEntry],
}

impl<'a> Sequence<'a> {
    pub const fn new(entries: &'a [SequenceEntry]) -> Self {
        Self { entries }
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a SequenceEntry> {
        self.entries.get(index)
    }

    pub const fn entries(&self) -> &'a [SequenceEntry] {
        self.entries
    }

    /// Name to show for entry `index`, with a placeholder for unnamed entries
    pub fn display_name(&self, index: usize) -> DisplayName<'a> {
        match self.get(index).and_then(|entry| entry.name) {
            Some(name) => DisplayName::Named(name),
            None => DisplayName::Placeholder(index),
        }
    }

    /// Check if `selection` refers to this sequence
    pub const fn accepts(&self, selection: Selection) -> bool {
        match selection {
            Selection::Automatic => true,
            Selection::Manual(index) => index < self.entries.len(),
        }
    }
}

/// Display name of a sequence entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayName<'a> {
    Named(&'a str),
    /// Unnamed entry, shown as `Pattern <index>`
    Placeholder(usize),
}

impl fmt::Display for DisplayName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Placeholder(index) => write!(f, "Pattern {index}"),
        }
    }
}

/// Pattern selection of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Cycle through the sequence on entry durations
    Automatic,
    /// Stay on one entry
    Manual(usize),
}

impl Selection {
    /// Decode a raw selection value, 255 meaning automatic
    pub const fn from_raw(value: u8) -> Self {
        if value == AUTOMATIC_SENTINEL {
            Self::Automatic
        } else {
            Self::Manual(value as usize)
        }
    }

    /// Encode as a raw selection value
    ///
    /// Indices that do not fit below the sentinel encode as automatic.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn raw(self) -> u8 {
        match self {
            Self::Manual(index) if index < AUTOMATIC_SENTINEL as usize => index as u8,
            _ => AUTOMATIC_SENTINEL,
        }
    }
}
