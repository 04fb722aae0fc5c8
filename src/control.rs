//! Selection control
//!
//! Turns external requests (web UI queries, buttons on another core) into
//! selection intents the scheduler applies between ticks.

use heapless::Vec;

use crate::{
    channel::{Channel, Receiver, Sender},
    sequence::Selection,
};

/// Maximum number of intents decoded from one query
pub const MAX_QUERY_INTENTS: usize = 8;

const QUERY_KEY_SECTION: &str = "section";
const QUERY_KEY_PRESET: &str = "preset";
const QUERY_KEY_AUTO: &str = "auto";

/// Request to change what one or more pipelines show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionIntent {
    /// Select an entry, or automatic mode, on one pipeline
    Select {
        pipeline: usize,
        selection: Selection,
    },
    /// Apply a registered preset
    Preset(usize),
    /// Put every pipeline into automatic mode
    AllAutomatic,
}

/// Named set of selections applied to pipelines in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset<'a> {
    pub name: &'a str,
    /// Selection per pipeline; pipelines past the end are left alone
    pub selections: &'a [Selection],
}

impl<'a> Preset<'a> {
    pub const fn new(name: &'a str, selections: &'a [Selection]) -> Self {
        Self { name, selections }
    }
}

/// Type alias for intent sender
pub type IntentSender<'a, const SIZE: usize> = Sender<'a, SelectionIntent, SIZE>;

/// Type alias for intent receiver
pub type IntentReceiver<'a, const SIZE: usize> = Receiver<'a, SelectionIntent, SIZE>;

/// Type alias for the intent channel
pub type IntentChannel<const SIZE: usize> = Channel<SelectionIntent, SIZE>;

/// Decode a `key=value&key=value` query into selection intents
///
/// Understood keys:
/// - `sectionN=<index>` selects entry `index` on pipeline `N`, 255 means automatic
/// - `preset=<n>` applies preset `n`
/// - `auto=<anything>` puts every pipeline into automatic mode
///
/// Unknown keys and malformed values are skipped. Intents beyond
/// [`MAX_QUERY_INTENTS`] are dropped.
pub fn parse_query(query: &str) -> Vec<SelectionIntent, MAX_QUERY_INTENTS> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut intents = Vec::new();

    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let Some(intent) = parse_pair(key.trim(), value.trim()) else {
            continue;
        };
        if intents.push(intent).is_err() {
            break;
        }
    }

    intents
}

fn parse_pair(key: &str, value: &str) -> Option<SelectionIntent> {
    if key == QUERY_KEY_AUTO {
        return Some(SelectionIntent::AllAutomatic);
    }
    if key == QUERY_KEY_PRESET {
        return value.parse().ok().map(SelectionIntent::Preset);
    }

    let pipeline = key.strip_prefix(QUERY_KEY_SECTION)?.parse().ok()?;
    let selection = Selection::from_raw(value.parse().ok()?);
    Some(SelectionIntent::Select {
        pipeline,
        selection,
    })
}
