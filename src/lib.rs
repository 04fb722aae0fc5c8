#![no_std]

pub mod animation;
pub mod catalog;
pub mod channel;
pub mod color;
pub mod control;
pub mod math8;
pub mod pixel_set;
pub mod random;
pub mod scheduler;
pub mod selector;
pub mod sequence;
pub mod time;

pub use animation::{AnimationKind, AnimationSlot, InitError, PatternConfig};
pub use control::{
    IntentChannel, IntentReceiver, IntentSender, Preset, SelectionIntent, parse_query,
};
pub use pixel_set::{LayoutError, PixelLayout, PixelSet};
pub use random::RandomSource;
pub use scheduler::{
    MAX_PIPELINES, PipelineError, PipelineStatus, Scheduler, StatusIndicator, TickReport,
};
pub use selector::{
    AutoShowSelector, ExternalControlSelector, PatternSelector, PushbuttonSelector,
};
pub use sequence::{Selection, Sequence, SequenceEntry};
pub use time::Millis;

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write the physical cells of every pipeline, in pipeline order
    fn write(&mut self, frames: &[&[Rgb]]);
}
