//! Pipeline scheduler
//!
//! Runs every pipeline once per tick without blocking. Each pipeline asks
//! its selector whether to switch patterns, otherwise updates the live
//! animation once its requested time has come. The caller decides how
//! long to sleep between ticks.
//!
//! # Usage
//!
//! ```ignore
//! let mut scheduler: Scheduler<_, _, 300> = Scheduler::new(driver, rng);
//! scheduler.add_pipeline(Sequence::new(&ENTRIES), layout, &mut selector)?;
//!
//! loop {
//!     scheduler.process_intents(&receiver);
//!     let report = scheduler.tick(Instant::now());
//!     // Platform-specific sleep, bounded by report.next_due
//! }
//! ```

use core::fmt;

use embassy_time::{Duration, Instant};
use embedded_hal::digital::OutputPin;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    OutputDriver,
    animation::{AnimationKind, AnimationSlot, RenderContext},
    color::Rgb,
    control::{IntentReceiver, Preset, SelectionIntent},
    pixel_set::{LayoutError, PixelLayout, PixelSet},
    random::RandomSource,
    selector::PatternSelector,
    sequence::{DisplayName, Selection, Sequence},
    time::Millis,
};

/// Default number of pipelines a scheduler can hold
pub const MAX_PIPELINES: usize = 4;

/// Number of presets a scheduler can hold
pub const MAX_PRESETS: usize = 8;

/// Indicator driven with the complement of the aggregate timing flag
pub trait StatusIndicator {
    /// `lagging` is true while some pipeline cannot keep up
    fn set_lagging(&mut self, lagging: bool);
}

impl<P: OutputPin> StatusIndicator for P {
    fn set_lagging(&mut self, lagging: bool) {
        // The indicator is best effort
        let _ = self.set_state(lagging.into());
    }
}

/// Reasons a pipeline cannot be added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    /// Every pipeline slot is taken
    Full,
    /// The sequence has no entries
    EmptySequence,
    Layout(LayoutError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("no free pipeline slot"),
            Self::EmptySequence => f.write_str("sequence has no entries"),
            Self::Layout(error) => write!(f, "invalid layout: {error}"),
        }
    }
}

impl From<LayoutError> for PipelineError {
    fn from(error: LayoutError) -> Self {
        Self::Layout(error)
    }
}

/// Result of a single [`Scheduler::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Whether the output driver was written
    pub flushed: bool,
    /// Whether every pipeline is keeping up with its animation's timing
    pub keeping_up: bool,
    /// Earliest requested update across live animations
    pub next_due: Option<Instant>,
}

/// Read-only view of one pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStatus<'a> {
    pub active_index: usize,
    pub name: DisplayName<'a>,
    pub selection: Selection,
    /// Kind of the live animation, `None` while dark
    pub kind: Option<AnimationKind>,
    pub keeping_up: bool,
    /// Whether the last tick drew new colors into this pipeline
    pub produced: bool,
}

struct Pipeline<'a, const LEDS: usize> {
    sequence: Sequence<'a>,
    selector: &'a mut dyn PatternSelector,
    pixels: PixelSet<LEDS>,
    animation: Option<AnimationSlot>,
    next_update: Millis,
    active_index: usize,
    looped_without_update: bool,
    timing_satisfied: bool,
    produced: bool,
}

impl<const LEDS: usize> Pipeline<'_, LEDS> {
    fn step(&mut self, now: Millis, rng: &mut dyn RandomSource) {
        self.produced = false;
        self.selector.poll(now);

        if self.selector.change_needed(now) {
            self.change_pattern(now, rng);
            return;
        }

        match &mut self.animation {
            Some(animation) if now.is_reached(self.next_update) => {
                // An update on every tick means the loop is not fast enough
                // for this animation
                self.timing_satisfied = self.looped_without_update;
                self.looped_without_update = false;

                let layout = self.pixels.layout();
                let mut ctx = RenderContext {
                    pixels: self.pixels.active_mut(),
                    layout,
                    now,
                    rng,
                };
                let update = animation.update(&mut ctx);
                self.produced = update.produced;
                self.next_update = update.next_update;
            }
            _ => self.looped_without_update = true,
        }
    }

    fn change_pattern(&mut self, now: Millis, rng: &mut dyn RandomSource) {
        let index = self.selector.change_pattern(now, &self.sequence);
        self.active_index = index;
        self.animation = None;
        self.pixels.blank();
        self.produced = true;

        let Some(entry) = self.sequence.get(index) else {
            self.timing_satisfied = true;
            return;
        };

        let layout = self.pixels.layout();
        let mut ctx = RenderContext {
            pixels: self.pixels.active_mut(),
            layout,
            now,
            rng,
        };
        let started = AnimationSlot::create(entry.kind, &entry.config).and_then(|mut animation| {
            let next_update = animation.init(&mut ctx)?;
            Ok((animation, next_update))
        });

        match started {
            Ok((animation, next_update)) => {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[scheduler] pattern {} ({}) started",
                    index,
                    animation.kind().as_str()
                );
                self.animation = Some(animation);
                self.next_update = next_update;
                self.timing_satisfied = false;
            }
            Err(_error) => {
                #[cfg(feature = "esp32-log")]
                println!("[scheduler] pattern {} failed to start: {}", index, _error);
                self.pixels.blank();
                self.timing_satisfied = true;
            }
        }
    }

    fn status(&self) -> PipelineStatus<'_> {
        PipelineStatus {
            active_index: self.active_index,
            name: self.sequence.display_name(self.active_index),
            selection: self.selector.selection(),
            kind: self.animation.as_ref().map(AnimationSlot::kind),
            keeping_up: self.timing_satisfied,
            produced: self.produced,
        }
    }
}

/// Drives up to `PIPELINES` independent pattern pipelines
pub struct Scheduler<
    'a,
    O: OutputDriver,
    R: RandomSource,
    const LEDS: usize,
    const PIPELINES: usize = MAX_PIPELINES,
> {
    output: O,
    rng: R,
    pipelines: Vec<Pipeline<'a, LEDS>, PIPELINES>,
    presets: Vec<Preset<'a>, MAX_PRESETS>,
    indicator: Option<&'a mut dyn StatusIndicator>,
}

impl<'a, O: OutputDriver, R: RandomSource, const LEDS: usize, const PIPELINES: usize>
    Scheduler<'a, O, R, LEDS, PIPELINES>
{
    pub const fn new(output: O, rng: R) -> Self {
        Self {
            output,
            rng,
            pipelines: Vec::new(),
            presets: Vec::new(),
            indicator: None,
        }
    }

    /// Drive `indicator` with the lagging state after every tick
    #[must_use]
    pub fn with_indicator(mut self, indicator: &'a mut dyn StatusIndicator) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Add a pipeline and return its index
    ///
    /// The pipeline starts dark and switches to its first pattern on the
    /// next tick the selector asks for it.
    pub fn add_pipeline(
        &mut self,
        sequence: Sequence<'a>,
        layout: PixelLayout,
        selector: &'a mut dyn PatternSelector,
    ) -> Result<usize, PipelineError> {
        if self.pipelines.is_full() {
            return Err(PipelineError::Full);
        }
        if sequence.is_empty() {
            return Err(PipelineError::EmptySequence);
        }

        let pipeline = Pipeline {
            sequence,
            selector,
            pixels: PixelSet::new(layout)?,
            animation: None,
            next_update: Millis::default(),
            active_index: 0,
            looped_without_update: false,
            timing_satisfied: false,
            produced: false,
        };
        self.pipelines
            .push(pipeline)
            .map_err(|_| PipelineError::Full)?;

        Ok(self.pipelines.len() - 1)
    }

    /// Register a preset and return its index, `None` if there is no room
    pub fn add_preset(&mut self, preset: Preset<'a>) -> Option<usize> {
        self.presets.push(preset).ok()?;
        Some(self.presets.len() - 1)
    }

    pub fn presets(&self) -> &[Preset<'a>] {
        &self.presets
    }

    /// Run every pipeline once and flush if any produced new colors
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let now_ms = Millis::from(now);
        let mut flush = false;
        let mut keeping_up = true;
        let mut next_due: Option<Millis> = None;

        for pipeline in &mut self.pipelines {
            pipeline.step(now_ms, &mut self.rng);
            flush |= pipeline.produced;
            keeping_up &= pipeline.timing_satisfied;

            if pipeline.animation.is_some() {
                let due = pipeline.next_update;
                next_due = match next_due {
                    Some(earliest) if now_ms.until(earliest) <= now_ms.until(due) => {
                        Some(earliest)
                    }
                    _ => Some(due),
                };
            }
        }

        if flush {
            let mut frames: Vec<&[Rgb], PIPELINES> = Vec::new();
            for pipeline in &self.pipelines {
                let _ = frames.push(pipeline.pixels.physical());
            }
            self.output.write(&frames);
        }

        if let Some(indicator) = self.indicator.as_mut() {
            indicator.set_lagging(!keeping_up);
        }

        TickReport {
            flushed: flush,
            keeping_up,
            next_due: next_due
                .map(|due| now + Duration::from_millis(u64::from(now_ms.until(due)))),
        }
    }

    /// Forward a selection request to a pipeline's selector
    ///
    /// Returns `false` for unknown pipelines and rejected selections.
    pub fn set_index(&mut self, pipeline: usize, selection: Selection) -> bool {
        let Some(pipeline) = self.pipelines.get_mut(pipeline) else {
            return false;
        };
        pipeline.selector.set_index(selection, &pipeline.sequence)
    }

    /// Apply one selection intent
    ///
    /// Returns `false` if any part of the intent was rejected.
    pub fn apply(&mut self, intent: &SelectionIntent) -> bool {
        match *intent {
            SelectionIntent::Select {
                pipeline,
                selection,
            } => self.set_index(pipeline, selection),
            SelectionIntent::Preset(index) => {
                let Some(preset) = self.presets.get(index).copied() else {
                    return false;
                };
                let mut accepted = true;
                for (pipeline, selection) in preset.selections.iter().enumerate() {
                    accepted &= self.set_index(pipeline, *selection);
                }
                accepted
            }
            SelectionIntent::AllAutomatic => {
                let mut accepted = true;
                for pipeline in 0..self.pipelines.len() {
                    accepted &= self.set_index(pipeline, Selection::Automatic);
                }
                accepted
            }
        }
    }

    /// Apply every intent waiting in the channel, returns how many were applied
    pub fn process_intents<const SIZE: usize>(
        &mut self,
        intents: &IntentReceiver<'_, SIZE>,
    ) -> usize {
        let mut applied = 0;
        for intent in intents.drain() {
            if self.apply(&intent) {
                applied += 1;
            } else {
                #[cfg(feature = "esp32-log")]
                println!("[scheduler] rejected intent {:?}", intent);
            }
        }
        applied
    }

    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    pub fn status(&self, pipeline: usize) -> Option<PipelineStatus<'_>> {
        self.pipelines.get(pipeline).map(Pipeline::status)
    }

    pub fn sequence(&self, pipeline: usize) -> Option<Sequence<'a>> {
        self.pipelines.get(pipeline).map(|pipeline| pipeline.sequence)
    }

    /// All physical cells of a pipeline
    pub fn pixels(&self, pipeline: usize) -> Option<&[Rgb]> {
        self.pipelines
            .get(pipeline)
            .map(|pipeline| pipeline.pixels.physical())
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
