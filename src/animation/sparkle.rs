//! Sparkle pattern
//!
//! A background with a set of randomly placed foreground cells that is
//! lit for `dwell`, turned off, and re-rolled after `change`.

use embassy_time::Duration;
use heapless::Vec;

use super::{Animation, AnimationKind, InitError, RenderContext, Update};
use crate::{
    color::{Rgb, random_rgb_pair, scale_video},
    time::Millis,
};

/// Maximum number of cells lit at once
pub const MAX_SPARKLE_DENSITY: usize = 128;

/// Color selection for [`Sparkle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparkleColors {
    /// Fixed sparkle and background colors
    Fixed { foreground: Rgb, background: Rgb },
    /// Random sparkle color with a contrasting background
    Random,
}

/// Configuration for [`Sparkle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparkleConfig {
    pub colors: SparkleColors,
    /// Number of sparkles lit simultaneously
    pub density: u8,
    /// How long a set of sparkles stays lit
    pub dwell: Duration,
    /// Period between sparkle sets, measured from when a set was lit
    pub change: Duration,
}

#[derive(Debug, Clone)]
pub struct Sparkle {
    config: SparkleConfig,
    foreground: Rgb,
    background: Rgb,
    lit: Vec<u16, MAX_SPARKLE_DENSITY>,
    sparkles_on: bool,
    lit_at: Millis,
}

impl Sparkle {
    /// Indices of the cells currently showing a sparkle
    pub fn lit(&self) -> &[u16] {
        if self.sparkles_on { &self.lit } else { &[] }
    }

    pub const fn foreground(&self) -> Rgb {
        self.foreground
    }

    pub const fn background(&self) -> Rgb {
        self.background
    }

    fn light_new_set(&mut self, ctx: &mut RenderContext<'_>) {
        let len = u16::try_from(ctx.pixels.len()).unwrap_or(u16::MAX);
        let count = usize::from(self.config.density).min(usize::from(len));

        self.lit.clear();
        while self.lit.len() < count {
            let index = ctx.rng.below(len);
            if self.lit.contains(&index) {
                continue;
            }
            if self.lit.push(index).is_err() {
                break;
            }
            ctx.pixels[usize::from(index)] = self.foreground;
        }

        self.sparkles_on = true;
        self.lit_at = ctx.now;
    }
}

impl Animation for Sparkle {
    type Config = SparkleConfig;
    const KIND: AnimationKind = AnimationKind::Sparkle;

    fn new(config: &SparkleConfig) -> Self {
        Self {
            config: *config,
            foreground: Rgb::default(),
            background: Rgb::default(),
            lit: Vec::new(),
            sparkles_on: false,
            lit_at: Millis::default(),
        }
    }

    fn init(&mut self, ctx: &mut RenderContext<'_>) -> Result<Millis, InitError> {
        if usize::from(self.config.density) > MAX_SPARKLE_DENSITY || ctx.pixels.is_empty() {
            return Err(InitError::Unrunnable(Self::KIND));
        }

        let (foreground, background) = match self.config.colors {
            SparkleColors::Fixed {
                foreground,
                background,
            } => (foreground, background),
            SparkleColors::Random => random_rgb_pair(ctx.rng),
        };
        self.foreground = scale_video(foreground, ctx.layout.foreground_scale);
        self.background = scale_video(background, ctx.layout.background_scale);

        ctx.pixels.fill(self.background);
        self.lit.clear();
        self.sparkles_on = false;

        Ok(ctx.now)
    }

    fn update(&mut self, ctx: &mut RenderContext<'_>) -> Update {
        if self.sparkles_on {
            self.sparkles_on = false;
            for &index in &self.lit {
                ctx.pixels[usize::from(index)] = self.background;
            }

            // Fall through and light the next set right away if it is due
            let next_set = self.lit_at.after(self.config.change);
            if !ctx.now.is_reached(next_set) {
                return Update::redraw(next_set);
            }
        }

        self.light_new_set(ctx);
        Update::redraw(ctx.now.after(self.config.dwell))
    }
}
