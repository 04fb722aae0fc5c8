//! Split rotation
//!
//! Stripes one panel with foreground cells on a background, then rotates
//! the panel's four quarters in alternating directions so the stripes
//! appear to split apart and meet again.

use embassy_time::Duration;

use super::{Animation, AnimationKind, Direction, InitError, RenderContext, Update};
use crate::{
    color::{hsv, hsv2rgb, random_hue_pair, scale_video},
    pixel_set::replicate_panels,
    time::Millis,
};

/// Initial stripe layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// One foreground cell every `foreground_interval` cells
    Original,
    /// Pairs of foreground cells spaced symmetrically
    Symmetrical,
}

/// Configuration for [`SplitRotation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRotationConfig {
    pub mode: SplitMode,
    /// Pick a random hue pair instead of the configured hues
    pub random_hue: bool,
    pub foreground_hue: u8,
    pub background_hue: u8,
    /// Spacing between foreground cells
    pub foreground_interval: u8,
    pub direction: Direction,
    /// Delay between rotation steps
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct SplitRotation {
    config: SplitRotationConfig,
}

impl Animation for SplitRotation {
    type Config = SplitRotationConfig;
    const KIND: AnimationKind = AnimationKind::SplitRotation;

    fn new(config: &SplitRotationConfig) -> Self {
        Self { config: *config }
    }

    fn init(&mut self, ctx: &mut RenderContext<'_>) -> Result<Millis, InitError> {
        let (foreground_hue, background_hue) = if self.config.random_hue {
            random_hue_pair(ctx.rng)
        } else {
            (self.config.foreground_hue, self.config.background_hue)
        };
        let scale = ctx.layout.background_scale;
        let foreground = scale_video(hsv2rgb(hsv(foreground_hue, 255, 255)), scale);
        let background = scale_video(hsv2rgb(hsv(background_hue, 255, 255)), scale);

        let layout = ctx.layout;
        let panel = &mut ctx.pixels[..layout.panel_len()];
        panel.fill(background);

        let interval = usize::from(self.config.foreground_interval);
        match self.config.mode {
            SplitMode::Original => {
                for cell in panel.iter_mut().step_by(interval.max(1)) {
                    *cell = foreground;
                }
            }
            SplitMode::Symmetrical => {
                let mut index = 0;
                while index < panel.len() {
                    panel[index] = foreground;
                    index += 1 + interval * 2;
                    if index < panel.len() {
                        panel[index] = foreground;
                        index += 1;
                    }
                }
            }
        }

        replicate_panels(ctx.pixels, &layout);

        Ok(ctx.now)
    }

    fn update(&mut self, ctx: &mut RenderContext<'_>) -> Update {
        let layout = ctx.layout;
        let quarter = layout.panel_len() / 4;

        if quarter > 0 {
            let quarters = ctx.pixels[..quarter * 4].chunks_exact_mut(quarter);
            for (index, segment) in quarters.enumerate() {
                let leftward = (index % 2 == 0) == (self.config.direction == Direction::Down);
                if leftward {
                    segment.rotate_left(1);
                } else {
                    segment.rotate_right(1);
                }
            }
            replicate_panels(ctx.pixels, &layout);
        }

        Update::redraw(ctx.now.after(self.config.delay))
    }
}
