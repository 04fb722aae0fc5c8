//! Rotating rainbow
//!
//! Each panel shows one full turn of the color wheel; every step shifts
//! the ramp by one hue unit.

use embassy_time::Duration;

use super::{Animation, AnimationKind, Direction, InitError, RenderContext, Update};
use crate::{
    color::{fill_hue_ramp, scale_video},
    pixel_set::replicate_panels,
    time::Millis,
};

/// Saturation of the rainbow ramp
const RAINBOW_SATURATION: u8 = 240;

/// Configuration for [`Rainbow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RainbowConfig {
    pub direction: Direction,
    /// Delay between rotation steps
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Rainbow {
    config: RainbowConfig,
    start_hue: u8,
}

impl Animation for Rainbow {
    type Config = RainbowConfig;
    const KIND: AnimationKind = AnimationKind::Rainbow;

    fn new(config: &RainbowConfig) -> Self {
        Self {
            config: *config,
            start_hue: 0,
        }
    }

    fn init(&mut self, ctx: &mut RenderContext<'_>) -> Result<Millis, InitError> {
        self.start_hue = 0;
        Ok(ctx.now)
    }

    fn update(&mut self, ctx: &mut RenderContext<'_>) -> Update {
        let layout = ctx.layout;
        let panel = &mut ctx.pixels[..layout.panel_len()];
        fill_hue_ramp(panel, self.start_hue, RAINBOW_SATURATION, 255);
        for cell in panel.iter_mut() {
            *cell = scale_video(*cell, layout.background_scale);
        }
        replicate_panels(ctx.pixels, &layout);

        self.start_hue = match self.config.direction {
            Direction::Down => self.start_hue.wrapping_add(1),
            Direction::Up => self.start_hue.wrapping_sub(1),
        };

        Update::redraw(ctx.now.after(self.config.delay))
    }
}
