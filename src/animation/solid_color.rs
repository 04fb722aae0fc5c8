//! Solid color sweep
//!
//! Fills every active cell with one color. When the start and end hues
//! differ the hue walks between them and back, one step per update.

use embassy_time::Duration;

use super::{Animation, AnimationKind, InitError, RenderContext, Update};
use crate::{
    color::{hsv, hsv2rgb, scale_video},
    time::Millis,
};

/// Configuration for [`SolidColorSweep`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidColorConfig {
    /// Hue the sweep starts at
    pub start_hue: u8,
    /// Hue the sweep turns around at
    pub end_hue: u8,
    /// Saturation (0-255)
    pub saturation: u8,
    /// Delay between hue steps
    pub delay: Duration,
}

impl SolidColorConfig {
    /// Constant color
    pub const fn solid(hue: u8, saturation: u8) -> Self {
        Self {
            start_hue: hue,
            end_hue: hue,
            saturation,
            delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolidColorSweep {
    config: SolidColorConfig,
    hue: u8,
    toward_end: bool,
}

impl SolidColorSweep {
    /// Hue that the next update will paint
    pub const fn hue(&self) -> u8 {
        self.hue
    }

    fn step_hue(&mut self) {
        if self.config.start_hue == self.config.end_hue {
            return;
        }
        if self.toward_end {
            self.hue = self.hue.wrapping_add(1);
            if self.hue == self.config.end_hue {
                self.toward_end = false;
            }
        } else {
            self.hue = self.hue.wrapping_sub(1);
            if self.hue == self.config.start_hue {
                self.toward_end = true;
            }
        }
    }
}

impl Animation for SolidColorSweep {
    type Config = SolidColorConfig;
    const KIND: AnimationKind = AnimationKind::SolidColor;

    fn new(config: &SolidColorConfig) -> Self {
        Self {
            config: *config,
            hue: config.start_hue,
            toward_end: true,
        }
    }

    fn init(&mut self, ctx: &mut RenderContext<'_>) -> Result<Millis, InitError> {
        self.hue = self.config.start_hue;
        self.toward_end = true;
        Ok(ctx.now)
    }

    fn update(&mut self, ctx: &mut RenderContext<'_>) -> Update {
        let color = scale_video(
            hsv2rgb(hsv(self.hue, self.config.saturation, 255)),
            ctx.layout.background_scale,
        );
        ctx.pixels.fill(color);

        self.step_hue();

        Update::redraw(ctx.now.after(self.config.delay))
    }
}
