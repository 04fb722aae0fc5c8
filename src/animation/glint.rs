//! Glint pattern
//!
//! A solid background with an occasional whitish pulse sweeping over the
//! symmetrical region. The pulse desaturates cells along a quadratic wave
//! that is strongest at its middle and fades out at both edges.

use embassy_time::Duration;

use super::{Animation, AnimationKind, InitError, RenderContext, Update};
use crate::{
    color::{hsv, hsv2rgb},
    math8::quadwave8,
    time::Millis,
};

/// Distance in cells the pulse travels per step
const PULSE_STEP_CELLS: f32 = 0.025;

/// Pulse width used on short regions
const SHORT_REGION_PULSE_WIDTH: f32 = 6.0;

/// Regions up to this length use the fixed short pulse width
const SHORT_REGION_LEN: usize = 30;

/// Configuration for [`Glint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlintConfig {
    /// Background hue
    pub hue: u8,
    /// Time between the end of one pulse and the start of the next
    pub interval: Duration,
    /// Delay between pulse steps
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Glint {
    config: GlintConfig,
    next_glint: Millis,
    /// Position of the pulse's leading edge, `None` while idle
    pulse_start: Option<f32>,
    pulse_width: f32,
}

impl Glint {
    /// Whether a pulse is currently travelling
    pub const fn is_glinting(&self) -> bool {
        self.pulse_start.is_some()
    }

    /// Width of the pulse in cells, fixed by the last `init`
    pub const fn pulse_width(&self) -> f32 {
        self.pulse_width
    }

    /// Saturation of cell `index` for a pulse starting at `start`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn saturation_at(&self, index: usize, start: f32) -> u8 {
        #[allow(clippy::cast_precision_loss)]
        let offset = index as f32 - start;
        if offset < 0.0 || offset > self.pulse_width {
            return 255;
        }
        let angle = (offset * 255.0 / self.pulse_width) as u8;
        255 - quadwave8(angle)
    }
}

impl Animation for Glint {
    type Config = GlintConfig;
    const KIND: AnimationKind = AnimationKind::Glint;

    fn new(config: &GlintConfig) -> Self {
        Self {
            config: *config,
            next_glint: Millis::default(),
            pulse_start: None,
            pulse_width: SHORT_REGION_PULSE_WIDTH,
        }
    }

    fn init(&mut self, ctx: &mut RenderContext<'_>) -> Result<Millis, InitError> {
        let symmetrical = ctx.layout.symmetrical();
        #[allow(clippy::cast_precision_loss)]
        let width = if symmetrical <= SHORT_REGION_LEN {
            SHORT_REGION_PULSE_WIDTH
        } else {
            (symmetrical / 5) as f32
        };

        self.pulse_width = width;
        self.pulse_start = None;
        self.next_glint = ctx.now.after(self.config.interval);

        Ok(ctx.now)
    }

    fn update(&mut self, ctx: &mut RenderContext<'_>) -> Update {
        let now = ctx.now;
        let symmetrical = ctx.layout.symmetrical();
        let value = ctx.layout.background_scale;

        if self.pulse_start.is_none() && now.is_reached(self.next_glint) {
            self.pulse_start = Some(-self.pulse_width);
        }

        let background = hsv2rgb(hsv(self.config.hue, 255, value));
        let (region, rest) = ctx.pixels.split_at_mut(symmetrical);
        match self.pulse_start {
            Some(start) => {
                for (index, cell) in region.iter_mut().enumerate() {
                    let sat = self.saturation_at(index, start);
                    *cell = hsv2rgb(hsv(self.config.hue, sat, value));
                }
            }
            None => region.fill(background),
        }
        rest.fill(background);

        if let Some(start) = self.pulse_start {
            let start = start + PULSE_STEP_CELLS;
            #[allow(clippy::cast_precision_loss)]
            let region_end = symmetrical as f32;
            if start >= region_end {
                self.pulse_start = None;
                self.next_glint = now.after(self.config.interval);
            } else {
                self.pulse_start = Some(start);
            }
        }

        Update::redraw(now.after(self.config.delay))
    }
}
