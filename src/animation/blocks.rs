//! Color blocks
//!
//! Paints repeating runs of colored blocks over the symmetrical region
//! and rotates them one cell per step.

use embassy_time::Duration;

use super::{Animation, AnimationKind, InitError, RenderContext, Update};
use crate::{
    color::{hsv, hsv2rgb, scale_video},
    time::Millis,
};

/// Number of block slots in a configuration
pub const BLOCK_SLOTS: usize = 8;

/// Refresh period used when rotation is disabled
pub const STATIC_REFRESH_INTERVAL: Duration = Duration::from_millis(1000);

/// One block of a [`BlocksConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Block {
    pub hue: u8,
    pub saturation: u8,
    /// Block length in cells, zero-length blocks are skipped
    pub len: u16,
}

impl Block {
    pub const fn new(hue: u8, saturation: u8, len: u16) -> Self {
        Self {
            hue,
            saturation,
            len,
        }
    }

    /// Unused slot
    pub const EMPTY: Self = Self::new(0, 0, 0);
}

/// Configuration for [`Blocks`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlocksConfig {
    /// Delay between rotation steps, zero disables rotation
    pub delay: Duration,
    pub blocks: [Block; BLOCK_SLOTS],
}

#[derive(Debug, Clone)]
pub struct Blocks {
    config: BlocksConfig,
}

impl Blocks {
    fn step_delay(&self) -> Duration {
        if self.config.delay.as_millis() > 0 {
            self.config.delay
        } else {
            STATIC_REFRESH_INTERVAL
        }
    }
}

impl Animation for Blocks {
    type Config = BlocksConfig;
    const KIND: AnimationKind = AnimationKind::Blocks;

    fn new(config: &BlocksConfig) -> Self {
        Self { config: *config }
    }

    fn init(&mut self, ctx: &mut RenderContext<'_>) -> Result<Millis, InitError> {
        if self.config.blocks.iter().all(|block| block.len == 0) {
            return Err(InitError::Unrunnable(Self::KIND));
        }

        let scale = ctx.layout.background_scale;
        let region = &mut ctx.pixels[..ctx.layout.symmetrical()];
        let runs = self
            .config
            .blocks
            .iter()
            .filter(|block| block.len > 0)
            .cycle()
            .flat_map(|block| {
                let color = scale_video(hsv2rgb(hsv(block.hue, block.saturation, 255)), scale);
                core::iter::repeat_n(color, usize::from(block.len))
            });
        for (cell, color) in region.iter_mut().zip(runs) {
            *cell = color;
        }

        Ok(ctx.now.after(self.step_delay()))
    }

    fn update(&mut self, ctx: &mut RenderContext<'_>) -> Update {
        if self.config.delay.as_millis() > 0 {
            let region = &mut ctx.pixels[..ctx.layout.symmetrical()];
            if !region.is_empty() {
                region.rotate_right(1);
            }
        }

        Update::redraw(ctx.now.after(self.step_delay()))
    }
}
