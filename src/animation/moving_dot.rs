//! Moving dot
//!
//! A single dot per panel travels away from the first cell, waits at the
//! far end, and either bounces back or restarts from the first cell.

use embassy_time::Duration;

use super::{Animation, AnimationKind, InitError, RenderContext, Update};
use crate::{
    color::{BLACK, Rgb, random_rgb_pair, scale_video},
    time::Millis,
};

/// Position of the dot in its travel cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DotState {
    /// Moving away from the first cell
    Away = 0,
    /// Moving back toward the first cell
    Toward = 1,
    /// Waiting at the last cell
    HeldFar = 2,
    /// Waiting at the first cell
    HeldNear = 3,
}

/// Configuration for [`MovingDot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingDotConfig {
    pub foreground: Rgb,
    pub background: Rgb,
    /// Pick the dot color at random
    pub random_foreground: bool,
    /// Pick the background color at random
    pub random_background: bool,
    /// Re-pick the dot color at the start of every outward leg
    pub change_foreground: bool,
    /// Leave a trail on the way out and erase it on the way back
    pub zipper: bool,
    /// Bounce back instead of restarting from the first cell
    pub bidirectional: bool,
    /// Step delay while moving away from the first cell
    pub away_delay: Duration,
    /// Step delay while moving toward the first cell
    pub toward_delay: Duration,
    /// Hold time at the last cell
    pub hold_far: Duration,
    /// Hold time at the first cell
    pub hold_near: Duration,
}

#[derive(Debug, Clone)]
pub struct MovingDot {
    config: MovingDotConfig,
    state: DotState,
    position: usize,
    foreground: Rgb,
    background: Rgb,
}

impl MovingDot {
    pub const fn state(&self) -> DotState {
        self.state
    }

    /// Index of the dot within each panel
    pub const fn position(&self) -> usize {
        self.position
    }

    fn pick_colors(&mut self, ctx: &mut RenderContext<'_>, initial: bool) {
        let (foreground, background) = random_rgb_pair(ctx.rng);
        let scale = ctx.layout.background_scale;

        if initial {
            let foreground = if self.config.random_foreground {
                foreground
            } else {
                self.config.foreground
            };
            let background = if self.config.random_background {
                background
            } else {
                self.config.background
            };
            self.foreground = scale_video(foreground, scale);
            self.background = scale_video(background, scale);
        } else {
            self.foreground = scale_video(foreground, scale);
            // The trail color changes with the dot when zippering
            if self.config.zipper {
                self.background = scale_video(background, scale);
            }
        }
    }

    /// Paint `color` at `position` in every panel
    fn paint(ctx: &mut RenderContext<'_>, position: usize, color: Rgb) {
        let panel_len = ctx.layout.panel_len();
        for panel in 0..ctx.layout.panels() {
            ctx.pixels[panel * panel_len + position] = color;
        }
    }

    fn advance(&mut self, now: Millis, last: usize) -> Millis {
        match self.state {
            DotState::Away => {
                self.position += 1;
                if self.position >= last {
                    self.position = last;
                    self.state = DotState::HeldFar;
                    now.after(self.config.hold_far)
                } else {
                    now.after(self.config.away_delay)
                }
            }
            DotState::HeldFar => {
                if self.config.bidirectional {
                    self.position = last - 1;
                    if self.position == 0 {
                        self.state = DotState::HeldNear;
                        now.after(self.config.hold_near)
                    } else {
                        self.state = DotState::Toward;
                        now.after(self.config.toward_delay)
                    }
                } else {
                    self.position = 0;
                    self.state = DotState::Away;
                    now.after(self.config.away_delay)
                }
            }
            DotState::Toward => {
                self.position -= 1;
                if self.position == 0 {
                    self.state = DotState::HeldNear;
                    now.after(self.config.hold_near)
                } else {
                    now.after(self.config.toward_delay)
                }
            }
            DotState::HeldNear => {
                self.position = 1;
                if self.position >= last {
                    self.state = DotState::HeldFar;
                    now.after(self.config.hold_far)
                } else {
                    self.state = DotState::Away;
                    now.after(self.config.away_delay)
                }
            }
        }
    }
}

impl Animation for MovingDot {
    type Config = MovingDotConfig;
    const KIND: AnimationKind = AnimationKind::MovingDot;

    fn new(config: &MovingDotConfig) -> Self {
        Self {
            config: *config,
            state: DotState::Away,
            position: 0,
            foreground: config.foreground,
            background: config.background,
        }
    }

    fn init(&mut self, ctx: &mut RenderContext<'_>) -> Result<Millis, InitError> {
        if ctx.layout.panel_len() < 2 {
            return Err(InitError::Unrunnable(Self::KIND));
        }

        self.state = DotState::Away;
        self.position = 0;
        self.pick_colors(ctx, true);

        if !self.config.zipper {
            ctx.pixels.fill(self.background);
        }
        Self::paint(ctx, 0, self.foreground);

        Ok(ctx.now)
    }

    fn update(&mut self, ctx: &mut RenderContext<'_>) -> Update {
        let last = ctx.layout.panel_len() - 1;
        let previous_state = self.state;
        let previous_position = self.position;

        let next_update = self.advance(ctx.now, last);

        let outward_leg_started =
            previous_state != DotState::Away && self.state == DotState::Away;
        if outward_leg_started && self.config.change_foreground {
            self.pick_colors(ctx, false);
        }

        let returning = self.state == DotState::Toward || previous_state == DotState::Toward;
        let trail = if returning && self.config.zipper {
            BLACK
        } else {
            self.background
        };
        Self::paint(ctx, previous_position, trail);
        Self::paint(ctx, self.position, self.foreground);

        Update::redraw(next_update)
    }
}
