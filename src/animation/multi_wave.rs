//! Superimposed color waves
//!
//! Up to three periodic waveforms travel over one panel (or the whole
//! symmetrical region), each on its own step timer. The upper half of a
//! wave shows its positive hue, the lower half its negative hue, and
//! overlapping waves are blended in proportion to their intensity.

use embassy_time::Duration;

use super::{Animation, AnimationKind, Direction, InitError, RenderContext, Update};
use crate::{
    color::{BLACK, Hsv, blend_hsv, hsv, hsv2rgb, random_hue_pair, scale_video},
    math8::{cubicwave8, quadwave8, sin8, triwave8},
    pixel_set::replicate_panels,
    time::{Millis, duration_ms},
};

/// Maximum number of superimposed waves
pub const MAX_WAVES: usize = 3;

/// Shaping function of a [`ColorWave`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaveShape {
    /// Terminates the wave list
    #[default]
    None,
    Cubic,
    Quadratic,
    Sine,
    Square,
    Triangle,
}

impl WaveShape {
    /// Wave intensity at `angle`, one period spans 0-255
    pub fn sample(self, angle: u8) -> u8 {
        match self {
            Self::None => 0,
            Self::Cubic => cubicwave8(angle),
            Self::Quadratic => quadwave8(angle),
            Self::Sine => sin8(angle),
            Self::Square => {
                if triwave8(angle) >= 128 {
                    255
                } else {
                    0
                }
            }
            Self::Triangle => triwave8(angle),
        }
    }
}

/// One waveform of a [`MultiWaveConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorWave {
    /// Pick a random, fully saturated hue pair instead of the configured one
    pub random_hue: bool,
    pub positive_hue: u8,
    pub positive_saturation: u8,
    pub negative_hue: u8,
    pub negative_saturation: u8,
    /// Number of waves across the cell range; a negative count keeps the
    /// lower half of every wave dark
    pub wave_count: i8,
    pub shape: WaveShape,
    pub direction: Direction,
    /// Delay between phase steps
    pub delay: Duration,
}

impl ColorWave {
    /// Unused slot, ends the wave list
    pub const NONE: Self = Self {
        random_hue: false,
        positive_hue: 0,
        positive_saturation: 0,
        negative_hue: 0,
        negative_saturation: 0,
        wave_count: 0,
        shape: WaveShape::None,
        direction: Direction::Down,
        delay: Duration::from_millis(0),
    };

    const fn is_active(&self) -> bool {
        !matches!(self.shape, WaveShape::None) && self.wave_count != 0
    }
}

/// Configuration for [`MultiWave`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiWaveConfig {
    /// Fit the waves into each panel instead of the whole symmetrical region
    pub bounded_by_panel: bool,
    pub waves: [ColorWave; MAX_WAVES],
}

/// Runtime state of one active wave
#[derive(Debug, Clone, Copy, Default)]
struct WaveState {
    /// Hue and saturation of the upper half
    positive: (u8, u8),
    /// Hue and saturation of the lower half
    negative: (u8, u8),
    angle_step: u32,
    phase: u16,
    countdown: u32,
}

#[derive(Debug, Clone)]
pub struct MultiWave {
    config: MultiWaveConfig,
    waves: [WaveState; MAX_WAVES],
    wave_count: usize,
    cells: usize,
    last_delay: u32,
}

/// Angle increment per cell, in 8.16 fixed point of a 0-255 period,
/// so that `wave_count` whole periods span `cells` cells
///
/// Returns 0 for an empty range.
#[allow(clippy::cast_possible_truncation)]
pub fn angle_step(wave_count: i8, cells: usize) -> u32 {
    if cells == 0 {
        return 0;
    }
    let span = u64::from(wave_count.unsigned_abs()) << 24;
    span.div_ceil(cells as u64) as u32
}

/// Wave angle of cell `index` for a given angle step
#[allow(clippy::cast_possible_truncation)]
pub fn angle_at(index: usize, step: u32) -> u8 {
    ((index as u64 * u64::from(step)) >> 16) as u8
}

impl MultiWave {
    /// Phase offsets of the active waves, in cells
    pub fn phases(&self) -> impl Iterator<Item = u16> + '_ {
        self.waves[..self.wave_count].iter().map(|wave| wave.phase)
    }

    /// Number of active waves
    pub const fn wave_count(&self) -> usize {
        self.wave_count
    }

    /// Advance every wave timer, returns whether any wave moved
    fn step_waves(&mut self) -> bool {
        let cells = u16::try_from(self.cells).unwrap_or(u16::MAX);
        let mut moved = false;

        for (state, wave) in self.waves[..self.wave_count]
            .iter_mut()
            .zip(self.config.waves.iter())
        {
            state.countdown = state.countdown.saturating_sub(self.last_delay);
            if state.countdown > 0 {
                continue;
            }
            moved = true;
            state.countdown = duration_ms(wave.delay).max(1);
            state.phase = match wave.direction {
                Direction::Down => {
                    if state.phase + 1 >= cells {
                        0
                    } else {
                        state.phase + 1
                    }
                }
                Direction::Up => {
                    if state.phase == 0 {
                        cells - 1
                    } else {
                        state.phase - 1
                    }
                }
            };
        }

        moved
    }

    /// Blended color of cell `index`, `None` where every wave is dark
    fn cell_color(&self, index: usize) -> Option<Hsv> {
        let mut colors = [hsv(0, 0, 0); MAX_WAVES];
        let mut sum: u16 = 0;

        for (slot, (state, wave)) in self.waves[..self.wave_count]
            .iter()
            .zip(self.config.waves.iter())
            .enumerate()
        {
            let angle = angle_at(index + usize::from(state.phase), state.angle_step);
            let y = wave.shape.sample(angle);
            colors[slot] = if y >= 128 {
                hsv(state.positive.0, state.positive.1, (y - 128) * 2)
            } else {
                let value = if wave.wave_count >= 0 { (127 - y) * 2 } else { 0 };
                hsv(state.negative.0, state.negative.1, value)
            };
            sum += u16::from(colors[slot].val);
        }

        if sum == 0 {
            return None;
        }

        let mut blended = colors[0];
        for color in &colors[1..self.wave_count] {
            #[allow(clippy::cast_possible_truncation)]
            let amount = (255 * u16::from(color.val) / sum) as u8;
            blended = blend_hsv(blended, *color, amount);
        }
        Some(blended)
    }
}

impl Animation for MultiWave {
    type Config = MultiWaveConfig;
    const KIND: AnimationKind = AnimationKind::MultiWave;

    fn new(config: &MultiWaveConfig) -> Self {
        Self {
            config: *config,
            waves: [WaveState::default(); MAX_WAVES],
            wave_count: 0,
            cells: 0,
            last_delay: 1,
        }
    }

    fn init(&mut self, ctx: &mut RenderContext<'_>) -> Result<Millis, InitError> {
        self.cells = if self.config.bounded_by_panel {
            ctx.layout.panel_len()
        } else {
            ctx.layout.symmetrical()
        };
        self.wave_count = self
            .config
            .waves
            .iter()
            .take_while(|wave| wave.is_active())
            .count();

        if self.wave_count == 0 || self.cells == 0 {
            return Err(InitError::Unrunnable(Self::KIND));
        }

        for (state, wave) in self.waves.iter_mut().zip(&self.config.waves[..self.wave_count]) {
            let (positive, negative) = if wave.random_hue {
                let (positive, negative) = random_hue_pair(ctx.rng);
                ((positive, 255), (negative, 255))
            } else {
                (
                    (wave.positive_hue, wave.positive_saturation),
                    (wave.negative_hue, wave.negative_saturation),
                )
            };
            *state = WaveState {
                positive,
                negative,
                angle_step: angle_step(wave.wave_count, self.cells),
                phase: 0,
                // First update shows the waves right away
                countdown: 1,
            };
        }
        self.last_delay = 1;

        Ok(ctx.now)
    }

    fn update(&mut self, ctx: &mut RenderContext<'_>) -> Update {
        let moved = self.step_waves();

        let shortest = self.waves[..self.wave_count]
            .iter()
            .map(|wave| wave.countdown)
            .min()
            .unwrap_or(1);
        self.last_delay = shortest;
        let next_update = ctx.now.add_ms(shortest);

        if !moved {
            return Update::idle(next_update);
        }

        let scale = ctx.layout.background_scale;
        for index in 0..self.cells {
            ctx.pixels[index] = self
                .cell_color(index)
                .map_or(BLACK, |color| scale_video(hsv2rgb(color), scale));
        }

        if self.config.bounded_by_panel {
            replicate_panels(ctx.pixels, &ctx.layout);
        }

        Update::redraw(next_update)
    }
}
