//! Animation system with compile-time known animation variants
//!
//! All animations are stored in an enum to avoid heap allocations.
//! Each animation implements the `Animation` trait and schedules itself:
//! `init` and `update` return the time the next `update` is due.

mod blocks;
mod glint;
mod moving_dot;
mod multi_wave;
mod rainbow;
mod solid_color;
mod sparkle;
mod split_rotation;

use core::fmt;

pub use blocks::{BLOCK_SLOTS, Block, Blocks, BlocksConfig, STATIC_REFRESH_INTERVAL};
pub use glint::{Glint, GlintConfig};
pub use moving_dot::{DotState, MovingDot, MovingDotConfig};
pub use multi_wave::{
    ColorWave, MAX_WAVES, MultiWave, MultiWaveConfig, WaveShape, angle_at, angle_step,
};
pub use rainbow::{Rainbow, RainbowConfig};
pub use solid_color::{SolidColorConfig, SolidColorSweep};
pub use sparkle::{MAX_SPARKLE_DENSITY, Sparkle, SparkleColors, SparkleConfig};
pub use split_rotation::{SplitMode, SplitRotation, SplitRotationConfig};

use crate::{color::Rgb, pixel_set::PixelLayout, random::RandomSource, time::Millis};

const KIND_NAME_SOLID_COLOR: &str = "solid_color";
const KIND_NAME_SPARKLE: &str = "sparkle";
const KIND_NAME_BLOCKS: &str = "blocks";
const KIND_NAME_RAINBOW: &str = "rainbow";
const KIND_NAME_GLINT: &str = "glint";
const KIND_NAME_MOVING_DOT: &str = "moving_dot";
const KIND_NAME_SPLIT_ROTATION: &str = "split_rotation";
const KIND_NAME_MULTI_WAVE: &str = "multi_wave";

const KIND_ID_SOLID_COLOR: u8 = 1;
const KIND_ID_SPARKLE: u8 = 2;
const KIND_ID_BLOCKS: u8 = 3;
const KIND_ID_RAINBOW: u8 = 4;
const KIND_ID_GLINT: u8 = 5;
const KIND_ID_MOVING_DOT: u8 = 6;
const KIND_ID_SPLIT_ROTATION: u8 = 7;
const KIND_ID_MULTI_WAVE: u8 = 8;

/// Travel direction of moving patterns
///
/// `Down` moves content toward higher cell indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    Up,
    #[default]
    Down,
}

/// Everything an animation may touch while rendering
pub struct RenderContext<'a> {
    /// Active cells of the pipeline's pixel set
    pub pixels: &'a mut [Rgb],
    pub layout: PixelLayout,
    pub now: Millis,
    pub rng: &'a mut dyn RandomSource,
}

/// Outcome of a single [`Animation::update`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Update {
    /// Whether the pixels changed and should be flushed
    pub produced: bool,
    /// When the next update is due
    pub next_update: Millis,
}

impl Update {
    /// New colors were written
    pub const fn redraw(next_update: Millis) -> Self {
        Self {
            produced: true,
            next_update,
        }
    }

    /// Nothing changed
    pub const fn idle(next_update: Millis) -> Self {
        Self {
            produced: false,
            next_update,
        }
    }
}

/// Reasons an animation cannot be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// Raw kind id with no registered animation
    UnknownKind(u8),
    /// Configuration belongs to a different kind
    ConfigMismatch(AnimationKind),
    /// Configuration or layout the animation cannot run with
    Unrunnable(AnimationKind),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(raw) => write!(f, "unknown animation kind {raw}"),
            Self::ConfigMismatch(kind) => {
                write!(f, "configuration does not match {}", kind.as_str())
            }
            Self::Unrunnable(kind) => write!(f, "{} cannot run with this setup", kind.as_str()),
        }
    }
}

pub trait Animation: Sized {
    type Config: Copy;

    /// Kind this animation is registered under
    const KIND: AnimationKind;

    /// Create the animation from a private copy of its configuration
    fn new(config: &Self::Config) -> Self;

    /// Reset state and paint the first frame
    ///
    /// Returns when the first update is due.
    fn init(&mut self, ctx: &mut RenderContext<'_>) -> Result<Millis, InitError>;

    /// Advance by one step
    fn update(&mut self, ctx: &mut RenderContext<'_>) -> Update;
}

/// Known animation kinds with their stable raw ids
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AnimationKind {
    SolidColor = KIND_ID_SOLID_COLOR,
    Sparkle = KIND_ID_SPARKLE,
    Blocks = KIND_ID_BLOCKS,
    Rainbow = KIND_ID_RAINBOW,
    Glint = KIND_ID_GLINT,
    MovingDot = KIND_ID_MOVING_DOT,
    SplitRotation = KIND_ID_SPLIT_ROTATION,
    MultiWave = KIND_ID_MULTI_WAVE,
}

impl AnimationKind {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            KIND_ID_SOLID_COLOR => Self::SolidColor,
            KIND_ID_SPARKLE => Self::Sparkle,
            KIND_ID_BLOCKS => Self::Blocks,
            KIND_ID_RAINBOW => Self::Rainbow,
            KIND_ID_GLINT => Self::Glint,
            KIND_ID_MOVING_DOT => Self::MovingDot,
            KIND_ID_SPLIT_ROTATION => Self::SplitRotation,
            KIND_ID_MULTI_WAVE => Self::MultiWave,
            _ => return None,
        })
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SolidColor => KIND_NAME_SOLID_COLOR,
            Self::Sparkle => KIND_NAME_SPARKLE,
            Self::Blocks => KIND_NAME_BLOCKS,
            Self::Rainbow => KIND_NAME_RAINBOW,
            Self::Glint => KIND_NAME_GLINT,
            Self::MovingDot => KIND_NAME_MOVING_DOT,
            Self::SplitRotation => KIND_NAME_SPLIT_ROTATION,
            Self::MultiWave => KIND_NAME_MULTI_WAVE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            KIND_NAME_SOLID_COLOR => Some(Self::SolidColor),
            KIND_NAME_SPARKLE => Some(Self::Sparkle),
            KIND_NAME_BLOCKS => Some(Self::Blocks),
            KIND_NAME_RAINBOW => Some(Self::Rainbow),
            KIND_NAME_GLINT => Some(Self::Glint),
            KIND_NAME_MOVING_DOT => Some(Self::MovingDot),
            KIND_NAME_SPLIT_ROTATION => Some(Self::SplitRotation),
            KIND_NAME_MULTI_WAVE => Some(Self::MultiWave),
            _ => None,
        }
    }
}

/// Typed configuration of any animation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternConfig {
    SolidColor(SolidColorConfig),
    Sparkle(SparkleConfig),
    Blocks(BlocksConfig),
    Rainbow(RainbowConfig),
    Glint(GlintConfig),
    MovingDot(MovingDotConfig),
    SplitRotation(SplitRotationConfig),
    MultiWave(MultiWaveConfig),
}

impl PatternConfig {
    /// Kind of animation this configuration is meant for
    pub const fn kind(&self) -> AnimationKind {
        match self {
            Self::SolidColor(_) => AnimationKind::SolidColor,
            Self::Sparkle(_) => AnimationKind::Sparkle,
            Self::Blocks(_) => AnimationKind::Blocks,
            Self::Rainbow(_) => AnimationKind::Rainbow,
            Self::Glint(_) => AnimationKind::Glint,
            Self::MovingDot(_) => AnimationKind::MovingDot,
            Self::SplitRotation(_) => AnimationKind::SplitRotation,
            Self::MultiWave(_) => AnimationKind::MultiWave,
        }
    }
}

/// Animation slot - enum containing all possible animations
#[derive(Debug, Clone)]
pub enum AnimationSlot {
    SolidColor(SolidColorSweep),
    Sparkle(Sparkle),
    Blocks(Blocks),
    Rainbow(Rainbow),
    Glint(Glint),
    MovingDot(MovingDot),
    SplitRotation(SplitRotation),
    MultiWave(MultiWave),
}

impl AnimationSlot {
    /// Construct the animation registered under `raw_kind`
    pub fn create(raw_kind: u8, config: &PatternConfig) -> Result<Self, InitError> {
        let kind = AnimationKind::from_raw(raw_kind).ok_or(InitError::UnknownKind(raw_kind))?;
        if config.kind() != kind {
            return Err(InitError::ConfigMismatch(kind));
        }

        Ok(match config {
            PatternConfig::SolidColor(config) => Self::SolidColor(SolidColorSweep::new(config)),
            PatternConfig::Sparkle(config) => Self::Sparkle(Sparkle::new(config)),
            PatternConfig::Blocks(config) => Self::Blocks(Blocks::new(config)),
            PatternConfig::Rainbow(config) => Self::Rainbow(Rainbow::new(config)),
            PatternConfig::Glint(config) => Self::Glint(Glint::new(config)),
            PatternConfig::MovingDot(config) => Self::MovingDot(MovingDot::new(config)),
            PatternConfig::SplitRotation(config) => {
                Self::SplitRotation(SplitRotation::new(config))
            }
            PatternConfig::MultiWave(config) => Self::MultiWave(MultiWave::new(config)),
        })
    }

    /// Reset the animation and paint its first frame
    pub fn init(&mut self, ctx: &mut RenderContext<'_>) -> Result<Millis, InitError> {
        match self {
            Self::SolidColor(animation) => animation.init(ctx),
            Self::Sparkle(animation) => animation.init(ctx),
            Self::Blocks(animation) => animation.init(ctx),
            Self::Rainbow(animation) => animation.init(ctx),
            Self::Glint(animation) => animation.init(ctx),
            Self::MovingDot(animation) => animation.init(ctx),
            Self::SplitRotation(animation) => animation.init(ctx),
            Self::MultiWave(animation) => animation.init(ctx),
        }
    }

    /// Advance the animation by one step
    pub fn update(&mut self, ctx: &mut RenderContext<'_>) -> Update {
        match self {
            Self::SolidColor(animation) => animation.update(ctx),
            Self::Sparkle(animation) => animation.update(ctx),
            Self::Blocks(animation) => animation.update(ctx),
            Self::Rainbow(animation) => animation.update(ctx),
            Self::Glint(animation) => animation.update(ctx),
            Self::MovingDot(animation) => animation.update(ctx),
            Self::SplitRotation(animation) => animation.update(ctx),
            Self::MultiWave(animation) => animation.update(ctx),
        }
    }

    /// Get the animation kind for external observation
    pub const fn kind(&self) -> AnimationKind {
        match self {
            Self::SolidColor(_) => SolidColorSweep::KIND,
            Self::Sparkle(_) => Sparkle::KIND,
            Self::Blocks(_) => Blocks::KIND,
            Self::Rainbow(_) => Rainbow::KIND,
            Self::Glint(_) => Glint::KIND,
            Self::MovingDot(_) => MovingDot::KIND,
            Self::SplitRotation(_) => SplitRotation::KIND,
            Self::MultiWave(_) => MultiWave::KIND,
        }
    }
}
