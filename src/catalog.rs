//! Stock hues and pattern configurations
//!
//! Ready-made configurations for building sequences. All of them are
//! plain constants and can be copied into a sequence table as-is.

use embassy_time::Duration;

use crate::{
    animation::{
        BLOCK_SLOTS, Block, BlocksConfig, ColorWave, Direction, GlintConfig, MAX_WAVES,
        MovingDotConfig, MultiWaveConfig, RainbowConfig, SolidColorConfig, SparkleColors,
        SparkleConfig, SplitMode, SplitRotationConfig, WaveShape,
    },
    color::{BLACK, Rgb},
};

pub const HUE_RED: u8 = 0;
pub const HUE_ORANGE: u8 = 32;
pub const HUE_YELLOW: u8 = 64;
pub const HUE_GREEN: u8 = 96;
pub const HUE_AQUA: u8 = 128;
pub const HUE_BLUE: u8 = 160;
pub const HUE_PURPLE: u8 = 192;
pub const HUE_PINK: u8 = 224;

pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

// Solid colors

pub const SOLID_RED: SolidColorConfig = SolidColorConfig::solid(HUE_RED, 255);
pub const SOLID_GREEN: SolidColorConfig = SolidColorConfig::solid(HUE_GREEN, 255);
pub const SOLID_BLUE: SolidColorConfig = SolidColorConfig::solid(HUE_BLUE, 255);
pub const SOLID_PURPLE: SolidColorConfig = SolidColorConfig::solid(HUE_PURPLE, 255);
pub const SOLID_WARM_WHITE: SolidColorConfig = SolidColorConfig::solid(HUE_YELLOW, 128);
pub const SOLID_WHITE: SolidColorConfig = SolidColorConfig::solid(HUE_YELLOW, 0);

/// Slow walk from red to yellow and back
pub const SWEEP_WARM: SolidColorConfig = SolidColorConfig {
    start_hue: HUE_RED,
    end_hue: HUE_YELLOW,
    saturation: 255,
    delay: Duration::from_millis(100),
};

// Sparkles

pub const SPARKLE_BLUE_PRETTY: SparkleConfig = SparkleConfig {
    colors: SparkleColors::Fixed {
        foreground: WHITE,
        background: BLUE,
    },
    density: 3,
    dwell: Duration::from_millis(15),
    change: Duration::from_millis(15),
};

pub const SPARKLE_RANDOM: SparkleConfig = SparkleConfig {
    colors: SparkleColors::Random,
    density: 3,
    dwell: Duration::from_millis(15),
    change: Duration::from_millis(15),
};

// Blocks

const fn blocks(pattern: [Block; BLOCK_SLOTS]) -> BlocksConfig {
    BlocksConfig {
        delay: Duration::from_millis(0),
        blocks: pattern,
    }
}

pub const BLOCKS_RED_GREEN: BlocksConfig = blocks([
    Block::new(HUE_RED, 255, 1),
    Block::new(HUE_GREEN, 255, 1),
    Block::EMPTY,
    Block::EMPTY,
    Block::EMPTY,
    Block::EMPTY,
    Block::EMPTY,
    Block::EMPTY,
]);

pub const BLOCKS_CLASSIC: BlocksConfig = blocks([
    Block::new(HUE_RED, 255, 1),
    Block::new(HUE_GREEN, 255, 1),
    Block::new(HUE_ORANGE, 255, 1),
    Block::new(HUE_PURPLE, 255, 1),
    Block::new(HUE_YELLOW, 255, 1),
    Block::new(HUE_BLUE, 255, 1),
    Block::EMPTY,
    Block::EMPTY,
]);

// Rainbows

pub const RAINBOW_SLOW: RainbowConfig = RainbowConfig {
    direction: Direction::Up,
    delay: Duration::from_millis(100),
};

pub const RAINBOW_MANIC: RainbowConfig = RainbowConfig {
    direction: Direction::Down,
    delay: Duration::from_millis(5),
};

// Glints

pub const GLINT_BLUE: GlintConfig = GlintConfig {
    hue: HUE_BLUE,
    interval: Duration::from_millis(7000),
    delay: Duration::from_millis(2),
};

// Moving dots

pub const DOT_RANDOM_PONG: MovingDotConfig = MovingDotConfig {
    foreground: BLACK,
    background: BLACK,
    random_foreground: true,
    random_background: false,
    change_foreground: false,
    zipper: false,
    bidirectional: true,
    away_delay: Duration::from_millis(6),
    toward_delay: Duration::from_millis(6),
    hold_far: Duration::from_millis(0),
    hold_near: Duration::from_millis(0),
};

pub const DOT_RANDOM_ZIPPER: MovingDotConfig = MovingDotConfig {
    foreground: BLACK,
    background: BLACK,
    random_foreground: true,
    random_background: true,
    change_foreground: true,
    zipper: true,
    bidirectional: true,
    away_delay: Duration::from_millis(20),
    toward_delay: Duration::from_millis(6),
    hold_far: Duration::from_millis(200),
    hold_near: Duration::from_millis(1000),
};

pub const DOT_RANDOM_SHOOT: MovingDotConfig = MovingDotConfig {
    foreground: BLACK,
    background: BLACK,
    random_foreground: true,
    random_background: false,
    change_foreground: true,
    zipper: false,
    bidirectional: false,
    away_delay: Duration::from_millis(6),
    toward_delay: Duration::from_millis(6),
    hold_far: Duration::from_millis(0),
    hold_near: Duration::from_millis(0),
};

// Split rotations

const fn split_random(
    mode: SplitMode,
    direction: Direction,
    delay_ms: u64,
) -> SplitRotationConfig {
    SplitRotationConfig {
        mode,
        random_hue: true,
        foreground_hue: HUE_RED,
        background_hue: HUE_RED,
        foreground_interval: 6,
        direction,
        delay: Duration::from_millis(delay_ms),
    }
}

pub const SPLIT_SYMMETRICAL_SLOW: SplitRotationConfig =
    split_random(SplitMode::Symmetrical, Direction::Up, 143);
pub const SPLIT_SYMMETRICAL_FAST: SplitRotationConfig =
    split_random(SplitMode::Symmetrical, Direction::Down, 36);
pub const SPLIT_ORIGINAL_MEDIUM: SplitRotationConfig =
    split_random(SplitMode::Original, Direction::Up, 71);

// Multi waves

const fn wave(
    positive_hue: u8,
    negative_hue: u8,
    wave_count: i8,
    shape: WaveShape,
    direction: Direction,
    delay_ms: u64,
) -> ColorWave {
    ColorWave {
        random_hue: false,
        positive_hue,
        positive_saturation: 255,
        negative_hue,
        negative_saturation: 255,
        wave_count,
        shape,
        direction,
        delay: Duration::from_millis(delay_ms),
    }
}

const fn random_wave(wave_count: i8, shape: WaveShape, delay_ms: u64) -> ColorWave {
    ColorWave {
        random_hue: true,
        ..wave(HUE_RED, HUE_RED, wave_count, shape, Direction::Up, delay_ms)
    }
}

const fn single_wave(bounded_by_panel: bool, first: ColorWave) -> MultiWaveConfig {
    let mut waves = [ColorWave::NONE; MAX_WAVES];
    waves[0] = first;
    MultiWaveConfig {
        bounded_by_panel,
        waves,
    }
}

pub const WAVE_RED_GREEN: MultiWaveConfig = single_wave(
    true,
    wave(HUE_RED, HUE_GREEN, 1, WaveShape::Cubic, Direction::Up, 60),
);

pub const WAVE_RANDOM: MultiWaveConfig =
    single_wave(true, random_wave(3, WaveShape::Quadratic, 30));

pub const WAVE_TWO_RANDOM: MultiWaveConfig = MultiWaveConfig {
    bounded_by_panel: false,
    waves: [
        random_wave(1, WaveShape::Quadratic, 255),
        random_wave(5, WaveShape::Quadratic, 127),
        ColorWave::NONE,
    ],
};

/// Three one-sided sine waves drifting against each other
pub const WAVE_THREE_SINE: MultiWaveConfig = MultiWaveConfig {
    bounded_by_panel: false,
    waves: [
        wave(HUE_BLUE, HUE_ORANGE, -1, WaveShape::Sine, Direction::Up, 30),
        wave(HUE_RED, HUE_AQUA, -2, WaveShape::Sine, Direction::Down, 40),
        wave(HUE_GREEN, HUE_PINK, -3, WaveShape::Sine, Direction::Up, 50),
    ],
};

pub const WAVE_THREE_SQUARE: MultiWaveConfig = MultiWaveConfig {
    bounded_by_panel: true,
    waves: [
        wave(HUE_BLUE, HUE_ORANGE, 1, WaveShape::Square, Direction::Down, 255),
        wave(HUE_RED, HUE_AQUA, 2, WaveShape::Square, Direction::Down, 192),
        wave(HUE_GREEN, HUE_PINK, 3, WaveShape::Square, Direction::Up, 128),
    ],
};
