#![allow(dead_code)]

use std::{cell::Cell, convert::Infallible, rc::Rc, vec::Vec};

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use myrtio_pixel_patterns::{
    OutputDriver, PixelLayout, Rgb, animation::RenderContext, time::Millis,
};

pub const SEED: u64 = 0x5eed;

pub fn rng() -> fastrand::Rng {
    fastrand::Rng::with_seed(SEED)
}

/// Output driver that keeps a copy of every flush
#[derive(Default)]
pub struct RecordingDriver {
    pub frames: Vec<Vec<Vec<Rgb>>>,
}

impl RecordingDriver {
    pub fn writes(&self) -> usize {
        self.frames.len()
    }

    pub fn last(&self) -> Option<&Vec<Vec<Rgb>>> {
        self.frames.last()
    }
}

impl OutputDriver for RecordingDriver {
    fn write(&mut self, frames: &[&[Rgb]]) {
        self.frames
            .push(frames.iter().map(|frame| frame.to_vec()).collect());
    }
}

/// Active-low pushbutton shared with the test body
#[derive(Clone, Default)]
pub struct MockButton {
    pressed: Rc<Cell<bool>>,
}

impl MockButton {
    pub fn press(&self) {
        self.pressed.set(true);
    }

    pub fn release(&self) {
        self.pressed.set(false);
    }
}

impl ErrorType for MockButton {
    type Error = Infallible;
}

impl InputPin for MockButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pressed.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressed.get())
    }
}

/// Status LED shared with the test body
#[derive(Clone, Default)]
pub struct MockLed {
    lit: Rc<Cell<bool>>,
}

impl MockLed {
    pub fn is_lit(&self) -> bool {
        self.lit.get()
    }
}

impl ErrorType for MockLed {
    type Error = Infallible;
}

impl OutputPin for MockLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.lit.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.lit.set(true);
        Ok(())
    }
}

/// Pixel buffer and random source for driving a single animation
pub struct Bench {
    pub layout: PixelLayout,
    pub pixels: Vec<Rgb>,
    pub rng: fastrand::Rng,
}

impl Bench {
    pub fn new(layout: PixelLayout) -> Self {
        Self {
            layout,
            pixels: vec![Rgb::default(); layout.active()],
            rng: rng(),
        }
    }

    pub fn strip(len: u16) -> Self {
        Self::new(PixelLayout::strip(len))
    }

    pub fn ctx(&mut self, now_ms: u32) -> RenderContext<'_> {
        RenderContext {
            pixels: &mut self.pixels,
            layout: self.layout,
            now: Millis::from_ms(now_ms),
            rng: &mut self.rng,
        }
    }
}
