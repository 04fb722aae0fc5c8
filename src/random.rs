//! Random number source used by patterns with random placement or colors

/// Bounded uniform random integer source
///
/// Implement this trait to plug in a hardware RNG. `fastrand::Rng` is
/// supported out of the box.
pub trait RandomSource {
    /// Return a uniformly distributed value in `0..bound`
    ///
    /// Returns 0 when `bound` is 0.
    fn below(&mut self, bound: u16) -> u16;

    /// Return a uniformly distributed byte
    #[allow(clippy::cast_possible_truncation)]
    fn byte(&mut self) -> u8 {
        self.below(256) as u8
    }
}

impl RandomSource for fastrand::Rng {
    fn below(&mut self, bound: u16) -> u16 {
        if bound == 0 {
            return 0;
        }
        self.u16(..bound)
    }
}
