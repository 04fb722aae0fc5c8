//! Wrapping millisecond clock
//!
//! Pattern timing is stored as future timestamps and compared with
//! subtraction, so the 32-bit counter may roll over without stalling
//! any pipeline.

use embassy_time::{Duration, Instant};

/// Millisecond timestamp on a 32-bit wrapping clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Millis(u32);

impl Millis {
    /// Create a timestamp from a raw millisecond counter value
    pub const fn from_ms(ms: u32) -> Self {
        Self(ms)
    }

    /// Raw counter value
    pub const fn as_ms(self) -> u32 {
        self.0
    }

    /// Timestamp `ms` milliseconds later, wrapping on overflow
    #[must_use]
    pub const fn add_ms(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }

    /// Timestamp `delay` later, wrapping on overflow
    ///
    /// Delays longer than the clock period are clamped to `u32::MAX`.
    #[must_use]
    pub const fn after(self, delay: Duration) -> Self {
        self.add_ms(duration_ms(delay))
    }

    /// Check if `deadline` is now or in the past
    ///
    /// Valid as long as the two timestamps are less than ~24 days apart.
    #[allow(clippy::cast_possible_wrap)]
    pub const fn is_reached(self, deadline: Millis) -> bool {
        (self.0.wrapping_sub(deadline.0) as i32) >= 0
    }

    /// Milliseconds elapsed since `earlier`
    pub const fn elapsed_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Milliseconds left until `deadline`, zero if already reached
    pub const fn until(self, deadline: Millis) -> u32 {
        if self.is_reached(deadline) {
            0
        } else {
            deadline.0.wrapping_sub(self.0)
        }
    }
}

impl From<Instant> for Millis {
    #[allow(clippy::cast_possible_truncation)]
    fn from(instant: Instant) -> Self {
        // Truncation keeps the low 32 bits, which is the wrapping clock
        Self(instant.as_millis() as u32)
    }
}

/// Convert a duration to whole milliseconds, saturating at `u32::MAX`
#[allow(clippy::cast_possible_truncation)]
pub const fn duration_ms(duration: Duration) -> u32 {
    let ms = duration.as_millis();
    if ms > u32::MAX as u64 {
        u32::MAX
    } else {
        ms as u32
    }
}
