use smart_leds::hsv::hsv2rgb;

use crate::color::{Hsv, Rgb};

/// Fill `leds` with a hue ramp covering exactly one turn of the color wheel
///
/// The hue is accumulated in 8.24 fixed-point so strips longer than 256
/// cells still span the full wheel without rounding drift.
#[allow(clippy::cast_possible_truncation)]
pub fn fill_hue_ramp(leds: &mut [Rgb], start_hue: u8, sat: u8, val: u8) {
    if leds.is_empty() {
        return;
    }

    let len = u32::try_from(leds.len()).unwrap_or(u32::MAX);
    // One full turn is 256 << 24, which is exactly 2^32
    let hue_delta824 = (u64::from(u32::MAX) + 1) / u64::from(len);
    let hue_delta824 = hue_delta824 as u32;

    let mut hue824 = u32::from(start_hue) << 24;
    for led in leds.iter_mut() {
        *led = hsv2rgb(Hsv {
            hue: (hue824 >> 24) as u8,
            sat,
            val,
        });
        hue824 = hue824.wrapping_add(hue_delta824);
    }
}
