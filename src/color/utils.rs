pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    math8::{scale8, scale8_video},
    random::RandomSource,
};

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Hue offsets used to pick a partner for a random hue:
/// a quarter and a third of the wheel either way, or the complement.
const PARTNER_HUE_OFFSETS: [u8; 5] = [64, 85, 192, 171, 128];

/// Build an HSV color
#[inline]
pub const fn hsv(hue: u8, sat: u8, val: u8) -> Hsv {
    Hsv { hue, sat, val }
}

/// Dim a color by an intensity factor, keeping lit channels lit
#[inline]
pub const fn scale_video(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8_video(color.r, scale),
        g: scale8_video(color.g, scale),
        b: scale8_video(color.b, scale),
    }
}

/// Blend `overlay` into `base` in HSV space
///
/// Hue travels the shorter way around the wheel. `amount_of_overlay` is
/// 0-255, where 0 keeps `base` and 255 yields `overlay`.
pub fn blend_hsv(base: Hsv, overlay: Hsv, amount_of_overlay: u8) -> Hsv {
    if amount_of_overlay == 0 {
        return base;
    }
    if amount_of_overlay == 255 {
        return overlay;
    }

    let amount_of_keep = 255 - amount_of_overlay;
    let hue_delta = overlay.hue.wrapping_sub(base.hue);
    let hue = if hue_delta > 127 {
        base.hue
            .wrapping_sub(scale8(hue_delta.wrapping_neg(), amount_of_overlay))
    } else {
        base.hue.wrapping_add(scale8(hue_delta, amount_of_overlay))
    };

    Hsv {
        hue,
        sat: scale8(base.sat, amount_of_keep)
            .wrapping_add(scale8(overlay.sat, amount_of_overlay)),
        val: scale8(base.val, amount_of_keep)
            .wrapping_add(scale8(overlay.val, amount_of_overlay)),
    }
}

/// Pick a random hue and a contrasting partner hue
#[allow(clippy::cast_possible_truncation)]
pub fn random_hue_pair(rng: &mut dyn RandomSource) -> (u8, u8) {
    let hue = rng.byte();
    let offset = PARTNER_HUE_OFFSETS[usize::from(rng.below(6).min(4))];
    (hue, hue.wrapping_add(offset))
}

/// Pick a random fully saturated color and a contrasting partner color
pub fn random_rgb_pair(rng: &mut dyn RandomSource) -> (Rgb, Rgb) {
    let (hue, partner) = random_hue_pair(rng);
    (hsv2rgb(hsv(hue, 255, 255)), hsv2rgb(hsv(partner, 255, 255)))
}
