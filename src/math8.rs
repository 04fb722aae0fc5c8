//! 8-bit fixed-point helpers
//!
//! Scaling, easing and periodic wave shapers operating on `u8` values where
//! 0-255 maps to 0.0-1.0 (or one full period for angles).

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scale an 8-bit value, never dimming a lit channel to zero
///
/// A non-zero value scaled by a non-zero factor stays at least 1, which
/// keeps dim colors visible instead of turning them off.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8_video(value: u8, scale: u8) -> u8 {
    let scaled = ((value as u16 * scale as u16) >> 8) as u8;
    if value != 0 && scale != 0 {
        scaled + 1
    } else {
        scaled
    }
}

/// Ease in out quadratic
pub const fn ease_in_out_quad(i: u8) -> u8 {
    let j = if i & 0x80 != 0 { 255 - i } else { i };
    let jj = scale8(j, j);
    let jj2 = jj << 1;
    if i & 0x80 == 0 { jj2 } else { 255 - jj2 }
}

/// Ease in out cubic (`3x^2 - 2x^3`)
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn ease_in_out_cubic(i: u8) -> u8 {
    let ii = scale8(i, i);
    let iii = scale8(ii, i);
    let r = 3 * ii as u16 - 2 * iii as u16;
    if r & 0x100 != 0 { 255 } else { r as u8 }
}

/// Triangle wave: 0 at angle 0, peaks at 254 around angle 128, back to 0 at 255
pub const fn triwave8(angle: u8) -> u8 {
    let folded = if angle & 0x80 != 0 { 255 - angle } else { angle };
    folded << 1
}

/// Triangle wave with quadratic easing, close to a sine at lower cost
pub const fn quadwave8(angle: u8) -> u8 {
    ease_in_out_quad(triwave8(angle))
}

/// Triangle wave with cubic easing, a higher-contrast sine substitute
pub const fn cubicwave8(angle: u8) -> u8 {
    ease_in_out_cubic(triwave8(angle))
}

/// Sine wave centered on 128: angle 64 peaks at 255, angle 192 bottoms at 0
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sin8(angle: u8) -> u8 {
    let radians = f32::from(angle) * (core::f32::consts::TAU / 256.0);
    let value = libm::roundf(libm::sinf(radians) * 127.5 + 127.5);
    value.clamp(0.0, 255.0) as u8
}
