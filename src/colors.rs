//! Color helpers for the flower LEDs.
//!
//! HSV is the natural space for hue rotation, so the rainbow sequence builds
//! its colors here. All functions return `palette::Srgb`.

use palette::{FromColor, Hsv, Srgb};

/// Millidegrees in one full hue rotation.
pub const FULL_ROTATION_MILLIDEGREES: u64 = 360_000;

/// Creates an RGB color from HSV (Hue, Saturation, Value) components.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    let hsv = Hsv::new(hue, saturation, value);
    Srgb::from_color(hsv)
}

/// Creates an RGB color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Srgb {
    hsv(hue, 1.0, 1.0)
}

/// Hue in degrees for the given frame, wrapping modulo a full rotation.
///
/// Integer millidegrees keep the angle exact however large `frame` grows.
pub fn rainbow_hue(frame: u32, step_millidegrees: u32) -> f32 {
    let millidegrees = (frame as u64 * step_millidegrees as u64) % FULL_ROTATION_MILLIDEGREES;
    millidegrees as f32 / 1000.0
}

/// Converts a hue step in degrees to whole millidegrees.
///
/// Negative and NaN steps become zero.
pub fn degrees_to_millidegrees(degrees: f32) -> u32 {
    (degrees * 1000.0 + 0.5) as u32
}

/// Clamps every component of `color` to the 0.0-1.0 range.
pub fn clamp(color: Srgb) -> Srgb {
    Srgb::new(
        clamp_component(color.red),
        clamp_component(color.green),
        clamp_component(color.blue),
    )
}

fn clamp_component(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
