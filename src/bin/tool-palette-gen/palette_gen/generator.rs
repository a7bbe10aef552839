#![forbid(unsafe_code)]

use palette::{Clamp, FromColor, Oklch, Srgb};

const L_OK: f32 = 0.74; // perceptual lightness for hue sampling
const C_OK: f32 = 0.12; // chroma, modest to stay in-gamut

/// One generated seed pigment.
#[derive(Clone, Debug)]
pub struct SeedSwatch {
    pub name: String,
    pub rgb: (u8, u8, u8),
}

/// Sample `n` perceptually evenly spaced hues (OKLCH) and clamp into sRGB.
///
/// Evenly spacing hue in OKLCH rather than HSV keeps neighboring seeds at
/// roughly equal perceived distance, so a generated starter palette has no
/// crowded green band.
#[must_use]
pub fn perceptual_wheel(n: usize) -> Vec<SeedSwatch> {
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let hue = i as f32 * 360.0 / n as f32;
            let rgb: Srgb = Srgb::from_color(Oklch::new(L_OK, C_OK, hue)).clamp();
            SeedSwatch {
                name: format!("Pigment {hue:03.0}"),
                rgb: (to_u8(rgb.red), to_u8(rgb.green), to_u8(rgb.blue)),
            }
        })
        .collect()
}

fn to_u8(channel: f32) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}
