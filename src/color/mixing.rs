//! Weighted pigment mixing through an opaque latent paint space.
//!
//! Averaging pigments in RGB behaves like mixing light: yellow and blue wash
//! out to gray. Real paint is subtractive, so the mixer converts every
//! contributing swatch into a latent representation supplied by a pretrained
//! model, interpolates there, and converts the accumulated vector back. The
//! model is injected behind [`PigmentSpace`]; the mixer never assumes
//! anything about the latent vector beyond its componentwise linearity.

use std::fmt;

use super::parse::Rgb;

/// Weights at or below this threshold count as "not in the mix" at all:
/// the swatch is excluded from both the parts total and the accumulation.
pub const MIN_MIX_PARTS: f64 = 1e-6;

/// Injected latent paint space, typically a pretrained pigment model.
///
/// Implementations must be deterministic and must accept back any vector of
/// the length they produce. The latent length itself is opaque to callers.
pub trait PigmentSpace: Send + Sync {
    /// Encode an sRGB color into the latent paint representation.
    fn rgb_to_latent(&self, rgb: Rgb) -> Vec<f32>;

    /// Decode a latent vector back to sRGB.
    fn latent_to_rgb(&self, latent: &[f32]) -> Rgb;
}

/// Production [`PigmentSpace`] backed by the Mixbox pigment model.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixboxSpace;

impl PigmentSpace for MixboxSpace {
    fn rgb_to_latent(&self, rgb: Rgb) -> Vec<f32> {
        mixbox::rgb_to_latent(&[rgb.r, rgb.g, rgb.b]).to_vec()
    }

    fn latent_to_rgb(&self, latent: &[f32]) -> Rgb {
        let mut buffer = [0.0f32; mixbox::LATENT_SIZE];
        for (slot, component) in buffer.iter_mut().zip(latent) {
            *slot = *component;
        }
        let [r, g, b] = mixbox::latent_to_rgb(&buffer);
        Rgb::new(r, g, b)
    }
}

/// Result of blending the palette: either an opaque color or the defined
/// empty state (fully transparent white) when nothing is in the mix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixedColor {
    /// The blended color. Transparent white when the mix is empty.
    pub rgb: Rgb,
    /// 1.0 for an actual blend, 0.0 for the empty sentinel.
    pub alpha: f64,
}

impl MixedColor {
    /// The defined empty-mix state: no pigment contribution at all.
    pub const EMPTY: Self = Self {
        rgb: Rgb::new(255, 255, 255),
        alpha: 0.0,
    };

    /// Wrap an actual blend result.
    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    /// Whether this is the empty-mix sentinel.
    pub fn is_empty(&self) -> bool {
        self.alpha == 0.0
    }

    /// The blended color, or `None` for the empty sentinel.
    pub fn rgb(&self) -> Option<Rgb> {
        (!self.is_empty()).then_some(self.rgb)
    }
}

impl fmt::Display for MixedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "rgba(255, 255, 255, 0)")
        } else {
            write!(f, "{}", self.rgb)
        }
    }
}

/// Blend weighted swatches into a single color.
///
/// Each entry is a swatch color with its parts in the mix. Entries at or
/// below [`MIN_MIX_PARTS`] are dropped before the total is computed, so
/// floating noise can never pull a visually absent color into the blend.
/// With nothing left the defined empty sentinel is returned; this is the
/// normal initial/reset state, not a failure.
pub fn mix_palette<I>(space: &dyn PigmentSpace, swatches: I) -> MixedColor
where
    I: IntoIterator<Item = (Rgb, f64)>,
{
    let entries: Vec<(Rgb, f64)> = swatches
        .into_iter()
        .filter(|(_, parts)| *parts > MIN_MIX_PARTS)
        .collect();

    let total_parts: f64 = entries.iter().map(|(_, parts)| parts).sum();
    if total_parts <= MIN_MIX_PARTS {
        return MixedColor::EMPTY;
    }

    // Accumulator length follows whatever the injected model produces.
    let mut accumulator: Vec<f32> = Vec::new();
    for (rgb, parts) in entries {
        let latent = space.rgb_to_latent(rgb);
        if accumulator.is_empty() {
            accumulator = vec![0.0; latent.len()];
        }
        let share = (parts / total_parts) as f32;
        for (slot, component) in accumulator.iter_mut().zip(latent) {
            *slot += component * share;
        }
    }

    MixedColor::opaque(space.latent_to_rgb(&accumulator))
}
