//! Color science core: parsing, conversions, pigment mixing and match
//! scoring. Everything here is pure and synchronous; the service layers
//! wrap it in I/O.

pub mod convert;
pub mod matching;
pub mod mixing;
pub mod parse;

pub use convert::{
    Hsva, Lab, Xyz, delta_e94, hsva_to_rgb, is_dark, rgb_to_lab, rgb_to_xyz, srgb_to_linear,
    xyz_to_lab,
};
pub use matching::match_percentage;
pub use mixing::{MIN_MIX_PARTS, MixboxSpace, MixedColor, PigmentSpace, mix_palette};
pub use parse::{ParseColorError, Rgb};
