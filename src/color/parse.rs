//! Color string parsing and canonical rendering.
//!
//! The presentation layer and the persisted palette both speak CSS-style
//! color strings (`rgb(254, 236, 0)`, `#fee000`). Everything inside the
//! crate works on [`Rgb`] values; this module is the only place strings are
//! interpreted.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An 8-bit-per-channel sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel, 0–255.
    pub r: u8,
    /// Green channel, 0–255.
    pub g: u8,
    /// Blue channel, 0–255.
    pub b: u8,
}

/// Failure to interpret a string as a color.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized color string `{input}`")]
pub struct ParseColorError {
    /// The offending input, for error reporting.
    pub input: String,
}

impl Rgb {
    /// Build a color from explicit channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color from any of the supported string forms.
    ///
    /// Accepted: `rgb(r, g, b)`, `rgba(r, g, b, a)` (alpha ignored),
    /// `#rrggbb` and `#rgb` (with or without the leading `#`). Channel
    /// values outside 0–255 are rejected rather than clamped so malformed
    /// persisted data is detected instead of silently reinterpreted.
    pub fn parse(input: &str) -> Result<Self, ParseColorError> {
        let trimmed = input.trim();

        if let Some(body) =
            strip_function(trimmed, "rgba").or_else(|| strip_function(trimmed, "rgb"))
        {
            return parse_channels(body).ok_or_else(|| ParseColorError {
                input: input.to_string(),
            });
        }

        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        parse_hex(hex).ok_or_else(|| ParseColorError {
            input: input.to_string(),
        })
    }

    /// Canonical lowercase hex form without alpha, e.g. `#feec00`.
    ///
    /// This is the normalization used for duplicate detection and for the
    /// color-name API (which takes the hex digits without the `#`).
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Hex digits without the leading `#`, as the name-lookup API expects.
    pub fn hex_digits(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    /// Canonical `rgb(r, g, b)` rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

fn strip_function<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(name)?.trim_start();
    rest.strip_prefix('(')?.trim_end().strip_suffix(')')
}

fn parse_channels(body: &str) -> Option<Rgb> {
    let mut parts = body.split(',').map(str::trim);
    let r = parts.next()?.parse::<u8>().ok()?;
    let g = parts.next()?.parse::<u8>().ok()?;
    let b = parts.next()?.parse::<u8>().ok()?;

    // A fourth component is the alpha of an rgba() string; anything past it
    // makes the string malformed.
    if let Some(alpha) = parts.next() {
        alpha.parse::<f64>().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }

    Some(Rgb::new(r, g, b))
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        6 => {
            let value = u32::from_str_radix(hex, 16).ok()?;
            Some(Rgb::new(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            ))
        }
        3 => {
            let value = u32::from_str_radix(hex, 16).ok()?;
            let (r, g, b) = ((value >> 8) & 0xf, (value >> 4) & 0xf, value & 0xf);
            Some(Rgb::new((r * 17) as u8, (g * 17) as u8, (b * 17) as u8))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_function_form() {
        assert_eq!(Rgb::parse("rgb(254, 236, 0)"), Ok(Rgb::new(254, 236, 0)));
        assert_eq!(Rgb::parse("rgb(25,0,89)"), Ok(Rgb::new(25, 0, 89)));
        assert_eq!(Rgb::parse("  rgb( 1 , 2 , 3 )  "), Ok(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn parses_rgba_and_ignores_alpha() {
        assert_eq!(
            Rgb::parse("rgba(255, 255, 255, 0)"),
            Ok(Rgb::new(255, 255, 255))
        );
        assert_eq!(
            Rgb::parse("rgba(10, 20, 30, 0.5)"),
            Ok(Rgb::new(10, 20, 30))
        );
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Rgb::parse("#feec00"), Ok(Rgb::new(254, 236, 0)));
        assert_eq!(Rgb::parse("feec00"), Ok(Rgb::new(254, 236, 0)));
        assert_eq!(Rgb::parse("#fff"), Ok(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::parse("#19A"), Ok(Rgb::new(17, 153, 170)));
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(Rgb::parse("rgb(300, 0, 0)").is_err());
        assert!(Rgb::parse("rgb(1, 2)").is_err());
        assert!(Rgb::parse("rgb(1, 2, 3, 4, 5)").is_err());
        assert!(Rgb::parse("#12345").is_err());
        assert!(Rgb::parse("#gggggg").is_err());
        assert!(Rgb::parse("not a color").is_err());
        assert!(Rgb::parse("").is_err());
    }

    #[test]
    fn canonical_forms_round_trip() {
        let color = Rgb::new(254, 236, 0);
        assert_eq!(color.to_hex(), "#feec00");
        assert_eq!(color.hex_digits(), "feec00");
        assert_eq!(color.to_string(), "rgb(254, 236, 0)");
        assert_eq!(Rgb::parse(&color.to_hex()), Ok(color));
        assert_eq!(Rgb::parse(&color.to_string()), Ok(color));
    }
}
