//! Deterministic color space conversions and the ΔE94 perceptual distance.
//!
//! All functions here are total over their numeric domain: out-of-range
//! inputs are clamped, never rejected, so the match scorer can feed them
//! anything that parsed as a color.

use super::parse::Rgb;

/// CIE XYZ tristimulus values, scaled to the 0–100 range (D65 illuminant).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    /// X tristimulus component.
    pub x: f64,
    /// Y tristimulus component (luminance).
    pub y: f64,
    /// Z tristimulus component.
    pub z: f64,
}

/// CIE L\*a\*b\* coordinates under the D65 reference white.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness, 0 (black) to 100 (diffuse white).
    pub l: f64,
    /// Green–red opponent axis.
    pub a: f64,
    /// Blue–yellow opponent axis.
    pub b: f64,
}

/// Hue/saturation/value with alpha, as color pickers produce it.
///
/// `h` is in degrees, `s`/`v`/`a` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsva {
    /// Hue angle in degrees.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Value (brightness).
    pub v: f64,
    /// Alpha.
    pub a: f64,
}

// D65 reference white for the Lab transform.
const REF_X: f64 = 95.047;
const REF_Y: f64 = 100.0;
const REF_Z: f64 = 108.883;

const LAB_THRESHOLD: f64 = 0.008856;

/// Inverse sRGB gamma for one channel, input and output in `[0, 1]`.
///
/// Inputs outside the unit interval are clamped before the piecewise
/// transform so the result never leaves `[0, 1]`.
pub fn srgb_to_linear(value: f64) -> f64 {
    if value <= 0.0 {
        return 0.0;
    }
    if value >= 1.0 {
        return 1.0;
    }

    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an 8-bit sRGB color to XYZ (D65, 0–100 scale).
pub fn rgb_to_xyz(rgb: Rgb) -> Xyz {
    let r = srgb_to_linear(f64::from(rgb.r) / 255.0);
    let g = srgb_to_linear(f64::from(rgb.g) / 255.0);
    let b = srgb_to_linear(f64::from(rgb.b) / 255.0);

    // Fixed sRGB -> XYZ matrix for the D65 illuminant.
    let x = r * 0.4124564 + g * 0.3575761 + b * 0.1804375;
    let y = r * 0.2126729 + g * 0.7151522 + b * 0.0721750;
    let z = r * 0.0193339 + g * 0.1191920 + b * 0.9503041;

    Xyz {
        x: x * 100.0,
        y: y * 100.0,
        z: z * 100.0,
    }
}

/// Convert XYZ (0–100 scale) to CIE Lab under the D65 reference white.
pub fn xyz_to_lab(xyz: Xyz) -> Lab {
    let fx = lab_f(xyz.x / REF_X);
    let fy = lab_f(xyz.y / REF_Y);
    let fz = lab_f(xyz.z / REF_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convenience composition of [`rgb_to_xyz`] and [`xyz_to_lab`].
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    xyz_to_lab(rgb_to_xyz(rgb))
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_THRESHOLD {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// CIE94 color difference with graphic-arts weighting (kL = kC = kH = 1).
///
/// The SC and SH weights derive from the *first* color's chroma, as the
/// CIE94 formula defines for its reference operand. The metric is therefore
/// not symmetric; callers must keep their operand order stable.
pub fn delta_e94(reference: Lab, sample: Lab) -> f64 {
    const K1: f64 = 0.045;
    const K2: f64 = 0.015;
    const SL: f64 = 1.0;

    let c1 = (reference.a * reference.a + reference.b * reference.b).sqrt();
    let c2 = (sample.a * sample.a + sample.b * sample.b).sqrt();
    let sc = 1.0 + K1 * c1;
    let sh = 1.0 + K2 * c1;

    let delta_l = reference.l - sample.l;
    let delta_a = reference.a - sample.a;
    let delta_b = reference.b - sample.b;
    let delta_c = c1 - c2;
    // Hue difference by elimination; floored at zero so rounding can never
    // produce a negative sqrt argument.
    let delta_h2 = (delta_a * delta_a + delta_b * delta_b - delta_c * delta_c).max(0.0);
    let delta_h = delta_h2.sqrt();

    let l = delta_l / SL;
    let c = delta_c / sc;
    let h = delta_h / sh;

    (l * l + c * c + h * h).sqrt()
}

/// Convert a picker-native HSVA value to RGB, discarding alpha.
///
/// The hue wraps modulo 360; saturation and value are clamped to `[0, 1]`.
pub fn hsva_to_rgb(hsva: Hsva) -> Rgb {
    let h = hsva.h.rem_euclid(360.0);
    let s = hsva.s.clamp(0.0, 1.0);
    let v = hsva.v.clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

/// Whether overlaid text on this color should be light, per ITU-R BT.709
/// luma with the source's threshold of 80.
pub fn is_dark(rgb: Rgb) -> bool {
    let luma = 0.2126 * f64::from(rgb.r) + 0.7152 * f64::from(rgb.g) + 0.0722 * f64::from(rgb.b);
    luma < 80.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_to_linear_endpoints_and_clamping() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert_eq!(srgb_to_linear(1.0), 1.0);
        assert_eq!(srgb_to_linear(-0.5), 0.0);
        assert_eq!(srgb_to_linear(2.0), 1.0);
    }

    #[test]
    fn srgb_to_linear_is_monotonic() {
        let mut previous = srgb_to_linear(0.0);
        for step in 1..=1000 {
            let current = srgb_to_linear(f64::from(step) / 1000.0);
            assert!(
                current >= previous,
                "not monotonic at step {step}: {current} < {previous}"
            );
            previous = current;
        }
    }

    #[test]
    fn white_maps_to_reference_white() {
        let lab = rgb_to_lab(Rgb::new(255, 255, 255));
        assert!((lab.l - 100.0).abs() < 0.01, "L = {}", lab.l);
        assert!(lab.a.abs() < 0.01, "a = {}", lab.a);
        assert!(lab.b.abs() < 0.01, "b = {}", lab.b);
    }

    #[test]
    fn black_maps_to_zero_lightness() {
        let lab = rgb_to_lab(Rgb::new(0, 0, 0));
        assert!(lab.l.abs() < 0.01, "L = {}", lab.l);
    }

    #[test]
    fn self_distance_is_zero() {
        for rgb in [
            Rgb::new(254, 236, 0),
            Rgb::new(25, 0, 89),
            Rgb::new(128, 128, 128),
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
        ] {
            let lab = rgb_to_lab(rgb);
            assert_eq!(delta_e94(lab, lab), 0.0);
        }
    }

    #[test]
    fn lightness_only_difference() {
        let lab1 = Lab {
            l: 50.0,
            a: 60.0,
            b: 30.0,
        };
        let lab2 = Lab {
            l: 55.0,
            a: 60.0,
            b: 30.0,
        };
        let d = delta_e94(lab1, lab2);
        // Only ΔL contributes and SL = 1, so the distance is exactly 5.
        assert!((d - 5.0).abs() < 1e-9, "d = {d}");
        assert!(d > 0.0);
    }

    #[test]
    fn delta_e94_is_asymmetric_in_chroma() {
        let vivid = Lab {
            l: 50.0,
            a: 60.0,
            b: 30.0,
        };
        let dull = Lab {
            l: 50.0,
            a: 10.0,
            b: 5.0,
        };
        // SC/SH come from the first operand's chroma, so swapping operands
        // changes the result.
        let forward = delta_e94(vivid, dull);
        let backward = delta_e94(dull, vivid);
        assert!((forward - backward).abs() > 1.0, "{forward} vs {backward}");
    }

    #[test]
    fn hue_term_never_goes_negative() {
        // Pure chroma difference along one axis: Δa² - ΔC² cancels exactly,
        // so any rounding has to be absorbed by the max(0, ..) floor.
        let lab1 = Lab {
            l: 30.0,
            a: 20.0,
            b: 0.0,
        };
        let lab2 = Lab {
            l: 30.0,
            a: 40.0,
            b: 0.0,
        };
        let d = delta_e94(lab1, lab2);
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }

    #[test]
    fn hsva_conversion_fixtures() {
        // Pure hues at full saturation/value.
        assert_eq!(
            hsva_to_rgb(Hsva {
                h: 0.0,
                s: 1.0,
                v: 1.0,
                a: 1.0
            }),
            Rgb::new(255, 0, 0)
        );
        assert_eq!(
            hsva_to_rgb(Hsva {
                h: 120.0,
                s: 1.0,
                v: 1.0,
                a: 1.0
            }),
            Rgb::new(0, 255, 0)
        );
        assert_eq!(
            hsva_to_rgb(Hsva {
                h: 240.0,
                s: 1.0,
                v: 1.0,
                a: 1.0
            }),
            Rgb::new(0, 0, 255)
        );
        // Zero saturation collapses to the value gray regardless of hue.
        assert_eq!(
            hsva_to_rgb(Hsva {
                h: 200.0,
                s: 0.0,
                v: 0.5,
                a: 1.0
            }),
            Rgb::new(128, 128, 128)
        );
        // Hue wraps.
        assert_eq!(
            hsva_to_rgb(Hsva {
                h: 360.0,
                s: 1.0,
                v: 1.0,
                a: 1.0
            }),
            Rgb::new(255, 0, 0)
        );
    }

    #[test]
    fn darkness_threshold() {
        assert!(is_dark(Rgb::new(0, 0, 0)));
        assert!(is_dark(Rgb::new(25, 0, 89)));
        assert!(!is_dark(Rgb::new(255, 255, 255)));
        assert!(!is_dark(Rgb::new(254, 236, 0)));
    }
}
