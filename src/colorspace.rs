//! Color representations used by the clustering strategies: CIELAB for
//! perceptually-uniform distances, HSV saturation for weighting, and the
//! hex formatting exposed to callers.
//!
//! Channels move through this module as f32 in [0,1] (sRGB) unless a
//! function says otherwise. LAB values use the conventional scale
//! (L in [0,100], a/b roughly [-128,127]).

use crate::error::{Error, Result};
use rgb::RGB8;

// D65 reference white, 2° observer.
const XN: f32 = 0.95047;
const YN: f32 = 1.0;
const ZN: f32 = 1.08883;

const LAB_EPS: f32 = 0.008856; // (6/29)^3
const LAB_KAPPA: f32 = 7.787; // 1/(3*(6/29)^2)

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn lab_f(t: f32) -> f32 {
    if t > LAB_EPS {
        t.cbrt()
    } else {
        LAB_KAPPA * t + 16.0 / 116.0
    }
}

fn lab_f_inv(t: f32) -> f32 {
    let t3 = t * t * t;
    if t3 > LAB_EPS {
        t3
    } else {
        (t - 16.0 / 116.0) / LAB_KAPPA
    }
}

/// sRGB [0,1] to CIELAB.
pub fn rgb_to_lab(rgb: [f32; 3]) -> [f32; 3] {
    let r = srgb_to_linear(rgb[0]);
    let g = srgb_to_linear(rgb[1]);
    let b = srgb_to_linear(rgb[2]);

    let x = 0.4124 * r + 0.3576 * g + 0.1805 * b;
    let y = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    let z = 0.0193 * r + 0.1192 * g + 0.9505 * b;

    let fx = lab_f(x / XN);
    let fy = lab_f(y / YN);
    let fz = lab_f(z / ZN);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// CIELAB back to sRGB [0,1]. Out-of-gamut values are clamped.
pub fn lab_to_rgb(lab: [f32; 3]) -> [f32; 3] {
    let fy = (lab[0] + 16.0) / 116.0;
    let fx = fy + lab[1] / 500.0;
    let fz = fy - lab[2] / 200.0;

    let x = XN * lab_f_inv(fx);
    let y = YN * lab_f_inv(fy);
    let z = ZN * lab_f_inv(fz);

    let r = 3.2406 * x - 1.5372 * y - 0.4986 * z;
    let g = -0.9689 * x + 1.8758 * y + 0.0415 * z;
    let b = 0.0557 * x - 0.2040 * y + 1.0570 * z;

    [
        linear_to_srgb(r).clamp(0.0, 1.0),
        linear_to_srgb(g).clamp(0.0, 1.0),
        linear_to_srgb(b).clamp(0.0, 1.0),
    ]
}

/// HSV saturation of an sRGB [0,1] color. Black maps to 0.
pub fn saturation(rgb: [f32; 3]) -> f32 {
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    let min = rgb[0].min(rgb[1]).min(rgb[2]);
    if max <= 0.0 { 0.0 } else { (max - min) / max }
}

/// Quantize an f32 [0,1] color to 8-bit display RGB.
pub fn to_rgb8(rgb: [f32; 3]) -> RGB8 {
    RGB8::new(
        (rgb[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb[2].clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Format as a lowercase, zero-padded `#rrggbb` string.
pub fn rgb_to_hex(color: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Parse a 6-digit hex string, with or without the leading `#`.
pub fn hex_to_rgb(hex: &str) -> Result<RGB8> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidParameter(format!(
            "not a 6-digit hex color: {:?}",
            hex
        )));
    }
    let parse = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
    Ok(RGB8::new(
        parse(&digits[0..2]),
        parse(&digits[2..4]),
        parse(&digits[4..6]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_white_and_black() {
        let white = rgb_to_lab([1.0, 1.0, 1.0]);
        assert!((white[0] - 100.0).abs() < 0.1);
        assert!(white[1].abs() < 0.5);
        assert!(white[2].abs() < 0.5);

        let black = rgb_to_lab([0.0, 0.0, 0.0]);
        assert!(black[0].abs() < 0.1);
    }

    #[test]
    fn test_lab_round_trip_within_tolerance() {
        // Round-trip error must stay within 2 levels per 8-bit channel.
        let cases = [
            [1.0, 0.5, 0.0],
            [0.2, 0.4, 0.6],
            [0.0, 1.0, 0.0],
            [0.5, 0.5, 0.5],
            [0.9, 0.05, 0.95],
        ];
        for rgb in cases {
            let back = lab_to_rgb(rgb_to_lab(rgb));
            for c in 0..3 {
                let diff = (back[c] - rgb[c]).abs() * 255.0;
                assert!(diff <= 2.0, "channel {} off by {} levels", c, diff);
            }
        }
    }

    #[test]
    fn test_lab_red_has_positive_a() {
        let red = rgb_to_lab([1.0, 0.0, 0.0]);
        assert!(red[1] > 50.0, "red should have strongly positive a*");
    }

    #[test]
    fn test_saturation_extremes() {
        assert_eq!(saturation([0.5, 0.5, 0.5]), 0.0);
        assert_eq!(saturation([0.0, 0.0, 0.0]), 0.0);
        assert!((saturation([1.0, 0.0, 0.0]) - 1.0).abs() < 1e-6);
        let mid = saturation([0.8, 0.4, 0.4]);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_rgb_to_hex_format() {
        assert_eq!(rgb_to_hex(RGB8::new(255, 128, 0)), "#ff8000");
        assert_eq!(rgb_to_hex(RGB8::new(0, 0, 0)), "#000000");
        assert_eq!(rgb_to_hex(RGB8::new(1, 2, 3)), "#010203");
    }

    #[test]
    fn test_hex_round_trip() {
        for color in [
            RGB8::new(255, 128, 0),
            RGB8::new(0, 0, 0),
            RGB8::new(255, 255, 255),
            RGB8::new(17, 34, 51),
        ] {
            assert_eq!(hex_to_rgb(&rgb_to_hex(color)).unwrap(), color);
        }
    }

    #[test]
    fn test_hex_to_rgb_accepts_bare_digits() {
        assert_eq!(hex_to_rgb("ff8000").unwrap(), RGB8::new(255, 128, 0));
    }

    #[test]
    fn test_hex_to_rgb_rejects_malformed() {
        assert!(hex_to_rgb("#fff").is_err());
        assert!(hex_to_rgb("#zzzzzz").is_err());
        assert!(hex_to_rgb("").is_err());
    }

    #[test]
    fn test_to_rgb8_clamps() {
        assert_eq!(to_rgb8([1.2, -0.1, 0.5]), RGB8::new(255, 0, 128));
    }
}
