//! Color types and color space conversions.
//!
//! Provides RGB, HSL, and HSV representations with conversions between
//! them, canonical hex encoding, and alpha compositing. All conversions
//! stay within the 8-bit sRGB gamut; round trips through HSL/HSV are
//! exact up to 8-bit quantization (at most one step per channel).

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Default foreground used when parsing fails (dark slate).
pub const DEFAULT_FOREGROUND: Rgb = Rgb::new(0x11, 0x18, 0x27);

/// Default background used when parsing fails (light slate).
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(0xf8, 0xfa, 0xfc);

/// RGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Rgb {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from float channels, rounding to the nearest
    /// integer and clamping to the byte range.
    #[must_use]
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self::new(clamp_byte(r), clamp_byte(g), clamp_byte(b))
    }

    /// Encode as canonical lowercase hex (`#rrggbb`).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Decode a strict 6-digit hex string (`#rrggbb`, case-insensitive).
    ///
    /// For lenient parsing of 3/4/8-digit hex and functional syntax see
    /// [`crate::parse::parse_color`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] unless the input is `#` followed
    /// by exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(hex.to_string()))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        let r = u8::from_str_radix(&digits[0..2], 16)
            .map_err(|_| Error::InvalidColor(hex.to_string()))?;
        let g = u8::from_str_radix(&digits[2..4], 16)
            .map_err(|_| Error::InvalidColor(hex.to_string()))?;
        let b = u8::from_str_radix(&digits[4..6], 16)
            .map_err(|_| Error::InvalidColor(hex.to_string()))?;
        Ok(Self::new(r, g, b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// HSL color in its own unit system: hue in degrees `[0, 360)`,
/// saturation and lightness in percent `[0, 100]`.
///
/// The suggestion search works internally on fractional hue/saturation/
/// lightness in `[0, 1]`; crossing between the two representations is
/// always explicit via [`hsl_fractions`] and [`rgb_from_hsl_fractions`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    /// Hue (0.0-360.0 degrees).
    pub h: f64,
    /// Saturation (0.0-100.0 percent).
    pub s: f64,
    /// Lightness (0.0-100.0 percent).
    pub l: f64,
}

impl Hsl {
    /// Create a new HSL color.
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// HSV color: hue in degrees `[0, 360)`, saturation and value in
/// percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsv {
    /// Hue (0.0-360.0 degrees).
    pub h: f64,
    /// Saturation (0.0-100.0 percent).
    pub s: f64,
    /// Value (0.0-100.0 percent).
    pub v: f64,
}

impl Hsv {
    /// Create a new HSV color.
    #[must_use]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

fn clamp_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Wrap a hue in degrees into `[0, 360)`.
fn wrap_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid(360.0) can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Convert an RGB color to HSL (degrees/percent units).
///
/// A fully desaturated input has no defined hue; hue 0 is returned by
/// convention.
#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(wrap_hue(h * 60.0), s * 100.0, l * 100.0)
}

/// Convert an HSL color (degrees/percent units) to RGB.
///
/// Hue wraps modulo 360; saturation and lightness clamp to `[0, 100]`.
#[must_use]
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let (h, s, l) = hsl_fractions(hsl);
    rgb_from_hsl_fractions(h, s, l)
}

/// Decompose an HSL color into fractional hue/saturation/lightness in
/// `[0, 1]`, wrapping hue and clamping saturation/lightness.
#[must_use]
pub fn hsl_fractions(hsl: Hsl) -> (f64, f64, f64) {
    (
        wrap_hue(hsl.h) / 360.0,
        hsl.s.clamp(0.0, 100.0) / 100.0,
        hsl.l.clamp(0.0, 100.0) / 100.0,
    )
}

/// Convert fractional HSL components in `[0, 1]` to RGB.
#[must_use]
pub fn rgb_from_hsl_fractions(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        let gray = l * 255.0;
        return Rgb::from_f64(gray, gray, gray);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgb::from_f64(
        hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_rgb(p, q, h) * 255.0,
        hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0,
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Convert an RGB color to HSV (degrees/percent units).
#[must_use]
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let s = if max == 0.0 { 0.0 } else { d / max };

    let h = if d == 0.0 {
        0.0
    } else if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsv::new(wrap_hue(h * 60.0), s * 100.0, max * 100.0)
}

/// Convert an HSV color (degrees/percent units) to RGB.
///
/// Hue wraps modulo 360; saturation and value clamp to `[0, 100]`.
#[must_use]
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = wrap_hue(hsv.h) / 60.0;
    let s = hsv.s.clamp(0.0, 100.0) / 100.0;
    let v = hsv.v.clamp(0.0, 100.0) / 100.0;

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::from_f64(r * 255.0, g * 255.0, b * 255.0)
}

/// Composite a translucent foreground over an opaque background.
///
/// Linear per-channel blend `fg * alpha + bg * (1 - alpha)`, rounded to
/// the nearest integer. Alpha is clamped to `[0, 1]`; a fully opaque
/// foreground is returned unchanged (exact identity, no float rounding).
#[must_use]
pub fn alpha_blend(fg: Rgb, fg_alpha: f64, bg: Rgb) -> Rgb {
    if fg_alpha >= 1.0 {
        return fg;
    }
    let alpha = fg_alpha.clamp(0.0, 1.0);

    let blend = |f: u8, b: u8| -> f64 { f64::from(f) * alpha + f64::from(b) * (1.0 - alpha) };

    Rgb::from_f64(
        blend(fg.r, bg.r),
        blend(fg.g, bg.g),
        blend(fg.b, bg.b),
    )
}

/// True if `value` is `#` followed by 0-8 hex digits.
///
/// Accepts in-progress keystrokes in a hex input field without
/// rejecting drafts. Not a validity check for finished values; use
/// [`Rgb::from_hex`] or [`crate::parse::parse_color`] for those.
#[must_use]
pub fn is_valid_partial_hex(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => digits.len() <= 8 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
