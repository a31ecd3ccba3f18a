//! Relative luminance, contrast ratio, and WCAG threshold evaluation.
//!
//! Implements the WCAG 2.x definitions: gamma-linearized relative
//! luminance, the `(L1 + 0.05) / (L2 + 0.05)` contrast ratio, and the
//! AA/AAA threshold grid for normal text, large text, and graphics.

use crate::color::Rgb;

/// Minimum ratio for AA normal text (also AAA large text).
pub const AA_NORMAL: f64 = 4.5;

/// Minimum ratio for AAA normal text.
pub const AAA_NORMAL: f64 = 7.0;

/// Minimum ratio for AA large text and graphical objects.
pub const AA_LARGE: f64 = 3.0;

/// Pass/fail against every WCAG contrast threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WcagCompliance {
    /// Normal text, level AA (ratio >= 4.5).
    pub normal_aa: bool,
    /// Normal text, level AAA (ratio >= 7).
    pub normal_aaa: bool,
    /// Large text, level AA (ratio >= 3).
    pub large_aa: bool,
    /// Large text, level AAA (ratio >= 4.5).
    pub large_aaa: bool,
    /// Graphical objects and UI components, level AA (ratio >= 3).
    pub graphics_aa: bool,
}

/// Relative luminance of an sRGB color per the WCAG 2.x formula.
///
/// Each channel is normalized to `[0, 1]`, gamma-linearized, then
/// combined as `0.2126 R + 0.7152 G + 0.0722 B`. Black is 0, white 1.
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let r = linearize(rgb.r);
    let g = linearize(rgb.g);
    let b = linearize(rgb.b);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Gamma-linearize one 8-bit sRGB channel.
///
/// Uses the WCAG 2.x knee at 0.03928 (WCAG 2.2 kept the original
/// constant; the IEC value 0.04045 differs only below 1e-7 luminance).
pub(crate) fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG contrast ratio between two colors.
///
/// `(Lmax + 0.05) / (Lmin + 0.05)`; symmetric in its arguments, 1.0 for
/// identical colors, exactly 21.0 for black on white.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    ratio_from_luminance(relative_luminance(a), relative_luminance(b))
}

/// Contrast ratio from two precomputed relative luminances.
#[must_use]
pub fn ratio_from_luminance(lum_a: f64, lum_b: f64) -> f64 {
    let lighter = lum_a.max(lum_b);
    let darker = lum_a.min(lum_b);
    (lighter + 0.05) / (darker + 0.05)
}

/// Evaluate a contrast ratio against every WCAG threshold.
#[must_use]
pub fn wcag_compliance(ratio: f64) -> WcagCompliance {
    WcagCompliance {
        normal_aa: ratio >= AA_NORMAL,
        normal_aaa: ratio >= AAA_NORMAL,
        large_aa: ratio >= AA_LARGE,
        large_aaa: ratio >= AA_NORMAL,
        graphics_aa: ratio >= AA_LARGE,
    }
}

/// WCAG large-text classification for a font size in CSS pixels.
///
/// Large text is at least 24px, or at least 18.66px when bold
/// (the WCAG 18pt / 14pt-bold cutoffs expressed in pixels).
#[must_use]
pub fn is_large_text(font_size: f64, is_bold: bool) -> bool {
    font_size >= 24.0 || (is_bold && font_size >= 18.66)
}

/// Pick pure white or pure black text for a background, whichever has
/// the higher contrast ratio. Ties favor white.
#[must_use]
pub fn readable_text_color(background: Rgb) -> Rgb {
    let white_ratio = contrast_ratio(Rgb::WHITE, background);
    let black_ratio = contrast_ratio(Rgb::BLACK, background);
    if white_ratio >= black_ratio {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}
