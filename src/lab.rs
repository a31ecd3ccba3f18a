//! CIE Lab conversion and the CIE76 color difference.
//!
//! Used strictly as a ranking metric: the suggestion search sorts
//! candidate colors by their Lab-space distance from the original.
//! CIE76 is not perceptually uniform near the blue axis or at high
//! chroma, but its ordering is stable enough for ranking nearby
//! candidates.
//!
//! # References
//!
//! - CIE 15:2004, *Colorimetry*, 3rd ed. (D65 white point, Lab forward
//!   transform).

use crate::color::Rgb;

/// CIE Lab color relative to the D65 white point.
///
/// `l` is lightness in `[0, 100]`; `a` and `b` are the opponent axes,
/// unbounded in principle but small for sRGB inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lab {
    /// Lightness (0.0-100.0).
    pub l: f64,
    /// Green-red opponent axis.
    pub a: f64,
    /// Blue-yellow opponent axis.
    pub b: f64,
}

// sRGB -> XYZ (D65), rows pre-divided by the white point so that the
// Lab transform sees X/Xn, Y/Yn, Z/Zn directly.
const XN: f64 = 0.95047;
const ZN: f64 = 1.08883;

/// Convert an sRGB color to CIE Lab (D65).
#[must_use]
pub fn lab_from_rgb(rgb: Rgb) -> Lab {
    let r = crate::contrast::linearize(rgb.r);
    let g = crate::contrast::linearize(rgb.g);
    let b = crate::contrast::linearize(rgb.b);

    let x = (0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b) / XN;
    let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b;
    let z = (0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b) / ZN;

    let fx = lab_f(x);
    let fy = lab_f(y);
    let fz = lab_f(z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// The Lab companding function `f(t)`.
fn lab_f(t: f64) -> f64 {
    if t > 0.008_856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// CIE76 color difference: Euclidean distance in Lab space.
///
/// A ΔE near 2.3 is roughly one just-noticeable difference.
#[must_use]
pub fn delta_e(a: Rgb, b: Rgb) -> f64 {
    let lab_a = lab_from_rgb(a);
    let lab_b = lab_from_rgb(b);
    let dl = lab_a.l - lab_b.l;
    let da = lab_a.a - lab_b.a;
    let db = lab_a.b - lab_b.b;
    (dl * dl + da * da + db * db).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_white_is_l100_neutral() {
        let lab = lab_from_rgb(Rgb::WHITE);
        assert_relative_eq!(lab.l, 100.0, max_relative = 1e-3);
        assert!(lab.a.abs() < 0.01);
        assert!(lab.b.abs() < 0.01);
    }

    #[test]
    fn test_black_is_l0_neutral() {
        let lab = lab_from_rgb(Rgb::BLACK);
        assert_relative_eq!(lab.l, 0.0, epsilon = 1e-9);
        assert!(lab.a.abs() < 1e-9);
        assert!(lab.b.abs() < 1e-9);
    }

    #[test]
    fn test_grays_stay_neutral() {
        for value in [32, 64, 128, 200] {
            let lab = lab_from_rgb(Rgb::new(value, value, value));
            assert!(lab.a.abs() < 0.01, "a drift at gray {value}");
            assert!(lab.b.abs() < 0.01, "b drift at gray {value}");
        }
    }

    #[test]
    fn test_red_reference_values() {
        // sRGB red is conventionally L*=53.2, a*=80.1, b*=67.2
        let lab = lab_from_rgb(Rgb::new(255, 0, 0));
        assert_relative_eq!(lab.l, 53.2, max_relative = 1e-2);
        assert_relative_eq!(lab.a, 80.1, max_relative = 1e-2);
        assert_relative_eq!(lab.b, 67.2, max_relative = 1e-2);
    }

    #[test]
    fn test_delta_e_identity_and_symmetry() {
        let a = Rgb::new(30, 41, 59);
        let b = Rgb::new(248, 250, 252);
        assert_relative_eq!(delta_e(a, a), 0.0, epsilon = 1e-12);
        assert_relative_eq!(delta_e(a, b), delta_e(b, a));
    }

    #[test]
    fn test_delta_e_ranks_nearer_colors_lower() {
        let base = Rgb::new(0x77, 0x77, 0x77);
        let near = Rgb::new(0x7a, 0x7a, 0x7a);
        let far = Rgb::new(0x20, 0x20, 0x20);
        assert!(delta_e(base, near) < delta_e(base, far));
    }

    #[test]
    fn test_black_white_distance_is_100() {
        // Both endpoints are neutral, so ΔE collapses to ΔL = 100
        assert_relative_eq!(
            delta_e(Rgb::BLACK, Rgb::WHITE),
            100.0,
            max_relative = 1e-3
        );
    }
}
