//! Accessible color suggestion search.
//!
//! For a color pair that fails a WCAG threshold, finds the
//! perceptually-closest replacement colors that would pass. The search
//! holds the failing color's hue and saturation fixed and varies only
//! lightness: it inverts the contrast-ratio formula to get the exact
//! target luminance, binary-searches the sRGB gamut for a lightness
//! producing that luminance, corrects for 8-bit rounding misses with a
//! bounded nudge, and ranks accepted candidates by CIE76 distance from
//! the original.
//!
//! Every loop has a fixed iteration bound, so a call costs at most a
//! few hundred luminance evaluations regardless of input.

use crate::color::{alpha_blend, hsl_fractions, rgb_from_hsl_fractions, rgb_to_hsl, Hsl, Rgb};
use crate::color::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
use crate::contrast::{
    contrast_ratio, relative_luminance, wcag_compliance, WcagCompliance, AAA_NORMAL, AA_NORMAL,
};
use crate::error::{Error, Result};
use crate::lab::delta_e;
use crate::parse::parse_color_with_alpha;
use std::collections::HashSet;

/// Lightness binary search iterations; 2^-20 resolution is finer than
/// 8-bit quantization can express.
const BINARY_SEARCH_ITERATIONS: u32 = 20;

/// Lightness increment for the quantization-correction nudge.
const NUDGE_STEP: f64 = 0.001;

/// Maximum nudge steps before a candidate is discarded.
const MAX_NUDGE_STEPS: u32 = 50;

/// WCAG conformance level a suggestion satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Normal-text AA (ratio >= 4.5).
    Aa,
    /// Normal-text AAA (ratio >= 7).
    Aaa,
}

impl Level {
    /// The minimum contrast ratio this level requires for normal text.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::Aa => AA_NORMAL,
            Self::Aaa => AAA_NORMAL,
        }
    }
}

/// Which side of the pair a suggestion replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SuggestionTarget {
    /// Replace the foreground, keep the background.
    Foreground,
    /// Replace the background, keep the foreground.
    Background,
}

/// Whether a suggested color is darker or lighter than the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Lower luminance than the color it replaces.
    Darker,
    /// Equal or higher luminance than the color it replaces.
    Lighter,
}

/// A compliant replacement color found by the search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorSuggestion {
    /// Canonical hex of the replacement color.
    pub hex: String,
    /// Actual contrast ratio of the repaired pair (>= the level's
    /// threshold).
    pub ratio: f64,
    /// Darker or lighter than the color it replaces.
    pub direction: Direction,
    /// The conformance level this suggestion reaches.
    pub level: Level,
    /// Which side of the pair it replaces.
    pub target: SuggestionTarget,
    /// CIE76 distance from the color it replaces; the result list is
    /// sorted ascending on this.
    pub distance: f64,
}

/// Outcome of analyzing a color pair.
///
/// Distinguishes "nothing to fix" from "nothing fixable", which the
/// flat list returned by [`suggest_accessible_colors`] conflates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SuggestionOutcome {
    /// The pair already meets AAA; no suggestions are needed.
    AlreadyCompliant {
        /// The pair's contrast ratio.
        ratio: f64,
    },
    /// Replacement colors that repair the failing thresholds, sorted
    /// ascending by perceptual distance.
    Suggestions(Vec<ColorSuggestion>),
    /// At least one threshold fails but no in-gamut replacement was
    /// reachable while preserving hue and saturation.
    NoneReachable {
        /// The pair's contrast ratio.
        ratio: f64,
    },
}

/// Suggest compliant replacement colors for a failing pair.
///
/// Runs the search for both the foreground (background fixed) and the
/// background (foreground fixed), for every normal-text threshold the
/// pair currently fails, and returns the merged list sorted ascending
/// by perceptual distance. Returns an empty list when the pair is
/// already AAA-compliant, and also when no in-gamut fix exists; use
/// [`analyze_pair`] to tell those apart.
#[must_use]
pub fn suggest_accessible_colors(fg: Rgb, bg: Rgb) -> Vec<ColorSuggestion> {
    match analyze_pair(fg, bg) {
        SuggestionOutcome::Suggestions(suggestions) => suggestions,
        SuggestionOutcome::AlreadyCompliant { .. } | SuggestionOutcome::NoneReachable { .. } => {
            Vec::new()
        }
    }
}

/// Analyze a color pair, reporting compliance, suggestions, or search
/// exhaustion as distinct outcomes.
#[must_use]
pub fn analyze_pair(fg: Rgb, bg: Rgb) -> SuggestionOutcome {
    let ratio = contrast_ratio(fg, bg);

    let failing: Vec<Level> = [Level::Aa, Level::Aaa]
        .into_iter()
        .filter(|level| ratio < level.threshold())
        .collect();
    if failing.is_empty() {
        return SuggestionOutcome::AlreadyCompliant { ratio };
    }

    let mut suggestions = search_source(fg, bg, SuggestionTarget::Foreground, &failing);
    suggestions.extend(search_source(bg, fg, SuggestionTarget::Background, &failing));
    suggestions.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    if suggestions.is_empty() {
        SuggestionOutcome::NoneReachable { ratio }
    } else {
        SuggestionOutcome::Suggestions(suggestions)
    }
}

/// Search for replacements of `source` against the fixed color `other`.
///
/// Hue and saturation of `source` are held fixed as fractions; a fully
/// desaturated source decomposes to hue 0 by convention and the search
/// proceeds over grays.
fn search_source(
    source: Rgb,
    other: Rgb,
    target: SuggestionTarget,
    failing: &[Level],
) -> Vec<ColorSuggestion> {
    let source_lum = relative_luminance(source);
    let other_lum = relative_luminance(other);
    let (hue, sat, _) = hsl_fractions(rgb_to_hsl(source));

    let mut seen: HashSet<(String, Level)> = HashSet::new();
    let mut found = Vec::new();

    for &level in failing {
        let target_ratio = level.threshold();

        // Closed-form inversion of (lighter + 0.05) / (darker + 0.05):
        // the two luminances that hit target_ratio against `other`.
        let darker_lum = (other_lum + 0.05) / target_ratio - 0.05;
        let lighter_lum = target_ratio * (other_lum + 0.05) - 0.05;

        for target_lum in [darker_lum, lighter_lum] {
            if !(0.0..=1.0).contains(&target_lum) {
                continue;
            }
            let Some((candidate, ratio)) =
                match_luminance(hue, sat, target_lum, other, other_lum, target_ratio)
            else {
                continue;
            };

            let hex = candidate.to_hex();
            if !seen.insert((hex.clone(), level)) {
                continue;
            }

            let direction = if relative_luminance(candidate) < source_lum {
                Direction::Darker
            } else {
                Direction::Lighter
            };
            found.push(ColorSuggestion {
                hex,
                ratio,
                direction,
                level,
                target,
                distance: delta_e(source, candidate),
            });
        }
    }

    found
}

/// Find the color at `hsl`'s hue and saturation whose relative
/// luminance best matches `target_lum`.
///
/// This is the strict form of the search primitive the suggestion
/// algorithm is built on: it does not nudge for 8-bit rounding, so the
/// result's luminance can miss `target_lum` by up to one quantization
/// step.
///
/// # Errors
///
/// Returns [`Error::OutOfGamut`] when `target_lum` is outside `[0, 1]`.
pub fn color_at_luminance(hsl: Hsl, target_lum: f64) -> Result<Rgb> {
    if !(0.0..=1.0).contains(&target_lum) {
        return Err(Error::OutOfGamut {
            luminance: target_lum,
        });
    }
    let (hue, sat, _) = hsl_fractions(hsl);
    Ok(rgb_from_hsl_fractions(hue, sat, lightness_search(hue, sat, target_lum)))
}

/// Binary-search fractional lightness for `target_lum` at fixed
/// hue/saturation. Luminance is monotone in lightness, so the fixed
/// iteration count converges well below 8-bit resolution.
fn lightness_search(hue: f64, sat: f64, target_lum: f64) -> f64 {
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    for _ in 0..BINARY_SEARCH_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let lum = relative_luminance(rgb_from_hsl_fractions(hue, sat, mid));
        if lum < target_lum {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

/// Find a lightness whose color reaches `target_ratio` against `other`,
/// aiming for `target_lum`.
///
/// Binary-searches lightness for the target luminance, then nudges in
/// fixed steps away from `other`'s luminance to absorb the 8-bit
/// rounding error. Returns the candidate and its actual measured
/// ratio, or `None` when the nudge budget is exhausted or lightness
/// leaves the gamut.
fn match_luminance(
    hue: f64,
    sat: f64,
    target_lum: f64,
    other: Rgb,
    other_lum: f64,
    target_ratio: f64,
) -> Option<(Rgb, f64)> {
    let mut lightness = lightness_search(hue, sat, target_lum);
    let candidate = rgb_from_hsl_fractions(hue, sat, lightness);
    let ratio = contrast_ratio(candidate, other);
    if ratio >= target_ratio {
        return Some((candidate, ratio));
    }

    // Quantization pushed the ratio just under the threshold. Keep
    // moving lightness in the adjustment direction (away from the
    // fixed color's luminance) until it clears or the budget runs out.
    let step = if target_lum > other_lum {
        NUDGE_STEP
    } else {
        -NUDGE_STEP
    };
    for _ in 0..MAX_NUDGE_STEPS {
        lightness += step;
        if !(0.0..=1.0).contains(&lightness) {
            return None;
        }
        let candidate = rgb_from_hsl_fractions(hue, sat, lightness);
        let ratio = contrast_ratio(candidate, other);
        if ratio >= target_ratio {
            return Some((candidate, ratio));
        }
    }

    None
}

/// Full contrast analysis of two raw color inputs.
///
/// Mirrors how a contrast-checker UI consumes the core: parse both
/// inputs with the default fallbacks, composite the foreground over the
/// background and the background over white, then evaluate the
/// effective pair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContrastReport {
    /// Parsed foreground (fallback-substituted if unparseable).
    pub foreground: Rgb,
    /// Parsed background (fallback-substituted if unparseable).
    pub background: Rgb,
    /// Foreground alpha in `[0, 1]`.
    pub fg_alpha: f64,
    /// Background alpha in `[0, 1]`.
    pub bg_alpha: f64,
    /// Foreground composited over the background.
    pub effective_foreground: Rgb,
    /// Background composited over white.
    pub effective_background: Rgb,
    /// Contrast ratio of the effective pair.
    pub ratio: f64,
    /// WCAG threshold evaluation of `ratio`.
    pub compliance: WcagCompliance,
    /// Replacement suggestions for the effective pair (empty when
    /// AAA-compliant or unreachable).
    pub suggestions: Vec<ColorSuggestion>,
}

/// Analyze two raw color strings end to end.
///
/// Unparseable inputs fall back to
/// [`DEFAULT_FOREGROUND`] / [`DEFAULT_BACKGROUND`] at full opacity;
/// this function never fails.
#[must_use]
pub fn contrast_report(fg_input: &str, bg_input: &str) -> ContrastReport {
    let fg_parsed = parse_color_with_alpha(fg_input);
    let bg_parsed = parse_color_with_alpha(bg_input);

    let (foreground, fg_alpha) = fg_parsed
        .map_or((DEFAULT_FOREGROUND, 1.0), |parsed| (parsed.rgb, parsed.alpha));
    let (background, bg_alpha) = bg_parsed
        .map_or((DEFAULT_BACKGROUND, 1.0), |parsed| (parsed.rgb, parsed.alpha));

    let effective_foreground = alpha_blend(foreground, fg_alpha, background);
    let effective_background = alpha_blend(background, bg_alpha, Rgb::WHITE);

    let ratio = contrast_ratio(effective_foreground, effective_background);

    ContrastReport {
        foreground,
        background,
        fg_alpha,
        bg_alpha,
        effective_foreground,
        effective_background,
        ratio,
        compliance: wcag_compliance(ratio),
        suggestions: suggest_accessible_colors(effective_foreground, effective_background),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(value: u8) -> Rgb {
        Rgb::new(value, value, value)
    }

    #[test]
    fn test_compliant_pair_returns_empty() {
        assert!(suggest_accessible_colors(Rgb::BLACK, Rgb::WHITE).is_empty());
    }

    #[test]
    fn test_compliant_pair_outcome() {
        match analyze_pair(Rgb::BLACK, Rgb::WHITE) {
            SuggestionOutcome::AlreadyCompliant { ratio } => {
                assert!((ratio - 21.0).abs() < 1e-9);
            }
            other => panic!("expected AlreadyCompliant, got {other:?}"),
        }
    }

    #[test]
    fn test_failing_grays_produce_suggestions() {
        let suggestions = suggest_accessible_colors(gray(0x77), gray(0x88));
        assert!(!suggestions.is_empty());
    }

    #[test]
    fn test_every_suggestion_meets_its_level() {
        let fg = gray(0x77);
        let bg = gray(0x88);
        for suggestion in suggest_accessible_colors(fg, bg) {
            assert!(
                suggestion.ratio >= suggestion.level.threshold(),
                "{} tagged {:?} but ratio is {}",
                suggestion.hex,
                suggestion.level,
                suggestion.ratio
            );

            // Re-measure against the fixed side of the pair
            let candidate = Rgb::from_hex(&suggestion.hex).unwrap();
            let other = match suggestion.target {
                SuggestionTarget::Foreground => bg,
                SuggestionTarget::Background => fg,
            };
            let measured = contrast_ratio(candidate, other);
            assert!(
                measured >= suggestion.level.threshold(),
                "{} does not actually repair the pair ({measured})",
                suggestion.hex
            );
        }
    }

    #[test]
    fn test_suggestions_sorted_by_distance() {
        let suggestions = suggest_accessible_colors(gray(0x77), gray(0x88));
        for window in suggestions.windows(2) {
            assert!(window[0].distance <= window[1].distance);
        }
    }

    #[test]
    fn test_suggestions_cover_both_targets() {
        let suggestions = suggest_accessible_colors(gray(0x77), gray(0x88));
        assert!(suggestions
            .iter()
            .any(|s| s.target == SuggestionTarget::Foreground));
        assert!(suggestions
            .iter()
            .any(|s| s.target == SuggestionTarget::Background));
    }

    #[test]
    fn test_direction_tags_match_luminance_shift() {
        let fg = gray(0x77);
        let bg = gray(0x88);
        for suggestion in suggest_accessible_colors(fg, bg) {
            let original = match suggestion.target {
                SuggestionTarget::Foreground => fg,
                SuggestionTarget::Background => bg,
            };
            let candidate = Rgb::from_hex(&suggestion.hex).unwrap();
            let shift = relative_luminance(candidate) - relative_luminance(original);
            match suggestion.direction {
                Direction::Darker => assert!(shift < 0.0),
                Direction::Lighter => assert!(shift >= 0.0),
            }
        }
    }

    #[test]
    fn test_hue_preserved_for_chromatic_source() {
        // Saturated blue on a mid blue; fails AA
        let fg = Rgb::new(0x33, 0x66, 0xcc);
        let bg = Rgb::new(0x44, 0x55, 0x99);
        let fg_hue = rgb_to_hsl(fg).h;

        let suggestions = suggest_accessible_colors(fg, bg);
        assert!(!suggestions.is_empty());
        for suggestion in suggestions
            .iter()
            .filter(|s| s.target == SuggestionTarget::Foreground)
        {
            let candidate = Rgb::from_hex(&suggestion.hex).unwrap();
            let candidate_hsl = rgb_to_hsl(candidate);
            // Quantization moves hue slightly; gamut corners collapse it
            if candidate_hsl.s > 1.0 {
                let drift = (candidate_hsl.h - fg_hue).abs().min(360.0 - (candidate_hsl.h - fg_hue).abs());
                assert!(drift < 4.0, "hue drifted from {fg_hue} to {}", candidate_hsl.h);
            }
        }
    }

    #[test]
    fn test_aa_only_failure_suggests_only_aaa_levels_absent() {
        // ~5.0 ratio: AA passes, AAA fails, so only AAA suggestions
        let fg = gray(0x6a);
        let bg = Rgb::WHITE;
        let ratio = contrast_ratio(fg, bg);
        assert!(ratio >= AA_NORMAL && ratio < AAA_NORMAL);

        let suggestions = suggest_accessible_colors(fg, bg);
        assert!(!suggestions.is_empty());
        assert!(suggestions.iter().all(|s| s.level == Level::Aaa));
    }

    #[test]
    fn test_no_duplicate_hex_level_pairs_per_target() {
        let mut seen = HashSet::new();
        for suggestion in suggest_accessible_colors(gray(0x77), gray(0x88)) {
            assert!(seen.insert((
                suggestion.hex.clone(),
                suggestion.level,
                suggestion.target
            )));
        }
    }

    #[test]
    fn test_color_at_luminance_hits_target_within_quantization() {
        let hsl = Hsl::new(210.0, 60.0, 50.0);
        for target in [0.05, 0.18, 0.5, 0.9] {
            let rgb = color_at_luminance(hsl, target).unwrap();
            // One 8-bit step moves luminance by < 0.01 anywhere in gamut
            assert!((relative_luminance(rgb) - target).abs() < 0.01);
        }
    }

    #[test]
    fn test_color_at_luminance_rejects_out_of_gamut() {
        let hsl = Hsl::new(0.0, 0.0, 50.0);
        assert!(matches!(
            color_at_luminance(hsl, 1.5),
            Err(Error::OutOfGamut { .. })
        ));
        assert!(matches!(
            color_at_luminance(hsl, -0.1),
            Err(Error::OutOfGamut { .. })
        ));
    }

    #[test]
    fn test_contrast_report_with_fallbacks() {
        let report = contrast_report("definitely-not-a-color", "");
        assert_eq!(report.foreground, DEFAULT_FOREGROUND);
        assert_eq!(report.background, DEFAULT_BACKGROUND);
        assert!((report.fg_alpha - 1.0).abs() < 1e-12);
        assert!(report.compliance.normal_aa);
    }

    #[test]
    fn test_contrast_report_composites_alpha() {
        // 50% black over white is mid-gray on both sides
        let report = contrast_report("rgba(0, 0, 0, 0.5)", "#ffffff");
        assert_eq!(report.effective_foreground, Rgb::new(128, 128, 128));
        assert_eq!(report.effective_background, Rgb::WHITE);
        assert!(!report.compliance.normal_aa);
        assert!(!report.suggestions.is_empty());
    }

    #[test]
    fn test_bounded_work_on_extremes() {
        // Near-identical extremes leave every target luminance out of
        // range on one side; the search must terminate and may return
        // nothing.
        let outcome = analyze_pair(Rgb::WHITE, gray(0xfe));
        match outcome {
            SuggestionOutcome::Suggestions(list) => assert!(!list.is_empty()),
            SuggestionOutcome::NoneReachable { ratio } => assert!(ratio < AA_NORMAL),
            SuggestionOutcome::AlreadyCompliant { .. } => {
                panic!("white on near-white cannot be compliant")
            }
        }
    }
}
