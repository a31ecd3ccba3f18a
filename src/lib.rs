//! # Contraste
//!
//! Deterministic WCAG contrast analysis and accessible color
//! suggestions.
//!
//! Given two colors (foreground/background, possibly with alpha),
//! contraste computes their WCAG contrast ratio under correct alpha
//! compositing, classifies compliance against the AA/AAA thresholds,
//! and — when a threshold fails — searches the sRGB gamut for the
//! perceptually-closest hue/saturation-preserving replacements that
//! would pass.
//!
//! ## Quick Start
//!
//! ```rust
//! use contraste::prelude::*;
//!
//! let fg = parse_color("#777777").unwrap();
//! let bg = parse_color("rgb(136, 136, 136)").unwrap();
//!
//! let ratio = contrast_ratio(fg, bg);
//! assert!(!wcag_compliance(ratio).normal_aa);
//!
//! // Sorted ascending by perceptual distance from the original
//! let fixes = suggest_accessible_colors(fg, bg);
//! assert!(!fixes.is_empty());
//! ```
//!
//! ## Design
//!
//! Every function in this crate is pure, synchronous, and free of
//! shared state; results are safe to memoize and to call from any
//! number of threads. All search loops have fixed iteration bounds, so
//! execution time is statically bounded. The lenient entry points
//! (`parse_color`, `suggest_accessible_colors`) never panic or error:
//! unparseable input is `None`, an unreachable fix is an empty list.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` derives on the public value
//!   types
//!
//! ## References
//!
//! - W3C, *Web Content Accessibility Guidelines (WCAG) 2.2*, success
//!   criteria 1.4.3, 1.4.6, and 1.4.11.
//! - CIE 15:2004, *Colorimetry*, 3rd ed. (Lab transform, D65 white
//!   point).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and color space conversions.
pub mod color;

/// Lenient color-string parsing.
pub mod parse;

/// Relative luminance, contrast ratio, and WCAG thresholds.
pub mod contrast;

/// CIE Lab conversion and the CIE76 distance metric.
pub mod lab;

/// Accessible color suggestion search.
pub mod suggest;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for contraste operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use contraste::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{
        alpha_blend, hsl_to_rgb, hsv_to_rgb, is_valid_partial_hex, rgb_to_hsl, rgb_to_hsv, Hsl,
        Hsv, Rgb, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND,
    };
    pub use crate::contrast::{
        contrast_ratio, is_large_text, readable_text_color, relative_luminance, wcag_compliance,
        WcagCompliance,
    };
    pub use crate::error::{Error, Result};
    pub use crate::lab::{delta_e, lab_from_rgb, Lab};
    pub use crate::parse::{normalize_hex, parse_color, parse_color_with_alpha, ParsedColor};
    pub use crate::suggest::{
        analyze_pair, color_at_luminance, contrast_report, suggest_accessible_colors,
        ColorSuggestion, ContrastReport, Direction, Level, SuggestionOutcome, SuggestionTarget,
    };
}
