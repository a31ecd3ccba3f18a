//! Lenient color-string parsing.
//!
//! Accepts the color notations a user can paste or type into a color
//! field: 3/4/6/8-digit hex with or without `#`, and `rgb()`/`rgba()`/
//! `hsl()`/`hsla()` functional syntax with flexible separators. Parsing
//! is total: every failure mode is `None`, never a panic, so callers
//! apply their own fallback (typically [`crate::color::DEFAULT_FOREGROUND`]
//! or [`crate::color::DEFAULT_BACKGROUND`]).

use crate::color::{hsl_to_rgb, Hsl, Rgb};
use std::collections::HashSet;

/// A parsed color with its alpha channel surfaced.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedColor {
    /// The opaque color component.
    pub rgb: Rgb,
    /// Alpha in `[0, 1]`; 1.0 means fully opaque.
    pub alpha: f64,
}

/// Parse a color string, discarding any alpha channel.
///
/// Returns `None` for anything unparseable.
#[must_use]
pub fn parse_color(input: &str) -> Option<Rgb> {
    parse_color_with_alpha(input).map(|parsed| parsed.rgb)
}

/// Parse a color string, surfacing its alpha channel.
///
/// An 8-digit hex's last byte and a 4-digit hex's last nibble (doubled)
/// are the alpha channel; functional syntax takes a bare float in
/// `[0, 1]` or a percentage, optionally preceded by `/`. Colors without
/// an alpha token are fully opaque.
#[must_use]
pub fn parse_color_with_alpha(input: &str) -> Option<ParsedColor> {
    let raw = input.trim().to_ascii_lowercase();
    if raw.is_empty() {
        return None;
    }

    if let Some(args) = functional_args(&raw, &["rgba", "rgb"]) {
        return parse_rgb_functional(&args);
    }
    if let Some(args) = functional_args(&raw, &["hsla", "hsl"]) {
        return parse_hsl_functional(&args);
    }

    parse_hex_lenient(&raw)
}

/// Normalize a hex-ish string to a color, falling back on failure.
///
/// Trims, synthesizes a missing `#`, strips stray non-hex characters,
/// and expands the 3-digit shorthand. Anything that does not reduce to
/// 3 or 6 hex digits yields `fallback`.
#[must_use]
pub fn normalize_hex(value: &str, fallback: Rgb) -> Rgb {
    let raw = value.trim();
    if raw.is_empty() {
        return fallback;
    }
    let digits: String = raw
        .strip_prefix('#')
        .unwrap_or(raw)
        .chars()
        .filter(char::is_ascii_hexdigit)
        .collect();
    match digits.len() {
        3 => hex_digits_to_rgb(&expand_shorthand(&digits)),
        6 => hex_digits_to_rgb(&digits),
        _ => None,
    }
    .unwrap_or(fallback)
}

/// Canonicalize and deduplicate a list of color strings, preserving
/// first-seen order. Unparseable entries are skipped.
#[must_use]
pub fn unique_hexes(values: &[&str]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for value in values {
        let Some(rgb) = parse_color(value) else {
            continue;
        };
        let hex = rgb.to_hex();
        if seen.insert(hex.clone()) {
            result.push(hex);
        }
    }
    result
}

/// Extract the argument body of a functional notation like `rgb(...)`.
///
/// Names are tried longest-first so that `rgba` is not mistaken for
/// `rgb` with a stray `a(` argument.
fn functional_args(input: &str, names: &[&str]) -> Option<String> {
    for name in names {
        if let Some(rest) = input.strip_prefix(name) {
            let body = rest.trim_start().strip_prefix('(')?.strip_suffix(')')?;
            return Some(body.to_string());
        }
    }
    None
}

/// Split a functional argument body on commas, slashes, and whitespace.
fn split_args(body: &str) -> Vec<&str> {
    body.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}

fn parse_rgb_functional(body: &str) -> Option<ParsedColor> {
    let tokens = split_args(body);
    if tokens.len() != 3 && tokens.len() != 4 {
        return None;
    }
    let r = tokens[0].parse::<f64>().ok()?;
    let g = tokens[1].parse::<f64>().ok()?;
    let b = tokens[2].parse::<f64>().ok()?;
    let alpha = match tokens.get(3) {
        Some(token) => parse_alpha_token(token)?,
        None => 1.0,
    };
    Some(ParsedColor {
        rgb: Rgb::from_f64(r, g, b),
        alpha,
    })
}

fn parse_hsl_functional(body: &str) -> Option<ParsedColor> {
    let tokens = split_args(body);
    if tokens.len() != 3 && tokens.len() != 4 {
        return None;
    }
    let h = tokens[0]
        .strip_suffix("deg")
        .unwrap_or(tokens[0])
        .parse::<f64>()
        .ok()?;
    let s = parse_percent_token(tokens[1])?;
    let l = parse_percent_token(tokens[2])?;
    let alpha = match tokens.get(3) {
        Some(token) => parse_alpha_token(token)?,
        None => 1.0,
    };
    Some(ParsedColor {
        rgb: hsl_to_rgb(Hsl::new(h, s, l)),
        alpha,
    })
}

/// Parse a saturation/lightness token; `%` suffix optional.
fn parse_percent_token(token: &str) -> Option<f64> {
    token
        .strip_suffix('%')
        .unwrap_or(token)
        .parse::<f64>()
        .ok()
        .map(|value| value.clamp(0.0, 100.0))
}

/// Parse an alpha token: a bare float in `[0, 1]` or a percentage.
fn parse_alpha_token(token: &str) -> Option<f64> {
    if let Some(percent) = token.strip_suffix('%') {
        return percent
            .parse::<f64>()
            .ok()
            .map(|value| (value / 100.0).clamp(0.0, 1.0));
    }
    token
        .parse::<f64>()
        .ok()
        .map(|value| value.clamp(0.0, 1.0))
}

fn parse_hex_lenient(input: &str) -> Option<ParsedColor> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        3 => hex_digits_to_rgb(&expand_shorthand(digits)).map(|rgb| ParsedColor {
            rgb,
            alpha: 1.0,
        }),
        4 => {
            let rgb = hex_digits_to_rgb(&expand_shorthand(&digits[..3]))?;
            // doubling a nibble is multiplication by 0x11
            let nibble = u8::from_str_radix(&digits[3..4], 16).ok()?;
            Some(ParsedColor {
                rgb,
                alpha: f64::from(nibble * 0x11) / 255.0,
            })
        }
        6 => hex_digits_to_rgb(digits).map(|rgb| ParsedColor { rgb, alpha: 1.0 }),
        8 => {
            let rgb = hex_digits_to_rgb(&digits[..6])?;
            let alpha_byte = u8::from_str_radix(&digits[6..8], 16).ok()?;
            Some(ParsedColor {
                rgb,
                alpha: f64::from(alpha_byte) / 255.0,
            })
        }
        _ => None,
    }
}

/// Double each digit of a 3-digit shorthand: `abc` -> `aabbcc`.
fn expand_shorthand(digits: &str) -> String {
    digits.chars().flat_map(|c| [c, c]).collect()
}

fn hex_digits_to_rgb(digits: &str) -> Option<Rgb> {
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_FOREGROUND;

    fn hex_of(input: &str) -> Option<String> {
        parse_color(input).map(Rgb::to_hex)
    }

    #[test]
    fn test_parse_shorthand_hex() {
        assert_eq!(hex_of("#abc").as_deref(), Some("#aabbcc"));
        assert_eq!(hex_of("abc").as_deref(), Some("#aabbcc"));
    }

    #[test]
    fn test_parse_full_hex() {
        assert_eq!(hex_of("#112233").as_deref(), Some("#112233"));
        assert_eq!(hex_of("112233").as_deref(), Some("#112233"));
        assert_eq!(hex_of("  #AABBCC  ").as_deref(), Some("#aabbcc"));
    }

    #[test]
    fn test_parse_hex_with_alpha_digits() {
        let four = parse_color_with_alpha("#f008").unwrap();
        assert_eq!(four.rgb.to_hex(), "#ff0000");
        assert!((four.alpha - f64::from(0x88u8) / 255.0).abs() < 1e-12);

        let eight = parse_color_with_alpha("#ff000080").unwrap();
        assert_eq!(eight.rgb.to_hex(), "#ff0000");
        assert!((eight.alpha - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_color("not-a-color"), None);
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("   "), None);
        assert_eq!(parse_color("#ab"), None);
        assert_eq!(parse_color("#abcde"), None);
        assert_eq!(parse_color("#abcdefg"), None);
        assert_eq!(parse_color("rgb(1,2)"), None);
        assert_eq!(parse_color("rgb(1,2,3,4,5)"), None);
        assert_eq!(parse_color("rgb(a,b,c)"), None);
    }

    #[test]
    fn test_parse_rgb_functional() {
        assert_eq!(hex_of("rgb(255, 0, 0)").as_deref(), Some("#ff0000"));
        assert_eq!(hex_of("RGB(255 0 0)").as_deref(), Some("#ff0000"));
        assert_eq!(hex_of("rgb(17,24,39)").as_deref(), Some("#111827"));
    }

    #[test]
    fn test_parse_rgb_clamps_channels() {
        assert_eq!(hex_of("rgb(300, -20, 128)").as_deref(), Some("#ff0080"));
    }

    #[test]
    fn test_parse_rgba_with_alpha() {
        let parsed = parse_color_with_alpha("rgba(255,0,0,0.5)").unwrap();
        assert_eq!(parsed.rgb.to_hex(), "#ff0000");
        assert!((parsed.alpha - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_parse_alpha_percentage_and_slash() {
        let parsed = parse_color_with_alpha("rgb(255 0 0 / 50%)").unwrap();
        assert_eq!(parsed.rgb.to_hex(), "#ff0000");
        assert!((parsed.alpha - 0.5).abs() < 1e-12);

        let clamped = parse_color_with_alpha("rgba(0,0,0,1.7)").unwrap();
        assert!((clamped.alpha - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_hsl_functional() {
        assert_eq!(hex_of("hsl(0, 100%, 50%)").as_deref(), Some("#ff0000"));
        assert_eq!(hex_of("hsl(120 100 50)").as_deref(), Some("#00ff00"));
        assert_eq!(hex_of("hsl(240deg 100% 50%)").as_deref(), Some("#0000ff"));
    }

    #[test]
    fn test_parse_hsla_with_alpha() {
        let parsed = parse_color_with_alpha("hsla(0, 100%, 50%, 0.25)").unwrap();
        assert_eq!(parsed.rgb.to_hex(), "#ff0000");
        assert!((parsed.alpha - 0.25).abs() < 1e-12);

        let slash = parse_color_with_alpha("hsl(0 100% 50% / 25%)").unwrap();
        assert!((slash.alpha - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_parse_hsl_wraps_hue() {
        assert_eq!(hex_of("hsl(480, 100%, 50%)"), hex_of("hsl(120, 100%, 50%)"));
        assert_eq!(hex_of("hsl(-120, 100%, 50%)"), hex_of("hsl(240, 100%, 50%)"));
    }

    #[test]
    fn test_opaque_when_no_alpha_token() {
        assert!((parse_color_with_alpha("#ff0000").unwrap().alpha - 1.0).abs() < 1e-12);
        assert!((parse_color_with_alpha("rgb(1,2,3)").unwrap().alpha - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_hex_fallback_paths() {
        let fallback = DEFAULT_FOREGROUND;
        assert_eq!(normalize_hex("", fallback), fallback);
        assert_eq!(normalize_hex("zzz", fallback), fallback);
        assert_eq!(normalize_hex("#ab", fallback), fallback);
        assert_eq!(normalize_hex("abc", fallback).to_hex(), "#aabbcc");
        assert_eq!(normalize_hex("#AABBCC", fallback).to_hex(), "#aabbcc");
        // stray characters are stripped before the length check
        assert_eq!(normalize_hex("#aa-bb-cc", fallback).to_hex(), "#aabbcc");
    }

    #[test]
    fn test_unique_hexes_dedupes_in_order() {
        let hexes = unique_hexes(&["#abc", "junk", "#AABBCC", "rgb(255,0,0)", "#ff0000"]);
        assert_eq!(hexes, vec!["#aabbcc".to_string(), "#ff0000".to_string()]);
    }
}
