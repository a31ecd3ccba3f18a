//! Error types for contraste operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in contraste operations.
///
/// The lenient entry points ([`crate::parse::parse_color`],
/// [`crate::suggest::suggest_accessible_colors`]) never return these;
/// they signal failure with `None` or an empty list. Strict entry
/// points such as [`crate::color::Rgb::from_hex`] use this type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A requested relative luminance is not representable in sRGB.
    #[error("Luminance {luminance} is outside the sRGB gamut [0, 1]")]
    OutOfGamut {
        /// The unreachable luminance value.
        luminance: f64,
    },
}
