//! Color representation helpers
//!
//! The data model keeps colors as plain `[u8; 3]` triples so the reference
//! palettes can live in consts; these helpers pivot through the palette
//! crate's sRGB type when a display or export representation is needed.
//! Note: palette crate doesn't support const Srgb, so we use array

use palette::Srgb;

use crate::error::{AnalysisError, Result};

/// Convert an RGB triple to a hexadecimal color string
///
/// # Returns
///
/// Uppercase hex string (e.g., "#2E7D32")
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    let srgb = to_srgb(rgb);
    format!("#{:02X}{:02X}{:02X}", srgb.red, srgb.green, srgb.blue)
}

/// Parse a hexadecimal color string into an RGB triple
///
/// Accepts "#2E7D32" or "2E7D32", case-insensitive.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidHexColor` if the string is not six hex
/// digits after the optional leading `#`.
pub fn parse_hex(hex: &str) -> Result<[u8; 3]> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(AnalysisError::InvalidHexColor {
            value: hex.to_string(),
        });
    }

    let channel = |lo: usize| {
        u8::from_str_radix(&digits[lo..lo + 2], 16).map_err(|_| AnalysisError::InvalidHexColor {
            value: hex.to_string(),
        })
    };

    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Convert an RGB triple into the palette crate's sRGB type
pub fn to_srgb(rgb: [u8; 3]) -> Srgb<u8> {
    Srgb::new(rgb[0], rgb[1], rgb[2])
}
