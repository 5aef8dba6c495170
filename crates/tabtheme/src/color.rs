//! Color notation conversions.
//!
//! Theme files store colors as hex strings. The editor additionally lets users
//! enter colors as RGB triplets or CMYK percentages, so this module converts
//! between the three notations:
//!
//! - Hex: `#RRGGBB`, or `#RRGGBBAA` with an alpha channel
//! - RGB: three integers `0`–`255`
//! - CMYK: four percentages `0`–`100`
//!
//! # CMYK caveat
//!
//! The CMYK conversion is the naive device-independent formula
//! `r = 255 × (1 − c) × (1 − k)`. It is not color-managed: no ICC profile,
//! no ink limits, no rendering intent. Values will not match what a print
//! workflow produces for the same CMYK numbers.
//!
//! # Example
//!
//! ```rust
//! use tabtheme::color::{cmyk_to_hex, hex_to_rgb, rgb_to_hex, validate_hex, Rgb};
//!
//! assert_eq!(hex_to_rgb("#ff6b35").unwrap(), Rgb(255, 107, 53));
//! assert_eq!(rgb_to_hex(255, 107, 53), "#ff6b35");
//! assert_eq!(cmyk_to_hex(100.0, 0.0, 0.0, 0.0), "#00ffff");
//!
//! // Free text is sanitized, never rejected
//! assert_eq!(validate_hex("ff6b35"), "#ff6b35");
//! assert_eq!(validate_hex("oops"), "#000000");
//! ```

use crate::error::ColorError;

/// Fallback used whenever free text cannot be interpreted as a hex color.
pub const FALLBACK_HEX: &str = "#000000";

// ─── RGB type ───────────────────────────────────────────────────────────────

/// An RGB color triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#RRGGBB` or `#RRGGBBAA` (the `#` is optional, alpha is ignored).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        hex_to_rgb(hex)
    }

    /// Formats as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.0, self.1, self.2)
    }

    /// Converts to CMYK percentages.
    pub fn to_cmyk(self) -> Cmyk {
        rgb_to_cmyk(self.0, self.1, self.2)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

// ─── CMYK type ──────────────────────────────────────────────────────────────

/// CMYK components as percentages (`0.0`–`100.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Cmyk {
    pub fn new(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self { c, m, y, k }
    }

    /// Converts to RGB with the naive formula (see module docs).
    pub fn to_rgb(self) -> Rgb {
        let channel = |ink: f64| {
            let ink = percent_to_unit(ink);
            let k = percent_to_unit(self.k);
            (255.0 * (1.0 - ink) * (1.0 - k)).round() as u8
        };
        Rgb(channel(self.c), channel(self.m), channel(self.y))
    }

    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

impl std::fmt::Display for Cmyk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cmyk({}%, {}%, {}%, {}%)",
            self.c, self.m, self.y, self.k
        )
    }
}

/// Clamps a percentage into `[0, 100]` and scales it to `[0, 1]`.
fn percent_to_unit(p: f64) -> f64 {
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 100.0) / 100.0
}

// ─── Conversions ────────────────────────────────────────────────────────────

/// Parses a hex color into its RGB components.
///
/// A leading `#` is stripped if present. Six hex digits are required; an
/// eighth-digit alpha suffix (`RRGGBBAA`) is accepted and ignored.
///
/// Free-form input should go through [`validate_hex`] first, which never fails.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }

    let component = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| ColorError::InvalidHex(hex.to_string()))
    };

    Ok(Rgb(component(0)?, component(2)?, component(4)?))
}

/// Formats RGB components as a lowercase `#rrggbb` string.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Converts CMYK percentages (`0`–`100`) to a `#rrggbb` string.
///
/// Inputs outside `[0, 100]` are clamped.
pub fn cmyk_to_hex(c: f64, m: f64, y: f64, k: f64) -> String {
    Cmyk::new(c, m, y, k).to_hex()
}

/// Converts RGB to CMYK percentages, rounded to whole numbers.
///
/// Pure black maps to `(0, 0, 0, 100)`.
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> Cmyk {
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return Cmyk::new(0.0, 0.0, 0.0, 100.0);
    }

    let ink = |channel: f64| ((1.0 - channel - k) / (1.0 - k) * 100.0).round();
    Cmyk::new(ink(r), ink(g), ink(b), (k * 100.0).round())
}

/// Normalizes user-supplied color text into a storable hex string.
///
/// - Surrounding whitespace is trimmed
/// - Empty input yields `#000000`
/// - A missing leading `#` is prepended
/// - Exactly 7 (`#RRGGBB`) or 9 (`#RRGGBBAA`) characters are kept as-is
/// - Anything else falls back to `#000000`
///
/// This never fails. Digits are not checked, only the length.
pub fn validate_hex(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return FALLBACK_HEX.to_string();
    }

    let color = if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{}", trimmed)
    };

    match color.chars().count() {
        7 | 9 => color,
        _ => FALLBACK_HEX.to_string(),
    }
}
