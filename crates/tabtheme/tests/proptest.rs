//! Property-based tests for color conversion using proptest.

use proptest::prelude::*;
use tabtheme::color::{cmyk_to_hex, hex_to_rgb, rgb_to_hex, validate_hex, Rgb};

proptest! {
    /// Formatting then parsing a color gives back the same components.
    #[test]
    fn hex_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        prop_assert_eq!(hex_to_rgb(&rgb_to_hex(r, g, b)).unwrap(), Rgb(r, g, b));
    }

    /// Hex output is always `#` followed by six lowercase hex digits.
    #[test]
    fn rgb_to_hex_shape(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let hex = rgb_to_hex(r, g, b);
        prop_assert_eq!(hex.len(), 7);
        prop_assert!(hex.starts_with('#'));
        prop_assert!(hex[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// Sanitized text always has a leading `#` and length 7 or 9.
    #[test]
    fn validate_hex_always_storable(input in any::<String>()) {
        let out = validate_hex(&input);
        prop_assert!(out.starts_with('#'));
        let len = out.chars().count();
        prop_assert!(len == 7 || len == 9, "bad length {} for {:?}", len, out);
    }

    /// Already valid hex colors pass through unchanged.
    #[test]
    fn validate_hex_keeps_valid(digits in "[0-9a-fA-F]{6}([0-9a-fA-F]{2})?") {
        let color = format!("#{}", digits);
        prop_assert_eq!(validate_hex(&color), color);
    }

    /// Any CMYK input yields a parseable color, and full black ink wins.
    #[test]
    fn cmyk_output_parses(
        c in -50.0f64..150.0,
        m in -50.0f64..150.0,
        y in -50.0f64..150.0,
        k in -50.0f64..150.0,
    ) {
        let hex = cmyk_to_hex(c, m, y, k);
        prop_assert!(hex_to_rgb(&hex).is_ok());
        prop_assert_eq!(cmyk_to_hex(c, m, y, 100.0), "#000000");
    }

    /// Converting to CMYK and back stays within rounding distance.
    #[test]
    fn cmyk_round_trip_is_close(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let back = Rgb(r, g, b).to_cmyk().to_rgb();
        prop_assert!((back.0 as i16 - r as i16).abs() <= 4);
        prop_assert!((back.1 as i16 - g as i16).abs() <= 4);
        prop_assert!((back.2 as i16 - b as i16).abs() <= 4);
    }
}
