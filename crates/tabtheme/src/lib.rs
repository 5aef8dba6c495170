//! # tabtheme - Tableau Custom Theme Documents
//!
//! `tabtheme` is the model behind the `tabtheme` editor: it loads, edits,
//! validates and saves the JSON theme files that Tableau Desktop 2025.1+
//! imports through *Format → Import Custom Theme*.
//!
//! ## Core Concepts
//!
//! - [`ThemeDocument`]: The document itself, with element accessors
//! - [`schema`]: The static registry of base themes, style elements and attributes
//! - [`validate`]: Produces a [`ValidationReport`] of errors and warnings
//! - [`ColorPalette`]: Four colors applied in bulk by [`apply_palette`]
//! - [`color`]: Hex, RGB and CMYK conversions
//!
//! ## Quick Start
//!
//! ```rust
//! use tabtheme::{apply_palette, preset, ThemeDocument};
//!
//! let mut doc = ThemeDocument::new();
//! doc.set_attribute("dashboard-title", "font-size", 18);
//! apply_palette(&mut doc, &preset("Corporate Blue").unwrap());
//!
//! let report = doc.validate();
//! assert!(report.is_valid());
//!
//! let json = doc.to_json_pretty().unwrap();
//! assert!(json.contains("\"dashboard-title\""));
//! ```
//!
//! ## Loading Untrusted Input
//!
//! Syntax errors and schema problems are kept apart. Parsing fails with a
//! [`ThemeError`]; a document that parses is always accepted and schema
//! problems are reported as data:
//!
//! ```rust
//! use tabtheme::ThemeDocument;
//!
//! assert!(ThemeDocument::from_json_str("{ broken").is_err());
//!
//! let doc = ThemeDocument::from_json_str(r#"{"styles": {"mark": {"mark-color": "red"}}}"#).unwrap();
//! let report = doc.validate();
//! assert_eq!(report.errors.len(), 2); // missing version, bad color
//! ```

pub mod color;
pub mod document;
mod error;
pub mod palette;
pub mod schema;
pub mod validate;

pub use error::{ColorError, Result, ThemeError};

pub use color::{cmyk_to_hex, hex_to_rgb, rgb_to_cmyk, rgb_to_hex, validate_hex, Cmyk, Rgb};

pub use document::{ElementProperties, ThemeDocument};

pub use palette::{apply_palette, from_template, preset, presets, ColorPalette, NamedPalette};

pub use schema::{
    AttrKind, Attribute, BaseTheme, Category, EditorKind, StyleElementSpec, SIZE_LIMIT_BYTES,
    THEME_VERSION,
};

pub use validate::{validate_value, Diagnostic, Severity, ValidationReport};
