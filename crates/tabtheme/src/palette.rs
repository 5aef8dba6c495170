//! Four-color palettes applied in bulk.
//!
//! A [`ColorPalette`] maps onto a fixed set of element attributes:
//!
//! | palette color | element(s) | attribute |
//! |---------------|------------|-----------|
//! | `primary` | `worksheet-title`, `dashboard-title`, `story-title` | `font-color` |
//! | `secondary` | `legend-title`, `filter-title`, `parameter-ctrl-title` | `font-color` |
//! | `accent` | `mark` | `mark-color` |
//! | `background` | `view` | `background-color` |
//!
//! Each target is assigned unconditionally, so applying a palette is
//! idempotent and a second palette fully replaces the first. Other attributes
//! on the touched elements are left alone.

use serde::{Deserialize, Serialize};

use crate::document::ThemeDocument;
use crate::schema::Attribute;

/// Four hex colors. Transient input, never stored in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
}

impl ColorPalette {
    pub fn new(
        primary: impl Into<String>,
        secondary: impl Into<String>,
        accent: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            accent: accent.into(),
            background: background.into(),
        }
    }

    /// Returns a copy with every color passed through
    /// [`validate_hex`](crate::color::validate_hex).
    pub fn sanitized(&self) -> Self {
        use crate::color::validate_hex;
        Self::new(
            validate_hex(&self.primary),
            validate_hex(&self.secondary),
            validate_hex(&self.accent),
            validate_hex(&self.background),
        )
    }
}

/// A palette with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPalette {
    pub name: String,
    #[serde(flatten)]
    pub colors: ColorPalette,
}

const TITLE_ELEMENTS: [&str; 3] = ["worksheet-title", "dashboard-title", "story-title"];
const CONTROL_TITLE_ELEMENTS: [&str; 3] = ["legend-title", "filter-title", "parameter-ctrl-title"];

/// Writes the palette into the document and returns it for chaining.
pub fn apply_palette<'a>(
    doc: &'a mut ThemeDocument,
    palette: &ColorPalette,
) -> &'a mut ThemeDocument {
    for element in TITLE_ELEMENTS {
        doc.set_attribute(element, Attribute::FontColor.as_str(), palette.primary.as_str());
    }
    for element in CONTROL_TITLE_ELEMENTS {
        doc.set_attribute(element, Attribute::FontColor.as_str(), palette.secondary.as_str());
    }
    doc.set_attribute("mark", Attribute::MarkColor.as_str(), palette.accent.as_str());
    doc.set_attribute(
        "view",
        Attribute::BackgroundColor.as_str(),
        palette.background.as_str(),
    );
    log::debug!(
        "applied palette primary={} secondary={} accent={} background={}",
        palette.primary,
        palette.secondary,
        palette.accent,
        palette.background
    );
    doc
}

/// A fresh default document with `palette` applied.
pub fn from_template(palette: &ColorPalette) -> ThemeDocument {
    let mut doc = ThemeDocument::new();
    apply_palette(&mut doc, palette);
    doc
}

// ─── Presets ────────────────────────────────────────────────────────────────

const PRESETS: &[(&str, [&str; 4])] = &[
    ("Corporate Blue", ["#003B5C", "#0072CE", "#00A3E0", "#F5F7FA"]),
    ("Modern Purple", ["#6B46C1", "#9F7AEA", "#D6BCFA", "#F7FAFC"]),
    ("Financial Green", ["#0F4C3A", "#16A085", "#1ABC9C", "#E8F5F1"]),
    ("Elegant Dark", ["#1A202C", "#2D3748", "#4A5568", "#EDF2F7"]),
    ("Warm Autumn", ["#C05621", "#DD6B20", "#ED8936", "#FFFAF0"]),
];

/// The built-in palettes, in display order.
pub fn presets() -> Vec<NamedPalette> {
    PRESETS
        .iter()
        .map(|(name, [p, s, a, b])| NamedPalette {
            name: name.to_string(),
            colors: ColorPalette::new(*p, *s, *a, *b),
        })
        .collect()
}

/// Looks up a built-in palette by name, ignoring ASCII case.
pub fn preset(name: &str) -> Option<ColorPalette> {
    presets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .map(|p| p.colors)
}
