//! Static catalogue of what a theme file may contain.
//!
//! The registry lists the recognized base themes, style elements, attribute
//! vocabulary and suggested font names. It is built once and never changes.
//!
//! The registry drives two things:
//!
//! - The validator uses it to flag unknown element keys and base themes.
//! - The shell uses it to decide which attributes an element offers and
//!   which kind of editor each attribute needs.
//!
//! Font names are a convenience list only. Any string of up to 50 characters
//! is a legal `font-family`.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::color::{validate_hex, FALLBACK_HEX};

/// Compatibility version written into every document.
pub const THEME_VERSION: &str = "1.0.0";

/// Base theme used when a document does not name one.
pub const DEFAULT_BASE_THEME: &str = "smooth";

/// Default font family for new documents.
pub const DEFAULT_FONT: &str = "Tableau Regular";

/// Advisory size limit for a serialized theme, in bytes.
pub const SIZE_LIMIT_BYTES: usize = 15_000;

/// Maximum length of a `font-family` value, in characters.
pub const MAX_FONT_FAMILY_LEN: usize = 50;

/// Longest theme file path Tableau will import, in characters.
pub const MAX_PATH_CHARS: usize = 256;

/// Legal range for `font-size` and `line-width`.
pub const SIZE_RANGE: std::ops::RangeInclusive<i64> = 1..=99;

// ─── Base themes ────────────────────────────────────────────────────────────

/// A built-in theme tier that custom themes are layered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseTheme {
    pub id: &'static str,
    pub description: &'static str,
}

pub const BASE_THEMES: &[BaseTheme] = &[
    BaseTheme {
        id: "smooth",
        description: "Tableau Desktop 10.x and newer",
    },
    BaseTheme {
        id: "clean",
        description: "Tableau Desktop 8.0.x – 9.3.x",
    },
    BaseTheme {
        id: "modern",
        description: "Tableau Desktop 3.5 – 7.0",
    },
    BaseTheme {
        id: "classic",
        description: "Tableau Desktop 1.0 – 3.2",
    },
];

/// Returns true if `id` names one of the [`BASE_THEMES`].
pub fn is_base_theme(id: &str) -> bool {
    BASE_THEMES.iter().any(|t| t.id == id)
}

pub fn base_theme(id: &str) -> Option<&'static BaseTheme> {
    BASE_THEMES.iter().find(|t| t.id == id)
}

// ─── Fonts ──────────────────────────────────────────────────────────────────

/// Tableau's bundled fonts followed by common web fonts.
pub const FONTS: &[&str] = &[
    "Tableau Light",
    "Tableau Book",
    "Tableau Medium",
    "Tableau Regular",
    "Tableau Semibold",
    "Tableau Bold",
    "Arial",
    "Courier New",
    "Georgia",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
    "Lato",
    "Montserrat",
    "Noto Sans",
    "Open Sans",
    "Oswald",
    "Poppins",
    "Raleway",
    "Roboto",
    "Source Sans Pro",
    "Work Sans",
    "Inter",
    "Nunito",
    "PT Sans",
];

// ─── Attribute vocabulary ───────────────────────────────────────────────────

/// An attribute name from the fixed vocabulary used by style elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    FontColor,
    FontFamily,
    FontSize,
    FontWeight,
    BackgroundColor,
    MarkColor,
    LineVisibility,
    LinePattern,
    LineWidth,
    LineColor,
}

impl Attribute {
    pub const ALL: [Attribute; 10] = [
        Attribute::FontColor,
        Attribute::FontFamily,
        Attribute::FontSize,
        Attribute::FontWeight,
        Attribute::BackgroundColor,
        Attribute::MarkColor,
        Attribute::LineVisibility,
        Attribute::LinePattern,
        Attribute::LineWidth,
        Attribute::LineColor,
    ];

    /// The hyphenated key used in theme files.
    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::FontColor => "font-color",
            Attribute::FontFamily => "font-family",
            Attribute::FontSize => "font-size",
            Attribute::FontWeight => "font-weight",
            Attribute::BackgroundColor => "background-color",
            Attribute::MarkColor => "mark-color",
            Attribute::LineVisibility => "line-visibility",
            Attribute::LinePattern => "line-pattern",
            Attribute::LineWidth => "line-width",
            Attribute::LineColor => "line-color",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    /// Human label, e.g. `Font Color`.
    pub fn label(self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    pub fn editor_kind(self) -> EditorKind {
        match self {
            Attribute::FontColor
            | Attribute::BackgroundColor
            | Attribute::MarkColor
            | Attribute::LineColor => EditorKind::Color,
            Attribute::FontFamily => EditorKind::FontFamily,
            Attribute::FontSize => EditorKind::SizeInt { default: 10 },
            Attribute::LineWidth => EditorKind::SizeInt { default: 1 },
            Attribute::FontWeight => EditorKind::Weight,
            Attribute::LineVisibility => EditorKind::Visibility,
            Attribute::LinePattern => EditorKind::Pattern,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Attribute classification ───────────────────────────────────────────────

/// How the validator type-checks an attribute, decided from its name alone.
///
/// Theme files are untyped, so the naming convention is the contract:
///
/// | name | kind |
/// |------|------|
/// | contains `color` | [`AttrKind::Color`] |
/// | contains `font-size` or `line-width` | [`AttrKind::Int`] |
/// | contains `font-family` | [`AttrKind::Str`] |
/// | `font-weight`, `line-visibility`, `line-pattern` | [`AttrKind::Enum`] |
/// | anything else | [`AttrKind::Other`] |
///
/// Rules apply top to bottom. `Enum` and `Other` attributes are not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// Must be a string starting with `#`.
    Color,
    /// Must be an integer within [`SIZE_RANGE`].
    Int,
    /// Must be a string of at most [`MAX_FONT_FAMILY_LEN`] characters.
    Str,
    /// Has a set of legal values, which the validator does not enforce.
    Enum,
    /// Unrecognized, accepted as-is.
    Other,
}

impl AttrKind {
    pub fn classify(name: &str) -> Self {
        if name.contains("color") {
            AttrKind::Color
        } else if name.contains("font-size") || name.contains("line-width") {
            AttrKind::Int
        } else if name.contains("font-family") {
            AttrKind::Str
        } else if matches!(name, "font-weight" | "line-visibility" | "line-pattern") {
            AttrKind::Enum
        } else {
            AttrKind::Other
        }
    }
}

// ─── Editor kinds ───────────────────────────────────────────────────────────

/// Which input a shell should present for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    Color,
    FontFamily,
    SizeInt { default: i64 },
    Weight,
    Visibility,
    Pattern,
}

impl EditorKind {
    /// Legal values for choice editors; empty for free-form ones.
    pub fn choices(self) -> &'static [&'static str] {
        match self {
            EditorKind::Weight => &["normal", "bold"],
            EditorKind::Visibility => &["on", "off"],
            EditorKind::Pattern => &["none", "dotted", "dashed"],
            EditorKind::FontFamily => FONTS,
            EditorKind::Color | EditorKind::SizeInt { .. } => &[],
        }
    }

    /// Value an editor starts from when the attribute is not set.
    pub fn default_value(self) -> Value {
        match self {
            EditorKind::Color => Value::from(FALLBACK_HEX),
            EditorKind::FontFamily => Value::from(FONTS[0]),
            EditorKind::SizeInt { default } => Value::from(default),
            EditorKind::Weight | EditorKind::Visibility | EditorKind::Pattern => {
                Value::from(self.choices()[0])
            }
        }
    }

    /// Turns text typed by a user into the JSON value stored in the document.
    ///
    /// Colors are sanitized with [`validate_hex`]. Sizes must parse as an
    /// integer and are clamped into [`SIZE_RANGE`]. Choice editors only accept
    /// one of their [`choices`](Self::choices). Font names are free text of at
    /// most [`MAX_FONT_FAMILY_LEN`] characters.
    pub fn coerce(self, text: &str) -> Result<Value, String> {
        let text = text.trim();
        match self {
            EditorKind::Color => Ok(Value::from(validate_hex(text))),
            EditorKind::FontFamily => {
                let len = text.chars().count();
                if len > MAX_FONT_FAMILY_LEN {
                    return Err(format!(
                        "font name is {} characters, the limit is {}",
                        len, MAX_FONT_FAMILY_LEN
                    ));
                }
                Ok(Value::from(text))
            }
            EditorKind::SizeInt { .. } => {
                let n: i64 = text
                    .parse()
                    .map_err(|_| format!("'{}' is not a whole number", text))?;
                Ok(Value::from(
                    n.clamp(*SIZE_RANGE.start(), *SIZE_RANGE.end()),
                ))
            }
            EditorKind::Weight | EditorKind::Visibility | EditorKind::Pattern => {
                let choices = self.choices();
                if choices.contains(&text) {
                    Ok(Value::from(text))
                } else {
                    Err(format!(
                        "'{}' is not one of: {}",
                        text,
                        choices.join(", ")
                    ))
                }
            }
        }
    }
}

// ─── Style elements ─────────────────────────────────────────────────────────

/// Grouping used when presenting elements. Not used for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Global,
    Worksheet,
    Dashboard,
    Story,
    Controls,
    View,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Global => "Global",
            Category::Worksheet => "Worksheet",
            Category::Dashboard => "Dashboard",
            Category::Story => "Story",
            Category::Controls => "Controls",
            Category::View => "View",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One formatting target a theme can style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleElementSpec {
    /// Stable key used in the `styles` object.
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Attributes the element accepts, in display order.
    pub attributes: &'static [Attribute],
    pub category: Category,
}

impl StyleElementSpec {
    pub fn accepts(&self, attribute: Attribute) -> bool {
        self.attributes.contains(&attribute)
    }
}

use Attribute::*;

const FONT_BASIC: &[Attribute] = &[FontColor, FontFamily];
const FONT_SIZED: &[Attribute] = &[FontColor, FontFamily, FontSize];
const FONT_WEIGHTED: &[Attribute] = &[FontColor, FontFamily, FontSize, FontWeight];
const FONT_WITH_BACKGROUND: &[Attribute] = &[FontColor, FontFamily, FontSize, BackgroundColor];
const LINE: &[Attribute] = &[LineVisibility, LinePattern, LineWidth, LineColor];

const fn element(
    key: &'static str,
    name: &'static str,
    description: &'static str,
    attributes: &'static [Attribute],
    category: Category,
) -> StyleElementSpec {
    StyleElementSpec {
        key,
        name,
        description,
        attributes,
        category,
    }
}

/// Every recognized style element, in presentation order.
pub const STYLE_ELEMENTS: &[StyleElementSpec] = &[
    element(
        "all",
        "All Fonts",
        "Formats all fonts across the entire workbook",
        FONT_BASIC,
        Category::Global,
    ),
    element(
        "worksheet",
        "Worksheet Default",
        "Formats the worksheet default font",
        FONT_SIZED,
        Category::Worksheet,
    ),
    element(
        "worksheet-title",
        "Worksheet Title",
        "Formats the worksheet title font",
        FONT_SIZED,
        Category::Worksheet,
    ),
    element(
        "tooltip",
        "Tooltip",
        "Formats the tooltip font",
        FONT_SIZED,
        Category::Worksheet,
    ),
    element(
        "dashboard-title",
        "Dashboard Title",
        "Formats the dashboard title",
        FONT_WEIGHTED,
        Category::Dashboard,
    ),
    element(
        "story-title",
        "Story Title",
        "Formats the story title font",
        FONT_SIZED,
        Category::Story,
    ),
    element(
        "header",
        "Header",
        "Formats the header font",
        FONT_BASIC,
        Category::Worksheet,
    ),
    element(
        "legend",
        "Legend Body",
        "Formats the legend body font and background color",
        FONT_WITH_BACKGROUND,
        Category::Controls,
    ),
    element(
        "legend-title",
        "Legend Title",
        "Formats the legend title font",
        FONT_SIZED,
        Category::Controls,
    ),
    element(
        "filter",
        "Filter Body",
        "Formats the filter body font and background color",
        FONT_WITH_BACKGROUND,
        Category::Controls,
    ),
    element(
        "filter-title",
        "Filter Title",
        "Formats the filter title font",
        FONT_SIZED,
        Category::Controls,
    ),
    element(
        "parameter-ctrl",
        "Parameter Control Body",
        "Formats the parameter body font and background color",
        FONT_WITH_BACKGROUND,
        Category::Controls,
    ),
    element(
        "parameter-ctrl-title",
        "Parameter Control Title",
        "Formats the parameter control title font",
        FONT_SIZED,
        Category::Controls,
    ),
    element(
        "highlighter",
        "Highlighter Body",
        "Formats the highlighter body font and background color",
        FONT_WITH_BACKGROUND,
        Category::Controls,
    ),
    element(
        "highlighter-title",
        "Highlighter Title",
        "Formats the highlighter control title font",
        FONT_SIZED,
        Category::Controls,
    ),
    element(
        "page-ctrl-title",
        "Page Card Title",
        "Formats the page card title font",
        FONT_BASIC,
        Category::Controls,
    ),
    element(
        "gridline",
        "Grid Lines",
        "Formats the gridlines on a view",
        LINE,
        Category::View,
    ),
    element(
        "zeroline",
        "Zero Line",
        "Formats the zeroline on a view",
        LINE,
        Category::View,
    ),
    element(
        "mark",
        "Mark Color",
        "Formats the mark color on a view",
        &[MarkColor],
        Category::View,
    ),
    element(
        "view",
        "View Background",
        "Formats the background color on a view",
        &[BackgroundColor],
        Category::View,
    ),
];

static ELEMENT_INDEX: Lazy<HashMap<&'static str, &'static StyleElementSpec>> =
    Lazy::new(|| STYLE_ELEMENTS.iter().map(|e| (e.key, e)).collect());

/// Looks up a style element by key.
pub fn style_element(key: &str) -> Option<&'static StyleElementSpec> {
    ELEMENT_INDEX.get(key).copied()
}

pub fn is_style_element(key: &str) -> bool {
    ELEMENT_INDEX.contains_key(key)
}

/// Groups elements by category, keeping first-seen category order and
/// registry order within each group.
pub fn elements_by_category() -> Vec<(Category, Vec<&'static StyleElementSpec>)> {
    let mut groups: Vec<(Category, Vec<&'static StyleElementSpec>)> = Vec::new();
    for spec in STYLE_ELEMENTS {
        match groups.iter_mut().find(|(c, _)| *c == spec.category) {
            Some((_, members)) => members.push(spec),
            None => groups.push((spec.category, vec![spec])),
        }
    }
    groups
}
