//! The in-memory theme document.
//!
//! A [`ThemeDocument`] wraps the JSON object stored in a theme file:
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "base-theme": "smooth",
//!   "styles": {
//!     "worksheet": { "font-color": "#000000", "font-size": 10 }
//!   }
//! }
//! ```
//!
//! The document is deliberately untyped below the root. Files written by
//! other tools, or by future versions of Tableau, may contain keys and values
//! the schema does not know about, and those must survive a load/edit/save
//! cycle untouched and in their original order. Typing is the validator's job
//! ([`crate::validate`]), not the writer's.
//!
//! # Element accessors
//!
//! [`ensure_element`](ThemeDocument::ensure_element) always hands back a
//! mutable attribute map, creating the element (and `styles` itself) when
//! needed. [`remove_element`](ThemeDocument::remove_element) is idempotent.
//!
//! ```rust
//! use tabtheme::ThemeDocument;
//!
//! let mut doc = ThemeDocument::new();
//! doc.ensure_element("tooltip").insert("font-size".into(), 9.into());
//! assert_eq!(doc.element("tooltip").unwrap()["font-size"], 9);
//!
//! doc.remove_element("tooltip");
//! doc.remove_element("tooltip");
//! assert!(doc.element("tooltip").is_none());
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::error::{json_type_name, Result, ThemeError};
use crate::schema::{DEFAULT_BASE_THEME, DEFAULT_FONT, THEME_VERSION};
use crate::validate::{validate_map, ValidationReport};

/// Attribute map of a single style element.
pub type ElementProperties = Map<String, Value>;

pub const VERSION_KEY: &str = "version";
pub const BASE_THEME_KEY: &str = "base-theme";
pub const STYLES_KEY: &str = "styles";

/// A theme document: a JSON object with `version`, `base-theme` and `styles`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDocument {
    root: Map<String, Value>,
}

impl ThemeDocument {
    /// Creates the default document.
    ///
    /// It carries the current version, the `smooth` base theme, and two
    /// elements: `all` (font color and family) and `worksheet` (the same plus
    /// a font size of 10).
    pub fn new() -> Self {
        let value = json!({
            VERSION_KEY: THEME_VERSION,
            BASE_THEME_KEY: DEFAULT_BASE_THEME,
            STYLES_KEY: {
                "all": {
                    "font-family": DEFAULT_FONT,
                    "font-color": "#000000"
                },
                "worksheet": {
                    "font-family": DEFAULT_FONT,
                    "font-color": "#000000",
                    "font-size": 10
                }
            }
        });
        match value {
            Value::Object(root) => Self { root },
            _ => unreachable!("json! object literal is always an object"),
        }
    }

    /// Wraps an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::NotAnObject`] if the root is not an object.
    /// Schema problems are not errors here; run [`validate`](Self::validate).
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(ThemeError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Parses a complete theme from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(ThemeError::Parse)?;
        Self::from_value(value)
    }

    /// Reads and parses a theme file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::from_json_str(&content)?;
        log::debug!(
            "loaded theme from {} ({} styled elements)",
            path.display(),
            doc.elements().count()
        );
        Ok(doc)
    }

    /// Replaces the whole document with the JSON in `text`.
    ///
    /// The text is parsed completely before anything changes. On success the
    /// current contents are cleared and repopulated, never merged. On failure
    /// the document is left untouched.
    pub fn replace_from_str(&mut self, text: &str) -> Result<()> {
        let replacement = Self::from_json_str(text)?;
        self.root.clear();
        self.root.extend(replacement.root);
        log::debug!("replaced document contents ({} top-level keys)", self.root.len());
        Ok(())
    }

    // ─── Top-level fields ───────────────────────────────────────────────────

    /// The raw `version` value, if present.
    pub fn version(&self) -> Option<&Value> {
        self.root.get(VERSION_KEY)
    }

    /// The `base-theme` id, falling back to the default when absent or not a string.
    pub fn base_theme(&self) -> &str {
        self.root
            .get(BASE_THEME_KEY)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_BASE_THEME)
    }

    /// Sets `base-theme`. The id is not checked against the registry.
    pub fn set_base_theme(&mut self, id: impl Into<String>) {
        self.root
            .insert(BASE_THEME_KEY.to_string(), Value::String(id.into()));
    }

    /// The `styles` object, if present and an object.
    pub fn styles(&self) -> Option<&Map<String, Value>> {
        self.root.get(STYLES_KEY).and_then(Value::as_object)
    }

    /// Iterates `(key, properties)` in stored order.
    ///
    /// Elements whose value is not an object are skipped.
    pub fn elements(&self) -> impl Iterator<Item = (&str, &ElementProperties)> {
        self.styles().into_iter().flat_map(|styles| {
            styles
                .iter()
                .filter_map(|(k, v)| v.as_object().map(|props| (k.as_str(), props)))
        })
    }

    // ─── Element accessors ──────────────────────────────────────────────────

    /// Returns an element's attribute map, if the element is present.
    pub fn element(&self, key: &str) -> Option<&ElementProperties> {
        self.styles()?.get(key)?.as_object()
    }

    /// True when the element exists and has at least one attribute.
    ///
    /// An empty map is present but contributes no formatting.
    pub fn is_active(&self, key: &str) -> bool {
        self.element(key).is_some_and(|props| !props.is_empty())
    }

    /// Returns the element's attribute map, inserting an empty one if absent.
    ///
    /// Repeated calls return the same stored map. A missing or non-object
    /// `styles`, or a non-object element value, is replaced by an empty object.
    pub fn ensure_element(&mut self, key: &str) -> &mut ElementProperties {
        let styles = self
            .root
            .entry(STYLES_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if !styles.is_object() {
            log::warn!(
                "replacing non-object '{}' ({}) with an empty object",
                STYLES_KEY,
                json_type_name(styles)
            );
            *styles = Value::Object(Map::new());
        }

        let element = match styles {
            Value::Object(map) => map
                .entry(key)
                .or_insert_with(|| Value::Object(Map::new())),
            _ => unreachable!("styles was just made an object"),
        };
        if !element.is_object() {
            log::warn!(
                "replacing non-object element '{}' ({}) with an empty object",
                key,
                json_type_name(element)
            );
            *element = Value::Object(Map::new());
        }

        match element {
            Value::Object(props) => props,
            _ => unreachable!("element was just made an object"),
        }
    }

    /// Deletes an element and all of its attributes. Absent keys are ignored.
    pub fn remove_element(&mut self, key: &str) {
        if let Some(Value::Object(styles)) = self.root.get_mut(STYLES_KEY) {
            styles.shift_remove(key);
        }
    }

    /// Writes one attribute, creating the element if needed.
    ///
    /// The value is stored as given; nothing is type-checked here.
    pub fn set_attribute(&mut self, key: &str, attr: &str, value: impl Into<Value>) {
        self.ensure_element(key)
            .insert(attr.to_string(), value.into());
    }

    /// Removes one attribute from an element, returning the old value.
    pub fn remove_attribute(&mut self, key: &str, attr: &str) -> Option<Value> {
        match self.root.get_mut(STYLES_KEY)? {
            Value::Object(styles) => styles.get_mut(key)?.as_object_mut()?.shift_remove(attr),
            _ => None,
        }
    }

    // ─── Validation and serialization ───────────────────────────────────────

    /// Checks the document against the schema.
    pub fn validate(&self) -> ValidationReport {
        validate_map(&self.root)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Serializes with two-space indentation, preserving key order.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root).map_err(ThemeError::Serialize)
    }

    /// Size of the pretty-printed document in bytes.
    pub fn byte_size(&self) -> Result<usize> {
        Ok(self.to_json_pretty()?.len())
    }

    /// True when the serialized document is larger than `limit` bytes.
    ///
    /// The limit is advisory; exceeding it never blocks an export.
    pub fn exceeds_size_limit(&self, limit: usize) -> Result<bool> {
        Ok(self.byte_size()? > limit)
    }

    /// Writes the pretty-printed document to `path`.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let content = self.to_json_pretty()?;
        std::fs::write(path, &content).map_err(|source| ThemeError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("wrote {} bytes to {}", content.len(), path.display());
        Ok(content.len())
    }
}

impl Default for ThemeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ThemeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_json_pretty().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for ThemeDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ThemeDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let root = Map::deserialize(deserializer)?;
        Ok(Self { root })
    }
}
