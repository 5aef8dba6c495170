//! Schema validation for theme documents.
//!
//! [`validate_value`] inspects any JSON value and returns a
//! [`ValidationReport`] holding two ordered lists: errors and warnings.
//! Validation never fails and never mutates its input. Every problem it finds
//! becomes a [`Diagnostic`].
//!
//! A document with no errors is *valid*, whatever its warning count. A
//! document with neither is *clean*.
//!
//! # Checks, in order
//!
//! 1. The root must be an object. Otherwise one error and nothing else.
//! 2. `version` must be present (error). A value other than
//!    [`THEME_VERSION`] is a warning.
//! 3. `styles` must be present (error, stops here).
//! 4. `base-theme`, defaulting to `smooth`, should be a known base theme (warning).
//! 5. `styles` must be an object (error, stops here).
//! 6. For each element in stored order:
//!    - unknown keys are warnings, and their attributes are still checked
//!    - a non-object value is an error and its attributes are skipped
//!    - each attribute is checked according to its [`AttrKind`]
//!
//! `font-weight`, `line-visibility` and `line-pattern` are not checked against
//! their legal values.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tabtheme::validate::validate_value;
//!
//! let report = validate_value(&json!({
//!     "version": "1.0.0",
//!     "styles": { "mark": { "mark-color": "notahex" } }
//! }));
//! assert_eq!(report.errors.len(), 1);
//! assert!(report.errors[0].to_string().contains("mark-color"));
//! assert!(report.warnings.is_empty());
//! ```

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::document::{BASE_THEME_KEY, STYLES_KEY, VERSION_KEY};
use crate::schema::{
    is_base_theme, is_style_element, AttrKind, BASE_THEMES, DEFAULT_BASE_THEME,
    MAX_FONT_FAMILY_LEN, SIZE_RANGE, THEME_VERSION,
};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The document will not load correctly in Tableau.
    Error,
    /// Advisory only.
    Warning,
}

/// A single problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The root is not a JSON object.
    NotAnObject,
    MissingVersion,
    /// `version` differs from the supported one.
    VersionMismatch { found: String },
    MissingStyles,
    StylesNotObject,
    UnknownBaseTheme { found: String },
    /// The key is not in the schema registry.
    UnknownElement { element: String },
    ElementNotObject { element: String },
    /// A color attribute is not a string starting with `#`.
    InvalidColor { element: String, attribute: String },
    /// A size attribute is not an integer in `1..=99`.
    InvalidSize { element: String, attribute: String },
    /// A font family is not a string of at most 50 characters.
    InvalidFontFamily { element: String, attribute: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::VersionMismatch { .. }
            | Diagnostic::UnknownBaseTheme { .. }
            | Diagnostic::UnknownElement { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// The style element this diagnostic is about, if any.
    pub fn element(&self) -> Option<&str> {
        match self {
            Diagnostic::UnknownElement { element }
            | Diagnostic::ElementNotObject { element }
            | Diagnostic::InvalidColor { element, .. }
            | Diagnostic::InvalidSize { element, .. }
            | Diagnostic::InvalidFontFamily { element, .. } => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NotAnObject => write!(f, "Theme file must be a JSON object"),
            Diagnostic::MissingVersion => write!(f, "Missing required 'version' field"),
            Diagnostic::VersionMismatch { found } => write!(
                f,
                "Version {} may not match Tableau 2025.1 (expected {})",
                found, THEME_VERSION
            ),
            Diagnostic::MissingStyles => write!(f, "Missing required 'styles' object"),
            Diagnostic::StylesNotObject => write!(f, "'styles' must be an object"),
            Diagnostic::UnknownBaseTheme { found } => {
                let valid: Vec<&str> = BASE_THEMES.iter().map(|t| t.id).collect();
                write!(
                    f,
                    "Unknown base theme '{}'. Valid options: {}",
                    found,
                    valid.join(", ")
                )
            }
            Diagnostic::UnknownElement { element } => write!(
                f,
                "Unknown style element '{}' - it may not be supported",
                element
            ),
            Diagnostic::ElementNotObject { element } => {
                write!(f, "Style element '{}' must be an object", element)
            }
            Diagnostic::InvalidColor { element, attribute } => write!(
                f,
                "Color attribute '{}' in '{}' must be a hex color code (e.g., #FF0000)",
                attribute, element
            ),
            Diagnostic::InvalidSize { element, attribute } => write!(
                f,
                "Size attribute '{}' in '{}' must be an integer between {}-{}",
                attribute,
                element,
                SIZE_RANGE.start(),
                SIZE_RANGE.end()
            ),
            Diagnostic::InvalidFontFamily { element, attribute } => write!(
                f,
                "Font family '{}' in '{}' must be a string (max {} characters)",
                attribute, element, MAX_FONT_FAMILY_LEN
            ),
        }
    }
}

/// Errors and warnings from one validation pass, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationReport {
    /// No errors. Warnings are allowed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 3)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.error_messages())?;
        state.serialize_field("warnings", &self.warning_messages())?;
        state.end()
    }
}

/// Validates any JSON value as a theme document.
pub fn validate_value(value: &Value) -> ValidationReport {
    match value {
        Value::Object(root) => validate_map(root),
        _ => {
            let mut report = ValidationReport::default();
            report.push(Diagnostic::NotAnObject);
            report
        }
    }
}

/// Validates a document root that is already known to be an object.
pub fn validate_map(root: &Map<String, Value>) -> ValidationReport {
    let mut report = ValidationReport::default();

    match root.get(VERSION_KEY) {
        None => report.push(Diagnostic::MissingVersion),
        Some(Value::String(v)) if v == THEME_VERSION => {}
        Some(other) => report.push(Diagnostic::VersionMismatch {
            found: display_value(other),
        }),
    }

    let Some(styles) = root.get(STYLES_KEY) else {
        report.push(Diagnostic::MissingStyles);
        return report;
    };

    let base = root
        .get(BASE_THEME_KEY)
        .cloned()
        .unwrap_or_else(|| Value::from(DEFAULT_BASE_THEME));
    if !base.as_str().is_some_and(is_base_theme) {
        report.push(Diagnostic::UnknownBaseTheme {
            found: display_value(&base),
        });
    }

    let Some(styles) = styles.as_object() else {
        report.push(Diagnostic::StylesNotObject);
        return report;
    };

    for (element, properties) in styles {
        if !is_style_element(element) {
            report.push(Diagnostic::UnknownElement {
                element: element.clone(),
            });
        }

        let Some(properties) = properties.as_object() else {
            report.push(Diagnostic::ElementNotObject {
                element: element.clone(),
            });
            continue;
        };

        for (attribute, value) in properties {
            if let Some(diagnostic) = check_attribute(element, attribute, value) {
                report.push(diagnostic);
            }
        }
    }

    report
}

/// Checks a single attribute value against the rule for its kind.
pub fn check_attribute(element: &str, attribute: &str, value: &Value) -> Option<Diagnostic> {
    match AttrKind::classify(attribute) {
        AttrKind::Color if !value.as_str().is_some_and(|s| s.starts_with('#')) => {
            Some(Diagnostic::InvalidColor {
                element: element.to_string(),
                attribute: attribute.to_string(),
            })
        }
        AttrKind::Int if !value.as_i64().is_some_and(|n| SIZE_RANGE.contains(&n)) => {
            Some(Diagnostic::InvalidSize {
                element: element.to_string(),
                attribute: attribute.to_string(),
            })
        }
        AttrKind::Str
            if !value
                .as_str()
                .is_some_and(|s| s.chars().count() <= MAX_FONT_FAMILY_LEN) =>
        {
            Some(Diagnostic::InvalidFontFamily {
                element: element.to_string(),
                attribute: attribute.to_string(),
            })
        }
        _ => None,
    }
}

/// Renders a JSON value for a message: strings unquoted, anything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn styles(styles: Value) -> Value {
        json!({ "version": "1.0.0", "base-theme": "smooth", "styles": styles })
    }

    #[test]
    fn test_non_object_short_circuits() {
        for value in [json!([]), json!("theme"), json!(null), json!(3)] {
            let report = validate_value(&value);
            assert_eq!(report.errors, vec![Diagnostic::NotAnObject]);
            assert!(report.warnings.is_empty());
        }
    }

    #[test]
    fn test_empty_object_reports_version_and_styles() {
        let report = validate_value(&json!({}));
        assert_eq!(
            report.errors,
            vec![Diagnostic::MissingVersion, Diagnostic::MissingStyles]
        );
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_version_mismatch_is_warning() {
        let report = validate_value(&json!({"version": "2.0.0", "styles": {}}));
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        let msg = report.warnings[0].to_string();
        assert!(msg.contains("2.0.0"));
        assert!(msg.contains("1.0.0"));
    }

    #[test]
    fn test_non_string_version_is_mismatch() {
        let report = validate_value(&json!({"version": 1, "styles": {}}));
        assert_eq!(
            report.warnings,
            vec![Diagnostic::VersionMismatch { found: "1".into() }]
        );
    }

    #[test]
    fn test_missing_styles_skips_base_theme_check() {
        let report = validate_value(&json!({"version": "1.0.0", "base-theme": "dark"}));
        assert_eq!(report.errors, vec![Diagnostic::MissingStyles]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_unknown_base_theme_lists_options() {
        let report = validate_value(&json!({
            "version": "1.0.0", "base-theme": "dark", "styles": {}
        }));
        assert!(report.is_valid());
        let msg = report.warnings[0].to_string();
        assert!(msg.contains("'dark'"));
        assert!(msg.contains("smooth, clean, modern, classic"));
    }

    #[test]
    fn test_absent_base_theme_defaults_to_smooth() {
        let report = validate_value(&json!({"version": "1.0.0", "styles": {}}));
        assert!(report.is_clean());
    }

    #[test]
    fn test_styles_must_be_object() {
        let report = validate_value(&json!({"version": "1.0.0", "styles": []}));
        assert_eq!(report.errors, vec![Diagnostic::StylesNotObject]);
    }

    #[test]
    fn test_unknown_element_still_checks_attributes() {
        let report = validate_value(&styles(json!({
            "sidebar": { "font-color": "red" }
        })));
        assert_eq!(
            report.warnings,
            vec![Diagnostic::UnknownElement { element: "sidebar".into() }]
        );
        assert_eq!(
            report.errors,
            vec![Diagnostic::InvalidColor {
                element: "sidebar".into(),
                attribute: "font-color".into()
            }]
        );
    }

    #[test]
    fn test_non_object_element_skips_attributes() {
        let report = validate_value(&styles(json!({
            "mark": "#ff0000",
            "view": { "background-color": "white" }
        })));
        assert_eq!(report.errors.len(), 2);
        assert_eq!(
            report.errors[0],
            Diagnostic::ElementNotObject { element: "mark".into() }
        );
        assert_eq!(report.errors[1].element(), Some("view"));
    }

    #[test]
    fn test_bad_mark_color() {
        let report = validate_value(&styles(json!({
            "mark": { "mark-color": "notahex" }
        })));
        assert_eq!(report.errors.len(), 1);
        let msg = report.errors[0].to_string();
        assert!(msg.contains("mark-color"));
        assert!(msg.contains("'mark'"));
    }

    #[test]
    fn test_size_rules() {
        for bad in [json!(0), json!(100), json!(150), json!(-3), json!(10.5), json!("10"), json!(true)] {
            let report = validate_value(&styles(json!({ "worksheet": { "font-size": bad } })));
            assert_eq!(report.errors.len(), 1, "expected error for {}", bad);
            assert!(report.errors[0].to_string().contains("1-99"));
        }
        for good in [1, 10, 99] {
            let report = validate_value(&styles(json!({ "gridline": { "line-width": good } })));
            assert!(report.is_clean());
        }
    }

    #[test]
    fn test_font_family_rules() {
        let long = "x".repeat(51);
        let report = validate_value(&styles(json!({ "all": { "font-family": long } })));
        assert_eq!(report.errors.len(), 1);

        let exact = "é".repeat(50);
        let report = validate_value(&styles(json!({ "all": { "font-family": exact } })));
        assert!(report.is_clean());

        let report = validate_value(&styles(json!({ "all": { "font-family": 12 } })));
        assert!(matches!(
            report.errors[0],
            Diagnostic::InvalidFontFamily { .. }
        ));
    }

    #[test]
    fn test_enum_attributes_are_not_checked() {
        let report = validate_value(&styles(json!({
            "dashboard-title": { "font-weight": "heaviest" },
            "gridline": { "line-visibility": 7, "line-pattern": ["x"] }
        })));
        assert!(report.is_clean());
    }

    #[test]
    fn test_diagnostics_follow_document_order() {
        let report = validate_value(&styles(json!({
            "zeroline": { "line-color": 1, "line-width": 0 },
            "all": { "font-color": "black" }
        })));
        let elements: Vec<Option<&str>> = report.errors.iter().map(|d| d.element()).collect();
        assert_eq!(elements, vec![Some("zeroline"), Some("zeroline"), Some("all")]);
        assert!(matches!(report.errors[0], Diagnostic::InvalidColor { .. }));
        assert!(matches!(report.errors[1], Diagnostic::InvalidSize { .. }));
    }

    #[test]
    fn test_alpha_colors_pass() {
        let report = validate_value(&styles(json!({
            "legend": { "background-color": "#FF000080" }
        })));
        assert!(report.is_clean());
    }

    #[test]
    fn test_report_serializes_messages() {
        let report = validate_value(&json!({}));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["errors"][0], "Missing required 'version' field");
        assert_eq!(value["warnings"], json!([]));
    }
}
