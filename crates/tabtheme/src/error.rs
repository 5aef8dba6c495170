//! Error types for the theme crate.
//!
//! Only structural failures are errors. Problems found while checking a
//! document against the schema are reported as [`Diagnostic`](crate::Diagnostic)
//! values by the validator, never through these types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, replacing or saving a theme document.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The input is not syntactically valid JSON.
    #[error("Invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The input parsed, but its root is not a JSON object.
    #[error("Theme file must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// Reading a theme file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a theme file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ThemeError {
    /// Returns true for failures at the JSON-syntax level.
    ///
    /// The shell reports these differently from schema problems.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ThemeError::Parse(_) | ThemeError::NotAnObject { .. })
    }
}

/// Errors from strict color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The text is not a 6 or 8 digit hex color.
    #[error("Invalid hex color '{0}' (expected #RRGGBB or #RRGGBBAA)")]
    InvalidHex(String),
}

/// Result type for theme document operations.
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Returns the JSON type name of a value, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_carries_parser_message() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ThemeError::Parse(parse_err);
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid JSON:"));
        assert!(msg.contains("EOF"));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_not_an_object_display() {
        let err = ThemeError::NotAnObject { found: "an array" };
        assert_eq!(
            err.to_string(),
            "Theme file must be a JSON object, found an array"
        );
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_read_error_is_not_parse_error() {
        let err = ThemeError::Read {
            path: PathBuf::from("missing.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.json"));
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_invalid_hex_display() {
        let err = ColorError::InvalidHex("#12".into());
        assert!(err.to_string().contains("#12"));
    }
}
