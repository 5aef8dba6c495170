//! Output mode control.
//!
//! [`OutputMode`] is the user-facing `--output` flag. Text modes hand a
//! [`TextMode`] to the command's [`Render`] implementation; `json` serializes
//! the command's data directly and skips text rendering.

use std::io::IsTerminal;
use std::path::Path;

use console::Style;
use serde::Serialize;

/// Controls how command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Styled on a terminal, plain when piped
    #[default]
    Auto,
    /// Always style
    Term,
    /// Never style
    Text,
    /// Serialize command data as JSON
    Json,
}

impl OutputMode {
    /// Resolves Auto to Term or Text based on whether stdout is a terminal.
    pub fn resolve_auto(&self) -> OutputMode {
        match self {
            OutputMode::Auto => {
                if std::io::stdout().is_terminal() {
                    OutputMode::Term
                } else {
                    OutputMode::Text
                }
            }
            other => *other,
        }
    }

    /// Returns None for structured modes, which bypass text rendering.
    pub fn to_text_mode(&self) -> Option<TextMode> {
        match self.resolve_auto() {
            OutputMode::Term => Some(TextMode::Styled),
            OutputMode::Text => Some(TextMode::Plain),
            OutputMode::Json => None,
            OutputMode::Auto => unreachable!("resolve_auto should have resolved Auto"),
        }
    }
}

/// Whether text output carries ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    Styled,
    Plain,
}

impl TextMode {
    /// Applies `style` to `text` when styling is on.
    pub fn paint(self, style: &Style, text: impl std::fmt::Display) -> String {
        match self {
            TextMode::Styled => style.apply_to(text).force_styling(true).to_string(),
            TextMode::Plain => text.to_string(),
        }
    }
}

/// Named styles used across commands.
pub mod styles {
    use console::Style;

    pub fn title() -> Style {
        Style::new().bold()
    }

    pub fn error() -> Style {
        Style::new().red().bold()
    }

    pub fn warning() -> Style {
        Style::new().yellow()
    }

    pub fn success() -> Style {
        Style::new().green()
    }

    pub fn muted() -> Style {
        Style::new().dim()
    }

    pub fn key() -> Style {
        Style::new().cyan()
    }
}

/// Text rendering for a command's result.
pub trait Render {
    fn render(&self, mode: TextMode) -> String;
}

/// Renders `data` according to `mode`.
pub fn render_output<T: Serialize + Render>(
    data: &T,
    mode: OutputMode,
) -> Result<String, serde_json::Error> {
    match mode.to_text_mode() {
        Some(text_mode) => Ok(data.render(text_mode)),
        None => serde_json::to_string_pretty(data),
    }
}

/// Validates that a file path's parent directory exists.
pub fn validate_path(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }
    }
    Ok(())
}
