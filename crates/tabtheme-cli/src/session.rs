//! One editing session: a theme document, where it came from, and the config.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tabtheme::{ColorPalette, ThemeDocument, ValidationReport};

use crate::config::Config;
use crate::output::{styles, Render, TextMode};

/// Owns the document being edited.
#[derive(Debug)]
pub struct Session {
    pub document: ThemeDocument,
    path: Option<PathBuf>,
    config: Config,
}

impl Session {
    /// Starts from the default document, not yet backed by a file.
    pub fn new(config: Config) -> Self {
        Self {
            document: ThemeDocument::new(),
            path: None,
            config,
        }
    }

    /// Loads `path`. Syntax errors fail; schema problems are left for validation.
    pub fn open(path: impl AsRef<Path>, config: Config) -> tabtheme::Result<Self> {
        let path = path.as_ref();
        let document = ThemeDocument::from_file(path)?;
        log::info!("opened {}", path.display());
        Ok(Self {
            document,
            path: Some(path.to_path_buf()),
            config,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Writes back to the file the session was opened from.
    pub fn save(&mut self) -> anyhow::Result<usize> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No file to save to; pass --out"))?;
        self.save_to(path)
    }

    /// Writes to `path`, which becomes the session's file.
    pub fn save_to(&mut self, path: impl Into<PathBuf>) -> anyhow::Result<usize> {
        let path = path.into();
        crate::output::validate_path(&path)?;
        let written = self.document.write_to(&path)?;
        log::info!("wrote {} bytes to {}", written, path.display());
        if let Some(warning) = self.size_warning(written) {
            log::warn!("{}: {}", path.display(), warning);
        }
        self.path = Some(path);
        Ok(written)
    }

    /// Warning text when `bytes` is over the configured size limit.
    pub fn size_warning(&self, bytes: usize) -> Option<String> {
        let limit = self.config.size_limit;
        (bytes > limit).then(|| format!("{} bytes, above the {} byte limit", bytes, limit))
    }

    /// Saves to `out` when given, otherwise back in place.
    pub fn commit(&mut self, out: Option<&Path>) -> anyhow::Result<usize> {
        match out {
            Some(path) => self.save_to(path),
            None => self.save(),
        }
    }

    /// Resolves a palette from presets and configured palettes.
    pub fn palette(&self, name: &str) -> Option<ColorPalette> {
        self.config.palette(name)
    }

    pub fn validate(&self) -> ValidationReport {
        self.document.validate()
    }

    /// Validation counts plus the serialized size.
    pub fn status(&self) -> tabtheme::Result<Status> {
        let report = self.validate();
        let size = self.document.byte_size()?;
        Ok(Status {
            valid: report.is_valid(),
            errors: report.errors.len(),
            warnings: report.warnings.len(),
            size,
            size_limit: self.config.size_limit,
        })
    }
}

/// One-line summary shown after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    pub valid: bool,
    pub errors: usize,
    pub warnings: usize,
    pub size: usize,
    pub size_limit: usize,
}

impl Status {
    pub fn over_limit(&self) -> bool {
        self.size > self.size_limit
    }
}

impl Render for Status {
    fn render(&self, mode: TextMode) -> String {
        let verdict = if self.valid {
            mode.paint(&styles::success(), "valid")
        } else {
            mode.paint(&styles::error(), "invalid")
        };
        let size = format!("{} / {} bytes", self.size, self.size_limit);
        let size = if self.over_limit() {
            mode.paint(&styles::warning(), format!("{} (over limit)", size))
        } else {
            mode.paint(&styles::muted(), size)
        };
        format!(
            "{}: {} error(s), {} warning(s), {}",
            verdict, self.errors, self.warnings, size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_valid() {
        let session = Session::new(Config::default());
        let status = session.status().unwrap();
        assert!(status.valid);
        assert_eq!(status.errors, 0);
        assert_eq!(status.size_limit, 15_000);
        assert!(!status.over_limit());
        assert!(session.path().is_none());
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut session = Session::new(Config::default());
        assert!(session.save().is_err());
    }

    #[test]
    fn test_save_to_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");

        let mut session = Session::new(Config::default());
        session.document.set_attribute("mark", "mark-color", "#123456");
        session.save_to(&path).unwrap();
        assert_eq!(session.path(), Some(path.as_path()));

        let reopened = Session::open(&path, Config::default()).unwrap();
        assert_eq!(reopened.document, session.document);
    }

    #[test]
    fn test_size_warning_uses_configured_limit() {
        let config = Config {
            size_limit: 10,
            ..Config::default()
        };
        let session = Session::new(config);
        assert_eq!(session.config().size_limit, 10);
        assert_eq!(
            session.size_warning(11).as_deref(),
            Some("11 bytes, above the 10 byte limit")
        );
        assert!(session.size_warning(10).is_none());

        let default = Session::new(Config::default());
        assert!(default.size_warning(11).is_none());
    }

    #[test]
    fn test_status_render() {
        let status = Status {
            valid: false,
            errors: 2,
            warnings: 1,
            size: 20_000,
            size_limit: 15_000,
        };
        assert_eq!(
            status.render(TextMode::Plain),
            "invalid: 2 error(s), 1 warning(s), 20000 / 15000 bytes (over limit)"
        );
    }
}
