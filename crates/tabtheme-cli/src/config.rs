//! Editor configuration.
//!
//! Configuration is a small YAML file, located with `--config` or the
//! `TABTHEME_CONFIG` environment variable. Every field is optional:
//!
//! ```yaml
//! size_limit: 15000
//! theme_name: custom_theme
//! log_level: info
//! palettes:
//!   - name: Ocean
//!     primary: "#003b5c"
//!     secondary: "#0072ce"
//!     accent: "#00a3e0"
//!     background: "#f5f7fa"
//! ```
//!
//! Configured palettes are listed after the built-in presets. A configured
//! palette with the same name as a preset replaces it.

use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use tabtheme::{presets, ColorPalette, NamedPalette, SIZE_LIMIT_BYTES};

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unknown log level '{0}' (expected off, error, warn, info, debug or trace)")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Advisory size limit for exported themes, in bytes.
    pub size_limit: usize,
    /// File stem used by `export` when no name is given.
    pub theme_name: String,
    pub log_level: Option<String>,
    pub palettes: Vec<NamedPalette>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size_limit: SIZE_LIMIT_BYTES,
            theme_name: "custom_theme".to_string(),
            log_level: None,
            palettes: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or returns defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.log_level()?;
        Ok(config)
    }

    /// Parses configuration from YAML. Palette colors are sanitized.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes as null
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Config = serde_yaml::from_str(yaml)?;
        for palette in &mut config.palettes {
            palette.colors = palette.colors.sanitized();
        }
        Ok(config)
    }

    /// The configured log level, if any.
    pub fn log_level(&self) -> Result<Option<LevelFilter>, ConfigError> {
        match &self.log_level {
            None => Ok(None),
            Some(level) => level
                .parse::<LevelFilter>()
                .map(Some)
                .map_err(|_| ConfigError::LogLevel(level.clone())),
        }
    }

    /// Presets followed by configured palettes, with same-named entries replaced.
    pub fn palettes(&self) -> Vec<NamedPalette> {
        let mut all = presets();
        for custom in &self.palettes {
            match all
                .iter_mut()
                .find(|p| p.name.eq_ignore_ascii_case(&custom.name))
            {
                Some(existing) => *existing = custom.clone(),
                None => all.push(custom.clone()),
            }
        }
        all
    }

    /// Looks up a palette by name, ignoring ASCII case.
    pub fn palette(&self, name: &str) -> Option<ColorPalette> {
        self.palettes()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.colors)
    }
}
