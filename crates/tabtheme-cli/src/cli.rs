//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputMode;

/// Create, edit and validate Tableau custom theme files
#[derive(Debug, Parser)]
#[command(name = "tabtheme", version)]
#[command(about = "Create, edit and validate Tableau custom theme files")]
#[command(long_about = "Create, edit and validate Tableau custom theme files.\n\n\
    Themes are JSON documents imported by Tableau Desktop 2025.1+ through\n\
    Format > Import Custom Theme. Editing commands rewrite the file in place\n\
    unless --out is given, then print a validation summary.")]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "TABTHEME_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Auto)]
    pub output: OutputMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a default theme, optionally colored by a palette
    New {
        /// Palette to apply
        #[arg(short, long)]
        palette: Option<String>,

        /// Where to write the theme (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Check a theme file; exits 1 when it has errors
    Validate {
        file: PathBuf,
    },

    /// List style elements grouped by category with their attributes
    Show {
        file: PathBuf,
    },

    /// Activate a style element
    Add {
        #[command(flatten)]
        target: Target,
        element: String,
    },

    /// Remove a style element and all of its attributes
    Remove {
        #[command(flatten)]
        target: Target,
        element: String,
    },

    /// Set one attribute of a style element
    Set {
        #[command(flatten)]
        target: Target,
        element: String,
        attribute: String,
        value: String,
    },

    /// Remove one attribute from a style element
    Unset {
        #[command(flatten)]
        target: Target,
        element: String,
        attribute: String,
    },

    /// Choose the base theme
    Base {
        #[command(flatten)]
        target: Target,
        /// One of smooth, clean, modern, classic
        theme: String,
    },

    /// Apply a named palette
    Palette {
        #[command(flatten)]
        target: Target,
        name: String,
    },

    /// Replace the whole document with JSON from a file or stdin
    Replace {
        #[command(flatten)]
        target: Target,
        /// JSON source; `-` or omitted reads stdin
        source: Option<PathBuf>,
    },

    /// Write the theme as <NAME>.json for import into Tableau
    Export {
        file: PathBuf,

        /// File name without extension (config theme_name by default)
        #[arg(short, long)]
        name: Option<String>,

        /// Target directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },

    /// Describe style elements, base themes and fonts
    Schema,

    /// List available palettes
    Palettes,

    /// Convert a color between hex, RGB and CMYK
    #[command(subcommand)]
    Convert(ConvertCommand),
}

/// The document being edited and where the result goes.
#[derive(Debug, Clone, Args)]
pub struct Target {
    /// Theme file to edit
    pub file: PathBuf,

    /// Write the result here instead of back to FILE
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConvertCommand {
    /// From a hex color such as #1f77b4
    Hex { value: String },

    /// From red, green and blue components (0-255)
    Rgb { r: u8, g: u8, b: u8 },

    /// From cyan, magenta, yellow and black percentages (0-100)
    Cmyk { c: f64, m: f64, y: f64, k: f64 },
}
