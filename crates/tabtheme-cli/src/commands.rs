//! Command handlers.
//!
//! Each handler does its work against a [`Session`] and returns a plain data
//! struct. The struct serializes for `--output json` and implements
//! [`Render`] for text output, so handlers never print.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use serde_json::Value;
use tabtheme::schema::{
    elements_by_category, is_base_theme, style_element, BASE_THEMES, FONTS, MAX_PATH_CHARS,
};
use tabtheme::{
    Attribute, Cmyk, NamedPalette, Rgb, ThemeDocument, ValidationReport, THEME_VERSION,
};

use crate::config::Config;
use crate::output::{styles, Render, TextMode};
use crate::session::{Session, Status};

// ─── Editing ────────────────────────────────────────────────────────────────

/// Result of any command that changed a document.
#[derive(Debug, Clone, Serialize)]
pub struct Edited {
    pub action: String,
    pub file: PathBuf,
    pub status: Status,
}

impl Render for Edited {
    fn render(&self, mode: TextMode) -> String {
        format!(
            "{} {}\n{}",
            mode.paint(&styles::title(), &self.action),
            mode.paint(&styles::muted(), format!("({})", self.file.display())),
            self.status.render(mode)
        )
    }
}

fn finish(session: &mut Session, out: Option<&Path>, action: String) -> anyhow::Result<Edited> {
    session.commit(out)?;
    let file = session
        .path()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Session has no file after saving"))?;
    Ok(Edited {
        action,
        file,
        status: session.status()?,
    })
}

/// Opens `file`, keeping JSON syntax failures apart from I/O failures.
fn open(file: &Path, config: &Config) -> anyhow::Result<Session> {
    Session::open(file, config.clone()).map_err(|err| {
        let context = if err.is_parse_error() {
            format!("{} is not a valid theme file", file.display())
        } else {
            format!("Cannot open {}", file.display())
        };
        anyhow::Error::new(err).context(context)
    })
}

fn known_element(element: &str) -> anyhow::Result<&'static tabtheme::StyleElementSpec> {
    style_element(element).ok_or_else(|| {
        anyhow!(
            "Unknown style element '{}'. Run `tabtheme schema` for the list",
            element
        )
    })
}

pub fn add(file: &Path, out: Option<&Path>, element: &str, config: &Config) -> anyhow::Result<Edited> {
    let spec = known_element(element)?;
    let mut session = open(file, config)?;
    session.document.ensure_element(spec.key);
    finish(&mut session, out, format!("Activated {}", spec.key))
}

/// Removes an element. Unknown or absent keys are accepted.
pub fn remove(
    file: &Path,
    out: Option<&Path>,
    element: &str,
    config: &Config,
) -> anyhow::Result<Edited> {
    let mut session = open(file, config)?;
    session.document.remove_element(element);
    finish(&mut session, out, format!("Removed {}", element))
}

/// Sets an attribute after checking the element accepts it and coercing the
/// text through the attribute's editor.
pub fn set(
    file: &Path,
    out: Option<&Path>,
    element: &str,
    attribute: &str,
    value: &str,
    config: &Config,
) -> anyhow::Result<Edited> {
    let spec = known_element(element)?;
    let attr = Attribute::from_name(attribute)
        .filter(|a| spec.accepts(*a))
        .ok_or_else(|| {
            let accepted: Vec<&str> = spec.attributes.iter().map(|a| a.as_str()).collect();
            anyhow!(
                "'{}' does not accept '{}'. Accepted: {}",
                element,
                attribute,
                accepted.join(", ")
            )
        })?;
    let coerced = attr
        .editor_kind()
        .coerce(value)
        .map_err(|msg| anyhow!("Invalid value for {}: {}", attr, msg))?;

    let mut session = open(file, config)?;
    session
        .document
        .set_attribute(spec.key, attr.as_str(), coerced.clone());
    finish(
        &mut session,
        out,
        format!("Set {}.{} = {}", spec.key, attr, coerced),
    )
}

pub fn unset(
    file: &Path,
    out: Option<&Path>,
    element: &str,
    attribute: &str,
    config: &Config,
) -> anyhow::Result<Edited> {
    let mut session = open(file, config)?;
    let action = match session.document.remove_attribute(element, attribute) {
        Some(_) => format!("Removed {}.{}", element, attribute),
        None => format!("{}.{} was not set", element, attribute),
    };
    finish(&mut session, out, action)
}

pub fn base(file: &Path, out: Option<&Path>, theme: &str, config: &Config) -> anyhow::Result<Edited> {
    if !is_base_theme(theme) {
        let ids: Vec<&str> = BASE_THEMES.iter().map(|t| t.id).collect();
        bail!("Unknown base theme '{}'. Valid options: {}", theme, ids.join(", "));
    }
    let mut session = open(file, config)?;
    session.document.set_base_theme(theme);
    finish(&mut session, out, format!("Base theme set to {}", theme))
}

pub fn palette(file: &Path, out: Option<&Path>, name: &str, config: &Config) -> anyhow::Result<Edited> {
    let mut session = open(file, config)?;
    let colors = session.palette(name).ok_or_else(|| {
        let names: Vec<String> = session
            .config()
            .palettes()
            .into_iter()
            .map(|p| p.name)
            .collect();
        anyhow!("Unknown palette '{}'. Available: {}", name, names.join(", "))
    })?;
    tabtheme::apply_palette(&mut session.document, &colors);
    finish(&mut session, out, format!("Applied palette {}", name))
}

/// Replaces the document wholesale. `source` of `None` or `-` reads stdin.
///
/// Nothing is written when the new text does not parse.
pub fn replace(
    file: &Path,
    out: Option<&Path>,
    source: Option<&Path>,
    config: &Config,
) -> anyhow::Result<Edited> {
    let text = match source {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?,
        _ => std::io::read_to_string(std::io::stdin()).context("Cannot read stdin")?,
    };
    replace_with(file, out, &text, config)
}

pub fn replace_with(
    file: &Path,
    out: Option<&Path>,
    text: &str,
    config: &Config,
) -> anyhow::Result<Edited> {
    let mut session = open(file, config)?;
    session
        .document
        .replace_from_str(text)
        .context("Replacement rejected, document left unchanged")?;
    finish(&mut session, out, "Replaced document".to_string())
}

// ─── New ────────────────────────────────────────────────────────────────────

/// A new document. Written to a file, or returned for printing.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum NewTheme {
    Saved(Edited),
    Printed(ThemeDocument),
}

impl Render for NewTheme {
    fn render(&self, mode: TextMode) -> String {
        match self {
            NewTheme::Saved(edited) => edited.render(mode),
            NewTheme::Printed(doc) => doc.to_string(),
        }
    }
}

pub fn new_theme(
    palette: Option<&str>,
    out: Option<&Path>,
    config: &Config,
) -> anyhow::Result<NewTheme> {
    let mut session = Session::new(config.clone());
    let mut action = "Created default theme".to_string();
    if let Some(name) = palette {
        let colors = session
            .palette(name)
            .ok_or_else(|| anyhow!("Unknown palette '{}'", name))?;
        tabtheme::apply_palette(&mut session.document, &colors);
        action = format!("Created theme from palette {}", name);
    }
    match out {
        Some(path) => Ok(NewTheme::Saved(finish(&mut session, Some(path), action)?)),
        None => Ok(NewTheme::Printed(session.document)),
    }
}

// ─── Validate ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Validated {
    pub file: PathBuf,
    pub report: ValidationReport,
    pub size: usize,
    pub size_limit: usize,
}

impl Validated {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }
}

impl Render for Validated {
    fn render(&self, mode: TextMode) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", mode.paint(&styles::title(), self.file.display()));

        if !self.report.errors.is_empty() {
            let header = format!("{} error(s)", self.report.errors.len());
            let _ = writeln!(out, "{}", mode.paint(&styles::error(), header));
            for message in self.report.error_messages() {
                let _ = writeln!(out, "  • {}", message);
            }
        }
        if !self.report.warnings.is_empty() {
            let header = format!("{} warning(s)", self.report.warnings.len());
            let _ = writeln!(out, "{}", mode.paint(&styles::warning(), header));
            for message in self.report.warning_messages() {
                let _ = writeln!(out, "  • {}", message);
            }
        }
        if self.report.is_clean() {
            let _ = writeln!(out, "{}", mode.paint(&styles::success(), "Theme valid"));
        }
        out.push_str(&size_caption(self.size, self.size_limit, mode));
        out
    }
}

fn size_caption(size: usize, limit: usize, mode: TextMode) -> String {
    if size > limit {
        mode.paint(
            &styles::error(),
            format!("File too large: {} bytes (max: {})", size, limit),
        )
    } else {
        mode.paint(&styles::muted(), format!("File size: {} bytes", size))
    }
}

pub fn validate(file: &Path, config: &Config) -> anyhow::Result<Validated> {
    let session = open(file, config)?;
    let report = session.validate();
    log::info!(
        "{}: {} error(s), {} warning(s)",
        file.display(),
        report.errors.len(),
        report.warnings.len()
    );
    Ok(Validated {
        file: file.to_path_buf(),
        report,
        size: session.document.byte_size()?,
        size_limit: config.size_limit,
    })
}

// ─── Show ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Shown {
    pub file: PathBuf,
    pub version: Option<Value>,
    pub base_theme: String,
    pub categories: Vec<CategoryView>,
    /// Keys under `styles` that are not recognized elements.
    pub unknown: Vec<String>,
    pub status: Status,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub category: &'static str,
    pub elements: Vec<ElementView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ElementView {
    pub key: &'static str,
    pub name: &'static str,
    /// Present under `styles`, possibly empty.
    pub present: bool,
    /// Present with at least one attribute.
    pub active: bool,
    pub attributes: Vec<AttributeView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeView {
    pub name: &'static str,
    pub label: String,
    /// `None` when unset.
    pub value: Option<Value>,
}

impl Render for Shown {
    fn render(&self, mode: TextMode) -> String {
        let mut out = String::new();
        let version = self
            .version
            .as_ref()
            .map(display_json)
            .unwrap_or_else(|| "missing".to_string());
        let _ = writeln!(
            out,
            "{}  version {}  base theme {}",
            mode.paint(&styles::title(), self.file.display()),
            version,
            self.base_theme
        );

        for group in &self.categories {
            let _ = writeln!(out, "\n{}", mode.paint(&styles::title(), group.category));
            for element in &group.elements {
                let marker = match (element.active, element.present) {
                    (true, _) => mode.paint(&styles::success(), "●"),
                    (false, true) => mode.paint(&styles::warning(), "◌"),
                    (false, false) => mode.paint(&styles::muted(), "○"),
                };
                let _ = writeln!(
                    out,
                    "  {} {} {}",
                    marker,
                    mode.paint(&styles::key(), element.key),
                    mode.paint(&styles::muted(), element.name)
                );
                if !element.active {
                    continue;
                }
                for attr in &element.attributes {
                    let value = match &attr.value {
                        Some(v) => display_json(v),
                        None => mode.paint(&styles::muted(), "-"),
                    };
                    let _ = writeln!(out, "      {:<18} {}", attr.label, value);
                }
            }
        }

        if !self.unknown.is_empty() {
            let _ = writeln!(
                out,
                "\n{} {}",
                mode.paint(&styles::warning(), "Unrecognized:"),
                self.unknown.join(", ")
            );
        }
        let _ = write!(out, "\n{}", self.status.render(mode));
        out
    }
}

fn display_json(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn show(file: &Path, config: &Config) -> anyhow::Result<Shown> {
    let session = open(file, config)?;
    let doc = &session.document;

    let categories = elements_by_category()
        .into_iter()
        .map(|(category, specs)| CategoryView {
            category: category.as_str(),
            elements: specs
                .into_iter()
                .map(|spec| {
                    let props = doc.element(spec.key);
                    ElementView {
                        key: spec.key,
                        name: spec.name,
                        present: doc.styles().is_some_and(|s| s.contains_key(spec.key)),
                        active: doc.is_active(spec.key),
                        attributes: spec
                            .attributes
                            .iter()
                            .map(|attr| AttributeView {
                                name: attr.as_str(),
                                label: attr.label(),
                                value: props.and_then(|p| p.get(attr.as_str())).cloned(),
                            })
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect();

    let unknown = doc
        .elements()
        .map(|(key, _)| key)
        .filter(|key| style_element(key).is_none())
        .map(str::to_string)
        .collect();

    Ok(Shown {
        file: file.to_path_buf(),
        version: doc.version().cloned(),
        base_theme: doc.base_theme().to_string(),
        categories,
        unknown,
        status: session.status()?,
    })
}

// ─── Export ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Exported {
    pub path: PathBuf,
    pub size: usize,
    pub size_limit: usize,
    pub path_too_long: bool,
    pub status: Status,
}

impl Render for Exported {
    fn render(&self, mode: TextMode) -> String {
        let mut out = format!(
            "{} {}\n{}",
            mode.paint(&styles::title(), "Exported"),
            self.path.display(),
            size_caption(self.size, self.size_limit, mode)
        );
        if self.path_too_long {
            let _ = write!(
                out,
                "\n{}",
                mode.paint(
                    &styles::warning(),
                    format!("Path is longer than {} characters; Tableau may refuse it", MAX_PATH_CHARS)
                )
            );
        }
        let _ = write!(out, "\n{}", self.status.render(mode));
        out
    }
}

/// Writes `<name>.json` into `dir`. Size and path length are advisory only.
pub fn export(
    file: &Path,
    name: Option<&str>,
    dir: &Path,
    config: &Config,
) -> anyhow::Result<Exported> {
    let name = name.unwrap_or(&config.theme_name).trim();
    if name.is_empty() || name.contains(['/', '\\']) {
        bail!("Theme name '{}' must be a plain file name", name);
    }

    let mut session = open(file, config)?;
    let path = dir.join(format!("{}.json", name));
    let size = session.save_to(&path)?;
    let path_too_long = path.to_string_lossy().chars().count() > MAX_PATH_CHARS;
    if path_too_long {
        log::warn!("{} exceeds {} characters", path.display(), MAX_PATH_CHARS);
    }

    Ok(Exported {
        path,
        size,
        size_limit: session.config().size_limit,
        path_too_long,
        status: session.status()?,
    })
}

// ─── Schema ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SchemaDoc {
    pub version: &'static str,
    pub size_limit: usize,
    pub base_themes: Vec<BaseThemeView>,
    pub categories: Vec<SchemaCategory>,
    pub fonts: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct BaseThemeView {
    pub id: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaCategory {
    pub category: &'static str,
    pub elements: Vec<SchemaElement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaElement {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub attributes: Vec<&'static str>,
}

impl Render for SchemaDoc {
    fn render(&self, mode: TextMode) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} (version {}, keep files under {} bytes)",
            mode.paint(&styles::title(), "Tableau custom themes"),
            self.version,
            self.size_limit
        );

        let _ = writeln!(out, "\n{}", mode.paint(&styles::title(), "Base themes"));
        for theme in &self.base_themes {
            let _ = writeln!(
                out,
                "  {:<10} {}",
                mode.paint(&styles::key(), theme.id),
                theme.description
            );
        }

        for group in &self.categories {
            let _ = writeln!(out, "\n{}", mode.paint(&styles::title(), group.category));
            for element in &group.elements {
                let _ = writeln!(
                    out,
                    "  {} {}",
                    mode.paint(&styles::key(), element.key),
                    mode.paint(&styles::muted(), element.description)
                );
                let _ = writeln!(out, "      {}", element.attributes.join(", "));
            }
        }

        let _ = writeln!(out, "\n{}", mode.paint(&styles::title(), "Fonts"));
        let _ = write!(out, "  {}", self.fonts.join(", "));
        out
    }
}

pub fn schema(config: &Config) -> SchemaDoc {
    SchemaDoc {
        version: THEME_VERSION,
        size_limit: config.size_limit,
        base_themes: BASE_THEMES
            .iter()
            .map(|t| BaseThemeView {
                id: t.id,
                description: t.description,
            })
            .collect(),
        categories: elements_by_category()
            .into_iter()
            .map(|(category, specs)| SchemaCategory {
                category: category.as_str(),
                elements: specs
                    .into_iter()
                    .map(|spec| SchemaElement {
                        key: spec.key,
                        name: spec.name,
                        description: spec.description,
                        attributes: spec.attributes.iter().map(|a| a.as_str()).collect(),
                    })
                    .collect(),
            })
            .collect(),
        fonts: FONTS,
    }
}

// ─── Palettes ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PaletteList {
    pub palettes: Vec<NamedPalette>,
}

impl Render for PaletteList {
    fn render(&self, mode: TextMode) -> String {
        self.palettes
            .iter()
            .map(|p| {
                format!(
                    "{:<18} {}  {}  {}  {}",
                    mode.paint(&styles::key(), &p.name),
                    p.colors.primary,
                    p.colors.secondary,
                    p.colors.accent,
                    p.colors.background
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn palettes(config: &Config) -> PaletteList {
    PaletteList {
        palettes: config.palettes(),
    }
}

// ─── Convert ────────────────────────────────────────────────────────────────

/// One color in all three notations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Converted {
    pub hex: String,
    pub rgb: [u8; 3],
    pub cmyk: [f64; 4],
}

impl From<Rgb> for Converted {
    fn from(rgb: Rgb) -> Self {
        let cmyk = rgb.to_cmyk();
        Self {
            hex: rgb.to_hex(),
            rgb: [rgb.0, rgb.1, rgb.2],
            cmyk: [cmyk.c, cmyk.m, cmyk.y, cmyk.k],
        }
    }
}

impl Render for Converted {
    fn render(&self, mode: TextMode) -> String {
        let [r, g, b] = self.rgb;
        let [c, m, y, k] = self.cmyk;
        format!(
            "{}  {}\n{}  {}\n{} {}",
            mode.paint(&styles::muted(), "hex "),
            self.hex,
            mode.paint(&styles::muted(), "rgb "),
            Rgb(r, g, b),
            mode.paint(&styles::muted(), "cmyk"),
            Cmyk::new(c, m, y, k)
        )
    }
}

pub fn convert_hex(value: &str) -> anyhow::Result<Converted> {
    Ok(Rgb::from_hex(value)?.into())
}

pub fn convert_rgb(r: u8, g: u8, b: u8) -> Converted {
    Rgb(r, g, b).into()
}

/// CMYK goes through RGB, so the reported CMYK is the rounded round trip.
pub fn convert_cmyk(c: f64, m: f64, y: f64, k: f64) -> Converted {
    Cmyk::new(c, m, y, k).to_rgb().into()
}
