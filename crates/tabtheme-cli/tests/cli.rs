//! End-to-end tests for command handlers against real files.

use std::path::{Path, PathBuf};

use clap::Parser;
use serial_test::serial;
use tabtheme::ThemeDocument;
use tabtheme_cli::cli::Cli;
use tabtheme_cli::commands::{self, NewTheme};
use tabtheme_cli::config::Config;
use tabtheme_cli::output::{render_output, OutputMode};
use tempfile::TempDir;

fn fresh_theme(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("theme.json");
    ThemeDocument::new().write_to(&path).unwrap();
    path
}

fn reload(path: &Path) -> ThemeDocument {
    ThemeDocument::from_file(path).unwrap()
}

// =========================================================================
// Editing commands
// =========================================================================

#[test]
fn test_new_with_palette_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("new.json");
    let result = commands::new_theme(Some("financial green"), Some(out.as_path()), &Config::default()).unwrap();

    match result {
        NewTheme::Saved(edited) => assert!(edited.status.valid),
        NewTheme::Printed(_) => panic!("expected a saved theme"),
    }
    let doc = reload(&out);
    assert_eq!(doc.element("mark").unwrap()["mark-color"], "#1ABC9C");
}

#[test]
fn test_new_without_out_prints_document() {
    let result = commands::new_theme(None, None, &Config::default()).unwrap();
    let json = render_output(&result, OutputMode::Json).unwrap();
    let parsed = ThemeDocument::from_json_str(&json).unwrap();
    assert_eq!(parsed, ThemeDocument::new());
}

#[test]
fn test_set_coerces_and_rejects() {
    let dir = tempfile::tempdir().unwrap();
    let path = fresh_theme(&dir);
    let config = Config::default();

    commands::set(&path, None, "dashboard-title", "font-size", "150", &config).unwrap();
    commands::set(&path, None, "mark", "mark-color", "ff6b35", &config).unwrap();
    let doc = reload(&path);
    assert_eq!(doc.element("dashboard-title").unwrap()["font-size"], 99);
    assert_eq!(doc.element("mark").unwrap()["mark-color"], "#ff6b35");

    // mark has no font attributes
    assert!(commands::set(&path, None, "mark", "font-size", "10", &config).is_err());
    assert!(commands::set(&path, None, "gridline", "line-pattern", "wavy", &config).is_err());
    assert!(commands::set(&path, None, "nonsense", "font-size", "10", &config).is_err());
    assert_eq!(reload(&path), doc);
}

#[test]
fn test_add_remove_unset() {
    let dir = tempfile::tempdir().unwrap();
    let path = fresh_theme(&dir);
    let config = Config::default();

    commands::add(&path, None, "tooltip", &config).unwrap();
    let doc = reload(&path);
    assert!(doc.element("tooltip").unwrap().is_empty());
    assert!(!doc.is_active("tooltip"));

    let edited = commands::unset(&path, None, "worksheet", "font-size", &config).unwrap();
    assert_eq!(edited.action, "Removed worksheet.font-size");
    assert!(reload(&path).element("worksheet").unwrap().get("font-size").is_none());

    commands::remove(&path, None, "tooltip", &config).unwrap();
    commands::remove(&path, None, "tooltip", &config).unwrap();
    assert!(reload(&path).element("tooltip").is_none());
}

#[test]
fn test_out_leaves_source_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = fresh_theme(&dir);
    let out = dir.path().join("copy.json");

    commands::base(&path, Some(out.as_path()), "classic", &Config::default()).unwrap();
    assert_eq!(reload(&path).base_theme(), "smooth");
    assert_eq!(reload(&out).base_theme(), "classic");
}

#[test]
fn test_base_rejects_unknown_theme() {
    let dir = tempfile::tempdir().unwrap();
    let path = fresh_theme(&dir);
    let err = commands::base(&path, None, "retro", &Config::default()).unwrap_err();
    assert!(err.to_string().contains("Valid options: smooth, clean, modern, classic"));
}

#[test]
fn test_palette_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = fresh_theme(&dir);
    let config = Config::from_yaml(
        "palettes:\n  - name: Ocean\n    primary: '#000001'\n    secondary: '#000002'\n    accent: '#000003'\n    background: '#000004'\n",
    )
    .unwrap();

    commands::palette(&path, None, "ocean", &config).unwrap();
    let doc = reload(&path);
    assert_eq!(doc.element("story-title").unwrap()["font-color"], "#000001");
    assert_eq!(doc.element("view").unwrap()["background-color"], "#000004");

    assert!(commands::palette(&path, None, "Ocean", &Config::default()).is_err());
}

#[test]
fn test_replace_rejects_bad_json_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = fresh_theme(&dir);
    let config = Config::default();
    let before = std::fs::read_to_string(&path).unwrap();

    assert!(commands::replace_with(&path, None, "{ not json", &config).is_err());
    assert!(commands::replace_with(&path, None, "[1, 2]", &config).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);

    let edited = commands::replace_with(&path, None, r#"{"styles": {}}"#, &config).unwrap();
    assert!(!edited.status.valid);
    assert_eq!(edited.status.errors, 1);
    assert!(reload(&path).version().is_none());
}

#[test]
fn test_replace_from_file_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = fresh_theme(&dir);
    let source = dir.path().join("source.json");
    std::fs::write(&source, r#"{"version": "1.0.0", "styles": {"mark": {}}}"#).unwrap();

    commands::replace(&path, None, Some(source.as_path()), &Config::default()).unwrap();
    let doc = reload(&path);
    assert!(doc.element("all").is_none());
    assert!(doc.element("mark").is_some());
}

// =========================================================================
// Read-only commands
// =========================================================================

#[test]
fn test_validate_reports_problems() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"version": "2.0", "styles": {"mark": {"mark-color": "red"}, "sparkline": {}}}"#,
    )
    .unwrap();

    let validated = commands::validate(&path, &Config::default()).unwrap();
    assert!(!validated.is_valid());
    assert_eq!(validated.report.errors.len(), 1);
    assert_eq!(validated.report.warnings.len(), 2);

    let json: serde_json::Value =
        serde_json::from_str(&render_output(&validated, OutputMode::Json).unwrap()).unwrap();
    assert_eq!(json["report"]["valid"], false);
    assert_eq!(json["size_limit"], 15_000);
}

#[test]
fn test_validate_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(commands::validate(&dir.path().join("none.json"), &Config::default()).is_err());
}

#[test]
fn test_show_groups_elements() {
    let dir = tempfile::tempdir().unwrap();
    let path = fresh_theme(&dir);
    commands::add(&path, None, "tooltip", &Config::default()).unwrap();

    let shown = commands::show(&path, &Config::default()).unwrap();
    let elements: Vec<_> = shown.categories.iter().flat_map(|c| &c.elements).collect();
    assert_eq!(elements.len(), 20);

    let all = elements.iter().find(|e| e.key == "all").unwrap();
    assert!(all.active);
    assert_eq!(all.attributes[0].value, Some("#000000".into()));

    let tooltip = elements.iter().find(|e| e.key == "tooltip").unwrap();
    assert!(tooltip.present);
    assert!(!tooltip.active);

    let text = render_output(&shown, OutputMode::Text).unwrap();
    assert!(text.contains("Global"));
    assert!(text.contains("Tableau Regular"));
}

#[test]
fn test_export_uses_config_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = fresh_theme(&dir);
    let target = tempfile::tempdir().unwrap();
    let config = Config::from_yaml("theme_name: brand\nsize_limit: 10\n").unwrap();

    let exported = commands::export(&path, None, target.path(), &config).unwrap();
    assert_eq!(exported.path, target.path().join("brand.json"));
    assert!(exported.size > exported.size_limit);
    assert!(!exported.path_too_long);
    assert_eq!(reload(&exported.path), reload(&path));

    let text = render_output(&exported, OutputMode::Text).unwrap();
    assert!(text.contains("File too large"));

    assert!(commands::export(&path, Some("a/b"), target.path(), &config).is_err());
}

#[test]
fn test_convert_outputs_all_notations() {
    let converted = commands::convert_hex("#FF6B35").unwrap();
    assert_eq!(converted.hex, "#ff6b35");
    assert_eq!(converted.rgb, [255, 107, 53]);
    assert_eq!(converted.cmyk, [0.0, 58.0, 79.0, 0.0]);
}

#[test]
fn test_set_rejects_overlong_font_family() {
    let dir = tempfile::tempdir().unwrap();
    let path = fresh_theme(&dir);
    let config = Config::default();
    let before = reload(&path);

    let err = commands::set(&path, None, "all", "font-family", &"F".repeat(60), &config)
        .unwrap_err();
    assert!(err.to_string().contains("font-family"));
    assert_eq!(reload(&path), before);

    let edited = commands::set(&path, None, "all", "font-family", &"F".repeat(50), &config).unwrap();
    assert!(edited.status.valid);
    assert!(commands::validate(&path, &config).unwrap().report.is_clean());
}

#[test]
fn test_open_separates_syntax_from_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();

    let err = commands::validate(&broken, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("is not a valid theme file"));

    let err = commands::validate(&dir.path().join("none.json"), &Config::default()).unwrap_err();
    assert!(err.to_string().starts_with("Cannot open"));
}

#[test]
fn test_show_marks_non_object_element_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theme.json");
    std::fs::write(&path, r#"{"version": "1.0.0", "styles": {"mark": "red"}}"#).unwrap();

    let shown = commands::show(&path, &Config::default()).unwrap();
    let mark = shown
        .categories
        .iter()
        .flat_map(|c| &c.elements)
        .find(|e| e.key == "mark")
        .unwrap();
    assert!(mark.present);
    assert!(!mark.active);
    assert!(!shown.status.valid);
}

#[test]
fn test_show_labels_attributes() {
    let dir = tempfile::tempdir().unwrap();
    let path = fresh_theme(&dir);

    let shown = commands::show(&path, &Config::default()).unwrap();
    let text = render_output(&shown, OutputMode::Text).unwrap();
    assert!(text.contains("Font Family"));
}

// =========================================================================
// Environment
// =========================================================================

#[test]
#[serial]
fn test_config_path_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("tabtheme.yaml");
    std::fs::write(&config_path, "theme_name: from_env\n").unwrap();

    std::env::set_var("TABTHEME_CONFIG", &config_path);
    let cli = Cli::try_parse_from(["tabtheme", "palettes"]).unwrap();
    std::env::remove_var("TABTHEME_CONFIG");

    assert_eq!(cli.config.as_deref(), Some(config_path.as_path()));
    let config = Config::load(cli.config.as_deref()).unwrap();
    assert_eq!(config.theme_name, "from_env");
}

#[test]
#[serial]
fn test_config_flag_without_env() {
    std::env::remove_var("TABTHEME_CONFIG");
    let cli = Cli::try_parse_from(["tabtheme", "schema"]).unwrap();
    assert!(cli.config.is_none());
}
