//! User configuration loading from `~/.sidediff/config.toml`.

use crate::diff::{DiffAlgorithm, DiffOptions};
use crate::domain::ViewMode;
use crate::ui::theme::ThemePalette;
use anyhow::{Context, Result, anyhow};
use ratatui::style::Color;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".sidediff";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "sidediff.log";

const DEFAULT_CONFIG_TOML: &str = r##"# sidediff configuration
# Colors accept `#RRGGBB` or named ANSI colors (e.g. "yellow", "dark_gray").

[view]
# "side-by-side" or "inline"
mode = "side-by-side"
ignore_whitespace = false
ignore_case = false
# "myers", "patience", or "lcs"
algorithm = "myers"

[theme]
border = "#c47832"
title = "#ebaa5a"
dim = "dark_gray"
text = "#d2d2c8"
selected_fg = "black"
selected_bg = "#e2b45c"
error = "red"
info = "cyan"
line_number = "dark_gray"
insert_fg = "#96dc6e"
delete_fg = "#e67878"
insert_bg = "#183608"
delete_bg = "#360808"
gap_bg = "#101010"
search_match = "yellow"
"##;

/// Application configuration loaded from disk.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub theme: ThemePalette,
    pub view: ViewConfig,
}

/// Default presentation and comparison settings.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ViewConfig {
    pub mode: ViewMode,
    pub diff: DiffOptions,
}

/// Returns the config file path and creates default config if missing.
pub fn ensure_config_file() -> Result<PathBuf> {
    let path = config_path()?;
    ensure_default_config(&path)?;
    Ok(path)
}

/// Loads configuration from `~/.sidediff/config.toml`, creating defaults if missing.
pub fn load_or_create() -> Result<AppConfig> {
    let path = ensure_config_file()?;
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;

    parse_config(&content).with_context(|| format!("invalid config in {}", path.display()))
}

/// Returns the log file path next to the config file.
pub fn log_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(LOG_FILE))
}

fn parse_config(content: &str) -> Result<AppConfig> {
    let raw: RawConfig = toml::from_str(content).context("failed to parse TOML")?;
    Ok(AppConfig {
        theme: raw.theme.into_theme()?,
        view: raw.view.into_view()?,
    })
}

fn config_dir() -> Result<PathBuf> {
    let home =
        env::var_os("HOME").ok_or_else(|| anyhow!("HOME environment variable is not set"))?;
    Ok(PathBuf::from(home).join(CONFIG_DIR))
}

fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

fn ensure_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("invalid config path: {}", path.display()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write default config file {}", path.display()))?;
    log::info!("wrote default config to {}", path.display());
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    theme: RawTheme,
    view: RawView,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawView {
    mode: Option<String>,
    ignore_whitespace: Option<bool>,
    ignore_case: Option<bool>,
    algorithm: Option<String>,
}

impl RawView {
    fn into_view(self) -> Result<ViewConfig> {
        let mode = match self.mode.as_deref().map(str::trim) {
            None | Some("side-by-side") | Some("side_by_side") => ViewMode::SideBySide,
            Some("inline") | Some("unified") => ViewMode::Inline,
            Some(other) => return Err(anyhow!("unsupported value for `view.mode`: {other}")),
        };
        let algorithm = match self.algorithm {
            Some(raw) => DiffAlgorithm::parse(&raw)
                .ok_or_else(|| anyhow!("unsupported value for `view.algorithm`: {raw}"))?,
            None => DiffAlgorithm::default(),
        };

        Ok(ViewConfig {
            mode,
            diff: DiffOptions {
                ignore_whitespace: self.ignore_whitespace.unwrap_or(false),
                ignore_case: self.ignore_case.unwrap_or(false),
                algorithm,
            },
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawTheme {
    border: Option<String>,
    title: Option<String>,
    dim: Option<String>,
    text: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    error: Option<String>,
    info: Option<String>,
    line_number: Option<String>,
    insert_fg: Option<String>,
    delete_fg: Option<String>,
    insert_bg: Option<String>,
    delete_bg: Option<String>,
    gap_bg: Option<String>,
    search_match: Option<String>,
}

impl RawTheme {
    fn into_theme(self) -> Result<ThemePalette> {
        let defaults = ThemePalette::default();

        Ok(ThemePalette {
            border: parse_or_default(self.border, defaults.border, "theme.border")?,
            title: parse_or_default(self.title, defaults.title, "theme.title")?,
            dim: parse_or_default(self.dim, defaults.dim, "theme.dim")?,
            text: parse_or_default(self.text, defaults.text, "theme.text")?,
            selected_fg: parse_or_default(
                self.selected_fg,
                defaults.selected_fg,
                "theme.selected_fg",
            )?,
            selected_bg: parse_or_default(
                self.selected_bg,
                defaults.selected_bg,
                "theme.selected_bg",
            )?,
            error: parse_or_default(self.error, defaults.error, "theme.error")?,
            info: parse_or_default(self.info, defaults.info, "theme.info")?,
            line_number: parse_or_default(
                self.line_number,
                defaults.line_number,
                "theme.line_number",
            )?,
            insert_fg: parse_or_default(self.insert_fg, defaults.insert_fg, "theme.insert_fg")?,
            delete_fg: parse_or_default(self.delete_fg, defaults.delete_fg, "theme.delete_fg")?,
            insert_bg: parse_or_default(self.insert_bg, defaults.insert_bg, "theme.insert_bg")?,
            delete_bg: parse_or_default(self.delete_bg, defaults.delete_bg, "theme.delete_bg")?,
            gap_bg: parse_or_default(self.gap_bg, defaults.gap_bg, "theme.gap_bg")?,
            search_match: parse_or_default(
                self.search_match,
                defaults.search_match,
                "theme.search_match",
            )?,
        })
    }
}

fn parse_or_default(value: Option<String>, default: Color, field: &str) -> Result<Color> {
    match value {
        Some(raw) => parse_color(raw.trim())
            .with_context(|| format!("invalid color value for `{field}`: {raw}")),
        None => Ok(default),
    }
}

fn parse_color(raw: &str) -> Result<Color> {
    if let Some(hex) = raw.strip_prefix('#') {
        if hex.len() != 6 {
            return Err(anyhow!("hex colors must be in #RRGGBB format"));
        }
        let red = u8::from_str_radix(&hex[0..2], 16).context("invalid red hex channel")?;
        let green = u8::from_str_radix(&hex[2..4], 16).context("invalid green hex channel")?;
        let blue = u8::from_str_radix(&hex[4..6], 16).context("invalid blue hex channel")?;
        return Ok(Color::Rgb(red, green, blue));
    }

    let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    let color = match normalized.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" => Color::DarkGray,
        "light_red" => Color::LightRed,
        "light_green" => Color::LightGreen,
        "light_yellow" => Color::LightYellow,
        "light_blue" => Color::LightBlue,
        "light_magenta" => Color::LightMagenta,
        "light_cyan" => Color::LightCyan,
        "white" => Color::White,
        _ => return Err(anyhow!("unsupported color format")),
    };

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_CONFIG_TOML, parse_color, parse_config};
    use crate::diff::DiffAlgorithm;
    use crate::domain::ViewMode;
    use crate::ui::theme::ThemePalette;
    use ratatui::style::Color;

    #[test]
    fn parse_color_supports_hex() {
        assert_eq!(
            parse_color("#112233").unwrap(),
            Color::Rgb(0x11, 0x22, 0x33)
        );
    }

    #[test]
    fn parse_color_supports_named_values() {
        assert_eq!(parse_color("light_yellow").unwrap(), Color::LightYellow);
        assert_eq!(parse_color("dark-gray").unwrap(), Color::DarkGray);
    }

    #[test]
    fn default_config_matches_builtin_palette() {
        let config = parse_config(DEFAULT_CONFIG_TOML).unwrap();

        assert_eq!(config.theme, ThemePalette::default());
        assert_eq!(config.view.mode, ViewMode::SideBySide);
        assert_eq!(config.view.diff.algorithm, DiffAlgorithm::Myers);
        assert!(!config.view.diff.ignore_whitespace);
    }

    #[test]
    fn view_section_overrides_defaults() {
        let config = parse_config(
            "[view]\nmode = \"inline\"\nignore_case = true\nalgorithm = \"patience\"\n",
        )
        .unwrap();

        assert_eq!(config.view.mode, ViewMode::Inline);
        assert!(config.view.diff.ignore_case);
        assert_eq!(config.view.diff.algorithm, DiffAlgorithm::Patience);
    }

    #[test]
    fn unknown_view_values_are_rejected() {
        assert!(parse_config("[view]\nmode = \"diagonal\"\n").is_err());
        assert!(parse_config("[view]\nalgorithm = \"histogram\"\n").is_err());
        assert!(parse_config("[theme]\nborder = \"#12\"\n").is_err());
    }
}
