//! Shared styles for the TUI.

use crate::render::highlight::HighlightRole;
use ratatui::style::{Color, Modifier, Style};
use std::sync::{OnceLock, RwLock};

/// Runtime theme palette used by the renderer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ThemePalette {
    pub border: Color,
    pub title: Color,
    pub dim: Color,
    pub text: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub error: Color,
    pub info: Color,
    pub line_number: Color,
    pub insert_fg: Color,
    pub delete_fg: Color,
    pub insert_bg: Color,
    pub delete_bg: Color,
    pub gap_bg: Color,
    pub search_match: Color,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            border: Color::Rgb(196, 120, 50),
            title: Color::Rgb(235, 170, 90),
            dim: Color::DarkGray,
            text: Color::Rgb(210, 210, 200),
            selected_fg: Color::Black,
            selected_bg: Color::Rgb(226, 180, 92),
            error: Color::Red,
            info: Color::Cyan,
            line_number: Color::DarkGray,
            insert_fg: Color::Rgb(150, 220, 110),
            delete_fg: Color::Rgb(230, 120, 120),
            insert_bg: Color::Rgb(24, 54, 8),
            delete_bg: Color::Rgb(54, 8, 8),
            gap_bg: Color::Rgb(16, 16, 16),
            search_match: Color::Yellow,
        }
    }
}

static ACTIVE_THEME: OnceLock<RwLock<ThemePalette>> = OnceLock::new();

fn store() -> &'static RwLock<ThemePalette> {
    ACTIVE_THEME.get_or_init(|| RwLock::new(ThemePalette::default()))
}

fn with_palette<T>(f: impl FnOnce(&ThemePalette) -> T) -> T {
    match store().read() {
        Ok(guard) => f(&guard),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}

/// Installs the active runtime theme palette.
pub fn apply(palette: ThemePalette) {
    if let Ok(mut guard) = store().write() {
        *guard = palette;
    }
}

pub fn border() -> Style {
    with_palette(|theme| Style::default().fg(theme.border))
}

pub fn title() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD)
    })
}

pub fn dim() -> Style {
    with_palette(|theme| Style::default().fg(theme.dim))
}

pub fn text() -> Style {
    with_palette(|theme| Style::default().fg(theme.text))
}

pub fn selected() -> Style {
    with_palette(|theme| Style::default().fg(theme.selected_fg).bg(theme.selected_bg))
}

pub fn error() -> Style {
    with_palette(|theme| Style::default().fg(theme.error))
}

pub fn info() -> Style {
    with_palette(|theme| Style::default().fg(theme.info))
}

pub fn line_number() -> Style {
    with_palette(|theme| Style::default().fg(theme.line_number))
}

pub fn insert_line() -> Style {
    with_palette(|theme| Style::default().fg(theme.insert_fg))
}

pub fn delete_line() -> Style {
    with_palette(|theme| Style::default().fg(theme.delete_fg))
}

pub fn gap() -> Style {
    with_palette(|theme| Style::default().fg(theme.dim).bg(theme.gap_bg))
}

pub fn search_match() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.search_match)
            .add_modifier(Modifier::BOLD)
    })
}

/// Background for word-level highlights; fixed per role.
pub fn highlight_bg(role: HighlightRole) -> Color {
    with_palette(|theme| match role {
        HighlightRole::Insert => theme.insert_bg,
        HighlightRole::Delete => theme.delete_bg,
    })
}
