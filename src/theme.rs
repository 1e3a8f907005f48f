use ratatui::style::{Color, Modifier, Style};

use crate::storage::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    /// Only an explicit `"light"` selects light mode.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(THEME_KEY).as_deref() {
            Some("light") => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// Toggle button glyph: what clicking it would switch to.
    pub fn indicator(self) -> &'static str {
        match self {
            ThemeMode::Dark => "☀️",
            ThemeMode::Light => "🌙",
        }
    }

    pub fn save(self, store: &mut dyn KeyValueStore) {
        if let Err(e) = store.set(THEME_KEY, self.as_str()) {
            tracing::warn!(error = %e, "failed to persist theme");
        }
    }
}

pub struct Theme {
    pub root_bg: Color,
    pub focus_border: Color,
    pub blurred_border: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub text_highlight: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Specific components
    pub title: Style,
    pub card_number: Style,
    pub card_text: Style,
    pub copied_badge: Style,
    pub result_info: Style,
    pub history_item: Style,
    pub footer: Style,
    pub toast: Style,
    pub popup_border: Style,
    pub decoration: Style,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::default(),
            ThemeMode::Light => Self::light(),
        }
    }

    fn light() -> Self {
        Self {
            root_bg: Color::Rgb(250, 246, 238),
            focus_border: Color::Rgb(200, 40, 40),
            blurred_border: Color::Gray,
            text: Color::Black,
            text_secondary: Color::DarkGray,
            text_highlight: Color::Rgb(200, 40, 40),
            selection_bg: Color::Rgb(255, 228, 196),
            selection_fg: Color::Black,

            title: Style::default().fg(Color::Rgb(200, 40, 40)).add_modifier(Modifier::BOLD),
            card_number: Style::default().fg(Color::Rgb(200, 40, 40)).add_modifier(Modifier::BOLD),
            card_text: Style::default().fg(Color::Black),
            copied_badge: Style::default().fg(Color::Rgb(0, 128, 0)).add_modifier(Modifier::BOLD),
            result_info: Style::default().fg(Color::Rgb(160, 100, 0)),
            history_item: Style::default().fg(Color::DarkGray),
            footer: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            toast: Style::default().fg(Color::White).bg(Color::Rgb(200, 40, 40)),
            popup_border: Style::default().bg(Color::Rgb(250, 246, 238)).fg(Color::Black),
            decoration: Style::default().fg(Color::Rgb(200, 140, 0)),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            root_bg: Color::Black,
            focus_border: Color::Yellow,
            blurred_border: Color::DarkGray,
            text: Color::White,
            text_secondary: Color::Gray,
            text_highlight: Color::Yellow,
            selection_bg: Color::DarkGray,
            selection_fg: Color::Yellow,

            title: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            card_number: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            card_text: Style::default().fg(Color::White),
            copied_badge: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            result_info: Style::default().fg(Color::Cyan),
            history_item: Style::default().fg(Color::Gray),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            toast: Style::default().fg(Color::Black).bg(Color::Yellow),
            popup_border: Style::default().bg(Color::Black),
            decoration: Style::default().fg(Color::Yellow),
        }
    }
}
