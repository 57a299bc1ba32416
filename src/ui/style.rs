//! Widget rendering styles and their color sets.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Colors for menus and options menus drawn in the color style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuColors {
    /// Fills the screen behind the widget
    pub main_background: Color,
    pub title_background: Color,
    pub title_foreground: Color,
    pub choices_background: Color,
    pub choices_foreground: Color,
    pub selection_background: Color,
    pub selection_foreground: Color,
}

impl Default for MenuColors {
    fn default() -> Self {
        Self {
            main_background: Color::Black,
            title_background: Color::Cyan,
            title_foreground: Color::Black,
            choices_background: Color::White,
            choices_foreground: Color::Black,
            selection_background: Color::Cyan,
            selection_foreground: Color::Black,
        }
    }
}

/// Colors for messages drawn in the color style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageColors {
    pub main_background: Color,
    pub title_background: Color,
    pub title_foreground: Color,
    pub message_background: Color,
    pub message_foreground: Color,
    pub choices_background: Color,
    pub choices_foreground: Color,
    pub selection_background: Color,
    pub selection_foreground: Color,
}

impl Default for MessageColors {
    fn default() -> Self {
        Self {
            main_background: Color::Black,
            title_background: Color::Cyan,
            title_foreground: Color::Black,
            message_background: Color::White,
            message_foreground: Color::Black,
            choices_background: Color::White,
            choices_foreground: Color::Black,
            selection_background: Color::Cyan,
            selection_foreground: Color::Black,
        }
    }
}

/// How a widget is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// ASCII box drawing (`+`, `-`, `|`) and `> choice <` markers
    #[default]
    Table,
    /// Filled color bands, selection shown by color
    Color {
        menu: MenuColors,
        message: MessageColors,
    },
}

/// Style name as written in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    #[default]
    Table,
    Color,
}

impl StyleKind {
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "table" => Some(StyleKind::Table),
            "color" | "colour" => Some(StyleKind::Color),
            _ => None,
        }
    }
}
