use ratatui::style::Color;

use crate::model::{ProjectStatus, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub blue: Color,
    pub selection_bg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub heading: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x12, 0x1A),
            text: Color::Rgb(0xC8, 0xCC, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xF2, 0xA6, 0x5A),
            dim: Color::Rgb(0x6C, 0x72, 0x86),
            red: Color::Rgb(0xF0, 0x5D, 0x5E),
            yellow: Color::Rgb(0xF4, 0xD0, 0x3F),
            green: Color::Rgb(0x7B, 0xD8, 0x8F),
            cyan: Color::Rgb(0x5F, 0xD7, 0xE5),
            blue: Color::Rgb(0x61, 0x9C, 0xF2),
            selection_bg: Color::Rgb(0x2A, 0x30, 0x45),
            border: Color::Rgb(0x3A, 0x40, 0x55),
            border_focused: Color::Rgb(0xF2, 0xA6, 0x5A),
            heading: Color::Rgb(0x5F, 0xD7, 0xE5),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Build a theme from `[ui.colors]`, keeping defaults for anything
    /// missing or unparseable
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            let slot = match key.as_str() {
                "background" => &mut theme.background,
                "text" => &mut theme.text,
                "text_bright" => &mut theme.text_bright,
                "highlight" => &mut theme.highlight,
                "dim" => &mut theme.dim,
                "red" => &mut theme.red,
                "yellow" => &mut theme.yellow,
                "green" => &mut theme.green,
                "cyan" => &mut theme.cyan,
                "blue" => &mut theme.blue,
                "selection_bg" => &mut theme.selection_bg,
                "border" => &mut theme.border,
                "border_focused" => &mut theme.border_focused,
                "heading" => &mut theme.heading,
                _ => continue,
            };
            *slot = color;
        }

        theme
    }

    /// Color for a project status badge
    pub fn status_color(&self, status: ProjectStatus) -> Color {
        match status {
            ProjectStatus::Todo => self.text,
            ProjectStatus::InProgress => self.yellow,
            ProjectStatus::Completed => self.green,
            ProjectStatus::Archived => self.dim,
        }
    }

    pub fn border_color(&self, focused: bool) -> Color {
        if focused {
            self.border_focused
        } else {
            self.border
        }
    }
}
