use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::category::Category;
use crate::model::task::Task;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1A, 0x1B, 0x26),
            text: Color::Rgb(0xC0, 0xCA, 0xF5),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x7A, 0xA2, 0xF7),
            dim: Color::Rgb(0x56, 0x5F, 0x89),
            red: Color::Rgb(0xF7, 0x76, 0x8E),
            green: Color::Rgb(0x9E, 0xCE, 0x6A),
            selection_bg: Color::Rgb(0x28, 0x34, 0x57),
            border: Color::Rgb(0x7A, 0xA2, 0xF7),
        }
    }
}

/// Parse a hex color string like "#FFDDC1" into an RGB Color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
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
    /// Create a theme from the `[ui]` config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring unparseable theme color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "green" => theme.green = color,
                "selection_bg" => theme.selection_bg = color,
                "border" => theme.border = color,
                _ => {}
            }
        }

        theme
    }

    pub fn category_color(&self, category: &Category) -> Color {
        parse_hex_color(category.color).unwrap_or(self.text)
    }

    /// The color stored on the task. If it doesn't parse, the registry
    /// color for the task's category, then the text color.
    pub fn task_color(&self, task: &Task) -> Color {
        parse_hex_color(&task.color)
            .or_else(|| Category::find(&task.category).and_then(|c| parse_hex_color(c.color)))
            .unwrap_or(self.text)
    }
}
