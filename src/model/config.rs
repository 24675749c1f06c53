use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
}

/// How a delete is confirmed in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmStyle {
    /// Centered popup with Cancel/Delete buttons and a fade-out
    #[default]
    Overlay,
    /// One-line y/n prompt in the status row
    Prompt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    #[serde(default)]
    pub confirm_style: ConfirmStyle,
    /// Fade-out before an overlay-confirmed delete lands, in milliseconds
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
    /// Use plain ASCII glyphs instead of unicode symbols
    #[serde(default)]
    pub ascii_icons: bool,
    /// Theme overrides, `name = "#RRGGBB"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            confirm_style: ConfirmStyle::Overlay,
            fade_ms: 300,
            ascii_icons: false,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_fade_ms() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.confirm_style, ConfirmStyle::Overlay);
        assert_eq!(config.ui.fade_ms, 300);
        assert!(!config.ui.ascii_icons);
    }

    #[test]
    fn prompt_style_parses() {
        let config: AppConfig = toml::from_str(
            r##"
[ui]
confirm_style = "prompt"
fade_ms = 0
ascii_icons = true

[ui.colors]
background = "#000000"
"##,
        )
        .unwrap();
        assert_eq!(config.ui.confirm_style, ConfirmStyle::Prompt);
        assert_eq!(config.ui.fade_ms, 0);
        assert!(config.ui.ascii_icons);
        assert_eq!(config.ui.colors["background"], "#000000");
    }

    #[test]
    fn unknown_confirm_style_is_an_error() {
        let result: Result<AppConfig, _> = toml::from_str("[ui]\nconfirm_style = \"native\"\n");
        assert!(result.is_err());
    }
}
