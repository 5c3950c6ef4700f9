use std::fs;

use log::warn;
use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_incorrect_bg: String,
    pub text_pending: String,
    pub text_cursor_bg: String,
    pub text_cursor_fg: String,
    pub next_key: String,
    pub modifier_key: String,
    pub last_pressed: String,
    pub key_fg: String,
    pub key_bg: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes shadow the bundled ones.
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("keyguide")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => warn!("theme {} is invalid: {err}", user_theme_path.display()),
                }
            }
        }

        let file = ThemeAssets::get(&format!("{name}.toml"))?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    /// Bundled dark or light theme.
    pub fn for_mode(dark_mode: bool) -> Self {
        let name = if dark_mode { "dark" } else { "light" };
        Self::load(name).unwrap_or_default()
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            text_correct: "#a6e3a1".to_string(),
            text_incorrect: "#f38ba8".to_string(),
            text_incorrect_bg: "#45273a".to_string(),
            text_pending: "#585b70".to_string(),
            text_cursor_bg: "#f5e0dc".to_string(),
            text_cursor_fg: "#1e1e2e".to_string(),
            next_key: "#f9e2af".to_string(),
            modifier_key: "#fab387".to_string(),
            last_pressed: "#94e2d5".to_string(),
            key_fg: "#cdd6f4".to_string(),
            key_bg: "#313244".to_string(),
            accent: "#89b4fa".to_string(),
            border: "#45475a".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#f9e2af".to_string(),
            success: "#a6e3a1".to_string(),
        }
    }
}

/// Finger-zone palette, index 0 for group 1 through index 7 for group 8.
/// Mirrored so both pinkies share a hue.
const ZONE_COLORS: [Color; 8] = [
    Color::Rgb(0xf3, 0x8b, 0xa8),
    Color::Rgb(0xfa, 0xb3, 0x87),
    Color::Rgb(0xa6, 0xe3, 0xa1),
    Color::Rgb(0x89, 0xb4, 0xfa),
    Color::Rgb(0x89, 0xb4, 0xfa),
    Color::Rgb(0xa6, 0xe3, 0xa1),
    Color::Rgb(0xfa, 0xb3, 0x87),
    Color::Rgb(0xf3, 0x8b, 0xa8),
];

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::White
    }

    /// Colour for finger group 1..=8.
    pub fn zone(group: u8) -> Color {
        group
            .checked_sub(1)
            .and_then(|i| ZONE_COLORS.get(usize::from(i)))
            .copied()
            .unwrap_or(Color::Gray)
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_correct(&self) -> Color { Self::parse_color(&self.text_correct) }
    pub fn text_incorrect(&self) -> Color { Self::parse_color(&self.text_incorrect) }
    pub fn text_incorrect_bg(&self) -> Color { Self::parse_color(&self.text_incorrect_bg) }
    pub fn text_pending(&self) -> Color { Self::parse_color(&self.text_pending) }
    pub fn text_cursor_bg(&self) -> Color { Self::parse_color(&self.text_cursor_bg) }
    pub fn text_cursor_fg(&self) -> Color { Self::parse_color(&self.text_cursor_fg) }
    pub fn next_key(&self) -> Color { Self::parse_color(&self.next_key) }
    pub fn modifier_key(&self) -> Color { Self::parse_color(&self.modifier_key) }
    pub fn last_pressed(&self) -> Color { Self::parse_color(&self.last_pressed) }
    pub fn key_fg(&self) -> Color { Self::parse_color(&self.key_fg) }
    pub fn key_bg(&self) -> Color { Self::parse_color(&self.key_bg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
