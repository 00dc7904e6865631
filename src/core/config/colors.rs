//! Color roles, hex validation and conversion into Bevy colors.
use std::sync::OnceLock;

use bevy::prelude::*;
use regex::Regex;

/// Named color roles the page styles itself with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    BackgroundStart,
    BackgroundEnd,
    ButtonBackground,
    ButtonHover,
    TextColor,
}

impl ColorRole {
    pub const ALL: [ColorRole; 5] = [
        ColorRole::BackgroundStart,
        ColorRole::BackgroundEnd,
        ColorRole::ButtonBackground,
        ColorRole::ButtonHover,
        ColorRole::TextColor,
    ];

    /// Key used in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            ColorRole::BackgroundStart => "backgroundStart",
            ColorRole::BackgroundEnd => "backgroundEnd",
            ColorRole::ButtonBackground => "buttonBackground",
            ColorRole::ButtonHover => "buttonHover",
            ColorRole::TextColor => "textColor",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }

    pub fn default_hex(self) -> &'static str {
        match self {
            ColorRole::BackgroundStart => "#ffafbd",
            ColorRole::BackgroundEnd => "#ffc3a0",
            ColorRole::ButtonBackground => "#ff6b6b",
            ColorRole::ButtonHover => "#ff8787",
            ColorRole::TextColor => "#ff4757",
        }
    }
}

/// Default color for a role key; `None` for keys outside the known roles.
pub fn default_color(key: &str) -> Option<&'static str> {
    ColorRole::from_key(key).map(ColorRole::default_hex)
}

fn hex_regex() -> &'static Regex {
    static HEX_REGEX: OnceLock<Regex> = OnceLock::new();
    HEX_REGEX.get_or_init(|| {
        Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("Invalid hex color regex")
    })
}

/// `#RGB` or `#RRGGBB`, case-insensitive. Nothing else (no alpha, no missing `#`).
pub fn is_valid_hex(value: &str) -> bool {
    hex_regex().is_match(value)
}

/// Convert a validated hex string into a Bevy color (white if unparseable).
pub fn hex_to_color(value: &str) -> Color {
    Srgba::hex(value).map(Color::Srgba).unwrap_or(Color::WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_pattern() {
        assert!(is_valid_hex("#fff"));
        assert!(is_valid_hex("#FFAFBD"));
        assert!(is_valid_hex("#a1B2c3"));
        assert!(!is_valid_hex("fff"));
        assert!(!is_valid_hex("#ffff"));
        assert!(!is_valid_hex("#ffafbd00"));
        assert!(!is_valid_hex("#ggg"));
        assert!(!is_valid_hex("pink"));
        assert!(!is_valid_hex(""));
        assert!(!is_valid_hex("#fff\n"));
        assert!(!is_valid_hex(" #fff"));
    }

    #[test]
    fn defaults_cover_every_role() {
        for role in ColorRole::ALL {
            assert!(is_valid_hex(role.default_hex()), "{:?}", role);
            assert_eq!(ColorRole::from_key(role.key()), Some(role));
        }
        assert_eq!(default_color("borderColor"), None);
    }

    #[test]
    fn short_hex_expands() {
        let c = hex_to_color("#f00").to_srgba();
        assert!((c.red - 1.0).abs() < 1e-6);
        assert!(c.green.abs() < 1e-6);
    }
}
