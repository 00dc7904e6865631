use bevy::prelude::*;
use std::path::{Path, PathBuf};

use crate::core::config::ValentineConfig;

/// Colour emoji fonts looked up when `emojiFont` is not configured.
pub const SYSTEM_EMOJI_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
    "/usr/share/fonts/noto/NotoColorEmoji.ttf",
    "/usr/share/fonts/google-noto-emoji/NotoColorEmoji.ttf",
    "/usr/share/fonts/noto-emoji/NotoColorEmoji.ttf",
    "/System/Library/Fonts/Apple Color Emoji.ttc",
    "C:\\Windows\\Fonts\\seguiemj.ttf",
];

/// Fonts used by text nodes. Both handles default to Bevy's embedded font.
/// `emoji` covers glyph-only nodes (floating hearts, sticker, celebration row).
#[derive(Resource, Debug, Clone, Default)]
pub struct UiFont {
    pub text: Handle<Font>,
    pub emoji: Handle<Font>,
}

impl UiFont {
    pub fn sized(&self, font_size: f32) -> TextFont {
        TextFont {
            font: self.text.clone(),
            font_size,
            ..default()
        }
    }

    pub fn emoji_sized(&self, font_size: f32) -> TextFont {
        TextFont {
            font: self.emoji.clone(),
            font_size,
            ..default()
        }
    }
}

/// First candidate that exists on disk.
pub fn find_emoji_font<P: AsRef<Path>>(candidates: impl IntoIterator<Item = P>) -> Option<PathBuf> {
    candidates
        .into_iter()
        .map(|p| p.as_ref().to_path_buf())
        .find(|p| p.is_file())
}

pub struct FontsPlugin;

impl Plugin for FontsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiFont>()
            .add_systems(PreStartup, (load_ui_font, load_emoji_font).chain());
    }
}

fn load_ui_font(
    cfg: Res<ValentineConfig>,
    asset_server: Option<Res<AssetServer>>,
    mut font: ResMut<UiFont>,
) {
    let path = cfg.font.trim();
    if path.is_empty() {
        return;
    }
    let Some(server) = asset_server else {
        warn!(target: "fonts", "AssetServer unavailable; '{path}' not loaded");
        return;
    };
    info!(target: "fonts", "Using font '{path}'");
    font.text = server.load(path.to_string());
    font.emoji = font.text.clone();
}

fn load_emoji_font(
    cfg: Res<ValentineConfig>,
    asset_server: Option<Res<AssetServer>>,
    fonts: Option<ResMut<Assets<Font>>>,
    mut font: ResMut<UiFont>,
) {
    let configured = cfg.emoji_font.trim();
    if !configured.is_empty() {
        let Some(server) = asset_server else {
            warn!(target: "fonts", "AssetServer unavailable; '{configured}' not loaded");
            return;
        };
        info!(target: "fonts", "Using emoji font '{configured}'");
        font.emoji = server.load(configured.to_string());
        return;
    }

    // Headless apps have no font storage.
    let Some(mut fonts) = fonts else { return };
    if let Some(handle) = load_system_emoji_font(&mut fonts) {
        font.emoji = handle;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_system_emoji_font(fonts: &mut Assets<Font>) -> Option<Handle<Font>> {
    let Some(path) = find_emoji_font(SYSTEM_EMOJI_FONTS) else {
        warn!(target: "fonts", "No colour emoji font found; emoji render with the text font");
        return None;
    };
    let bytes = std::fs::read(&path)
        .map_err(|e| warn!(target: "fonts", "Emoji font {} unreadable: {e}", path.display()))
        .ok()?;
    let loaded = Font::try_from_bytes(bytes)
        .map_err(|e| warn!(target: "fonts", "Emoji font {} unreadable: {e:?}", path.display()))
        .ok()?;
    info!(target: "fonts", "Using system emoji font {}", path.display());
    Some(fonts.add(loaded))
}

#[cfg(target_arch = "wasm32")]
fn load_system_emoji_font(_fonts: &mut Assets<Font>) -> Option<Handle<Font>> {
    None
}
