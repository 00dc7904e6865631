use bevy::prelude::*;

use crate::core::components::ThemedText;
use crate::core::config::{ColorRole, ValentineConfig};
use crate::core::system::system_order::PresentationSet;

/// Resolved colors for the configured roles.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub background_start: Color,
    pub background_end: Color,
    pub button: Color,
    pub button_hover: Color,
    pub text: Color,
}

impl ThemePalette {
    pub fn from_config(cfg: &ValentineConfig) -> Self {
        Self {
            background_start: cfg.color(ColorRole::BackgroundStart),
            background_end: cfg.color(ColorRole::BackgroundEnd),
            button: cfg.color(ColorRole::ButtonBackground),
            button_hover: cfg.color(ColorRole::ButtonHover),
            text: cfg.color(ColorRole::TextColor),
        }
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::from_config(&ValentineConfig::default())
    }
}

/// Card panel tinted with `backgroundEnd`.
#[derive(Component)]
pub struct UiCard;

pub struct PalettePlugin;

impl Plugin for PalettePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ThemePalette>().add_systems(
            Update,
            refresh_palette
                .run_if(resource_changed::<ValentineConfig>)
                .in_set(PresentationSet),
        );
    }
}

/// Re-resolve colors whenever the configuration changes (first frame included).
pub fn refresh_palette(
    cfg: Res<ValentineConfig>,
    mut palette: ResMut<ThemePalette>,
    mut clear: Option<ResMut<ClearColor>>,
    mut q_card: Query<&mut BackgroundColor, With<UiCard>>,
    mut q_text: Query<&mut TextColor, With<ThemedText>>,
) {
    let next = ThemePalette::from_config(&cfg);
    if *palette != next {
        *palette = next;
    }
    if let Some(clear) = clear.as_deref_mut() {
        clear.0 = next.background_start;
    }
    for mut bg in &mut q_card {
        bg.0 = next.background_end;
    }
    for mut color in &mut q_text {
        color.0 = next.text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_follows_config() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let mut cfg = ValentineConfig::default();
        cfg.colors.insert("textColor".into(), "#000000".into());
        app.insert_resource(cfg);
        app.add_plugins(PalettePlugin);
        let text = app.world_mut().spawn((ThemedText, TextColor(Color::WHITE))).id();
        app.update();

        let black = Color::Srgba(Srgba::hex("#000000").unwrap());
        assert_eq!(app.world().resource::<ThemePalette>().text, black);
        assert_eq!(app.world().get::<TextColor>(text).unwrap().0, black);
    }
}
