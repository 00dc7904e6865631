// This file is part of Valentine.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use super::state::FlowStage;
use crate::core::config::ValentineConfig;
use crate::core::random::Randomness;
use crate::core::system::system_order::{FlowSet, InputSet, PresentationSet};
use crate::gameplay::content::ContentPlugin;
use crate::gameplay::floating::FloatingPlugin;
use crate::gameplay::flow::FlowPlugin;
use crate::gameplay::love_meter::LoveMeterPlugin;
use crate::gameplay::sticker::StickerPlugin;
use crate::gameplay::toast::ToastPlugin;
use crate::interaction::buttons::ButtonsPlugin;
use crate::interaction::links::LinksPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::rendering::camera::camera::CameraPlugin;
use crate::rendering::fonts::fonts::FontsPlugin;
use crate::rendering::palette::palette::PalettePlugin;

/// Everything except windowing/rendering backends. Expects `ValentineConfig`
/// to be inserted beforehand and the states plugin to be present.
pub struct ValentinePlugin;

impl Plugin for ValentinePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (InputSet, FlowSet.after(InputSet), PresentationSet.after(FlowSet)),
        )
        .init_state::<FlowStage>()
        .init_resource::<Randomness>()
        .add_plugins((
            FontsPlugin,
            PalettePlugin,
            CameraPlugin,
            ButtonsPlugin,
            ContentPlugin,
            FloatingPlugin,
            LoveMeterPlugin,
            FlowPlugin,
            ToastPlugin,
            StickerPlugin,
            LinksPlugin,
            ConfigHotReloadPlugin,
            AutoClosePlugin,
        ));
    }
}

/// Windowless app for tests and smoke runs: `MinimalPlugins` + states + the
/// full greeting, seeded from `randomness`.
pub fn build_headless_app(cfg: ValentineConfig, randomness: Randomness) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(cfg)
        .insert_resource(randomness)
        .add_plugins(ValentinePlugin);
    app
}
