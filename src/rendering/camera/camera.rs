use bevy::prelude::*;

use crate::core::config::{ColorRole, ValentineConfig};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands, cfg: Res<ValentineConfig>) {
    // Bevy 0.16+: spawn Camera2d component directly; Required Components supply defaults.
    commands.spawn(Camera2d);
    commands.insert_resource(ClearColor(cfg.color(ColorRole::BackgroundStart)));
}
