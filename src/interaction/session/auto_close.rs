// Exits the app once `window.autoClose` seconds have elapsed (0 = never).
// Useful for unattended demo kiosks and smoke runs.

use bevy::prelude::*;

use crate::core::config::ValentineConfig;

#[derive(Resource, Deref, DerefMut)]
pub struct AutoCloseTimer(Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_auto_close).add_systems(
            Update,
            tick_auto_close.run_if(resource_exists::<AutoCloseTimer>),
        );
    }
}

fn arm_auto_close(mut commands: Commands, cfg: Res<ValentineConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 && secs.is_finite() {
        info!(target: "session", seconds = secs, "AutoClose armed");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn tick_auto_close(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<AutoCloseTimer>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if timer.tick(time.delta()).just_finished() {
        info!(target: "session", "AutoClose: time is up, requesting exit");
        ev_exit.write(AppExit::Success);
        commands.remove_resource::<AutoCloseTimer>();
    }
}
