// Runtime config hot-reload (desktop only).
// Polls the layered config files for modification-time changes; when one moves,
// the layers are re-loaded, re-validated and the command-line overrides are
// re-applied. A different result replaces the `ValentineConfig` resource
// (text/palette bindings react to the change) and the window title is refreshed.
// Modification times present when the settings are inserted form the baseline,
// so the startup config is never reloaded. Load errors are logged; prior config
// retained when nothing usable was read.

use bevy::prelude::*;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::SystemTime,
};

use crate::core::config::{log_config_warnings, ConfigOverrides, ValentineConfig};

#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    /// Polling interval seconds.
    pub interval_secs: f32,
    pub overrides: ConfigOverrides,
}

impl ConfigReloadSettings {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
            interval_secs: 0.5,
            overrides: ConfigOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}

impl Default for ConfigReloadState {
    fn default() -> Self {
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(0.5, TimerMode::Repeating),
        }
    }
}

pub struct ConfigHotReloadPlugin;

impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        // Only meaningful on native (std::fs) targets.
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<ConfigReloadState>().add_systems(
                Update,
                poll_and_reload_config.run_if(resource_exists::<ConfigReloadSettings>),
            );
        }
        #[cfg(target_arch = "wasm32")]
        let _ = app;
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<ValentineConfig>,
    mut windows: Query<&mut Window>,
) {
    if settings.is_added() {
        // Baseline: the resource already holds what these files contain.
        state.last_mod = settings
            .paths
            .iter()
            .filter_map(|p| modified(p).map(|t| (p.clone(), t)))
            .collect();
        state.timer.reset();
        debug!(target: "config", "Watching {} config layer(s)", state.last_mod.len());
        return;
    }

    let interval = settings.interval_secs.max(0.05);
    if (state.timer.duration().as_secs_f32() - interval).abs() > f32::EPSILON {
        state
            .timer
            .set_duration(std::time::Duration::from_secs_f32(interval));
    }
    if !state.timer.tick(time.delta()).finished() {
        return;
    }

    let mut dirty = false;
    for path in &settings.paths {
        let Some(mod_time) = modified(path) else {
            continue;
        };
        // A layer created after startup has no baseline and counts as changed.
        let changed = state.last_mod.get(path).map_or(true, |seen| mod_time > *seen);
        if changed {
            state.last_mod.insert(path.clone(), mod_time);
            dirty = true;
        }
    }
    if !dirty {
        return;
    }

    let (mut new_cfg, used, errors) = ValentineConfig::load_layered(settings.paths.iter());
    for e in &errors {
        warn!(target: "config", "CONFIG HOT-RELOAD issue: {e}");
    }
    if used.is_empty() {
        return;
    }
    log_config_warnings(&new_cfg.validate());
    settings.overrides.apply(&mut new_cfg);

    // Replace only if different (avoid spurious change detection downstream).
    if *cfg_res != new_cfg {
        info!(target: "config", "Config hot-reload applied from {:?}", used);
        if let Ok(mut window) = windows.single_mut() {
            if window.title != new_cfg.page_title {
                window.title = new_cfg.page_title.clone();
            }
        }
        *cfg_res = new_cfg;
    }
}
