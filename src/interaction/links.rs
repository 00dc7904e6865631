//! Outbound navigation (flower page, music video, sticker link) and the
//! embedded "special music" track.
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use bevy::asset::LoadState;
use bevy::audio::Volume;
use bevy::prelude::*;

use super::buttons::{ButtonAction, OpenLink, PlayMusic};
use crate::core::config::ValentineConfig;
use crate::core::system::system_order::FlowSet;

type OpenFn = dyn Fn(&str) -> Result<()> + Send + Sync;

/// Strategy used to open external URLs. Defaults to the platform browser.
#[derive(Resource, Clone)]
pub struct LinkOpener(Arc<OpenFn>);

impl Default for LinkOpener {
    fn default() -> Self {
        Self(Arc::new(open_in_browser))
    }
}

impl LinkOpener {
    pub fn new(f: impl Fn(&str) -> Result<()> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Opener that only records URLs; handy for headless runs.
    pub fn recording() -> (Self, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let opener = Self::new(move |url| {
            if let Ok(mut v) = sink.lock() {
                v.push(url.to_string());
            }
            Ok(())
        });
        (opener, log)
    }

    pub fn open(&self, url: &str) -> Result<()> {
        (self.0)(url)
    }
}

/// Ensure bare `www.` hosts get a scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("www.") {
        format!("https://{url}")
    } else {
        url.to_string()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_in_browser(url: &str) -> Result<()> {
    open::that(normalize_url(url))?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn open_in_browser(url: &str) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no browser window"))?;
    window
        .open_with_url_and_target(&normalize_url(url), "_blank")
        .map_err(|e| anyhow::anyhow!("window.open failed: {e:?}"))?;
    Ok(())
}

/// Directory that relative link targets and music tracks live in. `None` leaves
/// them to the host (the page origin on the web).
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AssetDir(pub Option<PathBuf>);

impl Default for AssetDir {
    fn default() -> Self {
        Self(default_asset_dir())
    }
}

/// Same base the asset server reads from: `BEVY_ASSET_ROOT`, then
/// `CARGO_MANIFEST_DIR`, then the executable's directory.
#[cfg(not(target_arch = "wasm32"))]
fn default_asset_dir() -> Option<PathBuf> {
    let base = std::env::var_os("BEVY_ASSET_ROOT")
        .or_else(|| std::env::var_os("CARGO_MANIFEST_DIR"))
        .map(PathBuf::from)
        .or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(PathBuf::from))
        })?;
    Some(base.join("assets"))
}

#[cfg(target_arch = "wasm32")]
fn default_asset_dir() -> Option<PathBuf> {
    None
}

fn is_remote(url: &str) -> bool {
    url.contains("://") || url.starts_with("www.") || url.starts_with("mailto:")
}

impl AssetDir {
    /// Target to hand to the opener, or `None` when a local target is missing.
    pub fn resolve_link(&self, url: &str) -> Option<String> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        if is_remote(url) {
            return Some(normalize_url(url));
        }
        let Some(dir) = &self.0 else {
            return Some(url.to_string());
        };
        let path = dir.join(url);
        path.is_file().then(|| path.to_string_lossy().into_owned())
    }

    pub fn has_track(&self, track: &str) -> bool {
        let track = track.trim();
        if track.is_empty() {
            return false;
        }
        self.0.as_ref().map_or(true, |dir| dir.join(track).is_file())
    }
}

/// Marker for the currently playing special track.
#[derive(Component)]
pub struct SpecialMusic;

pub struct LinksPlugin;

impl Plugin for LinksPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LinkOpener>()
            .init_resource::<AssetDir>()
            .add_systems(
                Update,
                (
                    open_requested_links,
                    play_special_music,
                    report_failed_tracks,
                    hide_unavailable_actions,
                )
                    .in_set(FlowSet),
            );
    }
}

pub fn open_requested_links(
    opener: Res<LinkOpener>,
    assets: Res<AssetDir>,
    mut events: EventReader<OpenLink>,
) {
    for OpenLink { url } in events.read() {
        if url.trim().is_empty() {
            warn!(target: "links", "Ignoring empty link");
            continue;
        }
        let Some(target) = assets.resolve_link(url) else {
            warn!(target: "links", "Link target '{url}' not found in {:?}", assets.0);
            continue;
        };
        match opener.open(&target) {
            Ok(()) => info!(target: "links", "Opened '{target}'"),
            Err(e) => warn!(target: "links", "Failed to open URL '{target}': {e}"),
        }
    }
}

/// Footer actions whose target does not exist are not shown.
fn hide_unavailable_actions(
    cfg: Res<ValentineConfig>,
    assets: Res<AssetDir>,
    added: Query<(), Added<ButtonAction>>,
    mut q: Query<(&ButtonAction, &mut Node)>,
) {
    if !cfg.is_changed() && !assets.is_changed() && added.is_empty() {
        return;
    }
    for (action, mut node) in &mut q {
        let available = match action {
            ButtonAction::Answer(_) => continue,
            ButtonAction::OpenFlowerPage => assets.resolve_link(&cfg.links.flower_page).is_some(),
            ButtonAction::OpenMusicVideo => assets.resolve_link(&cfg.links.music_video).is_some(),
            ButtonAction::PlaySpecialMusic => assets.has_track(&cfg.music.track),
        };
        let display = if available { Display::Flex } else { Display::None };
        if node.display != display {
            debug!(target: "links", "{action:?} available: {available}");
            node.display = display;
        }
    }
}

/// Restart the configured track from the beginning. Failures only log.
fn play_special_music(
    mut commands: Commands,
    cfg: Res<ValentineConfig>,
    assets: Res<AssetDir>,
    asset_server: Option<Res<AssetServer>>,
    mut events: EventReader<PlayMusic>,
    q_playing: Query<Entity, With<SpecialMusic>>,
) {
    if events.read().last().is_none() {
        return;
    }
    let Some(server) = asset_server else {
        warn!(target: "links", "Music blocked: no audio backend");
        return;
    };
    if !assets.has_track(&cfg.music.track) {
        warn!(target: "links", "Music track '{}' not found", cfg.music.track);
        return;
    }
    for e in &q_playing {
        commands.entity(e).despawn();
    }
    let handle: Handle<AudioSource> = server.load(cfg.music.track.clone());
    commands.spawn((
        SpecialMusic,
        AudioPlayer::new(handle),
        PlaybackSettings::DESPAWN.with_volume(Volume::Linear(cfg.music.volume.clamp(0.0, 1.0))),
    ));
    info!(target: "links", "Playing '{}'", cfg.music.track);
}

fn report_failed_tracks(
    mut commands: Commands,
    asset_server: Option<Res<AssetServer>>,
    q: Query<(Entity, &AudioPlayer), With<SpecialMusic>>,
) {
    let Some(server) = asset_server else { return };
    for (entity, player) in &q {
        if let Some(LoadState::Failed(err)) = server.get_load_state(player.0.id()) {
            warn!(target: "links", "Music playback failed: {err}");
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn www_gets_scheme() {
        assert_eq!(normalize_url("www.example.com"), "https://www.example.com");
        assert_eq!(normalize_url(" flower.html "), "flower.html");
        assert_eq!(normalize_url("https://a.b"), "https://a.b");
    }

    fn links_app(assets: AssetDir) -> (App, Arc<Mutex<Vec<String>>>) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(ValentineConfig::default());
        app.add_event::<OpenLink>().add_event::<PlayMusic>();
        let (opener, log) = LinkOpener::recording();
        app.insert_resource(opener).insert_resource(assets);
        app.add_plugins(LinksPlugin);
        (app, log)
    }

    #[test]
    fn open_link_events_reach_opener() {
        let dir = tempfile::tempdir().expect("tempdir");
        let page = dir.path().join("flower.html");
        std::fs::write(&page, "<html></html>").expect("write page");
        let (mut app, log) = links_app(AssetDir(Some(dir.path().to_path_buf())));

        app.world_mut().send_event(OpenLink { url: "flower.html".into() });
        app.world_mut().send_event(OpenLink { url: "missing.html".into() });
        app.world_mut().send_event(OpenLink { url: "www.example.com".into() });
        app.world_mut().send_event(OpenLink { url: "  ".into() });
        app.update();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                page.to_string_lossy().into_owned(),
                "https://www.example.com".to_string()
            ]
        );
    }

    #[test]
    fn without_asset_dir_links_pass_through() {
        let assets = AssetDir(None);
        assert_eq!(assets.resolve_link(" flower.html "), Some("flower.html".into()));
        assert!(assets.has_track("audio/bg_music.wav"));
        assert!(!assets.has_track(""));
    }

    #[test]
    fn shipped_link_targets_exist() {
        let assets = AssetDir(Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")));
        let cfg_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/config/valentine.ron");
        let cfg = ValentineConfig::load_from_file(&cfg_path).expect("shipped config parses");
        assert!(assets.resolve_link(&cfg.links.flower_page).is_some());
        assert!(assets.has_track(&cfg.music.track));
        let defaults = ValentineConfig::default();
        assert!(assets.resolve_link(&defaults.links.flower_page).is_some());
        assert!(assets.has_track(&defaults.music.track));
    }

    #[test]
    fn actions_with_missing_targets_are_hidden() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (mut app, _) = links_app(AssetDir(Some(dir.path().to_path_buf())));
        let flower = app.world_mut().spawn((ButtonAction::OpenFlowerPage, Node::default())).id();
        let video = app.world_mut().spawn((ButtonAction::OpenMusicVideo, Node::default())).id();
        let music = app.world_mut().spawn((ButtonAction::PlaySpecialMusic, Node::default())).id();
        app.update();

        let display = |app: &App, e: Entity| app.world().get::<Node>(e).expect("node").display;
        assert_eq!(display(&app, flower), Display::None);
        assert_eq!(display(&app, video), Display::Flex);
        assert_eq!(display(&app, music), Display::None);

        std::fs::write(dir.path().join("flower.html"), "<html></html>").expect("write page");
        std::fs::create_dir_all(dir.path().join("audio")).expect("audio dir");
        std::fs::write(dir.path().join("audio/bg_music.wav"), b"RIFF").expect("write track");
        app.world_mut().resource_mut::<AssetDir>().set_changed();
        app.update();
        assert_eq!(display(&app, flower), Display::Flex);
        assert_eq!(display(&app, music), Display::Flex);
    }

    #[test]
    fn opener_errors_do_not_panic() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(ValentineConfig::default());
        app.add_event::<OpenLink>().add_event::<PlayMusic>();
        app.insert_resource(LinkOpener::new(|_| anyhow::bail!("blocked")));
        app.insert_resource(AssetDir(None));
        app.add_plugins(LinksPlugin);
        app.world_mut().send_event(OpenLink { url: "https://x.y".into() });
        app.world_mut().send_event(PlayMusic);
        app.update();
    }
}
