//! Sticker "pasted" on top of the card: emoji + text + close button, optionally
//! a link. A new sticker replaces any existing one with the same id.
use bevy::prelude::*;

use crate::core::config::{StickerConfig, ValentineConfig};
use crate::core::system::system_order::{FlowSet, InputSet, PresentationSet};
use crate::interaction::buttons::OpenLink;
use crate::rendering::fonts::fonts::UiFont;
use crate::rendering::palette::palette::ThemePalette;

pub const STICKER_ENTRANCE_SECS: f32 = 0.26;
const STICKER_SLIDE_PX: f32 = 10.0;
const STICKER_ALPHA: f32 = 0.95;

/// Node stickers are attached to.
#[derive(Component)]
pub struct StickerHost;

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Sticker {
    pub id: String,
    pub href: Option<String>,
}

#[derive(Component)]
pub struct StickerClose;

#[derive(Component, Deref, DerefMut)]
pub struct StickerEntrance(Timer);

#[derive(Event, Debug, Clone, PartialEq)]
pub struct SpawnSticker(pub StickerConfig);

pub struct StickerPlugin;

impl Plugin for StickerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnSticker>()
            .add_systems(Update, (request_configured_sticker, sticker_clicks).in_set(InputSet))
            .add_systems(Update, spawn_stickers.in_set(FlowSet))
            .add_systems(Update, animate_sticker_entrance.in_set(PresentationSet));
    }
}

fn request_configured_sticker(
    cfg: Res<ValentineConfig>,
    q_host: Query<(), Added<StickerHost>>,
    mut out: EventWriter<SpawnSticker>,
) {
    if q_host.is_empty() || !cfg.sticker.enabled {
        return;
    }
    out.write(SpawnSticker(cfg.sticker.clone()));
}

pub fn spawn_stickers(
    mut commands: Commands,
    font: Res<UiFont>,
    palette: Res<ThemePalette>,
    mut events: EventReader<SpawnSticker>,
    q_host: Query<Entity, With<StickerHost>>,
    q_existing: Query<(Entity, &Sticker)>,
) {
    for SpawnSticker(options) in events.read() {
        let Some(host) = q_host.iter().next() else {
            warn!(target: "sticker", "No sticker host; '{}' dropped", options.id);
            continue;
        };
        for (e, sticker) in &q_existing {
            if sticker.id == options.id {
                commands.entity(e).despawn();
            }
        }
        let sticker = Sticker {
            id: options.id.clone(),
            href: options.link().map(str::to_string),
        };
        let root = commands
            .spawn((
                sticker,
                Button,
                StickerEntrance(Timer::from_seconds(STICKER_ENTRANCE_SECS, TimerMode::Once)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(-22.0),
                    align_self: AlignSelf::Center,
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(8.0),
                    padding: UiRect::axes(Val::Px(14.0), Val::Px(6.0)),
                    margin: UiRect::top(Val::Px(-STICKER_SLIDE_PX)),
                    ..default()
                },
                BackgroundColor(Color::WHITE.with_alpha(0.0)),
                BorderRadius::all(Val::Px(12.0)),
                GlobalZIndex(5),
            ))
            .with_children(|s| {
                s.spawn((Text::new(options.emoji.clone()), font.emoji_sized(22.0)));
                s.spawn((
                    Text::new(options.text.clone()),
                    font.sized(18.0),
                    TextColor(palette.text),
                ));
                s.spawn((
                    StickerClose,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(6.0), Val::Px(2.0)),
                        ..default()
                    },
                ))
                .with_children(|c| {
                    c.spawn((Text::new("✕"), font.sized(16.0), TextColor(palette.text)));
                });
            })
            .id();
        commands.entity(host).add_child(root);
        info!(target: "sticker", "Sticker '{}' placed", options.id);
    }
}

/// Close removes the sticker; clicking the body follows its link (if any).
fn sticker_clicks(
    mut commands: Commands,
    q_close: Query<(&Interaction, &ChildOf), (Changed<Interaction>, With<StickerClose>)>,
    q_body: Query<(&Interaction, &Sticker), Changed<Interaction>>,
    mut links: EventWriter<OpenLink>,
) {
    let mut closed = false;
    for (interaction, child_of) in &q_close {
        if *interaction == Interaction::Pressed {
            commands.entity(child_of.parent()).despawn();
            closed = true;
        }
    }
    if closed {
        return;
    }
    for (interaction, sticker) in &q_body {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if let Some(url) = &sticker.href {
            links.write(OpenLink { url: url.clone() });
        }
    }
}

fn animate_sticker_entrance(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut StickerEntrance, &mut Node, &mut BackgroundColor)>,
) {
    for (e, mut entrance, mut node, mut bg) in &mut q {
        entrance.tick(time.delta());
        let p = entrance.fraction();
        // Ease-out so the sticker settles softly.
        let eased = 1.0 - (1.0 - p) * (1.0 - p);
        node.margin.top = Val::Px(-STICKER_SLIDE_PX * (1.0 - eased));
        bg.0 = bg.0.with_alpha(STICKER_ALPHA * eased);
        if entrance.finished() {
            commands.entity(e).remove::<StickerEntrance>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(ValentineConfig::default());
        app.init_resource::<UiFont>().init_resource::<ThemePalette>();
        app.add_event::<OpenLink>();
        app.add_plugins(StickerPlugin);
        app
    }

    fn stickers(app: &mut App) -> Vec<Sticker> {
        let mut q = app.world_mut().query::<&Sticker>();
        q.iter(app.world()).cloned().collect()
    }

    #[test]
    fn configured_sticker_appears_on_host() {
        let mut app = app();
        app.world_mut().spawn((StickerHost, Node::default()));
        app.update();
        app.update();
        let s = stickers(&mut app);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].id, "shivaniPrincessSticker");
        assert!(s[0].href.is_some());
    }

    #[test]
    fn same_id_replaces() {
        let mut app = app();
        app.world_mut().resource_mut::<ValentineConfig>().sticker.enabled = false;
        app.world_mut().spawn((StickerHost, Node::default()));
        app.update();
        for text in ["one", "two"] {
            app.world_mut().send_event(SpawnSticker(StickerConfig {
                text: text.into(),
                ..Default::default()
            }));
            app.update();
        }
        let s = stickers(&mut app);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].id, "topSticker");
        assert_eq!(s[0].href, None);
    }

    #[test]
    fn close_button_removes_sticker() {
        let mut app = app();
        app.world_mut().spawn((StickerHost, Node::default()));
        app.update();
        app.update();
        let close = {
            let mut q = app.world_mut().query_filtered::<Entity, With<StickerClose>>();
            q.single(app.world()).unwrap()
        };
        *app.world_mut().get_mut::<Interaction>(close).unwrap() = Interaction::Pressed;
        app.update();
        assert!(stickers(&mut app).is_empty());
    }
}
