//! Decorative floating hearts and bears, plus the celebration heart burst.
use bevy::prelude::*;

use crate::core::config::ValentineConfig;
use crate::core::random::Randomness;
use crate::core::system::system_order::{FlowSet, PresentationSet};
use crate::rendering::fonts::fonts::UiFont;

/// Hearts spawned by one celebration burst.
pub const CELEBRATION_BURST: usize = 60;
pub const MAX_START_DELAY_SECS: f32 = 5.0;
pub const MIN_FLOAT_SECS: f32 = 10.0;
pub const MAX_FLOAT_SECS: f32 = 30.0;

const GLYPH_SIZE: f32 = 28.0;
const BOB_AMPLITUDE_PX: f32 = 6.0;

/// Full-screen layer (behind the card) hosting floating elements.
#[derive(Component)]
pub struct FloatingLayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    Heart,
    Bear,
}

/// Where and when one element floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatPlacement {
    /// Horizontal position, percent of viewport width in `[0, 100)`.
    pub left_percent: f32,
    /// Seconds before the element first appears, `[0, 5)`.
    pub delay_secs: f32,
    /// Seconds for one bottom-to-top pass, `[10, 30)`.
    pub duration_secs: f32,
}

impl FloatPlacement {
    pub fn roll(rng: &mut Randomness) -> Self {
        Self {
            left_percent: rng.range(0.0, 100.0),
            delay_secs: rng.range(0.0, MAX_START_DELAY_SECS),
            duration_secs: rng.range(MIN_FLOAT_SECS, MAX_FLOAT_SECS),
        }
    }

    /// Vertical progress in `[0, 1)` after `elapsed` seconds, `None` while still delayed.
    pub fn progress(&self, elapsed: f32) -> Option<f32> {
        let t = elapsed - self.delay_secs;
        if t < 0.0 {
            return None;
        }
        Some((t % self.duration_secs) / self.duration_secs)
    }
}

#[derive(Component, Debug, Clone)]
pub struct FloatingElement {
    pub kind: FloatKind,
    pub placement: FloatPlacement,
    pub elapsed: f32,
}

/// Tags hearts spawned by a celebration burst.
#[derive(Component)]
pub struct BurstHeart;

/// Request a celebration burst.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct HeartBurst;

/// Gentle vertical bob with the configured float period.
#[derive(Component, Debug, Default)]
pub struct Bob {
    pub elapsed: f32,
}

pub struct FloatingPlugin;

impl Plugin for FloatingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HeartBurst>()
            .add_systems(Update, (populate_floating_layer, explode_hearts).in_set(FlowSet))
            .add_systems(Update, (animate_floating, bob).in_set(PresentationSet));
    }
}

pub fn spawn_floating(
    commands: &mut Commands,
    layer: Entity,
    glyph: &str,
    kind: FloatKind,
    placement: FloatPlacement,
    font: &UiFont,
    scale: f32,
) -> Entity {
    let id = commands
        .spawn((
            FloatingElement {
                kind,
                placement,
                elapsed: 0.0,
            },
            Text::new(glyph),
            font.emoji_sized(GLYPH_SIZE * scale),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(placement.left_percent),
                top: Val::Percent(105.0),
                ..default()
            },
            Visibility::Hidden,
        ))
        .id();
    commands.entity(layer).add_child(id);
    id
}

/// One element per configured heart and bear, once the layer exists.
fn populate_floating_layer(
    mut commands: Commands,
    cfg: Res<ValentineConfig>,
    font: Res<UiFont>,
    mut rng: ResMut<Randomness>,
    q_layer: Query<Entity, Added<FloatingLayer>>,
) {
    for layer in &q_layer {
        let glyphs = cfg
            .floating_emojis
            .hearts
            .iter()
            .map(|g| (g, FloatKind::Heart))
            .chain(cfg.floating_emojis.bears.iter().map(|g| (g, FloatKind::Bear)));
        let mut count = 0;
        for (glyph, kind) in glyphs {
            let placement = FloatPlacement::roll(&mut rng);
            spawn_floating(&mut commands, layer, glyph, kind, placement, &font, 1.0);
            count += 1;
        }
        info!(target: "floating", "Spawned {count} floating elements");
    }
}

fn explode_hearts(
    mut commands: Commands,
    cfg: Res<ValentineConfig>,
    font: Res<UiFont>,
    mut rng: ResMut<Randomness>,
    mut events: EventReader<HeartBurst>,
    q_layer: Query<Entity, With<FloatingLayer>>,
) {
    for _ in events.read() {
        let Some(layer) = q_layer.iter().next() else {
            warn!(target: "floating", "Heart burst requested without a floating layer");
            continue;
        };
        let hearts = &cfg.floating_emojis.hearts;
        if hearts.is_empty() {
            warn!(target: "floating", "Heart burst skipped: no heart glyphs configured");
            continue;
        }
        let scale = cfg.animations.heart_explosion_size;
        for _ in 0..CELEBRATION_BURST {
            let Some(glyph) = rng.pick(hearts) else { break };
            let placement = FloatPlacement::roll(&mut rng);
            let e = spawn_floating(&mut commands, layer, glyph, FloatKind::Heart, placement, &font, scale);
            commands.entity(e).insert(BurstHeart);
        }
        info!(target: "floating", "Heart burst: {CELEBRATION_BURST} hearts");
    }
}

fn animate_floating(
    time: Res<Time>,
    mut q: Query<(&mut FloatingElement, &mut Node, &mut Visibility)>,
) {
    let dt = time.delta_secs();
    for (mut el, mut node, mut vis) in &mut q {
        el.elapsed += dt;
        match el.placement.progress(el.elapsed) {
            None => {
                if *vis != Visibility::Hidden {
                    *vis = Visibility::Hidden;
                }
            }
            Some(p) => {
                // Rise from just below the bottom edge to just above the top.
                node.top = Val::Percent(105.0 - p * 115.0);
                if *vis != Visibility::Inherited {
                    *vis = Visibility::Inherited;
                }
            }
        }
    }
}

fn bob(time: Res<Time>, cfg: Res<ValentineConfig>, mut q: Query<(&mut Bob, &mut Node)>) {
    let period = cfg.float_period_secs();
    for (mut b, mut node) in &mut q {
        b.elapsed = (b.elapsed + time.delta_secs()) % period;
        let phase = b.elapsed / period * std::f32::consts::TAU;
        node.top = Val::Px(phase.sin() * BOB_AMPLITUDE_PX);
    }
}
