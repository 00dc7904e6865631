//! Love meter: a slider whose nominal maximum (100) can be exceeded all the way
//! to `LOVE_METER_MAX`, revealing tiered "extra love" messages and stretching
//! its track past the card.
use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;
use bevy::window::PrimaryWindow;

use crate::app::state::FlowStage;
use crate::core::config::{LoveMessages, ValentineConfig};
use crate::core::system::system_order::{InputSet, PresentationSet};
use crate::rendering::fonts::fonts::UiFont;
use crate::rendering::palette::palette::ThemePalette;

pub const LOVE_METER_NOMINAL_MAX: u32 = 100;
pub const LOVE_METER_MAX: u32 = 10_000;
pub const HIGH_LOVE_THRESHOLD: u32 = 1_000;
pub const EXTREME_LOVE_THRESHOLD: u32 = 5_000;
/// Share of the viewport width the track may grow by at `LOVE_METER_MAX`.
pub const TRACK_GROWTH_SHARE: f32 = 0.8;

const EXTRA_LOVE_SIZE: f32 = 20.0;
const SUPER_LOVE_SIZE: f32 = 28.0;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoveMeter {
    value: u32,
}

impl Default for LoveMeter {
    fn default() -> Self {
        Self {
            value: LOVE_METER_NOMINAL_MAX,
        }
    }
}

impl LoveMeter {
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Clamp into `[0, LOVE_METER_MAX]`.
    pub fn set(&mut self, value: u32) {
        self.value = value.min(LOVE_METER_MAX);
    }

    pub fn nudge(&mut self, delta: i32) {
        let v = (self.value as i64 + delta as i64).clamp(0, LOVE_METER_MAX as i64);
        self.value = v as u32;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoveTier {
    Normal,
    High,
    Extreme,
}

impl LoveTier {
    /// Tier for values past the nominal maximum; `None` at or below it.
    pub fn for_value(value: u32) -> Option<Self> {
        match value {
            v if v <= LOVE_METER_NOMINAL_MAX => None,
            v if v < HIGH_LOVE_THRESHOLD => Some(LoveTier::Normal),
            v if v < EXTREME_LOVE_THRESHOLD => Some(LoveTier::High),
            _ => Some(LoveTier::Extreme),
        }
    }

    pub fn message(self, messages: &LoveMessages) -> &str {
        match self {
            LoveTier::Normal => &messages.normal,
            LoveTier::High => &messages.high,
            LoveTier::Extreme => &messages.extreme,
        }
    }
}

/// Extra track width in logical pixels for `value` on a viewport `viewport_width` wide.
pub fn overflow_width(value: u32, viewport_width: f32) -> f32 {
    if value <= LOVE_METER_NOMINAL_MAX {
        return 0.0;
    }
    let share = (value.min(LOVE_METER_MAX) - LOVE_METER_NOMINAL_MAX) as f32
        / (LOVE_METER_MAX - LOVE_METER_NOMINAL_MAX) as f32;
    share * viewport_width.max(0.0) * TRACK_GROWTH_SHARE
}

/// Container whose width is the track's "100%".
#[derive(Component)]
pub struct LoveMeterFrame;

/// Clickable track; dragging sets the value.
#[derive(Component)]
pub struct LoveMeterTrack;

#[derive(Component)]
pub struct LoveMeterFill;

#[derive(Component)]
pub struct LoveValueText;

#[derive(Component)]
pub struct ExtraLoveText;

/// Extreme-tier styling applied to the extra-love text.
#[derive(Component)]
pub struct SuperLove;

pub struct LoveMeterPlugin;

impl Plugin for LoveMeterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoveMeter>()
            .add_systems(
                Update,
                (drag_love_meter, keyboard_love_meter)
                    .in_set(InputSet)
                    .run_if(in_state(FlowStage::Question2)),
            )
            .add_systems(Update, render_love_meter.in_set(PresentationSet));
    }
}

pub fn spawn_love_meter(p: &mut ChildSpawnerCommands, font: &UiFont, palette: &ThemePalette) {
    p.spawn((
        LoveValueText,
        Text::new(LOVE_METER_NOMINAL_MAX.to_string()),
        font.sized(EXTRA_LOVE_SIZE),
        TextColor(palette.text),
    ));
    p.spawn((
        LoveMeterFrame,
        Node {
            width: Val::Percent(100.0),
            height: Val::Px(22.0),
            ..default()
        },
    ))
    .with_children(|frame| {
        frame
            .spawn((
                LoveMeterTrack,
                Button,
                RelativeCursorPosition::default(),
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.6)),
                BorderRadius::all(Val::Px(11.0)),
            ))
            .with_children(|track| {
                track.spawn((
                    LoveMeterFill,
                    Node {
                        width: Val::Percent(fill_percent(LOVE_METER_NOMINAL_MAX)),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(palette.button),
                    BorderRadius::all(Val::Px(11.0)),
                ));
            });
    });
    p.spawn((
        ExtraLoveText,
        Text::new(""),
        font.sized(EXTRA_LOVE_SIZE),
        TextColor(palette.text),
        Node {
            display: Display::None,
            ..default()
        },
    ));
}

fn fill_percent(value: u32) -> f32 {
    value.min(LOVE_METER_MAX) as f32 / LOVE_METER_MAX as f32 * 100.0
}

/// Value under the cursor. The cursor is measured from the track's left edge
/// and scaled against the frame, the track's un-widened width. A track that
/// widens under a held pointer leaves the value where it was.
pub fn drag_value(normalized_x: f32, track_width: f32, frame_width: f32) -> u32 {
    // Normalized coordinates are centered on the node.
    let along_track = (normalized_x + 0.5).clamp(0.0, 1.0);
    let fraction = if frame_width > 0.0 && track_width > 0.0 {
        along_track * track_width / frame_width
    } else {
        along_track
    };
    (fraction.clamp(0.0, 1.0) * LOVE_METER_MAX as f32).round() as u32
}

fn logical_width(node: &ComputedNode) -> f32 {
    node.size().x * node.inverse_scale_factor()
}

fn drag_love_meter(
    mut meter: ResMut<LoveMeter>,
    q_frame: Query<&ComputedNode, With<LoveMeterFrame>>,
    q: Query<(&Interaction, &RelativeCursorPosition, &ComputedNode), With<LoveMeterTrack>>,
) {
    let frame_width = q_frame.iter().next().map(logical_width).unwrap_or(0.0);
    for (interaction, cursor, track) in &q {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(n) = cursor.normalized else { continue };
        let value = drag_value(n.x, logical_width(track), frame_width);
        if meter.value() != value {
            meter.set(value);
        }
    }
}

fn keyboard_love_meter(keys: Res<ButtonInput<KeyCode>>, mut meter: ResMut<LoveMeter>) {
    let step = if keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        100
    } else {
        1
    };
    if keys.just_pressed(KeyCode::ArrowRight) || keys.just_pressed(KeyCode::ArrowUp) {
        meter.nudge(step);
    }
    if keys.just_pressed(KeyCode::ArrowLeft) || keys.just_pressed(KeyCode::ArrowDown) {
        meter.nudge(-step);
    }
}

#[allow(clippy::type_complexity)]
pub fn render_love_meter(
    mut commands: Commands,
    meter: Res<LoveMeter>,
    cfg: Res<ValentineConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    q_frame: Query<&ComputedNode, With<LoveMeterFrame>>,
    mut q_value: Query<&mut Text, (With<LoveValueText>, Without<ExtraLoveText>)>,
    mut q_extra: Query<
        (Entity, &mut Text, &mut Node, &mut TextFont, Has<SuperLove>),
        (With<ExtraLoveText>, Without<LoveValueText>),
    >,
    mut q_track: Query<&mut Node, (With<LoveMeterTrack>, Without<ExtraLoveText>, Without<LoveMeterFill>)>,
    mut q_fill: Query<&mut Node, (With<LoveMeterFill>, Without<ExtraLoveText>, Without<LoveMeterTrack>)>,
    added: Query<(), Added<ExtraLoveText>>,
) {
    if !meter.is_changed() && !cfg.is_changed() && added.is_empty() {
        return;
    }
    let value = meter.value();
    for mut text in &mut q_value {
        **text = value.to_string();
    }

    let tier = LoveTier::for_value(value);
    for (entity, mut text, mut node, mut font, is_super) in &mut q_extra {
        match tier {
            Some(tier) => {
                node.display = Display::Flex;
                **text = tier.message(&cfg.love_messages).to_string();
                let extreme = tier == LoveTier::Extreme;
                if extreme && !is_super {
                    commands.entity(entity).insert(SuperLove);
                } else if !extreme && is_super {
                    commands.entity(entity).remove::<SuperLove>();
                }
                font.font_size = if extreme { SUPER_LOVE_SIZE } else { EXTRA_LOVE_SIZE };
            }
            None => {
                node.display = Display::None;
                if is_super {
                    commands.entity(entity).remove::<SuperLove>();
                }
                font.font_size = EXTRA_LOVE_SIZE;
            }
        }
    }

    let viewport = windows
        .single()
        .map(|w| w.width())
        .unwrap_or(cfg.window.width);
    let extra = overflow_width(value, viewport);
    let frame_width = q_frame.iter().next().map(logical_width).unwrap_or(0.0);
    for mut node in &mut q_track {
        node.width = if extra > 0.0 {
            Val::Px(frame_width + extra)
        } else {
            Val::Percent(100.0)
        };
    }
    // The fill ends where `drag_value` reads the value, even on a widened track.
    for mut node in &mut q_fill {
        node.width = if extra > 0.0 && frame_width > 0.0 {
            Val::Px(frame_width * fill_percent(value) / 100.0)
        } else {
            Val::Percent(fill_percent(value))
        };
    }
    if let Some(tier) = tier {
        debug!(target: "love_meter", "value={value} tier={tier:?} extra_px={extra:.1}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_by_threshold() {
        assert_eq!(LoveTier::for_value(0), None);
        assert_eq!(LoveTier::for_value(100), None);
        assert_eq!(LoveTier::for_value(101), Some(LoveTier::Normal));
        assert_eq!(LoveTier::for_value(150), Some(LoveTier::Normal));
        assert_eq!(LoveTier::for_value(999), Some(LoveTier::Normal));
        assert_eq!(LoveTier::for_value(1000), Some(LoveTier::High));
        assert_eq!(LoveTier::for_value(4999), Some(LoveTier::High));
        assert_eq!(LoveTier::for_value(5000), Some(LoveTier::Extreme));
        assert_eq!(LoveTier::for_value(LOVE_METER_MAX), Some(LoveTier::Extreme));
    }

    #[test]
    fn overflow_scales_with_viewport() {
        assert_eq!(overflow_width(100, 1000.0), 0.0);
        assert_eq!(overflow_width(50, 1000.0), 0.0);
        assert!((overflow_width(LOVE_METER_MAX, 1000.0) - 800.0).abs() < 1e-3);
        assert!((overflow_width(5050, 1000.0) - 400.0).abs() < 1e-3);
    }

    #[test]
    fn drag_reads_against_the_frame() {
        let frame = 400.0;
        // Same screen position (300px from the left edge) on the nominal and
        // on a widened track gives the same value.
        let nominal = drag_value(300.0 / frame - 0.5, frame, frame);
        let widened_track = frame + 250.0;
        let widened = drag_value(300.0 / widened_track - 0.5, widened_track, frame);
        assert_eq!(nominal, 7500);
        assert_eq!(widened, nominal);
        // Past the frame's edge the value saturates.
        assert_eq!(drag_value(0.5, widened_track, frame), LOVE_METER_MAX);
        assert_eq!(drag_value(-0.5, widened_track, frame), 0);
    }

    #[test]
    fn drag_without_layout_uses_track_fraction() {
        assert_eq!(drag_value(0.0, 0.0, 0.0), 5000);
    }

    #[test]
    fn meter_clamps() {
        let mut m = LoveMeter::default();
        assert_eq!(m.value(), 100);
        m.set(50_000);
        assert_eq!(m.value(), LOVE_METER_MAX);
        m.nudge(-20_000);
        assert_eq!(m.value(), 0);
        m.nudge(5);
        assert_eq!(m.value(), 5);
    }
}
