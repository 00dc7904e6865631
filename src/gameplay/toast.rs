//! Short-lived acknowledgement prompt shown over the card. Non-blocking: the
//! flow has already advanced when it appears.
use bevy::prelude::*;

use crate::core::system::system_order::{FlowSet, PresentationSet};
use crate::rendering::fonts::fonts::UiFont;
use crate::rendering::palette::palette::ThemePalette;

pub const TOAST_SECS: f32 = 1.5;

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ShowPrompt(pub String);

#[derive(Component, Deref, DerefMut)]
pub struct Toast(Timer);

pub struct ToastPlugin;

impl Plugin for ToastPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShowPrompt>()
            .add_systems(Update, show_prompts.in_set(FlowSet))
            .add_systems(Update, expire_toasts.in_set(PresentationSet));
    }
}

fn show_prompts(
    mut commands: Commands,
    font: Res<UiFont>,
    palette: Res<ThemePalette>,
    mut events: EventReader<ShowPrompt>,
    q_existing: Query<Entity, With<Toast>>,
) {
    // Only the newest prompt of the frame matters.
    let Some(ShowPrompt(message)) = events.read().last() else {
        return;
    };
    for e in &q_existing {
        commands.entity(e).despawn();
    }
    info!(target: "flow", "Prompt: {message}");
    commands
        .spawn((
            Toast(Timer::from_seconds(TOAST_SECS, TimerMode::Once)),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            GlobalZIndex(10),
        ))
        .with_children(|p| {
            p.spawn((
                Node {
                    padding: UiRect::axes(Val::Px(24.0), Val::Px(12.0)),
                    ..default()
                },
                BackgroundColor(Color::WHITE.with_alpha(0.95)),
                BorderRadius::all(Val::Px(14.0)),
            ))
            .with_children(|bubble| {
                bubble.spawn((
                    Text::new(message.clone()),
                    font.sized(24.0),
                    TextColor(palette.text),
                ));
            });
        });
}

fn expire_toasts(mut commands: Commands, time: Res<Time>, mut q: Query<(Entity, &mut Toast)>) {
    for (e, mut toast) in &mut q {
        if toast.tick(time.delta()).finished() {
            commands.entity(e).despawn();
        }
    }
}
