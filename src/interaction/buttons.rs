//! Button wiring: every clickable control carries a `ButtonAction`; presses are
//! translated into events consumed by the flow, link and music systems.
use bevy::prelude::*;

use crate::app::state::Answer;
use crate::core::config::ValentineConfig;
use crate::core::system::system_order::{InputSet, PresentationSet};
use crate::rendering::palette::palette::ThemePalette;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Answer(Answer),
    OpenFlowerPage,
    OpenMusicVideo,
    PlaySpecialMusic,
}

/// Button painted with `buttonBackground` / `buttonHover`.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ThemedButton;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerPressed {
    pub answer: Answer,
    pub button: Entity,
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct OpenLink {
    pub url: String,
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PlayMusic;

pub struct ButtonsPlugin;

impl Plugin for ButtonsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnswerPressed>()
            .add_event::<OpenLink>()
            .add_event::<PlayMusic>()
            .add_systems(Update, dispatch_button_presses.in_set(InputSet))
            .add_systems(Update, paint_buttons.in_set(PresentationSet));
    }
}

pub fn dispatch_button_presses(
    cfg: Res<ValentineConfig>,
    q: Query<(Entity, &Interaction, &ButtonAction), Changed<Interaction>>,
    mut answers: EventWriter<AnswerPressed>,
    mut links: EventWriter<OpenLink>,
    mut music: EventWriter<PlayMusic>,
) {
    for (entity, interaction, action) in &q {
        if *interaction != Interaction::Pressed {
            continue;
        }
        debug!(target: "buttons", "pressed {:?} ({:?})", action, entity);
        match *action {
            ButtonAction::Answer(answer) => {
                answers.write(AnswerPressed {
                    answer,
                    button: entity,
                });
            }
            ButtonAction::OpenFlowerPage => {
                links.write(OpenLink {
                    url: cfg.links.flower_page.clone(),
                });
            }
            ButtonAction::OpenMusicVideo => {
                links.write(OpenLink {
                    url: cfg.links.music_video.clone(),
                });
            }
            ButtonAction::PlaySpecialMusic => {
                music.write(PlayMusic);
            }
        }
    }
}

fn paint_buttons(
    palette: Res<ThemePalette>,
    mut q: Query<(&Interaction, &mut BackgroundColor), With<ThemedButton>>,
) {
    for (interaction, mut bg) in &mut q {
        let want = match interaction {
            Interaction::None => palette.button,
            Interaction::Hovered | Interaction::Pressed => palette.button_hover,
        };
        if bg.0 != want {
            bg.0 = want;
        }
    }
}
