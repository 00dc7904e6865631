//! UI tree for the greeting card and binding of configured strings onto it.
use bevy::prelude::*;

use crate::app::state::{Answer, FlowStage};
use crate::core::components::{ContentSlot, ThemedText};
use crate::core::config::ValentineConfig;
use crate::core::system::system_order::PresentationSet;
use crate::interaction::buttons::{ButtonAction, ThemedButton};
use crate::rendering::fonts::fonts::UiFont;
use crate::rendering::palette::palette::{ThemePalette, UiCard};

use super::floating::{Bob, FloatingLayer};
use super::love_meter::spawn_love_meter;
use super::sticker::StickerHost;

pub const HEADLINE_SIZE: f32 = 34.0;
pub const QUESTION_SIZE: f32 = 26.0;
pub const BODY_SIZE: f32 = 20.0;
pub const BUTTON_SIZE: f32 = 20.0;

const FLOWER_LABEL: &str = "🌸 Open flower";
const MUSIC_VIDEO_LABEL: &str = "🎵 Our song";
const SPECIAL_MUSIC_LABEL: &str = "🎶 Play music";

/// Full-screen root; relocated decline buttons are re-parented here so their
/// absolute position is relative to the viewport.
#[derive(Component)]
pub struct UiRoot;

/// Question card contents for one stage; visible only while that stage is active.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSection(pub FlowStage);

#[derive(Component)]
pub struct CelebrationPanel;

/// Decline button that jumps away when pressed. Once relocated it lives under
/// `UiRoot`, so it is shown or hidden by its own stage.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclineButton(pub FlowStage);

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ui).add_systems(
            Update,
            (bind_content, apply_stage_visibility).in_set(PresentationSet),
        );
    }
}

pub fn spawn_ui(
    mut commands: Commands,
    cfg: Res<ValentineConfig>,
    font: Res<UiFont>,
    palette: Res<ThemePalette>,
) {
    let root = commands
        .spawn((
            UiRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
        ))
        .id();

    commands.entity(root).with_children(|p| {
        p.spawn((
            FloatingLayer,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                overflow: Overflow::clip(),
                ..default()
            },
            ZIndex(-1),
        ));

        p.spawn((
            UiCard,
            StickerHost,
            Bob::default(),
            Node {
                width: Val::Percent(70.0),
                max_width: Val::Px(640.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::axes(Val::Px(32.0), Val::Px(40.0)),
                row_gap: Val::Px(18.0),
                ..default()
            },
            BackgroundColor(palette.background_end),
            BorderRadius::all(Val::Px(24.0)),
        ))
        .with_children(|card| {
            slot_text(card, &cfg, &font, &palette, ContentSlot::Headline, HEADLINE_SIZE);

            card.spawn((QuestionSection(FlowStage::Question1), section_node()))
                .with_children(|s| {
                    slot_text(s, &cfg, &font, &palette, ContentSlot::Question1Text, QUESTION_SIZE);
                    s.spawn(row_node()).with_children(|row| {
                        slot_button(row, &cfg, &font, &palette, ContentSlot::Question1Yes, Answer::Yes, ());
                        slot_button(row, &cfg, &font, &palette, ContentSlot::Question1No, Answer::No, DeclineButton(FlowStage::Question1));
                    });
                    slot_button(s, &cfg, &font, &palette, ContentSlot::Question1Secret, Answer::Secret, ());
                });

            card.spawn((QuestionSection(FlowStage::Question2), hidden(section_node())))
                .with_children(|s| {
                    slot_text(s, &cfg, &font, &palette, ContentSlot::Question2Text, QUESTION_SIZE);
                    slot_text(s, &cfg, &font, &palette, ContentSlot::Question2Start, BODY_SIZE);
                    spawn_love_meter(s, &font, &palette);
                    slot_button(s, &cfg, &font, &palette, ContentSlot::Question2Next, Answer::Next, ());
                });

            card.spawn((QuestionSection(FlowStage::Question3), hidden(section_node())))
                .with_children(|s| {
                    slot_text(s, &cfg, &font, &palette, ContentSlot::Question3Text, QUESTION_SIZE);
                    s.spawn(row_node()).with_children(|row| {
                        slot_button(row, &cfg, &font, &palette, ContentSlot::Question3Yes, Answer::Yes, ());
                        slot_button(row, &cfg, &font, &palette, ContentSlot::Question3No, Answer::No, DeclineButton(FlowStage::Question3));
                    });
                });

            card.spawn((CelebrationPanel, hidden(section_node())))
                .with_children(|s| {
                    slot_text(s, &cfg, &font, &palette, ContentSlot::CelebrationTitle, QUESTION_SIZE);
                    slot_text(s, &cfg, &font, &palette, ContentSlot::CelebrationMessage, BODY_SIZE);
                    slot_text(s, &cfg, &font, &palette, ContentSlot::CelebrationEmojis, HEADLINE_SIZE);
                });
        });

        p.spawn(row_node()).with_children(|row| {
            action_button(row, &font, &palette, FLOWER_LABEL, ButtonAction::OpenFlowerPage);
            action_button(row, &font, &palette, MUSIC_VIDEO_LABEL, ButtonAction::OpenMusicVideo);
            action_button(row, &font, &palette, SPECIAL_MUSIC_LABEL, ButtonAction::PlaySpecialMusic);
        });
    });
    info!(target: "content", "UI spawned for '{}'", cfg.valentine_name);
}

fn section_node() -> Node {
    Node {
        flex_direction: FlexDirection::Column,
        align_items: AlignItems::Center,
        row_gap: Val::Px(14.0),
        width: Val::Percent(100.0),
        ..default()
    }
}

fn row_node() -> Node {
    Node {
        flex_direction: FlexDirection::Row,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        column_gap: Val::Px(16.0),
        ..default()
    }
}

fn hidden(mut node: Node) -> Node {
    node.display = Display::None;
    node
}

fn slot_text(
    p: &mut ChildSpawnerCommands,
    cfg: &ValentineConfig,
    font: &UiFont,
    palette: &ThemePalette,
    slot: ContentSlot,
    size: f32,
) -> Entity {
    p.spawn((
        slot,
        ThemedText,
        Text::new(slot.text(cfg)),
        if slot == ContentSlot::CelebrationEmojis {
            font.emoji_sized(size)
        } else {
            font.sized(size)
        },
        TextColor(palette.text),
        TextLayout::new_with_justify(JustifyText::Center),
    ))
    .id()
}

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(22.0), Val::Px(10.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

fn slot_button(
    p: &mut ChildSpawnerCommands,
    cfg: &ValentineConfig,
    font: &UiFont,
    palette: &ThemePalette,
    slot: ContentSlot,
    answer: Answer,
    extra: impl Bundle,
) -> Entity {
    p.spawn((
        extra,
        Button,
        ThemedButton,
        ButtonAction::Answer(answer),
        button_node(),
        BackgroundColor(palette.button),
        BorderRadius::all(Val::Px(18.0)),
    ))
    .with_children(|b| {
        b.spawn((
            slot,
            Text::new(slot.text(cfg)),
            font.sized(BUTTON_SIZE),
            TextColor(Color::WHITE),
        ));
    })
    .id()
}

fn action_button(
    p: &mut ChildSpawnerCommands,
    font: &UiFont,
    palette: &ThemePalette,
    label: &str,
    action: ButtonAction,
) {
    p.spawn((
        Button,
        ThemedButton,
        action,
        button_node(),
        BackgroundColor(palette.button),
        BorderRadius::all(Val::Px(18.0)),
    ))
    .with_children(|b| {
        b.spawn((Text::new(label), font.sized(BODY_SIZE), TextColor(Color::WHITE)));
    });
}

/// Copy configured strings into their slots on config change or when slots appear.
pub fn bind_content(cfg: Res<ValentineConfig>, mut q: Query<(Ref<ContentSlot>, &mut Text)>) {
    let all = cfg.is_changed();
    for (slot, mut text) in &mut q {
        if !all && !slot.is_added() {
            continue;
        }
        let want = slot.text(&cfg);
        if text.as_str() != want {
            **text = want;
        }
    }
}

/// Show the active question section (or the celebration panel) and hide the rest.
pub fn apply_stage_visibility(
    stage: Res<State<FlowStage>>,
    mut q_sections: Query<(&QuestionSection, &mut Node), Without<CelebrationPanel>>,
    mut q_celebration: Query<&mut Node, With<CelebrationPanel>>,
    mut q_decline: Query<(&DeclineButton, &mut Node), (Without<QuestionSection>, Without<CelebrationPanel>)>,
) {
    let current = *stage.get();
    for (section, mut node) in &mut q_sections {
        let want = if section.0 == current { Display::Flex } else { Display::None };
        if node.display != want {
            node.display = want;
        }
    }
    let want = if current == FlowStage::Celebration { Display::Flex } else { Display::None };
    for mut node in &mut q_celebration {
        if node.display != want {
            node.display = want;
        }
    }
    for (decline, mut node) in &mut q_decline {
        let want = if decline.0 == current { Display::Flex } else { Display::None };
        if node.display != want {
            node.display = want;
        }
    }
}
