//! Question flow driver: applies `FlowStage::advance` to answer presses.
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::app::state::{FlowOutcome, FlowStage, Prompt};
use crate::core::config::ValentineConfig;
use crate::core::random::Randomness;
use crate::core::system::system_order::FlowSet;
use crate::interaction::buttons::AnswerPressed;

use super::content::{DeclineButton, UiRoot};
use super::floating::HeartBurst;
use super::toast::ShowPrompt;

pub struct FlowPlugin;

impl Plugin for FlowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_answers.in_set(FlowSet))
            .add_systems(OnEnter(FlowStage::Celebration), enter_celebration);
    }
}

/// Random top-left corner keeping a `button`-sized box inside `viewport`.
pub fn decline_position(viewport: Vec2, button: Vec2, rng: &mut Randomness) -> Vec2 {
    Vec2::new(
        rng.range(0.0, (viewport.x - button.x).max(0.0)),
        rng.range(0.0, (viewport.y - button.y).max(0.0)),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn handle_answers(
    mut commands: Commands,
    cfg: Res<ValentineConfig>,
    stage: Res<State<FlowStage>>,
    mut next: ResMut<NextState<FlowStage>>,
    mut rng: ResMut<Randomness>,
    mut events: EventReader<AnswerPressed>,
    mut prompts: EventWriter<ShowPrompt>,
    windows: Query<&Window, With<PrimaryWindow>>,
    q_root: Query<Entity, With<UiRoot>>,
    mut q_decline: Query<(&mut Node, &ComputedNode), With<DeclineButton>>,
) {
    let current = *stage.get();
    for ev in events.read() {
        match current.advance(ev.answer) {
            FlowOutcome::Advance { to, prompt } => {
                if let Some(prompt) = prompt {
                    let text = match prompt {
                        Prompt::FirstYes => &cfg.acknowledgements.first_yes,
                        Prompt::Celebrate => &cfg.acknowledgements.celebrate,
                    };
                    prompts.write(ShowPrompt(text.clone()));
                }
                match current.question_number() {
                    Some(n) => info!(target: "flow", "Question {n} answered {:?}; now {:?}", ev.answer, to),
                    None => info!(target: "flow", "{:?} --{:?}--> {:?}", current, ev.answer, to),
                }
                next.set(to);
                // One transition per frame; later presses saw a stale stage.
                break;
            }
            FlowOutcome::Relocate => {
                let Ok((mut node, computed)) = q_decline.get_mut(ev.button) else {
                    continue;
                };
                let viewport = windows
                    .single()
                    .map(|w| Vec2::new(w.width(), w.height()))
                    .unwrap_or(Vec2::new(cfg.window.width, cfg.window.height));
                let size = computed.size() * computed.inverse_scale_factor();
                let pos = decline_position(viewport, size, &mut rng);
                node.position_type = PositionType::Absolute;
                node.left = Val::Px(pos.x);
                node.top = Val::Px(pos.y);
                if let Some(root) = q_root.iter().next() {
                    commands.entity(root).add_child(ev.button);
                }
                commands.entity(ev.button).insert(GlobalZIndex(8));
                debug!(target: "flow", "decline button moved to ({:.0}, {:.0})", pos.x, pos.y);
            }
            FlowOutcome::Ignore => {
                debug!(target: "flow", "{:?} ignored in {:?}", ev.answer, current);
            }
        }
    }
}

fn enter_celebration(mut burst: EventWriter<HeartBurst>) {
    info!(target: "flow", "Celebration!");
    burst.write(HeartBurst);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    #[test]
    fn decline_stays_on_screen() {
        let mut rng = Randomness::seeded(11);
        let viewport = Vec2::new(800.0, 600.0);
        let button = Vec2::new(120.0, 40.0);
        for _ in 0..500 {
            let p = decline_position(viewport, button, &mut rng);
            assert!(p.x >= 0.0 && p.x + button.x <= viewport.x);
            assert!(p.y >= 0.0 && p.y + button.y <= viewport.y);
        }
    }

    #[test]
    fn oversized_button_pins_to_origin() {
        let mut rng = Randomness::new(ScriptedRandom::new([0.9]));
        let p = decline_position(Vec2::new(100.0, 100.0), Vec2::new(200.0, 50.0), &mut rng);
        assert_eq!(p.x, 0.0);
        assert!((p.y - 45.0).abs() < 1e-4);
    }
}
