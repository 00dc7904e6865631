use bevy::prelude::*;

/// Question flow.
/// Question1 -> Question2 -> Question3 -> Celebration (terminal, no way back)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum FlowStage {
    /// "Do you like me?" with an unrejectable decline button.
    #[default]
    Question1,
    /// Love meter.
    Question2,
    Question3,
    Celebration,
}

/// Answer controls present on the question cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    Yes,
    No,
    /// Alternate affirmative on the first question.
    Secret,
    Next,
}

/// Acknowledgement shown while advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prompt {
    FirstYes,
    Celebrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    Advance {
        to: FlowStage,
        prompt: Option<Prompt>,
    },
    /// Move the decline control somewhere else on screen; the stage is unchanged.
    Relocate,
    Ignore,
}

impl FlowStage {
    pub fn advance(self, answer: Answer) -> FlowOutcome {
        use FlowStage::*;
        match (self, answer) {
            (Question1, Answer::Yes | Answer::Secret) => FlowOutcome::Advance {
                to: Question2,
                prompt: Some(Prompt::FirstYes),
            },
            (Question1 | Question3, Answer::No) => FlowOutcome::Relocate,
            (Question2, Answer::Next) => FlowOutcome::Advance {
                to: Question3,
                prompt: None,
            },
            (Question3, Answer::Yes) => FlowOutcome::Advance {
                to: Celebration,
                prompt: Some(Prompt::Celebrate),
            },
            _ => FlowOutcome::Ignore,
        }
    }

    /// 1-based question number, `None` once celebrating.
    pub fn question_number(self) -> Option<u8> {
        match self {
            FlowStage::Question1 => Some(1),
            FlowStage::Question2 => Some(2),
            FlowStage::Question3 => Some(3),
            FlowStage::Celebration => None,
        }
    }
}
