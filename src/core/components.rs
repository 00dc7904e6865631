use bevy::prelude::*;

use super::config::ValentineConfig;

/// Named text element whose content comes straight from the configuration.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentSlot {
    Headline,
    Question1Text,
    Question1Yes,
    Question1No,
    Question1Secret,
    Question2Text,
    Question2Start,
    Question2Next,
    Question3Text,
    Question3Yes,
    Question3No,
    CelebrationTitle,
    CelebrationMessage,
    CelebrationEmojis,
}

impl ContentSlot {
    pub const ALL: [ContentSlot; 14] = [
        ContentSlot::Headline,
        ContentSlot::Question1Text,
        ContentSlot::Question1Yes,
        ContentSlot::Question1No,
        ContentSlot::Question1Secret,
        ContentSlot::Question2Text,
        ContentSlot::Question2Start,
        ContentSlot::Question2Next,
        ContentSlot::Question3Text,
        ContentSlot::Question3Yes,
        ContentSlot::Question3No,
        ContentSlot::CelebrationTitle,
        ContentSlot::CelebrationMessage,
        ContentSlot::CelebrationEmojis,
    ];

    pub fn text(self, cfg: &ValentineConfig) -> String {
        let q = &cfg.questions;
        match self {
            ContentSlot::Headline => cfg.headline(),
            ContentSlot::Question1Text => q.first.text.clone(),
            ContentSlot::Question1Yes => q.first.yes_btn.clone(),
            ContentSlot::Question1No => q.first.no_btn.clone(),
            ContentSlot::Question1Secret => q.first.secret_answer.clone(),
            ContentSlot::Question2Text => q.second.text.clone(),
            ContentSlot::Question2Start => q.second.start_text.clone(),
            ContentSlot::Question2Next => q.second.next_btn.clone(),
            ContentSlot::Question3Text => q.third.text.clone(),
            ContentSlot::Question3Yes => q.third.yes_btn.clone(),
            ContentSlot::Question3No => q.third.no_btn.clone(),
            ContentSlot::CelebrationTitle => cfg.celebration.title.clone(),
            ContentSlot::CelebrationMessage => cfg.celebration.message.clone(),
            ContentSlot::CelebrationEmojis => cfg.celebration.emojis.clone(),
        }
    }
}

/// Text tinted with the configured `textColor`.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ThemedText;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_read_their_field() {
        let mut cfg = ValentineConfig::default();
        cfg.questions.second.next_btn = "Onwards".into();
        cfg.celebration.emojis = "🎉".into();
        assert_eq!(ContentSlot::Question2Next.text(&cfg), "Onwards");
        assert_eq!(ContentSlot::CelebrationEmojis.text(&cfg), "🎉");
        assert_eq!(ContentSlot::Headline.text(&cfg), cfg.headline());
    }
}
