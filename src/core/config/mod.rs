pub mod colors;
pub mod config;

pub use colors::{default_color, hex_to_color, is_valid_hex, ColorRole};
pub use config::{
    log_config_warnings, AcknowledgementConfig, AnimationConfig, CelebrationConfig,
    ConfigOverrides, FloatDuration, FloatingEmojis, LinksConfig, LoveMessages, MusicConfig,
    QuestionsConfig, StickerConfig, ValentineConfig, WindowConfig,
};
