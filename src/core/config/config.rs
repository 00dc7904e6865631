use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, fs, path::Path};

use super::colors::{default_color, is_valid_hex, ColorRole};

pub const DEFAULT_VALENTINE_NAME: &str = "Shivani";
pub const MIN_FLOAT_DURATION_SECS: f32 = 5.0;
pub const DEFAULT_HEART_EXPLOSION_SIZE: f32 = 2.0;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 720.0,
            auto_close: 0.0,
        }
    }
}

/// Float animation duration as written by the page author: either a bare number
/// of seconds (`8.0`) or text with an optional unit suffix (`"8s"`).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum FloatDuration {
    Seconds(f32),
    Text(String),
}
impl Default for FloatDuration {
    fn default() -> Self {
        FloatDuration::Text("10s".into())
    }
}
impl FloatDuration {
    pub fn minimum() -> Self {
        FloatDuration::Text("5s".into())
    }

    /// Numeric seconds, ignoring any unit suffix. `None` when no leading number exists.
    pub fn seconds(&self) -> Option<f32> {
        match self {
            FloatDuration::Seconds(s) => Some(*s),
            FloatDuration::Text(t) => leading_float(t),
        }
    }
}
impl fmt::Display for FloatDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatDuration::Seconds(s) => write!(f, "{s}s"),
            FloatDuration::Text(t) => f.write_str(t),
        }
    }
}

/// Longest numeric prefix of `text` (after leading whitespace), e.g. `"7.5s"` -> 7.5.
fn leading_float(text: &str) -> Option<f32> {
    let t = text.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let bytes = t.as_bytes();
    while end < bytes.len() {
        let c = bytes[end];
        let ok = match c {
            b'0'..=b'9' => {
                seen_digit = true;
                true
            }
            b'+' | b'-' => end == 0 || matches!(bytes[end - 1], b'e' | b'E'),
            b'.' if !seen_dot && !seen_exp => {
                seen_dot = true;
                true
            }
            b'e' | b'E' if seen_digit && !seen_exp => {
                seen_exp = true;
                true
            }
            _ => false,
        };
        if !ok {
            break;
        }
        end += 1;
    }
    // Back off trailing characters that leave an incomplete number ("5e", "5e-", "-").
    (1..=end).rev().find_map(|n| t[..n].parse::<f32>().ok())
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    pub float_duration: FloatDuration,
    pub heart_explosion_size: f32,
}
impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            float_duration: FloatDuration::default(),
            heart_explosion_size: 1.5,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FirstQuestion {
    pub text: String,
    pub yes_btn: String,
    pub no_btn: String,
    pub secret_answer: String,
}
impl Default for FirstQuestion {
    fn default() -> Self {
        Self {
            text: "Do you like me?".into(),
            yes_btn: "Yes".into(),
            no_btn: "No".into(),
            secret_answer: "I don't like you, I love you! ❤️".into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SecondQuestion {
    pub text: String,
    pub start_text: String,
    pub next_btn: String,
}
impl Default for SecondQuestion {
    fn default() -> Self {
        Self {
            text: "How much do you love me?".into(),
            start_text: "This much!".into(),
            next_btn: "Next ❤️".into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ThirdQuestion {
    pub text: String,
    pub yes_btn: String,
    pub no_btn: String,
}
impl Default for ThirdQuestion {
    fn default() -> Self {
        Self {
            text: "Will you be my Valentine? 🌹".into(),
            yes_btn: "Yes!".into(),
            no_btn: "No".into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct QuestionsConfig {
    pub first: FirstQuestion,
    pub second: SecondQuestion,
    pub third: ThirdQuestion,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FloatingEmojis {
    pub hearts: Vec<String>,
    pub bears: Vec<String>,
}
impl Default for FloatingEmojis {
    fn default() -> Self {
        Self {
            hearts: ["❤️", "💖", "💝", "💗", "💓"].map(String::from).to_vec(),
            bears: ["🧸", "🐻"].map(String::from).to_vec(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoveMessages {
    pub normal: String,
    pub high: String,
    pub extreme: String,
}
impl Default for LoveMessages {
    fn default() -> Self {
        Self {
            normal: "And beyond! 🥰".into(),
            high: "To infinity and beyond! 🚀💝".into(),
            extreme: "WOOOOW You love me that much?? 🥰🚀💝".into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CelebrationConfig {
    pub title: String,
    pub message: String,
    pub emojis: String,
}
impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            title: "Yay! I'm the luckiest person in the world! 🎉💝💖💝💓".into(),
            message: "Now come get your gift, a big warm hug and a huge kiss!".into(),
            emojis: "🎁💖🤗💝💋❤️💕".into(),
        }
    }
}

/// Prompt texts shown when a question is answered affirmatively.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AcknowledgementConfig {
    pub first_yes: String,
    pub celebrate: String,
}
impl Default for AcknowledgementConfig {
    fn default() -> Self {
        Self {
            first_yes: "Ohh my god! 😳❤️".into(),
            celebrate: "Sachhii! 😳❤️".into(),
        }
    }
}

/// Sticker pinned to the top of the card. An empty `href` means the sticker is not a link.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct StickerConfig {
    pub enabled: bool,
    pub text: String,
    pub emoji: String,
    pub href: String,
    pub id: String,
}
impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text: "Are you a princess?".into(),
            emoji: "👑".into(),
            href: String::new(),
            id: "topSticker".into(),
        }
    }
}
impl StickerConfig {
    pub fn link(&self) -> Option<&str> {
        let href = self.href.trim();
        (!href.is_empty()).then_some(href)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LinksConfig {
    pub flower_page: String,
    pub music_video: String,
}
impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            flower_page: "flower.html".into(),
            music_video: "https://www.youtube.com/watch?v=RVeLrwoB_xw".into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct MusicConfig {
    /// Asset path (relative to `assets/`).
    pub track: String,
    pub volume: f32,
}
impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            track: "audio/bg_music.wav".into(),
            volume: 0.6,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Resource, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ValentineConfig {
    pub valentine_name: String,
    pub page_title: String,
    /// Appended to the name in the headline.
    pub title_suffix: String,
    pub colors: BTreeMap<String, String>,
    pub animations: AnimationConfig,
    pub questions: QuestionsConfig,
    pub floating_emojis: FloatingEmojis,
    pub love_messages: LoveMessages,
    pub celebration: CelebrationConfig,
    pub acknowledgements: AcknowledgementConfig,
    pub sticker: StickerConfig,
    pub links: LinksConfig,
    pub music: MusicConfig,
    pub window: WindowConfig,
    /// Font asset used for every text node; empty = Bevy's default font.
    pub font: String,
    /// Font asset for emoji-only text; empty = first system colour emoji font.
    pub emoji_font: String,
}
impl Default for ValentineConfig {
    fn default() -> Self {
        Self {
            valentine_name: DEFAULT_VALENTINE_NAME.into(),
            page_title: "For You 💝".into(),
            title_suffix: ", the chatgpt bhalu...".into(),
            colors: default_colors(),
            animations: Default::default(),
            questions: Default::default(),
            floating_emojis: Default::default(),
            love_messages: Default::default(),
            celebration: Default::default(),
            acknowledgements: Default::default(),
            sticker: StickerConfig {
                enabled: true,
                text: "Are you a princess, Shivani?".into(),
                emoji: "🌸".into(),
                href: "https://www.crazygames.com/game/cloudy-with-a-chance-of-kittens".into(),
                id: "shivaniPrincessSticker".into(),
            },
            links: Default::default(),
            music: Default::default(),
            window: Default::default(),
            font: String::new(),
            emoji_font: String::new(),
        }
    }
}

fn default_colors() -> BTreeMap<String, String> {
    ColorRole::ALL
        .into_iter()
        .map(|r| (r.key().to_string(), r.default_hex().to_string()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Ron,
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("json") => Format::Json,
            Some(e) if e.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Ron,
        }
    }

    fn parse_value(self, txt: &str) -> Result<ron::Value, String> {
        match self {
            Format::Ron => ron::from_str(txt).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(txt).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(txt).map_err(|e| e.to_string()),
        }
    }
}

impl ValentineConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| format!("read config: {e}"))?;
        match Format::of(path) {
            Format::Ron => ron::from_str(&data).map_err(|e| format!("parse RON: {e}")),
            Format::Json => serde_json::from_str(&data).map_err(|e| format!("parse JSON: {e}")),
            Format::Toml => toml::from_str(&data).map_err(|e| format!("parse TOML: {e}")),
        }
    }

    /// Merge every readable file in order (later keys override earlier ones) and
    /// deserialize the result. Returns the config, the paths actually used and
    /// the per-file errors. Missing or broken files are skipped.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match Format::of(path_ref).parse_value(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (Self::default(), used, errors);
        };
        match val.into_rust::<ValentineConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!("failed to deserialize merged config; using defaults: {e}"));
                (Self::default(), used, errors)
            }
        }
    }

    /// Correct invalid fields in place, returning one warning per correction.
    pub fn validate(&mut self) -> Vec<String> {
        let mut w = Vec::new();

        if self.valentine_name.is_empty() {
            w.push("Valentine's name is not set! Using default.".into());
            self.valentine_name = DEFAULT_VALENTINE_NAME.into();
        }

        let mut unknown = Vec::new();
        for (key, value) in self.colors.iter_mut() {
            if is_valid_hex(value) {
                continue;
            }
            match default_color(key) {
                Some(fallback) => {
                    w.push(format!("Invalid color for {key}! Using default."));
                    *value = fallback.into();
                }
                None => {
                    w.push(format!(
                        "Invalid color for {key}! No default for this role; entry dropped."
                    ));
                    unknown.push(key.clone());
                }
            }
        }
        for key in unknown {
            self.colors.remove(&key);
        }
        // Absent roles are not defects; fill them so every role resolves.
        for role in ColorRole::ALL {
            self.colors
                .entry(role.key().to_string())
                .or_insert_with(|| role.default_hex().to_string());
        }

        let too_short = match self.animations.float_duration.seconds() {
            Some(s) => s.is_nan() || s < MIN_FLOAT_DURATION_SECS,
            None => true,
        };
        if too_short {
            w.push("Float duration too short! Setting to 5s minimum.".into());
            self.animations.float_duration = FloatDuration::minimum();
        }

        if !(1.0..=3.0).contains(&self.animations.heart_explosion_size) {
            w.push("Heart explosion size should be between 1 and 3! Using default.".into());
            self.animations.heart_explosion_size = DEFAULT_HEART_EXPLOSION_SIZE;
        }

        w
    }

    /// Hex value for a role. Total after `validate`.
    pub fn color_hex(&self, role: ColorRole) -> &str {
        self.colors
            .get(role.key())
            .map(String::as_str)
            .unwrap_or(role.default_hex())
    }

    pub fn color(&self, role: ColorRole) -> Color {
        super::colors::hex_to_color(self.color_hex(role))
    }

    /// Headline shown above the questions.
    pub fn headline(&self) -> String {
        format!("{}{}", self.valentine_name, self.title_suffix)
    }

    /// Float animation period in seconds (validated minimum applies).
    pub fn float_period_secs(&self) -> f32 {
        self.animations
            .float_duration
            .seconds()
            .unwrap_or(MIN_FLOAT_DURATION_SECS)
            .max(MIN_FLOAT_DURATION_SECS)
    }
}

/// Command-line values layered over every loaded configuration, including
/// ones produced by a hot reload.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub auto_close: Option<f32>,
}

impl ConfigOverrides {
    pub fn apply(&self, cfg: &mut ValentineConfig) {
        if let Some(secs) = self.auto_close {
            cfg.window.auto_close = secs.max(0.0);
        }
    }
}

/// Emit the validator's diagnostic listing. Nothing is logged for a clean config.
pub fn log_config_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    warn!(target: "config", "⚠️ Configuration Warnings:");
    for warning in warnings {
        warn!(target: "config", "- {warning}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_clean() {
        let mut cfg = ValentineConfig::default();
        assert!(cfg.validate().is_empty());
        assert_eq!(cfg, ValentineConfig::default());
    }

    #[test]
    fn missing_name_gets_default_and_one_warning() {
        let mut cfg = ValentineConfig {
            valentine_name: String::new(),
            ..Default::default()
        };
        let w = cfg.validate();
        assert_eq!(w.len(), 1);
        assert!(w[0].contains("name"));
        assert_eq!(cfg.valentine_name, DEFAULT_VALENTINE_NAME);
    }

    #[test]
    fn whitespace_name_is_kept() {
        let mut cfg = ValentineConfig {
            valentine_name: "   ".into(),
            ..Default::default()
        };
        assert!(cfg.validate().is_empty());
        assert_eq!(cfg.valentine_name, "   ");
    }

    #[test]
    fn invalid_colors_replaced_per_role() {
        let mut cfg = ValentineConfig::default();
        cfg.colors.insert("buttonHover".into(), "pink".into());
        cfg.colors.insert("textColor".into(), "#12345".into());
        cfg.colors.insert("backgroundStart".into(), "#ABC".into());
        let w = cfg.validate();
        assert_eq!(w.len(), 2);
        assert_eq!(cfg.colors["buttonHover"], "#ff8787");
        assert_eq!(cfg.colors["textColor"], "#ff4757");
        assert_eq!(cfg.colors["backgroundStart"], "#ABC");
    }

    #[test]
    fn unknown_role_with_bad_value_is_dropped() {
        let mut cfg = ValentineConfig::default();
        cfg.colors.insert("borderColor".into(), "nope".into());
        cfg.colors.insert("accent".into(), "#0f0".into());
        let w = cfg.validate();
        assert_eq!(w.len(), 1);
        assert!(w[0].contains("borderColor"));
        assert!(!cfg.colors.contains_key("borderColor"));
        assert_eq!(cfg.colors["accent"], "#0f0");
    }

    #[test]
    fn absent_roles_filled_silently() {
        let mut cfg = ValentineConfig {
            colors: BTreeMap::new(),
            ..Default::default()
        };
        assert!(cfg.validate().is_empty());
        for role in ColorRole::ALL {
            assert_eq!(cfg.color_hex(role), role.default_hex());
        }
    }

    #[test]
    fn float_duration_clamped() {
        let mut cfg = ValentineConfig::default();
        cfg.animations.float_duration = FloatDuration::Text("3s".into());
        assert_eq!(cfg.validate().len(), 1);
        assert_eq!(cfg.animations.float_duration, FloatDuration::Text("5s".into()));

        cfg.animations.float_duration = FloatDuration::Text("8s".into());
        assert!(cfg.validate().is_empty());
        assert_eq!(cfg.animations.float_duration, FloatDuration::Text("8s".into()));

        cfg.animations.float_duration = FloatDuration::Seconds(4.99);
        assert_eq!(cfg.validate().len(), 1);
        assert_eq!(cfg.animations.float_duration.to_string(), "5s");

        cfg.animations.float_duration = FloatDuration::Text("fast".into());
        assert_eq!(cfg.validate().len(), 1);
    }

    #[test]
    fn leading_float_parsing() {
        assert_eq!(leading_float("8s"), Some(8.0));
        assert_eq!(leading_float(" 7.5sec"), Some(7.5));
        assert_eq!(leading_float("5"), Some(5.0));
        assert_eq!(leading_float("1e1s"), Some(10.0));
        assert_eq!(leading_float("5e"), Some(5.0));
        assert_eq!(leading_float("-2s"), Some(-2.0));
        assert_eq!(leading_float("s5"), None);
        assert_eq!(leading_float(""), None);
    }

    #[test]
    fn heart_explosion_size_range() {
        for bad in [0.0, 3.5, f32::NAN] {
            let mut cfg = ValentineConfig::default();
            cfg.animations.heart_explosion_size = bad;
            assert_eq!(cfg.validate().len(), 1);
            assert_eq!(cfg.animations.heart_explosion_size, 2.0);
        }
        for ok in [1.0, 2.5, 3.0] {
            let mut cfg = ValentineConfig::default();
            cfg.animations.heart_explosion_size = ok;
            assert!(cfg.validate().is_empty());
            assert_eq!(cfg.animations.heart_explosion_size, ok);
        }
    }

    #[test]
    fn headline_joins_name_and_suffix() {
        let cfg = ValentineConfig {
            valentine_name: "Mia".into(),
            title_suffix: ", my love".into(),
            ..Default::default()
        };
        assert_eq!(cfg.headline(), "Mia, my love");
    }
}
