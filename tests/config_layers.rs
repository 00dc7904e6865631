use std::path::PathBuf;

use valentine::core::config::{FloatDuration, ValentineConfig};

fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).expect("write layer");
    path
}

#[test]
fn shipped_config_is_clean() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/config/valentine.ron");
    let mut cfg = ValentineConfig::load_from_file(&path).expect("shipped config parses");
    let warnings = cfg.validate();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(cfg.colors.len(), 5);
}

#[test]
fn later_layers_override_nested_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = write(
        &dir,
        "base.ron",
        r##"(
            valentineName: "Ada",
            questions: (first: (text: "Do you like me?", yesBtn: "Yes")),
            colors: {"textColor": "#111111"},
        )"##,
    );
    let json = write(
        &dir,
        "override.json",
        r#"{ "questions": { "first": { "yesBtn": "Of course" } }, "animations": { "floatDuration": "12s" } }"#,
    );
    let toml = write(
        &dir,
        "local.toml",
        "pageTitle = \"Hi\"\n[colors]\nbuttonBackground = \"#123\"\n",
    );

    let (mut cfg, used, errors) = ValentineConfig::load_layered([&base, &json, &toml]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 3);
    let warnings = cfg.validate();
    assert!(warnings.is_empty(), "{warnings:?}");

    assert_eq!(cfg.valentine_name, "Ada");
    assert_eq!(cfg.page_title, "Hi");
    assert_eq!(cfg.questions.first.text, "Do you like me?");
    assert_eq!(cfg.questions.first.yes_btn, "Of course");
    assert_eq!(cfg.animations.float_duration, FloatDuration::Text("12s".into()));
    assert_eq!(cfg.colors["textColor"], "#111111");
    assert_eq!(cfg.colors["buttonBackground"], "#123");
    // Roles absent from every layer are filled in by validation.
    assert_eq!(cfg.colors["backgroundStart"], "#ffafbd");
}

#[test]
fn broken_layers_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = write(&dir, "good.ron", r#"(valentineName: "Ada")"#);
    let bad = write(&dir, "bad.json", "{ not json");
    let missing = dir.path().join("missing.ron");

    let (cfg, used, errors) = ValentineConfig::load_layered([good, bad, missing]);
    assert_eq!(cfg.valentine_name, "Ada");
    assert_eq!(used.len(), 1);
    assert_eq!(errors.len(), 2);
}

#[test]
fn nothing_readable_means_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (cfg, used, errors) = ValentineConfig::load_layered([dir.path().join("nope.ron")]);
    assert!(used.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(cfg, ValentineConfig::default());
}

#[test]
fn invalid_values_from_file_are_corrected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "v.json",
        r#"{
            "valentineName": "",
            "colors": { "buttonHover": "red" },
            "animations": { "floatDuration": "2s", "heartExplosionSize": 7 }
        }"#,
    );
    let (mut cfg, _, errors) = ValentineConfig::load_layered([path]);
    assert!(errors.is_empty(), "{errors:?}");
    let warnings = cfg.validate();
    assert_eq!(warnings.len(), 4, "{warnings:?}");
    assert_eq!(cfg.valentine_name, "Shivani");
    assert_eq!(cfg.colors["buttonHover"], "#ff8787");
    assert_eq!(cfg.animations.float_duration, FloatDuration::minimum());
    assert_eq!(cfg.animations.heart_explosion_size, 2.0);
}
