use bevy::prelude::*;

use valentine::core::random::Randomness;
use valentine::gameplay::love_meter::{
    ExtraLoveText, LoveMeter, LoveMeterTrack, LoveValueText, SuperLove,
};
use valentine::{build_headless_app, ValentineConfig};

fn app() -> App {
    let mut app = build_headless_app(ValentineConfig::default(), Randomness::seeded(3));
    app.update();
    app
}

fn set_love(app: &mut App, value: u32) {
    app.world_mut().resource_mut::<LoveMeter>().set(value);
    app.update();
    // SuperLove is inserted/removed through commands.
    app.update();
}

struct Readout {
    value: String,
    extra_visible: bool,
    extra: String,
    super_love: bool,
    track_width: Val,
}

fn readout(app: &mut App) -> Readout {
    let value = {
        let mut q = app.world_mut().query_filtered::<&Text, With<LoveValueText>>();
        q.single(app.world()).expect("value text").0.clone()
    };
    let (extra_visible, extra, super_love) = {
        let mut q = app
            .world_mut()
            .query_filtered::<(&Node, &Text, Has<SuperLove>), With<ExtraLoveText>>();
        let (node, text, sup) = q.single(app.world()).expect("extra love text");
        (node.display != Display::None, text.0.clone(), sup)
    };
    let track_width = {
        let mut q = app.world_mut().query_filtered::<&Node, With<LoveMeterTrack>>();
        q.single(app.world()).expect("track").width
    };
    Readout {
        value,
        extra_visible,
        extra,
        super_love,
        track_width,
    }
}

#[test]
fn nominal_value_hides_extra_love() {
    let mut app = app();
    let r = readout(&mut app);
    assert_eq!(r.value, "100");
    assert!(!r.extra_visible);
    assert!(!r.super_love);
    assert_eq!(r.track_width, Val::Percent(100.0));
}

#[test]
fn just_past_nominal_shows_normal_message() {
    let mut app = app();
    set_love(&mut app, 150);
    let r = readout(&mut app);
    let cfg = ValentineConfig::default();
    assert_eq!(r.value, "150");
    assert!(r.extra_visible);
    assert_eq!(r.extra, cfg.love_messages.normal);
    assert!(!r.super_love);
    assert!(matches!(r.track_width, Val::Px(w) if w > 0.0));
}

#[test]
fn high_and_extreme_tiers() {
    let mut app = app();
    let cfg = ValentineConfig::default();

    set_love(&mut app, 1000);
    let r = readout(&mut app);
    assert_eq!(r.extra, cfg.love_messages.high);
    assert!(!r.super_love);

    set_love(&mut app, 5000);
    let r = readout(&mut app);
    assert_eq!(r.extra, cfg.love_messages.extreme);
    assert!(r.super_love);
    // 4900/9900 of 80% of the fallback viewport (no window, no layout).
    let expected = 4900.0 / 9900.0 * cfg.window.width * 0.8;
    match r.track_width {
        Val::Px(w) => assert!((w - expected).abs() < 0.5, "width {w} vs {expected}"),
        other => panic!("unexpected width {other:?}"),
    }
}

#[test]
fn dropping_back_resets_everything() {
    let mut app = app();
    set_love(&mut app, 9000);
    assert!(readout(&mut app).super_love);

    set_love(&mut app, 100);
    let r = readout(&mut app);
    assert!(!r.extra_visible);
    assert!(!r.super_love);
    assert_eq!(r.track_width, Val::Percent(100.0));
}

#[test]
fn values_clamp_to_maximum() {
    let mut app = app();
    set_love(&mut app, 1_000_000);
    assert_eq!(readout(&mut app).value, "10000");
}
