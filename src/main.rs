use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bevy::prelude::*;
use clap::Parser;

use valentine::core::config::{log_config_warnings, ConfigOverrides, ValentineConfig};
use valentine::core::random::Randomness;
use valentine::interaction::session::config_hot_reload::ConfigReloadSettings;
use valentine::ValentinePlugin;

const DEFAULT_CONFIG_LAYERS: [&str; 2] = [
    "assets/config/valentine.ron",
    "assets/config/valentine.local.ron",
];

#[cfg(target_arch = "wasm32")]
const EMBEDDED_CONFIG: &str = include_str!("../assets/config/valentine.ron");

#[derive(Parser, Debug)]
#[command(name = "valentine", version, about = "An interactive Valentine greeting")]
struct Cli {
    /// Config layers (RON/JSON/TOML); later files override earlier keys.
    #[arg(long = "config", short = 'c')]
    config: Vec<PathBuf>,
    /// Seed for floating element placement and button jumps.
    #[arg(long)]
    seed: Option<u64>,
    /// Exit after this many seconds (overrides window.autoClose).
    #[arg(long)]
    auto_close: Option<f32>,
    /// Validate the configuration, print warnings and exit.
    #[arg(long)]
    check: bool,
    /// Print the effective (validated) configuration as RON and exit.
    #[arg(long)]
    dump: bool,
    /// Do not watch config files for changes.
    #[arg(long)]
    no_hot_reload: bool,
}

/// Load results stashed until logging is up.
#[derive(Resource, Debug, Default)]
struct StartupDiagnostics {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn main() -> Result<()> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cli = Cli::parse();
    let layers: Vec<PathBuf> = if cli.config.is_empty() {
        DEFAULT_CONFIG_LAYERS
            .iter()
            .map(PathBuf::from)
            .filter(|p| p.exists())
            .collect()
    } else {
        cli.config.clone()
    };

    let (mut cfg, used, errors) = load_config(&layers);
    let warnings = cfg.validate();
    let overrides = ConfigOverrides {
        auto_close: cli.auto_close,
    };
    overrides.apply(&mut cfg);

    if cli.check || cli.dump {
        for e in &errors {
            eprintln!("error: {e}");
        }
        for w in &warnings {
            eprintln!("warning: {w}");
        }
        if cli.dump {
            let pretty = ron::ser::to_string_pretty(&cfg, ron::ser::PrettyConfig::default())
                .context("serialize effective config")?;
            println!("{pretty}");
        }
        if !errors.is_empty() {
            bail!("{} configuration error(s) in {:?}", errors.len(), layers);
        }
        if cli.check {
            println!("ok: {} layer(s), {} warning(s)", used.len(), warnings.len());
        }
        return Ok(());
    }

    let randomness = cli.seed.map(Randomness::seeded).unwrap_or_default();
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: cfg.page_title.clone(),
            resolution: (cfg.window.width, cfg.window.height).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(cfg)
    .insert_resource(randomness)
    .insert_resource(StartupDiagnostics {
        used,
        errors,
        warnings,
    })
    .add_systems(PreStartup, report_startup_diagnostics)
    .add_plugins(ValentinePlugin);
    if !cli.no_hot_reload && !layers.is_empty() {
        app.insert_resource(ConfigReloadSettings::new(layers).with_overrides(overrides));
    }
    app.run();
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(layers: &[PathBuf]) -> (ValentineConfig, Vec<String>, Vec<String>) {
    if layers.is_empty() {
        return (ValentineConfig::default(), Vec::new(), Vec::new());
    }
    ValentineConfig::load_layered(layers)
}

#[cfg(target_arch = "wasm32")]
fn load_config(_layers: &[PathBuf]) -> (ValentineConfig, Vec<String>, Vec<String>) {
    match ron::from_str::<ValentineConfig>(EMBEDDED_CONFIG) {
        Ok(cfg) => (cfg, vec!["<embedded>".into()], Vec::new()),
        Err(e) => (
            ValentineConfig::default(),
            Vec::new(),
            vec![format!("<embedded>: parse error: {e}")],
        ),
    }
}

fn report_startup_diagnostics(diag: Res<StartupDiagnostics>) {
    if diag.used.is_empty() {
        info!(target: "config", "No config files found; using built-in defaults");
    } else {
        info!(target: "config", "Config layers: {:?}", diag.used);
    }
    for e in &diag.errors {
        warn!(target: "config", "{e}");
    }
    log_config_warnings(&diag.warnings);
}
