pub mod app;
pub mod core;
pub mod gameplay;
pub mod interaction;
pub mod rendering;

// Curated re-exports
pub use app::game::{build_headless_app, ValentinePlugin};
pub use app::state::FlowStage;
pub use core::config::ValentineConfig;
pub use core::random::{RandomSource, Randomness};
