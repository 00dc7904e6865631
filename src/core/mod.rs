pub mod components;
pub mod config;
pub mod random;
pub mod system;
