pub mod camera;
pub mod fonts;
pub mod palette;
