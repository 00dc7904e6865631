pub mod content;
pub mod floating;
pub mod flow;
pub mod love_meter;
pub mod sticker;
pub mod toast;
