pub mod buttons;
pub mod links;
pub mod session;
