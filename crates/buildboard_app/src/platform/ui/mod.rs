pub mod layout;
pub mod render;
pub mod theme;
