pub mod app;
pub mod components;
pub mod keymap;
pub mod theme;

pub use app::{run, viewport_height};
pub use theme::Theme;
