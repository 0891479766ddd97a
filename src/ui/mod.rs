pub mod braille;
pub mod hud;
pub mod overlay;
pub mod render;

pub use render::{field_y_for_row, render, RenderContext};
