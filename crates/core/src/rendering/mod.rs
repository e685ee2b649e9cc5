//! Overlay drawing and frame compositing.

mod canvas;
pub mod compose;
pub mod legend;
pub mod overlay;
pub mod text;

pub use compose::{compose, render_overlay, RenderError};
pub use legend::build_legend;
pub use overlay::{draw_boxes, draw_landmarks};
