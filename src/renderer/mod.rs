//! Rendering module
//!
//! Frames are drawn through the `Canvas` trait: Canvas2D in the browser, a
//! command recorder everywhere else.

pub mod canvas;
pub mod palette;
pub mod recorder;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use canvas::{Canvas, Color, Glow, Stroke};
pub use recorder::{DrawCommand, Recorder};
#[cfg(target_arch = "wasm32")]
pub use web::Canvas2d;
