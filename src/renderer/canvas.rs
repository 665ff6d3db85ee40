//! Drawing surface abstraction
//!
//! The radar draws through this trait so the same frame code runs against a
//! browser Canvas2D context or an in-memory recorder.

use glam::DVec2;
use std::fmt;

/// RGBA colour, alpha in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// CSS colour string
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Line style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// `[dash, gap]` in px; solid when `None`
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub const fn dashed(color: Color, width: f64, dash: [f64; 2]) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// Soft halo drawn around a filled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f64,
}

/// A 2D drawing surface
pub trait Canvas {
    /// Wipe the full surface
    fn clear(&mut self, width: f64, height: f64);

    /// Stroke an arc from `start` to `end` radians (a full circle for `0..TAU`)
    fn stroke_arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64, stroke: Stroke);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color, glow: Option<Glow>);

    fn line(&mut self, from: DVec2, to: DVec2, stroke: Stroke);

    fn text(&mut self, pos: DVec2, text: &str, color: Color);

    /// Whether the central body image has finished loading
    fn body_image_ready(&self) -> bool;

    /// Draw the central body image centred on `center`, rotated, `size` px square
    fn draw_body_image(&mut self, center: DVec2, rotation: f64, size: f64);

    fn stroke_circle(&mut self, center: DVec2, radius: f64, stroke: Stroke) {
        self.stroke_arc(center, radius, 0.0, std::f64::consts::TAU, stroke);
    }
}
