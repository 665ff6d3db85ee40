//! In-memory canvas that records draw calls (tests and headless runs)

use glam::DVec2;

use super::canvas::{Canvas, Color, Glow, Stroke};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Arc {
        center: DVec2,
        radius: f64,
        start: f64,
        end: f64,
        stroke: Stroke,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        color: Color,
        glow: Option<Glow>,
    },
    Line {
        from: DVec2,
        to: DVec2,
        stroke: Stroke,
    },
    Text {
        pos: DVec2,
        text: String,
        color: Color,
    },
    BodyImage {
        center: DVec2,
        rotation: f64,
        size: f64,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
    /// Pretend the central body image has loaded
    pub body_ready: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body_image() -> Self {
        Self {
            commands: Vec::new(),
            body_ready: true,
        }
    }

    /// Forget everything drawn so far
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn filled_circles(&self) -> impl Iterator<Item = (DVec2, f64, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillCircle {
                center,
                radius,
                color,
                ..
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (DVec2, DVec2, Stroke)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, stroke } => Some((*from, *to, *stroke)),
            _ => None,
        })
    }
}

impl Canvas for Recorder {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn stroke_arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64, stroke: Stroke) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start,
            end,
            stroke,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color, glow: Option<Glow>) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
            glow,
        });
    }

    fn line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn text(&mut self, pos: DVec2, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_string(),
            color,
        });
    }

    fn body_image_ready(&self) -> bool {
        self.body_ready
    }

    fn draw_body_image(&mut self, center: DVec2, rotation: f64, size: f64) {
        self.commands.push(DrawCommand::BodyImage {
            center,
            rotation,
            size,
        });
    }
}
