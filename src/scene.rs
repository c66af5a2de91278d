//! Retained-mode draw list: the face is described as [`DrawCommand`]s first
//! and rasterised afterwards.

use crate::geometry::Hand;
use crate::raster::{Canvas, Typeface};
use crate::style::Color;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Disc {
        center: (f64, f64),
        radius: f64,
        color: Color,
    },
    Ring {
        center: (f64, f64),
        radius: f64,
        width: f32,
        color: Color,
    },
    Tick {
        from: (f64, f64),
        to: (f64, f64),
        thickness: f32,
        color: Color,
    },
    Text {
        x: f64,
        baseline: f64,
        text: String,
        size: f64,
        color: Color,
    },
    Hand {
        hand: Hand,
        from: (f64, f64),
        to: (f64, f64),
        thickness: f32,
        color: Color,
    },
}

/// Ordered draw list; later commands paint over earlier ones.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn render(&self, canvas: &mut Canvas, typeface: &Typeface) {
        for command in &self.commands {
            match command {
                DrawCommand::Disc {
                    center,
                    radius,
                    color,
                } => canvas.fill_circle(*center, *radius, *color),
                DrawCommand::Ring {
                    center,
                    radius,
                    width,
                    color,
                } => canvas.stroke_circle(*center, *radius, *width, *color),
                DrawCommand::Tick {
                    from,
                    to,
                    thickness,
                    color,
                }
                | DrawCommand::Hand {
                    from,
                    to,
                    thickness,
                    color,
                    ..
                } => canvas.line(*from, *to, *thickness, *color),
                DrawCommand::Text {
                    x,
                    baseline,
                    text,
                    size,
                    color,
                } => canvas.text(typeface, *x, *baseline, text, *size, *color),
            }
        }
    }
}
