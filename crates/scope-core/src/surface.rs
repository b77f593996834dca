//! Drawing abstraction the visualizer renders into.
//!
//! Coordinates are in surface pixels with the origin at the top-left and `y`
//! growing downwards, matching Canvas 2D. The web front end forwards calls to
//! a `CanvasRenderingContext2d`; the native front end batches them into GPU
//! instances.

use crate::color::Color;
use glam::Vec2;

/// Stroke parameters for a polyline. Caps and joins are always round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: Color,
}

pub trait Surface {
    /// Drawable size in pixels as `(width, height)`.
    fn size(&self) -> (f32, f32);
    fn clear(&mut self, color: Color);
    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Polyline { points: Vec<Vec2>, style: StrokeStyle },
    Circle { center: Vec2, radius: f32, color: Color },
}

/// Surface that records every call; used by tests and headless diagnostics.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Color)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Circle {
                center,
                radius,
                color,
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = (&[Vec2], &StrokeStyle)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Polyline { points, style } => Some((points.as_slice(), style)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle) {
        self.calls.push(DrawCall::Polyline {
            points: points.to_vec(),
            style: *style,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }
}
