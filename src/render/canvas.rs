//! Drawing surface abstraction.
//!
//! The piece renderer only needs four primitives. Backends implement them in
//! pixel space with `(0, 0)` at the top-left corner.

use crate::types::Colour;

use super::gradient::RadialGradient;

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Minimal drawing capability needed to render bricks.
pub trait Canvas {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Fill a rectangle with a solid colour.
    fn fill_rect(&mut self, rect: Rect, colour: Colour);

    /// Fill a circle with a solid colour.
    fn fill_circle(&mut self, centre: Point, radius: f32, colour: Colour);

    /// Fill a circle, colouring each pixel from a radial gradient.
    fn fill_circle_gradient(&mut self, centre: Point, radius: f32, gradient: &RadialGradient);

    /// Stroke a straight line of the given width.
    fn stroke_line(&mut self, from: Point, to: Point, width: f32, colour: Colour);
}
