/*
 * Surface Module
 *
 * The drawing sink the simulation renders into. Coordinates are surface
 * coordinates: the origin is the top-left corner and y grows downwards, which
 * is how the simulation stores positions.
 *
 * Two sinks are provided:
 * - NannouSurface maps surface coordinates onto a nannou window (centred origin, y up)
 * - Recorder keeps every draw call in memory for tests and benchmarks
 */

use nannou::color::Rgba;
use nannou::prelude::*;

pub trait Surface {
    /// Logical width of the surface.
    fn width(&self) -> f32;

    /// Logical height of the surface.
    fn height(&self) -> f32;

    fn fill_circle(&mut self, center: Point2, radius: f32, color: Rgba);

    fn stroke_line(&mut self, from: Point2, to: Point2, weight: f32, color: Rgba);

    fn fill_rect(&mut self, top_left: Point2, size: Vec2, color: Rgba);
}

// Adapter over a nannou Draw for one frame
pub struct NannouSurface<'a> {
    draw: &'a Draw,
    rect: Rect,
}

impl<'a> NannouSurface<'a> {
    pub fn new(draw: &'a Draw, rect: Rect) -> Self {
        Self { draw, rect }
    }

    // Convert surface coordinates to nannou's centred, y-up coordinates
    #[inline]
    pub fn to_screen(&self, point: Point2) -> Point2 {
        pt2(self.rect.left() + point.x, self.rect.top() - point.y)
    }
}

impl Surface for NannouSurface<'_> {
    fn width(&self) -> f32 {
        self.rect.w()
    }

    fn height(&self) -> f32 {
        self.rect.h()
    }

    fn fill_circle(&mut self, center: Point2, radius: f32, color: Rgba) {
        self.draw
            .ellipse()
            .xy(self.to_screen(center))
            .radius(radius)
            .color(color);
    }

    fn stroke_line(&mut self, from: Point2, to: Point2, weight: f32, color: Rgba) {
        self.draw
            .line()
            .start(self.to_screen(from))
            .end(self.to_screen(to))
            .weight(weight)
            .color(color);
    }

    fn fill_rect(&mut self, top_left: Point2, size: Vec2, color: Rgba) {
        // nannou positions rectangles by their centre
        let center = self.to_screen(top_left + size / 2.0);
        self.draw.rect().xy(center).wh(size).color(color);
    }
}

/// A single recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Circle { center: Point2, radius: f32, color: Rgba },
    Line { from: Point2, to: Point2, weight: f32, color: Rgba },
    Rect { top_left: Point2, size: Vec2, color: Rgba },
}

/// In-memory surface that records what would have been drawn.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub width: f32,
    pub height: f32,
    pub calls: Vec<DrawCall>,
}

impl Recorder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> + '_ {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> + '_ {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Circle { .. }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawCall> + '_ {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Rect { .. }))
    }
}

impl Surface for Recorder {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_circle(&mut self, center: Point2, radius: f32, color: Rgba) {
        self.calls.push(DrawCall::Circle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Point2, to: Point2, weight: f32, color: Rgba) {
        self.calls.push(DrawCall::Line { from, to, weight, color });
    }

    fn fill_rect(&mut self, top_left: Point2, size: Vec2, color: Rgba) {
        self.calls.push(DrawCall::Rect { top_left, size, color });
    }
}
