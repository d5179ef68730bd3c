//! Shape primitives
//!
//! Every visual element an animated object owns implements [`Shape`]:
//! it can report its center and be shifted, moved and rotated about an
//! arbitrary point. Straight elements additionally implement [`Segment`],
//! which exposes endpoints, direction and stretching.

use crate::color::Style;
use crate::math::{Axis, Point, Vec2};

/// Positional and mutation primitives common to all shapes
pub trait Shape {
    /// Geometric center
    fn center(&self) -> Point;

    /// Translate by `by`
    fn shift(&mut self, by: Vec2);

    /// Rotate counterclockwise by `angle` radians about `about`
    fn rotate(&mut self, angle: f64, about: Point);

    /// Move so the center lands on `point`
    fn move_to(&mut self, point: Point) {
        let by = point - self.center();
        self.shift(by);
    }

    fn style(&self) -> &Style;

    fn style_mut(&mut self) -> &mut Style;

    fn z_index(&self) -> i32 {
        self.style().z_index
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.style_mut().z_index = z_index;
    }
}

/// Shapes defined by a start and an end point
pub trait Segment: Shape {
    fn start(&self) -> Point;

    fn end(&self) -> Point;

    /// Scale coordinates along `axis` by `factor`, keeping `point` fixed
    fn stretch_about_point(&mut self, factor: f64, axis: Axis, point: Point);

    fn vector(&self) -> Vec2 {
        self.end() - self.start()
    }

    fn length(&self) -> f64 {
        self.vector().length()
    }

    fn unit_vector(&self) -> Vec2 {
        self.vector().normalize()
    }

    /// Direction angle of start→end in (-π, π]
    fn angle(&self) -> f64 {
        self.vector().angle()
    }
}

fn stretch_coordinate(p: Point, factor: f64, axis: Axis, about: Point) -> Point {
    let pivot = about.component(axis);
    p.with_component(axis, pivot + factor * (p.component(axis) - pivot))
}

// ─────────────────────────────────────────────────────────────────────────────
// Line
// ─────────────────────────────────────────────────────────────────────────────

/// Straight line segment, optionally drawn dashed
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    start: Point,
    end: Point,
    pub dashed: bool,
    pub style: Style,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            dashed: false,
            style: Style::default(),
        }
    }

    pub fn dashed(start: Point, end: Point) -> Self {
        Self {
            dashed: true,
            ..Self::new(start, end)
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Builder form of [`Shape::rotate`]
    pub fn rotated(mut self, angle: f64, about: Point) -> Self {
        self.rotate(angle, about);
        self
    }

    pub fn set_endpoints(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
    }
}

impl Shape for Line {
    fn center(&self) -> Point {
        (self.start + self.end) * 0.5
    }

    fn shift(&mut self, by: Vec2) {
        self.start += by;
        self.end += by;
    }

    fn rotate(&mut self, angle: f64, about: Point) {
        self.start = self.start.rotated_about(angle, about);
        self.end = self.end.rotated_about(angle, about);
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}

impl Segment for Line {
    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.end
    }

    fn stretch_about_point(&mut self, factor: f64, axis: Axis, point: Point) {
        self.start = stretch_coordinate(self.start, factor, axis, point);
        self.end = stretch_coordinate(self.end, factor, axis, point);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Circle
// ─────────────────────────────────────────────────────────────────────────────

/// Circle given by center and radius
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    center: Point,
    pub radius: f64,
    pub style: Style,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Self {
            center: Point::ZERO,
            radius,
            style: Style::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Builder form of [`Shape::move_to`]
    pub fn moved_to(mut self, point: Point) -> Self {
        self.move_to(point);
        self
    }
}

impl Shape for Circle {
    fn center(&self) -> Point {
        self.center
    }

    fn move_to(&mut self, point: Point) {
        self.center = point;
    }

    fn shift(&mut self, by: Vec2) {
        self.center += by;
    }

    fn rotate(&mut self, angle: f64, about: Point) {
        self.center = self.center.rotated_about(angle, about);
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Label
// ─────────────────────────────────────────────────────────────────────────────

/// Positioned text; typesetting is left to the renderer
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    position: Point,
    pub style: Style,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: Point::ZERO,
            style: Style::default(),
        }
    }

    pub fn moved_to(mut self, point: Point) -> Self {
        self.position = point;
        self
    }
}

impl Shape for Label {
    fn center(&self) -> Point {
        self.position
    }

    fn move_to(&mut self, point: Point) {
        self.position = point;
    }

    fn shift(&mut self, by: Vec2) {
        self.position += by;
    }

    fn rotate(&mut self, angle: f64, about: Point) {
        self.position = self.position.rotated_about(angle, about);
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{ORIGIN, RIGHT, UP};
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_line_rotate_about_start() {
        let mut line = Line::new(ORIGIN, 2.0 * RIGHT);
        line.rotate(FRAC_PI_2, line.start());
        assert!((line.end() - 2.0 * UP).length() < EPS);
        assert_eq!(line.start(), ORIGIN);
        assert!((line.length() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_line_stretch_about_start() {
        let mut line = Line::new(ORIGIN, UP);
        line.stretch_about_point(0.25, Axis::Y, line.start());
        assert_eq!(line.end(), Vec2::new(0.0, 0.25));
        // Stretching along x leaves a vertical line untouched
        line.stretch_about_point(3.0, Axis::X, ORIGIN);
        assert_eq!(line.end(), Vec2::new(0.0, 0.25));
    }

    #[test]
    fn test_move_to_uses_center() {
        let mut line = Line::new(ORIGIN, 2.0 * RIGHT);
        line.move_to(Vec2::new(0.0, 5.0));
        assert_eq!(line.start(), Vec2::new(-1.0, 5.0));
        assert_eq!(line.end(), Vec2::new(1.0, 5.0));

        let circle = Circle::new(0.2).moved_to(Vec2::new(3.0, -1.0));
        assert_eq!(circle.center(), Vec2::new(3.0, -1.0));
    }

    #[test]
    fn test_unit_vector_and_angle() {
        let line = Line::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, -3.0));
        assert!((line.unit_vector() - Vec2::new(0.0, -1.0)).length() < EPS);
        assert!((line.angle() + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_z_index() {
        let mut circle = Circle::new(1.0);
        circle.set_z_index(3);
        assert_eq!(circle.z_index(), 3);
    }
}
