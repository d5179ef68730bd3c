//! Circular arcs and angle markings
//!
//! [`AngleArc::between`] builds the arc that marks the angle between two
//! lines. Construction is fallible: colinear lines have no intersection and
//! therefore no angle to mark, which callers are expected to handle as an
//! ordinary state rather than a bug.

use crate::color::Style;
use crate::error::{GeometryError, Result};
use crate::math::{Point, Vec2};
use crate::shape::{Segment, Shape};
use std::f64::consts::TAU;

/// Relative tolerance under which two directions count as parallel
pub const PARALLEL_TOLERANCE: f64 = 1e-9;

/// Intersection of the infinite lines through two segments
///
/// Returns [`GeometryError::ParallelLines`] when the directions are parallel
/// within [`PARALLEL_TOLERANCE`] (relative to their lengths).
pub fn line_intersection(a: &impl Segment, b: &impl Segment) -> Result<Point> {
    let (p, r) = (a.start(), a.vector());
    let (q, s) = (b.start(), b.vector());
    let denom = r.cross(s);
    if denom.abs() <= PARALLEL_TOLERANCE * r.length() * s.length() {
        return Err(GeometryError::ParallelLines);
    }
    let t = (q - p).cross(s) / denom;
    Ok(p + r * t)
}

/// Arc of a circle
#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    center: Point,
    pub radius: f64,
    /// Angle of the first point, radians from +x
    pub start_angle: f64,
    /// Signed sweep; positive is counterclockwise
    pub sweep: f64,
    pub style: Style,
}

impl Arc {
    pub fn new(center: Point, radius: f64, start_angle: f64, sweep: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            sweep,
            style: Style::default(),
        }
    }

    /// Center of the underlying circle
    pub fn arc_center(&self) -> Point {
        self.center
    }

    /// Point a fraction `alpha` (0..=1) of the way along the arc
    pub fn point_from_proportion(&self, alpha: f64) -> Point {
        let angle = self.start_angle + alpha.clamp(0.0, 1.0) * self.sweep;
        self.center + Vec2::from_angle(angle) * self.radius
    }

    pub fn start(&self) -> Point {
        self.point_from_proportion(0.0)
    }

    pub fn end(&self) -> Point {
        self.point_from_proportion(1.0)
    }

    pub fn midpoint(&self) -> Point {
        self.point_from_proportion(0.5)
    }
}

impl Shape for Arc {
    /// The midpoint of the curve, not the circle center
    fn center(&self) -> Point {
        self.midpoint()
    }

    fn shift(&mut self, by: Vec2) {
        self.center += by;
    }

    fn rotate(&mut self, angle: f64, about: Point) {
        self.center = self.center.rotated_about(angle, about);
        self.start_angle += angle;
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}

/// Arc marking the angle between two lines, centered on their intersection
#[derive(Clone, Debug, PartialEq)]
pub struct AngleArc {
    arc: Arc,
}

impl AngleArc {
    /// Build the marking between `first` and `second`
    ///
    /// The arc starts on `first` and sweeps to `second`. With
    /// `other_angle == false` the sweep is counterclockwise, otherwise
    /// clockwise; the two choices are complementary and together cover the
    /// full turn.
    pub fn between(
        first: &impl Segment,
        second: &impl Segment,
        radius: f64,
        other_angle: bool,
    ) -> Result<Self> {
        if !radius.is_finite() {
            return Err(GeometryError::NonFinite("radius"));
        }
        let center = line_intersection(first, second)?;

        let angle_1 = first.unit_vector().angle();
        let angle_2 = second.unit_vector().angle();

        let sweep = if !other_angle {
            if angle_2 > angle_1 {
                angle_2 - angle_1
            } else {
                TAU - (angle_1 - angle_2)
            }
        } else if angle_2 < angle_1 {
            angle_2 - angle_1
        } else {
            -TAU + (angle_2 - angle_1)
        };

        Ok(Self {
            arc: Arc::new(center, radius, angle_1, sweep),
        })
    }

    /// Signed angle swept by the marking
    pub fn value(&self) -> f64 {
        self.arc.sweep
    }

    pub fn radius(&self) -> f64 {
        self.arc.radius
    }

    pub fn arc(&self) -> &Arc {
        &self.arc
    }

    pub fn midpoint(&self) -> Point {
        self.arc.midpoint()
    }
}

impl Shape for AngleArc {
    fn center(&self) -> Point {
        self.arc.center()
    }

    fn shift(&mut self, by: Vec2) {
        self.arc.shift(by);
    }

    fn rotate(&mut self, angle: f64, about: Point) {
        self.arc.rotate(angle, about);
    }

    fn style(&self) -> &Style {
        &self.arc.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.arc.style
    }
}
