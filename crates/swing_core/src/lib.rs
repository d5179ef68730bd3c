//! Swing Core Geometry
//!
//! This crate provides the geometry primitives that Swing's animated objects
//! are composed of:
//!
//! - **Vectors**: a 64-bit `Vec2` used for both points and displacements
//! - **Shapes**: lines (solid or dashed), circles, labels and arcs, all
//!   sharing the `Shape` mutation interface (shift, move, rotate about a point)
//! - **Segments**: endpoint, direction and stretch queries for straight shapes
//! - **Angle markings**: fallible construction of the arc between two lines
//!
//! # Example
//!
//! ```rust
//! use swing_core::{AngleArc, Line, Segment, Shape, DOWN, ORIGIN, RIGHT};
//!
//! let mut rod = Line::new(ORIGIN, 3.0 * RIGHT);
//! rod.rotate(-1.2, rod.start());
//!
//! let vertical = Line::dashed(ORIGIN, 2.0 * DOWN);
//! let marking = AngleArc::between(&rod, &vertical, 0.6, false).unwrap();
//! assert!(marking.value() > 0.0);
//! ```

pub mod arc;
pub mod color;
pub mod error;
pub mod math;
pub mod shape;

pub use arc::{line_intersection, AngleArc, Arc, PARALLEL_TOLERANCE};
pub use color::{Color, Style};
pub use error::{GeometryError, Result};
pub use math::{Axis, Point, Vec2, DOWN, LEFT, ORIGIN, RIGHT, UP};
pub use shape::{Circle, Label, Line, Segment, Shape};
