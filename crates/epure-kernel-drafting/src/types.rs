//! Core types for the bend template drawing.

use std::fmt;

use epure_kernel_math::{bearing, unit, Point2, Vec2};
use serde::{Deserialize, Serialize};

/// A 2D point for serializable drafting output.
///
/// We use a custom type instead of nalgebra::Point2 to enable serde serialization
/// without requiring nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<Point2> for Point2D {
    fn from(p: Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Point2D> for Point2 {
    fn from(p: Point2D) -> Self {
        Point2::new(p.x, p.y)
    }
}

/// An oriented line given by two points; direction is `p2 - p1`.
///
/// Construction lines are stored as long finite segments standing in for
/// infinite lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line2D {
    /// First point.
    pub p1: Point2D,
    /// Second point.
    pub p2: Point2D,
}

impl Line2D {
    /// Create a new line.
    pub fn new(p1: Point2D, p2: Point2D) -> Self {
        Self { p1, p2 }
    }

    /// Direction vector `p2 - p1`.
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.p2.x - self.p1.x, self.p2.y - self.p1.y)
    }

    /// Unit direction, `None` when both points coincide.
    pub fn unit_direction(&self) -> Option<Vec2> {
        unit(&self.direction())
    }

    /// Length of the segment between the two points.
    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }

    /// Perpendicular distance from `p` to the infinite line.
    pub fn distance_to_point(&self, p: &Point2D) -> Option<f64> {
        let u = self.unit_direction()?;
        let w = Vec2::new(p.x - self.p1.x, p.y - self.p1.y);
        Some((u.x * w.y - u.y * w.x).abs())
    }

    /// Both points are finite.
    pub fn is_finite(&self) -> bool {
        self.p1.is_finite() && self.p2.is_finite()
    }
}

/// A circle on the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle2D {
    /// Circle center.
    pub center: Point2D,
    /// Circle radius.
    pub radius: f64,
}

impl Circle2D {
    /// Create a new circle.
    pub fn new(center: Point2D, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Bearing of `p` seen from the center, in `(-π, π]`.
    pub fn bearing_of(&self, p: &Point2D) -> f64 {
        bearing(&self.center.into(), &(*p).into())
    }

    /// How far `p` lies off the circle, `| |p - center| - radius |`.
    pub fn residual(&self, p: &Point2D) -> f64 {
        (p.distance(&self.center) - self.radius).abs()
    }

    /// Center and radius are finite.
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite()
    }
}

/// One of the two walls of the tube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    /// Outer wall (extrados), away from the bend center.
    Outer,
    /// Inner wall (intrados), toward the bend center.
    Inner,
}

/// A circular arc ready for an SVG path: move to `start`, arc to `end`.
///
/// Displays as `M x1 y1 A r r 0 <large_arc> <sweep> x2 y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcPath {
    /// Arc start point.
    pub start: Point2D,
    /// Arc end point.
    pub end: Point2D,
    /// Arc radius.
    pub radius: f64,
    /// SVG large-arc flag.
    pub large_arc: bool,
    /// SVG sweep flag (true = increasing angle on a y-down canvas).
    pub sweep: bool,
}

impl ArcPath {
    /// The SVG path data string.
    pub fn to_svg_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M {} {} A {} {} 0 {} {} {} {}",
            self.start.x,
            self.start.y,
            self.radius,
            self.radius,
            u8::from(self.large_arc),
            u8::from(self.sweep),
            self.end.x,
            self.end.y
        )
    }
}

/// 2D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox2D {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl BoundingBox2D {
    /// Create an empty bounding box.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Bounding box spanned by two corner points.
    pub fn spanning(a: Point2D, b: Point2D) -> Self {
        let mut bb = Self::empty();
        bb.include_point(a);
        bb.include_point(b);
        bb
    }

    /// Expand the bounding box to include a point.
    pub fn include_point(&mut self, p: Point2D) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl Default for BoundingBox2D {
    fn default() -> Self {
        Self::empty()
    }
}
