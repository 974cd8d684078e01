//! Arc-length transfer onto the measuring band.
//!
//! The band is a flat strip wrapped around the tube. Marking it needs the
//! length of main-circle arc between the second tangent point and the top
//! or bottom of the circle, laid out as a straight distance.

use epure_kernel_math::{normalize_positive, Point2, Vec2};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::intersect::line_circle_roots;
use crate::tangent::TangentRay;
use crate::types::{BoundingBox2D, Circle2D, Point2D};

/// Arc length and where it lands on the band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandMeasurement {
    /// Where tangent ray 1 meets the main circle.
    pub intersection: Point2D,
    /// Arc length from `intersection` to the reference point, canvas units.
    pub arc_length: f64,
    /// `intersection` moved by `arc_length` along the band direction.
    pub marker: Point2D,
}

/// Pick the first candidate inside the tangent points' bounding box, else the
/// first candidate.
pub fn select_in_bounds(candidates: [Point2D; 2], tangents: &[TangentRay; 2]) -> Point2D {
    let bounds = BoundingBox2D::spanning(tangents[0].point, tangents[1].point);
    candidates
        .into_iter()
        .find(|p| bounds.contains(p))
        .unwrap_or(candidates[0])
}

/// The top or bottom point of the main circle used as the arc-length origin.
///
/// Takes the first of `cy − r`, `cy + r` inside the y-range spanned by the
/// tangent points, else the one nearer that range.
pub fn reference_point(circle: &Circle2D, tangents: &[TangentRay; 2]) -> Point2D {
    let (ya, yb) = (tangents[0].point.y, tangents[1].point.y);
    let (min_y, max_y) = (ya.min(yb), ya.max(yb));
    let gap = |y: f64| {
        if y < min_y {
            min_y - y
        } else if y > max_y {
            y - max_y
        } else {
            0.0
        }
    };

    let top = circle.center.y - circle.radius;
    let bottom = circle.center.y + circle.radius;
    let y = if gap(top) == 0.0 {
        top
    } else if gap(bottom) == 0.0 || gap(bottom) < gap(top) {
        bottom
    } else {
        top
    };
    Point2D::new(circle.center.x, y)
}

/// Arc length on `circle` going from `p1` to `p2` by increasing bearing.
///
/// Always in `[0, 2πr)`; this is not the short arc.
pub fn arc_length(p1: &Point2D, p2: &Point2D, circle: &Circle2D) -> f64 {
    let delta = circle.bearing_of(p2) - circle.bearing_of(p1);
    circle.radius * normalize_positive(delta)
}

/// Band direction: the unit direction of `ray` with y flipped, so that the
/// distance reads upward on the y-down canvas.
pub fn band_direction(ray: &TangentRay) -> Option<Vec2> {
    let u = ray.approach.unit_direction()?;
    Some(Vec2::new(u.x, -u.y))
}

/// Measure the band arc and place its marker.
///
/// Returns `None` if tangent ray 1 cannot be intersected with the main
/// circle or ray 0 has no direction.
pub fn map_measurement(
    circle: &Circle2D,
    tangents: &[TangentRay; 2],
    reference: &Point2D,
) -> Option<BandMeasurement> {
    // Tangent line: clamp every negative discriminant to the double root
    let Some(candidates) = line_circle_roots(&tangents[1].approach, circle, f64::INFINITY) else {
        debug!("tangent ray 1 has no direction, measurement omitted");
        return None;
    };
    let intersection = select_in_bounds(candidates, tangents);
    let length = arc_length(&intersection, reference, circle);
    let dir = band_direction(&tangents[0])?;
    let marker = Point2::from(intersection) + dir * length;

    Some(BandMeasurement {
        intersection,
        arc_length: length,
        marker: marker.into(),
    })
}
