//! Line/line and line/circle intersection.

use log::trace;

use crate::types::{Circle2D, Line2D, Point2D};

/// Intersection of two infinite lines.
///
/// Uses the two-point determinant form. Returns `None` when the
/// determinant magnitude is below `tolerance` (parallel or coincident).
pub fn line_intersection(a: &Line2D, b: &Line2D, tolerance: f64) -> Option<Point2D> {
    let (x1, y1, x2, y2) = (a.p1.x, a.p1.y, a.p2.x, a.p2.y);
    let (x3, y3, x4, y4) = (b.p1.x, b.p1.y, b.p2.x, b.p2.y);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom.abs() < tolerance || !denom.is_finite() {
        return None;
    }

    let cross_a = x1 * y2 - y1 * x2;
    let cross_b = x3 * y4 - y3 * x4;
    Some(Point2D::new(
        (cross_a * (x3 - x4) - (x1 - x2) * cross_b) / denom,
        (cross_a * (y3 - y4) - (y1 - y2) * cross_b) / denom,
    ))
}

/// Both solutions of the line/circle quadratic along `line`.
///
/// The line is parametrized as `p1 + t (p2 - p1)`. A negative discriminant
/// no smaller than `-discriminant_tolerance` is floating-point noise around a
/// tangency and is clamped to zero, giving a double root. Returns `None` for
/// a more negative discriminant or a line without direction.
///
/// The root with `+√Δ` comes first.
pub fn line_circle_roots(
    line: &Line2D,
    circle: &Circle2D,
    discriminant_tolerance: f64,
) -> Option<[Point2D; 2]> {
    let d = line.direction();
    let fx = line.p1.x - circle.center.x;
    let fy = line.p1.y - circle.center.y;

    let a = d.norm_squared();
    if a == 0.0 || !a.is_finite() {
        return None;
    }
    let b = 2.0 * (d.x * fx + d.y * fy);
    let c = fx * fx + fy * fy - circle.radius * circle.radius;

    let mut delta = b * b - 4.0 * a * c;
    if delta < 0.0 {
        if delta < -discriminant_tolerance {
            trace!("line misses circle, discriminant {delta}");
            return None;
        }
        delta = 0.0;
    }
    if delta.is_nan() {
        return None;
    }

    let sqrt_delta = delta.sqrt();
    let at = |t: f64| Point2D::new(line.p1.x + t * d.x, line.p1.y + t * d.y);
    Some([
        at((-b + sqrt_delta) / (2.0 * a)),
        at((-b - sqrt_delta) / (2.0 * a)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_crossing_lines() {
        let a = Line2D::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0));
        let b = Line2D::new(Point2D::new(0.0, 10.0), Point2D::new(10.0, 0.0));
        let p = line_intersection(&a, &b, 1e-6).unwrap();
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intersection_outside_segments() {
        // Lines, not segments: the crossing may lie past either end
        let a = Line2D::new(Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0));
        let b = Line2D::new(Point2D::new(5.0, 1.0), Point2D::new(5.0, 2.0));
        let p = line_intersection(&a, &b, 1e-6).unwrap();
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parallel_lines() {
        let a = Line2D::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0));
        let b = Line2D::new(Point2D::new(0.0, 5.0), Point2D::new(10.0, 5.0));
        assert!(line_intersection(&a, &b, 1e-6).is_none());
    }

    #[test]
    fn test_secant_roots() {
        let line = Line2D::new(Point2D::new(-10.0, 0.0), Point2D::new(10.0, 0.0));
        let circle = Circle2D::new(Point2D::ORIGIN, 5.0);
        let [p, q] = line_circle_roots(&line, &circle, 5.0).unwrap();
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(q.x, -5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_near_tangent_is_clamped() {
        // Misses the circle by a hair: discriminant slightly negative
        let line = Line2D::new(Point2D::new(-1.0, 5.0 + 1e-9), Point2D::new(1.0, 5.0 + 1e-9));
        let circle = Circle2D::new(Point2D::ORIGIN, 5.0);
        let [p, q] = line_circle_roots(&line, &circle, 5.0).unwrap();
        assert_eq!(p, q);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clear_miss() {
        let line = Line2D::new(Point2D::new(-1.0, 8.0), Point2D::new(1.0, 8.0));
        let circle = Circle2D::new(Point2D::ORIGIN, 5.0);
        assert!(line_circle_roots(&line, &circle, 5.0).is_none());
    }

    #[test]
    fn test_degenerate_line() {
        let line = Line2D::new(Point2D::new(5.0, 0.0), Point2D::new(5.0, 0.0));
        let circle = Circle2D::new(Point2D::ORIGIN, 5.0);
        assert!(line_circle_roots(&line, &circle, 5.0).is_none());
    }
}
