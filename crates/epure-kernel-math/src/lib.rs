#![warn(missing_docs)]

//! Math types for the épure kernel.
//!
//! Thin wrappers around nalgebra providing the 2D types used by the
//! bend-template construction: points, vectors, bearings, the linear
//! tolerance and the centimeter to canvas-unit conversion.
//!
//! The canvas is y-down: positive angles returned by [`bearing`] turn
//! clockwise on screen.

use nalgebra::Vector2;
use std::f64::consts::TAU;

/// A point on the drawing canvas.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector on the drawing canvas.
pub type Vec2 = Vector2<f64>;

/// Canvas units (CSS pixels at 96 dpi) per centimeter.
pub const CM_TO_PX: f64 = 37.7952755906;

/// Convert centimeters to canvas units.
pub fn cm_to_px(cm: f64) -> f64 {
    cm * CM_TO_PX
}

/// Convert canvas units back to centimeters.
pub fn px_to_cm(px: f64) -> f64 {
    px / CM_TO_PX
}

/// Left-hand perpendicular `(-y, x)` of a vector.
pub fn perp_left(v: &Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Normalize a vector, returning `None` for zero or non-finite lengths.
pub fn unit(v: &Vec2) -> Option<Vec2> {
    let len = v.norm();
    if len > 0.0 && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}

/// Bearing of `p` seen from `center`, in `(-π, π]`.
pub fn bearing(center: &Point2, p: &Point2) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

/// Point on a circle at the given bearing.
pub fn point_at_bearing(center: &Point2, radius: f64, angle: f64) -> Point2 {
    let (s, c) = angle.sin_cos();
    Point2::new(center.x + radius * c, center.y + radius * s)
}

/// Normalize an angle into `[0, 2π)`.
pub fn normalize_positive(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Distance below which two canvas positions count as the same, in canvas units.
pub const LINEAR_TOLERANCE: f64 = 1e-6;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_cm_round_trip() {
        assert_relative_eq!(cm_to_px(1.0), CM_TO_PX);
        assert_relative_eq!(px_to_cm(cm_to_px(7.5)), 7.5, epsilon = 1e-12);
    }

    #[test]
    fn test_perp_left() {
        let v = Vec2::new(1.0, 0.0);
        let p = perp_left(&v);
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 1.0);
        assert_relative_eq!(v.dot(&p), 0.0);
    }

    #[test]
    fn test_unit_rejects_zero() {
        assert!(unit(&Vec2::zeros()).is_none());
        assert!(unit(&Vec2::new(f64::NAN, 1.0)).is_none());
        let u = unit(&Vec2::new(3.0, 4.0)).unwrap();
        assert_relative_eq!(u.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bearing_y_down() {
        let c = Point2::new(10.0, 10.0);
        // Straight "up" on screen is negative y
        assert_relative_eq!(bearing(&c, &Point2::new(10.0, 0.0)), -FRAC_PI_2);
        assert_relative_eq!(bearing(&c, &Point2::new(0.0, 10.0)), PI);
    }

    #[test]
    fn test_point_at_bearing() {
        let c = Point2::new(1.0, 2.0);
        let p = point_at_bearing(&c, 5.0, FRAC_PI_2);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_positive() {
        assert_relative_eq!(normalize_positive(-FRAC_PI_2), 1.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_positive(TAU + 0.5), 0.5, epsilon = 1e-12);
        let tiny = normalize_positive(-1e-18);
        assert!((0.0..TAU).contains(&tiny));
    }
}
