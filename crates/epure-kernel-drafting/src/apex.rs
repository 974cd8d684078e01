//! Main bend circle and the apex the straight runs meet at.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::types::{Circle2D, Point2D};

/// The main circle and the external apex above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApexConstruction {
    /// Bend circle centred on the canvas.
    pub main_circle: Circle2D,
    /// Point where the two straight runs would meet without a bend.
    pub apex: Point2D,
    /// Distance from the circle center to the apex.
    pub apex_distance: f64,
}

/// Place the main circle at `center` and the apex on the vertical axis above it.
///
/// The apex sits at `radius / sin(θ/2)` from the center. For `angle_deg == 0`
/// that distance is infinite; callers are expected to reject such angles.
pub fn locate_apex(radius: f64, angle_deg: f64, center: Point2D) -> ApexConstruction {
    let half_angle = angle_deg.to_radians() / 2.0;
    let apex_distance = radius / half_angle.sin();
    let apex = Point2D::new(center.x, center.y - apex_distance);
    trace!("apex at ({}, {}), d = {}", apex.x, apex.y, apex_distance);

    ApexConstruction {
        main_circle: Circle2D::new(center, radius),
        apex,
        apex_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_right_angle_apex() {
        let c = locate_apex(150.0, 90.0, Point2D::new(1000.0, 750.0));
        assert_relative_eq!(c.apex_distance, 212.132034, epsilon = 1e-5);
        assert_relative_eq!(c.apex.x, 1000.0);
        assert_relative_eq!(c.apex.y, 537.867966, epsilon = 1e-5);
        assert_relative_eq!(c.main_circle.radius, 150.0);
    }

    #[test]
    fn test_straight_angle_puts_apex_on_circle() {
        let c = locate_apex(100.0, 180.0, Point2D::ORIGIN);
        assert_relative_eq!(c.apex_distance, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_angle_is_unguarded() {
        let c = locate_apex(100.0, 0.0, Point2D::ORIGIN);
        assert!(!c.apex_distance.is_finite());
    }
}
