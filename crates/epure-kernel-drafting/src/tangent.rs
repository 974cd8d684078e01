//! Tangent points from the apex to the main circle.

use epure_kernel_math::{bearing, point_at_bearing, Point2};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::apex::ApexConstruction;
use crate::types::{Line2D, Point2D};

/// A straight run of the tube, leaving the apex and touching the main circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentRay {
    /// Tangent point on the main circle.
    pub point: Point2D,
    /// From the apex through the tangent point and far beyond.
    pub approach: Line2D,
    /// From the tangent point onward in the same direction.
    pub exit: Line2D,
}

/// Solve both tangent points and build their rays.
///
/// Ray 0 touches the circle at bearing `β + α`, ray 1 at `β − α`, where `β` is
/// the bearing of the apex and `α = acos(r / d)`. Rays are stretched by
/// `ray_factor` times the apex-to-tangent vector.
pub fn solve_tangents(construction: &ApexConstruction, ray_factor: f64) -> [TangentRay; 2] {
    let circle = &construction.main_circle;
    let center: Point2 = circle.center.into();
    let apex: Point2 = construction.apex.into();

    let alpha = (circle.radius / construction.apex_distance).acos();
    let beta = bearing(&center, &apex);

    [beta + alpha, beta - alpha].map(|angle| {
        let t = point_at_bearing(&center, circle.radius, angle);
        let reach = (t - apex) * ray_factor;
        trace!("tangent point at bearing {angle}: ({}, {})", t.x, t.y);
        TangentRay {
            point: t.into(),
            approach: Line2D::new(apex.into(), (apex + reach).into()),
            exit: Line2D::new(t.into(), (t + reach).into()),
        }
    })
}
