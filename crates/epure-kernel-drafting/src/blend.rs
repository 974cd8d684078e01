//! Auxiliary circles that blend the tube walls into the bend, and arc paths.
//!
//! All arc orientation logic lives in [`normalize_angle_delta`] and
//! [`choose_sweep`]. The canvas is y-down, so an increasing bearing turns
//! clockwise on screen, which is exactly what SVG's `sweep-flag = 1` draws.

use std::cmp::Ordering;
use std::f64::consts::{PI, TAU};

use epure_kernel_math::Point2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::intersect::line_circle_roots;
use crate::offset::OffsetLine;
use crate::types::{ArcPath, Circle2D, Line2D, Point2D, WallSide};

/// Auxiliary circles for the outer and inner wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuxCircles {
    /// Circle tangent to both outer wall lines.
    pub outer: Circle2D,
    /// Circle tangent to both inner wall lines.
    pub inner: Circle2D,
}

impl AuxCircles {
    /// The circle serving `side`.
    pub fn for_side(&self, side: WallSide) -> &Circle2D {
        match side {
            WallSide::Outer => &self.outer,
            WallSide::Inner => &self.inner,
        }
    }
}

/// A wall line after blending: where it touches its auxiliary circle and
/// the ray that continues from there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendedWall {
    /// The untruncated wall line.
    pub wall: OffsetLine,
    /// Tangency point on the auxiliary circle.
    pub tangency: Option<Point2D>,
    /// Ray from the tangency point along the wall direction.
    pub truncated: Option<Line2D>,
}

/// Place both auxiliary circles from the outer wall intersection.
///
/// The circles keep the main radius and slide along the vertical axis by
/// `±(r·dist/(r + tube_radius) − dist)`, where `dist` is the distance from the
/// main center to `intersection`.
pub fn aux_circles(
    main: &Circle2D,
    intersection: Option<Point2D>,
    tube_radius: f64,
) -> Option<AuxCircles> {
    let Some(intersection) = intersection else {
        debug!("no wall intersection, auxiliary circles omitted");
        return None;
    };
    let dist = intersection.distance(&main.center);
    let shift = main.radius * dist / (main.radius + tube_radius) - dist;
    let (cx, cy) = (main.center.x, main.center.y);

    Some(AuxCircles {
        outer: Circle2D::new(Point2D::new(cx, cy + shift), main.radius),
        inner: Circle2D::new(Point2D::new(cx, cy - shift), main.radius),
    })
}

/// Order candidate points by how far they sit off `circle`.
///
/// The root of a line/circle solve closest to the circle is the tangency
/// root; this is the only tie-break used when picking it.
pub fn by_circle_residual(circle: &Circle2D) -> impl Fn(&Point2D, &Point2D) -> Ordering + '_ {
    move |a, b| {
        circle
            .residual(a)
            .partial_cmp(&circle.residual(b))
            .unwrap_or(Ordering::Equal)
    }
}

/// Tangency point between a wall line and its auxiliary circle.
pub fn tangency_point(
    line: &Line2D,
    circle: &Circle2D,
    discriminant_tolerance: f64,
) -> Option<Point2D> {
    let roots = line_circle_roots(line, circle, discriminant_tolerance)?;
    // min_by keeps the first of equal elements
    roots.into_iter().min_by(by_circle_residual(circle))
}

/// Replace a wall line by a ray of length `extension` starting at `from`.
pub fn truncate_at(line: &Line2D, from: Point2D, extension: f64) -> Option<Line2D> {
    let u = line.unit_direction()?;
    let start = Point2::from(from);
    Some(Line2D::new(from, (start + u * extension).into()))
}

/// Resolve tangency and truncation for every wall line.
pub fn blend_walls(
    walls: &[OffsetLine],
    circles: Option<&AuxCircles>,
    discriminant_tolerance: f64,
    extension: f64,
) -> Vec<BlendedWall> {
    walls
        .iter()
        .map(|wall| {
            let tangency = circles.and_then(|c| {
                let hit = tangency_point(&wall.line, c.for_side(wall.side), discriminant_tolerance);
                if hit.is_none() {
                    debug!(
                        "{:?} wall of ray {} does not touch its auxiliary circle",
                        wall.side, wall.ray
                    );
                }
                hit
            });
            BlendedWall {
                wall: *wall,
                tangency,
                truncated: tangency.and_then(|t| truncate_at(&wall.line, t, extension)),
            }
        })
        .collect()
}

/// Normalize an angle difference into `(−π, π]`.
pub fn normalize_angle_delta(delta: f64) -> f64 {
    let mut d = delta % TAU;
    if d <= -PI {
        d += TAU;
    } else if d > PI {
        d -= TAU;
    }
    d
}

/// SVG sweep flag for a normalized delta: increasing bearing sweeps positive.
pub fn choose_sweep(delta: f64) -> bool {
    delta >= 0.0
}

/// Short arc on `circle` from `p1` to `p2`.
///
/// Returns `None` when either end point or the circle is missing.
pub fn build_arc_path(
    p1: Option<Point2D>,
    p2: Option<Point2D>,
    circle: Option<&Circle2D>,
) -> Option<ArcPath> {
    let (p1, p2, circle) = (p1?, p2?, circle?);
    let delta = normalize_angle_delta(circle.bearing_of(&p2) - circle.bearing_of(&p1));
    Some(ArcPath {
        start: p1,
        end: p2,
        radius: circle.radius,
        large_arc: delta.abs() > PI,
        sweep: choose_sweep(delta),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apex::locate_apex;
    use crate::offset::{build_offset_lines, wall_intersection};
    use crate::tangent::solve_tangents;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn circle() -> Circle2D {
        Circle2D::new(Point2D::new(0.0, 0.0), 10.0)
    }

    fn on_circle(deg: f64) -> Point2D {
        let a = deg.to_radians();
        Point2D::new(10.0 * a.cos(), 10.0 * a.sin())
    }

    #[test]
    fn test_normalize_angle_delta_range() {
        assert_relative_eq!(normalize_angle_delta(1.5 * PI), -FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle_delta(-1.5 * PI), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle_delta(PI), PI);
        assert_relative_eq!(normalize_angle_delta(-PI), PI);
        assert_relative_eq!(normalize_angle_delta(0.25), 0.25);
    }

    #[test]
    fn test_sweep_flag_per_quadrant_pair() {
        // (from, to, expected sweep) in degrees, bearings on a y-down canvas
        let cases = [
            (10.0, 80.0, true),
            (80.0, 10.0, false),
            (80.0, 100.0, true),
            (100.0, 80.0, false),
            (170.0, -170.0, true),
            (-170.0, 170.0, false),
            (-100.0, -80.0, true),
            (-80.0, -100.0, false),
            (-10.0, 10.0, true),
            (10.0, -10.0, false),
        ];
        for (from, to, sweep) in cases {
            let arc =
                build_arc_path(Some(on_circle(from)), Some(on_circle(to)), Some(&circle())).unwrap();
            assert_eq!(arc.sweep, sweep, "{from}° -> {to}°");
            assert!(!arc.large_arc);
        }
    }

    #[test]
    fn test_arc_path_needs_all_inputs() {
        let c = circle();
        assert!(build_arc_path(None, Some(on_circle(0.0)), Some(&c)).is_none());
        assert!(build_arc_path(Some(on_circle(0.0)), None, Some(&c)).is_none());
        assert!(build_arc_path(Some(on_circle(0.0)), Some(on_circle(1.0)), None).is_none());
    }

    #[test]
    fn test_residual_comparator_prefers_on_circle() {
        let c = circle();
        let off = Point2D::new(12.0, 0.0);
        let on = Point2D::new(0.0, 10.0);
        let best = [off, on].into_iter().min_by(by_circle_residual(&c)).unwrap();
        assert_eq!(best, on);
    }

    #[test]
    fn test_aux_circles_need_intersection() {
        assert!(aux_circles(&circle(), None, 2.0).is_none());
    }

    #[test]
    fn test_aux_circles_touch_their_walls() {
        let c = locate_apex(150.0, 90.0, Point2D::new(1000.0, 750.0));
        let rays = solve_tangents(&c, 1000.0);
        let walls = build_offset_lines(&rays, 20.0, 2000.0);
        let hit = wall_intersection(&walls, WallSide::Outer, 1e-6);
        let circles = aux_circles(&c.main_circle, hit, 20.0).unwrap();

        assert_relative_eq!(circles.outer.center.y, 750.0 - 28.284271, epsilon = 1e-5);
        assert_relative_eq!(circles.inner.center.y, 750.0 + 28.284271, epsilon = 1e-5);

        for wall in &walls {
            let aux = circles.for_side(wall.side);
            let d = wall.line.distance_to_point(&aux.center).unwrap();
            assert_relative_eq!(d, aux.radius, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_blend_walls_truncates_at_tangency() {
        let c = locate_apex(150.0, 90.0, Point2D::new(1000.0, 750.0));
        let rays = solve_tangents(&c, 1000.0);
        let walls = build_offset_lines(&rays, 20.0, 2000.0);
        let hit = wall_intersection(&walls, WallSide::Outer, 1e-6);
        let circles = aux_circles(&c.main_circle, hit, 20.0);
        let blended = blend_walls(&walls, circles.as_ref(), 5.0, 2000.0);

        assert_eq!(blended.len(), 4);
        for b in &blended {
            let t = b.tangency.expect("tangency resolved");
            let aux = circles.as_ref().unwrap().for_side(b.wall.side);
            assert!(aux.residual(&t) < 1e-3);

            let ray = b.truncated.unwrap();
            assert_eq!(ray.p1, t);
            assert_relative_eq!(ray.length(), 2000.0, epsilon = 1e-6);
            let u = ray.unit_direction().unwrap();
            let v = b.wall.line.unit_direction().unwrap();
            assert_relative_eq!(u.dot(&v), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_blend_without_circles_is_empty() {
        let c = locate_apex(150.0, 90.0, Point2D::new(1000.0, 750.0));
        let walls = build_offset_lines(&solve_tangents(&c, 1000.0), 20.0, 2000.0);
        for b in blend_walls(&walls, None, 5.0, 2000.0) {
            assert!(b.tangency.is_none());
            assert!(b.truncated.is_none());
        }
    }
}
