//! Tube wall lines parallel to the tangent rays.

use epure_kernel_math::{perp_left, Point2};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::intersect::line_intersection;
use crate::tangent::TangentRay;
use crate::types::{Line2D, Point2D, WallSide};

/// A wall line of one straight run of the tube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetLine {
    /// Index of the tangent ray this line is parallel to.
    pub ray: usize,
    /// Which wall of the tube this line draws.
    pub side: WallSide,
    /// The line, centred on the shifted tangent point.
    pub line: Line2D,
}

/// Shift a ray's tangent point by `offset` along the left perpendicular and
/// stretch the result by `extension` both ways along the ray.
///
/// Returns `None` if the ray has no direction.
pub fn parallel_line(ray: &TangentRay, offset: f64, extension: f64) -> Option<Line2D> {
    let u = ray.exit.unit_direction()?;
    let n = perp_left(&u);
    let base = Point2::from(ray.point) + n * offset;
    Some(Line2D::new(
        (base - u * extension).into(),
        (base + u * extension).into(),
    ))
}

/// Build the four wall lines, in order A, B, C, D.
///
/// A and B are ray 0 shifted by `-tube_radius` and ray 1 by `+tube_radius`:
/// both land on the outside of the bend. C and D mirror them on the inside.
/// Rays without a direction produce no lines.
pub fn build_offset_lines(
    rays: &[TangentRay; 2],
    tube_radius: f64,
    extension: f64,
) -> Vec<OffsetLine> {
    let layout = [
        (0, -tube_radius, WallSide::Outer),
        (1, tube_radius, WallSide::Outer),
        (0, tube_radius, WallSide::Inner),
        (1, -tube_radius, WallSide::Inner),
    ];

    layout
        .into_iter()
        .filter_map(|(ray, offset, side)| {
            let line = parallel_line(&rays[ray], offset, extension);
            if line.is_none() {
                debug!("tangent ray {ray} has no direction, skipping {side:?} wall line");
            }
            line.map(|line| OffsetLine { ray, side, line })
        })
        .collect()
}

/// Where the two wall lines of `side` cross, `None` when they are parallel.
pub fn wall_intersection(lines: &[OffsetLine], side: WallSide, tolerance: f64) -> Option<Point2D> {
    let mut same_side = lines.iter().filter(|l| l.side == side);
    let first = same_side.next()?;
    let second = same_side.find(|l| l.ray != first.ray)?;
    let hit = line_intersection(&first.line, &second.line, tolerance);
    if hit.is_none() {
        debug!("{side:?} wall lines are parallel, no intersection");
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apex::locate_apex;
    use crate::tangent::solve_tangents;
    use approx::assert_relative_eq;

    fn rays(angle: f64) -> [TangentRay; 2] {
        let c = locate_apex(150.0, angle, Point2D::new(1000.0, 750.0));
        solve_tangents(&c, 1000.0)
    }

    #[test]
    fn test_four_lines_two_per_ray() {
        let lines = build_offset_lines(&rays(90.0), 20.0, 2000.0);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines.iter().filter(|l| l.ray == 0).count(), 2);
        assert_eq!(lines.iter().filter(|l| l.side == WallSide::Outer).count(), 2);
    }

    #[test]
    fn test_offset_lines_are_parallel_at_tube_radius() {
        let r = rays(120.0);
        for wall in build_offset_lines(&r, 20.0, 2000.0) {
            let source = &r[wall.ray];
            let u = wall.line.unit_direction().unwrap();
            let v = source.exit.unit_direction().unwrap();
            assert!((u.x * v.y - u.y * v.x).abs() < 1e-9, "not parallel");
            let d = wall.line.distance_to_point(&source.point).unwrap();
            assert_relative_eq!(d, 20.0, epsilon = 1e-6);
            assert_relative_eq!(wall.line.length(), 4000.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_outer_walls_lie_outside_the_bend() {
        let c = locate_apex(150.0, 90.0, Point2D::new(1000.0, 750.0));
        let r = solve_tangents(&c, 1000.0);
        for wall in build_offset_lines(&r, 20.0, 2000.0) {
            let d = wall.line.distance_to_point(&c.main_circle.center).unwrap();
            let expected = match wall.side {
                WallSide::Outer => 170.0,
                WallSide::Inner => 130.0,
            };
            assert_relative_eq!(d, expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_outer_intersection_on_axis() {
        let lines = build_offset_lines(&rays(90.0), 20.0, 2000.0);
        let p = wall_intersection(&lines, WallSide::Outer, 1e-6).unwrap();
        assert_relative_eq!(p.x, 1000.0, epsilon = 1e-6);
        // apex lifted by 20 / sin(45°)
        assert_relative_eq!(p.y, 537.867966 - 28.284271, epsilon = 1e-5);
    }

    #[test]
    fn test_intersection_equidistant_from_sources() {
        let r = rays(75.0);
        let lines = build_offset_lines(&r, 12.0, 2000.0);
        let p = wall_intersection(&lines, WallSide::Outer, 1e-6).unwrap();
        for wall in lines.iter().filter(|l| l.side == WallSide::Outer) {
            assert!(wall.line.distance_to_point(&p).unwrap() < 1e-3);
            let to_ray = r[wall.ray].approach.distance_to_point(&p).unwrap();
            assert!((to_ray - 12.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_parallel_rays_give_no_intersection() {
        let make = |x: f64| {
            let point = Point2D::new(x, 0.0);
            TangentRay {
                point,
                approach: Line2D::new(Point2D::new(x, -100.0), Point2D::new(x, 100.0)),
                exit: Line2D::new(point, Point2D::new(x, 100.0)),
            }
        };
        let lines = build_offset_lines(&[make(-50.0), make(50.0)], 5.0, 2000.0);
        assert_eq!(lines.len(), 4);
        assert!(wall_intersection(&lines, WallSide::Outer, 1e-6).is_none());
        assert!(wall_intersection(&lines, WallSide::Inner, 1e-6).is_none());
    }
}
