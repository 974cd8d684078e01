//! The full template construction, stage by stage.

use epure_kernel_math::LINEAR_TOLERANCE;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::apex::locate_apex;
use crate::blend::{aux_circles, blend_walls, build_arc_path, AuxCircles, BlendedWall};
use crate::measure::{map_measurement, reference_point, BandMeasurement};
use crate::offset::{build_offset_lines, wall_intersection};
use crate::params::BendParameters;
use crate::tangent::{solve_tangents, TangentRay};
use crate::types::{ArcPath, Circle2D, Point2D, WallSide};

/// Construction constants.
///
/// `extension` and `ray_factor` stand in for "infinite": they must be large
/// enough for the lines to leave any realistic canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Half-length of wall lines, and length of truncated walls (canvas units).
    pub extension: f64,
    /// Multiple of the apex-to-tangent vector used to stretch tangent rays.
    pub ray_factor: f64,
    /// Minimum determinant magnitude for two lines to count as crossing.
    pub intersection_tolerance: f64,
    /// Negative discriminants down to `-discriminant_tolerance` count as tangency.
    pub discriminant_tolerance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            extension: 2000.0,
            ray_factor: 1000.0,
            intersection_tolerance: LINEAR_TOLERANCE,
            discriminant_tolerance: 5.0,
        }
    }
}

/// Everything needed to draw the template.
///
/// Optional members are `None` when the geometry they depend on degenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutGeometry {
    /// The bend circle.
    pub main_circle: Circle2D,
    /// Where the straight runs would meet.
    pub apex: Point2D,
    /// The two straight runs, touching the main circle.
    pub tangents: [TangentRay; 2],
    /// Arc of the main circle between the two tangent points.
    pub main_arc: Option<ArcPath>,
    /// Outer/inner auxiliary circles.
    pub aux_circles: Option<AuxCircles>,
    /// Crossing point of the two outer wall lines.
    pub wall_intersection: Option<Point2D>,
    /// The four wall lines (A, B outer; C, D inner) with tangency and truncation.
    pub walls: Vec<BlendedWall>,
    /// Blend arc on the outer auxiliary circle.
    pub outer_arc: Option<ArcPath>,
    /// Blend arc on the inner auxiliary circle.
    pub inner_arc: Option<ArcPath>,
    /// Top or bottom of the main circle, origin of the band measurement.
    pub reference_point: Point2D,
    /// Band arc length and marker.
    pub measurement: Option<BandMeasurement>,
}

impl LayoutGeometry {
    /// Wall lines of one side.
    pub fn walls_on(&self, side: WallSide) -> impl Iterator<Item = &BlendedWall> {
        self.walls.iter().filter(move |w| w.wall.side == side)
    }

    /// Blend arc of one side.
    pub fn aux_arc(&self, side: WallSide) -> Option<&ArcPath> {
        match side {
            WallSide::Outer => self.outer_arc.as_ref(),
            WallSide::Inner => self.inner_arc.as_ref(),
        }
    }
}

/// Compute the template with the default construction constants.
pub fn compute_layout(params: &BendParameters, canvas_center: Point2D) -> LayoutGeometry {
    compute_layout_with(params, canvas_center, &LayoutConfig::default())
}

/// Compute the template.
///
/// Runs the five construction stages in order: apex and main circle,
/// tangent rays, wall lines, blending, band measurement. Never fails; see
/// [`BendParameters::validate`] for the inputs that make sense.
pub fn compute_layout_with(
    params: &BendParameters,
    canvas_center: Point2D,
    config: &LayoutConfig,
) -> LayoutGeometry {
    let radius = params.bend_radius_px();
    let tube_radius = params.tube_radius_px();
    debug!(
        "computing layout: angle {}°, radius {radius} px, tube radius {tube_radius} px",
        params.angle_deg
    );

    let construction = locate_apex(radius, params.angle_deg, canvas_center);
    let main_circle = construction.main_circle;
    let tangents = solve_tangents(&construction, config.ray_factor);

    let offsets = build_offset_lines(&tangents, tube_radius, config.extension);
    let hit = wall_intersection(&offsets, WallSide::Outer, config.intersection_tolerance);

    let circles = aux_circles(&main_circle, hit, tube_radius);
    let walls = blend_walls(
        &offsets,
        circles.as_ref(),
        config.discriminant_tolerance,
        config.extension,
    );

    let main_arc = build_arc_path(
        Some(tangents[0].point),
        Some(tangents[1].point),
        Some(&main_circle),
    );
    let side_arc = |side: WallSide| {
        let mut ends = walls
            .iter()
            .filter(|w| w.wall.side == side)
            .map(|w| w.tangency);
        let first = ends.next().flatten();
        let second = ends.next().flatten();
        build_arc_path(first, second, circles.as_ref().map(|c| c.for_side(side)))
    };
    let outer_arc = side_arc(WallSide::Outer);
    let inner_arc = side_arc(WallSide::Inner);

    let reference = reference_point(&main_circle, &tangents);
    let measurement = map_measurement(&main_circle, &tangents, &reference);

    LayoutGeometry {
        main_circle,
        apex: construction.apex,
        tangents,
        main_arc,
        aux_circles: circles,
        wall_intersection: hit,
        walls,
        outer_arc,
        inner_arc,
        reference_point: reference,
        measurement,
    }
}
