#![warn(missing_docs)]

//! Tube-bend template ("épure") construction for the épure kernel.
//!
//! From three numbers (bend angle, bend radius, tube diameter) this crate
//! derives every line, arc and marker of a full-scale template used to
//! mark and check a single tube bend:
//!
//! - **Apex and main circle**: the bend circle and the point where the two
//!   straight runs would meet
//! - **Tangent rays**: the straight runs, touching the main circle
//! - **Wall lines**: lines parallel to each run at ± the tube radius
//! - **Blending**: auxiliary circles tangent to the wall lines, the wall
//!   lines cut at their tangency points, and the arcs joining them
//! - **Band measurement**: an arc length on the main circle transferred to
//!   a straight marker for the measuring band
//!
//! Coordinates are canvas units (see [`epure_kernel_math::CM_TO_PX`]) on a
//! y-down canvas. Degenerate geometry never fails the computation; the
//! affected primitives are simply `None`.
//!
//! # Example
//!
//! ```
//! use epure_kernel_drafting::{compute_layout, BendParameters, Point2D};
//!
//! let params = BendParameters::new(90.0, 4.0, 1.0);
//! params.validate().unwrap();
//!
//! let layout = compute_layout(&params, Point2D::new(1000.0, 750.0));
//! if let Some(arc) = &layout.main_arc {
//!     println!("<path d=\"{arc}\"/>");
//! }
//! if let Some(m) = &layout.measurement {
//!     println!("band length: {:.1} px", m.arc_length);
//! }
//! ```

pub mod apex;
pub mod blend;
pub mod error;
pub mod intersect;
pub mod layout;
pub mod measure;
pub mod offset;
pub mod params;
pub mod tangent;
pub mod types;

// Re-export main types and functions for convenience
pub use apex::{locate_apex, ApexConstruction};
pub use blend::{
    aux_circles, blend_walls, build_arc_path, choose_sweep, normalize_angle_delta,
    tangency_point, AuxCircles, BlendedWall,
};
pub use error::{DraftingError, Result};
pub use intersect::{line_circle_roots, line_intersection};
pub use layout::{compute_layout, compute_layout_with, LayoutConfig, LayoutGeometry};
pub use measure::{arc_length, map_measurement, reference_point, BandMeasurement};
pub use offset::{build_offset_lines, wall_intersection, OffsetLine};
pub use params::BendParameters;
pub use tangent::{solve_tangents, TangentRay};
pub use types::{ArcPath, BoundingBox2D, Circle2D, Line2D, Point2D, WallSide};
