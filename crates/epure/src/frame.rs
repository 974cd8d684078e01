//! A4 print frame placed over the drawing canvas.
//!
//! The frame is a page-sized rectangle the user drags around the canvas and
//! optionally turns a quarter turn. Exporting the frame produces a page whose
//! content is the drawing seen through the frame, upright.

use epure_kernel_drafting::{BoundingBox2D, LayoutGeometry, Point2D};
use epure_kernel_math::CM_TO_PX;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::export::svg::{layout_shapes, Shape2D, Stroke, SvgDocument};
use crate::CanvasSize;

/// A4 page width in canvas units.
pub const A4_WIDTH: f64 = 21.0 * CM_TO_PX;

/// A4 page height in canvas units.
pub const A4_HEIGHT: f64 = 29.686 * CM_TO_PX;

/// Page orientation of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameRotation {
    /// Upright, 0°.
    #[default]
    Portrait,
    /// Turned 90° about the frame center.
    Landscape,
}

impl FrameRotation {
    /// Rotation in degrees.
    pub fn degrees(self) -> f64 {
        match self {
            FrameRotation::Portrait => 0.0,
            FrameRotation::Landscape => 90.0,
        }
    }

    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            FrameRotation::Portrait => FrameRotation::Landscape,
            FrameRotation::Landscape => FrameRotation::Portrait,
        }
    }
}

/// An A4 frame over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintFrame {
    /// Top-left corner of the unrotated frame.
    pub origin: Point2D,
    /// Orientation.
    pub rotation: FrameRotation,
    /// Pointer position relative to `origin` while a drag is active.
    #[serde(skip)]
    grab: Option<Point2D>,
}

impl Default for PrintFrame {
    fn default() -> Self {
        Self::new(Point2D::new(50.0, 50.0))
    }
}

impl PrintFrame {
    /// Portrait frame with its top-left corner at `origin`.
    pub fn new(origin: Point2D) -> Self {
        Self {
            origin,
            rotation: FrameRotation::Portrait,
            grab: None,
        }
    }

    /// Center of the frame; rotation keeps it fixed.
    pub fn center(&self) -> Point2D {
        Point2D::new(
            self.origin.x + A4_WIDTH / 2.0,
            self.origin.y + A4_HEIGHT / 2.0,
        )
    }

    /// Switch between portrait and landscape.
    pub fn toggle_rotation(&mut self) {
        self.rotation = self.rotation.toggled();
        debug!("print frame rotated to {}°", self.rotation.degrees());
    }

    /// Area the frame covers on the canvas, rotation included.
    pub fn footprint(&self) -> BoundingBox2D {
        let (w, h) = match self.rotation {
            FrameRotation::Portrait => (A4_WIDTH, A4_HEIGHT),
            FrameRotation::Landscape => (A4_HEIGHT, A4_WIDTH),
        };
        let c = self.center();
        BoundingBox2D::spanning(
            Point2D::new(c.x - w / 2.0, c.y - h / 2.0),
            Point2D::new(c.x + w / 2.0, c.y + h / 2.0),
        )
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Start dragging if `pointer` is on the frame.
    ///
    /// Returns whether the frame was grabbed.
    pub fn begin_drag(&mut self, pointer: Point2D) -> bool {
        if !self.footprint().contains(&pointer) {
            return false;
        }
        self.grab = Some(Point2D::new(
            pointer.x - self.origin.x,
            pointer.y - self.origin.y,
        ));
        true
    }

    /// Follow the pointer, keeping the grab offset and staying within the
    /// canvas limits.
    ///
    /// Ignored when no drag is active.
    pub fn drag_to(&mut self, pointer: Point2D, canvas: CanvasSize) {
        let Some(grab) = self.grab else {
            return;
        };
        let wanted = Point2D::new(pointer.x - grab.x, pointer.y - grab.y);
        self.origin = clamp_origin(wanted, canvas);
        trace!("print frame at ({}, {})", self.origin.x, self.origin.y);
    }

    /// Release the frame.
    pub fn end_drag(&mut self) {
        self.grab = None;
    }

    /// SVG transform bringing the frame content upright onto an A4 page.
    pub fn page_transform(&self) -> String {
        let c = self.center();
        format!(
            "translate({} {}) rotate({}) translate({} {})",
            A4_WIDTH / 2.0,
            A4_HEIGHT / 2.0,
            -self.rotation.degrees(),
            -c.x,
            -c.y
        )
    }

    /// The translucent rectangle showing the frame on the canvas.
    pub fn overlay(&self) -> Shape2D {
        Shape2D::Rect {
            origin: self.origin,
            width: A4_WIDTH,
            height: A4_HEIGHT,
            fill: "rgba(0,120,255,0.2)".to_string(),
            stroke: Stroke::new("#0078ff", 2.0),
            rotation: self.rotation.degrees(),
        }
    }

    /// A4 page showing the part of `layout` under the frame.
    pub fn export_page(&self, layout: &LayoutGeometry) -> SvgDocument {
        let mut page = SvgDocument::page(A4_WIDTH, A4_HEIGHT, self.page_transform());
        page.add_shapes(layout_shapes(layout));
        page
    }
}

/// Clamp a frame origin to `x ∈ [−W, W − A4_WIDTH]`, `y ∈ [−H, H − A4_HEIGHT]`.
///
/// On a canvas smaller than the page the lower bound wins.
pub fn clamp_origin(origin: Point2D, canvas: CanvasSize) -> Point2D {
    let x = origin.x.min(canvas.width - A4_WIDTH).max(-canvas.width);
    let y = origin.y.min(canvas.height - A4_HEIGHT).max(-canvas.height);
    Point2D::new(x, y)
}
