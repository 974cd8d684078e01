#![warn(missing_docs)]

//! Tube-bend templates: render an épure to SVG and place it on A4 pages.
//!
//! The geometry itself comes from [`epure_kernel_drafting`]; this crate turns
//! a [`LayoutGeometry`] into drawable shapes and positions a print frame over
//! the canvas.
//!
//! ```no_run
//! use epure::{render_layout, CanvasSize};
//! use epure_kernel_drafting::{compute_layout, BendParameters, Point2D};
//!
//! let layout = compute_layout(&BendParameters::default(), Point2D::ORIGIN);
//! let doc = render_layout(&layout, CanvasSize::default());
//! doc.write_to("bend.svg").unwrap();
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod export;
pub mod frame;

pub use epure_kernel_drafting::LayoutGeometry;
pub use export::svg::{layout_shapes, render_layout, Shape2D, Stroke, SvgDocument};
pub use frame::{clamp_origin, FrameRotation, PrintFrame, A4_HEIGHT, A4_WIDTH};

/// Errors returned while exporting drawings.
#[derive(Error, Debug)]
pub enum ExportError {
    /// An I/O error occurred while writing the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The document has no positive size.
    #[error("invalid document size {width} x {height}")]
    InvalidSize {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
}

/// Result alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Drawing canvas size in canvas units.
///
/// The canvas is viewed through a centred view box, so canvas coordinates
/// run from `-width/2` to `width/2` horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
}

impl CanvasSize {
    /// Create a canvas size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Fails unless both dimensions are finite and positive.
    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ExportError::InvalidSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 2000.0,
            height: 1500.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_canvas() {
        let c = CanvasSize::default();
        assert_eq!(c.width, 2000.0);
        assert_eq!(c.height, 1500.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_invalid_canvas() {
        assert!(matches!(
            CanvasSize::new(0.0, 10.0).validate(),
            Err(ExportError::InvalidSize { .. })
        ));
        assert!(CanvasSize::new(10.0, f64::NAN).validate().is_err());
    }
}
