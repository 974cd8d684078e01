//! SVG export for épure drawings.
//!
//! Shapes are drawn with plain strokes, no fill, on a y-down canvas. A
//! document either shows the canvas through a centred view box (the full
//! drawing) or wraps its shapes in a transformed group (a printed page).

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use epure_kernel_drafting::{ArcPath, LayoutGeometry, Point2D, WallSide};
use log::debug;

use crate::{CanvasSize, ExportError, Result};

/// Stroke width of every template line.
pub const LINE_WIDTH: f64 = 2.0;

/// Radius of the apex dot.
pub const APEX_DOT_RADIUS: f64 = 3.0;

/// Radius of the reference, intersection and marker dots.
pub const MARK_DOT_RADIUS: f64 = 4.0;

/// Stroke colour and width.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Any SVG colour (`"blue"`, `"#0078ff"`, ...).
    pub colour: String,
    /// Stroke width in canvas units.
    pub width: f64,
}

impl Stroke {
    /// Create a stroke.
    pub fn new(colour: impl Into<String>, width: f64) -> Self {
        Self {
            colour: colour.into(),
            width,
        }
    }

    /// A template line of the given colour.
    pub fn line(colour: &str) -> Self {
        Self::new(colour, LINE_WIDTH)
    }
}

/// A 2D shape for SVG export.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape2D {
    /// Circle outline.
    Circle {
        /// Center position.
        center: Point2D,
        /// Circle radius.
        radius: f64,
        /// Outline stroke.
        stroke: Stroke,
    },
    /// Line segment.
    Line {
        /// Start point.
        start: Point2D,
        /// End point.
        end: Point2D,
        /// Line stroke.
        stroke: Stroke,
    },
    /// Circular arc given as an SVG arc path.
    Arc {
        /// The arc.
        path: ArcPath,
        /// Arc stroke.
        stroke: Stroke,
    },
    /// Filled point marker.
    Dot {
        /// Center position.
        center: Point2D,
        /// Dot radius.
        radius: f64,
        /// Fill colour.
        fill: String,
    },
    /// Rectangle, optionally rotated about its center.
    Rect {
        /// Top-left corner before rotation.
        origin: Point2D,
        /// Rectangle width.
        width: f64,
        /// Rectangle height.
        height: f64,
        /// Fill colour.
        fill: String,
        /// Outline stroke.
        stroke: Stroke,
        /// Rotation in degrees, clockwise on screen.
        rotation: f64,
    },
}

impl Shape2D {
    /// Circle outline with a template stroke.
    pub fn circle(center: Point2D, radius: f64, colour: &str) -> Self {
        Shape2D::Circle {
            center,
            radius,
            stroke: Stroke::line(colour),
        }
    }

    /// Line segment with a template stroke.
    pub fn line(start: Point2D, end: Point2D, colour: &str) -> Self {
        Shape2D::Line {
            start,
            end,
            stroke: Stroke::line(colour),
        }
    }

    /// Arc with a template stroke.
    pub fn arc(path: ArcPath, colour: &str) -> Self {
        Shape2D::Arc {
            path,
            stroke: Stroke::line(colour),
        }
    }

    /// Filled dot.
    pub fn dot(center: Point2D, radius: f64, colour: &str) -> Self {
        Shape2D::Dot {
            center,
            radius,
            fill: colour.to_string(),
        }
    }
}

impl fmt::Display for Shape2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape2D::Circle {
                center,
                radius,
                stroke,
            } => write!(
                f,
                r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                center.x, center.y, radius, stroke.colour, stroke.width
            ),
            Shape2D::Line { start, end, stroke } => write!(
                f,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                start.x, start.y, end.x, end.y, stroke.colour, stroke.width
            ),
            Shape2D::Arc { path, stroke } => write!(
                f,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                path, stroke.colour, stroke.width
            ),
            Shape2D::Dot {
                center,
                radius,
                fill,
            } => write!(
                f,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                center.x, center.y, radius, fill
            ),
            Shape2D::Rect {
                origin,
                width,
                height,
                fill,
                stroke,
                rotation,
            } => {
                write!(
                    f,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="{}""#,
                    origin.x, origin.y, width, height, fill, stroke.colour, stroke.width
                )?;
                if *rotation != 0.0 {
                    write!(
                        f,
                        r#" transform="rotate({} {} {})""#,
                        rotation,
                        origin.x + width / 2.0,
                        origin.y + height / 2.0
                    )?;
                }
                write!(f, "/>")
            }
        }
    }
}

/// SVG document builder.
///
/// Accumulates 2D shapes and serializes them as a standalone SVG file.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    view_box: Option<[f64; 4]>,
    transform: Option<String>,
    shapes: Vec<Shape2D>,
}

impl SvgDocument {
    /// An empty drawing of the whole canvas, viewed through a centred view box
    /// `-w/2 -h/2 w h`.
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            view_box: Some([
                -canvas.width / 2.0,
                -canvas.height / 2.0,
                canvas.width,
                canvas.height,
            ]),
            transform: None,
            shapes: Vec::new(),
        }
    }

    /// An empty page of `width × height` whose shapes are drawn through
    /// `transform` (an SVG transform list).
    pub fn page(width: f64, height: f64, transform: impl Into<String>) -> Self {
        Self {
            width,
            height,
            view_box: None,
            transform: Some(transform.into()),
            shapes: Vec::new(),
        }
    }

    /// Document width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Document height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The view box, if the document has one.
    pub fn view_box(&self) -> Option<[f64; 4]> {
        self.view_box
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the document has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Add an arbitrary [`Shape2D`] to the document.
    pub fn add_shape(&mut self, shape: Shape2D) {
        self.shapes.push(shape);
    }

    /// Add several shapes.
    pub fn add_shapes(&mut self, shapes: impl IntoIterator<Item = Shape2D>) {
        self.shapes.extend(shapes);
    }

    /// Serialize to SVG text.
    pub fn to_svg_string(&self) -> String {
        self.to_string()
    }

    /// Export to an SVG file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ExportError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write!(writer, "{self}")?;
        writer.flush()?;
        debug!("wrote {} shapes to {}", self.shapes.len(), path.display());
        Ok(())
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}""#,
            self.width, self.height
        )?;
        if let Some([x, y, w, h]) = self.view_box {
            write!(f, r#" viewBox="{x} {y} {w} {h}""#)?;
        }
        writeln!(f, ">")?;

        let indent = if let Some(transform) = &self.transform {
            writeln!(f, r#"  <g transform="{transform}">"#)?;
            "    "
        } else {
            "  "
        };
        for shape in &self.shapes {
            writeln!(f, "{indent}{shape}")?;
        }
        if self.transform.is_some() {
            writeln!(f, "  </g>")?;
        }
        writeln!(f, "</svg>")
    }
}

/// Shapes of a computed template, in drawing order.
///
/// Primitives that degenerated (`None` in the layout) are skipped. The
/// untruncated wall lines and the auxiliary circles are construction
/// geometry and are not drawn.
pub fn layout_shapes(layout: &LayoutGeometry) -> Vec<Shape2D> {
    let mut shapes = vec![Shape2D::circle(
        layout.main_circle.center,
        layout.main_circle.radius,
        "blue",
    )];
    for t in &layout.tangents {
        shapes.push(Shape2D::line(t.approach.p1, t.approach.p2, "blue"));
    }

    if let Some(arc) = layout.main_arc {
        shapes.push(Shape2D::arc(arc, "red"));
    }
    for t in &layout.tangents {
        shapes.push(Shape2D::line(t.exit.p1, t.exit.p2, "red"));
    }

    for side in [WallSide::Outer, WallSide::Inner] {
        if let Some(arc) = layout.aux_arc(side) {
            shapes.push(Shape2D::arc(*arc, "green"));
        }
    }
    shapes.push(Shape2D::dot(layout.apex, APEX_DOT_RADIUS, "black"));
    for line in layout.walls.iter().filter_map(|w| w.truncated) {
        shapes.push(Shape2D::line(line.p1, line.p2, "green"));
    }

    shapes.push(Shape2D::dot(layout.reference_point, MARK_DOT_RADIUS, "orange"));
    if let Some(m) = &layout.measurement {
        shapes.push(Shape2D::dot(m.intersection, MARK_DOT_RADIUS, "orange"));
        shapes.push(Shape2D::line(m.intersection, m.marker, "yellow"));
        shapes.push(Shape2D::dot(m.marker, MARK_DOT_RADIUS, "yellow"));
    }

    shapes
}

/// Render a computed template onto a canvas of the given size.
pub fn render_layout(layout: &LayoutGeometry, canvas: CanvasSize) -> SvgDocument {
    let mut doc = SvgDocument::new(canvas);
    doc.add_shapes(layout_shapes(layout));
    doc
}
