//! epure CLI - tube-bend template generator
//!
//! Computes the template for one bend and writes it as SVG, either the
//! whole canvas or the A4 page under a print frame.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use epure::{clamp_origin, render_layout, PrintFrame};
use epure_kernel_drafting::{compute_layout_with, LayoutGeometry, Point2D};
use epure_kernel_math::px_to_cm;
use std::path::{Path, PathBuf};

mod config;

use config::{EpureConfig, Overrides};

#[derive(Parser)]
#[command(name = "epure")]
#[command(about = "Full-scale templates for marking tube bends", long_about = None)]
struct Cli {
    /// Log construction details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the template on the whole canvas
    Render {
        #[command(flatten)]
        bend: BendArgs,
        /// Output SVG file
        #[arg(short, long, default_value = "epure.svg")]
        output: PathBuf,
        /// Also draw the print frame
        #[arg(long)]
        with_frame: bool,
        #[command(flatten)]
        frame: FrameArgs,
    },
    /// Write the A4 page under the print frame
    Page {
        #[command(flatten)]
        bend: BendArgs,
        #[command(flatten)]
        frame: FrameArgs,
        /// Output SVG file
        #[arg(short, long, default_value = "epure-page.svg")]
        output: PathBuf,
    },
    /// Print tangent points and the band measurement
    Info {
        #[command(flatten)]
        bend: BendArgs,
        /// Print the full construction as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct BendArgs {
    /// TOML settings file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Bend angle in degrees, between 0 and 180 [default: 135]
    #[arg(short, long, allow_negative_numbers = true)]
    angle: Option<f64>,
    /// Bend radius in cm [default: 7.5]
    #[arg(short, long)]
    radius: Option<f64>,
    /// Tube outside diameter in cm [default: 3.4]
    #[arg(short, long)]
    diameter: Option<f64>,
    /// Canvas width in canvas units [default: 2000]
    #[arg(long)]
    width: Option<f64>,
    /// Canvas height in canvas units [default: 1500]
    #[arg(long)]
    height: Option<f64>,
}

impl BendArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            angle_deg: self.angle,
            bend_radius_cm: self.radius,
            tube_diameter_cm: self.diameter,
            canvas_width: self.width,
            canvas_height: self.height,
        }
    }

    fn settings(&self) -> Result<EpureConfig> {
        let mut settings = EpureConfig::load_or_default(self.config.as_deref())?;
        settings.apply(&self.overrides());
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Args, Debug, Clone)]
struct FrameArgs {
    /// Frame left edge on the canvas
    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
    frame_x: f64,
    /// Frame top edge on the canvas
    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
    frame_y: f64,
    /// Turn the frame a quarter turn
    #[arg(long)]
    landscape: bool,
}

impl FrameArgs {
    fn frame(&self, settings: &EpureConfig) -> PrintFrame {
        let wanted = Point2D::new(self.frame_x, self.frame_y);
        let origin = clamp_origin(wanted, settings.canvas);
        if origin != wanted {
            log::warn!(
                "frame moved to ({}, {}) to stay on the canvas",
                origin.x,
                origin.y
            );
        }
        let mut frame = PrintFrame::new(origin);
        if self.landscape {
            frame.toggle_rotation();
        }
        frame
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            bend,
            output,
            with_frame,
            frame,
        } => {
            let settings = bend.settings()?;
            let frame = with_frame.then(|| frame.frame(&settings));
            render_file(&settings, frame.as_ref(), &output)?;
        }
        Commands::Page {
            bend,
            frame,
            output,
        } => {
            let settings = bend.settings()?;
            page_file(&settings, &frame.frame(&settings), &output)?;
        }
        Commands::Info { bend, json } => {
            show_info(&bend.settings()?, json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// The drawing is centred on the canvas origin, which the centred view box
/// puts in the middle of the picture.
fn compute(settings: &EpureConfig) -> LayoutGeometry {
    compute_layout_with(&settings.bend, Point2D::ORIGIN, &settings.layout)
}

fn render_file(settings: &EpureConfig, frame: Option<&PrintFrame>, output: &Path) -> Result<()> {
    let layout = compute(settings);
    let mut doc = render_layout(&layout, settings.canvas);
    if let Some(frame) = frame {
        doc.add_shape(frame.overlay());
    }
    doc.write_to(output)?;
    println!("Wrote template to {}", output.display());
    Ok(())
}

fn page_file(settings: &EpureConfig, frame: &PrintFrame, output: &Path) -> Result<()> {
    let layout = compute(settings);
    frame.export_page(&layout).write_to(output)?;
    println!("Wrote A4 page to {}", output.display());
    Ok(())
}

fn fmt_point(p: &Point2D) -> String {
    format!("({:.2}, {:.2})", p.x, p.y)
}

fn show_info(settings: &EpureConfig, json: bool) -> Result<()> {
    let layout = compute(settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    let bend = &settings.bend;
    println!(
        "Bend: {}° at radius {} cm, tube {} cm",
        bend.angle_deg, bend.bend_radius_cm, bend.tube_diameter_cm
    );
    println!("  Apex: {}", fmt_point(&layout.apex));
    for (i, t) in layout.tangents.iter().enumerate() {
        println!("  Tangent {}: {}", i + 1, fmt_point(&t.point));
    }
    match &layout.wall_intersection {
        Some(p) => println!("  Outer walls cross at {}", fmt_point(p)),
        None => println!("  Outer walls do not cross"),
    }

    match &layout.measurement {
        Some(m) => {
            println!("\nBand:");
            println!(
                "  Arc length: {:.2} px ({:.2} cm)",
                m.arc_length,
                px_to_cm(m.arc_length)
            );
            println!("  From: {}", fmt_point(&m.intersection));
            println!("  Marker: {}", fmt_point(&m.marker));
        }
        None => println!("\nBand: no measurement"),
    }

    Ok(())
}
