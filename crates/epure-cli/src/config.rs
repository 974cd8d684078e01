//! Settings file and command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use epure::CanvasSize;
use epure_kernel_drafting::{BendParameters, LayoutConfig};
use serde::{Deserialize, Serialize};

/// Everything a run needs, as read from a TOML settings file.
///
/// Every section is optional:
///
/// ```toml
/// [bend]
/// angle_deg = 90.0
/// bend_radius_cm = 5.0
/// tube_diameter_cm = 2.0
///
/// [canvas]
/// width = 2000.0
/// height = 1500.0
///
/// [layout]
/// extension = 2000.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpureConfig {
    pub bend: BendParameters,
    pub canvas: CanvasSize,
    pub layout: LayoutConfig,
}

/// Values given on the command line; `None` keeps the file's value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub angle_deg: Option<f64>,
    pub bend_radius_cm: Option<f64>,
    pub tube_diameter_cm: Option<f64>,
    pub canvas_width: Option<f64>,
    pub canvas_height: Option<f64>,
}

impl EpureConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a settings file. A missing or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        log::info!("settings loaded from {}", path.display());
        Ok(config)
    }

    /// Settings from `path` if given, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(&mut self, o: &Overrides) {
        let set = |slot: &mut f64, value: Option<f64>| {
            if let Some(v) = value {
                *slot = v;
            }
        };
        set(&mut self.bend.angle_deg, o.angle_deg);
        set(&mut self.bend.bend_radius_cm, o.bend_radius_cm);
        set(&mut self.bend.tube_diameter_cm, o.tube_diameter_cm);
        set(&mut self.canvas.width, o.canvas_width);
        set(&mut self.canvas.height, o.canvas_height);
    }

    /// Reject settings the construction cannot use.
    pub fn validate(&self) -> Result<()> {
        self.bend.validate()?;
        self.canvas.validate()?;
        Ok(())
    }
}
