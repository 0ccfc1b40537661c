//! Immutable run configuration shared by every stage of the pipeline.

use std::path::PathBuf;

use serde::Serialize;

use crate::errors::ConfigError;
use crate::operating::{default_schedule, OperatingPoint};
use crate::section::{BeamSection, Material};

/// Settings that control how stress maps are drawn and where they are saved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderSettings {
    /// Directory receiving the images, created on demand.
    pub output_dir: PathBuf,
    /// Number of filled contour levels.
    pub levels: usize,
    /// Figure size in inches `(width, height)`.
    pub figure_size: (f64, f64),
    /// Raster resolution in dots per inch.
    pub dpi: u32,
}

impl RenderSettings {
    /// Canvas size in pixels derived from the figure size and resolution.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.figure_size.0 * dpi).round() as u32,
            (self.figure_size.1 * dpi).round() as u32,
        )
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("figures"),
            levels: 60,
            figure_size: (6.5, 5.0),
            dpi: 250,
        }
    }
}

/// Everything the resultant, field and render stages need, built once at startup.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BladeConfig {
    /// Blade geometry.
    pub section: BeamSection,
    /// Blade material.
    pub material: Material,
    /// Grid cells across the width.
    pub nx: usize,
    /// Grid cells along the span.
    pub ny: usize,
    /// Operating points in output order.
    pub schedule: Vec<OperatingPoint>,
    /// Image output settings.
    pub render: RenderSettings,
}

impl BladeConfig {
    /// Assemble a configuration, checking the grid resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyGrid`] when `nx` or `ny` is zero.
    pub fn new(
        section: BeamSection,
        material: Material,
        (nx, ny): (usize, usize),
        schedule: Vec<OperatingPoint>,
        render: RenderSettings,
    ) -> Result<Self, ConfigError> {
        if nx == 0 || ny == 0 {
            return Err(ConfigError::EmptyGrid { nx, ny });
        }
        Ok(Self {
            section,
            material,
            nx,
            ny,
            schedule,
            render,
        })
    }

    /// Intensity `rho * A` multiplying every inertial line load, in kg/m.
    #[must_use]
    pub fn linear_density(&self) -> f64 {
        self.material.linear_density(&self.section)
    }
}

impl Default for BladeConfig {
    fn default() -> Self {
        Self {
            section: BeamSection::default(),
            material: Material::default(),
            nx: 60,
            ny: 200,
            schedule: default_schedule(),
            render: RenderSettings::default(),
        }
    }
}
