//! Summaries of the stress maps produced for a schedule.

use std::fmt::Write;

use serde::Serialize;

use crate::config::BladeConfig;
use crate::field::{FieldPeak, Grid, StressField};
use crate::operating::OperatingPoint;
use crate::render::artifact_name;
use crate::resultants::{resultants, Resultants};

/// Key numbers for the stress map of one operating point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldSummary {
    /// 1-based position in the schedule.
    pub index: usize,
    /// The operating point evaluated.
    pub point: OperatingPoint,
    /// Resultants carried at the blade root.
    pub root: Resultants,
    /// Largest deviatoric stress and where it occurs.
    pub peak: Option<FieldPeak>,
    /// File name of the saved image.
    pub artifact: String,
}

impl FieldSummary {
    /// Summarise `field`, the map of the `index`-th operating point.
    #[must_use]
    pub fn new(
        config: &BladeConfig,
        grid: &Grid,
        index: usize,
        point: &OperatingPoint,
        field: &StressField,
    ) -> Self {
        Self {
            index,
            point: *point,
            root: resultants(
                &config.section,
                &config.material,
                config.section.inner_radius(),
                point,
            ),
            peak: field.peak(grid),
            artifact: artifact_name(index, point),
        }
    }
}

/// Everything produced by one pass over the schedule.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    /// Resolved configuration.
    pub config: BladeConfig,
    /// One entry per operating point, in schedule order.
    pub fields: Vec<FieldSummary>,
}

impl RunSummary {
    /// Serialise the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialisation fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Render a textual table of the run.
#[must_use]
pub fn render_summary(summary: &RunSummary) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Blade stress maps: {} operating points, {} x {} grid, rho = {:.1} kg/m^3",
        summary.fields.len(),
        summary.config.nx,
        summary.config.ny,
        summary.config.material.density()
    )
    .expect("writing to string cannot fail");

    for field in &summary.fields {
        write!(
            &mut output,
            "  [{:02}] {}: root F = {:+.3e} N, V = {:+.3e} N, M = {:+.3e} N m",
            field.index,
            field.point.label(),
            field.root.axial,
            field.root.shear,
            field.root.moment
        )
        .expect("writing to string cannot fail");
        let written = match field.peak {
            Some(peak) => writeln!(
                &mut output,
                "; peak |S_dev| = {:.3e} Pa at x = {:+.4} m, y = {:.4} m",
                peak.sdev, peak.x, peak.y
            ),
            None => writeln!(&mut output, "; empty field"),
        };
        written.expect("writing to string cannot fail");
    }

    output
}
