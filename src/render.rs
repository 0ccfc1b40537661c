//! Filled-contour stress maps written as PNG images.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use ndarray::Array2;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use tracing::debug;

use crate::config::RenderSettings;
use crate::errors::RenderError;
use crate::field::{Grid, StressField};
use crate::operating::OperatingPoint;

/// Points per inch used to turn typographic sizes into pixels.
const POINTS_PER_INCH: f64 = 72.0;

/// Family name under which the embedded font is registered.
const FONT_FAMILY: &str = "sans-serif";

/// DejaVu Sans, bundled so text rendering does not depend on system fonts.
static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Register the bundled font with plotters once per process.
fn register_embedded_font() -> Result<(), RenderError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let registered = *REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, DEJAVU_SANS).is_ok());
    if registered {
        Ok(())
    } else {
        Err(RenderError::Plot("bundled font could not be parsed".to_string()))
    }
}

/// Deterministic file name of the stress map for the `index`-th (1-based) point.
///
/// # Examples
/// ```
/// use bladestress::{artifact_name, OperatingPoint};
///
/// let name = artifact_name(8, &OperatingPoint::new(1900.0, 165_000.0));
/// assert_eq!(name, "Sdev_08_omega_1900_alpha_165000.png");
/// ```
#[must_use]
pub fn artifact_name(index: usize, point: &OperatingPoint) -> String {
    format!(
        "Sdev_{index:02}_omega_{}_alpha_{}.png",
        point.omega as i64, point.alpha as i64
    )
}

/// Create the output directory and any missing parents.
///
/// # Errors
///
/// Returns [`RenderError::Io`] when the directory cannot be created.
pub fn prepare_output_dir(dir: &Path) -> Result<(), RenderError> {
    fs::create_dir_all(dir).map_err(|source| RenderError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// A field quantised into equally spaced contour bands.
#[derive(Clone, Debug, PartialEq)]
pub struct ContourBands {
    /// Band boundaries in ascending order.
    pub levels: Vec<f64>,
    /// Band index of every cell, in `0..levels.len() - 1`.
    pub bands: Array2<usize>,
}

impl ContourBands {
    /// Quantise `values` into `levels - 1` bands between its minimum and maximum.
    ///
    /// A constant field collapses into the lowest band. Fewer than two levels
    /// are treated as two.
    #[must_use]
    pub fn from_field(values: &Array2<f64>, levels: usize) -> Self {
        let levels = levels.max(2);
        let (lo, hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &value| {
                (lo.min(value), hi.max(value))
            });
        let (lo, hi) = if lo.is_finite() && hi > lo {
            (lo, hi)
        } else {
            let lo = if lo.is_finite() { lo } else { 0.0 };
            (lo, lo + 1.0)
        };

        let step = (hi - lo) / (levels - 1) as f64;
        let boundaries = (0..levels).map(|k| lo + step * k as f64).collect();
        let top = levels - 2;
        let bands = values.mapv(|value| {
            let position = ((value - lo) / step).floor();
            if position <= 0.0 {
                0
            } else {
                (position as usize).min(top)
            }
        });

        Self {
            levels: boundaries,
            bands,
        }
    }

    /// Number of bands between the levels.
    #[must_use]
    pub fn band_count(&self) -> usize {
        self.levels.len() - 1
    }

    /// Value range covered by the levels.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.levels[0], self.levels[self.levels.len() - 1])
    }
}

/// Colour of band `band` out of `count`, running from blue (low) to red (high).
#[must_use]
pub fn band_colour(band: usize, count: usize) -> HSLColor {
    let fraction = if count > 1 {
        band as f64 / (count - 1) as f64
    } else {
        0.0
    };
    HSLColor(2.0 / 3.0 * (1.0 - fraction), 0.85, 0.5)
}

/// Draw the stress map for one operating point into an RGB `buffer` of `dimensions` pixels.
fn draw_stress_map(
    buffer: &mut [u8],
    dimensions: (u32, u32),
    grid: &Grid,
    field: &StressField,
    point: &OperatingPoint,
    settings: &RenderSettings,
) -> Result<(), RenderError> {
    let contours = ContourBands::from_field(&field.sdev, settings.levels);
    let count = contours.band_count();
    let scale = f64::from(settings.dpi) / POINTS_PER_INCH;
    let pt = |size: f64| size * scale;
    let px = |size: f64| (size * scale).round() as u32;

    let root = BitMapBackend::with_buffer(buffer, dimensions).into_drawing_area();
    root.fill(&WHITE).map_err(RenderError::plot)?;
    let (width, _) = root.dim_in_pixel();
    let (plot_area, bar_area) = root.split_horizontally(width * 4 / 5);

    let half_width = 0.5 * grid.dx * grid.x_centres.len() as f64;
    let length = grid.dy * grid.y_centres.len() as f64;
    let mut chart = ChartBuilder::on(&plot_area)
        .caption(
            format!("|S_dev| at {}", point.label()),
            (FONT_FAMILY, pt(11.0)).into_font(),
        )
        .margin(px(6.0))
        .x_label_area_size(px(28.0))
        .y_label_area_size(px(40.0))
        .build_cartesian_2d(-half_width..half_width, 0.0..length)
        .map_err(RenderError::plot)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x [m]")
        .y_desc("y [m]")
        .label_style((FONT_FAMILY, pt(8.0)).into_font())
        .axis_desc_style((FONT_FAMILY, pt(10.0)).into_font())
        .draw()
        .map_err(RenderError::plot)?;

    let (hx, hy) = (0.5 * grid.dx, 0.5 * grid.dy);
    chart
        .draw_series(contours.bands.indexed_iter().map(|((row, column), &band)| {
            let x = grid.x_centres[column];
            let y = grid.y_centres[row];
            Rectangle::new(
                [(x - hx, y - hy), (x + hx, y + hy)],
                band_colour(band, count).filled(),
            )
        }))
        .map_err(RenderError::plot)?;

    let (lo, hi) = contours.range();
    let mut colorbar = ChartBuilder::on(&bar_area)
        .margin_top(px(28.0))
        .margin_bottom(px(34.0))
        .margin_left(px(6.0))
        .right_y_label_area_size(px(48.0))
        .build_cartesian_2d(0.0..1.0, lo..hi)
        .map_err(RenderError::plot)?;

    colorbar
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("|S_dev| [Pa]")
        .y_label_formatter(&|value: &f64| format!("{value:.2e}"))
        .label_style((FONT_FAMILY, pt(7.0)).into_font())
        .axis_desc_style((FONT_FAMILY, pt(9.0)).into_font())
        .draw()
        .map_err(RenderError::plot)?;

    colorbar
        .draw_series(contours.levels.windows(2).enumerate().map(|(band, bounds)| {
            Rectangle::new(
                [(0.0, bounds[0]), (1.0, bounds[1])],
                band_colour(band, count).filled(),
            )
        }))
        .map_err(RenderError::plot)?;

    root.present().map_err(RenderError::plot)
}

/// Draw the stress map for one operating point and encode it as PNG bytes.
///
/// # Errors
///
/// Returns [`RenderError::Plot`] when drawing or encoding fails.
pub fn encode_stress_map(
    grid: &Grid,
    field: &StressField,
    point: &OperatingPoint,
    settings: &RenderSettings,
) -> Result<Vec<u8>, RenderError> {
    register_embedded_font()?;
    let (width, height) = settings.pixel_size();
    let mut pixels = vec![0_u8; width as usize * height as usize * 3];
    draw_stress_map(&mut pixels, (width, height), grid, field, point, settings)?;

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, width, height, ColorType::Rgb8)
        .map_err(RenderError::plot)?;
    Ok(png)
}

/// Draw the stress map for one operating point and save it as `path`.
///
/// # Errors
///
/// Returns [`RenderError::Plot`] when drawing or encoding fails and
/// [`RenderError::Io`] when the image file cannot be written.
pub fn render_stress_map(
    path: &Path,
    grid: &Grid,
    field: &StressField,
    point: &OperatingPoint,
    settings: &RenderSettings,
) -> Result<(), RenderError> {
    let png = encode_stress_map(grid, field, point, settings)?;
    fs::write(path, &png).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = png.len(), "stress map written");
    Ok(())
}

/// Render the `index`-th stress map into `settings.output_dir`, returning its path.
///
/// # Errors
///
/// Propagates any [`RenderError`] from directory creation or drawing.
pub fn save_stress_map(
    index: usize,
    grid: &Grid,
    field: &StressField,
    point: &OperatingPoint,
    settings: &RenderSettings,
) -> Result<PathBuf, RenderError> {
    prepare_output_dir(&settings.output_dir)?;
    let path = settings.output_dir.join(artifact_name(index, point));
    render_stress_map(&path, grid, field, point, settings)?;
    Ok(path)
}
