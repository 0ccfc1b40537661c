//! Stress fields over the blade's width-by-span plane.

use ndarray::{Array1, Array2, Zip};
use serde::Serialize;

use crate::config::BladeConfig;
use crate::operating::OperatingPoint;
use crate::resultants::{resultants, resultants_over, Resultants};
use crate::section::{BeamSection, Material};

/// Cell-centred evaluation grid spanning `x ∈ [-w/2, w/2]` and `y ∈ [0, L]`.
///
/// Arrays are indexed `[row, column]` with rows running along the span (`y`)
/// and columns across the width (`x`). The grid does not depend on the
/// operating point, so one instance serves the whole schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    /// Cell width across the section.
    pub dx: f64,
    /// Cell height along the span.
    pub dy: f64,
    /// Column centres.
    pub x_centres: Array1<f64>,
    /// Row centres.
    pub y_centres: Array1<f64>,
    /// `x` coordinate of every cell.
    pub x: Array2<f64>,
    /// `y` coordinate of every cell.
    pub y: Array2<f64>,
    /// Physical radius `Rr + y` of every cell.
    pub radius: Array2<f64>,
}

impl Grid {
    /// Build an `nx` by `ny` grid over the section.
    #[must_use]
    pub fn new(section: &BeamSection, nx: usize, ny: usize) -> Self {
        let dx = section.width() / nx as f64;
        let dy = section.length() / ny as f64;
        // Offsets are counted from the middle so that columns mirror exactly about x = 0.
        let half = nx as f64 / 2.0;
        let x_centres = Array1::from_shape_fn(nx, |i| (i as f64 + 0.5 - half) * dx);
        let y_centres = Array1::from_shape_fn(ny, |j| (j as f64 + 0.5) * dy);

        let x = Array2::from_shape_fn((ny, nx), |(_, i)| x_centres[i]);
        let y = Array2::from_shape_fn((ny, nx), |(j, _)| y_centres[j]);
        let inner = section.inner_radius();
        let radius = y.mapv(|y| inner + y);

        Self {
            dx,
            dy,
            x_centres,
            y_centres,
            x,
            y,
            radius,
        }
    }

    /// Build the grid described by a configuration.
    #[must_use]
    pub fn from_config(config: &BladeConfig) -> Self {
        Self::new(&config.section, config.nx, config.ny)
    }

    /// `(rows, columns)` of the grid.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }
}

/// Plane stress state at a single point of the section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct StressState {
    /// Normal stress along the span in pascals.
    pub sigma_xx: f64,
    /// In-plane shear stress in pascals.
    pub tau_xy: f64,
    /// Deviatoric stress norm in pascals.
    pub sdev: f64,
}

impl StressState {
    /// Combine section resultants into stresses at the fibre `x`.
    #[must_use]
    pub fn from_resultants(section: &BeamSection, x: f64, resultants: &Resultants) -> Self {
        let izz = section.second_moment();
        let sigma_xx = resultants.axial / section.area() - resultants.moment / izz * x;
        let tau_xy = resultants.shear * section.first_moment(x) / (izz * section.thickness());
        let sdev = (2.0 / 3.0 * sigma_xx * sigma_xx + 2.0 * tau_xy * tau_xy).sqrt();
        Self {
            sigma_xx,
            tau_xy,
            sdev,
        }
    }
}

/// Stress state at the fibre `x` of the section at radius `r`.
///
/// # Examples
/// ```
/// use bladestress::{stress_at, BeamSection, Material, OperatingPoint};
///
/// let section = BeamSection::default();
/// let material = Material::default();
/// let point = OperatingPoint::new(350.0, 20_000.0);
/// let state = stress_at(&section, &material, 0.5 * section.width(), 1.1, &point);
/// assert_eq!(state.tau_xy, 0.0);
/// ```
#[must_use]
pub fn stress_at(
    section: &BeamSection,
    material: &Material,
    x: f64,
    r: f64,
    point: &OperatingPoint,
) -> StressState {
    StressState::from_resultants(section, x, &resultants(section, material, r, point))
}

/// Location and value of the largest deviatoric stress in a field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FieldPeak {
    /// Row index along the span.
    pub row: usize,
    /// Column index across the width.
    pub column: usize,
    /// `x` coordinate of the cell centre in metres.
    pub x: f64,
    /// `y` coordinate of the cell centre in metres.
    pub y: f64,
    /// Deviatoric stress norm in pascals.
    pub sdev: f64,
}

/// Stress components over a [`Grid`] for one operating point.
#[derive(Clone, Debug, PartialEq)]
pub struct StressField {
    /// Normal stress per cell.
    pub sigma_xx: Array2<f64>,
    /// Shear stress per cell.
    pub tau_xy: Array2<f64>,
    /// Deviatoric stress norm per cell.
    pub sdev: Array2<f64>,
}

impl StressField {
    /// Smallest and largest deviatoric stress in the field.
    #[must_use]
    pub fn sdev_range(&self) -> (f64, f64) {
        self.sdev
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &value| {
                (lo.min(value), hi.max(value))
            })
    }

    /// Largest deviatoric stress; the first cell in row-major order wins ties.
    #[must_use]
    pub fn peak(&self, grid: &Grid) -> Option<FieldPeak> {
        let mut best: Option<((usize, usize), f64)> = None;
        for (index, &value) in self.sdev.indexed_iter() {
            if best.map_or(true, |(_, current)| value > current) {
                best = Some((index, value));
            }
        }
        let ((row, column), sdev) = best?;
        Some(FieldPeak {
            row,
            column,
            x: grid.x_centres[column],
            y: grid.y_centres[row],
            sdev,
        })
    }
}

/// Evaluate the deviatoric stress norm over the grid for one operating point.
#[must_use]
pub fn deviatoric_norm_field(
    config: &BladeConfig,
    grid: &Grid,
    point: &OperatingPoint,
) -> StressField {
    let forces = resultants_over(&config.section, &config.material, &grid.radius, point);
    let states = Zip::from(&grid.x)
        .and(&forces.axial)
        .and(&forces.shear)
        .and(&forces.moment)
        .map_collect(|&x, &axial, &shear, &moment| {
            StressState::from_resultants(
                &config.section,
                x,
                &Resultants {
                    axial,
                    shear,
                    moment,
                },
            )
        });

    StressField {
        sigma_xx: states.mapv(|state| state.sigma_xx),
        tau_xy: states.mapv(|state| state.tau_xy),
        sdev: states.mapv(|state| state.sdev),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn grid_covers_section_with_cell_centres() {
        let config = BladeConfig::default();
        let grid = Grid::from_config(&config);
        assert_eq!(grid.shape(), (200, 60));
        assert_relative_eq!(grid.dx, 0.1 / 60.0);
        assert_relative_eq!(grid.dy, 0.3 / 200.0);
        assert_relative_eq!(grid.x_centres[0], -0.05 + 0.5 * grid.dx, max_relative = 1.0e-12);
        assert_relative_eq!(grid.y_centres[199], 0.3 - 0.5 * grid.dy, max_relative = 1.0e-12);
        assert_relative_eq!(grid.radius[[0, 0]], 1.0 + 0.5 * grid.dy);
        for i in 0..60 {
            assert_eq!(grid.x_centres[i], -grid.x_centres[59 - i]);
        }
    }

    #[test]
    fn pointwise_and_field_evaluation_agree() {
        let config = BladeConfig::default();
        let grid = Grid::new(&config.section, 6, 10);
        let point = OperatingPoint::new(975.0, 63_000.0);
        let field = deviatoric_norm_field(&config, &grid, &point);
        for ((row, column), &sdev) in field.sdev.indexed_iter() {
            let (x, r) = (grid.x[[row, column]], grid.radius[[row, column]]);
            let state = stress_at(&config.section, &config.material, x, r, &point);
            assert_eq!(sdev, state.sdev);
            assert_eq!(field.sigma_xx[[row, column]], state.sigma_xx);
            assert_eq!(field.tau_xy[[row, column]], state.tau_xy);
        }
    }

    #[test]
    fn outer_fibre_has_no_shear() {
        let config = BladeConfig::default();
        let (section, material) = (&config.section, &config.material);
        let half_width = 0.5 * section.width();
        for point in &config.schedule {
            for r in [1.0, 1.2, 1.3] {
                assert_eq!(stress_at(section, material, half_width, r, point).tau_xy, 0.0);
                assert_eq!(stress_at(section, material, -half_width, r, point).tau_xy, 0.0);
            }
        }
    }

    #[test]
    fn neutral_axis_combines_axial_and_shear_terms() {
        let config = BladeConfig::default();
        let point = OperatingPoint::new(1400.0, 90_000.0);
        let forces = resultants(&config.section, &config.material, 1.1, &point);
        let state = stress_at(&config.section, &config.material, 0.0, 1.1, &point);
        let sigma = forces.axial / config.section.area();
        let tau = forces.shear * config.section.first_moment(0.0)
            / (config.section.second_moment() * config.section.thickness());
        assert_relative_eq!(state.sigma_xx, sigma);
        assert_relative_eq!(state.tau_xy, tau);
        assert_relative_eq!(
            state.sdev,
            (2.0 / 3.0 * sigma * sigma + 2.0 * tau * tau).sqrt(),
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn peak_reports_first_maximum() {
        let config = BladeConfig::default();
        let grid = Grid::new(&config.section, 4, 4);
        let field = deviatoric_norm_field(&config, &grid, &OperatingPoint::new(0.0, 0.0));
        let peak = field.peak(&grid).expect("non-empty field");
        assert_eq!((peak.row, peak.column), (0, 0));
        assert_eq!(peak.sdev, 0.0);
        assert_eq!(field.sdev_range(), (0.0, 0.0));
    }
}
