//! Internal force resultants along the blade under inertial line loads.
//!
//! Both inertial loads grow linearly with radius, `q(s) = c * s`. Integrating
//! from the section at `r` out to the free tip at `Ro`, where force and moment
//! vanish, gives closed forms for the shear and moment carried at `r`.

use ndarray::Array2;
use serde::Serialize;

use crate::operating::OperatingPoint;
use crate::section::{BeamSection, Material};

/// Distributed load whose intensity grows linearly with radius, `q(s) = c * s`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineLoad {
    /// Slope `c` of the load in N/m^2.
    pub intensity: f64,
}

impl LineLoad {
    /// Centrifugal load `rho * A * omega^2 * s`.
    #[must_use]
    pub fn centrifugal(linear_density: f64, point: &OperatingPoint) -> Self {
        Self {
            intensity: linear_density * point.omega * point.omega,
        }
    }

    /// Tangential load `rho * A * alpha * s`.
    #[must_use]
    pub fn tangential(linear_density: f64, point: &OperatingPoint) -> Self {
        Self {
            intensity: linear_density * point.alpha,
        }
    }

    /// Integral of the load from `r` to the free tip: `c/2 * (Ro^2 - r^2)`.
    #[must_use]
    pub fn shear_at(&self, r: f64, outer: f64) -> f64 {
        0.5 * self.intensity * (outer * outer - r * r)
    }

    /// Double integral of the load from `r` to the free tip:
    /// `c * (Ro^3/3 - Ro^2 r/2 + r^3/6)`.
    #[must_use]
    pub fn moment_at(&self, r: f64, outer: f64) -> f64 {
        self.intensity * (outer.powi(3) / 3.0 - outer * outer * r / 2.0 + r.powi(3) / 6.0)
    }
}

/// Force resultants carried by the section at one radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Resultants {
    /// Axial force in newtons.
    pub axial: f64,
    /// Shear force in newtons.
    pub shear: f64,
    /// Bending moment in newton-metres.
    pub moment: f64,
}

/// Evaluate the resultants at radius `r` for one operating point.
///
/// The blade model takes the axial force from the shear-type integral of the
/// centrifugal load, the shear force from the tangential load and the bending
/// moment from the moment integral of the centrifugal load.
///
/// # Examples
/// ```
/// use bladestress::{resultants, BeamSection, Material, OperatingPoint};
///
/// let section = BeamSection::default();
/// let material = Material::default();
/// let tip = section.outer_radius();
/// let at_tip = resultants(&section, &material, tip, &OperatingPoint::new(1900.0, 165_000.0));
/// assert_eq!(at_tip.axial, 0.0);
/// assert_eq!(at_tip.shear, 0.0);
/// ```
#[must_use]
pub fn resultants(
    section: &BeamSection,
    material: &Material,
    r: f64,
    point: &OperatingPoint,
) -> Resultants {
    let linear_density = material.linear_density(section);
    let outer = section.outer_radius();
    let centrifugal = LineLoad::centrifugal(linear_density, point);
    let tangential = LineLoad::tangential(linear_density, point);

    Resultants {
        axial: centrifugal.shear_at(r, outer),
        shear: tangential.shear_at(r, outer),
        moment: centrifugal.moment_at(r, outer),
    }
}

/// Resultants evaluated elementwise over a grid of radii.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultantField {
    /// Axial force per grid point.
    pub axial: Array2<f64>,
    /// Shear force per grid point.
    pub shear: Array2<f64>,
    /// Bending moment per grid point.
    pub moment: Array2<f64>,
}

/// Apply [`resultants`] to every radius in `radius`.
#[must_use]
pub fn resultants_over(
    section: &BeamSection,
    material: &Material,
    radius: &Array2<f64>,
    point: &OperatingPoint,
) -> ResultantField {
    let values = radius.mapv(|r| resultants(section, material, r, point));
    ResultantField {
        axial: values.mapv(|value| value.axial),
        shear: values.mapv(|value| value.shear),
        moment: values.mapv(|value| value.moment),
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;

    use super::*;
    use crate::config::BladeConfig;

    fn final_point() -> OperatingPoint {
        OperatingPoint::new(1900.0, 165_000.0)
    }

    #[test]
    fn free_tip_carries_no_load() {
        let config = BladeConfig::default();
        let outer = config.section.outer_radius();
        for point in &config.schedule {
            let tip = resultants(&config.section, &config.material, outer, point);
            assert_eq!(tip.axial, 0.0);
            assert_eq!(tip.shear, 0.0);
            let scale = config.linear_density() * point.omega.powi(2) * outer.powi(3);
            assert_abs_diff_eq!(tip.moment, 0.0, epsilon = 1.0e-12 * scale.max(1.0));
        }
    }

    #[test]
    fn unloaded_blade_has_zero_resultants() {
        let config = BladeConfig::default();
        let rest = OperatingPoint::new(0.0, 0.0);
        for r in [1.0, 1.1, 1.25, 1.3] {
            let forces = resultants(&config.section, &config.material, r, &rest);
            assert_eq!(forces, Resultants::default());
        }
    }

    #[test]
    fn moment_decreases_towards_tip() {
        let config = BladeConfig::default();
        let inner = config.section.inner_radius();
        let span = config.section.span();
        let moments: Vec<f64> = (0..=50)
            .map(|i| inner + span * f64::from(i) / 50.0)
            .map(|r| {
                let point = OperatingPoint::new(40.0, 0.0);
                resultants(&config.section, &config.material, r, &point).moment
            })
            .collect();
        assert!(moments.windows(2).all(|pair| pair[1] < pair[0]));
    }

    #[test]
    fn root_resultants_match_hand_calculation() {
        let config = BladeConfig::default();
        let point = final_point();
        let rho_a = 5822.4 * 0.0025;
        let c_omega = rho_a * 1900.0 * 1900.0;
        let c_alpha = rho_a * 165_000.0;
        let root = resultants(&config.section, &config.material, 1.0, &point);

        assert_relative_eq!(root.axial, 0.5 * c_omega * (1.69 - 1.0), max_relative = 1.0e-12);
        assert_relative_eq!(root.shear, 0.5 * c_alpha * (1.69 - 1.0), max_relative = 1.0e-12);
        assert_relative_eq!(
            root.moment,
            c_omega * (2.197 / 3.0 - 1.69 / 2.0 + 1.0 / 6.0),
            max_relative = 1.0e-10
        );
    }

    #[test]
    fn field_evaluation_matches_pointwise_evaluation() {
        let config = BladeConfig::default();
        let point = final_point();
        let radius = array![[1.0, 1.0], [1.15, 1.15], [1.3, 1.3]];
        let field = resultants_over(&config.section, &config.material, &radius, &point);
        for ((row, col), &r) in radius.indexed_iter() {
            let expected = resultants(&config.section, &config.material, r, &point);
            assert_eq!(field.axial[[row, col]], expected.axial);
            assert_eq!(field.shear[[row, col]], expected.shear);
            assert_eq!(field.moment[[row, col]], expected.moment);
        }
    }
}
