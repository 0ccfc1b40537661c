//! Geometric and material description of the blade cross-section.

use serde::Serialize;
use uom::si::{
    f64::{Length, MassDensity, Ratio},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    ratio::ratio,
};

use crate::errors::ConfigError;

/// Largest accepted deviation of the summed volume fractions from one.
const VOLUME_FRACTION_TOLERANCE: f64 = 1.0e-9;

/// Reject zero, negative and non-finite magnitudes.
fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositiveDimension { name, value })
    }
}

/// Rectangular blade section swept from the root radius to the tip radius.
///
/// All dimensions are stored in metres. The width runs across the section
/// (the `x` direction of the stress maps) and the thickness is the out-of-plane
/// depth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BeamSection {
    /// Plotted span of the blade.
    length: f64,
    /// In-plane width of the section.
    width: f64,
    /// Out-of-plane thickness of the section.
    thickness: f64,
    /// Radius of the blade root.
    inner_radius: f64,
    /// Radius of the free tip.
    outer_radius: f64,
}

impl BeamSection {
    /// Create a section from SI values in metres.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveDimension`] for any non-positive
    /// dimension and [`ConfigError::RadiiOutOfOrder`] unless
    /// `outer_radius > inner_radius`.
    ///
    /// # Examples
    /// ```
    /// use bladestress::BeamSection;
    ///
    /// let section = BeamSection::new(0.3, 0.1, 0.025, 1.0, 1.3).expect("valid section");
    /// assert!((section.area() - 0.0025).abs() < 1.0e-15);
    /// ```
    pub fn new(
        length: f64,
        width: f64,
        thickness: f64,
        inner_radius: f64,
        outer_radius: f64,
    ) -> Result<Self, ConfigError> {
        let length = positive("length", length)?;
        let width = positive("width", width)?;
        let thickness = positive("thickness", thickness)?;
        let inner_radius = positive("inner radius", inner_radius)?;
        let outer_radius = positive("outer radius", outer_radius)?;
        if outer_radius <= inner_radius {
            return Err(ConfigError::RadiiOutOfOrder {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        Ok(Self {
            length,
            width,
            thickness,
            inner_radius,
            outer_radius,
        })
    }

    /// Create a section from unit-aware lengths.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BeamSection::new`].
    ///
    /// # Examples
    /// ```
    /// use bladestress::BeamSection;
    /// use uom::si::{f64::Length, length::{centimeter, meter}};
    ///
    /// let section = BeamSection::from_dimensions(
    ///     Length::new::<centimeter>(30.0),
    ///     Length::new::<centimeter>(10.0),
    ///     Length::new::<centimeter>(2.5),
    ///     Length::new::<meter>(1.0),
    ///     Length::new::<meter>(1.3),
    /// )
    /// .expect("valid section");
    /// assert!((section.width() - 0.1).abs() < 1.0e-12);
    /// ```
    pub fn from_dimensions(
        length: Length,
        width: Length,
        thickness: Length,
        inner_radius: Length,
        outer_radius: Length,
    ) -> Result<Self, ConfigError> {
        Self::new(
            length.get::<meter>(),
            width.get::<meter>(),
            thickness.get::<meter>(),
            inner_radius.get::<meter>(),
            outer_radius.get::<meter>(),
        )
    }

    /// Plotted span in metres.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Section width in metres.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Section thickness in metres.
    #[must_use]
    pub const fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Root radius in metres.
    #[must_use]
    pub const fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Tip radius in metres.
    #[must_use]
    pub const fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Radial distance between root and tip in metres.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    /// Cross-sectional area `w * t` in square metres.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.thickness
    }

    /// Second moment of area `t * w^3 / 12` about the neutral axis in m^4.
    #[must_use]
    pub fn second_moment(&self) -> f64 {
        self.thickness * self.width.powi(3) / 12.0
    }

    /// First moment of the area outboard of the cut at `x`, in m^3.
    ///
    /// Vanishes at the outer fibres `x = ±w/2` and peaks on the neutral axis.
    #[must_use]
    pub fn first_moment(&self, x: f64) -> f64 {
        let x = x.abs();
        self.thickness * (0.5 * self.width - x) * (0.25 * self.width + 0.5 * x)
    }
}

impl Default for BeamSection {
    fn default() -> Self {
        Self {
            length: 0.3,
            width: 0.1,
            thickness: 0.025,
            inner_radius: 1.0,
            outer_radius: 1.3,
        }
    }
}

/// Two-phase composite whose density is the volume-weighted average of its constituents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Material {
    /// Constituent densities in kg/m^3 paired with their volume fractions.
    constituents: [(f64, f64); 2],
    /// Mixed density in kg/m^3.
    density: f64,
}

impl Material {
    /// Mix two constituents given as `(density, volume fraction)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveDimension`] for a non-positive density
    /// or fraction, and [`ConfigError::VolumeFractionSum`] when the fractions do
    /// not add up to one.
    ///
    /// # Examples
    /// ```
    /// use bladestress::Material;
    ///
    /// let material = Material::new((4500.0, 0.7), (8908.0, 0.3)).expect("fractions sum to one");
    /// assert!((material.density() - 5822.4).abs() < 1.0e-9);
    /// ```
    pub fn new(first: (f64, f64), second: (f64, f64)) -> Result<Self, ConfigError> {
        let (rho1, v1) = (positive("density", first.0)?, positive("volume fraction", first.1)?);
        let (rho2, v2) = (positive("density", second.0)?, positive("volume fraction", second.1)?);
        let sum = v1 + v2;
        if (sum - 1.0).abs() > VOLUME_FRACTION_TOLERANCE {
            return Err(ConfigError::VolumeFractionSum { sum });
        }
        Ok(Self {
            constituents: [(rho1, v1), (rho2, v2)],
            density: v1 * rho1 + v2 * rho2,
        })
    }

    /// Mix two constituents given as unit-aware quantities.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Material::new`].
    pub fn from_constituents(
        first: (MassDensity, Ratio),
        second: (MassDensity, Ratio),
    ) -> Result<Self, ConfigError> {
        Self::new(
            (
                first.0.get::<kilogram_per_cubic_meter>(),
                first.1.get::<ratio>(),
            ),
            (
                second.0.get::<kilogram_per_cubic_meter>(),
                second.1.get::<ratio>(),
            ),
        )
    }

    /// Composite density in kg/m^3.
    #[must_use]
    pub const fn density(&self) -> f64 {
        self.density
    }

    /// The `(density, volume fraction)` pairs the composite was mixed from.
    #[must_use]
    pub const fn constituents(&self) -> [(f64, f64); 2] {
        self.constituents
    }

    /// Mass per unit length of the section in kg/m.
    #[must_use]
    pub fn linear_density(&self, section: &BeamSection) -> f64 {
        self.density * section.area()
    }
}

impl Default for Material {
    /// Titanium matrix (70 %) with nickel (30 %).
    fn default() -> Self {
        Self {
            constituents: [(4500.0, 0.7), (8908.0, 0.3)],
            density: 0.7 * 4500.0 + 0.3 * 8908.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{length::millimeter, mass_density::gram_per_cubic_centimeter, ratio::percent};

    use super::*;

    #[test]
    fn default_section_properties() {
        let section = BeamSection::default();
        assert_relative_eq!(section.area(), 0.0025, max_relative = 1.0e-12);
        assert_relative_eq!(
            section.second_moment(),
            0.025 * 0.001 / 12.0,
            max_relative = 1.0e-12
        );
        assert_relative_eq!(section.span(), 0.3, epsilon = 1.0e-12);
        assert_eq!(
            BeamSection::new(0.3, 0.1, 0.025, 1.0, 1.3).expect("valid"),
            section
        );
    }

    #[test]
    fn rejects_invalid_dimensions() {
        assert_eq!(
            BeamSection::new(0.3, 0.0, 0.025, 1.0, 1.3),
            Err(ConfigError::NonPositiveDimension {
                name: "width",
                value: 0.0
            })
        );
        assert_eq!(
            BeamSection::new(0.3, 0.1, 0.025, 1.0, 1.0),
            Err(ConfigError::RadiiOutOfOrder {
                inner: 1.0,
                outer: 1.0
            })
        );
        assert!(BeamSection::new(f64::NAN, 0.1, 0.025, 1.0, 1.3).is_err());
    }

    #[test]
    fn unit_aware_section_converts_to_metres() {
        let section = BeamSection::from_dimensions(
            Length::new::<millimeter>(300.0),
            Length::new::<millimeter>(100.0),
            Length::new::<millimeter>(25.0),
            Length::new::<millimeter>(1000.0),
            Length::new::<millimeter>(1300.0),
        )
        .expect("valid section");
        assert_relative_eq!(section.thickness(), 0.025, epsilon = 1.0e-15);
        assert_relative_eq!(section.outer_radius(), 1.3, epsilon = 1.0e-12);
    }

    #[test]
    fn first_moment_vanishes_at_outer_fibres() {
        let section = BeamSection::default();
        assert_eq!(section.first_moment(0.05), 0.0);
        assert_eq!(section.first_moment(-0.05), 0.0);
        // t * w^2 / 8 on the neutral axis.
        assert_relative_eq!(
            section.first_moment(0.0),
            0.025 * 0.01 / 8.0,
            max_relative = 1.0e-12
        );
        assert_eq!(section.first_moment(0.02), section.first_moment(-0.02));
    }

    #[test]
    fn default_material_matches_mixing_rule() {
        let material = Material::new((4500.0, 0.7), (8908.0, 0.3)).expect("valid mix");
        assert_relative_eq!(material.density(), 5822.4, epsilon = 1.0e-9);
        assert_relative_eq!(Material::default().density(), material.density());
        assert_relative_eq!(
            material.linear_density(&BeamSection::default()),
            5822.4 * 0.0025,
            epsilon = 1.0e-9
        );
    }

    #[test]
    fn rejects_fractions_that_do_not_sum_to_one() {
        let error = Material::new((4500.0, 0.7), (8908.0, 0.4)).expect_err("fractions exceed one");
        assert!(matches!(
            error,
            ConfigError::VolumeFractionSum { sum } if (sum - 1.1).abs() < 1.0e-12
        ));
    }

    #[test]
    fn unit_aware_material_converts_to_si() {
        let material = Material::from_constituents(
            (
                MassDensity::new::<gram_per_cubic_centimeter>(4.5),
                Ratio::new::<percent>(70.0),
            ),
            (
                MassDensity::new::<gram_per_cubic_centimeter>(8.908),
                Ratio::new::<percent>(30.0),
            ),
        )
        .expect("valid mix");
        assert_relative_eq!(material.density(), 5822.4, epsilon = 1.0e-9);
    }
}
