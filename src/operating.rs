//! Angular operating points at which the blade is evaluated.

use serde::Serialize;
use uom::si::{
    angular_acceleration::radian_per_second_squared,
    angular_velocity::radian_per_second,
    f64::{AngularAcceleration, AngularVelocity},
};

/// Angular velocities of the default schedule in rad/s.
const DEFAULT_OMEGA: [f64; 8] = [0.0, 40.0, 160.0, 350.0, 625.0, 975.0, 1400.0, 1900.0];

/// Angular accelerations of the default schedule in rad/s^2.
const DEFAULT_ALPHA: [f64; 8] = [
    0.0, 2250.0, 9000.0, 20000.0, 40000.0, 63000.0, 90000.0, 165000.0,
];

/// A single `(omega, alpha)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OperatingPoint {
    /// Angular velocity in rad/s.
    pub omega: f64,
    /// Angular acceleration in rad/s^2.
    pub alpha: f64,
}

impl OperatingPoint {
    /// Create an operating point from SI values.
    #[must_use]
    pub const fn new(omega: f64, alpha: f64) -> Self {
        Self { omega, alpha }
    }

    /// Create an operating point from unit-aware quantities.
    ///
    /// # Examples
    /// ```
    /// use bladestress::OperatingPoint;
    /// use uom::si::{
    ///     angular_acceleration::radian_per_second_squared,
    ///     angular_velocity::revolution_per_minute,
    ///     f64::{AngularAcceleration, AngularVelocity},
    /// };
    ///
    /// let point = OperatingPoint::from_quantities(
    ///     AngularVelocity::new::<revolution_per_minute>(60.0),
    ///     AngularAcceleration::new::<radian_per_second_squared>(10.0),
    /// );
    /// assert!((point.omega - 2.0 * std::f64::consts::PI).abs() < 1.0e-12);
    /// ```
    #[must_use]
    pub fn from_quantities(omega: AngularVelocity, alpha: AngularAcceleration) -> Self {
        Self::new(
            omega.get::<radian_per_second>(),
            alpha.get::<radian_per_second_squared>(),
        )
    }

    /// Short human-readable description used in plot titles and logs.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "omega={:.0} rad/s, alpha={:.0} rad/s^2",
            self.omega, self.alpha
        )
    }
}

/// The eight operating points of the default schedule, in evaluation order.
#[must_use]
pub fn default_schedule() -> Vec<OperatingPoint> {
    DEFAULT_OMEGA
        .iter()
        .zip(DEFAULT_ALPHA.iter())
        .map(|(&omega, &alpha)| OperatingPoint::new(omega, alpha))
        .collect()
}
