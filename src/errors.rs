//! Error types produced while configuring the blade model or rendering fields.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when blade parameters are not physically meaningful.
///
/// # Examples
///
/// ```
/// use bladestress::{BeamSection, ConfigError};
///
/// let error = BeamSection::new(0.3, 0.1, 0.025, 1.3, 1.0).expect_err("radii are swapped");
/// assert_eq!(error, ConfigError::RadiiOutOfOrder { inner: 1.3, outer: 1.0 });
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Returned when a length, density or similar magnitude is zero or negative.
    #[error("{name} must be positive (received {value})")]
    NonPositiveDimension {
        /// Name of the rejected parameter.
        name: &'static str,
        /// Rejected value in SI units.
        value: f64,
    },
    /// Returned when the inner radius does not lie strictly inside the outer radius.
    #[error("inner radius {inner} m must be smaller than outer radius {outer} m")]
    RadiiOutOfOrder {
        /// Root radius in metres.
        inner: f64,
        /// Tip radius in metres.
        outer: f64,
    },
    /// Returned when constituent volume fractions do not add up to one.
    #[error("volume fractions must sum to 1 (received {sum})")]
    VolumeFractionSum {
        /// Sum of the supplied fractions.
        sum: f64,
    },
    /// Returned when the evaluation grid has no cells along an axis.
    #[error("grid must have at least one cell along each axis (received {nx} x {ny})")]
    EmptyGrid {
        /// Cells across the width.
        nx: usize,
        /// Cells along the span.
        ny: usize,
    },
}

/// Error returned when a stress map cannot be written to disk.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Returned when the output directory or an image file cannot be created.
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the plotting backend fails while drawing or encoding.
    #[error("plotting failed: {0}")]
    Plot(String),
}

impl RenderError {
    /// Wrap any plotting backend error.
    pub(crate) fn plot(error: impl std::fmt::Display) -> Self {
        Self::Plot(error.to_string())
    }
}
