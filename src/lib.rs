#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod errors;
pub mod field;
pub mod operating;
pub mod render;
pub mod report;
pub mod resultants;
pub mod section;

pub use config::{BladeConfig, RenderSettings};
pub use errors::{ConfigError, RenderError};
pub use field::{deviatoric_norm_field, stress_at, FieldPeak, Grid, StressField, StressState};
pub use operating::{default_schedule, OperatingPoint};
pub use render::{
    artifact_name, band_colour, encode_stress_map, prepare_output_dir, render_stress_map,
    save_stress_map, ContourBands,
};
pub use report::{render_summary, FieldSummary, RunSummary};
pub use resultants::{resultants, resultants_over, LineLoad, ResultantField, Resultants};
pub use section::{BeamSection, Material};
