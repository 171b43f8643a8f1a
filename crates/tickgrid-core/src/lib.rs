//! tickgrid-core — shared job types and simulation configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    AdmissionConfig, ConfigFile, DurationRange, JobsConfig, OriginRange, ScalingConfig, SimConfig,
};
pub use error::{ConfigError, ConfigResult};
pub use types::*;
