//! Simulation configuration (`tickgrid.toml`).
//!
//! Every section falls back to its defaults, so a file only needs to name
//! the values it changes:
//!
//! ```toml
//! initial_workers = 10
//! running_ticks = 10000
//!
//! [scaling]
//! cooldown_ticks = 5
//! ```
//!
//! `initial_workers` and `running_ticks` have no defaults. A [`ConfigFile`]
//! may leave them out for the caller to fill in; turning it into a
//! [`SimConfig`] fails while either is still missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::types::{JobKind, Tick};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimConfig {
    /// Workers in the pool before the first tick.
    pub initial_workers: u32,
    /// Number of ticks to simulate.
    pub running_ticks: Tick,
    /// Seed for the random source. Unset means OS entropy.
    pub seed: Option<u64>,
    pub admission: AdmissionConfig,
    pub scaling: ScalingConfig,
    pub jobs: JobsConfig,
}

/// Scaffold values for the run parameters; everything else is the
/// reference tuning.
impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_workers: 10,
            running_ticks: 10_000,
            seed: None,
            admission: AdmissionConfig::default(),
            scaling: ScalingConfig::default(),
            jobs: JobsConfig::default(),
        }
    }
}

/// A config file as written on disk, before the run parameters are known.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigFile {
    pub initial_workers: Option<u32>,
    pub running_ticks: Option<Tick>,
    pub seed: Option<u64>,
    #[serde(default)]
    pub admission: AdmissionConfig,
    #[serde(default)]
    pub scaling: ScalingConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Complete the config. Fails if a run parameter is still unset.
    pub fn into_config(self) -> ConfigResult<SimConfig> {
        Ok(SimConfig {
            initial_workers: self
                .initial_workers
                .ok_or(ConfigError::Missing { field: "initial_workers" })?,
            running_ticks: self
                .running_ticks
                .ok_or(ConfigError::Missing { field: "running_ticks" })?,
            seed: self.seed,
            admission: self.admission,
            scaling: self.scaling,
            jobs: self.jobs,
        })
    }
}

/// Arrival and filtering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Probability that a new job arrives on a given tick.
    pub probability: f64,
    /// Origins whose first octet falls in this range are rejected.
    pub blocked_origin: OriginRange,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            probability: 0.90,
            blocked_origin: OriginRange {
                start: 192,
                end: 200,
            },
        }
    }
}

/// Queue-depth thresholds driving pool growth and shrink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    /// Grow when `queue > scale_up_ratio * workers`.
    pub scale_up_ratio: u64,
    /// Shrink when `queue < scale_down_ratio * workers`.
    pub scale_down_ratio: u64,
    /// Shrinking requires at least this many workers.
    pub min_workers_for_shrink: u32,
    /// Ticks to wait after a scaling action before evaluating again.
    pub cooldown_ticks: u32,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            scale_up_ratio: 25,
            scale_down_ratio: 15,
            min_workers_for_shrink: 2,
            cooldown_ticks: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    pub streaming_duration: DurationRange,
    pub batch_duration: DurationRange,
    /// The queue starts with `initial_workers * initial_queue_multiplier` jobs.
    pub initial_queue_multiplier: u32,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            streaming_duration: DurationRange { min: 12, max: 15 },
            batch_duration: DurationRange { min: 30, max: 40 },
            initial_queue_multiplier: 20,
        }
    }
}

impl JobsConfig {
    /// Duration range for the given job kind.
    pub fn duration_for(&self, kind: JobKind) -> DurationRange {
        match kind {
            JobKind::Streaming => self.streaming_duration,
            JobKind::Batch => self.batch_duration,
        }
    }
}

/// Inclusive range of service durations, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min: Tick,
    pub max: Tick,
}

impl DurationRange {
    /// A range that always yields `ticks`.
    pub fn fixed(ticks: Tick) -> Self {
        Self {
            min: ticks,
            max: ticks,
        }
    }

    pub fn contains(&self, ticks: Tick) -> bool {
        (self.min..=self.max).contains(&ticks)
    }
}

/// Inclusive range over the first octet of an IPv4 origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginRange {
    pub start: u8,
    pub end: u8,
}

impl OriginRange {
    pub fn contains(&self, octet: u8) -> bool {
        (self.start..=self.end).contains(&octet)
    }
}

impl SimConfig {
    /// Defaults with the two required run parameters set.
    pub fn new(initial_workers: u32, running_ticks: Tick) -> Self {
        Self {
            initial_workers,
            running_ticks,
            ..Self::default()
        }
    }

    /// Load a file that names both run parameters.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        ConfigFile::from_file(path)?.into_config()
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        ConfigFile::from_toml_str(content)?.into_config()
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of jobs placed in the queue before the first tick.
    pub fn initial_queue_len(&self) -> u64 {
        u64::from(self.initial_workers) * u64::from(self.jobs.initial_queue_multiplier)
    }

    /// Check every field, reporting the first one that is out of range.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.initial_workers < 1 {
            return Err(ConfigError::invalid(
                "initial_workers",
                "must be at least 1",
            ));
        }
        if self.running_ticks < 1 {
            return Err(ConfigError::invalid("running_ticks", "must be at least 1"));
        }

        let p = self.admission.probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::invalid(
                "admission.probability",
                format!("{p} is outside [0, 1]"),
            ));
        }
        let blocked = self.admission.blocked_origin;
        if blocked.start > blocked.end {
            return Err(ConfigError::invalid(
                "admission.blocked_origin",
                format!("start {} is after end {}", blocked.start, blocked.end),
            ));
        }

        if self.scaling.scale_up_ratio == 0 {
            return Err(ConfigError::invalid(
                "scaling.scale_up_ratio",
                "must be at least 1",
            ));
        }
        if self.scaling.scale_down_ratio == 0 {
            return Err(ConfigError::invalid(
                "scaling.scale_down_ratio",
                "must be at least 1",
            ));
        }
        if self.scaling.min_workers_for_shrink < 2 {
            return Err(ConfigError::invalid(
                "scaling.min_workers_for_shrink",
                "must be at least 2 so the pool never drops below one worker",
            ));
        }

        validate_duration("jobs.streaming_duration", self.jobs.streaming_duration)?;
        validate_duration("jobs.batch_duration", self.jobs.batch_duration)?;
        Ok(())
    }
}

fn validate_duration(field: &'static str, range: DurationRange) -> ConfigResult<()> {
    if range.min < 1 {
        return Err(ConfigError::invalid(field, "min must be at least 1 tick"));
    }
    if range.min > range.max {
        return Err(ConfigError::invalid(
            field,
            format!("min {} is greater than max {}", range.min, range.max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tuning() {
        let config = SimConfig::default();
        assert_eq!(config.admission.probability, 0.90);
        assert_eq!(config.admission.blocked_origin, OriginRange { start: 192, end: 200 });
        assert_eq!(config.scaling.scale_up_ratio, 25);
        assert_eq!(config.scaling.scale_down_ratio, 15);
        assert_eq!(config.scaling.min_workers_for_shrink, 2);
        assert_eq!(config.scaling.cooldown_ticks, 3);
        assert_eq!(config.jobs.streaming_duration, DurationRange { min: 12, max: 15 });
        assert_eq!(config.jobs.batch_duration, DurationRange { min: 30, max: 40 });
        assert_eq!(config.jobs.initial_queue_multiplier, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal() {
        let config = SimConfig::from_toml_str("initial_workers = 3\nrunning_ticks = 50\n").unwrap();
        assert_eq!(config.initial_workers, 3);
        assert_eq!(config.running_ticks, 50);
        assert_eq!(config.scaling, ScalingConfig::default());
    }

    #[test]
    fn test_parse_partial_section() {
        let toml_str = r#"
initial_workers = 2
running_ticks = 100
seed = 9

[scaling]
cooldown_ticks = 7

[jobs]
streaming_duration = { min = 1, max = 2 }
"#;
        let config = SimConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.scaling.cooldown_ticks, 7);
        assert_eq!(config.scaling.scale_up_ratio, 25);
        assert_eq!(config.jobs.streaming_duration, DurationRange { min: 1, max: 2 });
        assert_eq!(config.jobs.batch_duration, DurationRange { min: 30, max: 40 });
    }

    #[test]
    fn run_parameters_are_required() {
        let err = SimConfig::from_toml_str("[scaling]\ncooldown_ticks = 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Missing { field: "initial_workers" }));

        let err = SimConfig::from_toml_str("initial_workers = 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Missing { field: "running_ticks" }));
    }

    #[test]
    fn config_file_may_omit_run_parameters() {
        let file = ConfigFile::from_toml_str("[scaling]\ncooldown_ticks = 5\n").unwrap();
        assert_eq!(file.initial_workers, None);
        assert_eq!(file.running_ticks, None);
        assert_eq!(file.scaling.cooldown_ticks, 5);
        assert_eq!(file.jobs, JobsConfig::default());

        let mut file = file;
        file.initial_workers = Some(4);
        file.running_ticks = Some(40);
        let config = file.into_config().unwrap();
        assert_eq!((config.initial_workers, config.running_ticks), (4, 40));
        assert_eq!(config.scaling.cooldown_ticks, 5);
    }

    #[test]
    fn empty_file_is_all_defaults_but_incomplete() {
        let file = ConfigFile::from_toml_str("").unwrap();
        assert_eq!(file, ConfigFile::default());
        assert!(file.into_config().is_err());
    }

    #[test]
    fn toml_render_parses_back() {
        let mut config = SimConfig::new(4, 200);
        config.seed = Some(1);
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("initial_workers = 4"));
        assert_eq!(SimConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn from_file_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickgrid.toml");
        std::fs::write(&path, "initial_workers = 5\nrunning_ticks = 6\n").unwrap();
        let config = SimConfig::from_file(&path).unwrap();
        assert_eq!(config.initial_workers, 5);
        assert_eq!(config.running_ticks, 6);
    }

    #[test]
    fn from_file_missing_is_read_error() {
        let err = SimConfig::from_file(Path::new("/nonexistent/tickgrid.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn rejects_zero_workers_and_ticks() {
        let err = SimConfig::new(0, 10).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "initial_workers", .. }));

        let err = SimConfig::new(1, 0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "running_ticks", .. }));
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let mut config = SimConfig::new(1, 1);
        config.admission.probability = 1.5;
        assert!(config.validate().is_err());
        config.admission.probability = f64::NAN;
        assert!(config.validate().is_err());
        config.admission.probability = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_ranges() {
        let mut config = SimConfig::new(1, 1);
        config.jobs.batch_duration = DurationRange { min: 5, max: 4 };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Invalid { field: "jobs.batch_duration", .. }
        ));

        let mut config = SimConfig::new(1, 1);
        config.jobs.streaming_duration = DurationRange::fixed(0);
        assert!(config.validate().is_err());

        let mut config = SimConfig::new(1, 1);
        config.admission.blocked_origin = OriginRange { start: 201, end: 200 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_shrink_floor_below_two() {
        let mut config = SimConfig::new(1, 1);
        config.scaling.min_workers_for_shrink = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn ranges_are_inclusive() {
        let range = OriginRange { start: 192, end: 200 };
        assert!(range.contains(192));
        assert!(range.contains(200));
        assert!(!range.contains(191));
        assert!(!range.contains(201));

        let d = DurationRange { min: 12, max: 15 };
        assert!(d.contains(12) && d.contains(15));
        assert!(!d.contains(16));
    }

    #[test]
    fn initial_queue_len_scales_with_workers() {
        assert_eq!(SimConfig::new(3, 1).initial_queue_len(), 60);
    }
}
