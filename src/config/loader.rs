//! Configuration loading functionality.
//!
//! This module provides the [`ScheduleLoader`] type for loading schedules and
//! solver settings from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::TaxSchedule;

use super::types::{
    ContributionFile, EngineConfig, ScheduleMetadata, SolverConfig, SolverFile, WithholdingFile,
};

/// Loads and provides access to the engine configuration.
///
/// The `ScheduleLoader` reads YAML configuration files from a directory and
/// validates the tables before handing them to the solvers.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── schedule.yaml      # Schedule metadata
/// ├── contribution.yaml  # Contribution brackets and ceiling
/// ├── withholding.yaml   # Withholding brackets
/// └── solver.yaml        # Solver settings (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ScheduleLoader;
///
/// let loader = ScheduleLoader::load("./config/default")?;
/// println!("Loaded schedule: {}", loader.metadata().name);
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleLoader {
    config: EngineConfig,
}

impl ScheduleLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ScheduleLoader` on success, or an error if:
    /// - A required file is missing
    /// - A file contains invalid YAML
    /// - The tables or solver settings fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScheduleMetadata>(&path.join("schedule.yaml"))?;
        let contribution = Self::load_yaml::<ContributionFile>(&path.join("contribution.yaml"))?;
        let withholding = Self::load_yaml::<WithholdingFile>(&path.join("withholding.yaml"))?;

        let solver_path = path.join("solver.yaml");
        let solver = if solver_path.exists() {
            Self::load_yaml::<SolverFile>(&solver_path)?.solver
        } else {
            debug!(path = %solver_path.display(), "No solver file, using defaults");
            SolverConfig::default()
        };

        let schedule = TaxSchedule {
            contribution: contribution.contribution,
            withholding: withholding.withholding,
        };
        schedule.validate()?;
        solver.validate()?;

        Ok(Self {
            config: EngineConfig::new(metadata, schedule, solver),
        })
    }

    /// Wraps an already-built configuration, e.g. the built-in defaults.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let parsed = serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        debug!(path = %path_str, "Loaded configuration file");
        Ok(parsed)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        self.config.metadata()
    }

    /// Returns the contribution and withholding tables.
    pub fn schedule(&self) -> &TaxSchedule {
        self.config.schedule()
    }

    /// Returns the solver settings.
    pub fn solver(&self) -> &SolverConfig {
        self.config.solver()
    }
}

impl Default for ScheduleLoader {
    fn default() -> Self {
        Self::from_config(EngineConfig::default())
    }
}
