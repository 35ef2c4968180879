//! Configuration types for the Salary Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::TaxSchedule;

/// Default number of solver iterations before giving up.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Metadata about a schedule.
///
/// Identifies which set of tables is loaded, for reporting in API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Short code identifying the schedule (e.g., "BR-2024").
    pub code: String,
    /// The human-readable name of the schedule.
    pub name: String,
    /// The version or effective date of the tables.
    pub version: String,
    /// URL to the official table publication.
    #[serde(default)]
    pub source_url: Option<String>,
}

impl Default for ScheduleMetadata {
    fn default() -> Self {
        Self {
            code: "BR-2024".to_string(),
            name: "Built-in payroll schedule".to_string(),
            version: "2024-01-01".to_string(),
            source_url: None,
        }
    }
}

/// Settings for the gross-from-net solver.
///
/// # Example
///
/// ```
/// use salary_engine::config::SolverConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.initial_multiplier, Decimal::from_str("1.3").unwrap());
/// assert_eq!(config.tolerance, Decimal::from_str("0.01").unwrap());
/// assert_eq!(config.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// The first gross estimate is `net × initial_multiplier`.
    pub initial_multiplier: Decimal,
    /// Absolute tolerance, in currency units, between computed and target net.
    pub tolerance: Decimal,
    /// Maximum number of net evaluations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_multiplier: Decimal::new(13, 1),
            tolerance: Decimal::new(1, 2),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Rejects settings that can never converge.
    pub fn validate(&self) -> EngineResult<()> {
        if self.initial_multiplier <= Decimal::ZERO {
            return Err(EngineError::InvalidSchedule {
                message: "solver initial_multiplier must be greater than zero".to_string(),
            });
        }
        if self.tolerance <= Decimal::ZERO {
            return Err(EngineError::InvalidSchedule {
                message: "solver tolerance must be greater than zero".to_string(),
            });
        }
        if self.max_iterations == 0 {
            return Err(EngineError::InvalidSchedule {
                message: "solver max_iterations must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Contribution file structure (`contribution.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContributionFile {
    pub contribution: crate::models::ContributionSchedule,
}

/// Withholding file structure (`withholding.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WithholdingFile {
    pub withholding: crate::models::WithholdingSchedule,
}

/// Solver file structure (`solver.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SolverFile {
    #[serde(default)]
    pub solver: SolverConfig,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// Schedule metadata.
    metadata: ScheduleMetadata,
    /// Contribution and withholding tables.
    schedule: TaxSchedule,
    /// Gross solver settings.
    solver: SolverConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: ScheduleMetadata, schedule: TaxSchedule, solver: SolverConfig) -> Self {
        Self {
            metadata,
            schedule,
            solver,
        }
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the contribution and withholding tables.
    pub fn schedule(&self) -> &TaxSchedule {
        &self.schedule
    }

    /// Returns the solver settings.
    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(
            ScheduleMetadata::default(),
            TaxSchedule::default(),
            SolverConfig::default(),
        )
    }
}
