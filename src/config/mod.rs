//! Configuration loading and management for the Salary Engine.
//!
//! This module provides functionality to load bracket schedules and solver
//! settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ScheduleLoader;
//!
//! let config = ScheduleLoader::load("./config/default").unwrap();
//! println!("Loaded schedule: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ScheduleLoader;
pub use types::{DEFAULT_MAX_ITERATIONS, EngineConfig, ScheduleMetadata, SolverConfig};
