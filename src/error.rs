//! Error types for the Salary Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading schedules, validating
//! input and solving for gross pay.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Salary Engine.
///
/// The deduction functions and the net solver are total and never return an
/// error. Everything else in the crate reports failures through this type.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/schedule.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/schedule.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A bracket table or solver setting is not usable.
    #[error("Invalid schedule: {message}")]
    InvalidSchedule {
        /// A description of what is wrong with the schedule.
        message: String,
    },

    /// An amount supplied by the caller was rejected at the boundary.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The name of the rejected field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The gross solver did not reach the target net within its budget.
    #[error("Could not converge on a gross amount for net {target_net} after {iterations} iterations: {message}")]
    ConvergenceError {
        /// The net amount that was requested.
        target_net: Decimal,
        /// The number of iterations performed before giving up.
        iterations: u32,
        /// A description of why the solver stopped.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/schedule.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/schedule.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_schedule_displays_message() {
        let error = EngineError::InvalidSchedule {
            message: "withholding table is empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid schedule: withholding table is empty"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "net".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input 'net': must be greater than zero"
        );
    }

    #[test]
    fn test_convergence_error_displays_target_and_iterations() {
        let error = EngineError::ConvergenceError {
            target_net: Decimal::from_str("5800.00").unwrap(),
            iterations: 100,
            message: "iteration limit reached".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Could not converge on a gross amount for net 5800.00 after 100 iterations: iteration limit reached"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_input() -> EngineResult<()> {
            Err(EngineError::InvalidInput {
                field: "gross".to_string(),
                message: "must be greater than zero".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_input()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
