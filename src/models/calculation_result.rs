//! Calculation result models for the Salary Engine.
//!
//! This module contains the [`CalculationResult`] value returned by both
//! solvers, and the audit structures that record how it was reached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The outcome of a gross/net calculation.
///
/// Satisfies `net = gross - contribution - withholding`. For the net solver
/// the identity is exact; for the gross solver `net` is the value computed at
/// the returned `gross`, which lies within the solver tolerance of the target.
///
/// # Example
///
/// ```
/// use salary_engine::models::CalculationResult;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = CalculationResult {
///     gross: Decimal::from_str("3000.00").unwrap(),
///     contribution: Decimal::from_str("360.00").unwrap(),
///     withholding: Decimal::from_str("28.56").unwrap(),
///     net: Decimal::from_str("2611.44").unwrap(),
/// };
/// assert!(result.is_consistent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Pay before any deduction.
    pub gross: Decimal,
    /// The capped contribution deducted from gross.
    pub contribution: Decimal,
    /// The bracketed withholding deducted from gross.
    pub withholding: Decimal,
    /// Take-home pay.
    pub net: Decimal,
}

impl CalculationResult {
    /// Returns the sum of both deductions.
    pub fn total_deductions(&self) -> Decimal {
        self.contribution + self.withholding
    }

    /// Returns true if `net` equals gross minus both deductions.
    pub fn is_consistent(&self) -> bool {
        self.gross - self.contribution - self.withholding == self.net
    }

    /// Returns a copy with every amount rounded to cents for display.
    pub fn rounded(&self) -> Self {
        Self {
            gross: self.gross.round_dp(2),
            contribution: self.contribution.round_dp(2),
            withholding: self.withholding.round_dp(2),
            net: self.net.round_dp(2),
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag notable outcomes that don't prevent calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use salary_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_result() -> CalculationResult {
        CalculationResult {
            gross: dec("5000"),
            contribution: dec("700.00"),
            withholding: dec("304.73"),
            net: dec("3995.27"),
        }
    }

    #[test]
    fn test_total_deductions() {
        assert_eq!(sample_result().total_deductions(), dec("1004.73"));
    }

    #[test]
    fn test_consistent_result() {
        assert!(sample_result().is_consistent());
    }

    #[test]
    fn test_inconsistent_result_is_detected() {
        let mut result = sample_result();
        result.net = dec("4000.00");
        assert!(!result.is_consistent());
    }

    #[test]
    fn test_rounded_keeps_cents() {
        let result = CalculationResult {
            gross: dec("3500.760571931"),
            contribution: dec("420.091268631"),
            withholding: dec("80.660395494"),
            net: dec("3000.008907804"),
        };
        let rounded = result.rounded();
        assert_eq!(rounded.gross, dec("3500.76"));
        assert_eq!(rounded.contribution, dec("420.09"));
        assert_eq!(rounded.withholding, dec("80.66"));
        assert_eq!(rounded.net, dec("3000.01"));
    }

    #[test]
    fn test_calculation_result_serializes_amounts_as_strings() {
        let json = serde_json::to_string(&sample_result()).unwrap();
        assert!(json.contains("\"gross\":\"5000\""));
        assert!(json.contains("\"contribution\":\"700.00\""));
        assert!(json.contains("\"withholding\":\"304.73\""));
        assert!(json.contains("\"net\":\"3995.27\""));
    }

    #[test]
    fn test_calculation_result_deserialization() {
        let json = r#"{
            "gross": "5000",
            "contribution": "700.00",
            "withholding": "304.73",
            "net": "3995.27"
        }"#;
        let result: CalculationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result, sample_result());
    }

    #[test]
    fn test_audit_trace_round_trips_through_json() {
        let trace = AuditTrace {
            steps: vec![AuditStep {
                step_number: 1,
                rule_id: "contribution".to_string(),
                rule_name: "Contribution Lookup".to_string(),
                input: serde_json::json!({"gross": "5000"}),
                output: serde_json::json!({"contribution": "700"}),
                reasoning: "$5000 x 0.14 = $700".to_string(),
            }],
            warnings: vec![AuditWarning {
                code: "WITHHOLDING_EXEMPT".to_string(),
                message: "Base is below the first withholding bracket".to_string(),
                severity: "low".to_string(),
            }],
            duration_us: 42,
        };

        let json = serde_json::to_string(&trace).unwrap();
        let parsed: AuditTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, trace);
    }
}
