//! Contribution calculation functionality.
//!
//! The contribution is a bracket lookup, not a marginal schedule: the rate of
//! the first bracket whose upper bound is at or above gross applies to the
//! whole gross amount. Above the last bracket the fixed ceiling applies.

use rust_decimal::Decimal;

use crate::models::{AuditStep, ContributionSchedule, TaxSchedule, find_bracket};

/// The result of a contribution lookup, including the audit step.
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// The contribution amount.
    pub contribution: Decimal,
    /// Index of the bracket that matched, or `None` when the ceiling applied.
    pub bracket_index: Option<usize>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl ContributionResult {
    /// Returns true if gross was above every bracket and the ceiling applied.
    pub fn is_capped(&self) -> bool {
        self.bracket_index.is_none()
    }
}

/// Returns the contribution for `gross` under `schedule`.
///
/// Total for any input. Negative gross is a caller error and yields a
/// negative contribution from the first bracket.
pub fn contribution_amount(gross: Decimal, schedule: &ContributionSchedule) -> Decimal {
    match find_bracket(&schedule.brackets, gross) {
        Some((_, bracket)) => gross * bracket.rate,
        None => schedule.ceiling,
    }
}

/// Computes the contribution for `gross` using the built-in schedule.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_contribution;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let contribution = compute_contribution(Decimal::from_str("1412.00").unwrap());
/// assert_eq!(contribution, Decimal::from_str("105.90").unwrap());
///
/// // Above the last bracket the ceiling applies
/// let capped = compute_contribution(Decimal::from_str("8000").unwrap());
/// assert_eq!(capped, Decimal::from_str("876.97").unwrap());
/// ```
pub fn compute_contribution(gross: Decimal) -> Decimal {
    contribution_amount(gross, &TaxSchedule::builtin().contribution)
}

/// Looks up the contribution for `gross` and records an audit step.
///
/// # Arguments
///
/// * `gross` - The gross pay
/// * `schedule` - The contribution schedule to apply
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_contribution(
    gross: Decimal,
    schedule: &ContributionSchedule,
    step_number: u32,
) -> ContributionResult {
    let matched = find_bracket(&schedule.brackets, gross);

    let (contribution, bracket_index, output, reasoning) = match matched {
        Some((index, bracket)) => {
            let contribution = gross * bracket.rate;
            (
                contribution,
                Some(index),
                serde_json::json!({
                    "contribution": contribution.normalize().to_string(),
                    "bracket_index": index,
                    "rate": bracket.rate.normalize().to_string(),
                    "capped": false
                }),
                format!(
                    "Gross ${} falls in bracket {} ({}): ${} x {} = ${}",
                    gross.normalize(),
                    index,
                    bracket.describe_bound(),
                    gross.normalize(),
                    bracket.rate.normalize(),
                    contribution.normalize()
                ),
            )
        }
        None => (
            schedule.ceiling,
            None,
            serde_json::json!({
                "contribution": schedule.ceiling.normalize().to_string(),
                "capped": true
            }),
            format!(
                "Gross ${} is above the last contribution bracket, ceiling of ${} applies",
                gross.normalize(),
                schedule.ceiling.normalize()
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "contribution".to_string(),
        rule_name: "Contribution Lookup".to_string(),
        input: serde_json::json!({
            "gross": gross.normalize().to_string()
        }),
        output,
        reasoning,
    };

    ContributionResult {
        contribution,
        bracket_index,
        audit_step,
    }
}
