//! Net-from-gross calculation.
//!
//! Composes the contribution and withholding rules in closed form:
//! `net = gross - contribution - withholding`.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditWarning, CalculationResult, TaxSchedule};

use super::contribution::{calculate_contribution, contribution_amount};
use super::withholding::{calculate_withholding, withholding_amount};

/// The result of a net calculation with its audit trail.
#[derive(Debug, Clone)]
pub struct NetCalculation {
    /// The calculated amounts.
    pub result: CalculationResult,
    /// Audit steps for contribution, withholding and net composition.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
}

/// Evaluates `gross` against `schedule` without building an audit trail.
///
/// Used by the gross solver on every iteration.
pub fn evaluate_net(gross: Decimal, schedule: &TaxSchedule) -> CalculationResult {
    let contribution = contribution_amount(gross, &schedule.contribution);
    let withholding = withholding_amount(gross, contribution, &schedule.withholding);

    CalculationResult {
        gross,
        contribution,
        withholding,
        net: gross - contribution - withholding,
    }
}

/// Computes net pay from gross pay using the built-in schedule.
///
/// Total and deterministic; the returned result always satisfies
/// `net == gross - contribution - withholding` exactly.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_net;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = compute_net(Decimal::from_str("5000").unwrap());
/// assert_eq!(result.contribution, Decimal::from_str("700").unwrap());
/// assert_eq!(result.withholding, Decimal::from_str("304.73").unwrap());
/// assert_eq!(result.net, Decimal::from_str("3995.27").unwrap());
/// ```
pub fn compute_net(gross: Decimal) -> CalculationResult {
    evaluate_net(gross, TaxSchedule::builtin())
}

/// Calculates net pay from gross pay, recording each rule as an audit step.
///
/// # Arguments
///
/// * `gross` - The gross pay
/// * `schedule` - The contribution and withholding tables
/// * `step_number` - The step number of the first audit step
///
/// # Returns
///
/// A [`NetCalculation`] whose audit steps are numbered `step_number`,
/// `step_number + 1` and `step_number + 2`.
pub fn calculate_net(gross: Decimal, schedule: &TaxSchedule, step_number: u32) -> NetCalculation {
    let contribution = calculate_contribution(gross, &schedule.contribution, step_number);
    let withholding = calculate_withholding(
        gross,
        contribution.contribution,
        &schedule.withholding,
        step_number + 1,
    );

    let net = gross - contribution.contribution - withholding.withholding;

    let mut warnings = Vec::new();
    if contribution.is_capped() {
        warnings.push(AuditWarning {
            code: "CONTRIBUTION_CEILING_APPLIED".to_string(),
            message: format!(
                "Gross ${} exceeds the last contribution bracket; contribution capped at ${}",
                gross.normalize(),
                contribution.contribution.normalize()
            ),
            severity: "low".to_string(),
        });
    }
    if withholding.is_exempt() {
        warnings.push(AuditWarning {
            code: "WITHHOLDING_EXEMPT".to_string(),
            message: format!(
                "Base ${} is within the exempt bracket; nothing withheld",
                withholding.base.normalize()
            ),
            severity: "low".to_string(),
        });
    }

    let net_step = AuditStep {
        step_number: step_number + 2,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross": gross.normalize().to_string(),
            "contribution": contribution.contribution.normalize().to_string(),
            "withholding": withholding.withholding.normalize().to_string()
        }),
        output: serde_json::json!({
            "net": net.normalize().to_string()
        }),
        reasoning: format!(
            "${} - ${} - ${} = ${}",
            gross.normalize(),
            contribution.contribution.normalize(),
            withholding.withholding.normalize(),
            net.normalize()
        ),
    };

    NetCalculation {
        result: CalculationResult {
            gross,
            contribution: contribution.contribution,
            withholding: withholding.withholding,
            net,
        },
        audit_steps: vec![contribution.audit_step, withholding.audit_step, net_step],
        warnings,
    }
}
