//! Withholding calculation functionality.
//!
//! Withholding is computed on the base `gross - contribution` using the
//! marginal-deduction form `base × rate − deduction` of the bracket that
//! contains the base.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Bracket, TaxSchedule, WithholdingSchedule, find_bracket};

/// The result of a withholding calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct WithholdingResult {
    /// The withholding base (gross minus contribution).
    pub base: Decimal,
    /// The withholding amount.
    pub withholding: Decimal,
    /// Index of the bracket that matched.
    pub bracket_index: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl WithholdingResult {
    /// Returns true if the base fell in the zero-rate bracket.
    pub fn is_exempt(&self) -> bool {
        self.withholding.is_zero()
    }
}

/// Applies a matched bracket; zero-rate brackets always yield exactly zero.
fn apply_bracket(base: Decimal, bracket: &Bracket) -> Decimal {
    if bracket.rate.is_zero() {
        Decimal::ZERO
    } else {
        bracket.apply(base)
    }
}

/// Finds the bracket for `base`, falling back to the last row.
///
/// A validated schedule always ends with an unbounded row, so the fallback only
/// matters for hand-built tables.
fn select_bracket(base: Decimal, schedule: &WithholdingSchedule) -> Option<(usize, &Bracket)> {
    find_bracket(&schedule.brackets, base).or_else(|| {
        schedule
            .brackets
            .last()
            .map(|bracket| (schedule.brackets.len() - 1, bracket))
    })
}

/// Returns the withholding for `gross` after `contribution` under `schedule`.
///
/// Total for any input; an empty table withholds nothing.
pub fn withholding_amount(
    gross: Decimal,
    contribution: Decimal,
    schedule: &WithholdingSchedule,
) -> Decimal {
    let base = gross - contribution;
    select_bracket(base, schedule)
        .map(|(_, bracket)| apply_bracket(base, bracket))
        .unwrap_or(Decimal::ZERO)
}

/// Computes the withholding using the built-in schedule.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_withholding;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// // Base exactly at the exempt threshold
/// let exempt = compute_withholding(Decimal::from_str("2259.20").unwrap(), Decimal::ZERO);
/// assert_eq!(exempt, Decimal::ZERO);
///
/// // Base 3000 falls in the 15% bracket: 3000 x 0.15 - 381.44
/// let taxed = compute_withholding(Decimal::from_str("3000").unwrap(), Decimal::ZERO);
/// assert_eq!(taxed, Decimal::from_str("68.56").unwrap());
/// ```
pub fn compute_withholding(gross: Decimal, contribution: Decimal) -> Decimal {
    withholding_amount(gross, contribution, &TaxSchedule::builtin().withholding)
}

/// Calculates the withholding and records an audit step.
///
/// # Arguments
///
/// * `gross` - The gross pay
/// * `contribution` - The contribution already deducted from gross
/// * `schedule` - The withholding schedule to apply
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_withholding(
    gross: Decimal,
    contribution: Decimal,
    schedule: &WithholdingSchedule,
    step_number: u32,
) -> WithholdingResult {
    let base = gross - contribution;

    let (withholding, bracket_index, reasoning) = match select_bracket(base, schedule) {
        Some((index, bracket)) if bracket.rate.is_zero() => (
            Decimal::ZERO,
            index,
            format!(
                "Base ${} falls in exempt bracket {} ({}), nothing withheld",
                base.normalize(),
                index,
                bracket.describe_bound()
            ),
        ),
        Some((index, bracket)) => {
            let withholding = apply_bracket(base, bracket);
            (
                withholding,
                index,
                format!(
                    "Base ${} falls in bracket {} ({}): ${} x {} - ${} = ${}",
                    base.normalize(),
                    index,
                    bracket.describe_bound(),
                    base.normalize(),
                    bracket.rate.normalize(),
                    bracket.deduction.normalize(),
                    withholding.normalize()
                ),
            )
        }
        None => (
            Decimal::ZERO,
            0,
            "Withholding table is empty, nothing withheld".to_string(),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "withholding".to_string(),
        rule_name: "Withholding".to_string(),
        input: serde_json::json!({
            "gross": gross.normalize().to_string(),
            "contribution": contribution.normalize().to_string()
        }),
        output: serde_json::json!({
            "base": base.normalize().to_string(),
            "withholding": withholding.normalize().to_string(),
            "bracket_index": bracket_index
        }),
        reasoning,
    };

    WithholdingResult {
        base,
        withholding,
        bracket_index,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_base_at_exempt_threshold_is_zero() {
        assert_eq!(compute_withholding(dec("2259.20"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_base_below_exempt_threshold_is_zero() {
        assert_eq!(compute_withholding(dec("1500"), dec("112.50")), Decimal::ZERO);
        assert_eq!(compute_withholding(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_base_3000_falls_in_15_percent_bracket() {
        assert_eq!(compute_withholding(dec("3000"), Decimal::ZERO), dec("68.56"));
    }

    #[test]
    fn test_bracket_is_selected_by_base_not_gross() {
        // Gross 3000 would be the 15% bracket, but base 2640 is in the 7.5% one
        // 2640 x 0.075 - 169.44 = 28.56
        assert_eq!(compute_withholding(dec("3000"), dec("360")), dec("28.56"));
    }

    #[test]
    fn test_withholding_is_continuous_at_bracket_edges() {
        // Marginal-deduction coefficients meet at each edge within a cent
        let first_edge_low = compute_withholding(dec("2826.65"), Decimal::ZERO);
        let first_edge_high = compute_withholding(dec("2826.66"), Decimal::ZERO);
        assert!((first_edge_high - first_edge_low).abs() < dec("0.01"));

        let start = compute_withholding(dec("2259.21"), Decimal::ZERO);
        assert!(start >= Decimal::ZERO && start < dec("0.01"));
    }

    #[test]
    fn test_top_bracket() {
        // 10000 - 876.97 = 9123.03; 9123.03 x 0.275 - 896 = 1612.83325
        assert_eq!(
            compute_withholding(dec("10000"), dec("876.97")),
            dec("1612.83325")
        );
    }

    #[test]
    fn test_calculate_withholding_records_base_and_bracket() {
        let schedule = WithholdingSchedule::default();
        let result = calculate_withholding(dec("5000"), dec("700"), &schedule, 2);

        // 4300 x 0.225 - 662.77 = 304.73
        assert_eq!(result.base, dec("4300"));
        assert_eq!(result.withholding, dec("304.73"));
        assert_eq!(result.bracket_index, 3);
        assert!(!result.is_exempt());
        assert_eq!(result.audit_step.rule_id, "withholding");
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.output["base"].as_str().unwrap(), "4300");
        assert_eq!(
            result.audit_step.output["withholding"].as_str().unwrap(),
            "304.73"
        );
        assert!(result.audit_step.reasoning.contains("$4300 x 0.225 - $662.77"));
    }

    #[test]
    fn test_calculate_withholding_exempt_reasoning() {
        let schedule = WithholdingSchedule::default();
        let result = calculate_withholding(dec("2000"), dec("180"), &schedule, 1);

        assert!(result.is_exempt());
        assert_eq!(result.bracket_index, 0);
        assert!(result.audit_step.reasoning.contains("exempt"));
    }

    #[test]
    fn test_empty_table_withholds_nothing() {
        let schedule = WithholdingSchedule { brackets: vec![] };
        assert_eq!(
            withholding_amount(dec("10000"), Decimal::ZERO, &schedule),
            Decimal::ZERO
        );
        let result = calculate_withholding(dec("10000"), Decimal::ZERO, &schedule, 1);
        assert_eq!(result.withholding, Decimal::ZERO);
    }
}
