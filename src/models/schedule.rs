//! Contribution and withholding schedules.
//!
//! Both schedules are plain ordered bracket tables so that a new tax year only
//! needs new data. [`TaxSchedule::default`] carries the built-in tables; the
//! same tables ship as YAML under `config/default`.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Bracket;

/// The capped contribution schedule.
///
/// The rate of the matching bracket applies to the whole gross amount (not
/// marginally). Gross amounts above the last bracket pay the fixed `ceiling`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSchedule {
    /// Brackets in ascending order; every row must be bounded.
    pub brackets: Vec<Bracket>,
    /// Fixed contribution charged above the last bracket.
    pub ceiling: Decimal,
}

/// The marginal-deduction withholding schedule.
///
/// The matching bracket is selected by the withholding base
/// (gross minus contribution), and the result is `base × rate − deduction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingSchedule {
    /// Brackets in ascending order; only the last row is unbounded.
    pub brackets: Vec<Bracket>,
}

/// The complete pair of schedules used by the solvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSchedule {
    /// The contribution schedule.
    pub contribution: ContributionSchedule,
    /// The withholding schedule.
    pub withholding: WithholdingSchedule,
}

impl Default for ContributionSchedule {
    fn default() -> Self {
        Self {
            brackets: vec![
                Bracket::bounded(Decimal::new(141200, 2), Decimal::new(75, 3), Decimal::ZERO),
                Bracket::bounded(Decimal::new(266668, 2), Decimal::new(9, 2), Decimal::ZERO),
                Bracket::bounded(Decimal::new(400003, 2), Decimal::new(12, 2), Decimal::ZERO),
                Bracket::bounded(Decimal::new(778602, 2), Decimal::new(14, 2), Decimal::ZERO),
            ],
            ceiling: Decimal::new(87697, 2),
        }
    }
}

impl Default for WithholdingSchedule {
    fn default() -> Self {
        Self {
            brackets: vec![
                Bracket::bounded(Decimal::new(225920, 2), Decimal::ZERO, Decimal::ZERO),
                Bracket::bounded(
                    Decimal::new(282665, 2),
                    Decimal::new(75, 3),
                    Decimal::new(16944, 2),
                ),
                Bracket::bounded(
                    Decimal::new(375105, 2),
                    Decimal::new(15, 2),
                    Decimal::new(38144, 2),
                ),
                Bracket::bounded(
                    Decimal::new(466468, 2),
                    Decimal::new(225, 3),
                    Decimal::new(66277, 2),
                ),
                Bracket::unbounded(Decimal::new(275, 3), Decimal::new(89600, 2)),
            ],
        }
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self {
            contribution: ContributionSchedule::default(),
            withholding: WithholdingSchedule::default(),
        }
    }
}

impl ContributionSchedule {
    /// Checks that the table is non-empty, ascending and fully bounded.
    pub fn validate(&self) -> EngineResult<()> {
        if self.brackets.is_empty() {
            return Err(invalid("contribution table is empty"));
        }
        if self.brackets.iter().any(|b| b.upper_bound.is_none()) {
            return Err(invalid(
                "contribution brackets must all have an upper bound; use the ceiling for the top",
            ));
        }
        validate_rows("contribution", &self.brackets)?;
        if self.ceiling < Decimal::ZERO {
            return Err(invalid("contribution ceiling must not be negative"));
        }
        Ok(())
    }
}

impl WithholdingSchedule {
    /// Checks that the table is non-empty, ascending and ends with the only
    /// unbounded row.
    pub fn validate(&self) -> EngineResult<()> {
        let Some((last, rest)) = self.brackets.split_last() else {
            return Err(invalid("withholding table is empty"));
        };
        if last.upper_bound.is_some() {
            return Err(invalid("last withholding bracket must be unbounded"));
        }
        if rest.iter().any(|b| b.upper_bound.is_none()) {
            return Err(invalid("only the last withholding bracket may be unbounded"));
        }
        validate_rows("withholding", &self.brackets)
    }
}

static BUILTIN: LazyLock<TaxSchedule> = LazyLock::new(TaxSchedule::default);

impl TaxSchedule {
    /// Returns the shared built-in schedule used by the `compute_*` functions.
    pub fn builtin() -> &'static TaxSchedule {
        &BUILTIN
    }

    /// Validates both tables.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::models::TaxSchedule;
    ///
    /// assert!(TaxSchedule::default().validate().is_ok());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        self.contribution.validate()?;
        self.withholding.validate()
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidSchedule {
        message: message.into(),
    }
}

/// Shared row checks: rates within [0, 1], non-negative deductions and
/// strictly ascending bounds.
fn validate_rows(table: &str, brackets: &[Bracket]) -> EngineResult<()> {
    let mut previous: Option<Decimal> = None;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(invalid(format!(
                "{} bracket {} has rate {} outside [0, 1]",
                table, index, bracket.rate
            )));
        }
        if bracket.deduction < Decimal::ZERO {
            return Err(invalid(format!(
                "{} bracket {} has a negative deduction",
                table, index
            )));
        }
        if let Some(bound) = bracket.upper_bound {
            if bound < Decimal::ZERO {
                return Err(invalid(format!(
                    "{} bracket {} has a negative upper bound",
                    table, index
                )));
            }
            if previous.is_some_and(|p| bound <= p) {
                return Err(invalid(format!(
                    "{} bracket {} upper bound {} is not above the previous bracket",
                    table, index, bound
                )));
            }
            previous = Some(bound);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn assert_invalid(result: EngineResult<()>, expected: &str) {
        match result {
            Err(EngineError::InvalidSchedule { message }) => {
                assert!(
                    message.contains(expected),
                    "expected '{}' in '{}'",
                    expected,
                    message
                );
            }
            other => panic!("Expected InvalidSchedule error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_schedule_is_valid() {
        assert!(TaxSchedule::default().validate().is_ok());
    }

    #[test]
    fn test_builtin_matches_default() {
        assert_eq!(TaxSchedule::builtin(), &TaxSchedule::default());
    }

    #[test]
    fn test_default_contribution_table_values() {
        let schedule = ContributionSchedule::default();
        let bounds: Vec<Decimal> = schedule
            .brackets
            .iter()
            .filter_map(|b| b.upper_bound)
            .collect();

        assert_eq!(
            bounds,
            vec![dec("1412.00"), dec("2666.68"), dec("4000.03"), dec("7786.02")]
        );
        assert_eq!(schedule.brackets[0].rate, dec("0.075"));
        assert_eq!(schedule.brackets[3].rate, dec("0.14"));
        assert_eq!(schedule.ceiling, dec("876.97"));
    }

    #[test]
    fn test_default_withholding_table_values() {
        let schedule = WithholdingSchedule::default();
        assert_eq!(schedule.brackets.len(), 5);
        assert_eq!(schedule.brackets[0].upper_bound, Some(dec("2259.20")));
        assert_eq!(schedule.brackets[0].rate, Decimal::ZERO);
        assert_eq!(schedule.brackets[2].deduction, dec("381.44"));
        assert_eq!(schedule.brackets[4].upper_bound, None);
        assert_eq!(schedule.brackets[4].rate, dec("0.275"));
        assert_eq!(schedule.brackets[4].deduction, dec("896.00"));
    }

    #[test]
    fn test_empty_contribution_table_is_rejected() {
        let schedule = ContributionSchedule {
            brackets: vec![],
            ceiling: dec("100"),
        };
        assert_invalid(schedule.validate(), "contribution table is empty");
    }

    #[test]
    fn test_unbounded_contribution_bracket_is_rejected() {
        let schedule = ContributionSchedule {
            brackets: vec![Bracket::unbounded(dec("0.1"), Decimal::ZERO)],
            ceiling: dec("100"),
        };
        assert_invalid(schedule.validate(), "must all have an upper bound");
    }

    #[test]
    fn test_negative_ceiling_is_rejected() {
        let schedule = ContributionSchedule {
            brackets: vec![Bracket::bounded(dec("100"), dec("0.1"), Decimal::ZERO)],
            ceiling: dec("-1"),
        };
        assert_invalid(schedule.validate(), "ceiling");
    }

    #[test]
    fn test_descending_bounds_are_rejected() {
        let schedule = ContributionSchedule {
            brackets: vec![
                Bracket::bounded(dec("200"), dec("0.1"), Decimal::ZERO),
                Bracket::bounded(dec("100"), dec("0.2"), Decimal::ZERO),
            ],
            ceiling: dec("40"),
        };
        assert_invalid(schedule.validate(), "not above the previous bracket");
    }

    #[test]
    fn test_duplicate_bounds_are_rejected() {
        let schedule = WithholdingSchedule {
            brackets: vec![
                Bracket::bounded(dec("100"), Decimal::ZERO, Decimal::ZERO),
                Bracket::bounded(dec("100"), dec("0.1"), dec("10")),
                Bracket::unbounded(dec("0.2"), dec("20")),
            ],
        };
        assert_invalid(schedule.validate(), "not above the previous bracket");
    }

    #[test]
    fn test_rate_above_one_is_rejected() {
        let schedule = WithholdingSchedule {
            brackets: vec![Bracket::unbounded(dec("1.5"), Decimal::ZERO)],
        };
        assert_invalid(schedule.validate(), "outside [0, 1]");
    }

    #[test]
    fn test_negative_deduction_is_rejected() {
        let schedule = WithholdingSchedule {
            brackets: vec![Bracket::unbounded(dec("0.2"), dec("-5"))],
        };
        assert_invalid(schedule.validate(), "negative deduction");
    }

    #[test]
    fn test_withholding_must_end_unbounded() {
        let schedule = WithholdingSchedule {
            brackets: vec![Bracket::bounded(dec("100"), dec("0.1"), Decimal::ZERO)],
        };
        assert_invalid(schedule.validate(), "must be unbounded");
    }

    #[test]
    fn test_withholding_rejects_unbounded_row_before_last() {
        let schedule = WithholdingSchedule {
            brackets: vec![
                Bracket::unbounded(dec("0.1"), Decimal::ZERO),
                Bracket::unbounded(dec("0.2"), Decimal::ZERO),
            ],
        };
        assert_invalid(schedule.validate(), "only the last");
    }

    #[test]
    fn test_empty_withholding_table_is_rejected() {
        let schedule = WithholdingSchedule { brackets: vec![] };
        assert_invalid(schedule.validate(), "withholding table is empty");
    }
}
