//! Bracket model shared by the contribution and withholding schedules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single row of a bracket schedule.
///
/// Brackets are evaluated in ascending order and an amount belongs to the
/// first bracket whose upper bound is greater than or equal to it. A bracket
/// without an upper bound catches every amount above the previous row.
///
/// # Example
///
/// ```
/// use salary_engine::models::Bracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bracket = Bracket::bounded(
///     Decimal::from_str("2826.65").unwrap(),
///     Decimal::from_str("0.075").unwrap(),
///     Decimal::from_str("169.44").unwrap(),
/// );
///
/// assert!(bracket.contains(Decimal::from_str("2826.65").unwrap()));
/// assert!(!bracket.contains(Decimal::from_str("2826.66").unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Inclusive upper bound of the bracket, or `None` when unbounded.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Rate applied to the amount, as a fraction (0.075 for 7.5%).
    pub rate: Decimal,
    /// Fixed amount subtracted after applying the rate.
    #[serde(default)]
    pub deduction: Decimal,
}

impl Bracket {
    /// Creates a bracket with an inclusive upper bound.
    pub fn bounded(upper_bound: Decimal, rate: Decimal, deduction: Decimal) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
            deduction,
        }
    }

    /// Creates the open-ended top bracket.
    pub fn unbounded(rate: Decimal, deduction: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
            deduction,
        }
    }

    /// Returns true if `amount` does not exceed this bracket's upper bound.
    ///
    /// Only the upper bound is checked; the lower bound is implied by the
    /// previous row when the schedule is scanned in order.
    pub fn contains(&self, amount: Decimal) -> bool {
        self.upper_bound.is_none_or(|bound| amount <= bound)
    }

    /// Applies `amount × rate − deduction`.
    pub fn apply(&self, amount: Decimal) -> Decimal {
        amount * self.rate - self.deduction
    }

    /// Human-readable bound used in audit reasoning.
    pub fn describe_bound(&self) -> String {
        match self.upper_bound {
            Some(bound) => format!("<= {}", bound.normalize()),
            None => "unbounded".to_string(),
        }
    }
}

/// Finds the first bracket in `brackets` that contains `amount`.
///
/// Returns the index and the bracket, or `None` when `amount` lies above every
/// bounded row and the table has no unbounded row.
pub fn find_bracket(brackets: &[Bracket], amount: Decimal) -> Option<(usize, &Bracket)> {
    brackets
        .iter()
        .enumerate()
        .find(|(_, bracket)| bracket.contains(amount))
}
