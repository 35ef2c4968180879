//! Boundary validation for caller-supplied amounts.
//!
//! The deduction functions and solvers accept any decimal and never validate.
//! Front ends (the HTTP handlers and the CLI) call [`validate_amount`] before
//! handing a value to the core.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Largest amount accepted at the boundary.
///
/// Keeps every intermediate product well inside the decimal range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Rejects amounts that are zero, negative or above [`MAX_AMOUNT`].
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::validate_amount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert!(validate_amount("net", Decimal::from_str("3000").unwrap()).is_ok());
/// assert!(validate_amount("net", Decimal::ZERO).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Decimal) -> EngineResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must be greater than zero, got {}", amount),
        });
    }
    if amount > MAX_AMOUNT {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", MAX_AMOUNT, amount),
        });
    }
    Ok(amount)
}

/// Parses a user-typed amount and validates it.
///
/// Accepts a plain decimal string (surrounding whitespace is ignored).
pub fn parse_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    let amount = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|_| EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("'{}' is not a number", raw.trim()),
        })?;
    validate_amount(field, amount)
}
