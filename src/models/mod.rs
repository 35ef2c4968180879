//! Core data models for the Salary Engine.
//!
//! This module contains the bracket tables and the value types returned by
//! the solvers.

mod bracket;
mod calculation_result;
mod schedule;

pub use bracket::{Bracket, find_bracket};
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use schedule::{ContributionSchedule, TaxSchedule, WithholdingSchedule};
