//! Calculation logic for the Salary Engine.
//!
//! This module contains the deduction rules (contribution lookup and
//! withholding), the closed-form net solver, the iterative gross solver and
//! the boundary validation used by front ends.
//!
//! Each rule comes in two forms: a `compute_*` function that uses the built-in
//! schedule and returns plain amounts, and a `calculate_*` (or `solve_*`)
//! function that takes an explicit schedule and records audit steps.

mod contribution;
mod gross_solver;
mod net_solver;
mod validation;
mod withholding;

pub use contribution::{
    ContributionResult, calculate_contribution, compute_contribution, contribution_amount,
};
pub use gross_solver::{GrossSolution, compute_gross, solve_gross};
pub use net_solver::{NetCalculation, calculate_net, compute_net, evaluate_net};
pub use validation::{MAX_AMOUNT, parse_amount, validate_amount};
pub use withholding::{
    WithholdingResult, calculate_withholding, compute_withholding, withholding_amount,
};
