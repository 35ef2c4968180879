//! Gross-from-net calculation.
//!
//! Inverts the net calculation by fixed-point iteration. Starting from
//! `net × initial_multiplier`, each step evaluates the net at the current
//! estimate and rescales the estimate by `target / computed`. The search stops
//! once the computed net is within the tolerance of the target, or fails with
//! [`EngineError::ConvergenceError`] when the iteration budget runs out.

use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use crate::config::SolverConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, CalculationResult, TaxSchedule};

use super::net_solver::{calculate_net, evaluate_net};

/// The result of a successful gross search.
#[derive(Debug, Clone)]
pub struct GrossSolution {
    /// Amounts evaluated at the converged gross estimate.
    pub result: CalculationResult,
    /// Number of net evaluations performed, including the converging one.
    pub iterations: u32,
    /// One step per iteration, followed by the net calculation at the result.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised by the final net calculation.
    pub warnings: Vec<AuditWarning>,
}

/// Computes the gross pay that yields `net` using the built-in schedule and
/// the default solver settings (multiplier 1.3, tolerance 0.01, 100 iterations).
///
/// The returned `contribution` and `withholding` are those of the returned
/// `gross`; `net` is the value computed there, within 0.01 of the target.
///
/// Input is not validated here. Zero yields a zero result, and negative input
/// yields meaningless amounts; callers reject both with
/// [`validate_amount`](super::validate_amount).
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{compute_gross, compute_net};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let target = Decimal::from_str("3000").unwrap();
/// let result = compute_gross(target).unwrap();
///
/// let tolerance = Decimal::from_str("0.01").unwrap();
/// assert!((compute_net(result.gross).net - target).abs() < tolerance);
/// ```
pub fn compute_gross(net: Decimal) -> EngineResult<CalculationResult> {
    solve_gross(net, TaxSchedule::builtin(), &SolverConfig::default()).map(|s| s.result)
}

/// Searches for the gross pay that yields `net` under `schedule`.
///
/// # Errors
///
/// Returns [`EngineError::ConvergenceError`] when:
/// - `config.max_iterations` evaluations do not come within `config.tolerance`
///   of the target (e.g. the target falls in a gap of the net function)
/// - the computed net is zero, so the rescale factor is undefined
/// - the estimate overflows the decimal range
pub fn solve_gross(
    net: Decimal,
    schedule: &TaxSchedule,
    config: &SolverConfig,
) -> EngineResult<GrossSolution> {
    let mut estimate = net
        .checked_mul(config.initial_multiplier)
        .ok_or_else(|| convergence_error(net, 0, "initial estimate overflows"))?;
    let mut audit_steps = Vec::new();

    for iteration in 1..=config.max_iterations {
        let evaluation = evaluate_net(estimate, schedule);
        let difference = (evaluation.net - net).abs();
        let converged = difference < config.tolerance;

        trace!(
            iteration,
            estimate = %estimate,
            computed_net = %evaluation.net,
            difference = %difference,
            "Gross solver iteration"
        );
        audit_steps.push(iteration_step(iteration, net, &evaluation, difference, converged));

        if converged {
            debug!(
                target_net = %net,
                gross = %estimate,
                iterations = iteration,
                "Gross solver converged"
            );
            let final_calculation = calculate_net(estimate, schedule, iteration + 1);
            audit_steps.extend(final_calculation.audit_steps);

            return Ok(GrossSolution {
                result: final_calculation.result,
                iterations: iteration,
                audit_steps,
                warnings: final_calculation.warnings,
            });
        }

        let Some(ratio) = net.checked_div(evaluation.net) else {
            warn!(
                target_net = %net,
                estimate = %estimate,
                iteration,
                "Computed net is zero, cannot rescale"
            );
            return Err(convergence_error(
                net,
                iteration,
                format!(
                    "computed net is zero at estimate {}, rescale is undefined",
                    estimate.normalize()
                ),
            ));
        };

        estimate = estimate
            .checked_mul(ratio)
            .ok_or_else(|| convergence_error(net, iteration, "estimate overflows"))?;
    }

    warn!(
        target_net = %net,
        last_estimate = %estimate,
        max_iterations = config.max_iterations,
        "Gross solver did not converge"
    );
    Err(convergence_error(
        net,
        config.max_iterations,
        format!(
            "iteration limit reached without coming within {} of the target (last estimate {})",
            config.tolerance.normalize(),
            estimate.round_dp(2)
        ),
    ))
}

fn convergence_error(target_net: Decimal, iterations: u32, message: impl Into<String>) -> EngineError {
    EngineError::ConvergenceError {
        target_net,
        iterations,
        message: message.into(),
    }
}

fn iteration_step(
    iteration: u32,
    target_net: Decimal,
    evaluation: &CalculationResult,
    difference: Decimal,
    converged: bool,
) -> AuditStep {
    let reasoning = if converged {
        format!(
            "Estimate ${} yields net ${}, within tolerance of ${}",
            evaluation.gross.round_dp(2),
            evaluation.net.round_dp(2),
            target_net.normalize()
        )
    } else {
        format!(
            "Estimate ${} yields net ${}, off by ${}; rescaling by ${} / ${}",
            evaluation.gross.round_dp(2),
            evaluation.net.round_dp(2),
            difference.round_dp(2),
            target_net.normalize(),
            evaluation.net.round_dp(2)
        )
    };

    AuditStep {
        step_number: iteration,
        rule_id: "solver_iteration".to_string(),
        rule_name: "Gross Solver Iteration".to_string(),
        input: serde_json::json!({
            "iteration": iteration,
            "estimate": evaluation.gross.normalize().to_string(),
            "target_net": target_net.normalize().to_string()
        }),
        output: serde_json::json!({
            "computed_net": evaluation.net.normalize().to_string(),
            "difference": difference.normalize().to_string(),
            "converged": converged
        }),
        reasoning,
    }
}
