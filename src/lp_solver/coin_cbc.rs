use std::time::{Duration, Instant};

use ::coin_cbc::{Col, Model, Sense};
use anyhow::bail;

use crate::lp_solver::output_suppression::SilencedStdout;
use crate::lp_solver::*;

/// Round a floating-point number to a specified number of significant digits
/// This masks CBC's last-digit noise on values that should be integral.
fn round_to_sig_digits(value: f64, digits: u32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(digits as i32 - magnitude - 1);
    (value * scale).round() / scale
}

/// Solve an LP model using Coin CBC
pub fn solve_coin_cbc<Brand>(
    builder: LPModelBuilder<Brand>,
    time_limit: Option<Duration>,
) -> Result<LPSolution<Brand>> {
    let _silenced = SilencedStdout::acquire()?;
    let started = Instant::now();
    let mut model = Model::default();

    let columns: Vec<Col> = builder
        .variables
        .iter()
        .map(|var_info| match var_info.var_type {
            VariableType::Continuous => {
                let col = model.add_col();
                model.set_col_lower(col, var_info.lower_bound);
                model.set_col_upper(col, var_info.upper_bound);
                col
            }
            VariableType::Integer => {
                let col = model.add_integer();
                model.set_col_lower(col, var_info.lower_bound);
                model.set_col_upper(col, var_info.upper_bound);
                col
            }
            VariableType::Binary => model.add_binary(),
        })
        .collect();

    for constraint in &builder.constraints {
        let row = model.add_row();

        for term in &constraint.expression.terms {
            let Some(&col) = columns.get(term.variable.id) else {
                bail!("Variable {:?} not found in model", term.variable);
            };
            model.set_weight(row, col, term.coefficient);
        }

        let rhs = constraint.rhs - constraint.expression.constant;
        match constraint.sense {
            ConstraintSense::LessEqual => model.set_row_upper(row, rhs),
            ConstraintSense::Equal => model.set_row_equal(row, rhs),
            ConstraintSense::GreaterEqual => model.set_row_lower(row, rhs),
        }
    }

    if let Some(obj_info) = &builder.objective {
        for term in &obj_info.expression.terms {
            let Some(&col) = columns.get(term.variable.id) else {
                bail!("Variable {:?} not found in model", term.variable);
            };
            model.set_obj_coeff(col, term.coefficient);
        }

        model.set_obj_sense(match obj_info.sense {
            OptimizationSense::Minimize => Sense::Minimize,
            OptimizationSense::Maximize => Sense::Maximize,
        });
    }

    if let Some(limit) = time_limit {
        model.set_parameter("sec", &format!("{:.3}", limit.as_secs_f64()));
    }
    model.set_parameter("log", "0");

    let solution = model.solve();
    let raw = solution.raw();

    let variable_values: Vec<f64> = columns
        .iter()
        .map(|&col| round_to_sig_digits(solution.col(col), 8))
        .collect();

    let status = if raw.is_proven_optimal() {
        OptimizationStatus::Optimal
    } else if raw.is_proven_infeasible() {
        OptimizationStatus::Infeasible
    } else if raw.is_continuous_unbounded() {
        OptimizationStatus::Unbounded
    } else if raw.is_seconds_limit_reached() {
        // CBC leaves its last column vector in place either way; only a point
        // that passes our own row check counts as an incumbent.
        if builder.max_violation(&variable_values) <= FEASIBILITY_TOLERANCE {
            OptimizationStatus::TimedOutFeasible
        } else {
            OptimizationStatus::TimedOutNoSolution
        }
    } else {
        bail!("CBC stopped without a conclusive status");
    };

    tracing::debug!(
        backend = "coin_cbc",
        %status,
        elapsed = ?started.elapsed(),
        "CBC finished"
    );

    if !status.has_solution() {
        return Ok(LPSolution::without_solution(status));
    }

    // CBC only sees the coefficients; the constant term is added back
    let objective_value = builder
        .objective
        .as_ref()
        .map(|obj_info| round_to_sig_digits(raw.obj_value() + obj_info.expression.constant, 8));

    Ok(LPSolution::new(status, objective_value, variable_values))
}
