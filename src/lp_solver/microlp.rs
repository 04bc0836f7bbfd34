use std::time::{Duration, Instant};

use anyhow::anyhow;
use good_lp::constraint::{eq, geq, leq};
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolutionStatus, SolverModel,
    Variable, WithTimeLimit, variable,
};

use crate::lp_solver::*;

fn to_expression<Brand>(expression: &LinearExpression<Brand>, columns: &[Variable]) -> Result<Expression> {
    let mut out = Expression::from(expression.constant);
    for term in &expression.terms {
        let col = columns
            .get(term.variable.id)
            .ok_or_else(|| anyhow!("Variable {:?} not found in model", term.variable))?;
        out += term.coefficient * *col;
    }
    Ok(out)
}

/// Status of a point microlp handed back. Anything short of a proof comes
/// from the time limit.
fn solved_status(status: SolutionStatus) -> OptimizationStatus {
    match status {
        SolutionStatus::Optimal => OptimizationStatus::Optimal,
        SolutionStatus::TimeLimit | SolutionStatus::GapLimit => {
            OptimizationStatus::TimedOutFeasible
        }
    }
}

/// Status for a solve that returned no point, or `None` for a solver fault.
fn failed_status(error: &ResolutionError) -> Option<OptimizationStatus> {
    match error {
        ResolutionError::Infeasible => Some(OptimizationStatus::Infeasible),
        ResolutionError::Unbounded => Some(OptimizationStatus::Unbounded),
        // good_lp's only static-message error from microlp is the interrupted solve
        ResolutionError::Other(message) if message.starts_with("Time limit") => {
            Some(OptimizationStatus::TimedOutNoSolution)
        }
        _ => None,
    }
}

/// Solve an LP model with microlp through `good_lp`.
///
/// The time limit is passed on to microlp. An incumbent found before it
/// expires is reported as `TimedOutFeasible` once it passes the row check.
pub fn solve_microlp<Brand>(
    builder: LPModelBuilder<Brand>,
    time_limit: Option<Duration>,
) -> Result<LPSolution<Brand>> {
    let started = Instant::now();

    let mut vars = ProblemVariables::new();
    let columns: Vec<Variable> = builder
        .variables
        .iter()
        .map(|var_info| {
            let definition = match var_info.var_type {
                VariableType::Binary => variable().binary(),
                VariableType::Integer => variable().integer().min(var_info.lower_bound),
                VariableType::Continuous => variable().min(var_info.lower_bound),
            };
            let definition = match var_info.var_type {
                VariableType::Binary => definition,
                _ if var_info.upper_bound.is_finite() => definition.max(var_info.upper_bound),
                _ => definition,
            };
            vars.add(definition)
        })
        .collect();

    let (objective, sense, constant) = match &builder.objective {
        Some(obj_info) => (
            to_expression(&obj_info.expression, &columns)?,
            obj_info.sense,
            obj_info.expression.constant,
        ),
        None => (Expression::from(0.0), OptimizationSense::Minimize, 0.0),
    };
    let unsolved = match sense {
        OptimizationSense::Maximize => vars.maximise(objective),
        OptimizationSense::Minimize => vars.minimise(objective),
    };
    let mut problem = unsolved.using(good_lp::microlp);
    if let Some(limit) = time_limit {
        problem = problem.with_time_limit(limit.as_secs_f64());
    }

    for constraint in &builder.constraints {
        let lhs = to_expression(&constraint.expression, &columns)?;
        let row = match constraint.sense {
            ConstraintSense::LessEqual => leq(lhs, constraint.rhs),
            ConstraintSense::Equal => eq(lhs, constraint.rhs),
            ConstraintSense::GreaterEqual => geq(lhs, constraint.rhs),
        };
        problem.add_constraint(row);
    }

    let outcome = problem.solve();
    let elapsed = started.elapsed();

    let solution = match outcome {
        Ok(solution) => solution,
        Err(error) => {
            let Some(status) = failed_status(&error) else {
                return Err(anyhow!("microlp failed: {}", error));
            };
            tracing::debug!(backend = "microlp", %status, ?elapsed, "microlp finished");
            return Ok(LPSolution::without_solution(status));
        }
    };

    let variable_values: Vec<f64> = columns.iter().map(|&col| solution.value(col)).collect();
    let mut status = solved_status(solution.status());
    if status == OptimizationStatus::TimedOutFeasible
        && builder.max_violation(&variable_values) > FEASIBILITY_TOLERANCE
    {
        status = OptimizationStatus::TimedOutNoSolution;
    }
    tracing::debug!(backend = "microlp", %status, ?elapsed, "microlp finished");

    if !status.has_solution() {
        return Ok(LPSolution::without_solution(status));
    }

    // microlp drops the objective's constant term
    let objective_value = builder
        .objective
        .is_some()
        .then(|| solution.into_inner().objective() + constant);

    Ok(LPSolution::new(status, objective_value, variable_values))
}
