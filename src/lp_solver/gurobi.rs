use std::time::Duration;

use ::gurobi::{ConstrSense, Env, LinExpr, Model, ModelSense, Status, Var, VarType, attr, param};
use anyhow::bail;

use crate::lp_solver::*;

fn to_lin_expr<Brand>(expression: &LinearExpression<Brand>, vars: &[Var]) -> Result<LinExpr> {
    let mut gurobi_expr = LinExpr::new();
    for term in &expression.terms {
        let Some(var) = vars.get(term.variable.id) else {
            bail!("Variable {:?} not found in model", term.variable);
        };
        gurobi_expr = gurobi_expr.add_term(term.coefficient, var.clone());
    }
    Ok(gurobi_expr.add_constant(expression.constant))
}

/// Solve an LP model using Gurobi
pub fn solve_gurobi<Brand>(
    builder: LPModelBuilder<Brand>,
    time_limit: Option<Duration>,
) -> Result<LPSolution<Brand>> {
    let mut env = Env::new("")?;
    env.set(param::OutputFlag, 0)?;
    if let Some(limit) = time_limit {
        env.set(param::TimeLimit, limit.as_secs_f64())?;
    }
    let mut model = Model::new("blend", &env)?;

    let mut vars = Vec::with_capacity(builder.variables.len());
    for var_info in &builder.variables {
        let vtype = match var_info.var_type {
            VariableType::Continuous => VarType::Continuous,
            VariableType::Integer => VarType::Integer,
            VariableType::Binary => VarType::Binary,
        };
        let (lower, upper) = var_info.bounds();

        vars.push(model.add_var(&var_info.name, vtype, 0.0, lower, upper, &[], &[])?);
    }
    model.update()?;

    for constraint in &builder.constraints {
        let expr = to_lin_expr(&constraint.expression, &vars)?;
        let sense = match constraint.sense {
            ConstraintSense::LessEqual => ConstrSense::Less,
            ConstraintSense::Equal => ConstrSense::Equal,
            ConstraintSense::GreaterEqual => ConstrSense::Greater,
        };
        model.add_constr(&constraint.name, expr, sense, constraint.rhs)?;
    }

    if let Some(obj_info) = &builder.objective {
        let expr = to_lin_expr(&obj_info.expression, &vars)?;
        let sense = match obj_info.sense {
            OptimizationSense::Minimize => ModelSense::Minimize,
            OptimizationSense::Maximize => ModelSense::Maximize,
        };
        model.update()?;
        model.set_objective(expr, sense)?;
    }

    model.optimize()?;

    let status = match model.status()? {
        Status::Optimal => OptimizationStatus::Optimal,
        Status::Infeasible => OptimizationStatus::Infeasible,
        Status::Unbounded => OptimizationStatus::Unbounded,
        Status::TimeLimit => {
            if model.get(attr::SolCount)? > 0 {
                OptimizationStatus::TimedOutFeasible
            } else {
                OptimizationStatus::TimedOutNoSolution
            }
        }
        Status::InfOrUnbd => {
            bail!("Gurobi could not tell infeasible from unbounded; rerun with DualReductions=0")
        }
        other => bail!("Gurobi stopped with unexpected status {:?}", other),
    };

    tracing::debug!(backend = "gurobi", %status, "Gurobi finished");

    if !status.has_solution() {
        return Ok(LPSolution::without_solution(status));
    }

    let variable_values = vars
        .iter()
        .map(|var| var.get(&model, attr::X))
        .collect::<Result<Vec<f64>, _>>()?;
    let objective_value = model.get(attr::ObjVal)?;

    Ok(LPSolution::new(status, Some(objective_value), variable_values))
}
