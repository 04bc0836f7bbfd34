//! Multi-period raw-material blending: build, solve and report an LP/MIP plan.
//!
//! Given per-month prices of a set of raw materials, their quality
//! coefficients, refining and storage limits and a quality band for the
//! finished blend, the library decides how much of each material to buy,
//! store and refine every month so that profit is maximised.
//!
//! # Pipeline
//!
//! 1. **Data** ([`data`]): a [`BlendInput`] (JSON or the built-in
//!    [`canonical_input`]) is validated into [`BlendData`].
//! 2. **Model** ([`model`]): [`build_model`] emits variables, the constraint
//!    families and the objective into a solver-independent
//!    [`lp_solver::LPModelBuilder`].
//! 3. **Solve**: [`model::BlendModel::solve`] hands the model to a
//!    [`lp_solver::SolverAdapter`]. Infeasible, unbounded and timed-out solves
//!    come back as an [`OptimizationStatus`], not as errors.
//! 4. **Extract** ([`extract`](mod@extract)): [`extract()`] reads a [`Plan`] out of the
//!    solved model.
//!
//! # Usage Example
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use blendopt::lp_solver::SolverBackend;
//! use blendopt::{BlendData, build_model, canonical_input, extract};
//!
//! let data = BlendData::validate(canonical_input())?;
//! let backend = SolverBackend::from_env_or_default()?;
//! let solved = build_model(&data)?.solve(&backend, None)?;
//! let plan = extract(&solved)?;
//!
//! println!("profit: {:.2}", plan.profit);
//! # Ok(())
//! # }
//! ```
//!
//! # Solver backends
//!
//! Backends are Cargo features: `microlp` (default, pure Rust through
//! `good_lp`), `coin_cbc` and `gurobi`. The `BLEND_LP_SOLVER` environment
//! variable picks one at run time when several are compiled in.

use clap::Parser;
use thiserror::Error;

pub mod data;
pub mod error;
pub mod extract;
pub mod logging;
pub mod lp_solver;
pub mod model;
pub mod solve;

pub use data::{BlendData, BlendInput, BlendSpec, Period, Symbol, canonical_input};
pub use error::{DataValidationError, ExtractionError};
pub use extract::{Plan, PlanEntry, PlanStatus, extract};
pub use lp_solver::OptimizationStatus;
pub use model::{BlendModel, SolvedModel, build_model};
pub use solve::{DatasetArgs, SolveArgs, dataset_main, solve_main};

/// Solve outcomes that end a CLI run without a plan.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Problem infeasible")]
    Infeasible,
    #[error("Problem unbounded")]
    Unbounded,
    #[error("Time limit reached before a feasible plan was found")]
    NoSolutionInTime,
}

impl AppError {
    /// The error matching a status that carries no plan, if any.
    pub fn from_status(status: OptimizationStatus) -> Option<AppError> {
        match status {
            OptimizationStatus::Optimal | OptimizationStatus::TimedOutFeasible => None,
            OptimizationStatus::Infeasible => Some(AppError::Infeasible),
            OptimizationStatus::Unbounded => Some(AppError::Unbounded),
            OptimizationStatus::TimedOutNoSolution => Some(AppError::NoSolutionInTime),
        }
    }
}

/// Command-line interface of the blending planner.
#[derive(Debug, Parser)]
#[clap(
    name = "blendopt",
    about = "Multi-period raw-material blending planner"
)]
pub enum CLIArguments {
    /// Solve a blending problem and print the plan.
    Solve(SolveArgs),
    /// Write the built-in food manufacture dataset as JSON.
    Dataset(DatasetArgs),
}
