//! Error types for the blending pipeline.
//!
//! Validation and extraction problems are faults and are typed here.
//! Infeasible, unbounded and timed-out solves are not: they travel as an
//! [`OptimizationStatus`] on the solved model.

use thiserror::Error;

use crate::data::{Period, Symbol};
use crate::lp_solver::OptimizationStatus;

/// Malformed or out-of-range input, raised before any model is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataValidationError {
    #[error("the planning horizon has no periods")]
    EmptyHorizon,

    #[error("periods must run 1..=N in order, but position {position} holds period {found}")]
    NonContiguousPeriods { position: usize, found: Period },

    #[error("no materials were supplied")]
    NoMaterials,

    #[error("material {0} is declared more than once")]
    DuplicateMaterial(Symbol),

    #[error("material {0} has no quality coefficient")]
    MissingQuality(Symbol),

    #[error("material {material} has no record for period {period}")]
    MissingRecord { material: Symbol, period: Period },

    #[error("material {material} has more than one record for period {period}")]
    DuplicateRecord { material: Symbol, period: Period },

    #[error("material {material} has no cost in period {period}")]
    MissingCost { material: Symbol, period: Period },

    #[error("{context} refers to unknown material {material}")]
    UnknownMaterial { context: String, material: Symbol },

    #[error("material {material} has a record for period {period}, which is outside the horizon")]
    UnknownPeriod { material: Symbol, period: Period },

    #[error("{field} of {owner} must be a finite non-negative number, got {value}")]
    InvalidNumber {
        field: &'static str,
        owner: String,
        value: f64,
    },

    #[error("quality band is inverted: lower bound {lower} exceeds upper bound {upper}")]
    InvertedQualityBand { lower: f64, upper: f64 },

    #[error(
        "usage of {material} in period {period} has no finite capacity, so no big-M can be derived for its indicator"
    )]
    UnboundedUsage { material: Symbol, period: Period },
}

/// A plan was requested from a result that does not carry one.
///
/// Seeing this means the caller skipped the status check on the solved model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("no plan can be extracted from a solve that ended {0}")]
    NoSolution(OptimizationStatus),

    #[error("the solver returned no value for {0}")]
    MissingValue(String),
}
