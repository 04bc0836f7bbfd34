//! Linear and mixed-integer programming abstraction layer
//!
//! The blending model is written against the types in this module only; the
//! numeric work is delegated to a backend selected at runtime through the
//! [`SolverAdapter`] trait. Nothing here knows about materials or periods.
//!
//! # Branded variables
//!
//! [`VariableId`], [`LinearExpression`], [`Constraint`] and [`LPModelBuilder`]
//! carry a zero-sized `Brand` type parameter. A variable created by one builder
//! cannot be placed in a constraint of a builder with a different brand; the
//! mistake is a type error rather than a silently wrong column index.
//!
//! ```rust
//! use blendopt::constraint;
//! use blendopt::lp_model_builder;
//! use blendopt::lp_solver::VariableType;
//!
//! let mut builder = lp_model_builder!(Mixing);
//! let a = builder.add_variable("a", VariableType::Continuous, 0.0, 10.0);
//! let b = builder.add_variable("b", VariableType::Continuous, 0.0, 10.0);
//!
//! builder.add_constraint(constraint!("total", (a + b) <= 12.0));
//! builder.add_constraint(constraint!((2.0 * a - b) >= 0.0));
//! assert_eq!(builder.num_constraints(), 2);
//! ```
//!
//! Long-lived models that have to be stored in a struct name their brand
//! explicitly, e.g. `LPModelBuilder::<MyBrand>::new()`.
//!
//! # Storage
//!
//! Variables and solution values live in `Vec`s; [`VariableId`] is an index
//! into both. [`LPSolution::get_value`] returns `None` for an index the solver
//! did not report, which only happens for a status without a solution.
//!
//! # Solver selection
//!
//! [`SolverBackend::from_env_or_default`] reads `BLEND_LP_SOLVER`:
//! - `"microlp"` - pure Rust solver via `good_lp` (feature `microlp`, default)
//! - `"coin_cbc"` or `"cbc"` - COIN-OR CBC (feature `coin_cbc`)
//! - `"gurobi"` - Gurobi (feature `gurobi`)
//!
//! When unset, the first available of Gurobi, CBC and microlp is used.
//!
//! # Outcomes
//!
//! Infeasible and unbounded models are not errors. They come back as an
//! [`OptimizationStatus`] on an [`LPSolution`] without values. A backend only
//! returns `Err` for faults such as a missing licence or a status it cannot
//! classify.

use anyhow::{Result, anyhow};
use std::env;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

/// Environment variable naming the solver backend.
pub const SOLVER_ENV_VAR: &str = "BLEND_LP_SOLVER";

/// Absolute tolerance used when checking a point against bounds and rows.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Variable domains supported by the backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// Any real value within the bounds
    Continuous,
    /// Integral values within the bounds
    Integer,
    /// 0 or 1; the declared bounds are ignored
    Binary,
}

/// Relation between a row's expression and its right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    /// expression ≤ rhs
    LessEqual,
    /// expression = rhs
    Equal,
    /// expression ≥ rhs
    GreaterEqual,
}

/// Optimization direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationSense {
    Minimize,
    Maximize,
}

/// Terminal status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptimizationStatus {
    /// Proven optimal solution
    Optimal,
    /// No point satisfies every constraint
    Infeasible,
    /// The objective improves without bound
    Unbounded,
    /// Time limit hit with a feasible incumbent; optimality not proven
    TimedOutFeasible,
    /// Time limit hit before any feasible point was found
    TimedOutNoSolution,
}

impl OptimizationStatus {
    /// Whether variable values accompany this status.
    pub fn has_solution(self) -> bool {
        matches!(
            self,
            OptimizationStatus::Optimal | OptimizationStatus::TimedOutFeasible
        )
    }
}

impl fmt::Display for OptimizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            OptimizationStatus::Optimal => "optimal",
            OptimizationStatus::Infeasible => "infeasible",
            OptimizationStatus::Unbounded => "unbounded",
            OptimizationStatus::TimedOutFeasible => "time limit reached (feasible)",
            OptimizationStatus::TimedOutNoSolution => "time limit reached (no solution)",
        };
        f.write_str(text)
    }
}

/// Something that can solve an [`LPModelBuilder`].
///
/// The model is moved into the adapter for the duration of the solve. A
/// `time_limit` of `None` means solve to optimality. Implementations must
/// return a `TimedOut*` status when the limit expires instead of blocking.
pub trait SolverAdapter {
    fn solve<Brand>(
        &self,
        model: LPModelBuilder<Brand>,
        time_limit: Option<Duration>,
    ) -> Result<LPSolution<Brand>>;
}

/// Solver backends compiled into this build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverBackend {
    /// Gurobi commercial solver
    #[cfg(feature = "gurobi")]
    Gurobi,
    /// COIN-OR branch and cut
    #[cfg(feature = "coin_cbc")]
    CoinCbc,
    /// Pure Rust simplex with branch and bound, through `good_lp`
    #[cfg(feature = "microlp")]
    MicroLp,
}

impl SolverBackend {
    /// Parse a backend name as accepted in `BLEND_LP_SOLVER`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "gurobi" => {
                #[cfg(feature = "gurobi")]
                return Ok(SolverBackend::Gurobi);
                #[cfg(not(feature = "gurobi"))]
                return Err(anyhow!(
                    "Gurobi solver requested but the gurobi feature is not enabled"
                ));
            }
            "coin_cbc" | "coin-cbc" | "cbc" => {
                #[cfg(feature = "coin_cbc")]
                return Ok(SolverBackend::CoinCbc);
                #[cfg(not(feature = "coin_cbc"))]
                return Err(anyhow!(
                    "Coin CBC solver requested but the coin_cbc feature is not enabled"
                ));
            }
            "microlp" => {
                #[cfg(feature = "microlp")]
                return Ok(SolverBackend::MicroLp);
                #[cfg(not(feature = "microlp"))]
                return Err(anyhow!(
                    "microlp solver requested but the microlp feature is not enabled"
                ));
            }
            _ => Err(anyhow!(
                "Invalid solver '{}'. Valid options: gurobi, coin_cbc, microlp",
                name
            )),
        }
    }

    /// Backend from `BLEND_LP_SOLVER`, falling back to the strongest one compiled in.
    pub fn from_env_or_default() -> Result<Self> {
        if let Ok(name) = env::var(SOLVER_ENV_VAR) {
            return Self::from_name(&name);
        }

        #[cfg(feature = "gurobi")]
        return Ok(SolverBackend::Gurobi);

        #[allow(unreachable_code)]
        #[cfg(feature = "coin_cbc")]
        return Ok(SolverBackend::CoinCbc);

        #[allow(unreachable_code)]
        #[cfg(feature = "microlp")]
        return Ok(SolverBackend::MicroLp);

        #[cfg(not(any(feature = "gurobi", feature = "coin_cbc", feature = "microlp")))]
        Err(anyhow!(
            "No LP solver backend available. Enable one of the features: microlp, coin_cbc, gurobi"
        ))
    }
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            #[cfg(feature = "gurobi")]
            SolverBackend::Gurobi => f.write_str("gurobi"),
            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => f.write_str("coin_cbc"),
            #[cfg(feature = "microlp")]
            SolverBackend::MicroLp => f.write_str("microlp"),
        }
    }
}

impl SolverAdapter for SolverBackend {
    #[allow(unused_variables)]
    fn solve<Brand>(
        &self,
        model: LPModelBuilder<Brand>,
        time_limit: Option<Duration>,
    ) -> Result<LPSolution<Brand>> {
        match *self {
            #[cfg(feature = "gurobi")]
            SolverBackend::Gurobi => gurobi::solve_gurobi(model, time_limit),
            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => coin_cbc::solve_coin_cbc(model, time_limit),
            #[cfg(feature = "microlp")]
            SolverBackend::MicroLp => microlp::solve_microlp(model, time_limit),
        }
    }
}

/// coefficient * variable
#[derive(Debug, Clone)]
pub struct LinearTerm<Brand> {
    pub coefficient: f64,
    pub variable: VariableId<Brand>,
}

/// Sum of terms plus a constant
#[derive(Debug, Clone)]
pub struct LinearExpression<Brand> {
    pub terms: Vec<LinearTerm<Brand>>,
    pub constant: f64,
}

impl<Brand> LinearExpression<Brand> {
    /// Expression with no terms
    pub fn new(constant: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    pub fn add_term(&mut self, coefficient: f64, variable: VariableId<Brand>) {
        self.terms.push(LinearTerm {
            coefficient,
            variable,
        });
    }

    pub fn from_variable(variable: VariableId<Brand>) -> Self {
        Self {
            terms: vec![LinearTerm {
                coefficient: 1.0,
                variable,
            }],
            constant: 0.0,
        }
    }

    /// Value of the expression at `values`, or `None` if a variable has no value.
    pub fn evaluate(&self, values: &[f64]) -> Option<f64> {
        self.terms.iter().try_fold(self.constant, |acc, term| {
            values
                .get(term.variable.id)
                .map(|value| acc + term.coefficient * value)
        })
    }
}

impl<Brand> From<VariableId<Brand>> for LinearExpression<Brand> {
    fn from(variable: VariableId<Brand>) -> Self {
        Self::from_variable(variable)
    }
}

impl<Brand> From<f64> for LinearExpression<Brand> {
    fn from(constant: f64) -> Self {
        Self::new(constant)
    }
}

/// Column of an [`LPModelBuilder`], usable only with the builder of the same `Brand`.
pub struct VariableId<Brand> {
    id: usize,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> VariableId<Brand> {
    fn new(id: usize) -> Self {
        Self {
            id,
            _brand: PhantomData,
        }
    }

    /// Position of this variable in the model and in solution vectors.
    pub fn index(&self) -> usize {
        self.id
    }
}

// The brand is phantom, so none of these may require anything of it.
impl<Brand> fmt::Debug for VariableId<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableId").field("id", &self.id).finish()
    }
}

impl<Brand> Clone for VariableId<Brand> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Brand> Copy for VariableId<Brand> {}

impl<Brand> PartialEq for VariableId<Brand> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Brand> Eq for VariableId<Brand> {}

impl<Brand> std::hash::Hash for VariableId<Brand> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Row of an [`LPModelBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId(usize);

/// A linear row `expression (sense) rhs` with an optional name.
///
/// Names are carried through to backends that support them and are what the
/// blending model uses to tag rows with their constraint family.
#[derive(Debug, Clone)]
pub struct Constraint<Brand> {
    name: Arc<str>,
    expression: LinearExpression<Brand>,
    sense: ConstraintSense,
    rhs: f64,
}

impl<Brand> Constraint<Brand> {
    pub fn new(
        expression: impl Into<LinearExpression<Brand>>,
        sense: ConstraintSense,
        rhs: f64,
    ) -> Self {
        Self {
            name: Arc::from(""),
            expression: expression.into(),
            sense,
            rhs,
        }
    }

    /// expression == rhs
    pub fn eq(expression: impl Into<LinearExpression<Brand>>, rhs: f64) -> Self {
        Self::new(expression, ConstraintSense::Equal, rhs)
    }

    /// expression <= rhs
    pub fn le(expression: impl Into<LinearExpression<Brand>>, rhs: f64) -> Self {
        Self::new(expression, ConstraintSense::LessEqual, rhs)
    }

    /// expression >= rhs
    pub fn ge(expression: impl Into<LinearExpression<Brand>>, rhs: f64) -> Self {
        Self::new(expression, ConstraintSense::GreaterEqual, rhs)
    }

    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sense(&self) -> ConstraintSense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn expression(&self) -> &LinearExpression<Brand> {
        &self.expression
    }

    /// How far `values` are from satisfying this row; 0 when satisfied.
    ///
    /// A variable without a value counts as infinitely violated.
    pub fn violation(&self, values: &[f64]) -> f64 {
        let Some(lhs) = self.expression.evaluate(values) else {
            return f64::INFINITY;
        };
        match self.sense {
            ConstraintSense::LessEqual => (lhs - self.rhs).max(0.0),
            ConstraintSense::GreaterEqual => (self.rhs - lhs).max(0.0),
            ConstraintSense::Equal => (lhs - self.rhs).abs(),
        }
    }
}

#[derive(Debug, Clone)]
struct VariableInfo {
    name: Arc<str>,
    var_type: VariableType,
    lower_bound: f64,
    upper_bound: f64,
}

impl VariableInfo {
    fn bounds(&self) -> (f64, f64) {
        match self.var_type {
            VariableType::Binary => (0.0, 1.0),
            _ => (self.lower_bound, self.upper_bound),
        }
    }
}

#[derive(Debug, Clone)]
struct ObjectiveInfo<Brand> {
    expression: LinearExpression<Brand>,
    sense: OptimizationSense,
}

/// What a backend reports back.
///
/// `variable_values` holds one entry per declared variable when
/// [`OptimizationStatus::has_solution`] is true, and is empty otherwise.
#[derive(Debug, Clone)]
pub struct LPSolution<Brand> {
    pub status: OptimizationStatus,
    pub objective_value: Option<f64>,
    variable_values: Vec<f64>,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> LPSolution<Brand> {
    pub fn new(
        status: OptimizationStatus,
        objective_value: Option<f64>,
        variable_values: Vec<f64>,
    ) -> Self {
        Self {
            status,
            objective_value,
            variable_values,
            _brand: PhantomData,
        }
    }

    /// A status that carries no point, e.g. infeasible.
    pub fn without_solution(status: OptimizationStatus) -> Self {
        Self::new(status, None, Vec::new())
    }

    pub fn get_value(&self, var_id: VariableId<Brand>) -> Option<f64> {
        self.variable_values.get(var_id.id).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.variable_values
    }
}

/// Solver-independent LP/MIP model.
///
/// ```rust
/// use blendopt::lp_solver::{LPModelBuilder, OptimizationSense, VariableType};
///
/// struct Production;
/// let mut builder = LPModelBuilder::<Production>::new();
/// let x = builder.add_variable("x", VariableType::Continuous, 0.0, 4.0);
/// let y = builder.add_variable("y", VariableType::Binary, 0.0, 1.0);
/// builder.set_objective(3.0 * x + y, OptimizationSense::Maximize);
///
/// assert_eq!(builder.evaluate_objective(&[4.0, 1.0]), Some(13.0));
/// assert_eq!(builder.max_violation(&[5.0, 1.0]), 1.0);
/// ```
pub struct LPModelBuilder<Brand> {
    variables: Vec<VariableInfo>,
    constraints: Vec<Constraint<Brand>>,
    objective: Option<ObjectiveInfo<Brand>>,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> fmt::Debug for LPModelBuilder<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LPModelBuilder")
            .field("variables", &self.variables.len())
            .field("constraints", &self.constraints.len())
            .field("objective", &self.objective.as_ref().map(|obj| obj.sense))
            .finish()
    }
}

impl<Brand> LPModelBuilder<Brand> {
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
            _brand: PhantomData,
        }
    }

    /// Declare a variable. Bounds are ignored for [`VariableType::Binary`].
    pub fn add_variable(
        &mut self,
        name: impl Into<Arc<str>>,
        var_type: VariableType,
        lower_bound: f64,
        upper_bound: f64,
    ) -> VariableId<Brand> {
        let var_id = VariableId::new(self.variables.len());
        self.variables.push(VariableInfo {
            name: name.into(),
            var_type,
            lower_bound,
            upper_bound,
        });
        var_id
    }

    pub fn add_constraint(&mut self, constraint: Constraint<Brand>) -> ConstraintId {
        let constr_id = ConstraintId(self.constraints.len());
        self.constraints.push(constraint);
        constr_id
    }

    pub fn set_objective(
        &mut self,
        expression: impl Into<LinearExpression<Brand>>,
        sense: OptimizationSense,
    ) {
        self.objective = Some(ObjectiveInfo {
            expression: expression.into(),
            sense,
        });
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint<Brand>> {
        self.constraints.iter()
    }

    pub fn variable_name(&self, var_id: VariableId<Brand>) -> Option<&str> {
        self.variables.get(var_id.id).map(|info| &*info.name)
    }

    pub fn variable_type(&self, var_id: VariableId<Brand>) -> Option<VariableType> {
        self.variables.get(var_id.id).map(|info| info.var_type)
    }

    /// `(lower, upper)` as the backends will see them.
    pub fn variable_bounds(&self, var_id: VariableId<Brand>) -> Option<(f64, f64)> {
        self.variables.get(var_id.id).map(VariableInfo::bounds)
    }

    pub fn objective_sense(&self) -> Option<OptimizationSense> {
        self.objective.as_ref().map(|obj| obj.sense)
    }

    /// Objective at `values`; `None` without an objective or with missing values.
    pub fn evaluate_objective(&self, values: &[f64]) -> Option<f64> {
        self.objective
            .as_ref()
            .and_then(|obj| obj.expression.evaluate(values))
    }

    /// Largest bound, integrality or row violation of `values`.
    ///
    /// Returns infinity when `values` is shorter than the variable list.
    pub fn max_violation(&self, values: &[f64]) -> f64 {
        if values.len() < self.variables.len() {
            return f64::INFINITY;
        }

        let columns = self
            .variables
            .iter()
            .zip(values)
            .map(|(info, &value)| {
                let (lower, upper) = info.bounds();
                let bound = (lower - value).max(value - upper).max(0.0);
                let integrality = match info.var_type {
                    VariableType::Continuous => 0.0,
                    VariableType::Integer | VariableType::Binary => (value - value.round()).abs(),
                };
                bound.max(integrality)
            });

        let rows = self.constraints.iter().map(|c| c.violation(values));

        columns.chain(rows).fold(0.0, f64::max)
    }
}

impl<Brand> Default for LPModelBuilder<Brand> {
    fn default() -> Self {
        Self::new()
    }
}

pub mod macros;

pub mod ops;

#[cfg(feature = "coin_cbc")]
mod output_suppression;

#[cfg(feature = "gurobi")]
pub mod gurobi;

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc;

#[cfg(feature = "microlp")]
pub mod microlp;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constraint, lp_model_builder};

    #[test]
    fn test_constraint_macro_senses() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Continuous, 0.0, 10.0);
        let y = builder.add_variable("y", VariableType::Continuous, 0.0, 10.0);

        let c = constraint!((x + y) == 10.0);
        assert_eq!(c.sense(), ConstraintSense::Equal);
        assert_eq!(c.rhs(), 10.0);
        assert_eq!(c.name(), "");

        let c = constraint!("cap", (2.0 * x) <= 5.0);
        assert_eq!(c.sense(), ConstraintSense::LessEqual);
        assert_eq!(c.name(), "cap");

        let c = constraint!((x - y) >= 0.0);
        assert_eq!(c.sense(), ConstraintSense::GreaterEqual);
    }

    #[test]
    fn test_violation_per_sense() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Continuous, 0.0, 10.0);
        let values = [4.0];

        assert_eq!(Constraint::le(x, 5.0).violation(&values), 0.0);
        assert_eq!(Constraint::le(x, 3.0).violation(&values), 1.0);
        assert_eq!(Constraint::ge(x, 6.0).violation(&values), 2.0);
        assert_eq!(Constraint::eq(x + 1.0, 5.0).violation(&values), 0.0);
        assert_eq!(Constraint::eq(x, 5.0).violation(&values), 1.0);
        assert_eq!(Constraint::eq(x, 5.0).violation(&[]), f64::INFINITY);
    }

    #[test]
    fn test_max_violation_checks_bounds_and_integrality() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Continuous, 1.0, 10.0);
        let b = builder.add_variable("b", VariableType::Binary, 0.0, 100.0);
        builder.add_constraint(constraint!((x - 10.0 * b) <= 0.0));

        assert_eq!(builder.max_violation(&[5.0, 1.0]), 0.0);
        // Below the lower bound.
        assert_eq!(builder.max_violation(&[0.5, 1.0]), 0.5);
        // Binary bounds are [0, 1] whatever was declared.
        assert_eq!(builder.max_violation(&[5.0, 2.0]), 1.0);
        // Fractional binary, and the row it feeds is violated by 2.5.
        assert_eq!(builder.max_violation(&[5.0, 0.25]), 2.5);
        assert_eq!(builder.max_violation(&[5.0]), f64::INFINITY);
        assert_eq!(builder.variable_bounds(b), Some((0.0, 1.0)));
    }

    #[test]
    fn test_evaluate_objective() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Continuous, 0.0, 10.0);
        let y = builder.add_variable("y", VariableType::Continuous, 0.0, 10.0);
        assert_eq!(builder.evaluate_objective(&[1.0, 1.0]), None);

        builder.set_objective(2.0 * x - y + 3.0, OptimizationSense::Minimize);
        assert_eq!(builder.evaluate_objective(&[1.0, 4.0]), Some(1.0));
        assert_eq!(builder.objective_sense(), Some(OptimizationSense::Minimize));
        assert_eq!(builder.variable_name(y), Some("y"));
    }

    #[test]
    fn test_solution_accessors() {
        let mut builder = lp_model_builder!();
        let x = builder.add_variable("x", VariableType::Continuous, 0.0, 10.0);
        let y = builder.add_variable("y", VariableType::Continuous, 0.0, 10.0);

        let solved = LPSolution::new(OptimizationStatus::Optimal, Some(3.0), vec![1.0, 2.0]);
        assert_eq!(solved.get_value(x), Some(1.0));
        assert_eq!(solved.get_value(y), Some(2.0));

        let infeasible = LPSolution::without_solution(OptimizationStatus::Infeasible);
        assert_eq!(infeasible.get_value(x), None);
        assert!(!infeasible.status.has_solution());
        assert!(OptimizationStatus::TimedOutFeasible.has_solution());
        assert!(!OptimizationStatus::TimedOutNoSolution.has_solution());
    }

    #[test]
    fn test_backend_names() {
        assert!(SolverBackend::from_name("simplex-of-doom").is_err());

        #[cfg(feature = "microlp")]
        assert_eq!(
            SolverBackend::from_name("MicroLP").unwrap(),
            SolverBackend::MicroLp
        );
        #[cfg(not(feature = "coin_cbc"))]
        assert!(SolverBackend::from_name("cbc").is_err());
        #[cfg(feature = "coin_cbc")]
        assert_eq!(SolverBackend::from_name("cbc").unwrap(), SolverBackend::CoinCbc);
    }
}
