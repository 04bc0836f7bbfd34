//! Translation of validated blending data into a mixed-integer program.
//!
//! The model has a typestate: [`build_model`] yields a [`BlendModel`], which
//! can only be consumed by [`BlendModel::solve`] into a [`SolvedModel`].
//! Plans are extracted from the latter, so asking an unsolved model for a
//! plan does not compile.
//!
//! # Variables
//!
//! For each material `m` and period `t`:
//!
//! - `buy[m,t]`, `use[m,t]`: continuous, non-negative
//! - `stock[m,t]`: closing stock, bounded by the storage capacity
//! - `on[m,t]`: binary, only when the blend spec carries logical rules
//!
//! # Objective
//!
//! `maximise Σ sale_price·use − cost·buy − storage_cost·stock`
//!
//! The row families are described in [`families`].

use std::time::Duration;

use anyhow::Result;
use itertools::iproduct;

use crate::data::{BlendData, Period, Symbol};
use crate::error::DataValidationError;
use crate::lp_solver::{
    LPModelBuilder, LPSolution, LinearExpression, OptimizationSense, OptimizationStatus,
    SolverAdapter, VariableId, VariableType,
};

pub mod families;

pub use families::ConstraintFamily;

/// Brand of every variable and row in a blending model.
#[derive(Debug, Clone, Copy)]
pub struct Blend;

/// Decision variables of one material in one period.
#[derive(Debug, Clone, Copy)]
pub struct DecisionVars {
    pub buy: VariableId<Blend>,
    pub usage: VariableId<Blend>,
    pub stock: VariableId<Blend>,
    pub indicator: Option<VariableId<Blend>>,
}

/// Dense (material, period) → [`DecisionVars`] table.
#[derive(Debug, Clone)]
pub struct VariableLayout {
    horizon: Period,
    materials: usize,
    cells: Vec<DecisionVars>,
}

impl VariableLayout {
    pub fn get(&self, material: usize, period: Period) -> &DecisionVars {
        &self.cells[material * self.horizon as usize + (period - 1) as usize]
    }

    pub fn horizon(&self) -> Period {
        self.horizon
    }

    pub fn num_materials(&self) -> usize {
        self.materials
    }

    pub fn has_indicators(&self) -> bool {
        self.cells.iter().any(|vars| vars.indicator.is_some())
    }

    /// Variables of every material in `period`, in material order.
    pub fn period(&self, period: Period) -> impl Iterator<Item = &DecisionVars> + '_ {
        (0..self.materials).map(move |m| self.get(m, period))
    }
}

/// Tightest valid upper bound on `use[m,t]`, one entry per (material, period).
///
/// The bound is the least of the material's own use capacity, the limit of
/// every capacity group it belongs to, and what can physically be on hand:
/// stock carried into `t` plus the period's buy capacity. The first period
/// carries the initial stock; later ones carry the previous period's total,
/// capped by storage.
///
/// Fails with [`DataValidationError::UnboundedUsage`] when none of these is
/// finite, since the indicator row `use <= M·on` then has no sound `M`.
pub fn derive_big_m(data: &BlendData) -> Result<Vec<f64>, DataValidationError> {
    let mut big_m = Vec::with_capacity(data.materials().len() * data.horizon() as usize);

    for (m, material) in data.materials().iter().enumerate() {
        let own_limit = data
            .groups_of(m)
            .map(|group| group.limit)
            .chain(material.use_capacity)
            .fold(f64::INFINITY, f64::min);

        // Opening stock is data, not a stock variable, so storage only caps
        // what is carried out of a period.
        let mut carried = material.initial_stock;
        for t in data.periods() {
            let buy_capacity = data.terms(m, t).buy_capacity.unwrap_or(f64::INFINITY);
            let bound = own_limit.min(carried + buy_capacity);

            if !bound.is_finite() {
                return Err(DataValidationError::UnboundedUsage {
                    material: material.id.clone(),
                    period: t,
                });
            }
            big_m.push(bound);
            carried = material
                .storage_capacity
                .map_or(carried + buy_capacity, |cap| cap.min(carried + buy_capacity));
        }
    }

    Ok(big_m)
}

/// A built, unsolved blending model.
#[derive(Debug)]
pub struct BlendModel {
    lp: LPModelBuilder<Blend>,
    layout: VariableLayout,
    materials: Vec<Symbol>,
    qualities: Vec<f64>,
    family_rows: Vec<(ConstraintFamily, usize)>,
    big_m: Vec<f64>,
}

/// Build the blending model for `data`.
///
/// Indicators and the logical families are added only when the blend spec has a
/// minimum lot, a cardinality limit or implications. A blend spec without them
/// yields a pure LP.
pub fn build_model(data: &BlendData) -> Result<BlendModel, DataValidationError> {
    let logic = data.spec().has_logic();
    let big_m = if logic {
        derive_big_m(data)?
    } else {
        Vec::new()
    };

    let mut lp = LPModelBuilder::<Blend>::new();
    let mut cells = Vec::with_capacity(data.materials().len() * data.horizon() as usize);

    for (m, material) in data.materials().iter().enumerate() {
        let stock_cap = material.storage_capacity.unwrap_or(f64::INFINITY);
        for t in data.periods() {
            let id = &material.id;
            let buy_cap = data.terms(m, t).buy_capacity.unwrap_or(f64::INFINITY);
            let use_cap = material.use_capacity.unwrap_or(f64::INFINITY);
            cells.push(DecisionVars {
                buy: lp.add_variable(format!("buy[{id},{t}]"), VariableType::Continuous, 0.0, buy_cap),
                usage: lp.add_variable(format!("use[{id},{t}]"), VariableType::Continuous, 0.0, use_cap),
                stock: lp.add_variable(
                    format!("stock[{id},{t}]"),
                    VariableType::Continuous,
                    0.0,
                    stock_cap,
                ),
                indicator: logic
                    .then(|| lp.add_variable(format!("on[{id},{t}]"), VariableType::Binary, 0.0, 1.0)),
            });
        }
    }

    let layout = VariableLayout {
        horizon: data.horizon(),
        materials: data.materials().len(),
        cells,
    };

    let context = families::FamilyContext {
        data,
        vars: &layout,
        big_m: &big_m,
    };
    let mut family_rows = Vec::with_capacity(ConstraintFamily::ALL.len());
    for family in ConstraintFamily::ALL {
        let rows = family.rows(&context);
        if rows.is_empty() {
            continue;
        }
        family_rows.push((family, rows.len()));
        for row in rows {
            lp.add_constraint(row);
        }
    }

    let mut objective = LinearExpression::new(0.0);
    for (m, t) in iproduct!(0..layout.num_materials(), data.periods()) {
        let vars = layout.get(m, t);
        let terms = data.terms(m, t);
        objective += data.sale_price() * vars.usage;
        objective -= terms.cost * vars.buy;
        if terms.storage_cost != 0.0 {
            objective -= terms.storage_cost * vars.stock;
        }
    }
    lp.set_objective(objective, OptimizationSense::Maximize);

    tracing::info!(
        variables = lp.num_variables(),
        constraints = lp.num_constraints(),
        integer = logic,
        "blend model built"
    );
    for (family, count) in &family_rows {
        tracing::debug!(family = family.name(), rows = count, "constraint family");
    }

    Ok(BlendModel {
        lp,
        layout,
        materials: data.materials().iter().map(|m| m.id.clone()).collect(),
        qualities: data.materials().iter().map(|m| m.quality).collect(),
        family_rows,
        big_m,
    })
}

impl BlendModel {
    pub fn lp(&self) -> &LPModelBuilder<Blend> {
        &self.lp
    }

    pub fn layout(&self) -> &VariableLayout {
        &self.layout
    }

    /// Row counts per generated family, in generation order.
    pub fn family_rows(&self) -> &[(ConstraintFamily, usize)] {
        &self.family_rows
    }

    pub fn rows_of(&self, family: ConstraintFamily) -> usize {
        self.family_rows
            .iter()
            .find(|(f, _)| *f == family)
            .map_or(0, |(_, count)| *count)
    }

    /// The big-M used for `on[material,period]`, if the model has indicators.
    pub fn big_m(&self, material: usize, period: Period) -> Option<f64> {
        if self.big_m.is_empty() {
            return None;
        }
        self.big_m
            .get(material * self.layout.horizon as usize + (period - 1) as usize)
            .copied()
    }

    pub fn is_integer(&self) -> bool {
        self.layout.has_indicators()
    }

    /// Hand the model to `solver`.
    ///
    /// Infeasible, unbounded and timed-out outcomes come back as a status on
    /// the [`SolvedModel`]; only solver faults are errors.
    pub fn solve<S: SolverAdapter>(
        self,
        solver: &S,
        time_limit: Option<Duration>,
    ) -> Result<SolvedModel> {
        let BlendModel {
            lp,
            layout,
            materials,
            qualities,
            ..
        } = self;

        let solution = solver.solve(lp, time_limit)?;
        tracing::info!(status = %solution.status, objective = ?solution.objective_value, "blend model solved");

        Ok(SolvedModel {
            layout,
            materials,
            qualities,
            solution,
        })
    }
}

/// A model after the solver has run, whatever the outcome.
#[derive(Debug)]
pub struct SolvedModel {
    layout: VariableLayout,
    materials: Vec<Symbol>,
    qualities: Vec<f64>,
    solution: LPSolution<Blend>,
}

impl SolvedModel {
    pub fn status(&self) -> OptimizationStatus {
        self.solution.status
    }

    pub fn solution(&self) -> &LPSolution<Blend> {
        &self.solution
    }

    pub fn layout(&self) -> &VariableLayout {
        &self.layout
    }

    pub fn materials(&self) -> &[Symbol] {
        &self.materials
    }

    pub fn qualities(&self) -> &[f64] {
        &self.qualities
    }
}
