//! Turning a solved model into a production plan.
//!
//! Solver noise around zero (`1e-12` tons of an oil nobody bought) is snapped
//! to exactly `0.0`. The profit is the solver's objective value, never
//! recomputed from the snapped quantities.

use std::fmt;
use std::ops::RangeInclusive;

use crate::data::{Period, Symbol};
use crate::error::ExtractionError;
use crate::lp_solver::{OptimizationStatus, VariableId};
use crate::model::{Blend, SolvedModel};

/// Magnitudes below this are reported as zero.
pub const ZERO_TOLERANCE: f64 = 1e-6;

pub fn snap(value: f64) -> f64 {
    if value.abs() < ZERO_TOLERANCE {
        0.0
    } else {
        value
    }
}

/// Whether the plan is proven optimal or only the best found in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    Optimal,
    Suboptimal,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStatus::Optimal => write!(f, "optimal"),
            PlanStatus::Suboptimal => write!(f, "feasible (time limit reached)"),
        }
    }
}

/// Quantities of one material in one period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanEntry {
    pub buy: f64,
    pub usage: f64,
    /// Closing stock.
    pub stock: f64,
    /// Indicator value; `None` for a model without logical rules.
    pub used: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub status: PlanStatus,
    pub profit: f64,
    materials: Vec<Symbol>,
    qualities: Vec<f64>,
    horizon: Period,
    entries: Vec<PlanEntry>,
}

impl Plan {
    pub fn materials(&self) -> &[Symbol] {
        &self.materials
    }

    pub fn periods(&self) -> RangeInclusive<Period> {
        1..=self.horizon
    }

    pub fn entry(&self, material: &Symbol, period: Period) -> Option<&PlanEntry> {
        if period == 0 || period > self.horizon {
            return None;
        }
        let m = self.materials.iter().position(|id| id == material)?;
        Some(self.entry_at(m, period))
    }

    fn entry_at(&self, material: usize, period: Period) -> &PlanEntry {
        &self.entries[material * self.horizon as usize + (period - 1) as usize]
    }

    /// Every entry, material-major.
    pub fn entries(&self) -> impl Iterator<Item = (&Symbol, Period, &PlanEntry)> + '_ {
        self.materials.iter().enumerate().flat_map(move |(m, id)| {
            self.periods().map(move |t| (id, t, self.entry_at(m, t)))
        })
    }

    /// Tons of finished product in `period`.
    pub fn total_usage(&self, period: Period) -> f64 {
        (0..self.materials.len())
            .map(|m| self.entry_at(m, period).usage)
            .sum()
    }

    /// Quality of the period's blend, or `None` if nothing was refined.
    pub fn blend_quality(&self, period: Period) -> Option<f64> {
        let total = self.total_usage(period);
        if total <= 0.0 {
            return None;
        }
        let weighted: f64 = self
            .qualities
            .iter()
            .enumerate()
            .map(|(m, quality)| quality * self.entry_at(m, period).usage)
            .sum();
        Some(weighted / total)
    }
}

fn value_of(model: &SolvedModel, var: VariableId<Blend>) -> Result<f64, ExtractionError> {
    model
        .solution()
        .get_value(var)
        .map(snap)
        .ok_or_else(|| {
            let name = format!("{var:?}");
            ExtractionError::MissingValue(name)
        })
}

/// Read the plan out of a solved model.
///
/// Fails with [`ExtractionError::NoSolution`] when the status carries no
/// point. Extraction does not modify the model; calling it twice yields
/// identical plans.
pub fn extract(model: &SolvedModel) -> Result<Plan, ExtractionError> {
    let status = match model.status() {
        OptimizationStatus::Optimal => PlanStatus::Optimal,
        OptimizationStatus::TimedOutFeasible => PlanStatus::Suboptimal,
        other => return Err(ExtractionError::NoSolution(other)),
    };
    let profit = model
        .solution()
        .objective_value
        .ok_or_else(|| ExtractionError::MissingValue("objective".to_string()))?;

    let layout = model.layout();
    let mut entries = Vec::with_capacity(layout.num_materials() * layout.horizon() as usize);
    for m in 0..layout.num_materials() {
        for t in 1..=layout.horizon() {
            let vars = layout.get(m, t);
            let used = vars
                .indicator
                .map(|on| value_of(model, on).map(|value| value > 0.5))
                .transpose()?;
            entries.push(PlanEntry {
                buy: value_of(model, vars.buy)?,
                usage: value_of(model, vars.usage)?,
                stock: value_of(model, vars.stock)?,
                used,
            });
        }
    }

    tracing::debug!(%status, profit, entries = entries.len(), "plan extracted");

    Ok(Plan {
        status,
        profit,
        materials: model.materials().to_vec(),
        qualities: model.qualities().to_vec(),
        horizon: layout.horizon(),
        entries,
    })
}
