//! Constraint families of the blending model.
//!
//! Each family is a rule applied over a domain (materials, periods, groups or
//! implications) and yields named rows such as `balance[VEG1,3]`. The logical
//! families only produce rows when the layout carries indicators.
//!
//! | family            | domain              | row                                         |
//! |-------------------|---------------------|---------------------------------------------|
//! | `balance`         | material × period   | `stock[t] = stock[t-1] + buy[t] − use[t]`   |
//! | `final_stock`     | material            | `stock[N] = target`                         |
//! | `capacity`        | group × period      | `Σ use ≤ limit`                             |
//! | `quality_min`     | period              | `Σ (q − lo)·use ≥ 0`                        |
//! | `quality_max`     | period              | `Σ (q − hi)·use ≤ 0`                        |
//! | `link`            | material × period   | `use ≤ M·on`                                |
//! | `min_lot`         | material × period   | `use ≥ lot·on`                              |
//! | `max_distinct`    | period              | `Σ on ≤ K`                                  |
//! | `implies`         | implication × period| `on[a] ≤ on[b]`                             |

use itertools::iproduct;

use crate::constraint;
use crate::data::{BlendData, Period};
use crate::lp_solver::{Constraint, LinearExpression};

use super::{Blend, VariableLayout};

type Row = Constraint<Blend>;

/// Everything a family needs to generate its rows.
pub struct FamilyContext<'a> {
    pub data: &'a BlendData,
    pub vars: &'a VariableLayout,
    /// Per-(material, period) big-M; empty when the layout has no indicators.
    pub big_m: &'a [f64],
}

impl FamilyContext<'_> {
    fn id(&self, material: usize) -> &str {
        &self.data.material(material).id
    }

    fn big_m(&self, material: usize, period: Period) -> Option<f64> {
        self.big_m
            .get(material * self.data.horizon() as usize + (period - 1) as usize)
            .copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintFamily {
    InventoryBalance,
    FinalStock,
    GroupCapacity,
    QualityFloor,
    QualityCeiling,
    UsageLink,
    MinimumLot,
    Cardinality,
    Implication,
}

impl ConstraintFamily {
    /// Every family, in the order rows are added to the model.
    pub const ALL: [ConstraintFamily; 9] = [
        ConstraintFamily::InventoryBalance,
        ConstraintFamily::FinalStock,
        ConstraintFamily::GroupCapacity,
        ConstraintFamily::QualityFloor,
        ConstraintFamily::QualityCeiling,
        ConstraintFamily::UsageLink,
        ConstraintFamily::MinimumLot,
        ConstraintFamily::Cardinality,
        ConstraintFamily::Implication,
    ];

    /// Prefix of the row names this family generates.
    pub fn name(self) -> &'static str {
        match self {
            ConstraintFamily::InventoryBalance => "balance",
            ConstraintFamily::FinalStock => "final_stock",
            ConstraintFamily::GroupCapacity => "capacity",
            ConstraintFamily::QualityFloor => "quality_min",
            ConstraintFamily::QualityCeiling => "quality_max",
            ConstraintFamily::UsageLink => "link",
            ConstraintFamily::MinimumLot => "min_lot",
            ConstraintFamily::Cardinality => "max_distinct",
            ConstraintFamily::Implication => "implies",
        }
    }

    /// Whether the family needs indicator variables.
    pub fn is_logical(self) -> bool {
        matches!(
            self,
            ConstraintFamily::UsageLink
                | ConstraintFamily::MinimumLot
                | ConstraintFamily::Cardinality
                | ConstraintFamily::Implication
        )
    }

    /// Generate every row of this family.
    pub fn rows(self, ctx: &FamilyContext<'_>) -> Vec<Row> {
        let data = ctx.data;
        let materials = 0..data.materials().len();

        match self {
            ConstraintFamily::InventoryBalance => iproduct!(materials, data.periods())
                .map(|(m, t)| inventory_balance(ctx, m, t))
                .collect(),
            ConstraintFamily::FinalStock => materials.filter_map(|m| final_stock(ctx, m)).collect(),
            ConstraintFamily::GroupCapacity => iproduct!(0..data.groups().len(), data.periods())
                .map(|(g, t)| group_capacity(ctx, g, t))
                .collect(),
            ConstraintFamily::QualityFloor => data.periods().map(|t| quality_floor(ctx, t)).collect(),
            ConstraintFamily::QualityCeiling => {
                data.periods().map(|t| quality_ceiling(ctx, t)).collect()
            }
            ConstraintFamily::UsageLink => iproduct!(materials, data.periods())
                .filter_map(|(m, t)| usage_link(ctx, m, t))
                .collect(),
            ConstraintFamily::MinimumLot => iproduct!(materials, data.periods())
                .filter_map(|(m, t)| minimum_lot(ctx, m, t))
                .collect(),
            ConstraintFamily::Cardinality => {
                data.periods().filter_map(|t| cardinality(ctx, t)).collect()
            }
            ConstraintFamily::Implication => {
                iproduct!(0..data.implications().len(), data.periods())
                    .filter_map(|(i, t)| implication(ctx, i, t))
                    .collect()
            }
        }
    }
}

/// `stock[m,t] − stock[m,t−1] − buy[m,t] + use[m,t] = 0`, with the initial
/// stock on the right-hand side in the first period.
pub fn inventory_balance(ctx: &FamilyContext<'_>, m: usize, t: Period) -> Row {
    let name = format!("balance[{},{}]", ctx.id(m), t);
    let vars = ctx.vars.get(m, t);
    if t == 1 {
        let initial = ctx.data.material(m).initial_stock;
        constraint!(name, (vars.stock - vars.buy + vars.usage) == initial)
    } else {
        let previous = ctx.vars.get(m, t - 1);
        constraint!(name, (vars.stock - previous.stock - vars.buy + vars.usage) == 0.0)
    }
}

pub fn final_stock(ctx: &FamilyContext<'_>, m: usize) -> Option<Row> {
    let target = ctx.data.material(m).final_stock?;
    let last = ctx.data.horizon();
    let name = format!("final_stock[{}]", ctx.id(m));
    Some(constraint!(name, (ctx.vars.get(m, last).stock) == target))
}

pub fn group_capacity(ctx: &FamilyContext<'_>, g: usize, t: Period) -> Row {
    let group = &ctx.data.groups()[g];
    let total: LinearExpression<Blend> = group
        .members
        .iter()
        .map(|&m| ctx.vars.get(m, t).usage)
        .sum();
    constraint!(format!("capacity[{},{}]", group.name, t), (total) <= group.limit)
}

/// Weighted quality of the period's blend, shifted by `bound`:
/// `Σ (q_m − bound)·use[m,t]`.
fn shifted_quality(ctx: &FamilyContext<'_>, t: Period, bound: f64) -> LinearExpression<Blend> {
    ctx.data
        .materials()
        .iter()
        .zip(ctx.vars.period(t))
        .map(|(material, vars)| (material.quality - bound) * vars.usage)
        .sum()
}

pub fn quality_floor(ctx: &FamilyContext<'_>, t: Period) -> Row {
    let lower = ctx.data.spec().quality_lower;
    constraint!(format!("quality_min[{t}]"), (shifted_quality(ctx, t, lower)) >= 0.0)
}

pub fn quality_ceiling(ctx: &FamilyContext<'_>, t: Period) -> Row {
    let upper = ctx.data.spec().quality_upper;
    constraint!(format!("quality_max[{t}]"), (shifted_quality(ctx, t, upper)) <= 0.0)
}

pub fn usage_link(ctx: &FamilyContext<'_>, m: usize, t: Period) -> Option<Row> {
    let vars = ctx.vars.get(m, t);
    let on = vars.indicator?;
    let big_m = ctx.big_m(m, t)?;
    let name = format!("link[{},{}]", ctx.id(m), t);
    Some(constraint!(name, (vars.usage - big_m * on) <= 0.0))
}

pub fn minimum_lot(ctx: &FamilyContext<'_>, m: usize, t: Period) -> Option<Row> {
    let lot = ctx.data.spec().min_lot?;
    let vars = ctx.vars.get(m, t);
    let on = vars.indicator?;
    let name = format!("min_lot[{},{}]", ctx.id(m), t);
    Some(constraint!(name, (vars.usage - lot * on) >= 0.0))
}

pub fn cardinality(ctx: &FamilyContext<'_>, t: Period) -> Option<Row> {
    let limit = ctx.data.spec().max_distinct?;
    let active = ctx
        .vars
        .period(t)
        .map(|vars| vars.indicator)
        .collect::<Option<Vec<_>>>()?;
    let total: LinearExpression<Blend> = active.into_iter().sum();
    Some(constraint!(format!("max_distinct[{t}]"), (total) <= limit))
}

pub fn implication(ctx: &FamilyContext<'_>, i: usize, t: Period) -> Option<Row> {
    let (if_used, then_used) = ctx.data.implications()[i];
    let antecedent = ctx.vars.get(if_used, t).indicator?;
    let consequent = ctx.vars.get(then_used, t).indicator?;
    let name = format!("implies[{},{},{}]", ctx.id(if_used), ctx.id(then_used), t);
    Some(constraint!(name, (antecedent - consequent) <= 0.0))
}
