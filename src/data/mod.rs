//! Input data for the blending problem and its validation.
//!
//! [`BlendInput`] is the serde-facing shape: it mirrors the JSON dataset and
//! may be inconsistent. [`BlendData::validate`] turns it into a dense,
//! index-addressed table that the model builder can trust, or rejects it
//! with a [`DataValidationError`].
//!
//! Periods are 1-based and contiguous. Materials keep the order in which
//! they were declared; that order is the index used everywhere downstream.

use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use string_cache::DefaultAtom;

use crate::error::DataValidationError;

pub mod dataset;
#[cfg(test)]
mod tests;

pub use dataset::{canonical_input, read_input, write_input};

pub type Symbol = DefaultAtom;
pub type Period = u32;

/// A raw ingredient that can be bought, stored and refined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: Symbol,
    /// Quality coefficient (hardness for the oils dataset). Blends mix linearly.
    pub quality: Option<f64>,
    #[serde(default)]
    pub initial_stock: f64,
    /// Upper bound on the tons refined in any single period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_capacity: Option<f64>,
    /// Stock required at the end of the final period. `None` leaves it free.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_stock: Option<f64>,
}

/// Per-(material, period) market and storage terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub material: Symbol,
    pub period: Period,
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_capacity: Option<f64>,
    #[serde(default)]
    pub storage_cost: f64,
}

/// A shared refining line: the members' combined usage per period is capped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityGroup {
    pub name: Symbol,
    pub members: Vec<Symbol>,
    pub limit: f64,
}

/// "If `if_used` is refined in a period, `then_used` must be too."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implication {
    pub if_used: Symbol,
    pub then_used: Symbol,
}

/// Blend requirements applied to every period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendSpec {
    pub quality_lower: f64,
    pub quality_upper: f64,
    /// Smallest quantity of a material that may be refined once it is used at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_lot: Option<f64>,
    /// Most distinct materials refined together in one period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distinct: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implications: Vec<Implication>,
}

impl BlendSpec {
    /// Whether any rule needs per-period on/off indicators.
    pub fn has_logic(&self) -> bool {
        self.min_lot.is_some() || self.max_distinct.is_some() || !self.implications.is_empty()
    }

    /// The same quality band with the logical rules dropped.
    pub fn relaxed(&self) -> BlendSpec {
        BlendSpec {
            quality_lower: self.quality_lower,
            quality_upper: self.quality_upper,
            min_lot: None,
            max_distinct: None,
            implications: Vec::new(),
        }
    }
}

/// A complete dataset as read from, or written to, JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendInput {
    pub periods: Vec<Period>,
    pub materials: Vec<Material>,
    pub records: Vec<PeriodRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capacity_groups: Vec<CapacityGroup>,
    pub spec: BlendSpec,
    /// Revenue per ton of finished product.
    pub sale_price: f64,
}

impl BlendInput {
    pub fn relaxed(mut self) -> BlendInput {
        self.spec = self.spec.relaxed();
        self
    }
}

/// A validated material.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialData {
    pub id: Symbol,
    pub quality: f64,
    pub initial_stock: f64,
    pub use_capacity: Option<f64>,
    pub storage_capacity: Option<f64>,
    pub final_stock: Option<f64>,
}

/// Validated terms of one material in one period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodTerms {
    pub cost: f64,
    pub buy_capacity: Option<f64>,
    pub storage_cost: f64,
}

/// A capacity group with its members resolved to material indices.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupData {
    pub name: Symbol,
    pub members: Vec<usize>,
    pub limit: f64,
}

/// Validated, index-addressed blending data.
///
/// Every (material, period) pair has exactly one [`PeriodTerms`], and every
/// reference to a material has been resolved to its index.
#[derive(Debug, Clone)]
pub struct BlendData {
    materials: Vec<MaterialData>,
    index: HashMap<Symbol, usize>,
    horizon: Period,
    terms: Vec<PeriodTerms>,
    groups: Vec<GroupData>,
    spec: BlendSpec,
    implications: Vec<(usize, usize)>,
    sale_price: f64,
}

fn check_number(
    field: &'static str,
    owner: impl fmt::Display,
    value: f64,
) -> Result<f64, DataValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DataValidationError::InvalidNumber {
            field,
            owner: owner.to_string(),
            value,
        })
    }
}

fn check_optional(
    field: &'static str,
    owner: impl fmt::Display,
    value: Option<f64>,
) -> Result<Option<f64>, DataValidationError> {
    value.map(|v| check_number(field, owner, v)).transpose()
}

impl BlendData {
    /// Check `input` for completeness and consistency.
    ///
    /// Rejects an empty or gapped horizon, duplicate or missing materials and
    /// records, dangling references, negative or non-finite numbers and an
    /// inverted quality band. The first problem found is reported.
    pub fn validate(input: BlendInput) -> Result<Self, DataValidationError> {
        let BlendInput {
            periods,
            materials,
            records,
            capacity_groups,
            spec,
            sale_price,
        } = input;

        if periods.is_empty() {
            return Err(DataValidationError::EmptyHorizon);
        }
        for (position, &found) in periods.iter().enumerate() {
            if found as usize != position + 1 {
                return Err(DataValidationError::NonContiguousPeriods { position, found });
            }
        }
        let horizon = periods.len() as Period;

        if materials.is_empty() {
            return Err(DataValidationError::NoMaterials);
        }
        let mut index = HashMap::with_capacity(materials.len());
        let mut validated = Vec::with_capacity(materials.len());
        for material in materials {
            if index.contains_key(&material.id) {
                return Err(DataValidationError::DuplicateMaterial(material.id));
            }
            let quality = material
                .quality
                .ok_or_else(|| DataValidationError::MissingQuality(material.id.clone()))?;
            let id = &material.id;
            let quality = check_number("quality", id, quality)?;
            let data = MaterialData {
                quality,
                initial_stock: check_number("initial_stock", id, material.initial_stock)?,
                use_capacity: check_optional("use_capacity", id, material.use_capacity)?,
                storage_capacity: check_optional("storage_capacity", id, material.storage_capacity)?,
                final_stock: check_optional("final_stock", id, material.final_stock)?,
                id: material.id.clone(),
            };
            index.insert(material.id, validated.len());
            validated.push(data);
        }

        let mut slots: Vec<Option<PeriodTerms>> = vec![None; validated.len() * horizon as usize];
        for record in records {
            let Some(&m) = index.get(&record.material) else {
                return Err(DataValidationError::UnknownMaterial {
                    context: format!("record for period {}", record.period),
                    material: record.material,
                });
            };
            if record.period == 0 || record.period > horizon {
                return Err(DataValidationError::UnknownPeriod {
                    material: record.material,
                    period: record.period,
                });
            }
            let slot = &mut slots[m * horizon as usize + (record.period - 1) as usize];
            if slot.is_some() {
                return Err(DataValidationError::DuplicateRecord {
                    material: record.material,
                    period: record.period,
                });
            }
            let owner = format!("{} in period {}", record.material, record.period);
            let cost = record.cost.ok_or_else(|| DataValidationError::MissingCost {
                material: record.material.clone(),
                period: record.period,
            })?;
            *slot = Some(PeriodTerms {
                cost: check_number("cost", &owner, cost)?,
                buy_capacity: check_optional("buy_capacity", &owner, record.buy_capacity)?,
                storage_cost: check_number("storage_cost", &owner, record.storage_cost)?,
            });
        }

        let mut terms = Vec::with_capacity(slots.len());
        for (position, slot) in slots.into_iter().enumerate() {
            let Some(slot) = slot else {
                let material = validated[position / horizon as usize].id.clone();
                let period = (position % horizon as usize) as Period + 1;
                return Err(DataValidationError::MissingRecord { material, period });
            };
            terms.push(slot);
        }

        let resolve = |context: &dyn Fn() -> String, id: &Symbol| {
            index
                .get(id)
                .copied()
                .ok_or_else(|| DataValidationError::UnknownMaterial {
                    context: context(),
                    material: id.clone(),
                })
        };

        let mut groups = Vec::with_capacity(capacity_groups.len());
        for group in capacity_groups {
            let context = || format!("capacity group {}", group.name);
            let members = group
                .members
                .iter()
                .map(|member| resolve(&context, member))
                .collect::<Result<Vec<_>, _>>()?;
            groups.push(GroupData {
                limit: check_number("limit", &group.name, group.limit)?,
                name: group.name,
                members,
            });
        }

        let quality_lower = check_number("quality_lower", "the blend spec", spec.quality_lower)?;
        let quality_upper = check_number("quality_upper", "the blend spec", spec.quality_upper)?;
        if quality_lower > quality_upper {
            return Err(DataValidationError::InvertedQualityBand {
                lower: quality_lower,
                upper: quality_upper,
            });
        }
        check_optional("min_lot", "the blend spec", spec.min_lot)?;

        let implications = spec
            .implications
            .iter()
            .map(|rule| {
                let context = || format!("implication {} => {}", rule.if_used, rule.then_used);
                Ok((resolve(&context, &rule.if_used)?, resolve(&context, &rule.then_used)?))
            })
            .collect::<Result<Vec<_>, DataValidationError>>()?;

        let sale_price = check_number("sale_price", "the dataset", sale_price)?;

        tracing::debug!(
            materials = validated.len(),
            periods = horizon,
            groups = groups.len(),
            logic = spec.has_logic(),
            "dataset validated"
        );

        Ok(BlendData {
            materials: validated,
            index,
            horizon,
            terms,
            groups,
            spec,
            implications,
            sale_price,
        })
    }

    pub fn materials(&self) -> &[MaterialData] {
        &self.materials
    }

    pub fn material(&self, material: usize) -> &MaterialData {
        &self.materials[material]
    }

    pub fn index_of(&self, id: &Symbol) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn horizon(&self) -> Period {
        self.horizon
    }

    pub fn periods(&self) -> RangeInclusive<Period> {
        1..=self.horizon
    }

    /// Terms of `material` (by index) in `period` (1-based).
    pub fn terms(&self, material: usize, period: Period) -> &PeriodTerms {
        &self.terms[material * self.horizon as usize + (period - 1) as usize]
    }

    pub fn groups(&self) -> &[GroupData] {
        &self.groups
    }

    /// Groups that list `material` among their members.
    pub fn groups_of(&self, material: usize) -> impl Iterator<Item = &GroupData> {
        self.groups
            .iter()
            .filter(move |group| group.members.contains(&material))
    }

    pub fn spec(&self) -> &BlendSpec {
        &self.spec
    }

    /// Implications as `(if_used, then_used)` material indices.
    pub fn implications(&self) -> &[(usize, usize)] {
        &self.implications
    }

    pub fn sale_price(&self) -> f64 {
        self.sale_price
    }
}
