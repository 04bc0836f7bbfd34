//! The built-in food manufacture dataset and JSON (de)serialisation.
//!
//! The canonical data is H. P. Williams' six-month oil refining problem:
//! two vegetable and three non-vegetable oils, refined on two separate lines
//! and blended into a single product whose hardness must stay within 3 and 6.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::{BlendInput, BlendSpec, CapacityGroup, Implication, Material, Period, PeriodRecord};

const MONTHS: Period = 6;
const STORAGE_COST: f64 = 5.0;
const SALE_PRICE: f64 = 150.0;
const VEG_LINE_LIMIT: f64 = 200.0;
const NONVEG_LINE_LIMIT: f64 = 250.0;
const STORAGE_CAPACITY: f64 = 1000.0;
const INITIAL_STOCK: f64 = 500.0;
const FINAL_STOCK: f64 = 500.0;

/// (id, hardness, purchase price per month)
const OILS: [(&str, f64, [f64; MONTHS as usize]); 5] = [
    ("VEG1", 8.8, [110.0, 130.0, 110.0, 120.0, 100.0, 90.0]),
    ("VEG2", 6.1, [120.0, 130.0, 140.0, 110.0, 120.0, 100.0]),
    ("OIL1", 2.0, [130.0, 110.0, 130.0, 120.0, 150.0, 140.0]),
    ("OIL2", 4.2, [110.0, 90.0, 100.0, 120.0, 110.0, 80.0]),
    ("OIL3", 5.0, [115.0, 115.0, 95.0, 125.0, 105.0, 135.0]),
];

/// Williams' food manufacture problem, including the lot-size, "at most
/// three oils" and "vegetable oil needs OIL3" rules.
///
/// Call [`BlendInput::relaxed`] on the result for the pure LP variant.
pub fn canonical_input() -> BlendInput {
    let materials = OILS
        .iter()
        .map(|&(id, hardness, _)| Material {
            id: id.into(),
            quality: Some(hardness),
            initial_stock: INITIAL_STOCK,
            use_capacity: None,
            storage_capacity: Some(STORAGE_CAPACITY),
            final_stock: Some(FINAL_STOCK),
        })
        .collect();

    let records = OILS
        .iter()
        .flat_map(|&(id, _, prices)| {
            (1..=MONTHS).zip(prices).map(move |(period, cost)| PeriodRecord {
                material: id.into(),
                period,
                cost: Some(cost),
                buy_capacity: None,
                storage_cost: STORAGE_COST,
            })
        })
        .collect();

    BlendInput {
        periods: (1..=MONTHS).collect(),
        materials,
        records,
        capacity_groups: vec![
            CapacityGroup {
                name: "VEG".into(),
                members: vec!["VEG1".into(), "VEG2".into()],
                limit: VEG_LINE_LIMIT,
            },
            CapacityGroup {
                name: "NONVEG".into(),
                members: vec!["OIL1".into(), "OIL2".into(), "OIL3".into()],
                limit: NONVEG_LINE_LIMIT,
            },
        ],
        spec: BlendSpec {
            quality_lower: 3.0,
            quality_upper: 6.0,
            min_lot: Some(20.0),
            max_distinct: Some(3),
            implications: vec![
                Implication {
                    if_used: "VEG1".into(),
                    then_used: "OIL3".into(),
                },
                Implication {
                    if_used: "VEG2".into(),
                    then_used: "OIL3".into(),
                },
            ],
        },
        sale_price: SALE_PRICE,
    }
}

/// Reads a JSON dataset. The result still has to go through
/// [`BlendData::validate`](super::BlendData::validate).
pub fn read_input(path: &Path) -> Result<BlendInput> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_input<W: Write>(input: &BlendInput, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, input)?;
    writeln!(writer)?;
    Ok(())
}
