//! Text and CSV rendering of a [`Plan`].

use std::io::Write;

use anyhow::Result;
use itertools::Itertools;
use prettytable::*;

use crate::data::Symbol;
use crate::extract::{Plan, PlanEntry};

/// `£` amount with thousands separators and two decimals, e.g. `£100,279.00`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}£{}.{:02}", sign, grouped, cents % 100)
}

/// Material columns, alphabetical.
fn columns(plan: &Plan) -> Vec<&Symbol> {
    plan.materials()
        .iter()
        .sorted_by(|a, b| str::cmp(a, b))
        .collect()
}

/// Months as rows, materials as columns, one decimal per cell.
pub fn quantity_table(plan: &Plan, quantity: impl Fn(&PlanEntry) -> f64) -> Table {
    let columns = columns(plan);

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        std::iter::once(Cell::new("Month"))
            .chain(columns.iter().map(|id| Cell::new(id)))
            .collect(),
    ));

    for t in plan.periods() {
        let cells = columns.iter().map(|id| {
            let value = plan.entry(id, t).map_or(0.0, &quantity);
            Cell::new_align(&format!("{:.1}", value), format::Alignment::RIGHT)
        });
        table.add_row(Row::new(
            std::iter::once(Cell::new(&t.to_string())).chain(cells).collect(),
        ));
    }

    table
}

pub fn quality_table(plan: &Plan) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["Month", "Tons", "Quality"]);

    for t in plan.periods() {
        let quality = plan
            .blend_quality(t)
            .map_or_else(|| "-".to_string(), |q| format!("{:.2}", q));
        table.add_row(row![t, r->format!("{:.1}", plan.total_usage(t)), r->quality]);
    }

    table
}

pub fn write_report<W: Write>(plan: &Plan, mut writer: W) -> Result<()> {
    writeln!(writer, "Status: {}", plan.status)?;
    writeln!(writer, "Total Profit: {}", format_currency(plan.profit))?;

    writeln!(writer, "\nRefining Plan (Tons Used):")?;
    quantity_table(plan, |entry| entry.usage).print(&mut writer)?;

    writeln!(writer, "\nBuying Plan (Tons Bought):")?;
    quantity_table(plan, |entry| entry.buy).print(&mut writer)?;

    writeln!(writer, "\nClosing Stock (Tons):")?;
    quantity_table(plan, |entry| entry.stock).print(&mut writer)?;

    writeln!(writer, "\nBlend Quality:")?;
    quality_table(plan).print(&mut writer)?;

    Ok(())
}

/// One line per (material, period): `material,period,buy,use,stock`.
pub fn write_csv<W: Write>(plan: &Plan, mut writer: W) -> Result<()> {
    writeln!(writer, "material,period,buy,use,stock")?;
    for (id, t, entry) in plan.entries() {
        writeln!(
            writer,
            "{},{},{:.3},{:.3},{:.3}",
            id, t, entry.buy, entry.usage, entry.stock
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(100_278.7037), "£100,278.70");
        assert_eq!(format_currency(100_279.0), "£100,279.00");
        assert_eq!(format_currency(107_842.5926), "£107,842.59");
        assert_eq!(format_currency(0.0), "£0.00");
        assert_eq!(format_currency(999.999), "£1,000.00");
        assert_eq!(format_currency(1_234_567.8), "£1,234,567.80");
        assert_eq!(format_currency(-68_500.0), "-£68,500.00");
        assert_eq!(format_currency(-0.001), "£0.00");
    }
}
