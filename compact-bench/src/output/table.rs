//! Table output using comfy-table.
//!
//! One table per variant with columns:
//! Size | Workers | Mean (ms) | Median (ms) | Speedup | Melem/s | Sel% | CV% | Valid

use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::harness::{format_size, DataPoint};

fn speedup_cell(speedup: f64) -> Cell {
    let text = format!("{:.2}x", speedup);
    let color = if speedup >= 4.0 {
        Color::Green
    } else if speedup >= 1.5 {
        Color::Cyan
    } else if speedup >= 1.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(text).fg(color)
}

fn metric(dp: &DataPoint, key: &str) -> String {
    dp.metrics
        .get(key)
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "-".to_string())
}

/// Build the table for one variant's data points.
pub fn build_table(points: &[&DataPoint]) -> Table {
    let header = [
        "Size", "Workers", "Mean (ms)", "Median (ms)", "Speedup", "Melem/s", "Sel%", "CV%",
        "Valid",
    ];

    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );

    for dp in points {
        let valid = if dp.valid {
            Cell::new("ok").fg(Color::Green)
        } else {
            Cell::new("MISMATCH").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(format_size(dp.size)).set_alignment(CellAlignment::Right),
            Cell::new(dp.workers).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", dp.stats.mean)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", dp.stats.median)).set_alignment(CellAlignment::Right),
            speedup_cell(dp.speedup).set_alignment(CellAlignment::Right),
            Cell::new(metric(dp, "melem_per_sec")).set_alignment(CellAlignment::Right),
            Cell::new(metric(dp, "selectivity_pct")).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", dp.stats.cv_percent)).set_alignment(CellAlignment::Right),
            valid,
        ]);
    }
    table
}

/// Render results grouped by variant, in first-seen order.
pub fn render_all_tables(data: &[DataPoint]) {
    if data.is_empty() {
        println!("No results to display.");
        return;
    }

    let mut groups: Vec<(&str, Vec<&DataPoint>)> = Vec::new();
    for dp in data {
        match groups.iter_mut().find(|(name, _)| *name == dp.variant) {
            Some((_, points)) => points.push(dp),
            None => groups.push((dp.variant.as_str(), vec![dp])),
        }
    }

    for (name, points) in &groups {
        println!("\n=== {} ===", name);
        println!("{}", build_table(points));
    }
}
