use super::{print_json, skip_rows, sort_bars_desc, ui, with_spinner};
use crate::QueryOptions;
use crate::core::{BarPoint, TransactionService};
use anyhow::Result;
use comfy_table::Cell;
use rust_decimal::prelude::ToPrimitive;

/// Sorts by total, largest first, then applies the row offset.
pub fn prepare(mut points: Vec<BarPoint>, offset: usize) -> Vec<BarPoint> {
    sort_bars_desc(&mut points);
    skip_rows(points, offset)
}

pub fn render(points: &[BarPoint]) -> String {
    if points.is_empty() {
        return ui::style_text("No transactions match the filters.", ui::StyleType::Subtle);
    }

    let max = points
        .iter()
        .filter_map(|p| p.value.to_f64())
        .fold(0.0, f64::max);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Expense Type"),
        ui::header_cell("Amount"),
        ui::header_cell(""),
    ]);
    for point in points {
        table.add_row(vec![
            Cell::new(&point.key),
            ui::value_cell(format!("{:.2}", point.value)),
            ui::bar_cell(point.value.to_f64().unwrap_or_default(), max),
        ]);
    }
    table.to_string()
}

pub async fn run(service: &TransactionService, options: &QueryOptions) -> Result<()> {
    let filter = options.filter()?;
    let points = with_spinner(
        "Fetching transactions...",
        service.group_by_expense_type(&filter),
    )
    .await?;
    let points = prepare(points, options.offset);

    if options.json {
        return print_json(&points);
    }
    println!("{}", ui::style_text("Expense Type", ui::StyleType::Title));
    println!("{}", render(&points));
    Ok(())
}
