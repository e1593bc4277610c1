use super::{print_json, skip_rows, sort_lines_desc, ui, with_spinner};
use crate::QueryOptions;
use crate::core::{LinePoint, TransactionService};
use anyhow::Result;
use comfy_table::Cell;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Most recent day first, then applies the row offset.
pub fn prepare<V>(mut points: Vec<LinePoint<V>>, offset: usize) -> Vec<LinePoint<V>> {
    sort_lines_desc(&mut points);
    skip_rows(points, offset)
}

fn render_series<V>(
    value_header: &str,
    points: &[LinePoint<V>],
    format_value: impl Fn(&V) -> String,
    magnitude: impl Fn(&V) -> f64,
) -> String {
    if points.is_empty() {
        return ui::style_text("No transactions match the filters.", ui::StyleType::Subtle);
    }

    let max = points.iter().map(|p| magnitude(&p.value)).fold(0.0, f64::max);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(value_header),
        ui::header_cell(""),
    ]);
    for point in points {
        table.add_row(vec![
            Cell::new(point.date.to_string()),
            ui::value_cell(format_value(&point.value)),
            ui::bar_cell(magnitude(&point.value), max),
        ]);
    }
    table.to_string()
}

pub fn render_counts(points: &[LinePoint<usize>]) -> String {
    render_series("Transactions", points, |v| v.to_string(), |v| *v as f64)
}

pub fn render_amounts(points: &[LinePoint<Decimal>]) -> String {
    render_series(
        "Amount",
        points,
        |v| format!("{v:.2}"),
        |v| v.to_f64().unwrap_or_default(),
    )
}

pub async fn run_count(service: &TransactionService, options: &QueryOptions) -> Result<()> {
    let filter = options.filter()?;
    let points = with_spinner(
        "Fetching transactions...",
        service.daily_total_transaction(&filter),
    )
    .await?;
    let points = prepare(points, options.offset);

    if options.json {
        return print_json(&points);
    }
    println!("{}", ui::style_text("Total Transaction", ui::StyleType::Title));
    println!("{}", render_counts(&points));
    Ok(())
}

pub async fn run_amount(service: &TransactionService, options: &QueryOptions) -> Result<()> {
    let filter = options.filter()?;
    let points = with_spinner(
        "Fetching transactions...",
        service.daily_total_amount(&filter),
    )
    .await?;
    let points = prepare(points, options.offset);

    if options.json {
        return print_json(&points);
    }
    println!("{}", ui::style_text("Total Amount", ui::StyleType::Title));
    println!("{}", render_amounts(&points));
    Ok(())
}
