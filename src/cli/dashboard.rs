use super::{daily, expense_types, print_json, ui, with_spinner};
use crate::QueryOptions;
use crate::core::{BarPoint, LinePoint, TransactionService};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

/// Every view of the dashboard for one set of filters.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub expense_types: Vec<BarPoint>,
    pub daily_count: Vec<LinePoint<usize>>,
    pub daily_amount: Vec<LinePoint<Decimal>>,
    pub expense_areas: Vec<String>,
}

/// Runs all four queries concurrently. With a caching source they share a
/// single download.
pub async fn load(service: &TransactionService, options: &QueryOptions) -> Result<DashboardData> {
    let filter = options.filter()?;
    let (expense_types, daily_count, daily_amount, expense_areas) = futures::try_join!(
        service.group_by_expense_type(&filter),
        service.daily_total_transaction(&filter),
        service.daily_total_amount(&filter),
        service.expense_areas(),
    )?;

    Ok(DashboardData {
        expense_types: expense_types::prepare(expense_types, options.offset),
        daily_count: daily::prepare(daily_count, options.offset),
        daily_amount: daily::prepare(daily_amount, options.offset),
        expense_areas,
    })
}

pub fn render(data: &DashboardData) -> String {
    let sections = [
        ("Total Transaction", daily::render_counts(&data.daily_count)),
        ("Total Amount", daily::render_amounts(&data.daily_amount)),
        ("Expense Type", expense_types::render(&data.expense_types)),
    ];

    let mut output = String::new();
    for (title, body) in sections {
        output.push_str(&format!(
            "{}\n{}\n",
            ui::style_text(title, ui::StyleType::Title),
            body
        ));
    }
    output.push_str(&format!(
        "Expense areas: {}",
        ui::style_text(&data.expense_areas.join(", "), ui::StyleType::Subtle)
    ));
    output
}

pub async fn run(service: &TransactionService, options: &QueryOptions) -> Result<()> {
    let data = with_spinner("Fetching transactions...", load(service, options)).await?;

    if options.json {
        return print_json(&data);
    }
    println!("{}", render(&data));
    Ok(())
}
