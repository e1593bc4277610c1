use super::{print_json, ui, with_spinner};
use crate::QueryOptions;
use crate::core::TransactionService;
use anyhow::Result;
use comfy_table::Cell;

pub fn render(areas: &[String]) -> String {
    if areas.is_empty() {
        return ui::style_text("No expense areas found.", ui::StyleType::Subtle);
    }
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Expense Area")]);
    for area in areas {
        table.add_row(vec![Cell::new(area)]);
    }
    table.to_string()
}

pub async fn run(service: &TransactionService, options: &QueryOptions) -> Result<()> {
    let areas = with_spinner("Fetching transactions...", service.expense_areas()).await?;

    if options.json {
        return print_json(&areas);
    }
    println!("{}", render(&areas));
    Ok(())
}
