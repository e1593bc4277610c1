pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{DateRange, ExpenseAreaFilter, TransactionFilter, TransactionService};
use crate::providers::{CachingTransactionSource, HttpTransactionSource};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    ExpenseTypes,
    DailyCount,
    DailyAmount,
    Areas,
    Dashboard,
}

/// Filters and output options shared by the query commands.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub expense_areas: Vec<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub offset: usize,
    pub json: bool,
}

impl QueryOptions {
    pub fn filter(&self) -> Result<TransactionFilter> {
        let date_range = match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => {
                bail!("Start date {start} is after end date {end}")
            }
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            (None, None) => None,
            _ => bail!("Both a start and an end date are required to filter by date"),
        };
        let expense_areas: ExpenseAreaFilter = self.expense_areas.iter().cloned().collect();
        Ok(TransactionFilter::new(expense_areas, date_range))
    }
}

/// Wires the HTTP source behind the response cache described by `config`.
pub fn build_service(config: &AppConfig) -> Result<TransactionService> {
    let http = HttpTransactionSource::new(&config.api_url)?;
    let source = CachingTransactionSource::new(http, config.cache_ttl(), config.cache_size);
    Ok(TransactionService::new(Arc::new(source)))
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    options: &QueryOptions,
) -> Result<()> {
    info!("Transaction dashboard starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let service = build_service(&config)?;

    match command {
        AppCommand::ExpenseTypes => cli::expense_types::run(&service, options).await,
        AppCommand::DailyCount => cli::daily::run_count(&service, options).await,
        AppCommand::DailyAmount => cli::daily::run_amount(&service, options).await,
        AppCommand::Areas => cli::areas::run(&service, options).await,
        AppCommand::Dashboard => cli::dashboard::run(&service, options).await,
    }
}
