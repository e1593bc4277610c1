//! Query operations consumed by the presentation layer.
use crate::core::aggregate::{self, BarPoint, LinePoint};
use crate::core::error::FetchError;
use crate::core::source::TransactionSource;
use crate::core::transaction::TransactionFilter;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

/// Answers chart queries over whatever a [`TransactionSource`] returns.
///
/// Each call fetches the transaction set through the source (wrap it in
/// `CachingTransactionSource` to share one download between calls) and
/// aggregates it in memory. Fetch failures pass through unchanged.
#[derive(Clone)]
pub struct TransactionService {
    source: Arc<dyn TransactionSource>,
}

impl TransactionService {
    pub fn new(source: Arc<dyn TransactionSource>) -> Self {
        Self { source }
    }

    pub async fn group_by_expense_type(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<BarPoint>, FetchError> {
        let transactions = self.source.fetch_all().await?;
        let points = aggregate::group_by_expense_type(&transactions, filter);
        debug!(points = points.len(), "Grouped by expense type");
        Ok(points)
    }

    pub async fn daily_total_transaction(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<LinePoint<usize>>, FetchError> {
        let transactions = self.source.fetch_all().await?;
        let points = aggregate::daily_total_transaction(&transactions, filter);
        debug!(points = points.len(), "Counted transactions per day");
        Ok(points)
    }

    pub async fn daily_total_amount(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<LinePoint<Decimal>>, FetchError> {
        let transactions = self.source.fetch_all().await?;
        let points = aggregate::daily_total_amount(&transactions, filter);
        debug!(points = points.len(), "Summed amounts per day");
        Ok(points)
    }

    pub async fn expense_areas(&self) -> Result<Vec<String>, FetchError> {
        let transactions = self.source.fetch_all().await?;
        Ok(aggregate::distinct_expense_areas(&transactions))
    }
}
