//! Transaction records and the filters applied to them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

/// A single transaction as served by the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_number: i64,
    pub department_family: String,
    pub entity: String,
    pub date: NaiveDate,
    pub expense_type: String,
    pub expense_area: String,
    pub supplier: String,
    pub amount: Decimal,
    pub invoice_currency_unit: String,
}

/// The full, immutable set of transactions handed out by a source.
pub type TransactionSet = Arc<Vec<Transaction>>;

/// Wire shape of a transaction, before the date is normalised.
///
/// `amount` accepts a JSON number or a decimal string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTransaction {
    transaction_number: i64,
    #[serde(default)]
    department_family: String,
    #[serde(default)]
    entity: String,
    #[serde(default)]
    date: Option<String>,
    expense_type: String,
    expense_area: String,
    #[serde(default)]
    supplier: String,
    amount: Decimal,
    #[serde(default)]
    invoice_currency_unit: String,
}

/// Parses a transaction date into a calendar day.
///
/// Accepts `YYYY-MM-DD` and ISO-8601 date-times such as
/// `2022-01-05T00:00:00.000Z`, keeping only the date part.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    let (day, rest) = raw.split_at_checked(10)?;
    if !rest.starts_with(['T', ' ']) {
        return None;
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Converts wire records into transactions.
///
/// Records without a usable date are dropped and logged. A batch whose
/// absolute amounts cannot be summed without overflowing `Decimal` is
/// rejected, which keeps every per-group total representable.
pub(crate) fn normalize_records(
    records: Vec<RawTransaction>,
) -> Result<Vec<Transaction>, String> {
    let mut transactions = Vec::with_capacity(records.len());
    let mut dropped = 0usize;
    let mut magnitude = Decimal::ZERO;

    for raw in records {
        let Some(date) = raw.date.as_deref().and_then(normalize_date) else {
            warn!(
                transaction_number = raw.transaction_number,
                date = ?raw.date,
                "Dropping transaction with missing or malformed date"
            );
            dropped += 1;
            continue;
        };
        magnitude = magnitude.checked_add(raw.amount.abs()).ok_or_else(|| {
            format!(
                "amount {} of transaction {} overflows the batch total",
                raw.amount, raw.transaction_number
            )
        })?;

        transactions.push(Transaction {
            transaction_number: raw.transaction_number,
            department_family: raw.department_family,
            entity: raw.entity,
            date,
            expense_type: raw.expense_type,
            expense_area: raw.expense_area,
            supplier: raw.supplier,
            amount: raw.amount,
            invoice_currency_unit: raw.invoice_currency_unit,
        });
    }

    if dropped > 0 {
        warn!(dropped, kept = transactions.len(), "Some transactions were dropped");
    }
    Ok(transactions)
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Set of expense areas to keep. Empty keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseAreaFilter(BTreeSet<String>);

impl ExpenseAreaFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, expense_area: &str) -> bool {
        self.0.is_empty() || self.0.contains(expense_area)
    }
}

impl<S: Into<String>> FromIterator<S> for ExpenseAreaFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Combined filter applied before every aggregation.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub expense_areas: ExpenseAreaFilter,
    pub date_range: Option<DateRange>,
}

impl TransactionFilter {
    pub fn new(expense_areas: ExpenseAreaFilter, date_range: Option<DateRange>) -> Self {
        Self {
            expense_areas,
            date_range,
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.expense_areas.matches(&transaction.expense_area)
            && self
                .date_range
                .is_none_or(|range| range.contains(transaction.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_date_formats() {
        assert_eq!(normalize_date("2022-01-05"), Some(date(2022, 1, 5)));
        assert_eq!(
            normalize_date("2022-01-05T00:00:00.000Z"),
            Some(date(2022, 1, 5))
        );
        assert_eq!(
            normalize_date(" 2022-01-05 13:45:00 "),
            Some(date(2022, 1, 5))
        );
        assert_eq!(normalize_date("05-01-2022"), None);
        assert_eq!(normalize_date("2022-13-01"), None);
        assert_eq!(normalize_date("2022-01-05junk"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn test_deserialize_and_normalize() {
        let json = r#"[
            {
                "transactionNumber": 1,
                "departmentFamily": "Operations",
                "entity": "Council",
                "date": "2022-01-05",
                "expenseType": "Travel",
                "expenseArea": "Ops",
                "supplier": "Rail Co",
                "amount": -120.555,
                "invoiceCurrencyUnit": "GBP"
            },
            {
                "transactionNumber": 2,
                "date": "2022-01-06T00:00:00Z",
                "expenseType": "Travel",
                "expenseArea": "Ops",
                "amount": "10.10"
            }
        ]"#;
        let raw: Vec<RawTransaction> = serde_json::from_str(json).unwrap();
        let transactions = normalize_records(raw).unwrap();

        assert_eq!(transactions.len(), 2);
        let first = &transactions[0];
        assert_eq!(first.transaction_number, 1);
        assert_eq!(first.department_family, "Operations");
        assert_eq!(first.date, date(2022, 1, 5));
        assert_eq!(first.amount, Decimal::new(-120555, 3));
        assert_eq!(first.invoice_currency_unit, "GBP");

        let second = &transactions[1];
        assert_eq!(second.date, date(2022, 1, 6));
        assert_eq!(second.amount, Decimal::new(1010, 2));
        assert!(second.supplier.is_empty());
    }

    #[test]
    fn test_records_with_bad_dates_are_dropped() {
        let json = r#"[
            {"transactionNumber": 1, "date": "not a date", "expenseType": "A", "expenseArea": "X", "amount": 1},
            {"transactionNumber": 2, "expenseType": "A", "expenseArea": "X", "amount": 2},
            {"transactionNumber": 3, "date": null, "expenseType": "A", "expenseArea": "X", "amount": 3},
            {"transactionNumber": 4, "date": "2022-02-01", "expenseType": "A", "expenseArea": "X", "amount": 4}
        ]"#;
        let raw: Vec<RawTransaction> = serde_json::from_str(json).unwrap();
        let transactions = normalize_records(raw).unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].transaction_number, 4);
    }

    #[test]
    fn test_bad_amount_fails_to_parse() {
        let json = r#"[
            {"transactionNumber": 7, "date": "2022-02-01", "expenseType": "A", "expenseArea": "X", "amount": "lots"}
        ]"#;
        assert!(serde_json::from_str::<Vec<RawTransaction>>(json).is_err());
    }

    #[test]
    fn test_amounts_beyond_decimal_range_reject_batch() {
        let json = r#"[
            {"transactionNumber": 1, "date": "2022-02-01", "expenseType": "A", "expenseArea": "X", "amount": "50000000000000000000000000000"},
            {"transactionNumber": 2, "date": "2022-02-01", "expenseType": "A", "expenseArea": "X", "amount": "-50000000000000000000000000000"}
        ]"#;
        let raw: Vec<RawTransaction> = serde_json::from_str(json).unwrap();
        let err = normalize_records(raw).unwrap_err();
        assert!(err.contains("transaction 2"));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::new(date(2022, 1, 5), date(2022, 1, 7));
        assert!(range.contains(date(2022, 1, 5)));
        assert!(range.contains(date(2022, 1, 6)));
        assert!(range.contains(date(2022, 1, 7)));
        assert!(!range.contains(date(2022, 1, 4)));
        assert!(!range.contains(date(2022, 1, 8)));
    }

    #[test]
    fn test_empty_area_filter_matches_everything() {
        let filter = ExpenseAreaFilter::all();
        assert!(filter.is_empty());
        assert!(filter.matches("Ops"));
        assert!(filter.matches(""));

        let filter: ExpenseAreaFilter = ["Ops", "Finance"].into_iter().collect();
        assert!(filter.matches("Ops"));
        assert!(filter.matches("Finance"));
        assert!(!filter.matches("ops"));
    }
}
