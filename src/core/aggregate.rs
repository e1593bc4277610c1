//! Grouping and reduction of transactions into chart-ready series.
//!
//! Everything here is pure: callers pass the full transaction set and a
//! [`TransactionFilter`], and get back plain data with at most one point per
//! grouping key.
use crate::core::transaction::{Transaction, TransactionFilter};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One aggregated value per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarPoint {
    pub key: String,
    pub value: Decimal,
}

/// One aggregated value per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePoint<V> {
    pub date: NaiveDate,
    pub value: V,
}

/// Groups `items` by `key_fn`, collecting `value_fn` of each item in input order.
pub fn group_by<'a, T, K, V>(
    items: impl IntoIterator<Item = &'a T>,
    key_fn: impl Fn(&T) -> K,
    value_fn: impl Fn(&T) -> V,
) -> BTreeMap<K, Vec<V>>
where
    T: 'a,
    K: Ord,
{
    let mut groups: BTreeMap<K, Vec<V>> = BTreeMap::new();
    for item in items {
        groups.entry(key_fn(item)).or_default().push(value_fn(item));
    }
    groups
}

/// Magnitude of a signed total, rounded half away from zero to cents.
pub fn round_magnitude(total: Decimal) -> Decimal {
    total
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum of signed amounts, clamped to the `Decimal` range instead of
/// overflowing.
pub fn saturating_total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).unwrap_or(if amount.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    })
}

fn filtered<'a>(
    transactions: &'a [Transaction],
    filter: &'a TransactionFilter,
) -> impl Iterator<Item = &'a Transaction> {
    transactions.iter().filter(move |t| filter.matches(t))
}

/// Total amount per expense type.
///
/// Amounts are summed with their sign and only the total's magnitude is
/// reported, so refunds offset charges within a type.
pub fn group_by_expense_type(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<BarPoint> {
    group_by(
        filtered(transactions, filter),
        |t| t.expense_type.clone(),
        |t| t.amount,
    )
    .into_iter()
    .map(|(key, amounts)| BarPoint {
        key,
        value: round_magnitude(saturating_total(amounts)),
    })
    .collect()
}

/// Number of transactions per day, ascending by date.
pub fn daily_total_transaction(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<LinePoint<usize>> {
    group_by(
        filtered(transactions, filter),
        |t| t.date,
        |t| t.transaction_number,
    )
    .into_iter()
    .map(|(date, numbers)| LinePoint {
        date,
        value: numbers.len(),
    })
    .collect()
}

/// Total amount per day, ascending by date.
pub fn daily_total_amount(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<LinePoint<Decimal>> {
    group_by(filtered(transactions, filter), |t| t.date, |t| t.amount)
        .into_iter()
        .map(|(date, amounts)| LinePoint {
            date,
            value: round_magnitude(saturating_total(amounts)),
        })
        .collect()
}

/// Every distinct expense area in the unfiltered set, sorted.
pub fn distinct_expense_areas(transactions: &[Transaction]) -> Vec<String> {
    transactions
        .iter()
        .map(|t| t.expense_area.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
