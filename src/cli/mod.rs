//! Terminal presentation of the query operations.

pub mod areas;
pub mod daily;
pub mod dashboard;
pub mod expense_types;
pub mod setup;
pub mod ui;

use crate::core::{BarPoint, LinePoint};
use anyhow::Result;
use serde::Serialize;
use std::cmp::Reverse;

/// Largest values first, ties broken by key.
pub fn sort_bars_desc(points: &mut [BarPoint]) {
    points.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.key.cmp(&b.key)));
}

/// Most recent day first.
pub fn sort_lines_desc<V>(points: &mut [LinePoint<V>]) {
    points.sort_by_key(|p| Reverse(p.date));
}

/// Drops the first `offset` rows.
pub fn skip_rows<T>(mut rows: Vec<T>, offset: usize) -> Vec<T> {
    rows.drain(..offset.min(rows.len()));
    rows
}

/// Awaits `work` behind a spinner, clearing it whether the work succeeds or not.
pub(crate) async fn with_spinner<T, F>(message: &str, work: F) -> T
where
    F: Future<Output = T>,
{
    let pb = ui::new_spinner(message);
    let result = work.await;
    pb.finish_and_clear();
    result
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
