//! Aggregation & summary layer: pure functions of a [`FilteredView`].
//!
//! Nothing here caches between calls and nothing fails: an empty view yields
//! zero counts, a 0% rate and empty tables.

pub mod correlation;
pub mod crosstab;
pub mod describe;
pub mod grouped;
pub mod metrics;
pub mod pivot;

use crate::data::filter::FilteredView;
use crate::data::loader::ATTRITION;
use crate::data::model::Record;

/// Attrition outcome of a record, when the view's dataset has the column.
fn outcome(view: &FilteredView<'_>) -> impl Fn(&Record) -> Option<bool> {
    let idx = view.dataset().column_index(ATTRITION);
    move |record| idx.and_then(|i| record.get(i).as_attrition())
}

/// Numeric values of a column across the view, nulls and non-numeric cells skipped.
pub(crate) fn numeric_values(view: &FilteredView<'_>, column: &str) -> Vec<f64> {
    view.column(column).filter_map(|v| v.as_f64()).collect()
}

/// Numeric values of a column split into `(stayed, left)`.
pub(crate) fn split_by_attrition(view: &FilteredView<'_>, column: &str) -> (Vec<f64>, Vec<f64>) {
    let left_of = outcome(view);
    let idx = view.dataset().column_index(column);
    let mut stayed = Vec::new();
    let mut left = Vec::new();
    for record in view.records() {
        let Some(v) = idx.and_then(|i| record.get(i).as_f64()) else {
            continue;
        };
        match left_of(record) {
            Some(true) => left.push(v),
            Some(false) => stayed.push(v),
            None => {}
        }
    }
    (stayed, left)
}
