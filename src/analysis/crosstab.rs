use std::collections::{BTreeMap, BTreeSet};

use crate::data::filter::FilteredView;
use crate::data::model::CellValue;

/// Attrition × `column` joint frequencies, normalized per attrition row.
///
/// Only attrition groups present in the view get a row, so every row sums to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub column: String,
    /// Distinct non-null values of `column` seen in the view, sorted.
    pub categories: Vec<CellValue>,
    pub rows: Vec<CrossTabRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossTabRow {
    /// `true` for employees who left.
    pub left: bool,
    pub count: usize,
    /// Share of this attrition group falling in each category, aligned with `categories`.
    pub shares: Vec<f64>,
}

pub fn crosstab(view: &FilteredView<'_>, column: &str) -> CrossTab {
    let left_of = super::outcome(view);
    let idx = view.dataset().column_index(column);
    let mut counts: BTreeMap<bool, BTreeMap<CellValue, usize>> = BTreeMap::new();
    let mut categories: BTreeSet<CellValue> = BTreeSet::new();

    for record in view.records() {
        let Some(value) = idx.map(|i| record.get(i)).filter(|v| !v.is_null()) else {
            continue;
        };
        let Some(left) = left_of(record) else {
            continue;
        };
        categories.insert(value.clone());
        *counts
            .entry(left)
            .or_default()
            .entry(value.clone())
            .or_default() += 1;
    }

    let categories: Vec<CellValue> = categories.into_iter().collect();
    let rows = counts
        .into_iter()
        .map(|(left, per_value)| {
            let count: usize = per_value.values().sum();
            let shares = categories
                .iter()
                .map(|c| per_value.get(c).copied().unwrap_or(0) as f64 / count as f64)
                .collect();
            CrossTabRow { left, count, shares }
        })
        .collect();

    CrossTab {
        column: column.to_string(),
        categories,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::{FilterCriteria, apply};
    use crate::data::fixtures;

    #[test]
    fn rows_are_normalized() {
        let ds = fixtures::dataset(&fixtures::sample_rows());
        let tab = crosstab(&FilteredView::full(&ds), "MaritalStatus");
        assert_eq!(
            tab.categories,
            ["Divorced", "Married", "Single"]
                .map(|s| CellValue::String(s.into()))
                .to_vec()
        );
        assert_eq!(tab.rows.len(), 2);
        for row in &tab.rows {
            let sum: f64 = row.shares.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "{row:?}");
        }

        // Stayed: Divorced 2, Married 4, Single 1.
        let stayed = &tab.rows[0];
        assert!(!stayed.left);
        assert_eq!(stayed.count, 7);
        assert!((stayed.shares[1] - 4.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn missing_attrition_group_has_no_row() {
        let ds = fixtures::dataset(&fixtures::sample_rows());
        let mut criteria = FilterCriteria::default();
        criteria.select(
            "Department",
            [CellValue::String("Human Resources".into())].into(),
        );
        let tab = crosstab(&apply(&ds, &criteria), "MaritalStatus");
        assert_eq!(tab.rows.len(), 1);
        assert!(!tab.rows[0].left);
    }

    #[test]
    fn empty_view_gives_empty_table() {
        let ds = fixtures::dataset(&fixtures::sample_rows());
        let mut criteria = FilterCriteria::default();
        criteria.select("Department", BTreeSet::new());
        let tab = crosstab(&apply(&ds, &criteria), "MaritalStatus");
        assert!(tab.categories.is_empty());
        assert!(tab.rows.is_empty());
    }
}
