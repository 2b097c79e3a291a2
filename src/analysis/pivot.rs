use std::collections::{BTreeMap, BTreeSet};

use crate::data::filter::FilteredView;
use crate::data::model::CellValue;

/// Mean of `values` broken down by `index` (rows) and `columns` (columns).
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub index: String,
    pub columns: String,
    pub values: String,
    pub row_labels: Vec<CellValue>,
    pub column_labels: Vec<CellValue>,
    /// `cells[r][c]`; `None` where no row contributed.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    pub fn get(&self, row: &CellValue, column: &CellValue) -> Option<f64> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.column_labels.iter().position(|l| l == column)?;
        self.cells[r][c]
    }

    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty()
    }
}

/// Rows with a null key or a non-numeric value are skipped, so labels only
/// list keys that contributed at least one value.
pub fn pivot_mean(view: &FilteredView<'_>, index: &str, columns: &str, values: &str) -> PivotTable {
    let ds = view.dataset();
    let (ri, ci, vi) = (
        ds.column_index(index),
        ds.column_index(columns),
        ds.column_index(values),
    );

    let mut sums: BTreeMap<(CellValue, CellValue), (f64, usize)> = BTreeMap::new();
    let mut row_labels = BTreeSet::new();
    let mut column_labels = BTreeSet::new();

    if let (Some(ri), Some(ci), Some(vi)) = (ri, ci, vi) {
        for record in view.records() {
            let (row, col) = (record.get(ri), record.get(ci));
            if row.is_null() || col.is_null() {
                continue;
            }
            let Some(v) = record.get(vi).as_f64() else {
                continue;
            };
            row_labels.insert(row.clone());
            column_labels.insert(col.clone());
            let entry = sums.entry((row.clone(), col.clone())).or_default();
            entry.0 += v;
            entry.1 += 1;
        }
    }

    let row_labels: Vec<CellValue> = row_labels.into_iter().collect();
    let column_labels: Vec<CellValue> = column_labels.into_iter().collect();
    let cells = row_labels
        .iter()
        .map(|r| {
            column_labels
                .iter()
                .map(|c| {
                    sums.get(&(r.clone(), c.clone()))
                        .map(|(sum, n)| sum / *n as f64)
                })
                .collect()
        })
        .collect();

    PivotTable {
        index: index.to_string(),
        columns: columns.to_string(),
        values: values.to_string(),
        row_labels,
        column_labels,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{self, Emp};

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn mean_income_by_role_and_department() {
        let ds = fixtures::dataset(&[
            Emp::new("Sales", "Male", 30, 1, 0).role("Manager").income(5000),
            Emp::new("Sales", "Male", 31, 1, 0).role("Manager").income(7000),
            Emp::new("HR", "Female", 40, 3, 1).role("Manager").income(9000),
            Emp::new("Sales", "Female", 25, 1, 0).role("Sales Executive").income(3000),
        ]);
        let pivot = pivot_mean(&FilteredView::full(&ds), "JobRole", "Department", "MonthlyIncome");

        assert_eq!(pivot.row_labels, vec![s("Manager"), s("Sales Executive")]);
        assert_eq!(pivot.column_labels, vec![s("HR"), s("Sales")]);
        assert_eq!(pivot.get(&s("Manager"), &s("Sales")), Some(6000.0));
        assert_eq!(pivot.get(&s("Manager"), &s("HR")), Some(9000.0));
        assert_eq!(pivot.get(&s("Sales Executive"), &s("Sales")), Some(3000.0));
        // No sales executives in HR: missing, not zero.
        assert_eq!(pivot.get(&s("Sales Executive"), &s("HR")), None);
        assert_eq!(pivot.cells[1][0], None);
    }

    #[test]
    fn null_values_do_not_contribute() {
        let mut cells = Emp::new("Sales", "Male", 30, 1, 0).cells();
        cells[8] = CellValue::Null;
        let ds = crate::data::model::Dataset::from_rows(
            fixtures::columns(),
            vec![cells, Emp::new("Sales", "Male", 30, 1, 0).income(4000).cells()],
        );
        let pivot = pivot_mean(&FilteredView::full(&ds), "JobRole", "Department", "MonthlyIncome");
        assert_eq!(pivot.get(&s("Manager"), &s("Sales")), Some(4000.0));
    }

    #[test]
    fn unknown_columns_give_empty_table() {
        let ds = fixtures::dataset(&fixtures::sample_rows());
        let pivot = pivot_mean(&FilteredView::full(&ds), "Region", "Department", "MonthlyIncome");
        assert!(pivot.is_empty());
        assert!(pivot.cells.is_empty());
    }
}
