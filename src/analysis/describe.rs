use crate::data::filter::FilteredView;

// ---------------------------------------------------------------------------
// Summary statistics per numeric column
// ---------------------------------------------------------------------------

/// `count / mean / std / min / 25% / 50% / 75% / max` of one column.
///
/// Statistics are `None` when the column has no values in the view; `std` also
/// needs two values (sample standard deviation).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

pub fn describe(view: &FilteredView<'_>, columns: &[String]) -> Vec<ColumnSummary> {
    columns
        .iter()
        .map(|c| summarize(c, super::numeric_values(view, c)))
        .collect()
}

fn summarize(column: &str, mut values: Vec<f64>) -> ColumnSummary {
    values.sort_by(f64::total_cmp);
    let count = values.len();
    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
    let std = mean.filter(|_| count > 1).map(|m| {
        let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });
    ColumnSummary {
        column: column.to_string(),
        count,
        mean,
        std,
        min: values.first().copied(),
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values.last().copied(),
    }
}

/// Linear-interpolated quantile of ascending `sorted` values.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Null cells per column, in column order.
pub fn null_counts(view: &FilteredView<'_>) -> Vec<(String, usize)> {
    let ds = view.dataset();
    let mut counts = vec![0usize; ds.columns.len()];
    for record in view.records() {
        for (i, cell) in record.cells.iter().enumerate() {
            if cell.is_null() {
                counts[i] += 1;
            }
        }
    }
    ds.columns.iter().cloned().zip(counts).collect()
}

// ---------------------------------------------------------------------------
// Box statistics split by attrition
// ---------------------------------------------------------------------------

/// Five-number summary drawn as a box; whiskers reach the furthest values
/// within 1.5 × IQR of the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub count: usize,
}

pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = quantile(&sorted, 0.25)?;
    let median = quantile(&sorted, 0.5)?;
    let q3 = quantile(&sorted, 0.75)?;
    let fence = 1.5 * (q3 - q1);
    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|v| *v >= q1 - fence)
        .unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= q3 + fence)
        .unwrap_or(q3);
    Some(BoxStats {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        count: sorted.len(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitBoxStats {
    pub column: String,
    pub stayed: Option<BoxStats>,
    pub left: Option<BoxStats>,
}

pub fn box_by_attrition(view: &FilteredView<'_>, column: &str) -> SplitBoxStats {
    let (stayed, left) = super::split_by_attrition(view, column);
    SplitBoxStats {
        column: column.to_string(),
        stayed: box_stats(&stayed),
        left: box_stats(&left),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::{FilterCriteria, apply};
    use crate::data::fixtures::{self, Emp};
    use crate::data::model::{CellValue, Dataset};

    #[test]
    fn quantiles_interpolate_linearly() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&v, 0.25), Some(1.75));
        assert_eq!(quantile(&v, 0.5), Some(2.5));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[7.0], 0.75), Some(7.0));
    }

    #[test]
    fn describe_matches_hand_computation() {
        let rows: Vec<Emp> = [20, 30, 40, 50]
            .into_iter()
            .map(|age| Emp::new("Sales", "Male", age, 1, 0))
            .collect();
        let ds = fixtures::dataset(&rows);
        let summary = &describe(&FilteredView::full(&ds), &["Age".to_string()])[0];
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, Some(35.0));
        assert!((summary.std.unwrap() - (500.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, Some(20.0));
        assert_eq!(summary.q25, Some(27.5));
        assert_eq!(summary.median, Some(35.0));
        assert_eq!(summary.q75, Some(42.5));
        assert_eq!(summary.max, Some(50.0));
    }

    #[test]
    fn describe_empty_view_has_zero_counts() {
        let ds = fixtures::dataset(&fixtures::sample_rows());
        let mut criteria = FilterCriteria::defaults(&ds);
        criteria.select("Department", BTreeSet::new());
        let view = apply(&ds, &criteria);
        for summary in describe(&view, &ds.numeric_columns()) {
            assert_eq!(summary.count, 0);
            assert_eq!(summary.mean, None);
            assert_eq!(summary.std, None);
        }
        assert!(null_counts(&view).iter().all(|(_, n)| *n == 0));
        assert_eq!(box_by_attrition(&view, "Age").stayed, None);
    }

    #[test]
    fn single_value_has_no_std() {
        let ds = fixtures::dataset(&[Emp::new("Sales", "Male", 30, 1, 0)]);
        let summary = &describe(&FilteredView::full(&ds), &["Age".to_string()])[0];
        assert_eq!(summary.mean, Some(30.0));
        assert_eq!(summary.std, None);
    }

    #[test]
    fn nulls_are_counted_per_column() {
        let mut cells = Emp::new("Sales", "Male", 30, 1, 0).cells();
        cells[2] = CellValue::Null;
        cells[8] = CellValue::Null;
        let ds = Dataset::from_rows(
            fixtures::columns(),
            vec![cells, Emp::new("Sales", "Male", 30, 1, 0).cells()],
        );
        let nulls = null_counts(&FilteredView::full(&ds));
        assert_eq!(nulls.len(), ds.columns.len());
        assert_eq!(nulls[2], ("Age".to_string(), 1));
        assert_eq!(nulls[8], ("MonthlyIncome".to_string(), 1));
        assert_eq!(nulls[0], ("Department".to_string(), 0));
    }

    #[test]
    fn nan_income_in_csv_counts_as_missing() {
        let rows = [
            Emp::new("Sales", "Male", 30, 1, 0).income(4000),
            Emp::new("Sales", "Female", 40, 2, 1).income(4500),
            Emp::new("Sales", "Male", 35, 3, 0).income(9999),
            Emp::new("Sales", "Female", 50, 4, 0).income(4500),
        ];
        let text = fixtures::csv_text(&rows).replace(",9999,", ",NaN,");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("EA.csv");
        std::fs::write(&path, text).unwrap();
        let ds = crate::data::loader::load_file(&path).unwrap();
        let view = FilteredView::full(&ds);

        let nulls = null_counts(&view);
        assert_eq!(nulls[8], ("MonthlyIncome".to_string(), 1));

        let income = &describe(&view, &["MonthlyIncome".to_string()])[0];
        assert_eq!(income.count, 3);
        assert!((income.mean.unwrap() - 13000.0 / 3.0).abs() < 1e-9);
        assert!(income.std.unwrap().is_finite());

        let columns = ["Age".to_string(), "MonthlyIncome".to_string()];
        let matrix = crate::analysis::correlation::correlation_matrix(&view, &columns);
        let r = matrix.get("Age", "MonthlyIncome").unwrap();
        assert!(r.is_finite());
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn whiskers_stop_at_the_fence() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(stats.q1, 2.25);
        assert_eq!(stats.q3, 4.75);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 5.0);
        assert_eq!(stats.count, 6);
        assert_eq!(box_stats(&[]), None);
    }

    #[test]
    fn boxes_split_by_outcome() {
        let ds = fixtures::dataset(&fixtures::sample_rows());
        let split = box_by_attrition(&FilteredView::full(&ds), "YearsAtCompany");
        assert_eq!(split.stayed.map(|b| b.count), Some(7));
        assert_eq!(split.left.map(|b| b.count), Some(3));
        // Leavers: 6, 0, 1 years.
        assert_eq!(split.left.map(|b| b.median), Some(1.0));
    }
}
