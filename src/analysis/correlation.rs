use crate::data::filter::FilteredView;

// ---------------------------------------------------------------------------
// Pearson correlation matrix
// ---------------------------------------------------------------------------

/// Square, symmetric matrix of pairwise Pearson coefficients.
///
/// Each pair uses only the rows where both columns are numeric. The diagonal is
/// 1.0 for every column with at least one value; an undefined coefficient
/// (fewer than two pairs, or zero variance) is `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

pub fn correlation_matrix(view: &FilteredView<'_>, columns: &[String]) -> CorrelationMatrix {
    let ds = view.dataset();
    let data: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|c| {
            let idx = ds.column_index(c);
            view.records()
                .map(|r| idx.and_then(|i| r.get(i).as_f64()))
                .collect()
        })
        .collect();

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        if data[i].iter().any(Option::is_some) {
            values[i][i] = 1.0;
        }
        for j in (i + 1)..n {
            let pairs: Vec<(f64, f64)> = data[i]
                .iter()
                .zip(&data[j])
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .collect();
            let r = pearson(&pairs).unwrap_or(f64::NAN);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    }
}

/// Pearson's r, clamped to `[-1, 1]`. `None` when undefined.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let moments = Moments::of(pairs)?;
    let denom = (moments.sxx * moments.syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((moments.sxy / denom).clamp(-1.0, 1.0))
}

// ---------------------------------------------------------------------------
// Ordinary least squares trendline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LineFit {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Least-squares line `y = intercept + slope * x`. `None` when x has no spread.
pub fn ols_fit(points: &[(f64, f64)]) -> Option<LineFit> {
    let m = Moments::of(points)?;
    if m.sxx == 0.0 {
        return None;
    }
    let slope = m.sxy / m.sxx;
    Some(LineFit {
        slope,
        intercept: m.mean_y - slope * m.mean_x,
    })
}

/// Centred second moments, needs at least two points.
struct Moments {
    mean_x: f64,
    mean_y: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

impl Moments {
    fn of(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for &(x, y) in points {
            let (dx, dy) = (x - mean_x, y - mean_y);
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }
        Some(Self {
            mean_x,
            mean_y,
            sxx,
            syy,
            sxy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterCriteria, InclusiveRange, apply};
    use crate::data::fixtures::{self, Emp};
    use crate::data::model::{CellValue, Dataset};

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let ds = fixtures::dataset(&fixtures::hundred_rows());
        let columns = ds.numeric_columns();
        let m = correlation_matrix(&FilteredView::full(&ds), &columns);

        assert_eq!(m.columns, columns);
        for i in 0..columns.len() {
            assert_eq!(m.values[i][i], 1.0);
            for j in 0..columns.len() {
                let (a, b) = (m.values[i][j], m.values[j][i]);
                assert!(a.to_bits() == b.to_bits() || (a - b).abs() < 1e-12);
                if !a.is_nan() {
                    assert!((-1.0..=1.0).contains(&a));
                }
            }
        }
    }

    #[test]
    fn perfectly_linear_columns() {
        // fixtures derive income = 1000 + 100 * age + 37 * years; hold years fixed.
        let rows: Vec<Emp> = (20..30).map(|age| Emp::new("Sales", "Male", age, 4, 0)).collect();
        let ds = fixtures::dataset(&rows);
        let cols = vec!["Age".to_string(), "MonthlyIncome".to_string()];
        let m = correlation_matrix(&FilteredView::full(&ds), &cols);
        assert!((m.get("Age", "MonthlyIncome").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pairs_skip_nulls_per_pair() {
        let mut columns = fixtures::columns();
        columns.truncate(9);
        let row = |age: CellValue, income: CellValue| {
            let mut cells = Emp::new("Sales", "Male", 30, 1, 0).cells();
            cells.truncate(9);
            cells[2] = age;
            cells[8] = income;
            cells
        };
        let ds = Dataset::from_rows(
            columns,
            vec![
                row(CellValue::Integer(1), CellValue::Integer(10)),
                row(CellValue::Integer(2), CellValue::Null),
                row(CellValue::Integer(3), CellValue::Integer(30)),
                row(CellValue::Null, CellValue::Integer(99)),
                row(CellValue::Integer(5), CellValue::Integer(50)),
            ],
        );
        let cols = vec!["Age".to_string(), "MonthlyIncome".to_string()];
        let m = correlation_matrix(&FilteredView::full(&ds), &cols);
        assert!((m.get("Age", "MonthlyIncome").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_are_nan() {
        let ds = fixtures::dataset(&[Emp::new("Sales", "Male", 30, 1, 0)]);
        let cols = vec!["Age".to_string(), "YearsAtCompany".to_string()];
        let m = correlation_matrix(&FilteredView::full(&ds), &cols);
        assert_eq!(m.values[0][0], 1.0);
        assert!(m.values[0][1].is_nan());

        let mut criteria = FilterCriteria::default();
        criteria.set_range("Age", InclusiveRange::new(100.0, 110.0));
        let empty = correlation_matrix(&apply(&ds, &criteria), &cols);
        assert!(empty.values[0][0].is_nan());
        assert_eq!(pearson(&[(1.0, 2.0), (1.0, 3.0)]), None);
    }

    #[test]
    fn ols_recovers_line() {
        let points: Vec<(f64, f64)> = (0..10).map(|x| (x as f64, 3.0 + 2.0 * x as f64)).collect();
        let fit = ols_fit(&points).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 3.0).abs() < 1e-12);
        assert!((fit.at(20.0) - 43.0).abs() < 1e-9);
        assert_eq!(ols_fit(&[(1.0, 1.0), (1.0, 2.0)]), None);
        assert_eq!(ols_fit(&[(1.0, 1.0)]), None);
    }
}
