//! Everything the dashboard displays, computed in one synchronous pass.

use crate::analysis::correlation::{self, CorrelationMatrix, LineFit};
use crate::analysis::crosstab::{self, CrossTab};
use crate::analysis::describe::{self, ColumnSummary, SplitBoxStats};
use crate::analysis::grouped::{self, GroupedCounts, Histogram};
use crate::analysis::metrics::{self, AttritionSummary};
use crate::analysis::pivot::{self, PivotTable};
use crate::data::filter::{self, FilterCriteria, FilteredView};
use crate::data::model::Dataset;

/// Columns drawn as grouped bar charts (stayed vs. left per value).
pub const GROUPED_COLUMNS: [&str; 9] = [
    "Department",
    "Gender",
    "JobRole",
    "Education",
    "MaritalStatus",
    "OverTime",
    "JobSatisfaction",
    "EnvironmentSatisfaction",
    "NumCompaniesWorked",
];

/// Columns drawn as box plots split by attrition.
pub const BOX_COLUMNS: [&str; 4] = [
    "YearsAtCompany",
    "MonthlyIncome",
    "YearsSinceLastPromotion",
    "YearsInCurrentRole",
];

pub const DEFAULT_AGE_BINS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub age_bins: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            age_bins: DEFAULT_AGE_BINS,
        }
    }
}

/// Age vs. monthly income, one series per outcome with its own trendline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scatter {
    pub stayed: Vec<[f64; 2]>,
    pub left: Vec<[f64; 2]>,
    pub stayed_trend: Option<LineFit>,
    pub left_trend: Option<LineFit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    /// Dataset positions of the filtered rows, for the raw table.
    pub indices: Vec<usize>,
    pub attrition: AttritionSummary,
    pub grouped: Vec<GroupedCounts>,
    pub age_histogram: Histogram,
    pub boxes: Vec<SplitBoxStats>,
    pub scatter: Scatter,
    pub correlation: CorrelationMatrix,
    pub marital_crosstab: CrossTab,
    pub income_pivot: PivotTable,
    pub summary: Vec<ColumnSummary>,
    pub nulls: Vec<(String, usize)>,
}

impl ViewModel {
    pub fn row_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

pub fn render(dataset: &Dataset, criteria: &FilterCriteria) -> ViewModel {
    render_with(dataset, criteria, &RenderOptions::default())
}

/// Filter, then derive every displayed output from the resulting view.
pub fn render_with(dataset: &Dataset, criteria: &FilterCriteria, options: &RenderOptions) -> ViewModel {
    let view = filter::apply(dataset, criteria);
    log::debug!("render: {} of {} rows pass the filters", view.len(), dataset.len());
    let numeric = dataset.numeric_columns();

    ViewModel {
        attrition: metrics::attrition_summary(&view),
        grouped: GROUPED_COLUMNS
            .iter()
            .map(|c| grouped::grouped_counts(&view, c))
            .collect(),
        age_histogram: grouped::histogram(&view, "Age", options.age_bins),
        boxes: BOX_COLUMNS
            .iter()
            .map(|c| describe::box_by_attrition(&view, c))
            .collect(),
        scatter: scatter(&view),
        correlation: correlation::correlation_matrix(&view, &numeric),
        marital_crosstab: crosstab::crosstab(&view, "MaritalStatus"),
        income_pivot: pivot::pivot_mean(&view, "JobRole", "Department", "MonthlyIncome"),
        summary: describe::describe(&view, &numeric),
        nulls: describe::null_counts(&view),
        indices: view.indices().to_vec(),
    }
}

fn scatter(view: &FilteredView<'_>) -> Scatter {
    let ds = view.dataset();
    let (Some(attr), Some(age), Some(income)) = (
        ds.column_index(crate::data::loader::ATTRITION),
        ds.column_index("Age"),
        ds.column_index("MonthlyIncome"),
    ) else {
        return Scatter::default();
    };

    let mut out = Scatter::default();
    for record in view.records() {
        let (Some(x), Some(y)) = (record.get(age).as_f64(), record.get(income).as_f64()) else {
            continue;
        };
        match record.get(attr).as_attrition() {
            Some(true) => out.left.push([x, y]),
            Some(false) => out.stayed.push([x, y]),
            None => {}
        }
    }
    out.stayed_trend = trend(&out.stayed);
    out.left_trend = trend(&out.left);
    out
}

fn trend(points: &[[f64; 2]]) -> Option<LineFit> {
    let pairs: Vec<(f64, f64)> = points.iter().map(|p| (p[0], p[1])).collect();
    correlation::ols_fit(&pairs)
}
