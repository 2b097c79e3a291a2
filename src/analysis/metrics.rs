use crate::data::filter::FilteredView;

/// Head-count behind the attrition rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttritionSummary {
    pub total: usize,
    pub attrited: usize,
}

impl AttritionSummary {
    /// Percentage of employees who left, `0.0` for an empty view.
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.attrited as f64 / self.total as f64 * 100.0
    }

    pub fn stayed(&self) -> usize {
        self.total - self.attrited
    }
}

pub fn attrition_summary(view: &FilteredView<'_>) -> AttritionSummary {
    let left_of = super::outcome(view);
    let attrited = view
        .records()
        .filter(|r| left_of(*r) == Some(true))
        .count();
    AttritionSummary {
        total: view.len(),
        attrited,
    }
}

/// `count(Attrition == 1) / count(all rows) * 100`.
pub fn attrition_rate(view: &FilteredView<'_>) -> f64 {
    attrition_summary(view).rate()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::{FilterCriteria, InclusiveRange, apply};
    use crate::data::fixtures;
    use crate::data::model::CellValue;

    #[test]
    fn sales_subset_rate() {
        let ds = fixtures::dataset(&fixtures::hundred_rows());
        let all = FilteredView::full(&ds);
        assert_eq!(
            attrition_summary(&all),
            AttritionSummary { total: 100, attrited: 30 }
        );
        assert!((attrition_rate(&all) - 30.0).abs() < 1e-9);

        let mut criteria = FilterCriteria::defaults(&ds);
        criteria.select("Department", [CellValue::String("Sales".into())].into());
        let sales = apply(&ds, &criteria);
        assert_eq!(sales.len(), 20);
        assert_eq!(format!("{:.2}", attrition_rate(&sales)), "40.00");
    }

    #[test]
    fn empty_view_rate_is_zero() {
        let ds = fixtures::dataset(&fixtures::hundred_rows());
        let mut criteria = FilterCriteria::defaults(&ds);
        criteria.set_range("Age", InclusiveRange::new(100.0, 110.0));
        let view = apply(&ds, &criteria);
        assert!(view.is_empty());
        assert_eq!(format!("{:.2}", attrition_rate(&view)), "0.00");

        criteria = FilterCriteria::defaults(&ds);
        criteria.select("Department", BTreeSet::new());
        let summary = attrition_summary(&apply(&ds, &criteria));
        assert_eq!(summary, AttritionSummary::default());
        assert_eq!(summary.stayed(), 0);
    }

    #[test]
    fn rate_stays_within_bounds() {
        let ds = fixtures::dataset(&fixtures::sample_rows());
        for dept in ["Sales", "Human Resources", "Research & Development"] {
            let mut criteria = FilterCriteria::default();
            criteria.select("Department", [CellValue::String(dept.into())].into());
            let view = apply(&ds, &criteria);
            let summary = attrition_summary(&view);
            let rate = summary.rate();
            assert!((0.0..=100.0).contains(&rate), "{dept}: {rate}");
            assert!((rate - 100.0 * summary.attrited as f64 / summary.total as f64).abs() < 1e-9);
        }
    }
}
