use std::collections::BTreeMap;

use crate::data::filter::FilteredView;
use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Grouped counts: category value × attrition value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GroupCount {
    pub value: CellValue,
    pub stayed: usize,
    pub left: usize,
}

impl GroupCount {
    pub fn total(&self) -> usize {
        self.stayed + self.left
    }
}

/// Row counts per (value of `column`, attrition outcome), groups sorted by value.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedCounts {
    pub column: String,
    pub groups: Vec<GroupCount>,
}

/// Rows with a null category or an unreadable outcome are not counted.
pub fn grouped_counts(view: &FilteredView<'_>, column: &str) -> GroupedCounts {
    let left_of = super::outcome(view);
    let idx = view.dataset().column_index(column);
    let mut counts: BTreeMap<CellValue, (usize, usize)> = BTreeMap::new();

    for record in view.records() {
        let Some(value) = idx.map(|i| record.get(i)).filter(|v| !v.is_null()) else {
            continue;
        };
        let Some(left) = left_of(record) else {
            continue;
        };
        let entry = counts.entry(value.clone()).or_default();
        if left {
            entry.1 += 1;
        } else {
            entry.0 += 1;
        }
    }

    GroupedCounts {
        column: column.to_string(),
        groups: counts
            .into_iter()
            .map(|(value, (stayed, left))| GroupCount { value, stayed, left })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Histogram of a numeric column split by attrition
// ---------------------------------------------------------------------------

/// Equal-width bins over the view's observed range; the last bin includes its upper edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub column: String,
    /// `bins + 1` ascending edges; empty when the view has no numeric values.
    pub edges: Vec<f64>,
    pub stayed: Vec<usize>,
    pub left: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    pub fn bin_center(&self, bin: usize) -> f64 {
        (self.edges[bin] + self.edges[bin + 1]) / 2.0
    }
}

pub fn histogram(view: &FilteredView<'_>, column: &str, bins: usize) -> Histogram {
    let (stayed_vals, left_vals) = super::split_by_attrition(view, column);
    let bins = bins.max(1);

    let bounds = stayed_vals
        .iter()
        .chain(&left_vals)
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

    let Some((lo, hi)) = bounds else {
        return Histogram {
            column: column.to_string(),
            edges: Vec::new(),
            stayed: Vec::new(),
            left: Vec::new(),
        };
    };

    // A single distinct value still gets a bin of width one around it.
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let bin_of = |v: f64| (((v - lo) / width) as usize).min(bins - 1);
    let tally = |vals: &[f64]| {
        let mut counts = vec![0; bins];
        for &v in vals {
            counts[bin_of(v)] += 1;
        }
        counts
    };

    Histogram {
        column: column.to_string(),
        stayed: tally(&stayed_vals),
        left: tally(&left_vals),
        edges,
    }
}
