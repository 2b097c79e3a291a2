use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, Dataset, NULL_CELL, Record};

/// Categorical columns exposed as multi-select filters.
pub const CATEGORY_FILTERS: [&str; 2] = ["Department", "Gender"];

/// Numeric columns exposed as inclusive range filters.
pub const RANGE_FILTERS: [&str; 2] = ["Age", "YearsAtCompany"];

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclusiveRange {
    pub min: f64,
    pub max: f64,
}

impl InclusiveRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `NaN` is never contained.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// A conjunction of independent predicates.
///
/// * A column absent from both maps is unconstrained.
/// * A categorical entry passes rows whose value is in the set; an empty set passes nothing.
/// * A range entry passes rows whose numeric value lies inside the closed interval.
/// * `Null` (or non-numeric, for ranges) never passes a predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub categories: BTreeMap<String, BTreeSet<CellValue>>,
    pub ranges: BTreeMap<String, InclusiveRange>,
}

impl FilterCriteria {
    /// Every observed category selected, every range spanning the observed bounds.
    pub fn defaults(dataset: &Dataset) -> Self {
        let categories = CATEGORY_FILTERS
            .iter()
            .map(|col| {
                let all = dataset.unique_values.get(*col).cloned().unwrap_or_default();
                (col.to_string(), all)
            })
            .collect();
        let ranges = RANGE_FILTERS
            .iter()
            .filter_map(|col| {
                let (min, max) = dataset.numeric_bounds(col)?;
                Some((col.to_string(), InclusiveRange::new(min, max)))
            })
            .collect();
        Self { categories, ranges }
    }

    /// Replace the selection of a categorical column.
    pub fn select(&mut self, column: &str, values: BTreeSet<CellValue>) {
        self.categories.insert(column.to_string(), values);
    }

    /// Toggle a single value in a categorical column's selection.
    pub fn toggle(&mut self, column: &str, value: &CellValue) {
        let selected = self.categories.entry(column.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
    }

    pub fn set_range(&mut self, column: &str, range: InclusiveRange) {
        self.ranges.insert(column.to_string(), range);
    }

    /// Number of predicates evaluated per record.
    pub fn active_count(&self) -> usize {
        self.categories.len() + self.ranges.len()
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// The rows of a dataset that pass a set of criteria, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl PartialEq for FilteredView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.indices == other.indices
    }
}

impl<'a> FilteredView<'a> {
    /// View over every row of the dataset.
    pub fn full(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Positions of the visible rows inside the dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }

    /// Values of one column across the visible rows; `Null` for an unknown column.
    pub fn column(&self, name: &str) -> impl Iterator<Item = &'a CellValue> + '_ {
        let idx = self.dataset.column_index(name);
        self.records().map(move |r| match idx {
            Some(i) => r.get(i),
            None => &NULL_CELL,
        })
    }

    /// Narrow this view further. Applying the criteria that produced it is a no-op.
    pub fn apply(&self, criteria: &FilterCriteria) -> FilteredView<'a> {
        let predicates = Predicates::compile(self.dataset, criteria);
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| predicates.matches(&self.dataset.records[i]))
            .collect();
        FilteredView {
            dataset: self.dataset,
            indices,
        }
    }
}

/// Single pass over the dataset keeping rows that satisfy every predicate.
pub fn apply<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    let predicates = Predicates::compile(dataset, criteria);
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| predicates.matches(r))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}

// ---------------------------------------------------------------------------
// Compiled predicates: column names resolved to positions once per pass
// ---------------------------------------------------------------------------

struct Predicates<'c> {
    categories: Vec<(Option<usize>, &'c BTreeSet<CellValue>)>,
    ranges: Vec<(Option<usize>, InclusiveRange)>,
}

impl<'c> Predicates<'c> {
    fn compile(dataset: &Dataset, criteria: &'c FilterCriteria) -> Self {
        Self {
            categories: criteria
                .categories
                .iter()
                .map(|(col, set)| (dataset.column_index(col), set))
                .collect(),
            ranges: criteria
                .ranges
                .iter()
                .map(|(col, range)| (dataset.column_index(col), *range))
                .collect(),
        }
    }

    fn matches(&self, record: &Record) -> bool {
        let categories_ok = self.categories.iter().all(|(idx, selected)| {
            let Some(idx) = idx else { return false };
            let value = record.get(*idx);
            !value.is_null() && selected.contains(value)
        });
        categories_ok
            && self.ranges.iter().all(|(idx, range)| {
                idx.and_then(|i| record.get(i).as_f64())
                    .is_some_and(|v| range.contains(v))
            })
    }
}
