//! Applying filters to a dataset
//!
//! Filters are applied one after another, each narrowing the rows left by the
//! previous one. The result is a [`FilteredView`]: row indices into the unchanged
//! dataset, in their original order.

use log::debug;

use crate::filter::criteria::{FilterCriteria, RecordFilter};
use crate::filter::params::FilterParams;
use crate::models::record::{Dataset, Record};

/// A read-only subset of a dataset
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over every row
    #[must_use]
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            rows: (0..dataset.len()).collect(),
        }
    }

    /// Narrow the view to rows meeting `filter`
    pub fn retain(&mut self, filter: &RecordFilter) {
        let dataset = self.dataset;
        self.rows.retain(|&row| filter.meets_criteria(&dataset[row]));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows in the underlying dataset
    #[must_use]
    pub fn dataset_len(&self) -> usize {
        self.dataset.len()
    }

    #[must_use]
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Dataset positions of the rows in this view, ascending
    #[must_use]
    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    /// Records in dataset order
    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset = self.dataset;
        self.rows.iter().map(move |&row| &dataset[row])
    }
}

/// Apply every filter in `filters`, in order, to the whole dataset
#[must_use]
pub fn apply_record_filters<'a>(dataset: &'a Dataset, filters: &[RecordFilter]) -> FilteredView<'a> {
    let mut view = FilteredView::all(dataset);

    for filter in filters {
        if view.is_empty() {
            break;
        }
        view.retain(filter);
        debug!("{:?} left {} of {} rows", filter.category(), view.len(), dataset.len());
    }

    view
}

/// Build the filtered view described by `params`
#[must_use]
pub fn apply_filters<'a>(dataset: &'a Dataset, params: &FilterParams) -> FilteredView<'a> {
    apply_record_filters(dataset, &params.to_filters())
}
