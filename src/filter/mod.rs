//! Filtering of decoded records
//!
//! [`FilterParams`] describe the analyst's choices, [`RecordFilter`] turns each
//! choice into a predicate, and [`apply_filters`] narrows a [`Dataset`] into a
//! [`FilteredView`] one category at a time.
//!
//! [`Dataset`]: crate::models::Dataset

pub mod core;
pub mod criteria;
pub mod options;
pub mod params;

pub use self::core::{FilteredView, apply_filters, apply_record_filters};
pub use criteria::{FilterCriteria, RecordFilter};
pub use options::{ALL_LABEL, OptionCategory, available_options, option_lists};
pub use params::{AgeRange, FilterCategory, FilterParams, Selection};
