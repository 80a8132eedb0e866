//! Preprocessing stages for cluster job scheduling data.
//!
//! | Stage | Output | Operation |
//! |-------|--------|-----------|
//! | [`CategoricalEncoder`] | new frame | one-hot encode non-numeric, non-timestamp columns |
//! | [`DropNa`] | in place | drop rows (or columns) holding missing values |
//! | [`DropCols`] | in place | remove named columns |
//! | [`ColumnSelector`] | new frame | keep named columns, in order |
//! | [`AssignJobs`] | in place | label rows by critical job substring |
//! | [`DateTimeConverter`] | in place | coerce columns to timestamps |
//! | [`Lookup`] | new frame | left join value columns from a lookup table |
//! | [`CalculateFeatures`] | in place | derive utilization, progress and timing features |

mod assign_jobs;
mod columns;
mod datetime;
mod drop_na;
mod encode;
mod features;
mod lookup;

pub use assign_jobs::{AssignJobs, DEFAULT_JOB_SOURCE_COLUMN, JOB_NAME_COLUMN, UNASSIGNED_JOB};
pub use columns::{ColumnSelector, DropCols};
pub use datetime::{DateTimeConverter, parse_timestamp};
pub use drop_na::{Axis, DropNa};
pub use encode::CategoricalEncoder;
pub use features::{CalculateFeatures, FEATURE_COLUMNS};
pub use lookup::{Lookup, RIGHT_SUFFIX};

use polars::prelude::DataFrame;

use crate::error::{Result, TransformError};

/// Fail with `MissingColumns` unless every requested column is present.
pub(crate) fn require_columns<S: AsRef<str>>(df: &DataFrame, requested: &[S]) -> Result<()> {
    let columns = jobfeat_common::missing_columns(df, requested);
    if columns.is_empty() {
        Ok(())
    } else {
        Err(TransformError::MissingColumns { columns })
    }
}
