//! Derived job features.
//!
//! All arithmetic runs on `Float64`. Division by zero is left to IEEE
//! semantics: `x / 0` is ±inf and `0 / 0` is NaN.

use polars::prelude::*;

use super::require_columns;
use crate::error::{Result, TransformError};
use crate::transformer::Transformer;

const CORES_IN_USE: &str = "CoresInUse";
const AVAILABLE_CORES: &str = "AvailableCores";
const AVG_DURATION_MIN: &str = "avg_duration_min";
const TOTAL: &str = "Total";
const FINISHED: &str = "Finished";
const LATEST_UPDATE: &str = "latest_update";
const JOB_START_TIME: &str = "j_starttime";

const CORE_UTILIZATION: &str = "core_utilization";
const DURATION_MIN: &str = "duration_min";
const TASK_PROGRESS: &str = "task_progress";
const AVG_TASK_TIME: &str = "avg_task_time";
const BASE_PRED_MIN: &str = "base_pred_min";
const CURRENT_TASK_RUNTIME: &str = "current_task_runtime";
const RESIDUAL_TASK_TIME: &str = "residual_task_time";
const TIME_ELAPSED_MIN: &str = "time_elapsed_min";

const NUMERIC_COLUMNS: [&str; 5] = [
    CORES_IN_USE,
    AVAILABLE_CORES,
    AVG_DURATION_MIN,
    TOTAL,
    FINISHED,
];

/// Derived columns in the order they are appended.
pub const FEATURE_COLUMNS: [&str; 8] = [
    CORE_UTILIZATION,
    DURATION_MIN,
    TASK_PROGRESS,
    AVG_TASK_TIME,
    BASE_PRED_MIN,
    CURRENT_TASK_RUNTIME,
    RESIDUAL_TASK_TIME,
    TIME_ELAPSED_MIN,
];

const NANOS_PER_MINUTE: f64 = 60_000_000_000.0;

/// Append utilization, progress and timing features in place.
///
/// `duration_min` is measured between the configured end and start
/// timestamp columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculateFeatures {
    end_column: String,
    start_column: String,
}

impl CalculateFeatures {
    pub fn new(end_column: impl Into<String>, start_column: impl Into<String>) -> Self {
        Self {
            end_column: end_column.into(),
            start_column: start_column.into(),
        }
    }

    /// Build from an `[end, start]` pair.
    pub fn from_columns([end_column, start_column]: [String; 2]) -> Self {
        Self {
            end_column,
            start_column,
        }
    }

    pub fn end_column(&self) -> &str {
        &self.end_column
    }

    pub fn start_column(&self) -> &str {
        &self.start_column
    }

    fn timestamp_columns(&self) -> [&str; 4] {
        [
            &self.end_column,
            &self.start_column,
            LATEST_UPDATE,
            JOB_START_TIME,
        ]
    }

    fn required_columns(&self) -> [&str; 9] {
        [
            CORES_IN_USE,
            AVAILABLE_CORES,
            &self.end_column,
            &self.start_column,
            AVG_DURATION_MIN,
            TOTAL,
            FINISHED,
            LATEST_UPDATE,
            JOB_START_TIME,
        ]
    }
}

impl Transformer for CalculateFeatures {
    fn name(&self) -> &'static str {
        "calculate_features"
    }

    fn modifies_input(&self) -> bool {
        true
    }

    fn transform(&self, data: &mut DataFrame) -> Result<DataFrame> {
        require_columns(data, &self.required_columns())?;
        for name in NUMERIC_COLUMNS {
            check_dtype(data, name, "a numeric type", |dtype| {
                dtype.is_integer() || dtype.is_float()
            })?;
        }
        for name in self.timestamp_columns() {
            check_dtype(data, name, "a timestamp", |dtype| {
                matches!(dtype, DataType::Datetime(..) | DataType::Date)
            })?;
        }

        // Later expressions read columns added by earlier `with_columns` calls.
        let derived = data
            .clone()
            .lazy()
            .with_columns([
                (number(CORES_IN_USE) / (number(CORES_IN_USE) + number(AVAILABLE_CORES))
                    * lit(100.0))
                .alias(CORE_UTILIZATION),
                minutes_between(&self.end_column, &self.start_column).alias(DURATION_MIN),
                (number(FINISHED) / number(TOTAL) * lit(100.0)).alias(TASK_PROGRESS),
                (number(AVG_DURATION_MIN) / number(TOTAL)).alias(AVG_TASK_TIME),
            ])
            .with_columns([
                (col(AVG_TASK_TIME) * number(TOTAL)).alias(BASE_PRED_MIN),
                (col(AVG_TASK_TIME) * number(FINISHED)).alias(CURRENT_TASK_RUNTIME),
            ])
            .with_columns([
                (number(AVG_DURATION_MIN) - col(CURRENT_TASK_RUNTIME)).alias(RESIDUAL_TASK_TIME),
                minutes_between(LATEST_UPDATE, JOB_START_TIME).alias(TIME_ELAPSED_MIN),
            ])
            .collect()?;

        tracing::debug!(
            rows = derived.height(),
            features = FEATURE_COLUMNS.len(),
            "calculated job features"
        );
        *data = derived;
        Ok(data.clone())
    }
}

/// Fail unless `name` has an accepted dtype or is entirely null.
fn check_dtype(
    data: &DataFrame,
    name: &str,
    expected: &'static str,
    accepts: impl Fn(&DataType) -> bool,
) -> Result<()> {
    let dtype = data.column(name)?.dtype();
    if accepts(dtype) || matches!(dtype, DataType::Null) {
        Ok(())
    } else {
        Err(TransformError::UnexpectedType {
            column: name.to_string(),
            expected,
            found: dtype.to_string(),
        })
    }
}

fn number(name: &str) -> Expr {
    col(name).cast(DataType::Float64)
}

/// `end - start` in fractional minutes.
fn minutes_between(end: &str, start: &str) -> Expr {
    (epoch_nanos(end) - epoch_nanos(start)).cast(DataType::Float64) / lit(NANOS_PER_MINUTE)
}

fn epoch_nanos(name: &str) -> Expr {
    col(name)
        .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
        .cast(DataType::Int64)
}
