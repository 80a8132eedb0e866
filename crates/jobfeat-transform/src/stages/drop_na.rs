//! Missing-value removal.
//!
//! A value is missing when it is null, or NaN in a floating-point column.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::require_columns;
use crate::error::Result;
use crate::transformer::Transformer;

/// Which dimension [`DropNa`] removes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Drop rows holding a missing value in any considered column.
    #[default]
    Rows,
    /// Drop considered columns holding any missing value.
    Columns,
}

/// Drop rows (or columns) containing missing values, in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropNa {
    columns: Option<Vec<String>>,
    axis: Axis,
}

impl DropNa {
    /// Consider every column and drop rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the check to these columns.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    fn considered_columns(&self, data: &DataFrame) -> Result<Vec<String>> {
        match &self.columns {
            Some(columns) => {
                require_columns(data, columns)?;
                Ok(columns.clone())
            }
            None => Ok(data
                .get_columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect()),
        }
    }
}

impl Transformer for DropNa {
    fn name(&self) -> &'static str {
        "drop_na"
    }

    fn modifies_input(&self) -> bool {
        true
    }

    fn transform(&self, data: &mut DataFrame) -> Result<DataFrame> {
        let considered = self.considered_columns(data)?;
        match self.axis {
            Axis::Rows => {
                let mut keep = vec![true; data.height()];
                for name in &considered {
                    let missing = missing_mask(data.column(name)?)?;
                    for (keep, missing) in keep.iter_mut().zip(missing) {
                        *keep &= !missing;
                    }
                }
                let dropped = keep.iter().filter(|k| !**k).count();
                if dropped > 0 {
                    let mask = BooleanChunked::new("keep".into(), keep);
                    *data = data.filter(&mask)?;
                }
                tracing::debug!(dropped, remaining = data.height(), "dropped rows");
            }
            Axis::Columns => {
                let mut dropped = Vec::new();
                for name in &considered {
                    // A repeated name in the subset may already be gone.
                    let Ok(column) = data.column(name) else {
                        continue;
                    };
                    if missing_mask(column)?.into_iter().any(|m| m) {
                        data.drop_in_place(name)?;
                        dropped.push(name.as_str());
                    }
                }
                tracing::debug!(?dropped, "dropped columns");
            }
        }
        Ok(data.clone())
    }
}

/// Per-row missing flags for one column.
fn missing_mask(column: &Column) -> Result<Vec<bool>> {
    let nulls = column.is_null();
    let mut mask: Vec<bool> = nulls.into_iter().map(|v| v.unwrap_or(false)).collect();
    if column.dtype().is_float() {
        let floats = column.cast(&DataType::Float64)?;
        for (missing, value) in mask.iter_mut().zip(floats.f64()?) {
            if value.is_some_and(f64::is_nan) {
                *missing = true;
            }
        }
    }
    Ok(mask)
}
