//! Column removal and selection.

use polars::prelude::DataFrame;

use super::require_columns;
use crate::error::Result;
use crate::transformer::Transformer;

/// Remove the named columns in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropCols {
    columns: Vec<String>,
}

impl DropCols {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Transformer for DropCols {
    fn name(&self) -> &'static str {
        "drop_cols"
    }

    fn modifies_input(&self) -> bool {
        true
    }

    /// Nothing is dropped unless every named column is present.
    fn transform(&self, data: &mut DataFrame) -> Result<DataFrame> {
        require_columns(data, &self.columns)?;
        for name in &self.columns {
            // Repeated names were already removed on their first occurrence.
            if jobfeat_common::has_column(data, name) {
                data.drop_in_place(name)?;
            }
        }
        tracing::debug!(dropped = ?self.columns, "dropped columns");
        Ok(data.clone())
    }
}

/// Project the frame onto the named columns, in the requested order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelector {
    columns: Vec<String>,
}

impl ColumnSelector {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Transformer for ColumnSelector {
    fn name(&self) -> &'static str {
        "column_selector"
    }

    fn modifies_input(&self) -> bool {
        false
    }

    fn transform(&self, data: &mut DataFrame) -> Result<DataFrame> {
        require_columns(data, &self.columns)?;
        let selected = data.select(self.columns.iter().map(String::as_str))?;
        Ok(selected)
    }
}
