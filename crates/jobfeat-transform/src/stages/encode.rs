//! One-hot encoding of categorical columns.
//!
//! Categories are derived from each input frame; nothing is remembered
//! between calls. Frames with different value sets therefore encode to
//! different schemas.

use std::collections::{BTreeSet, HashSet};

use polars::prelude::*;

use crate::error::{Result, TransformError};
use crate::transformer::Transformer;

/// Replace categorical columns with `{column}_{value}` indicator columns.
///
/// A column is categorical unless it is integer, floating point, or a
/// timestamp. The lexicographically first value of each column gets no
/// indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoricalEncoder;

impl CategoricalEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Column names [`Transformer::transform`] would produce for `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if a categorical column cannot be rendered as text.
    pub fn encoded_column_names(&self, data: &DataFrame) -> Result<Vec<String>> {
        let mut passthrough = Vec::new();
        let mut indicators = Vec::new();
        for column in data.get_columns() {
            if is_categorical(column.dtype()) {
                let text = column.cast(&DataType::String)?;
                indicators.extend(
                    categories(text.str()?)
                        .into_iter()
                        .skip(1)
                        .map(|value| indicator_name(column.name(), value)),
                );
            } else {
                passthrough.push(column.name().to_string());
            }
        }
        passthrough.extend(indicators);
        ensure_unique(passthrough.iter().map(String::as_str))?;
        Ok(passthrough)
    }
}

impl Transformer for CategoricalEncoder {
    fn name(&self) -> &'static str {
        "categorical_encoder"
    }

    fn modifies_input(&self) -> bool {
        false
    }

    fn transform(&self, data: &mut DataFrame) -> Result<DataFrame> {
        let mut passthrough: Vec<Column> = Vec::with_capacity(data.width());
        let mut indicators: Vec<Column> = Vec::new();
        let mut encoded = 0usize;

        for column in data.get_columns() {
            if !is_categorical(column.dtype()) {
                passthrough.push(column.clone());
                continue;
            }
            encoded += 1;
            let created = indicator_columns(column)?;
            tracing::trace!(
                column = %column.name(),
                indicators = created.len(),
                "encoded categorical column"
            );
            indicators.extend(created);
        }

        tracing::debug!(
            encoded,
            indicators = indicators.len(),
            "one-hot encoded categorical columns"
        );
        passthrough.extend(indicators);
        ensure_unique(passthrough.iter().map(|c| c.name().as_str()))?;
        // Keeps the row count when every column was encoded away.
        Ok(DataFrame::new_with_height(data.height(), passthrough)?)
    }
}

fn is_categorical(dtype: &DataType) -> bool {
    !(dtype.is_integer()
        || dtype.is_float()
        || matches!(dtype, DataType::Datetime(..) | DataType::Date))
}

/// Distinct non-null values in lexicographic order.
fn categories(values: &StringChunked) -> BTreeSet<&str> {
    values.into_iter().flatten().collect()
}

fn indicator_name(column: &str, value: &str) -> String {
    format!("{column}_{value}")
}

fn ensure_unique<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(TransformError::DuplicateColumn {
                column: name.to_string(),
            });
        }
    }
    Ok(())
}

/// One `Int32` 0/1 column per category, skipping the first.
fn indicator_columns(column: &Column) -> Result<Vec<Column>> {
    let text = column.cast(&DataType::String)?;
    let values = text.str()?;
    let columns = categories(values)
        .into_iter()
        .skip(1)
        .map(|category| {
            let flags: Vec<i32> = values
                .into_iter()
                .map(|value| i32::from(value == Some(category)))
                .collect();
            Column::new(indicator_name(column.name(), category).into(), flags)
        })
        .collect();
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_categorical() {
        assert!(is_categorical(&DataType::String));
        assert!(is_categorical(&DataType::Boolean));
        assert!(!is_categorical(&DataType::Int64));
        assert!(!is_categorical(&DataType::Float32));
        assert!(!is_categorical(&DataType::Date));
        assert!(!is_categorical(&DataType::Datetime(
            TimeUnit::Nanoseconds,
            None
        )));
    }

    #[test]
    fn test_categories_are_sorted_and_distinct() {
        let values = StringChunked::new("q".into(), [Some("gpu"), None, Some("cpu"), Some("gpu")]);
        let found: Vec<&str> = categories(&values).into_iter().collect();
        assert_eq!(found, vec!["cpu", "gpu"]);
    }
}
