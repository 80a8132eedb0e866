//! Left join of value columns from a lookup table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use jobfeat_common::{any_to_string, has_column, missing_columns};
use polars::prelude::*;

use super::require_columns;
use crate::error::{Result, TransformError};
use crate::transformer::Transformer;

/// Suffix appended to pulled columns whose name already exists.
///
/// Applied repeatedly, so `score` lands in `score_right_right` when both
/// `score` and `score_right` are taken.
pub const RIGHT_SUFFIX: &str = "_right";

/// Pull value columns from a lookup table, matching on a shared key column.
///
/// Every row of the primary frame is kept; rows without a matching key get
/// nulls. When the lookup table repeats a key, its first row is used.
#[derive(Debug, Clone)]
pub struct Lookup {
    table: DataFrame,
    join: String,
    columns: Vec<String>,
}

impl Lookup {
    pub fn new<I, S>(table: DataFrame, join: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table,
            join: join.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn join_column(&self) -> &str {
        &self.join
    }

    pub fn value_columns(&self) -> &[String] {
        &self.columns
    }

    fn validate(&self, data: &DataFrame) -> Result<()> {
        if self.columns.is_empty() {
            return Err(TransformError::InvalidConfig {
                stage: "lookup",
                reason: "at least one value column is required".to_string(),
            });
        }
        require_columns(data, std::slice::from_ref(&self.join))?;
        let mut wanted = vec![self.join.clone()];
        wanted.extend(self.columns.iter().cloned());
        let columns = missing_columns(&self.table, &wanted);
        if !columns.is_empty() {
            return Err(TransformError::MissingLookupColumns { columns });
        }
        Ok(())
    }

    /// Row position of the first occurrence of each rendered key.
    fn key_positions(&self) -> Result<HashMap<String, IdxSize>> {
        let keys = self.table.column(&self.join)?;
        let mut positions = HashMap::with_capacity(keys.len());
        let mut duplicates = 0usize;
        for idx in 0..keys.len() {
            let key = any_to_string(keys.get(idx)?);
            if key.is_empty() {
                continue;
            }
            match positions.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(idx as IdxSize);
                }
                Entry::Occupied(_) => duplicates += 1,
            }
        }
        if duplicates > 0 {
            tracing::warn!(
                join = %self.join,
                duplicates,
                "lookup table repeats keys; using first occurrence"
            );
        }
        Ok(positions)
    }
}

impl Transformer for Lookup {
    fn name(&self) -> &'static str {
        "lookup"
    }

    fn modifies_input(&self) -> bool {
        false
    }

    fn transform(&self, data: &mut DataFrame) -> Result<DataFrame> {
        self.validate(data)?;
        let positions = self.key_positions()?;

        let keys = data.column(&self.join)?;
        let mut indices: Vec<Option<IdxSize>> = Vec::with_capacity(keys.len());
        for idx in 0..keys.len() {
            let key = any_to_string(keys.get(idx)?);
            indices.push(positions.get(&key).copied());
        }
        let unmatched = indices.iter().filter(|i| i.is_none()).count();
        let take = IdxCa::new("lookup_idx".into(), indices);

        let mut joined = data.clone();
        for name in &self.columns {
            let target = free_name(&joined, name);
            let values = self
                .table
                .column(name)?
                .as_materialized_series()
                .take(&take)?
                .with_name(target.into());
            joined.with_column(values)?;
        }

        tracing::debug!(
            join = %self.join,
            rows = joined.height(),
            unmatched,
            "joined lookup columns"
        );
        Ok(joined)
    }
}

/// `name`, suffixed with [`RIGHT_SUFFIX`] until it names no existing column.
fn free_name(data: &DataFrame, name: &str) -> String {
    let mut target = name.to_string();
    while has_column(data, &target) {
        target.push_str(RIGHT_SUFFIX);
    }
    target
}
