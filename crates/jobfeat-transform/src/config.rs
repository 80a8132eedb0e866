//! Serializable stage descriptions.
//!
//! A pipeline can be described as JSON and turned into [`Stage`]s once the
//! caller has loaded the lookup tables it references:
//!
//! ```json
//! [
//!   { "stage": "date_time_converter", "columns": ["j_starttime", "j_endtime"] },
//!   { "stage": "assign_jobs", "critical_jobs": ["build", "test"] },
//!   { "stage": "lookup", "table": "durations", "join": "job_name", "columns": ["avg_duration_min"] },
//!   { "stage": "calculate_features", "columns": ["j_endtime", "j_starttime"] },
//!   { "stage": "drop_na" }
//! ]
//! ```

use std::collections::HashMap;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};
use crate::stages::{
    AssignJobs, Axis, CalculateFeatures, CategoricalEncoder, ColumnSelector,
    DEFAULT_JOB_SOURCE_COLUMN, DateTimeConverter, DropCols, DropNa, Lookup,
};
use crate::transformer::Stage;

/// Lookup tables by name, supplied by the caller.
pub type LookupTables = HashMap<String, DataFrame>;

/// Description of one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageSpec {
    CategoricalEncoder,
    DropNa {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
        #[serde(default)]
        axis: Axis,
    },
    DropCols {
        columns: Vec<String>,
    },
    ColumnSelector {
        columns: Vec<String>,
    },
    AssignJobs {
        critical_jobs: Vec<String>,
        #[serde(default = "default_job_source")]
        column: String,
    },
    DateTimeConverter {
        columns: Vec<String>,
    },
    Lookup {
        /// Key into [`LookupTables`].
        table: String,
        join: String,
        columns: Vec<String>,
    },
    CalculateFeatures {
        /// `[end, start]` timestamp columns for `duration_min`.
        columns: [String; 2],
    },
}

fn default_job_source() -> String {
    DEFAULT_JOB_SOURCE_COLUMN.to_string()
}

impl StageSpec {
    /// Construct the described stage.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnknownLookupTable`] if a lookup stage names
    /// a table missing from `tables`.
    pub fn build(self, tables: &LookupTables) -> Result<Stage> {
        let stage: Stage = match self {
            Self::CategoricalEncoder => CategoricalEncoder::new().into(),
            Self::DropNa { columns, axis } => {
                let stage = DropNa::new().with_axis(axis);
                let stage = match columns {
                    Some(columns) => stage.with_columns(columns),
                    None => stage,
                };
                stage.into()
            }
            Self::DropCols { columns } => DropCols::new(columns).into(),
            Self::ColumnSelector { columns } => ColumnSelector::new(columns).into(),
            Self::AssignJobs {
                critical_jobs,
                column,
            } => AssignJobs::new(critical_jobs).with_column(column).into(),
            Self::DateTimeConverter { columns } => DateTimeConverter::new(columns).into(),
            Self::Lookup {
                table,
                join,
                columns,
            } => {
                let Some(lookup) = tables.get(&table) else {
                    return Err(TransformError::UnknownLookupTable { name: table });
                };
                Lookup::new(lookup.clone(), join, columns).into()
            }
            Self::CalculateFeatures { columns } => CalculateFeatures::from_columns(columns).into(),
        };
        Ok(stage)
    }
}

/// Parse a JSON array of stage descriptions.
///
/// # Errors
///
/// Returns [`TransformError::Config`] if the JSON is malformed or names an
/// unknown stage.
pub fn parse_stage_specs(json: &str) -> Result<Vec<StageSpec>> {
    Ok(serde_json::from_str(json)?)
}

/// Build every described stage, preserving order.
///
/// # Errors
///
/// Fails on the first spec that cannot be built.
pub fn build_stages(specs: Vec<StageSpec>, tables: &LookupTables) -> Result<Vec<Stage>> {
    let stages = specs
        .into_iter()
        .map(|spec| spec.build(tables))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(stages = stages.len(), "built pipeline stages");
    Ok(stages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_in() {
        let specs = parse_stage_specs(
            r#"[{"stage": "drop_na"}, {"stage": "assign_jobs", "critical_jobs": ["build"]}]"#,
        )
        .unwrap();
        assert_eq!(
            specs,
            vec![
                StageSpec::DropNa {
                    columns: None,
                    axis: Axis::Rows
                },
                StageSpec::AssignJobs {
                    critical_jobs: vec!["build".to_string()],
                    column: "Name".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_spec_serializes_with_tag() {
        let spec = StageSpec::DropCols {
            columns: vec!["Queue".to_string()],
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"stage":"drop_cols","columns":["Queue"]}"#);
    }
}
