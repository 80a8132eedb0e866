//! Critical job labelling.

use polars::prelude::*;

use super::require_columns;
use crate::error::Result;
use crate::transformer::Transformer;

/// Column the job label is written to.
pub const JOB_NAME_COLUMN: &str = "job_name";

/// Label for rows matching no critical job.
pub const UNASSIGNED_JOB: &str = "NaN";

/// Column searched for critical job names unless configured otherwise.
pub const DEFAULT_JOB_SOURCE_COLUMN: &str = "Name";

/// Label rows with the critical job whose name their source text contains.
///
/// Jobs are checked in list order and a later match overwrites an earlier
/// one, so with `["build", "build-test"]` a row named `nightly-build-test`
/// ends up labelled `build-test`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignJobs {
    critical_jobs: Vec<String>,
    column: String,
}

impl AssignJobs {
    pub fn new<I, S>(critical_jobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            critical_jobs: critical_jobs.into_iter().map(Into::into).collect(),
            column: DEFAULT_JOB_SOURCE_COLUMN.to_string(),
        }
    }

    /// Search `column` instead of [`DEFAULT_JOB_SOURCE_COLUMN`].
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    pub fn critical_jobs(&self) -> &[String] {
        &self.critical_jobs
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl Transformer for AssignJobs {
    fn name(&self) -> &'static str {
        "assign_jobs"
    }

    fn modifies_input(&self) -> bool {
        true
    }

    fn transform(&self, data: &mut DataFrame) -> Result<DataFrame> {
        require_columns(data, std::slice::from_ref(&self.column))?;

        let source = data.column(&self.column)?.cast(&DataType::String)?;
        let names = source.str()?;
        let mut labels: Vec<&str> = vec![UNASSIGNED_JOB; data.height()];

        for job in &self.critical_jobs {
            let mut matched = 0usize;
            for (label, name) in labels.iter_mut().zip(names) {
                if name.is_some_and(|name| name.contains(job.as_str())) {
                    *label = job.as_str();
                    matched += 1;
                }
            }
            tracing::debug!(job = %job, matched, "assigned critical job");
        }

        data.with_column(Column::new(JOB_NAME_COLUMN.into(), labels))?;
        Ok(data.clone())
    }
}
