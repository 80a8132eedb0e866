//! Preprocessing stages for cluster job scheduling data.
//!
//! This crate provides the stages of a feature-engineering pipeline:
//!
//! - **transformer**: the [`Transformer`] fit/transform trait and the [`Stage`] enum
//! - **stages**: encoding, missing-value removal, column selection, job labelling,
//!   timestamp coercion, lookup joins and derived features
//! - **config**: serde descriptions for building stages from JSON
//! - **error**: the [`TransformError`] taxonomy
//!
//! Stages never load or persist data and do not decide execution order; the
//! caller feeds each stage's output to the next.
//!
//! # Example
//!
//! ```ignore
//! use jobfeat_transform::{AssignJobs, CalculateFeatures, DateTimeConverter, Stage, Transformer};
//!
//! let stages: Vec<Stage> = vec![
//!     DateTimeConverter::new(["j_starttime", "j_endtime", "latest_update"]).into(),
//!     AssignJobs::new(["build", "test"]).into(),
//!     CalculateFeatures::new("j_endtime", "j_starttime").into(),
//! ];
//! for stage in &stages {
//!     df = stage.fit(&df).transform(&mut df)?;
//! }
//! ```

pub mod config;
pub mod error;
pub mod stages;
pub mod transformer;

pub use config::{LookupTables, StageSpec, build_stages, parse_stage_specs};
pub use error::{Result, TransformError};
pub use stages::{
    AssignJobs, Axis, CalculateFeatures, CategoricalEncoder, ColumnSelector,
    DEFAULT_JOB_SOURCE_COLUMN, DateTimeConverter, DropCols, DropNa, FEATURE_COLUMNS,
    JOB_NAME_COLUMN, Lookup, RIGHT_SUFFIX, UNASSIGNED_JOB, parse_timestamp,
};
pub use transformer::{Stage, Transformer};
