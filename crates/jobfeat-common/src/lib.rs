//! Shared utilities for jobfeat crates.
//!
//! - **polars**: `AnyValue` rendering and column presence checks
//! - **logging**: `tracing-subscriber` setup for applications embedding the stages

pub mod logging;
pub mod polars;

pub use self::polars::{any_to_string, format_numeric, has_column, missing_columns};
