//! Timestamp coercion.
//!
//! Converted columns are `Datetime(ns)` without a time zone. Text is parsed
//! against a fixed list of common layouts; integers are read as nanoseconds
//! since the Unix epoch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;

use super::require_columns;
use crate::error::{Result, TransformError};
use crate::transformer::Transformer;

const TIMESTAMP: DataType = DataType::Datetime(TimeUnit::Nanoseconds, None);

const DATETIME_FORMATS: [&str; 15] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y%m%d%H%M%S",
];

const DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%d/%m/%Y", // European first, as in the datetime list
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

/// Parse a timestamp from text, or `None` if no supported layout matches.
///
/// Offsets in RFC 3339 input are normalized to UTC. Partial dates
/// (`YYYY-MM`, `YYYY`) resolve to the first day of the period.
///
/// # Examples
///
/// ```
/// use jobfeat_transform::parse_timestamp;
///
/// let ts = parse_timestamp("2024-03-01 08:15:00").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-01 08:15:00");
/// assert_eq!(parse_timestamp("2024-03").unwrap().to_string(), "2024-03-01 00:00:00");
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .or_else(|| parse_partial_date(value).map(|date| date.and_time(NaiveTime::MIN)))
}

/// `YYYY-MM` or `YYYY`.
fn parse_partial_date(value: &str) -> Option<NaiveDate> {
    match value.len() {
        7 if value.as_bytes().get(4) == Some(&b'-') => {
            let year = value.get(0..4)?.parse().ok()?;
            let month = value.get(5..7)?.parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, 1)
        }
        4 if value.bytes().all(|b| b.is_ascii_digit()) => {
            NaiveDate::from_ymd_opt(value.parse().ok()?, 1, 1)
        }
        _ => None,
    }
}

/// Coerce the named columns to timestamps in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeConverter {
    columns: Vec<String>,
}

impl DateTimeConverter {
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

impl Transformer for DateTimeConverter {
    fn name(&self) -> &'static str {
        "date_time_converter"
    }

    fn modifies_input(&self) -> bool {
        true
    }

    fn transform(&self, data: &mut DataFrame) -> Result<DataFrame> {
        require_columns(data, &self.columns)?;
        for name in &self.columns {
            let converted = convert_column(data.column(name)?)?;
            data.with_column(converted)?;
        }
        Ok(data.clone())
    }
}

fn convert_column(column: &Column) -> Result<Column> {
    match column.dtype() {
        DataType::String => parse_text_column(column.name(), column.str()?),
        DataType::Datetime(..) | DataType::Date => Ok(column.cast(&TIMESTAMP)?),
        dtype if dtype.is_integer() => Ok(column.cast(&TIMESTAMP)?),
        other => Err(TransformError::TypeCoercion {
            column: column.name().to_string(),
            reason: format!("unsupported type {other}"),
        }),
    }
}

fn parse_text_column(name: &PlSmallStr, values: &StringChunked) -> Result<Column> {
    let mut nanos: Vec<Option<i64>> = Vec::with_capacity(values.len());
    for (row, value) in values.into_iter().enumerate() {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            nanos.push(None);
            continue;
        };
        let parsed = parse_timestamp(value).and_then(|ts| ts.and_utc().timestamp_nanos_opt());
        let Some(parsed) = parsed else {
            return Err(TransformError::TypeCoercion {
                column: name.to_string(),
                reason: format!("unparseable value '{value}' at row {row}"),
            });
        };
        nanos.push(Some(parsed));
    }
    tracing::trace!(column = %name, rows = nanos.len(), "parsed timestamps");
    let timestamps = Int64Chunked::new(name.clone(), nanos).into_datetime(TimeUnit::Nanoseconds, None);
    Ok(timestamps.into_series().into_column())
}
