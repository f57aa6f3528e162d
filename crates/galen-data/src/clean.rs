//! Cell-level cleaning: numeric coercion and date parsing.

use crate::error::{DataError, Result};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Expected date format in the sales source.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Policy for cells that fail numeric coercion.
///
/// Missing (empty) cells become zero under both policies; a cell with
/// content that is not a number is the configurable case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoercePolicy {
    /// Replace non-numeric cells with zero and keep the row. The dashboard
    /// default: anomalies are absorbed locally, no row is dropped.
    #[default]
    CoerceOrZero,
    /// Fail the integration on the first non-numeric cell.
    CoerceOrFail,
}

/// Days from the Unix epoch to `date`; the physical representation of the
/// polars `Date` dtype.
pub(crate) fn days_from_epoch(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch");
    (date - epoch).num_days() as i32
}

/// Parse a Utf8 date column into polars `Date`, also deriving the
/// month-bucket (`YYYY-MM`) and year columns.
///
/// Unparsable dates abort with [`DataError::UnparsableDate`]; temporal
/// fields are never nulled out.
pub(crate) fn parse_date_column(
    df: &DataFrame,
    table: &'static str,
    column: &str,
) -> Result<(Column, Column, Column)> {
    let values = df.column(column)?.str()?;
    let mut days = Vec::with_capacity(values.len());
    let mut months = Vec::with_capacity(values.len());
    let mut years = Vec::with_capacity(values.len());

    for (row, value) in values.into_iter().enumerate() {
        let raw = value.unwrap_or("");
        let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
            DataError::UnparsableDate {
                table,
                row,
                value: raw.to_string(),
            }
        })?;
        days.push(days_from_epoch(date));
        months.push(format!("{:04}-{:02}", date.year(), date.month()));
        years.push(date.year());
    }

    let date = Series::new(column.into(), days)
        .cast(&DataType::Date)?
        .into();
    let month = Series::new("Month".into(), months).into();
    let year = Series::new("Year".into(), years).into();
    Ok((date, month, year))
}

/// Coerce a Utf8 column to `f64` under `policy`.
pub(crate) fn coerce_numeric_column(
    df: &DataFrame,
    table: &'static str,
    column: &str,
    policy: CoercePolicy,
) -> Result<Column> {
    let values = df.column(column)?.str()?;
    let mut out = Vec::with_capacity(values.len());

    for (row, value) in values.into_iter().enumerate() {
        let raw = value.unwrap_or("").trim();
        if raw.is_empty() {
            out.push(0.0);
            continue;
        }
        match raw.parse::<f64>() {
            Ok(parsed) => out.push(parsed),
            Err(_) => match policy {
                CoercePolicy::CoerceOrZero => {
                    warn!(table, column, row, value = raw, "non-numeric cell coerced to zero");
                    out.push(0.0);
                }
                CoercePolicy::CoerceOrFail => {
                    return Err(DataError::MalformedNumber {
                        table,
                        column: column.to_string(),
                        row,
                        value: raw.to_string(),
                    });
                }
            },
        }
    }

    Ok(Series::new(column.into(), out).into())
}
