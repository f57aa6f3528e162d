//! CSV and JSON export of report tables.

use polars::prelude::*;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// DataFrame error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] PolarsError),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,
    /// Compact JSON format.
    Json,
    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// File extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Write a report table to `path` in `format`.
pub fn write_table(df: &DataFrame, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => write_csv(df, path),
        ExportFormat::Json => write_json(df, path, false),
        ExportFormat::PrettyJson => write_json(df, path, true),
    }
}

fn write_csv(df: &DataFrame, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(df.get_column_names().iter().map(|name| name.as_str()))?;

    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let rendered = column.cast(&DataType::String)?;
        columns.push(rendered.str()?.clone());
    }
    for row in 0..df.height() {
        writer.write_record(columns.iter().map(|column| column.get(row).unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(df: &DataFrame, path: &Path, pretty: bool) -> Result<(), ExportError> {
    let rows = rows_to_json(df)?;
    let text = if pretty {
        serde_json::to_string_pretty(&rows)?
    } else {
        serde_json::to_string(&rows)?
    };
    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

/// One JSON object per row; numeric columns stay numbers, everything else
/// exports through its string representation.
fn rows_to_json(df: &DataFrame) -> Result<Vec<Map<String, Value>>, ExportError> {
    enum Values {
        Float(Vec<Option<f64>>),
        Int(Vec<Option<i64>>),
        Text(Vec<Option<String>>),
    }

    let mut columns: Vec<(String, Values)> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let name = column.name().to_string();
        let values = match column.dtype() {
            DataType::Float64 => Values::Float(column.f64()?.into_iter().collect()),
            DataType::Int32 => {
                Values::Int(column.i32()?.into_iter().map(|v| v.map(i64::from)).collect())
            }
            DataType::Int64 => Values::Int(column.i64()?.into_iter().collect()),
            _ => {
                let rendered = column.cast(&DataType::String)?;
                Values::Text(
                    rendered
                        .str()?
                        .into_iter()
                        .map(|v| v.map(str::to_string))
                        .collect(),
                )
            }
        };
        columns.push((name, values));
    }

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let mut row = Map::new();
        for (name, values) in &columns {
            let value = match values {
                Values::Float(v) => v[i].map_or(Value::Null, |x| serde_json::json!(x)),
                Values::Int(v) => v[i].map_or(Value::Null, |x| serde_json::json!(x)),
                Values::Text(v) => v[i].clone().map_or(Value::Null, Value::String),
            };
            row.insert(name.clone(), value);
        }
        rows.push(row);
    }
    Ok(rows)
}
