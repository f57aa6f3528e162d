//! All-or-nothing loading of the raw CSV sources.

use crate::error::{DataError, Result};
use crate::schema::{self, SourceSchema};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// The five raw tables, loaded verbatim.
///
/// Every column is kept as Utf8; type coercion happens in the integrator.
#[derive(Debug, Clone)]
pub struct RawTables {
    /// Distributor master.
    pub distributors: DataFrame,
    /// Inventory snapshot.
    pub inventory: DataFrame,
    /// Product master.
    pub products: DataFrame,
    /// Regional targets.
    pub targets: DataFrame,
    /// Sales transactions.
    pub sales: DataFrame,
}

/// Load all five sources from `dir`.
///
/// The load is all-or-nothing: if any expected file is absent the whole call
/// fails with [`DataError::MissingSource`] listing every missing file, so
/// consumers see either a fully populated set of tables or nothing. Headers
/// are validated against the schema catalog and dimension keys are checked
/// for uniqueness; cell values are not interpreted at this stage.
pub fn load_dir(dir: &Path) -> Result<RawTables> {
    let missing: Vec<String> = schema::SOURCES
        .iter()
        .filter(|source| !dir.join(source.file).is_file())
        .map(|source| source.file.to_string())
        .collect();
    if !missing.is_empty() {
        for file in &missing {
            warn!(file = %file, dir = %dir.display(), "source file not found");
        }
        return Err(DataError::MissingSource {
            dir: dir.to_path_buf(),
            files: missing,
        });
    }

    Ok(RawTables {
        distributors: read_source(dir, &schema::DISTRIBUTORS)?,
        inventory: read_source(dir, &schema::INVENTORY)?,
        products: read_source(dir, &schema::PRODUCTS)?,
        targets: read_source(dir, &schema::TARGETS)?,
        sales: read_source(dir, &schema::SALES)?,
    })
}

/// Read a single CSV source into an all-string DataFrame.
fn read_source(dir: &Path, source: &SourceSchema) -> Result<DataFrame> {
    let path = dir.join(source.file);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(&path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    for column in source.required_columns {
        if !headers.iter().any(|header| header == column) {
            return Err(DataError::MissingColumn {
                table: source.name,
                column: (*column).to_string(),
            });
        }
    }

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (i, cell) in record.iter().enumerate() {
            columns[i].push(cell.to_string());
        }
    }

    let df = DataFrame::new(
        headers
            .iter()
            .zip(columns)
            .map(|(name, values)| Series::new(name.as_str().into(), values).into())
            .collect::<Vec<Column>>(),
    )?;

    if let Some(key) = source.unique_key {
        check_unique(&df, source.name, key)?;
    }

    debug!(table = source.name, rows = df.height(), "loaded source");
    Ok(df)
}

/// Reject a dimension table whose key column holds a duplicate value.
fn check_unique(df: &DataFrame, table: &'static str, column: &'static str) -> Result<()> {
    let values = df.column(column)?.str()?;
    let mut seen = HashSet::with_capacity(values.len());
    for value in values.into_iter().flatten() {
        if !seen.insert(value) {
            return Err(DataError::DuplicateKey {
                table,
                column,
                key: value.to_string(),
            });
        }
    }
    Ok(())
}
