//! Inventory status and regional target attainment.

use polars::prelude::*;
use serde::Serialize;

/// Inventory rows whose stock level is below their reorder level.
pub fn low_stock(inventory: &DataFrame) -> PolarsResult<DataFrame> {
    inventory
        .clone()
        .lazy()
        .filter(col("StockLevel").lt(col("ReorderLevel")))
        .select([
            col("ProductName"),
            col("StockLevel"),
            col("ReorderLevel"),
            col("TherapeuticClass"),
        ])
        .collect()
}

/// Distribution summary of stock levels across all inventory rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSummary {
    /// Number of inventory rows.
    pub skus: usize,
    /// Smallest stock level.
    pub min: f64,
    /// Mean stock level.
    pub mean: f64,
    /// Largest stock level.
    pub max: f64,
}

impl StockSummary {
    /// Compute the summary over an enriched inventory table.
    pub fn compute(inventory: &DataFrame) -> PolarsResult<Self> {
        let stock = inventory.column("StockLevel")?.f64()?;
        Ok(Self {
            skus: inventory.height(),
            min: stock.min().unwrap_or(0.0),
            mean: stock.mean().unwrap_or(0.0),
            max: stock.max().unwrap_or(0.0),
        })
    }

    /// Render the summary as a small ASCII block.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("{:<16} {:>12}\n", "SKUs", self.skus));
        output.push_str(&format!("{:<16} {:>12.1}\n", "Min Stock", self.min));
        output.push_str(&format!("{:<16} {:>12.1}\n", "Mean Stock", self.mean));
        output.push_str(&format!("{:<16} {:>12.1}\n", "Max Stock", self.max));
        output
    }
}

/// Mean achievement percent per region, or `None` when the targets table
/// has no `AchievementPercent` column.
pub fn achievement_by_region(targets: &DataFrame) -> PolarsResult<Option<DataFrame>> {
    if !targets
        .get_column_names()
        .iter()
        .any(|name| name.as_str() == "AchievementPercent")
    {
        return Ok(None);
    }
    let df = targets
        .clone()
        .lazy()
        .group_by([col("Region")])
        .agg([col("AchievementPercent").mean()])
        .sort(["Region"], SortMultipleOptions::default())
        .collect()?;
    Ok(Some(df))
}
