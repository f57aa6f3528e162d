//! The enriched five-table model consumed by every report.

use polars::prelude::DataFrame;

/// The denormalized model produced by the integrator.
///
/// All tables are rebuilt wholesale on each integration and are meant to be
/// read-only for consumers. `sales_enriched` holds exactly one row per input
/// sales row and `inventory_enriched` one row per input inventory row;
/// unmatched foreign keys appear as null dimension attributes, never as
/// dropped rows.
#[derive(Debug, Clone)]
pub struct PharmaModel {
    /// Sales joined with product and distributor attributes, plus the
    /// derived `Month` (`YYYY-MM`) and `Year` columns.
    pub sales_enriched: DataFrame,
    /// Regional targets; numeric columns coerced, no enrichment.
    pub targets: DataFrame,
    /// Inventory joined with product name and therapeutic class.
    pub inventory_enriched: DataFrame,
    /// Product master as loaded.
    pub products: DataFrame,
    /// Distributor master as loaded.
    pub distributors: DataFrame,
}
