//! Row filters applied to the enriched sales table.

use chrono::NaiveDate;
use polars::prelude::*;

/// Inclusive date-range and region filter for the enriched sales table.
///
/// Mirrors the dashboard sidebar: either date bound may be open, and an
/// empty region list keeps every region. Rows with a null `Region` (sales
/// with an unmatched distributor) are excluded once a region filter is
/// active.
#[derive(Debug, Clone, Default)]
pub struct SalesFilter {
    /// Earliest sale date to keep (inclusive).
    pub from: Option<NaiveDate>,
    /// Latest sale date to keep (inclusive).
    pub to: Option<NaiveDate>,
    /// Regions to keep; empty keeps all.
    pub regions: Vec<String>,
}

impl SalesFilter {
    /// Keep sales on or after `date`.
    #[must_use]
    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    /// Keep sales on or before `date`.
    #[must_use]
    pub fn to_date(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }

    /// Keep only sales in `region`. Repeatable; regions accumulate.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.regions.push(region.into());
        self
    }

    /// Apply the filter, returning a new table.
    pub fn apply(&self, sales: &DataFrame) -> PolarsResult<DataFrame> {
        let mut lf = sales.clone().lazy();
        if let Some(from) = self.from {
            lf = lf.filter(
                col("Date")
                    .cast(DataType::Int32)
                    .gt_eq(lit(days_from_epoch(from))),
            );
        }
        if let Some(to) = self.to {
            lf = lf.filter(
                col("Date")
                    .cast(DataType::Int32)
                    .lt_eq(lit(days_from_epoch(to))),
            );
        }
        if let Some(predicate) = region_predicate(&self.regions) {
            lf = lf.filter(predicate);
        }
        lf.collect()
    }
}

/// OR together one equality test per requested region.
fn region_predicate(regions: &[String]) -> Option<Expr> {
    let mut exprs = regions
        .iter()
        .map(|region| col("Region").eq(lit(region.as_str())));
    let first = exprs.next()?;
    Some(exprs.fold(first, Expr::or))
}

/// Days from the Unix epoch; the physical representation of `Date`.
fn days_from_epoch(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch");
    (date - epoch).num_days() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata;

    #[test]
    fn test_default_filter_keeps_everything() {
        let sales = testdata::sales_enriched();
        let filtered = SalesFilter::default().apply(&sales).unwrap();
        assert_eq!(filtered.height(), sales.height());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let sales = testdata::sales_enriched();
        let filtered = SalesFilter::default()
            .from_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
            .to_date(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
            .apply(&sales)
            .unwrap();
        assert_eq!(filtered.height(), 3);
    }

    #[test]
    fn test_region_filter() {
        let sales = testdata::sales_enriched();
        let filtered = SalesFilter::default()
            .region("North")
            .apply(&sales)
            .unwrap();
        assert_eq!(filtered.height(), 2);

        let filtered = SalesFilter::default()
            .region("North")
            .region("South")
            .apply(&sales)
            .unwrap();
        // The null-region row is excluded once a region filter is active.
        assert_eq!(filtered.height(), 3);
    }

    #[test]
    fn test_combined_filters() {
        let sales = testdata::sales_enriched();
        let filtered = SalesFilter::default()
            .from_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
            .region("North")
            .apply(&sales)
            .unwrap();
        assert_eq!(filtered.height(), 1);
        assert_eq!(
            filtered.column("InvoiceAmount").unwrap().f64().unwrap().get(0),
            Some(480.0)
        );
    }
}
