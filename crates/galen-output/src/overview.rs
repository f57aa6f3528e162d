//! Executive-overview aggregations: KPIs, monthly trend, regional split,
//! and top products.

use polars::prelude::*;
use serde::Serialize;

/// Headline figures for a (possibly filtered) sales selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    /// Sum of invoice amounts.
    pub total_revenue: f64,
    /// Sum of units sold.
    pub units_sold: f64,
    /// Mean discount percentage across transactions.
    pub avg_discount_pct: f64,
    /// Number of sales rows in the selection.
    pub transactions: usize,
}

impl Kpis {
    /// Compute the KPIs over an enriched sales table.
    pub fn compute(sales: &DataFrame) -> PolarsResult<Self> {
        Ok(Self {
            total_revenue: sales.column("InvoiceAmount")?.f64()?.sum().unwrap_or(0.0),
            units_sold: sales.column("UnitsSold")?.f64()?.sum().unwrap_or(0.0),
            avg_discount_pct: sales.column("DiscountPercent")?.f64()?.mean().unwrap_or(0.0),
            transactions: sales.height(),
        })
    }

    /// Render the KPIs as a small ASCII block.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{:<16} ${:>14.2}\n",
            "Total Revenue", self.total_revenue
        ));
        output.push_str(&format!("{:<16} {:>15.0}\n", "Units Sold", self.units_sold));
        output.push_str(&format!(
            "{:<16} {:>14.2}%\n",
            "Avg Discount", self.avg_discount_pct
        ));
        output.push_str(&format!(
            "{:<16} {:>15}\n",
            "Transactions", self.transactions
        ));
        output
    }
}

/// Revenue summed per month bucket, oldest month first.
pub fn monthly_revenue(sales: &DataFrame) -> PolarsResult<DataFrame> {
    sales
        .clone()
        .lazy()
        .group_by([col("Month")])
        .agg([col("InvoiceAmount").sum()])
        .sort(["Month"], SortMultipleOptions::default())
        .collect()
}

/// Revenue summed per region, highest revenue first.
///
/// Sales with no matched distributor have a null region and are excluded,
/// matching the dashboard's behavior of grouping on known regions only.
pub fn revenue_by_region(sales: &DataFrame) -> PolarsResult<DataFrame> {
    sales
        .clone()
        .lazy()
        .filter(col("Region").is_not_null())
        .group_by([col("Region")])
        .agg([col("InvoiceAmount").sum()])
        .sort(
            ["InvoiceAmount"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()
}

/// The `n` products with the highest revenue.
pub fn top_products(sales: &DataFrame, n: u32) -> PolarsResult<DataFrame> {
    sales
        .clone()
        .lazy()
        .filter(col("ProductName").is_not_null())
        .group_by([col("ProductName")])
        .agg([col("InvoiceAmount").sum()])
        .sort(
            ["InvoiceAmount"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .limit(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata;

    #[test]
    fn test_kpis() {
        let sales = testdata::sales_enriched();
        let kpis = Kpis::compute(&sales).unwrap();

        assert!((kpis.total_revenue - 910.5).abs() < 1e-9);
        assert!((kpis.units_sold - 43.0).abs() < 1e-9);
        assert!((kpis.avg_discount_pct - 3.75).abs() < 1e-9);
        assert_eq!(kpis.transactions, 4);

        let rendered = kpis.to_ascii_table();
        assert!(rendered.contains("Total Revenue"));
        assert!(rendered.contains("910.50"));
    }

    #[test]
    fn test_monthly_revenue_sorted_by_month() {
        let sales = testdata::sales_enriched();
        let trend = monthly_revenue(&sales).unwrap();

        let months: Vec<_> = trend
            .column("Month")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(months, vec!["2024-03", "2024-04", "2024-05"]);
        assert_eq!(
            trend.column("InvoiceAmount").unwrap().f64().unwrap().get(0),
            Some(370.5)
        );
    }

    #[test]
    fn test_revenue_by_region_excludes_null_region() {
        let sales = testdata::sales_enriched();
        let regions = revenue_by_region(&sales).unwrap();

        assert_eq!(regions.height(), 2);
        // North (730.5) outranks South (120.0).
        assert_eq!(
            regions.column("Region").unwrap().str().unwrap().get(0),
            Some("North")
        );
    }

    #[test]
    fn test_top_products_limit_and_order() {
        let sales = testdata::sales_enriched();
        let top = top_products(&sales, 1).unwrap();

        assert_eq!(top.height(), 1);
        assert_eq!(
            top.column("ProductName").unwrap().str().unwrap().get(0),
            Some("Amoxil")
        );
        assert_eq!(
            top.column("InvoiceAmount").unwrap().f64().unwrap().get(0),
            Some(600.0)
        );
    }
}
