//! The integrator: cleaning, temporal derivation, and dimension joins.

use crate::clean::{self, CoercePolicy};
use crate::error::Result;
use crate::load::RawTables;
use crate::model::PharmaModel;
use crate::schema;
use polars::prelude::*;
use tracing::debug;

/// Integrate the raw tables into the enriched model with the default
/// [`CoercePolicy`].
pub fn integrate(raw: &RawTables) -> Result<PharmaModel> {
    integrate_with_policy(raw, CoercePolicy::default())
}

/// Integrate the raw tables into the enriched model.
///
/// The inputs are only read, never mutated, and the enriched tables are
/// rebuilt from scratch, so two calls on the same input produce structurally
/// identical output. Sales and inventory rows are preserved through the left
/// joins regardless of whether their foreign keys match; the loader's
/// uniqueness check on dimension keys guarantees the joins cannot fan out.
pub fn integrate_with_policy(raw: &RawTables, policy: CoercePolicy) -> Result<PharmaModel> {
    let sales = clean_sales(&raw.sales, policy)?;
    let inventory = clean_inventory(&raw.inventory, policy)?;
    let targets = clean_targets(&raw.targets, policy)?;
    let products = raw.products.clone();
    let distributors = raw.distributors.clone();

    let sales_enriched = sales
        .lazy()
        .join(
            products.clone().lazy(),
            [col("ProductID")],
            [col("ProductID")],
            left_join_keep_order(),
        )
        .join(
            distributors.clone().lazy(),
            [col("DistributorID")],
            [col("DistributorID")],
            left_join_keep_order(),
        )
        .collect()?;

    let product_attrs = products
        .clone()
        .lazy()
        .select([col("ProductID"), col("ProductName"), col("TherapeuticClass")]);
    let inventory_enriched = inventory
        .lazy()
        .join(
            product_attrs,
            [col("ProductID")],
            [col("ProductID")],
            left_join_keep_order(),
        )
        .collect()?;

    debug!(
        sales = sales_enriched.height(),
        inventory = inventory_enriched.height(),
        "model integrated"
    );

    Ok(PharmaModel {
        sales_enriched,
        targets,
        inventory_enriched,
        products,
        distributors,
    })
}

/// Left join preserving the fact table's row order, so enriched tables line
/// up row-for-row with their inputs.
fn left_join_keep_order() -> JoinArgs {
    let mut args = JoinArgs::new(JoinType::Left);
    args.maintain_order = MaintainOrderJoin::Left;
    args
}

/// Parse sales dates, derive `Month`/`Year`, and coerce the numeric columns.
fn clean_sales(sales: &DataFrame, policy: CoercePolicy) -> Result<DataFrame> {
    let mut df = sales.clone();
    let table = schema::SALES.name;

    let (date, month, year) = clean::parse_date_column(&df, table, "Date")?;
    df.with_column(date)?;
    for column in ["InvoiceAmount", "UnitsSold", "DiscountPercent"] {
        let coerced = clean::coerce_numeric_column(&df, table, column, policy)?;
        df.with_column(coerced)?;
    }
    df.with_column(month)?;
    df.with_column(year)?;
    Ok(df)
}

/// Coerce the inventory stock columns.
fn clean_inventory(inventory: &DataFrame, policy: CoercePolicy) -> Result<DataFrame> {
    let mut df = inventory.clone();
    let table = schema::INVENTORY.name;

    for column in ["StockLevel", "ReorderLevel"] {
        let coerced = clean::coerce_numeric_column(&df, table, column, policy)?;
        df.with_column(coerced)?;
    }
    Ok(df)
}

/// Coerce the target columns; no joins are performed on targets.
///
/// `Region` stays available as a join key for linking aggregated actual
/// sales in a later iteration.
fn clean_targets(targets: &DataFrame, policy: CoercePolicy) -> Result<DataFrame> {
    let mut df = targets.clone();
    let table = schema::TARGETS.name;

    let coerced = clean::coerce_numeric_column(&df, table, "TargetAmount", policy)?;
    df.with_column(coerced)?;
    if df
        .get_column_names()
        .iter()
        .any(|name| name.as_str() == "AchievementPercent")
    {
        let coerced = clean::coerce_numeric_column(&df, table, "AchievementPercent", policy)?;
        df.with_column(coerced)?;
    }
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;

    fn utf8_series(name: &str, values: &[&str]) -> Column {
        Series::new(name.into(), values.to_vec()).into()
    }

    fn sales_frame(rows: &[(&str, &str, &str, &str, &str, &str, &str)]) -> DataFrame {
        DataFrame::new(vec![
            utf8_series("Date", &rows.iter().map(|r| r.0).collect::<Vec<_>>()),
            utf8_series("ProductID", &rows.iter().map(|r| r.1).collect::<Vec<_>>()),
            utf8_series("DistributorID", &rows.iter().map(|r| r.2).collect::<Vec<_>>()),
            utf8_series("InvoiceAmount", &rows.iter().map(|r| r.3).collect::<Vec<_>>()),
            utf8_series("UnitsSold", &rows.iter().map(|r| r.4).collect::<Vec<_>>()),
            utf8_series("DiscountPercent", &rows.iter().map(|r| r.5).collect::<Vec<_>>()),
            utf8_series("PaymentMethod", &rows.iter().map(|r| r.6).collect::<Vec<_>>()),
        ])
        .unwrap()
    }

    fn raw_fixture() -> RawTables {
        RawTables {
            distributors: DataFrame::new(vec![
                utf8_series("DistributorID", &["D1", "D2"]),
                utf8_series("DistributorName", &["Acme Pharma", "Zenith Meds"]),
                utf8_series("City", &["Metropolis", "Gotham"]),
                utf8_series("Region", &["North", "South"]),
            ])
            .unwrap(),
            inventory: DataFrame::new(vec![
                utf8_series("ProductID", &["P1", "P9"]),
                utf8_series("StockLevel", &["5", "40"]),
                utf8_series("ReorderLevel", &["10", "20"]),
            ])
            .unwrap(),
            products: DataFrame::new(vec![
                utf8_series("ProductID", &["P1", "P2"]),
                utf8_series("ProductName", &["Aspirin", "Amoxil"]),
                utf8_series("TherapeuticClass", &["Analgesic", "Antibiotic"]),
            ])
            .unwrap(),
            targets: DataFrame::new(vec![
                utf8_series("Region", &["North", "South"]),
                utf8_series("Quarter", &["2024-Q1", "2024-Q1"]),
                utf8_series("TargetAmount", &["10000", "8000"]),
                utf8_series("AchievementPercent", &["95.5", "101.0"]),
            ])
            .unwrap(),
            sales: sales_frame(&[
                ("2024-03-15", "P1", "D1", "250.50", "10", "5", "Credit"),
                ("2024-04-02", "P2", "D9", "100.00", "4", "0", "Cash"),
                ("2024-04-10", "P7", "D2", "abc", "2", "0", "Cash"),
            ]),
        }
    }

    #[test]
    fn test_enrichment_scenario() {
        let raw = raw_fixture();
        let model = integrate(&raw).unwrap();
        let sales = &model.sales_enriched;

        assert_eq!(sales.column("InvoiceAmount").unwrap().f64().unwrap().get(0), Some(250.5));
        assert_eq!(sales.column("UnitsSold").unwrap().f64().unwrap().get(0), Some(10.0));
        assert_eq!(sales.column("ProductName").unwrap().str().unwrap().get(0), Some("Aspirin"));
        assert_eq!(
            sales.column("TherapeuticClass").unwrap().str().unwrap().get(0),
            Some("Analgesic")
        );
        assert_eq!(
            sales.column("DistributorName").unwrap().str().unwrap().get(0),
            Some("Acme Pharma")
        );
        assert_eq!(sales.column("Region").unwrap().str().unwrap().get(0), Some("North"));
        assert_eq!(sales.column("Month").unwrap().str().unwrap().get(0), Some("2024-03"));
        assert_eq!(sales.column("Year").unwrap().i32().unwrap().get(0), Some(2024));
    }

    #[test]
    fn test_unmatched_keys_keep_rows_with_null_attributes() {
        let raw = raw_fixture();
        let model = integrate(&raw).unwrap();
        let sales = &model.sales_enriched;

        // Row 1 has an unmatched distributor, row 2 an unmatched product.
        assert_eq!(sales.height(), raw.sales.height());
        assert!(sales.column("DistributorName").unwrap().str().unwrap().get(1).is_none());
        assert!(sales.column("Region").unwrap().str().unwrap().get(1).is_none());
        assert!(sales.column("ProductName").unwrap().str().unwrap().get(2).is_none());
        assert_eq!(sales.column("InvoiceAmount").unwrap().f64().unwrap().get(1), Some(100.0));
    }

    #[test]
    fn test_row_preservation() {
        let raw = raw_fixture();
        let model = integrate(&raw).unwrap();

        assert_eq!(model.sales_enriched.height(), raw.sales.height());
        assert_eq!(model.inventory_enriched.height(), raw.inventory.height());
    }

    #[test]
    fn test_malformed_number_coerced_to_zero_by_default() {
        let raw = raw_fixture();
        let model = integrate(&raw).unwrap();

        assert_eq!(
            model.sales_enriched.column("InvoiceAmount").unwrap().f64().unwrap().get(2),
            Some(0.0)
        );
    }

    #[test]
    fn test_malformed_number_fails_under_strict_policy() {
        let raw = raw_fixture();
        match integrate_with_policy(&raw, CoercePolicy::CoerceOrFail) {
            Err(DataError::MalformedNumber { column, value, .. }) => {
                assert_eq!(column, "InvoiceAmount");
                assert_eq!(value, "abc");
            }
            other => panic!("expected MalformedNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_date_fails_fast() {
        let mut raw = raw_fixture();
        raw.sales = sales_frame(&[("not-a-date", "P1", "D1", "1", "1", "0", "Cash")]);

        assert!(matches!(
            integrate(&raw),
            Err(DataError::UnparsableDate { row: 0, .. })
        ));
    }

    #[test]
    fn test_idempotence() {
        let raw = raw_fixture();
        let first = integrate(&raw).unwrap();
        let second = integrate(&raw).unwrap();

        assert!(first.sales_enriched.equals_missing(&second.sales_enriched));
        assert!(first.inventory_enriched.equals_missing(&second.inventory_enriched));
        assert!(first.targets.equals_missing(&second.targets));
        assert!(first.products.equals_missing(&second.products));
        assert!(first.distributors.equals_missing(&second.distributors));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let raw = raw_fixture();
        let snapshot = raw.clone();
        let _model = integrate(&raw).unwrap();

        assert!(raw.sales.equals_missing(&snapshot.sales));
        assert!(raw.products.equals_missing(&snapshot.products));
        assert!(raw.distributors.equals_missing(&snapshot.distributors));
        assert!(raw.inventory.equals_missing(&snapshot.inventory));
        assert!(raw.targets.equals_missing(&snapshot.targets));
    }

    #[test]
    fn test_inventory_enrichment_projects_product_attributes() {
        let raw = raw_fixture();
        let model = integrate(&raw).unwrap();
        let inventory = &model.inventory_enriched;

        assert_eq!(
            inventory.get_column_names(),
            vec!["ProductID", "StockLevel", "ReorderLevel", "ProductName", "TherapeuticClass"]
        );
        assert_eq!(inventory.column("ProductName").unwrap().str().unwrap().get(0), Some("Aspirin"));
        // P9 has no product row; attributes stay null, the row stays.
        assert!(inventory.column("ProductName").unwrap().str().unwrap().get(1).is_none());
        assert_eq!(inventory.column("StockLevel").unwrap().f64().unwrap().get(1), Some(40.0));
    }

    #[test]
    fn test_targets_pass_through_with_numeric_coercion() {
        let raw = raw_fixture();
        let model = integrate(&raw).unwrap();

        assert_eq!(model.targets.height(), 2);
        assert_eq!(model.targets.column("TargetAmount").unwrap().f64().unwrap().get(0), Some(10000.0));
        assert_eq!(
            model.targets.column("AchievementPercent").unwrap().f64().unwrap().get(1),
            Some(101.0)
        );
        assert_eq!(model.targets.column("Quarter").unwrap().str().unwrap().get(0), Some("2024-Q1"));
    }
}
