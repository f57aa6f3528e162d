//! Sales deep-dive aggregations: therapeutic class, payment method, and
//! distributor performance.

use polars::prelude::*;

/// Revenue summed per therapeutic class, highest first.
pub fn revenue_by_class(sales: &DataFrame) -> PolarsResult<DataFrame> {
    sales
        .clone()
        .lazy()
        .filter(col("TherapeuticClass").is_not_null())
        .group_by([col("TherapeuticClass")])
        .agg([col("InvoiceAmount").sum()])
        .sort(
            ["InvoiceAmount"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()
}

/// Revenue summed per payment method, highest first.
pub fn revenue_by_payment_method(sales: &DataFrame) -> PolarsResult<DataFrame> {
    sales
        .clone()
        .lazy()
        .group_by([col("PaymentMethod")])
        .agg([col("InvoiceAmount").sum()])
        .sort(
            ["InvoiceAmount"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()
}

/// Revenue and units per distributor (with city), highest revenue first.
pub fn distributor_performance(sales: &DataFrame) -> PolarsResult<DataFrame> {
    sales
        .clone()
        .lazy()
        .filter(col("DistributorName").is_not_null())
        .group_by([col("DistributorName"), col("City")])
        .agg([col("InvoiceAmount").sum(), col("UnitsSold").sum()])
        .sort(
            ["InvoiceAmount"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()
}
