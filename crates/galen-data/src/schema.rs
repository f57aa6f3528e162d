//! Schema catalog for the five CSV sources.
//!
//! Each source declares its expected filename and required columns. The
//! loader validates headers against this catalog instead of discovering the
//! schema by column-name convention during joins, and asserts key uniqueness
//! for the dimension tables up front.

/// Schema declaration for one CSV source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSchema {
    /// Logical dataset name.
    pub name: &'static str,
    /// Expected filename inside the data directory.
    pub file: &'static str,
    /// Columns that must be present in the header row. Extra columns are
    /// carried through untouched.
    pub required_columns: &'static [&'static str],
    /// Column whose values must be unique (dimension tables only).
    pub unique_key: Option<&'static str>,
}

/// Distributor master: one row per distributor.
pub const DISTRIBUTORS: SourceSchema = SourceSchema {
    name: "distributors",
    file: "Pharma_Distributor_Master.csv",
    required_columns: &["DistributorID", "DistributorName", "City", "Region"],
    unique_key: Some("DistributorID"),
};

/// Inventory snapshot: one row per product.
pub const INVENTORY: SourceSchema = SourceSchema {
    name: "inventory",
    file: "Pharma_Inventory.csv",
    required_columns: &["ProductID", "StockLevel", "ReorderLevel"],
    unique_key: None,
};

/// Product master: one row per product.
pub const PRODUCTS: SourceSchema = SourceSchema {
    name: "products",
    file: "Pharma_Product_Master.csv",
    required_columns: &["ProductID", "ProductName", "TherapeuticClass"],
    unique_key: Some("ProductID"),
};

/// Regional targets: one row per region and quarter. `AchievementPercent`
/// is optional and only used by the target-attainment report when present.
pub const TARGETS: SourceSchema = SourceSchema {
    name: "targets",
    file: "Pharma_Region_Targets.csv",
    required_columns: &["Region", "Quarter", "TargetAmount"],
    unique_key: None,
};

/// Sales transactions: one row per invoice line.
pub const SALES: SourceSchema = SourceSchema {
    name: "sales",
    file: "Pharma_Sales.csv",
    required_columns: &[
        "Date",
        "ProductID",
        "DistributorID",
        "InvoiceAmount",
        "UnitsSold",
        "DiscountPercent",
        "PaymentMethod",
    ],
    unique_key: None,
};

/// All sources, in load order.
pub const SOURCES: [SourceSchema; 5] = [DISTRIBUTORS, INVENTORY, PRODUCTS, TARGETS, SALES];
