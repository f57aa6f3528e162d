#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/galenlabs/galen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod filter;
pub mod inventory;
pub mod overview;
pub mod render;
pub mod sales;

pub use export::{ExportError, ExportFormat, write_table};
pub use filter::SalesFilter;
pub use inventory::{StockSummary, achievement_by_region, low_stock};
pub use overview::{Kpis, monthly_revenue, revenue_by_region, top_products};
pub use render::to_ascii_table;
pub use sales::{distributor_performance, revenue_by_class, revenue_by_payment_method};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
