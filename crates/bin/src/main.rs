//! Galen CLI binary.
//!
//! Renders the pharma analytics views as terminal reports: executive
//! overview, sales deep dive, and inventory & targets.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use galen::data::{DataError, DataStore};
use galen::output::{self, ExportError, ExportFormat, Kpis, SalesFilter, StockSummary};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "galen")]
#[command(about = "Galen: pharma sales, inventory, and target analytics", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the five source CSV files
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Executive overview: KPIs, monthly trend, regions, top products
    Overview {
        /// Keep sales on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Keep sales on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Keep only these regions (repeatable)
        #[arg(long)]
        region: Vec<String>,

        /// Also export the report tables into this directory
        #[arg(long)]
        export: Option<PathBuf>,

        /// Export format
        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,
    },

    /// Sales deep dive: therapeutic class, payment method, distributors
    Sales {
        /// Keep only this region
        #[arg(long)]
        region: Option<String>,

        /// Also export the report tables into this directory
        #[arg(long)]
        export: Option<PathBuf>,

        /// Export format
        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,
    },

    /// Inventory status and regional target attainment
    Inventory {
        /// Also export the report tables into this directory
        #[arg(long)]
        export: Option<PathBuf>,

        /// Export format
        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,
    },

    /// Reload the model from disk and print table sizes
    Refresh,
}

/// Export format accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
    PrettyJson,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Json => Self::Json,
            OutputFormat::PrettyJson => Self::PrettyJson,
        }
    }
}

/// Error type for CLI operations.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Data loading or integration error.
    #[error("{0}")]
    Data(#[from] DataError),
    /// Polars DataFrame error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
    /// Export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut store = DataStore::new(&cli.data_dir);
    let result = match cli.command {
        Commands::Overview {
            from,
            to,
            region,
            export,
            format,
        } => run_overview(&mut store, from, to, region, export.as_deref(), format.into()),
        Commands::Sales {
            region,
            export,
            format,
        } => run_sales(&mut store, region, export.as_deref(), format.into()),
        Commands::Inventory { export, format } => {
            run_inventory(&mut store, export.as_deref(), format.into())
        }
        Commands::Refresh => run_refresh(&mut store),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run_overview(
    store: &mut DataStore,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    regions: Vec<String>,
    export: Option<&Path>,
    format: ExportFormat,
) -> Result<(), CliError> {
    let model = store.model()?;

    let mut filter = SalesFilter::default();
    if let Some(from) = from {
        filter = filter.from_date(from);
    }
    if let Some(to) = to {
        filter = filter.to_date(to);
    }
    for region in regions {
        filter = filter.region(region);
    }
    let sales = filter.apply(&model.sales_enriched)?;

    println!("Executive Overview");
    println!("{}", "=".repeat(40));
    print!("{}", Kpis::compute(&sales)?.to_ascii_table());
    println!();

    let trend = output::monthly_revenue(&sales)?;
    let regions = output::revenue_by_region(&sales)?;
    let top = output::top_products(&sales, 5)?;

    println!("{}", output::to_ascii_table(&trend, "Monthly Revenue Trend")?);
    println!("{}", output::to_ascii_table(&regions, "Revenue by Region")?);
    println!("{}", output::to_ascii_table(&top, "Top 5 Products by Revenue")?);

    if let Some(dir) = export {
        std::fs::create_dir_all(dir)?;
        export_table(&trend, dir, "monthly_revenue", format)?;
        export_table(&regions, dir, "revenue_by_region", format)?;
        export_table(&top, dir, "top_products", format)?;
    }
    Ok(())
}

fn run_sales(
    store: &mut DataStore,
    region: Option<String>,
    export: Option<&Path>,
    format: ExportFormat,
) -> Result<(), CliError> {
    let model = store.model()?;

    let mut filter = SalesFilter::default();
    if let Some(region) = region {
        filter = filter.region(region);
    }
    let sales = filter.apply(&model.sales_enriched)?;

    let by_class = output::revenue_by_class(&sales)?;
    let by_method = output::revenue_by_payment_method(&sales)?;
    let performance = output::distributor_performance(&sales)?;

    println!("Sales Deep Dive");
    println!("{}", "=".repeat(40));
    println!("{}", output::to_ascii_table(&by_class, "Revenue by Therapeutic Class")?);
    println!("{}", output::to_ascii_table(&by_method, "Revenue by Payment Method")?);
    println!("{}", output::to_ascii_table(&performance, "Distributor Performance")?);

    if let Some(dir) = export {
        std::fs::create_dir_all(dir)?;
        export_table(&by_class, dir, "revenue_by_class", format)?;
        export_table(&by_method, dir, "revenue_by_payment_method", format)?;
        export_table(&performance, dir, "distributor_performance", format)?;
    }
    Ok(())
}

fn run_inventory(
    store: &mut DataStore,
    export: Option<&Path>,
    format: ExportFormat,
) -> Result<(), CliError> {
    let model = store.model()?;

    println!("Inventory & Targets");
    println!("{}", "=".repeat(40));

    let low = output::low_stock(&model.inventory_enriched)?;
    if low.height() == 0 {
        println!("All stock levels are healthy.");
        println!();
    } else {
        println!("Alert: {} product(s) below reorder level!", low.height());
        println!("{}", output::to_ascii_table(&low, "Low Stock")?);
    }
    print!("{}", StockSummary::compute(&model.inventory_enriched)?.to_ascii_table());
    println!();

    let achievement = output::achievement_by_region(&model.targets)?;
    match &achievement {
        Some(table) => {
            println!("{}", output::to_ascii_table(table, "Target Achievement by Region")?);
        }
        None => println!("Targets file has no AchievementPercent column; skipping attainment."),
    }

    if let Some(dir) = export {
        std::fs::create_dir_all(dir)?;
        export_table(&low, dir, "low_stock", format)?;
        if let Some(table) = &achievement {
            export_table(table, dir, "achievement_by_region", format)?;
        }
    }
    Ok(())
}

fn run_refresh(store: &mut DataStore) -> Result<(), CliError> {
    println!("Reloading data from {}", store.dir().display());
    let model = store.refresh()?;

    println!("  sales_enriched:     {} rows", model.sales_enriched.height());
    println!("  inventory_enriched: {} rows", model.inventory_enriched.height());
    println!("  targets:            {} rows", model.targets.height());
    println!("  products:           {} rows", model.products.height());
    println!("  distributors:       {} rows", model.distributors.height());
    Ok(())
}

fn export_table(
    df: &DataFrame,
    dir: &Path,
    name: &str,
    format: ExportFormat,
) -> Result<(), CliError> {
    let path = dir.join(format!("{name}.{}", format.extension()));
    output::write_table(df, &path, format)?;
    println!("Exported {}", path.display());
    Ok(())
}
