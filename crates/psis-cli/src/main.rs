mod export;
mod search;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "psis-cli")]
#[command(about = "Search the PSIS pesticide registration API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search registered pesticide usage standards
    Search(SearchArgs),
}

/// Filters and output options for `search`.
#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Brand name (상표명)
    #[arg(long)]
    brand: Option<String>,
    /// Crop name (작물명)
    #[arg(long)]
    crop: Option<String>,
    /// Item/product name (품목명)
    #[arg(long)]
    item: Option<String>,
    /// Company name (회사명)
    #[arg(long)]
    company: Option<String>,
    /// Print rows as JSON instead of a table
    #[arg(long)]
    json: bool,
    /// Write the rows to an Excel workbook
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = export::DEFAULT_EXPORT_FILE
    )]
    export: Option<PathBuf>,
}

impl SearchArgs {
    fn filters(&self) -> psis_client::SearchFilters {
        psis_client::SearchFilters {
            brand_name: self.brand.clone().unwrap_or_default(),
            crop_name: self.crop.clone().unwrap_or_default(),
            item_name: self.item.clone().unwrap_or_default(),
            company_name: self.company.clone().unwrap_or_default(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = psis_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search(args) => search::run_search(&config, &args).await,
    }
}
