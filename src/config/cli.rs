use crate::config::toml_config::FitmentConfig;
use crate::domain::query::CompatibilityQuery;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "fitment")]
#[command(about = "Vehicle compatibility extraction and storefront filtering")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Catalog endpoint returning make -> model -> year ranges
    #[arg(long, global = true)]
    pub catalog_endpoint: Option<String>,

    /// Local catalog JSON file, used when no endpoint is given
    #[arg(long, global = true)]
    pub catalog_file: Option<String>,

    /// Product records JSON file
    #[arg(long, global = true)]
    pub products: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Infer compatibility entries and custom fields from supplier text
    Extract(ExtractArgs),
    /// List products that fit a vehicle
    Filter(FilterArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Supplier text file; reads stdin when omitted or "-"
    #[arg(short, long)]
    pub input: Option<String>,

    /// Merge the result into this product and save the product file
    #[arg(long)]
    pub product_id: Option<String>,

    /// Key types recorded on every extracted entry
    #[arg(long = "key-type")]
    pub key_types: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub make: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    /// "YYYY" or "YYYY-YYYY"
    #[arg(long)]
    pub year_range: Option<String>,

    /// Raw query string, e.g. "make=Ford&model=F-150&yearRange=2018"
    #[arg(long, conflicts_with_all = ["make", "model", "year_range"])]
    pub query: Option<String>,
}

impl FilterArgs {
    pub fn to_query(&self) -> Result<CompatibilityQuery> {
        match &self.query {
            Some(raw) => CompatibilityQuery::from_query_string(raw),
            None => CompatibilityQuery::from_parts(
                self.make.as_deref(),
                self.model.as_deref(),
                self.year_range.as_deref(),
            ),
        }
    }
}

impl CliConfig {
    /// Loads the config file when given and lets command-line flags override it.
    pub fn resolve(&self) -> Result<FitmentConfig> {
        let mut config = match &self.config {
            Some(path) => FitmentConfig::from_file(path)?,
            None => FitmentConfig::default(),
        };

        if let Some(endpoint) = &self.catalog_endpoint {
            config.catalog.endpoint = Some(endpoint.clone());
            config.catalog.path = None;
        } else if let Some(path) = &self.catalog_file {
            config.catalog.path = Some(path.clone());
            config.catalog.endpoint = None;
        }
        if let Some(products) = &self.products {
            config.products.path = Some(products.clone());
        }
        if self.verbose {
            config.logging.verbose = Some(true);
        }
        if self.json_logs {
            config.logging.json = Some(true);
        }

        Ok(config)
    }
}
