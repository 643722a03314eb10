mod catalog;
mod content;

use std::time::Duration;

use clap::{Parser, Subcommand};
use miramar_cms::{Catalog, CmsClient, SearchSession};
use miramar_core::CatalogRef;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "miramar-cli")]
#[command(about = "Miramar Shop catalog command line interface")]
struct Cli {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List all categories
    Categories,
    /// List products, optionally restricted to one category
    Products {
        /// Category id or slug; `0` lists every product
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a category and its products
    Category {
        /// Category id or slug
        reference: String,
    },
    /// Show one product with all its prices
    Product {
        /// Product id or slug
        reference: String,
    },
    /// List products on sale
    Discounts,
    /// List products shown on the home page
    Featured,
    /// List frequently asked questions
    Faqs,
    /// Show the home page copy
    Home,
    /// Search products by name or description
    Search { query: String },
    /// Print the WhatsApp purchase link for a product
    Contact {
        /// Product id or slug
        reference: String,
    },
    /// Check which CMS endpoint answers
    Check,
}

/// Output format shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Output {
    Table,
    Json,
}

/// Pretty-prints `value` as JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Shortens `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = miramar_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("miramar-cli: no command given; run with --help to list commands");
        return Ok(());
    };
    let output = if cli.json { Output::Json } else { Output::Table };

    tracing::debug!(env = %config.env, host = %config.cms.host, "loaded configuration");
    let catalog = Catalog::new(CmsClient::new(&config.cms)?);

    match command {
        Commands::Categories => catalog::run_categories(&catalog, output).await,
        Commands::Products { category } => {
            catalog::run_products(&catalog, category.as_deref(), output).await
        }
        Commands::Category { reference } => {
            catalog::run_category(&catalog, &CatalogRef::parse(&reference), output).await
        }
        Commands::Product { reference } => {
            catalog::run_product(&catalog, &CatalogRef::parse(&reference), output).await
        }
        Commands::Discounts => catalog::run_discounts(&catalog, output).await,
        Commands::Featured => catalog::run_featured(&catalog, output).await,
        Commands::Search { query } => {
            let session = SearchSession::new(
                catalog,
                Duration::from_millis(config.search_debounce_ms),
            );
            catalog::run_search(&session, &query, output).await
        }
        Commands::Contact { reference } => {
            catalog::run_contact(
                &catalog,
                &CatalogRef::parse(&reference),
                &config.whatsapp_number,
                output,
            )
            .await
        }
        Commands::Faqs => content::run_faqs(&catalog, output).await,
        Commands::Home => content::run_home(&catalog, output).await,
        Commands::Check => content::run_check(&catalog, output).await,
    }
}
