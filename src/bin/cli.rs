//! fitmenu CLI
//!
//! Scrapes the catalog, reports weekly menu totals, fills the basket and
//! checks the site's fitness program menu.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fitmenu::{error::Result, models::Config, pipeline, utils::http};

/// fitmenu - weekly meal menu scraper
#[derive(Parser, Debug)]
#[command(name = "fitmenu", version, about = "Meal catalog scraper and menu planner")]

struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "fitmenu.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every product with its price and macros
    Catalog {
        /// Override the discount percentage
        #[arg(long)]
        off: Option<f64>,
    },

    /// Print price and macro totals for each menu day
    Report {
        /// Override the discount percentage
        #[arg(long)]
        off: Option<f64>,
    },

    /// Add the menu to the site basket and apply a discount code
    Basket {
        /// First delivery date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Number of menu days to order
        #[arg(long)]
        days: Option<u32>,

        /// Discount code to apply
        #[arg(long)]
        code: Option<String>,
    },

    /// Print today's fitness program menu and check it against the targets
    Program,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // `validate` checks the file itself, so it never falls back to defaults.
    let mut config = match cli.command {
        Command::Validate => Config::load(&cli.config)?,
        _ => Config::load_or_default(&cli.config)?,
    };
    match &cli.command {
        Command::Catalog { off: Some(off) } | Command::Report { off: Some(off) } => {
            config.pricing.off = *off;
        }
        _ => {}
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let config = Arc::new(config);
    let client = http::create_client(&config.crawler)?;

    match cli.command {
        Command::Catalog { .. } => {
            pipeline::run_catalog(Arc::clone(&config), &client).await?;
        }

        Command::Report { .. } => {
            pipeline::run_report(Arc::clone(&config), &client).await?;
        }

        Command::Basket { start, days, code } => {
            let basket = &config.basket;
            let start = start.unwrap_or(basket.start_date);
            let days = days.unwrap_or(basket.days);
            let code = code.unwrap_or_else(|| basket.discount_code.clone());
            pipeline::run_basket(Arc::clone(&config), &client, days, start, &code).await?;
        }

        Command::Program => {
            pipeline::run_program(&config, &client).await?;
        }

        Command::Validate => {
            log::info!("✓ Config OK ({} menu days)", config.menu.len());
        }
    }

    Ok(())
}
