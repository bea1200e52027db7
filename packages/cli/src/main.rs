#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Scrapes bus and train listings from travel search result pages.
//!
//! `travel_scrape bus <URL>` and `travel_scrape train <URL>` run one scrape
//! and save the resulting CSV files; with no subcommand an interactive menu
//! is shown instead.
//!
//! Uses `indicatif-log-bridge` (via [`travel_scrape_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod frontend;
mod interactive;
mod run;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use travel_scrape_listing_models::ListingKind;
use travel_scrape_pipeline::Outcome;

use crate::run::RunOptions;

#[derive(Parser)]
#[command(name = "travel_scrape", about = "Bus and train listing scraper")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    options: RunOptions,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a bus search result page
    Bus {
        /// Bus search URL
        url: String,
    },
    /// Scrape a train search result page
    Train {
        /// Train search URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let multi = travel_scrape_cli_utils::init_logger();
    let cli = Cli::parse();

    let (kind, url) = match cli.command {
        None => {
            interactive::run_menu(&cli.options, &multi).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Bus { url }) => (ListingKind::Bus, url),
        Some(Commands::Train { url }) => (ListingKind::Train, url),
    };

    match run::run(kind, &url, &cli.options, &multi).await {
        Outcome::Failed(_) | Outcome::Skipped => Ok(ExitCode::FAILURE),
        Outcome::NoData | Outcome::Completed(_) => Ok(ExitCode::SUCCESS),
    }
}
