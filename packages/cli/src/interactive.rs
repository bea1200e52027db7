//! Menu-driven front end.
//!
//! Mirrors the subcommands for users who would rather not remember flags:
//! pick a page, paste a search URL, and the results are printed and saved.

use dialoguer::{Input, Select};
use travel_scrape_cli_utils::MultiProgress;
use travel_scrape_listing_models::ListingKind;

use crate::run::{RunOptions, run};

/// Pages of the interactive menu.
enum Page {
    Home,
    Bus,
    Train,
    Quit,
}

impl Page {
    const ALL: &[Self] = &[Self::Home, Self::Bus, Self::Train, Self::Quit];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Bus => "Bus Scraper",
            Self::Train => "Train Scraper",
            Self::Quit => "Quit",
        }
    }
}

const HOME: &str = "\
Web Scraper: Bus & Train Data Extraction

Scrapes bus and train listings from AbhiBus search result pages.

Steps to use:
  1. Select Bus Scraper or Train Scraper.
  2. Enter the search URL to scrape.
  3. The extracted details are shown as tables.
  4. Each table is saved as a CSV file in the output directory.";

async fn scrape_page(
    kind: ListingKind,
    options: &RunOptions,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    let url: String = Input::new()
        .with_prompt(format!("Enter AbhiBus {} Search URL", kind.label()))
        .allow_empty(true)
        .interact_text()?;

    let outcome = run(kind, &url, options, multi).await;
    log::debug!("{} scrape ended: {outcome:?}", kind.label());
    Ok(())
}

/// Runs the menu loop until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails. Scrape failures are reported and the
/// menu keeps running.
pub async fn run_menu(
    options: &RunOptions,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = Page::ALL.iter().map(Page::label).collect();
    let mut selected = 0;

    loop {
        selected = Select::new()
            .with_prompt("Go to")
            .items(&labels)
            .default(selected)
            .interact()?;

        match Page::ALL[selected] {
            Page::Home => println!("\n{HOME}\n"),
            Page::Bus => scrape_page(ListingKind::Bus, options, multi).await?,
            Page::Train => scrape_page(ListingKind::Train, options, multi).await?,
            Page::Quit => return Ok(()),
        }
    }
}
