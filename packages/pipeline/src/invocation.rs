//! Bus and train scrape invocations.
//!
//! Each invocation launches one session, loads one URL, extracts once, and
//! closes the session before anything is shown, on every path. Extraction
//! failures degrade to a warning and an empty result; setup, navigation,
//! and export failures end the invocation with an error message.

use tokio::time::Instant;
use travel_scrape_browser::{Launcher, Session};
use travel_scrape_listing_models::{BusRecord, ListingKind, TrainRecord};
use travel_scrape_scraper::profile::{BusProfile, OutputSpec, TrainProfile};
use travel_scrape_scraper::progress::{ProgressCallback, ScrapeStage};
use travel_scrape_scraper::{Assembly, ScrapeError, assemble_buses, assemble_trains, expand_all};
use travel_scrape_table::{Table, contains_ignore_case};

use crate::{Frontend, Outcome, PipelineError, ScrapeSummary};

/// Shown when an assembler yields nothing.
pub const NO_DATA_MESSAGE: &str = "No data found. Please check the URL.";

/// Trims `url`, warning through `frontend` and returning `None` when it is
/// empty.
#[must_use]
pub fn accept_url<'a, F: Frontend + ?Sized>(
    url: &'a str,
    kind: ListingKind,
    frontend: &F,
) -> Option<&'a str> {
    let url = url.trim();
    if url.is_empty() {
        frontend.report_warning(&format!("Please enter a valid {} URL.", kind.label()));
        return None;
    }
    Some(url)
}

async fn launch<L: Launcher>(
    launcher: &L,
    progress: &dyn ProgressCallback,
) -> Result<L::Session, PipelineError> {
    progress.stage(ScrapeStage::Launch);
    let session = launcher.launch().await.map_err(PipelineError::Setup)?;
    progress.stage_done(ScrapeStage::Launch);
    Ok(session)
}

async fn load<S: Session>(
    session: &mut S,
    url: &str,
    progress: &dyn ProgressCallback,
) -> Result<(), PipelineError> {
    progress.stage(ScrapeStage::Load);
    session
        .navigate(url)
        .await
        .map_err(|source| PipelineError::Load {
            url: url.to_owned(),
            source,
        })?;
    progress.stage_done(ScrapeStage::Load);
    Ok(())
}

async fn shutdown<S: Session>(session: S) {
    if let Err(e) = session.close().await {
        log::warn!("Failed to close browser session: {e}");
    }
}

fn fail<F: Frontend + ?Sized>(
    frontend: &F,
    progress: &dyn ProgressCallback,
    error: PipelineError,
) -> Outcome {
    log::error!("Scrape failed: {error}");
    progress.finish_and_clear();
    frontend.report_error(&format!("An error occurred: {error}"));
    Outcome::Failed(error)
}

/// Unwraps an assembly, downgrading extraction errors to a warning and an
/// empty result, and surfacing ragged columns.
fn settle<R, F: Frontend + ?Sized>(
    assembled: Result<Assembly<R>, ScrapeError>,
    kind: ListingKind,
    frontend: &F,
) -> Vec<R> {
    let assembly = match assembled {
        Ok(assembly) => assembly,
        Err(e) => {
            let noun = kind.label().to_lowercase();
            log::warn!("{} assembly failed: {e}", kind.label());
            frontend.report_warning(&format!("Error fetching {noun} details: {e}"));
            return Vec::new();
        }
    };

    if assembly.is_ragged() {
        frontend.report_warning(&format!(
            "{} columns had different lengths ({}); rows were reconciled with the '{}' policy",
            kind.label(),
            assembly.describe_lengths(),
            assembly.policy
        ));
    }
    assembly.records
}

/// Displays and exports every non-empty table, returning the filenames
/// offered.
fn present<F: Frontend + ?Sized>(
    frontend: &F,
    outputs: Vec<(&OutputSpec, Table)>,
    progress: &dyn ProgressCallback,
) -> Result<Vec<String>, PipelineError> {
    progress.stage(ScrapeStage::Export);
    let mut files = Vec::new();
    for (spec, table) in outputs {
        if table.is_empty() {
            log::debug!("Skipping empty table '{}'", spec.title);
            continue;
        }
        frontend.display_table(&spec.title, &table);
        let file = table.export(&spec.filename)?;
        frontend
            .offer_download(&file)
            .map_err(|source| PipelineError::Download {
                filename: file.filename.clone(),
                source,
            })?;
        files.push(file.filename);
    }
    progress.stage_done(ScrapeStage::Export);
    Ok(files)
}

fn begin(progress: &dyn ProgressCallback) -> Instant {
    progress.set_total(ScrapeStage::ALL.len() as u64);
    Instant::now()
}

fn complete<F: Frontend + ?Sized>(
    frontend: &F,
    progress: &dyn ProgressCallback,
    presented: Result<Vec<String>, PipelineError>,
    listings: usize,
    started: Instant,
) -> Outcome {
    match presented {
        Ok(files) => {
            progress.finish(format!("Scraped {listings} listing(s)"));
            Outcome::Completed(ScrapeSummary {
                listings,
                files,
                elapsed: started.elapsed(),
            })
        }
        Err(e) => fail(frontend, progress, e),
    }
}

fn no_data<F: Frontend + ?Sized>(frontend: &F, progress: &dyn ProgressCallback) -> Outcome {
    progress.finish_and_clear();
    frontend.report_warning(NO_DATA_MESSAGE);
    Outcome::NoData
}

/// Scrapes the bus listings at `url`.
///
/// Opens collapsed listings first when the profile names expand controls.
/// Results are split by the profile's partition rule (government vs.
/// private by default) and each non-empty part is displayed and offered as
/// its own CSV.
pub async fn scrape_buses<L: Launcher, F: Frontend + ?Sized>(
    launcher: &L,
    profile: &BusProfile,
    url: &str,
    frontend: &F,
    progress: &dyn ProgressCallback,
) -> Outcome {
    let Some(url) = accept_url(url, ListingKind::Bus, frontend) else {
        return Outcome::Skipped;
    };
    let started = begin(progress);

    let mut session = match launch(launcher, progress).await {
        Ok(session) => session,
        Err(e) => return fail(frontend, progress, e),
    };

    let collected = async {
        load(&mut session, url, progress).await?;

        progress.stage(ScrapeStage::Expand);
        if let Some(expand) = &profile.expand {
            let expansion = expand_all(&session, expand).await;
            log::debug!(
                "Expansion: {} succeeded, {} failed",
                expansion.succeeded(),
                expansion.failed()
            );
        }
        progress.stage_done(ScrapeStage::Expand);

        progress.stage(ScrapeStage::Extract);
        let assembled = assemble_buses(&session, profile).await;
        progress.stage_done(ScrapeStage::Extract);
        Ok::<_, PipelineError>(assembled)
    }
    .await;

    shutdown(session).await;

    let assembled = match collected {
        Ok(assembled) => assembled,
        Err(e) => return fail(frontend, progress, e),
    };

    frontend.report_success(&format!(
        "Scraping completed in {:.2} seconds",
        started.elapsed().as_secs_f64()
    ));

    let records = settle(assembled, ListingKind::Bus, frontend);
    if records.is_empty() {
        return no_data(frontend, progress);
    }
    let listings = records.len();

    let rule = &profile.partition;
    let presented = Table::from_listings::<BusRecord>(records)
        .partition(&rule.column, |cell| contains_ignore_case(cell, &rule.needle))
        .map_err(PipelineError::from)
        .and_then(|(matching, rest)| {
            present(
                frontend,
                vec![(&rule.matching, matching), (&rule.rest, rest)],
                progress,
            )
        });

    complete(frontend, progress, presented, listings, started)
}

/// Scrapes the train listings at `url` into a single table.
pub async fn scrape_trains<L: Launcher, F: Frontend + ?Sized>(
    launcher: &L,
    profile: &TrainProfile,
    url: &str,
    frontend: &F,
    progress: &dyn ProgressCallback,
) -> Outcome {
    let Some(url) = accept_url(url, ListingKind::Train, frontend) else {
        return Outcome::Skipped;
    };
    let started = begin(progress);

    let mut session = match launch(launcher, progress).await {
        Ok(session) => session,
        Err(e) => return fail(frontend, progress, e),
    };

    let collected = async {
        load(&mut session, url, progress).await?;
        // Train listings are never collapsed.
        progress.stage_done(ScrapeStage::Expand);

        progress.stage(ScrapeStage::Extract);
        let assembled = assemble_trains(&session, profile).await;
        progress.stage_done(ScrapeStage::Extract);
        Ok::<_, PipelineError>(assembled)
    }
    .await;

    shutdown(session).await;

    let assembled = match collected {
        Ok(assembled) => assembled,
        Err(e) => return fail(frontend, progress, e),
    };

    let records = settle(assembled, ListingKind::Train, frontend);
    if records.is_empty() {
        return no_data(frontend, progress);
    }
    let listings = records.len();
    frontend.report_success(&format!("Found {listings} train listing(s)"));

    let table = Table::from_listings::<TrainRecord>(records);
    let presented = present(frontend, vec![(&profile.output, table)], progress);

    complete(frontend, progress, presented, listings, started)
}
