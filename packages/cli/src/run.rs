//! Wiring from parsed options to one pipeline invocation.

use std::path::{Path, PathBuf};

use clap::Args;
use travel_scrape_browser::Launcher;
use travel_scrape_browser::chromium::ChromiumLauncher;
use travel_scrape_browser::snapshot::{StaticDocument, StaticLauncher};
use travel_scrape_cli_utils::{IndicatifProgress, MultiProgress};
use travel_scrape_listing_models::ListingKind;
use travel_scrape_pipeline::{
    Frontend, Outcome, PipelineError, accept_url, scrape_buses, scrape_trains,
};
use travel_scrape_scraper::progress::ProgressCallback;
use travel_scrape_scraper::{ScrapeError, SiteProfile};

use crate::frontend::TerminalFrontend;

/// Options shared by every scrape, from flags or the environment.
#[derive(Debug, Clone, Args)]
pub struct RunOptions {
    /// Directory CSV files are written to
    #[arg(long, global = true, default_value = ".")]
    pub output_dir: PathBuf,
    /// Site profile TOML file replacing the built-in `abhibus` profile
    #[arg(long, global = true, env = "TRAVEL_SCRAPE_PROFILE")]
    pub profile: Option<PathBuf>,
    /// Saved HTML page to extract from instead of launching a browser
    #[arg(long, global = true)]
    pub html_file: Option<PathBuf>,
}

/// Loads the profile at `path`, or the built-in default.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the file cannot be read or parsed.
pub fn load_profile(path: Option<&Path>) -> Result<SiteProfile, ScrapeError> {
    match path {
        Some(path) => SiteProfile::from_file(path),
        None => SiteProfile::default_profile(),
    }
}

async fn dispatch<L: Launcher, F: Frontend>(
    kind: ListingKind,
    launcher: &L,
    profile: &SiteProfile,
    url: &str,
    frontend: &F,
    progress: &dyn ProgressCallback,
) -> Outcome {
    match kind {
        ListingKind::Bus => scrape_buses(launcher, &profile.bus, url, frontend, progress).await,
        ListingKind::Train => {
            scrape_trains(launcher, &profile.train, url, frontend, progress).await
        }
    }
}

fn setup_failed<F: Frontend>(frontend: &F, error: PipelineError) -> Outcome {
    log::error!("Scrape setup failed: {error}");
    frontend.report_error(&format!("An error occurred: {error}"));
    Outcome::Failed(error)
}

/// Scrapes `url` for `kind` listings and saves the results.
///
/// An empty URL is reported and skipped before anything is loaded. Profile
/// and saved-page failures are reported like scrape failures and returned
/// as [`Outcome::Failed`].
pub async fn run(
    kind: ListingKind,
    url: &str,
    options: &RunOptions,
    multi: &MultiProgress,
) -> Outcome {
    let frontend = TerminalFrontend::new(options.output_dir.clone(), multi.clone());
    let Some(url) = accept_url(url, kind, &frontend) else {
        return Outcome::Skipped;
    };

    let profile = match load_profile(options.profile.as_deref()) {
        Ok(profile) => profile,
        Err(e) => return setup_failed(&frontend, PipelineError::Scrape(e)),
    };
    log::debug!(
        "Using profile '{}' for {} ({})",
        profile.id,
        profile.name,
        profile.convention
    );

    let snapshot = match &options.html_file {
        Some(path) => match StaticDocument::from_file(path) {
            Ok(document) => Some(document),
            Err(source) => {
                let url = path.display().to_string();
                return setup_failed(&frontend, PipelineError::Load { url, source });
            }
        },
        None => None,
    };

    let progress =
        IndicatifProgress::stages_bar(multi, &format!("Scraping {} listings", kind.label()));

    match snapshot {
        Some(document) => {
            let launcher = StaticLauncher::new(document);
            dispatch(kind, &launcher, &profile, url, &frontend, progress.as_ref()).await
        }
        None => {
            let launcher = ChromiumLauncher::new(profile.browser.clone());
            dispatch(kind, &launcher, &profile, url, &frontend, progress.as_ref()).await
        }
    }
}
