//! Chromium backend using chromiumoxide.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::config::{PageLoad, SessionConfig};
use crate::wait::POLL_INTERVAL;
use crate::{BrowserError, Dom, DomElement, Launcher, Locator, Session};

/// Environment variable pointing at an explicit browser binary.
pub const CHROME_PATH_ENV: &str = "TRAVEL_SCRAPE_CHROME_PATH";

/// Script that reports whether a freshly navigated document has been parsed.
const DOM_READY_SCRIPT: &str =
    "document.readyState !== 'loading' && window.location.href !== 'about:blank'";

/// Locates a Chromium-family browser binary.
///
/// Checks [`CHROME_PATH_ENV`] first, then the system `PATH`. Returns `None`
/// when nothing is found, leaving detection to chromiumoxide.
#[must_use]
pub fn find_chromium() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CHROME_PATH_ENV) {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
        log::warn!("{CHROME_PATH_ENV}={p} does not exist, searching PATH instead");
    }

    ["google-chrome", "chromium", "chromium-browser"]
        .into_iter()
        .find_map(|name| which::which(name).ok())
}

/// Launches headless Chromium sessions.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    config: SessionConfig,
}

impl ChromiumLauncher {
    /// Launcher using `config` for every session.
    #[must_use]
    pub const fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    fn browser_config(&self) -> Result<BrowserConfig, BrowserError> {
        let mut builder = BrowserConfig::builder()
            .window_size(self.config.window_width, self.config.window_height)
            .args(self.config.chrome_args());

        if !self.config.headless {
            builder = builder.with_head();
        }

        if let Some(path) = self
            .config
            .chrome_executable
            .clone()
            .or_else(find_chromium)
        {
            log::debug!("Using browser binary {}", path.display());
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(BrowserError::Launch)
    }
}

impl Launcher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self) -> Result<ChromiumSession, BrowserError> {
        let config = self.browser_config()?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    log::debug!("CDP handler error: {e}");
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        log::info!(
            "Launched headless={} browser session ({}x{})",
            self.config.headless,
            self.config.window_width,
            self.config.window_height
        );

        Ok(ChromiumSession {
            browser,
            page,
            handler_task,
            config: self.config.clone(),
        })
    }
}

/// One Chromium process with a single working tab.
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    config: SessionConfig,
}

impl ChromiumSession {
    async fn navigate_eager(&self, url: &str) -> Result<(), BrowserError> {
        let response = self.page.execute(NavigateParams::new(url)).await?;
        if let Some(message) = response.result.error_text.clone() {
            return Err(BrowserError::Navigation {
                url: url.to_owned(),
                message,
            });
        }

        loop {
            match self.page.evaluate(DOM_READY_SCRIPT).await {
                Ok(result) => {
                    if result.into_value::<bool>().unwrap_or(false) {
                        return Ok(());
                    }
                }
                // The execution context is torn down while the new document
                // commits.
                Err(e) => log::debug!("Ready-state probe failed, retrying: {e}"),
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

impl Dom for ChromiumSession {
    type Element = ChromiumElement;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ChromiumElement>, BrowserError> {
        let elements = self.page.find_elements(locator.to_css()).await?;
        Ok(elements.into_iter().map(ChromiumElement).collect())
    }
}

impl Session for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let timeout = self.config.navigation_timeout();
        log::info!("Navigating to {url} ({:?} page load)", self.config.page_load);

        let result = match self.config.page_load {
            PageLoad::Eager => tokio::time::timeout(timeout, self.navigate_eager(url)).await,
            PageLoad::Normal => tokio::time::timeout(timeout, async {
                self.page.goto(url).await?;
                Ok::<(), BrowserError>(())
            })
            .await,
        };

        result.map_err(|_| BrowserError::Timeout {
            what: format!("navigation to {url}"),
            waited: timeout,
        })?
    }

    async fn close(self) -> Result<(), BrowserError> {
        let Self {
            mut browser,
            page,
            handler_task,
            ..
        } = self;

        if let Err(e) = page.close().await {
            log::debug!("Closing page failed: {e}");
        }
        let closed = browser.close().await;
        let waited = tokio::time::timeout(Duration::from_secs(5), browser.wait()).await;
        handler_task.abort();

        closed?;
        match waited {
            Ok(status) => {
                status?;
            }
            Err(_) => log::warn!("Browser process did not exit within 5s after close"),
        }
        log::info!("Browser session closed");
        Ok(())
    }
}

/// A remote element handle.
pub struct ChromiumElement(Element);

impl ChromiumElement {
    async fn call(&self, function_declaration: &str) -> Result<(), BrowserError> {
        let returns = self.0.call_js_fn(function_declaration, false).await?;
        match returns.exception_details {
            Some(details) => Err(BrowserError::Script(details.text)),
            None => Ok(()),
        }
    }
}

impl DomElement for ChromiumElement {
    async fn text(&self) -> Result<String, BrowserError> {
        Ok(self.0.inner_text().await?.unwrap_or_default())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>, BrowserError> {
        let elements = self.0.find_elements(locator.to_css()).await?;
        Ok(elements.into_iter().map(Self).collect())
    }

    async fn scroll_into_view(&self) -> Result<(), BrowserError> {
        self.call("function() { this.scrollIntoView(true); }").await
    }

    async fn click(&self) -> Result<(), BrowserError> {
        self.call("function() { this.click(); }").await
    }
}
