//! Saved-page backend.
//!
//! Serves a static HTML snapshot through the same [`Dom`] contract as a live
//! browser. Elements are addressed by their child-index path from the
//! document root; the source is re-parsed per query so no parser state is
//! held across `.await` points. Scripted interactions are no-ops because a
//! snapshot cannot re-render.

use std::path::Path;
use std::sync::Arc;

use scraper::{ElementRef, Html, Selector};

use crate::{BrowserError, Dom, DomElement, Launcher, Locator, Session};

fn parse_selector(locator: &Locator) -> Result<Selector, BrowserError> {
    let css = locator.to_css();
    Selector::parse(&css)
        .map_err(|e| BrowserError::Selector(format!("invalid CSS selector '{css}': {e}")))
}

/// Child-index path from the document root to `element`.
fn node_path(element: ElementRef<'_>) -> Vec<usize> {
    let mut path: Vec<usize> = std::iter::once(*element)
        .chain(element.ancestors())
        .filter(|node| node.parent().is_some())
        .map(|node| node.prev_siblings().count())
        .collect();
    path.reverse();
    path
}

fn resolve<'a>(html: &'a Html, path: &[usize]) -> Option<ElementRef<'a>> {
    let mut node = html.tree.root();
    for &index in path {
        node = node.children().nth(index)?;
    }
    ElementRef::wrap(node)
}

fn to_static(source: &Arc<str>, element: ElementRef<'_>) -> StaticElement {
    StaticElement {
        source: Arc::clone(source),
        path: node_path(element),
        text: element.text().collect(),
    }
}

/// A parsed-on-demand HTML document.
#[derive(Debug, Clone)]
pub struct StaticDocument {
    source: Arc<str>,
}

impl StaticDocument {
    /// Wraps raw HTML.
    #[must_use]
    pub fn new(html: &str) -> Self {
        Self {
            source: Arc::from(html),
        }
    }

    /// Reads a saved page from disk.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Io`] if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, BrowserError> {
        let html = std::fs::read_to_string(path)?;
        log::debug!("Loaded {} bytes of HTML from {}", html.len(), path.display());
        Ok(Self::new(&html))
    }
}

impl Dom for StaticDocument {
    type Element = StaticElement;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<StaticElement>, BrowserError> {
        let selector = parse_selector(locator)?;
        let html = Html::parse_document(&self.source);
        Ok(html
            .select(&selector)
            .map(|el| to_static(&self.source, el))
            .collect())
    }
}

/// An element of a [`StaticDocument`].
#[derive(Debug, Clone)]
pub struct StaticElement {
    source: Arc<str>,
    path: Vec<usize>,
    text: String,
}

impl DomElement for StaticElement {
    async fn text(&self) -> Result<String, BrowserError> {
        Ok(self.text.clone())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>, BrowserError> {
        let selector = parse_selector(locator)?;
        let html = Html::parse_document(&self.source);
        let Some(scope) = resolve(&html, &self.path) else {
            return Err(BrowserError::Script(format!(
                "stale element at path {:?}",
                self.path
            )));
        };
        Ok(scope
            .select(&selector)
            .filter(|el| el.id() != scope.id())
            .map(|el| to_static(&self.source, el))
            .collect())
    }

    async fn scroll_into_view(&self) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn click(&self) -> Result<(), BrowserError> {
        log::debug!("Ignoring click on static element at path {:?}", self.path);
        Ok(())
    }
}

/// A session over a [`StaticDocument`]; navigation is a no-op.
#[derive(Debug)]
pub struct StaticSession {
    document: StaticDocument,
}

impl Dom for StaticSession {
    type Element = StaticElement;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<StaticElement>, BrowserError> {
        self.document.find_all(locator).await
    }
}

impl Session for StaticSession {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        log::info!("Serving saved snapshot in place of {url}");
        Ok(())
    }

    async fn close(self) -> Result<(), BrowserError> {
        Ok(())
    }
}

/// Hands out sessions over one saved page.
#[derive(Debug, Clone)]
pub struct StaticLauncher {
    document: StaticDocument,
}

impl StaticLauncher {
    /// Launcher serving `document` to every session.
    #[must_use]
    pub const fn new(document: StaticDocument) -> Self {
        Self { document }
    }
}

impl Launcher for StaticLauncher {
    type Session = StaticSession;

    async fn launch(&self) -> Result<StaticSession, BrowserError> {
        Ok(StaticSession {
            document: self.document.clone(),
        })
    }
}
