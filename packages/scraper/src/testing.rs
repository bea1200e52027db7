//! Scripted in-memory DOM for exercising interaction failures.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use travel_scrape_browser::{BrowserError, Dom, DomElement, Locator};

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    text: String,
    children: Vec<(Locator, Vec<FakeElement>)>,
    fail_click: bool,
    fail_scroll: bool,
    clicks: Arc<AtomicUsize>,
}

impl FakeElement {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            ..Self::default()
        }
    }

    pub fn with(mut self, locator: &Locator, children: Vec<Self>) -> Self {
        self.children.push((locator.clone(), children));
        self
    }

    pub const fn failing_click(mut self) -> Self {
        self.fail_click = true;
        self
    }

    pub const fn failing_scroll(mut self) -> Self {
        self.fail_scroll = true;
        self
    }

    /// Successful clicks across this element and its clones.
    pub fn clicks(&self) -> usize {
        self.clicks.load(Ordering::SeqCst)
    }
}

impl DomElement for FakeElement {
    async fn text(&self) -> Result<String, BrowserError> {
        Ok(self.text.clone())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>, BrowserError> {
        Ok(self
            .children
            .iter()
            .filter(|(l, _)| l == locator)
            .flat_map(|(_, c)| c.iter().cloned())
            .collect())
    }

    async fn scroll_into_view(&self) -> Result<(), BrowserError> {
        if self.fail_scroll {
            return Err(BrowserError::Script("element is not attached".to_owned()));
        }
        Ok(())
    }

    async fn click(&self) -> Result<(), BrowserError> {
        if self.fail_click {
            return Err(BrowserError::Script("stale element reference".to_owned()));
        }
        self.clicks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeDom {
    elements: Vec<(Locator, Vec<FakeElement>)>,
    fail_queries: bool,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: &Locator, elements: Vec<FakeElement>) -> Self {
        self.elements.push((locator.clone(), elements));
        self
    }

    pub const fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }
}

impl Dom for FakeDom {
    type Element = FakeElement;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<FakeElement>, BrowserError> {
        if self.fail_queries {
            return Err(BrowserError::Script("document detached".to_owned()));
        }
        Ok(self
            .elements
            .iter()
            .filter(|(l, _)| l == locator)
            .flat_map(|(_, e)| e.iter().cloned())
            .collect())
    }
}
