//! Field extraction primitive.
//!
//! Reads the trimmed text of every element matching a locator, dropping
//! blanks, in document order. No caching and no retry: the result reflects
//! the DOM at call time.

use travel_scrape_browser::{Dom, DomElement, Locator};
use travel_scrape_listing_models::FieldColumn;

use crate::ScrapeError;

/// Trimmed, non-empty texts of `elements`, order preserved.
///
/// # Errors
///
/// Returns [`ScrapeError::Browser`] if reading any element's text fails.
pub async fn clean_texts<E: DomElement>(elements: &[E]) -> Result<Vec<String>, ScrapeError> {
    let mut texts = Vec::with_capacity(elements.len());
    for element in elements {
        let text = element.text().await?;
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            texts.push(trimmed.to_owned());
        }
    }
    Ok(texts)
}

/// Trimmed texts of `elements` with blanks kept, so positions stay
/// meaningful.
///
/// # Errors
///
/// Returns [`ScrapeError::Browser`] if reading any element's text fails.
pub async fn positional_texts<E: DomElement>(elements: &[E]) -> Result<Vec<String>, ScrapeError> {
    let mut texts = Vec::with_capacity(elements.len());
    for element in elements {
        texts.push(element.text().await?.trim().to_owned());
    }
    Ok(texts)
}

/// Extracts the cleaned text of every element on the page matching
/// `locator`.
///
/// # Errors
///
/// Returns [`ScrapeError::Browser`] if the query or a text read fails.
pub async fn extract<D: Dom + ?Sized>(dom: &D, locator: &Locator) -> Result<Vec<String>, ScrapeError> {
    let elements = dom.find_all(locator).await?;
    clean_texts(&elements).await
}

/// Extracts the cleaned text of every descendant of `scope` matching
/// `locator`.
///
/// # Errors
///
/// Returns [`ScrapeError::Browser`] if the query or a text read fails.
pub async fn extract_within<E: DomElement>(
    scope: &E,
    locator: &Locator,
) -> Result<Vec<String>, ScrapeError> {
    let elements = scope.find_all(locator).await?;
    clean_texts(&elements).await
}

/// [`extract`] wrapped as a named [`FieldColumn`].
///
/// # Errors
///
/// Returns [`ScrapeError::Browser`] if the query or a text read fails.
pub async fn extract_column<D: Dom + ?Sized>(
    dom: &D,
    role: &str,
    locator: &Locator,
) -> Result<FieldColumn, ScrapeError> {
    let values = extract(dom, locator).await?;
    log::debug!("{role}: {} value(s) for {locator}", values.len());
    Ok(FieldColumn::new(role, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_scrape_browser::snapshot::StaticDocument;

    #[tokio::test]
    async fn drops_blank_and_whitespace_only_entries() {
        let doc = StaticDocument::new(
            r#"<p class="t"> A </p><p class="t">   </p><p class="t"></p><p class="t">
            B</p>"#,
        );
        let values = extract(&doc, &Locator::class("t")).await.unwrap();
        assert_eq!(values, vec!["A", "B"]);
        assert!(values.iter().all(|v| !v.trim().is_empty()));
    }

    #[tokio::test]
    async fn no_matches_is_an_empty_column() {
        let doc = StaticDocument::new("<div></div>");
        let column = extract_column(&doc, "fare", &Locator::css("span.fare"))
            .await
            .unwrap();
        assert_eq!(column.role, "fare");
        assert!(column.is_empty());
    }

    #[tokio::test]
    async fn positional_texts_keep_blanks() {
        let doc = StaticDocument::new(r#"<div class="g"><span>a</span><span> </span><span>c</span></div>"#);
        let groups = doc.find_all(&Locator::class("g")).await.unwrap();
        let spans = groups[0].find_all(&Locator::tag("span")).await.unwrap();
        assert_eq!(positional_texts(&spans).await.unwrap(), vec!["a", "", "c"]);
        assert_eq!(
            extract_within(&groups[0], &Locator::tag("span")).await.unwrap(),
            vec!["a", "c"]
        );
    }

    #[tokio::test]
    async fn scoped_extraction_and_query_failures() {
        use crate::testing::{FakeDom, FakeElement};

        let row = FakeElement::new("row").with(
            &Locator::class("running"),
            vec![FakeElement::new(" M "), FakeElement::new("")],
        );
        assert_eq!(
            extract_within(&row, &Locator::class("running")).await.unwrap(),
            vec!["M"]
        );

        let dom = FakeDom::new().failing_queries();
        let err = extract(&dom, &Locator::class("name")).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Browser(_)));
    }
}
