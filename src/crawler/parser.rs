//! Category listing parser
//!
//! A Wikipedia category page renders its member articles as list items inside
//! a single container (`div#mw-pages`). This is the only structural assumption
//! made here, and it is configurable through `ExtractionConfig`.

use crate::config::ExtractionConfig;
use crate::url::ArticleRef;
use crate::CrawlError;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Insertion-ordered collection that ignores keys it has already seen
#[derive(Debug)]
pub struct UniqueList<K, V> {
    seen: HashSet<K>,
    items: Vec<V>,
}

impl<K: std::hash::Hash + Eq, V> UniqueList<K, V> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    /// Appends `make()` unless `key` was pushed before. Returns whether it was appended.
    pub fn push_with(&mut self, key: K, make: impl FnOnce() -> V) -> bool {
        if !self.seen.insert(key) {
            return false;
        }
        self.items.push(make());
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<V> {
        self.items
    }
}

impl<K: std::hash::Hash + Eq, V> Default for UniqueList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the member articles of a category listing page
///
/// # Steps
///
/// 1. Find the listing container; fail with `CrawlError::Structure` if absent
/// 2. Take the first anchor's `href` from every list item in the container
/// 3. Drop repeated `href`s, keeping the first occurrence
/// 4. Percent-decode each surviving `href` into an `ArticleRef`
///
/// # Arguments
///
/// * `html` - The listing page HTML
/// * `page_url` - Where the HTML came from, for error messages
/// * `rules` - Container and item selectors
///
/// # Example
///
/// ```
/// use wiki_category_crawler::config::ExtractionConfig;
/// use wiki_category_crawler::crawler::parse_category_page;
///
/// let html = r#"<div id="mw-pages"><ul>
///     <li><a href="/wiki/A">A</a></li>
///     <li><a href="/wiki/B">B</a></li>
///     <li><a href="/wiki/A">A</a></li>
/// </ul></div>"#;
/// let articles = parse_category_page(html, "https://example.org", &ExtractionConfig::default()).unwrap();
/// assert_eq!(articles.len(), 2);
/// assert_eq!(articles[0].as_str(), "/wiki/A");
/// ```
pub fn parse_category_page(
    html: &str,
    page_url: &str,
    rules: &ExtractionConfig,
) -> Result<Vec<ArticleRef>, CrawlError> {
    let container_selector = create_selector(&rules.listing_container)?;
    let item_selector = create_selector(&rules.listing_item)?;
    let anchor_selector = create_selector("a")?;

    let document = Html::parse_document(html);

    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| CrawlError::Structure {
            url: page_url.to_string(),
            selector: rules.listing_container.clone(),
        })?;

    let mut articles = UniqueList::new();
    for item in container.select(&item_selector) {
        let href = item
            .select(&anchor_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("href"));

        match href {
            Some(href) => {
                articles.push_with(href.to_string(), || ArticleRef::from_href(href));
            }
            None => tracing::debug!("Skipping listing item without a link"),
        }
    }

    tracing::debug!("Found {} unique articles on {}", articles.len(), page_url);
    Ok(articles.into_vec())
}

#[inline]
fn create_selector(selector: &str) -> Result<Selector, CrawlError> {
    Selector::parse(selector).map_err(|_| CrawlError::InvalidSelector(selector.to_string()))
}
