//! Article text extraction
//!
//! Reduces a full article page to its title and paragraph text. Navigation,
//! scripts, styles, footers and navigation boxes are removed from the tree
//! first, so paragraphs nested inside them never reach the output.

use crate::config::ExtractionConfig;
use crate::crawler::fetcher::fetch_article;
use crate::ExtractionError;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Separator appended after every paragraph before the final trim
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Title and plain-text body of one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub body: String,
}

/// Where the article HTML comes from
#[derive(Debug, Clone, Copy)]
pub enum ArticleSource<'a> {
    /// HTML that is already in memory
    Html(&'a str),
    /// Page to download first
    Url(&'a Url),
}

/// Extracts articles according to a set of markup rules
#[derive(Debug)]
pub struct ArticleExtractor {
    strip_tags: Vec<String>,
    strip_classes: Vec<String>,
    paragraph: Selector,
    title: Selector,
}

impl ArticleExtractor {
    /// Compiles the paragraph selector and takes the strip lists from `rules`
    pub fn new(rules: &ExtractionConfig) -> Result<Self, ExtractionError> {
        Ok(Self {
            strip_tags: rules.strip_tags.clone(),
            strip_classes: rules.strip_classes.clone(),
            paragraph: create_selector(&rules.paragraph)?,
            title: create_selector("title")?,
        })
    }

    /// Extracts an article from HTML or, for `ArticleSource::Url`, downloads it first
    ///
    /// # Errors
    ///
    /// * `ExtractionError::Fetch` - the download failed or returned a non-2xx status
    /// * `ExtractionError::MissingTitle` - the page has no `<title>`
    pub async fn extract(
        &self,
        client: &Client,
        source: ArticleSource<'_>,
    ) -> Result<Article, ExtractionError> {
        match source {
            ArticleSource::Html(html) => self.extract_html(html),
            ArticleSource::Url(url) => {
                let html = fetch_article(client, url).await?;
                self.extract_html(&html)
            }
        }
    }

    /// Extracts title and body from article HTML
    ///
    /// A page without paragraphs yields an empty body.
    pub fn extract_html(&self, html: &str) -> Result<Article, ExtractionError> {
        let mut document = Html::parse_document(html);

        let doomed: Vec<_> = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| self.is_stripped(element))
            .map(|element| element.id())
            .collect();
        tracing::trace!("Stripping {} elements", doomed.len());
        for id in doomed {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }

        // Html::select also visits detached nodes; walk from the root instead.
        let root = document.root_element();

        let mut body = String::new();
        for paragraph in root.select(&self.paragraph) {
            body.extend(paragraph.text());
            body.push_str(PARAGRAPH_SEPARATOR);
        }

        let title = root
            .select(&self.title)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .ok_or(ExtractionError::MissingTitle)?;

        Ok(Article {
            title,
            body: body.trim().to_string(),
        })
    }

    /// Whether the element's tag is a strip tag or one of its class tokens is a strip class
    fn is_stripped(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        self.strip_tags
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(value.name()))
            || value
                .classes()
                .any(|class| self.strip_classes.iter().any(|strip| strip == class))
    }
}

#[inline]
fn create_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|_| ExtractionError::InvalidSelector(selector.to_string()))
}
