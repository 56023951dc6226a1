//! Crawler module for category and article processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of listings, articles and PDF renditions
//! - Category listing parsing
//! - Article text extraction
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlOptions, FailurePolicy, OutputMode};
pub use extractor::{Article, ArticleExtractor, ArticleSource};
pub use fetcher::{build_http_client, fetch_article, fetch_listing, fetch_pdf};
pub use parser::{parse_category_page, UniqueList};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Resolve the language edition and build the HTTP client
/// 2. Create the output directory
/// 3. Fetch the category listing and collect its member articles
/// 4. Fetch each article and write its text or PDF
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `options` - Category, output directory, language and mode
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl ran to completion
/// * `Err(CrawlError)` - Crawl aborted
pub async fn crawl(config: &Config, options: CrawlOptions) -> Result<CrawlReport, CrawlError> {
    run_crawl(config, options).await
}
