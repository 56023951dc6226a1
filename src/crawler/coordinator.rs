//! Crawler coordinator - main crawl orchestration logic
//!
//! One run walks `Init → ListingFetched → (Fetching → Extracting → Writing)* → Done`.
//! Articles are handled one at a time in listing order. By default the first
//! failing article aborts the run; files written before it stay on disk.

use crate::config::{Config, ExtractionConfig};
use crate::crawler::extractor::{ArticleExtractor, ArticleSource};
use crate::crawler::fetcher::{build_http_client, fetch_article, fetch_listing, fetch_pdf};
use crate::crawler::parser::parse_category_page;
use crate::output::{ArticleFailure, CrawlReport, OutputWriter};
use crate::state::{ArticleState, ArticleTracker};
use crate::url::{resolve_edition, ArticleRef, Edition};
use crate::{CrawlError, ExtractionError};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::path::PathBuf;

/// What gets written for each article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Extracted paragraph text as `<title>.txt`
    #[default]
    Text,
    /// Server-rendered PDF as `PDF/<short-name>.pdf`
    Pdf,
}

/// What happens when a single article fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the run with the article's error
    #[default]
    Abort,
    /// Record the failure in the report and continue with the next article
    KeepGoing,
}

/// Parameters of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Category name without namespace, e.g. "Search_algorithms"
    pub category: String,

    /// Directory receiving the output files
    pub output_dir: PathBuf,

    /// Language edition code, e.g. "en"
    pub language: String,

    pub mode: OutputMode,

    pub failure_policy: FailurePolicy,

    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl CrawlOptions {
    /// Text mode, English edition, abort on failure, no progress bar
    pub fn new(category: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            category: category.into(),
            output_dir: output_dir.into(),
            language: crate::url::DEFAULT_LANGUAGE.to_string(),
            mode: OutputMode::default(),
            failure_policy: FailurePolicy::default(),
            show_progress: false,
        }
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    options: CrawlOptions,
    edition: Edition,
    client: Client,
    extractor: ArticleExtractor,
    rules: ExtractionConfig,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `options` - What to crawl and where to write it
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - Unknown language, bad selector or HTTP client failure
    pub fn new(config: &Config, options: CrawlOptions) -> Result<Self, CrawlError> {
        let edition = resolve_edition(&options.language, config)?;
        let client =
            build_http_client(&config.user_agent, &config.http).map_err(CrawlError::Client)?;
        let extractor = ArticleExtractor::new(&config.extraction)?;

        Ok(Self {
            options,
            edition,
            client,
            extractor,
            rules: config.extraction.clone(),
        })
    }

    pub fn edition(&self) -> &Edition {
        &self.edition
    }

    /// Runs the crawl
    ///
    /// 1. Creates the output directory
    /// 2. Fetches and parses the category listing
    /// 3. Fetches and writes every article in listing order
    pub async fn run(&self) -> Result<CrawlReport, CrawlError> {
        tracing::info!(
            "Crawling category '{}' on {} ({}) into {}",
            self.options.category,
            self.edition.code(),
            self.edition.base_url(),
            self.options.output_dir.display()
        );

        let writer = OutputWriter::create(&self.options.output_dir).await?;
        let articles = self.list_articles().await?;
        tracing::info!("Category lists {} articles", articles.len());

        if self.options.mode == OutputMode::Pdf {
            writer.ensure_pdf_dir().await?;
        }

        let mut report = CrawlReport::new(articles.len());
        let progress = self.progress_bar(articles.len());

        for article in &articles {
            progress.set_message(article.short_name().to_string());

            match self.process_article(&writer, article).await {
                Ok(path) => report.written.push(path),
                Err(e) if self.options.failure_policy == FailurePolicy::KeepGoing => {
                    tracing::warn!("Skipping {}: {}", article, e);
                    report.failures.push(ArticleFailure {
                        article: article.to_string(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        tracing::info!(
            "Crawl finished: {} written, {} failed",
            report.written.len(),
            report.failures.len()
        );

        Ok(report)
    }

    /// Fetches the category page and returns its unique member articles
    async fn list_articles(&self) -> Result<Vec<ArticleRef>, CrawlError> {
        let url = self.edition.category_url(&self.options.category)?;
        let html = fetch_listing(&self.client, &url).await?;
        parse_category_page(&html, url.as_str(), &self.rules)
    }

    /// Fetches one article and writes its artifact, returning the written path
    async fn process_article(
        &self,
        writer: &OutputWriter,
        article: &ArticleRef,
    ) -> Result<PathBuf, CrawlError> {
        let mut tracker = ArticleTracker::new();

        let result = match self.options.mode {
            OutputMode::Text => self.write_text(writer, article, &mut tracker).await,
            OutputMode::Pdf => self.write_pdf(writer, article, &mut tracker).await,
        };

        match result {
            Ok(path) => {
                tracker.advance(ArticleState::Written)?;
                tracing::debug!("{} -> {}", article, path.display());
                Ok(path)
            }
            Err(e) => {
                tracing::debug!("{} failed while {}", article, tracker.state());
                tracker.advance(ArticleState::Failed)?;
                Err(e)
            }
        }
    }

    async fn write_text(
        &self,
        writer: &OutputWriter,
        article: &ArticleRef,
        tracker: &mut ArticleTracker,
    ) -> Result<PathBuf, CrawlError> {
        let url = self.edition.article_url(article)?;

        // Same wrapping as ArticleSource::Url, split so the tracker sees both steps
        tracker.advance(ArticleState::Fetching)?;
        let html = fetch_article(&self.client, &url)
            .await
            .map_err(ExtractionError::from)?;

        tracker.advance(ArticleState::Extracting)?;
        let extracted = self
            .extractor
            .extract(&self.client, ArticleSource::Html(&html))
            .await?;

        tracker.advance(ArticleState::Writing)?;
        writer.write_text(&extracted.title, &extracted.body).await
    }

    async fn write_pdf(
        &self,
        writer: &OutputWriter,
        article: &ArticleRef,
        tracker: &mut ArticleTracker,
    ) -> Result<PathBuf, CrawlError> {
        let short_name = article.short_name();
        let url = self.edition.pdf_url(short_name)?;

        tracker.advance(ArticleState::Fetching)?;
        let bytes = fetch_pdf(&self.client, &url).await?;

        tracker.advance(ArticleState::Writing)?;
        writer.write_pdf(short_name, &bytes).await
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(len as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress
    }
}

/// Runs a complete crawl
///
/// # Example
///
/// ```no_run
/// use wiki_category_crawler::config::Config;
/// use wiki_category_crawler::crawler::{run_crawl, CrawlOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let options = CrawlOptions::new("Search_algorithms", "search-algorithms");
/// let report = run_crawl(&Config::default(), options).await?;
/// println!("{} files written", report.written.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, options: CrawlOptions) -> Result<CrawlReport, CrawlError> {
    let coordinator = Coordinator::new(config, options)?;
    coordinator.run().await
}
