//! End-of-run crawl report

use std::path::PathBuf;

/// One article that could not be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFailure {
    /// Article reference as listed on the category page
    pub article: String,

    /// Error message
    pub message: String,
}

/// What a crawl produced
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Number of unique articles on the category page
    pub listed: usize,

    /// Files written, in listing order
    pub written: Vec<PathBuf>,

    /// Articles skipped after an error (keep-going mode only)
    pub failures: Vec<ArticleFailure>,
}

impl CrawlReport {
    pub fn new(listed: usize) -> Self {
        Self {
            listed,
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Summary lines printed once the crawl has finished
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Wrote {} of {} articles",
            self.written.len(),
            self.listed
        )];

        if !self.failures.is_empty() {
            lines.push(format!("Failed articles ({}):", self.failures.len()));
            for failure in &self.failures {
                lines.push(format!("  - {}: {}", failure.article, failure.message));
            }
        }

        lines
    }
}

/// Prints the report summary to stdout
pub fn print_report(report: &CrawlReport) {
    for line in report.summary_lines() {
        println!("{}", line);
    }
}
