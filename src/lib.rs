//! wiki-category-crawler: dump the articles of a Wikipedia category to disk
//!
//! This crate fetches a category listing page, enumerates its member articles
//! and writes either the extracted paragraph text or the server-rendered PDF of
//! every article into an output directory.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("Unexpected page structure at {url}: no element matches '{selector}'")]
    Structure { url: String, selector: String },

    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: state::ArticleState,
        to: state::ArticleState,
    },
}

/// Transport-level failures: the request never completed, or it completed with
/// a status the caller treats as failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Article extraction failures
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error fetching URL: {0}")]
    Fetch(#[from] FetchError),

    #[error("Article has no <title> element")]
    MissingTitle,

    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML{}", describe_toml_error(.0))]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown language '{0}'")]
    UnknownLanguage(String),
}

/// Condenses a TOML error to one line: its location, then its message
///
/// The `Display` form of `toml::de::Error` carries a multi-line source excerpt.
fn describe_toml_error(error: &toml::de::Error) -> String {
    let rendered = error.to_string();
    let location = rendered
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("TOML parse error "))
        .filter(|_| error.span().is_some());
    let message = error.message().split_whitespace().collect::<Vec<_>>().join(" ");

    match location {
        Some(location) => format!(" {}: {}", location, message),
        None => format!(": {}", message),
    }
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlOptions, FailurePolicy, OutputMode};
pub use output::CrawlReport;
pub use state::ArticleState;
pub use url::{ArticleRef, Edition};
