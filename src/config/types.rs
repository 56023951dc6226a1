use serde::Deserialize;

/// Selector for the element that holds the member-page listing of a category page
pub const LISTING_CONTAINER: &str = "div#mw-pages";

/// Selector for one member entry inside the listing container
pub const LISTING_ITEM: &str = "li";

/// Selector for the paragraphs whose text makes up an article body
pub const PARAGRAPH: &str = "p";

/// Elements dropped from an article before paragraphs are collected
pub const STRIP_TAGS: &[&str] = &["nav", "script", "style", "footer"];

/// Classes whose elements are dropped from an article before paragraphs are collected
pub const STRIP_CLASSES: &[&str] = &["navbox"];

/// Main configuration structure
///
/// Every section is optional in the TOML file; missing sections fall back to
/// the values the crawler uses without a configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub http: HttpConfig,
    pub extraction: ExtractionConfig,
    #[serde(rename = "language")]
    pub languages: Vec<LanguageEntry>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "wiki-category-crawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/wiki-category-crawler".to_string(),
            contact_email: "crawler@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version (+ContactURL; ContactEmail)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds. Unset means requests may block forever.
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,
}

/// Markup assumptions used by the listing parser and article extractor
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    #[serde(rename = "listing-container")]
    pub listing_container: String,

    #[serde(rename = "listing-item")]
    pub listing_item: String,

    pub paragraph: String,

    #[serde(rename = "strip-tags")]
    pub strip_tags: Vec<String>,

    #[serde(rename = "strip-classes")]
    pub strip_classes: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            listing_container: LISTING_CONTAINER.to_string(),
            listing_item: LISTING_ITEM.to_string(),
            paragraph: PARAGRAPH.to_string(),
            strip_tags: STRIP_TAGS.iter().map(|s| s.to_string()).collect(),
            strip_classes: STRIP_CLASSES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// An extra Wikipedia edition, or an override of a built-in one
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEntry {
    /// Code passed on the command line (e.g. "de")
    pub code: String,

    /// Site root, e.g. "https://de.wikipedia.org"
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Localized category namespace token, e.g. "Kategorie"
    #[serde(rename = "category-namespace")]
    pub category_namespace: String,
}
