use crate::config::Config;
use crate::url::ArticleRef;
use crate::ConfigError;
use ::url::Url;

/// Path prefix of article pages on every Wikipedia edition
const WIKI_PATH: &str = "/wiki/";

/// Path prefix of the server-side PDF renderer
const PDF_PATH: &str = "/api/rest_v1/page/pdf/";

/// Built-in editions as (code, base url, category namespace token)
const BUILTIN_EDITIONS: &[(&str, &str, &str)] = &[
    ("en", "https://en.wikipedia.org", "Category"),
    ("tr", "https://tr.wikipedia.org", "Kategori"),
];

/// Code used when no language is given
pub const DEFAULT_LANGUAGE: &str = "en";

/// A Wikipedia language edition: a site root plus its localized category namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edition {
    code: String,
    base_url: String,
    category_namespace: String,
}

impl Edition {
    /// Creates an edition; a trailing slash on `base_url` is dropped
    pub fn new(code: &str, base_url: &str, category_namespace: &str) -> Self {
        Self {
            code: code.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            category_namespace: category_namespace.to_string(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn category_namespace(&self) -> &str {
        &self.category_namespace
    }

    /// `<base>/wiki/<Namespace>:<category>`
    ///
    /// # Examples
    ///
    /// ```
    /// use wiki_category_crawler::url::Edition;
    ///
    /// let tr = Edition::new("tr", "https://tr.wikipedia.org", "Kategori");
    /// let url = tr.category_url("Arama_algoritmaları").unwrap();
    /// assert!(url.as_str().starts_with("https://tr.wikipedia.org/wiki/Kategori:Arama_algoritmalar"));
    /// ```
    pub fn category_url(&self, category: &str) -> Result<Url, ::url::ParseError> {
        Url::parse(&format!(
            "{}{}{}:{}",
            self.base_url, WIKI_PATH, self.category_namespace, category
        ))
    }

    /// `<base><reference>`
    pub fn article_url(&self, article: &ArticleRef) -> Result<Url, ::url::ParseError> {
        Url::parse(&format!("{}{}", self.base_url, article.as_str()))
    }

    /// `<base>/api/rest_v1/page/pdf/<short-name>`
    pub fn pdf_url(&self, short_name: &str) -> Result<Url, ::url::ParseError> {
        Url::parse(&format!("{}{}{}", self.base_url, PDF_PATH, short_name))
    }
}

/// Finds the edition for a language code
///
/// Editions declared in the configuration take precedence over the built-in
/// `en` and `tr` editions.
///
/// # Errors
///
/// Returns `ConfigError::UnknownLanguage` when neither the configuration nor
/// the built-ins know the code.
pub fn resolve_edition(code: &str, config: &Config) -> Result<Edition, ConfigError> {
    if let Some(entry) = config.languages.iter().find(|entry| entry.code == code) {
        return Ok(Edition::new(
            &entry.code,
            &entry.base_url,
            &entry.category_namespace,
        ));
    }

    BUILTIN_EDITIONS
        .iter()
        .find(|(builtin, _, _)| *builtin == code)
        .map(|(code, base_url, namespace)| Edition::new(code, base_url, namespace))
        .ok_or_else(|| {
            tracing::debug!(
                "Unknown language '{}', available: {}",
                code,
                available_languages(config).join(", ")
            );
            ConfigError::UnknownLanguage(code.to_string())
        })
}

/// Codes of every edition available under `config`, built-ins first
pub fn available_languages(config: &Config) -> Vec<String> {
    let mut codes: Vec<String> = BUILTIN_EDITIONS
        .iter()
        .map(|(code, _, _)| code.to_string())
        .collect();

    for entry in &config.languages {
        if !codes.contains(&entry.code) {
            codes.push(entry.code.clone());
        }
    }

    codes
}
