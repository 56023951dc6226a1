use crate::config::types::{Config, ExtractionConfig, HttpConfig, LanguageEntry, UserAgentConfig};
use crate::ConfigError;
use reqwest::header::HeaderValue;
use scraper::Selector;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_user_agent_config(&config.user_agent)?;
    validate_http_config(&config.http)?;
    validate_extraction_config(&config.extraction)?;
    validate_languages(&config.languages)?;
    Ok(())
}

/// The user agent must form a legal `Name/Version (+url; email)` header
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Name and version are product tokens: no whitespace, no '/', no parentheses
    for (field, token) in [
        ("crawler-name", &config.crawler_name),
        ("crawler-version", &config.crawler_version),
    ] {
        if token.is_empty() || token.contains(|c: char| c.is_whitespace() || "/()".contains(c)) {
            return Err(ConfigError::Validation(format!(
                "{} must be a single product token, got '{}'",
                field, token
            )));
        }
    }

    let url = Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "contact-url '{}' must use http or https",
            config.contact_url
        )));
    }

    validate_email(&config.contact_email)?;

    HeaderValue::from_str(&config.header_value()).map_err(|_| {
        ConfigError::Validation(format!(
            "user agent '{}' is not a valid header value",
            config.header_value()
        ))
    })?;

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1 when set".to_string(),
        ));
    }
    Ok(())
}

/// Every selector must parse, and the strip lists may not contain blanks
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    for (name, selector) in [
        ("listing_container", &config.listing_container),
        ("listing_item", &config.listing_item),
        ("paragraph", &config.paragraph),
    ] {
        if Selector::parse(selector).is_err() {
            return Err(ConfigError::Validation(format!(
                "{} is not a valid CSS selector: '{}'",
                name, selector
            )));
        }
    }

    for tag in &config.strip_tags {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "strip-tags entries must be bare tag names, got '{}'",
                tag
            )));
        }
    }

    for class in &config.strip_classes {
        if !is_class_name(class) {
            return Err(ConfigError::Validation(format!(
                "strip-classes entries must be plain class names, got '{}'",
                class
            )));
        }
    }

    Ok(())
}

/// Validates language edition entries
fn validate_languages(entries: &[LanguageEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in entries {
        if entry.code.is_empty() {
            return Err(ConfigError::Validation(
                "language code cannot be empty".to_string(),
            ));
        }

        if !seen.insert(entry.code.as_str()) {
            return Err(ConfigError::Validation(format!(
                "language '{}' is declared more than once",
                entry.code
            )));
        }

        let url = Url::parse(&entry.base_url).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid base-url '{}' for language '{}': {}",
                entry.base_url, entry.code, e
            ))
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::Validation(format!(
                "base-url '{}' must use http or https",
                entry.base_url
            )));
        }

        if entry.category_namespace.is_empty() || entry.category_namespace.contains(['/', ':']) {
            return Err(ConfigError::Validation(format!(
                "category-namespace for language '{}' must be a bare token, got '{}'",
                entry.code, entry.category_namespace
            )));
        }
    }

    Ok(())
}

/// Letters, digits, `-` and `_`, not starting with a digit
fn is_class_name(class: &str) -> bool {
    let body = class.strip_prefix('-').unwrap_or(class);
    match body.chars().next() {
        Some(first) if !first.is_ascii_digit() => class
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
        _ => false,
    }
}

/// Requires `local@domain.tld` with no whitespace
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|label| !label.is_empty())
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "contact-email '{}' is not an address",
            email
        )))
    }
}
