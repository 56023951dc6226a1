//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent
//! - Fetching the category listing as text
//! - Fetching article HTML with a status check
//! - Fetching PDF renditions as raw bytes
//!
//! Requests are never retried.

use crate::config::{HttpConfig, UserAgentConfig};
use crate::FetchError;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Optional request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use wiki_category_crawler::config::{HttpConfig, UserAgentConfig};
/// use wiki_category_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent.header_value())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = http.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a category listing page and returns its body as text
///
/// The status code is not checked: an error page simply lacks the listing
/// container and is reported by the parser. The response is consumed by
/// `text()`, which releases the connection on every path.
pub async fn fetch_listing(client: &Client, url: &Url) -> Result<String, FetchError> {
    tracing::debug!("Fetching category listing {}", url);

    let response = send(client.get(url.clone()), url).await?;
    tracing::debug!("Listing responded with HTTP {}", response.status());

    read_text(response, url).await
}

/// Fetches an article page and returns its body as text
///
/// # Errors
///
/// * `FetchError::Transport` - the request could not be completed
/// * `FetchError::Status` - the server answered with a non-2xx status
pub async fn fetch_article(client: &Client, url: &Url) -> Result<String, FetchError> {
    tracing::debug!("Fetching article {}", url);

    let response = send(client.get(url.clone()), url).await?;
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    read_text(response, url).await
}

/// Fetches the PDF rendition of an article and returns the raw payload
///
/// Sends `Accept: application/pdf`. The status code is deliberately not
/// checked, so an HTTP error body comes back as if it were the PDF.
pub async fn fetch_pdf(client: &Client, url: &Url) -> Result<Vec<u8>, FetchError> {
    tracing::debug!("Fetching PDF {}", url);

    let response = send(client.get(url.clone()).header(ACCEPT, "application/pdf"), url).await?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!("PDF endpoint answered HTTP {} for {}", status, url);
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| transport(url, source))?;

    Ok(bytes.to_vec())
}

async fn send(request: reqwest::RequestBuilder, url: &Url) -> Result<Response, FetchError> {
    request.send().await.map_err(|source| transport(url, source))
}

async fn read_text(response: Response, url: &Url) -> Result<String, FetchError> {
    response.text().await.map_err(|source| transport(url, source))
}

fn transport(url: &Url, source: reqwest::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        source,
    }
}
