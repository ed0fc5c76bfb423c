//! HTTP fetcher implementation
//!
//! This module handles all network access for the crawler:
//! - Building the HTTP client with the identifying user agent and timeouts
//! - GET requests and status classification
//! - Handing successful bodies to the link extractor
//!
//! The orchestrator only sees the [`Fetch`] trait, so tests can drive a crawl
//! over an in-memory link graph.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::parser::extract_links;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The address that was requested
    pub url: Url,

    /// Page body, treated as text regardless of content type
    pub body: String,

    /// Normalized, deduplicated crawlable links found in the body
    pub links: HashSet<Url>,
}

/// Source of pages for the crawl orchestrator
///
/// Any failure is reported as `None`; implementations log the reason
/// themselves. Returned futures must be `Send` because every fetch runs on a
/// spawned worker task.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, url: &Url) -> impl Future<Output = Option<FetchedPage>> + Send;
}

/// Result of a single HTTP request, before it is collapsed to an `Option`
#[derive(Debug)]
pub enum FetchResult {
    /// Server answered 200 and the body was read
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// Page body content
        body: String,
    },

    /// Server answered with any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Identification sent with every request
/// * `crawler` - Supplies the request timeout
///
/// # Example
///
/// ```no_run
/// use ripple_indexer::config::Config;
/// use ripple_indexer::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.user_agent, &config.crawler).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = crawler.fetch_timeout();

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs one GET request and classifies the outcome
///
/// # Status Handling
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | Success |
/// | Any other status | HttpError |
/// | Timeout | NetworkError |
/// | Connection failure | NetworkError |
/// | Body read failure | NetworkError |
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    match client.get(url.as_str()).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().clone();

            if status != StatusCode::OK {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success { final_url, body },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            FetchResult::NetworkError { error }
        }
    }
}

/// The production fetcher: reqwest for transport, scraper for links
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        crawler: &CrawlerConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(user_agent, crawler)?))
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Option<FetchedPage> {
        match fetch_url(&self.client, url).await {
            FetchResult::Success { final_url, body } => {
                if final_url != *url {
                    tracing::debug!("{} redirected to {}", url, final_url);
                }
                // Relative hrefs are relative to where the body was served
                // from, but the page keeps the identity the frontier admitted.
                let links = extract_links(&body, &final_url);
                tracing::debug!("{}: {} bytes, {} links", url, body.len(), links.len());
                Some(FetchedPage {
                    url: url.clone(),
                    body,
                    links,
                })
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Failed to download {}. Status: {}", url, status_code);
                None
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("I/O error for {}: {}", url, error);
                None
            }
        }
    }
}
