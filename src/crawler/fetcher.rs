//! HTTP client construction and single-page fetching.

use crate::config::UserAgentConfig;
use reqwest::{header, Client};
use std::time::Duration;
use url::Url;

/// Outcome of fetching a single page.
///
/// Failures are classified rather than propagated; a broken page never
/// aborts the crawl.
#[derive(Debug)]
pub enum FetchOutcome {
    /// An HTML page whose links can be extracted. `final_url` is the URL
    /// after any redirects and is what relative links resolve against.
    Page { final_url: Url, body: String },

    /// The server answered with a non-HTML content type.
    NotHtml { content_type: String },

    /// Non-success HTTP status.
    HttpError { status: u16 },

    /// Transport-level failure (connect, timeout, body read).
    Failed { error: String },
}

/// Builds the HTTP client for a crawl run.
///
/// One client serves both the robots.txt fetch and every page fetch.
/// Redirects are followed transparently up to the client's default limit.
pub fn build_http_client(user_agent: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.full_user_agent())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchOutcome {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpError {
            status: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.contains("text/html") {
        return FetchOutcome::NotHtml { content_type };
    }

    let final_url = response.url().clone();
    match response.text().await {
        Ok(body) => FetchOutcome::Page { final_url, body },
        Err(e) => FetchOutcome::Failed {
            error: e.to_string(),
        },
    }
}
