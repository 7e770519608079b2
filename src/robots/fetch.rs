//! Single tolerant fetch of a site's robots.txt.

use crate::RobotsError;
use reqwest::{Client, StatusCode};
use url::Url;

/// Fetches `<origin>/robots.txt`, treating absence as "no policy".
///
/// Transport errors and non-200 statuses yield `Ok(None)` so the engine
/// falls back to allowing everything; redirects are followed by the client.
/// Only a body read that fails after a 200 response is surfaced.
pub(crate) async fn fetch_robots_body(
    client: &Client,
    origin: &Url,
) -> Result<Option<String>, RobotsError> {
    let mut robots_url = origin.clone();
    robots_url.set_path("/robots.txt");
    robots_url.set_query(None);
    robots_url.set_fragment(None);

    let response = match client.get(robots_url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(url = %robots_url, "robots.txt fetch failed, allowing all paths: {}", e);
            return Ok(None);
        }
    };

    if response.status() != StatusCode::OK {
        tracing::debug!(
            url = %robots_url,
            status = %response.status(),
            "no robots.txt, allowing all paths"
        );
        return Ok(None);
    }

    let body = response.text().await.map_err(RobotsError::BodyRead)?;
    Ok(Some(body))
}
