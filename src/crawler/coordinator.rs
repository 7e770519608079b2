//! Crawl orchestration: the loop that drives fetching, anchor extraction,
//! and the robots admissibility gate.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::frontier::{Frontier, QueuedUrl};
use crate::crawler::parser::parse_html;
use crate::output::UrlList;
use crate::robots::Robots;
use crate::url::{clean_url, is_same_site, looks_like_file, registrable_domain, site_label};
use crate::{ConfigError, KumoError};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use url::Url;

/// Counters reported at the end of a crawl.
#[derive(Debug, Default, Clone)]
pub struct CrawlSummary {
    /// Pages fetched and parsed.
    pub pages_fetched: u64,

    /// Distinct same-site URLs discovered (the output file's line count).
    pub urls_discovered: u64,

    /// Candidate links rejected by robots.txt.
    pub denied_by_robots: u64,

    /// Fetched URLs that turned out not to be HTML.
    pub non_html: u64,

    /// Fetches that failed outright or returned an error status.
    pub fetch_errors: u64,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,

    /// Path of the written URL list.
    pub output_path: PathBuf,
}

/// Drives one crawl session over a single site.
///
/// Construction does all the one-time work: seed validation, HTTP client
/// setup, and the single robots.txt fetch. `run` then walks the site.
pub struct Coordinator {
    config: Config,
    client: Client,
    robots: Robots,
    seed: Url,
    site_domain: String,
}

impl Coordinator {
    /// Creates a coordinator for the configured site.
    pub async fn new(config: Config) -> Result<Self, KumoError> {
        let seed = parse_seed(&config.site.seed)?;
        let origin = seed.origin().ascii_serialization();
        let site_domain = registrable_domain(seed.host_str().unwrap_or_default());

        let client = build_http_client(&config.user_agent)?;

        let robots = if config.crawler.ignore_robots {
            tracing::warn!("robots.txt policy disabled by configuration");
            Robots::unrestricted(&origin, &config.user_agent.crawler_name)?
        } else {
            Robots::build(&client, &origin, &config.user_agent.crawler_name).await?
        };

        if !robots.sitemaps().is_empty() {
            tracing::info!(
                "robots.txt declares {} sitemap(s); recording only",
                robots.sitemaps().len()
            );
        }

        Ok(Self {
            config,
            client,
            robots,
            seed,
            site_domain,
        })
    }

    /// Runs the crawl to completion and writes the URL list.
    pub async fn run(&self) -> Result<CrawlSummary, KumoError> {
        let started = Instant::now();
        tracing::info!(seed = %self.seed, site = %self.site_domain, "starting crawl");

        let crawl_delay = self.robots.crawl_delay();
        if !crawl_delay.is_zero() {
            tracing::info!("honoring crawl-delay of {:?} between requests", crawl_delay);
        }

        let mut summary = CrawlSummary::default();
        let mut frontier = Frontier::new();
        let mut url_list = UrlList::new();

        let seed = clean_url(&self.seed);
        frontier.push(seed.clone(), 0);
        url_list.push(seed.as_str());

        let max_in_flight = self.config.crawler.max_concurrent_requests.max(1) as usize;
        let mut in_flight: JoinSet<(QueuedUrl, FetchOutcome)> = JoinSet::new();

        loop {
            // Keep the fetch pool full.
            while in_flight.len() < max_in_flight {
                let queued = match frontier.pop() {
                    Some(queued) => queued,
                    None => break,
                };

                let client = self.client.clone();
                in_flight.spawn(async move {
                    let outcome = fetch_page(&client, &queued.url).await;
                    (queued, outcome)
                });

                if !crawl_delay.is_zero() {
                    tokio::time::sleep(crawl_delay).await;
                }
            }

            let joined = match in_flight.join_next().await {
                Some(joined) => joined,
                None => break, // frontier drained and nothing in flight
            };

            let (queued, outcome) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::error!("fetch task failed: {}", e);
                    summary.fetch_errors += 1;
                    continue;
                }
            };

            self.handle_outcome(queued, outcome, &mut frontier, &mut url_list, &mut summary);
        }

        summary.urls_discovered = url_list.len() as u64;
        summary.output_path = self.write_output(&url_list)?;
        summary.elapsed = started.elapsed();

        tracing::info!(
            pages = summary.pages_fetched,
            urls = summary.urls_discovered,
            denied = summary.denied_by_robots,
            "crawl finished in {:.2?}",
            summary.elapsed
        );

        Ok(summary)
    }

    fn handle_outcome(
        &self,
        queued: QueuedUrl,
        outcome: FetchOutcome,
        frontier: &mut Frontier,
        url_list: &mut UrlList,
        summary: &mut CrawlSummary,
    ) {
        match outcome {
            FetchOutcome::Page { final_url, body } => {
                summary.pages_fetched += 1;

                let parsed = parse_html(&body, &final_url);
                tracing::debug!(
                    url = %queued.url,
                    depth = queued.depth,
                    title = parsed.title.as_deref().unwrap_or("<untitled>"),
                    links = parsed.links.len(),
                    "fetched"
                );

                if queued.depth >= self.config.crawler.max_depth {
                    tracing::trace!(url = %queued.url, "max depth reached, not expanding links");
                    return;
                }

                for link in parsed.links {
                    self.consider_link(link, queued.depth + 1, frontier, url_list, summary);
                }
            }
            FetchOutcome::NotHtml { content_type } => {
                tracing::debug!(url = %queued.url, content_type = %content_type, "skipping non-HTML page");
                summary.non_html += 1;
            }
            FetchOutcome::HttpError { status } => {
                tracing::warn!(url = %queued.url, status, "HTTP error");
                summary.fetch_errors += 1;
            }
            FetchOutcome::Failed { error } => {
                tracing::warn!(url = %queued.url, "fetch failed: {}", error);
                summary.fetch_errors += 1;
            }
        }
    }

    /// Applies the link admission filters. Fresh survivors enter both the
    /// frontier and the output list.
    fn consider_link(
        &self,
        link: Url,
        depth: u32,
        frontier: &mut Frontier,
        url_list: &mut UrlList,
        summary: &mut CrawlSummary,
    ) {
        let link = clean_url(&link);

        if !is_same_site(&link, &self.site_domain) {
            return;
        }

        if looks_like_file(&link) {
            return;
        }

        if !self.config.crawler.ignore_robots && !self.robots.is_allowed(link.as_str()) {
            tracing::debug!(url = %link, "denied by robots.txt");
            summary.denied_by_robots += 1;
            return;
        }

        if frontier.push(link.clone(), depth) {
            url_list.push(link.as_str());
        }
    }

    fn write_output(&self, url_list: &UrlList) -> Result<PathBuf, KumoError> {
        let label = site_label(self.seed.host_str().unwrap_or_default());
        let path = Path::new(&self.config.output.directory).join(format!("{}.txt", label));

        url_list.write_to(&path)?;
        tracing::info!(path = %path.display(), urls = url_list.len(), "wrote URL list");

        Ok(path)
    }
}

fn parse_seed(seed: &str) -> Result<Url, KumoError> {
    let url = Url::parse(seed.trim_end_matches('/'))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!("seed URL has no host: {}", seed)).into());
    }
    Ok(url)
}
