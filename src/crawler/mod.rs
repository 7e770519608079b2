//! Crawl driver: a depth-bounded, same-site walk seeded from one URL,
//! gated by the robots engine.

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{Coordinator, CrawlSummary};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use frontier::{Frontier, QueuedUrl};
pub use parser::{parse_html, ParsedPage};

use crate::config::Config;
use crate::KumoError;

/// Runs a full crawl session for `config` and returns its summary.
pub async fn crawl(config: Config) -> Result<CrawlSummary, KumoError> {
    let coordinator = Coordinator::new(config).await?;
    coordinator.run().await
}
