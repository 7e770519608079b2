//! Kumo: a single-site link mapper
//!
//! Kumo crawls one website from a seed URL, following same-site anchor links
//! up to a configurable depth while honoring the site's robots.txt policy,
//! and writes the deduplicated list of discovered URLs to a text file.
//!
//! The robots exclusion engine under [`robots`] is the heart of the crate;
//! the crawl loop in [`crawler`] is a thin driver over it.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for kumo operations
#[derive(Debug, Error)]
pub enum KumoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Robots.txt error: {0}")]
    Robots(#[from] RobotsError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised by the robots engine.
///
/// Only `InvalidOrigin` and `BodyRead` abort an engine build. The other
/// kinds are reported by parsing helpers, logged, and dropped so that a
/// partially malformed robots.txt still yields a usable policy.
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("Origin URL is missing a scheme or host: {0}")]
    InvalidOrigin(String),

    #[error("Sitemap URL is not absolute: {0}")]
    InvalidSitemap(String),

    #[error("Pattern rule failed to compile: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to read robots.txt body: {0}")]
    BodyRead(#[source] reqwest::Error),
}

/// Result type alias for kumo operations
pub type Result<T> = std::result::Result<T, KumoError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlSummary};
pub use robots::Robots;
