//! Configuration loading and validation.
//!
//! A kumo run is described by one TOML file with `[site]`, `[crawler]`,
//! `[user-agent]`, and `[output]` tables; see `load_config`.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
pub use validation::validate;
