//! The robots decision engine.

use crate::robots::fetch::fetch_robots_body;
use crate::robots::parser;
use crate::robots::rule::{Group, RulePath};
use crate::RobotsError;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Robots exclusion engine for one origin.
///
/// Built once per crawl session and frozen afterwards: every accessor takes
/// `&self`, so a shared reference can serve arbitrarily many concurrent
/// workers without synchronization.
///
/// Rule precedence follows the robots convention: literal path rules rank
/// by longest matching prefix (later rules win ties), while wildcard
/// pattern rules win on first match in declaration order. With no
/// applicable group or no matching rule, the answer is "allowed".
#[derive(Debug, Clone)]
pub struct Robots {
    origin: Url,
    user_agent: String,
    groups: HashMap<String, Group>,
    sitemaps: Vec<String>,
}

impl Robots {
    /// Fetches and parses `<origin>/robots.txt` for the given user-agent.
    ///
    /// A missing or unreachable robots.txt is not an error: the engine
    /// comes back empty and allows everything.
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to fetch with
    /// * `origin` - Scheme-plus-host URL the policy applies to
    /// * `user_agent` - The agent token the crawler announces
    ///
    /// # Errors
    ///
    /// `InvalidOrigin` when `origin` lacks a scheme or host; `BodyRead`
    /// when a 200 response's body cannot be read.
    pub async fn build(
        client: &Client,
        origin: &str,
        user_agent: &str,
    ) -> Result<Self, RobotsError> {
        let origin = parse_origin(origin)?;
        let body = fetch_robots_body(client, &origin).await?;
        Ok(Self::from_parts(
            origin,
            user_agent,
            body.as_deref().unwrap_or(""),
        ))
    }

    /// Parses the given robots.txt body without fetching anything.
    pub fn from_content(
        origin: &str,
        user_agent: &str,
        content: &str,
    ) -> Result<Self, RobotsError> {
        let origin = parse_origin(origin)?;
        Ok(Self::from_parts(origin, user_agent, content))
    }

    /// An engine with no rules: every path is allowed.
    pub fn unrestricted(origin: &str, user_agent: &str) -> Result<Self, RobotsError> {
        Self::from_content(origin, user_agent, "")
    }

    fn from_parts(origin: Url, user_agent: &str, content: &str) -> Self {
        let parsed = parser::parse(content);
        Self {
            origin,
            user_agent: user_agent.to_lowercase(),
            groups: parsed.groups,
            sitemaps: parsed.sitemaps,
        }
    }

    /// Returns whether the engine's user-agent may visit `url`.
    ///
    /// `url` may be an absolute URL or a bare path-plus-query. Absolute
    /// URLs on the engine's own origin are reduced to their path first,
    /// treating `http` and `https` as interchangeable; other inputs are
    /// matched as given.
    pub fn is_allowed(&self, url: &str) -> bool {
        let group = match self.active_group() {
            Some(group) => group,
            None => return true,
        };

        let path = self.strip_origin(url);

        let mut result = true;
        let mut best_literal_len = 0;

        for rule in group.rules() {
            match rule.path() {
                RulePath::Pattern { regex, .. } => {
                    // The first matching pattern takes precedence.
                    if regex.is_match(path) {
                        return rule.allow();
                    }
                }
                RulePath::Literal(prefix) => {
                    // The longest matching prefix takes precedence, later
                    // rules winning ties.
                    if prefix.len() >= best_literal_len && path.starts_with(prefix.as_str()) {
                        result = rule.allow();
                        best_literal_len = prefix.len();
                    }
                }
            }
        }

        result
    }

    /// Advisory delay between requests for the engine's user-agent.
    ///
    /// The agent's own group wins when it declares a delay; otherwise the
    /// wildcard group's delay applies; otherwise zero.
    pub fn crawl_delay(&self) -> Duration {
        self.groups
            .get(&self.user_agent)
            .and_then(|group| group.crawl_delay())
            .or_else(|| self.groups.get("*").and_then(|group| group.crawl_delay()))
            .unwrap_or(Duration::ZERO)
    }

    /// Sitemap URLs declared by the policy, in declaration order. Recorded
    /// only; the engine never fetches them.
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// The origin this policy applies to.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Selects the group that governs matching: the engine's agent when it
    /// has rules, else the wildcard group when it has rules. An agent
    /// declared without any rules is indistinguishable from an undeclared
    /// one.
    fn active_group(&self) -> Option<&Group> {
        self.groups
            .get(&self.user_agent)
            .filter(|group| !group.rules().is_empty())
            .or_else(|| {
                self.groups
                    .get("*")
                    .filter(|group| !group.rules().is_empty())
            })
    }

    /// Strips the engine's origin from `url`, treating the two HTTP schemes
    /// as equivalent. Inputs that don't start with the origin come back
    /// unchanged.
    fn strip_origin<'a>(&self, url: &'a str) -> &'a str {
        let authority = self.authority();
        for scheme in ["http://", "https://"] {
            if let Some(path) = url
                .strip_prefix(scheme)
                .and_then(|rest| rest.strip_prefix(authority.as_str()))
            {
                return path;
            }
        }
        url
    }

    fn authority(&self) -> String {
        let host = self.origin.host_str().unwrap_or("");
        match self.origin.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }
}

fn parse_origin(origin: &str) -> Result<Url, RobotsError> {
    let url = Url::parse(origin).map_err(|_| RobotsError::InvalidOrigin(origin.to_string()))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(RobotsError::InvalidOrigin(origin.to_string()));
    }
    Ok(url)
}
