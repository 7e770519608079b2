//! Rule and group models for parsed robots.txt directives.

use crate::robots::pattern;
use crate::RobotsError;
use regex::Regex;
use std::time::Duration;

/// Path component of a rule.
///
/// Literal paths rank by longest matching prefix during evaluation; pattern
/// paths win on first match in declaration order. Matching dispatches on the
/// variant, so a rule is never both.
#[derive(Debug, Clone)]
pub enum RulePath {
    /// Plain path prefix.
    Literal(String),

    /// Wildcard path compiled to a regex. `source` keeps the unescaped
    /// directive text.
    Pattern { source: String, regex: Regex },
}

/// One `Allow:` or `Disallow:` directive. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Rule {
    allow: bool,
    path: RulePath,
}

impl Rule {
    /// Builds a rule from a directive path, compiling the path when it
    /// contains a wildcard or a trailing anchor.
    ///
    /// The path is percent-unescaped first. `%2A` is kept escaped across
    /// that step so an encoded asterisk stays literal, and for patterns a
    /// trailing `%24` is protected so an encoded dollar does not turn into
    /// an end anchor.
    pub(crate) fn new(path: &str, allow: bool) -> Result<Self, RobotsError> {
        let is_pattern = pattern::is_pattern(path);

        let mut path = path.to_string();
        if is_pattern {
            path = pattern::replace_suffix(&path, "%24", "%2524");
        }

        path = path.replace("%2A", "%252A");
        match pattern::path_unescape(&path) {
            Some(unescaped) => path = unescaped,
            None => path = path.replace("%252A", "%2A"),
        }

        let path = if is_pattern {
            let regex = pattern::compile(&path)?;
            RulePath::Pattern { source: path, regex }
        } else {
            RulePath::Literal(path)
        };

        Ok(Self { allow, path })
    }

    /// True for `Allow:`, false for `Disallow:`.
    pub fn allow(&self) -> bool {
        self.allow
    }

    pub fn path(&self) -> &RulePath {
        &self.path
    }
}

/// Directives grouped under one `User-agent:` token.
#[derive(Debug, Clone)]
pub struct Group {
    agent: String,
    rules: Vec<Rule>,
    crawl_delay: Option<Duration>,
}

impl Group {
    pub(crate) fn new(agent: &str) -> Self {
        Self {
            agent: agent.to_string(),
            rules: Vec::new(),
            crawl_delay: None,
        }
    }

    pub(crate) fn push_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub(crate) fn set_crawl_delay(&mut self, delay: Duration) {
        self.crawl_delay = Some(delay);
    }

    /// Normalized lowercase agent token this group belongs to.
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Rules in source order. Pattern precedence depends on this order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn crawl_delay(&self) -> Option<Duration> {
        self.crawl_delay
    }
}
