//! Line-oriented robots.txt parser.
//!
//! The format is advisory and frequently hand-edited, so parsing is lenient
//! by construction: unknown keys, lines without a colon, and malformed
//! values are dropped while the rest of the file is still honored.

use crate::robots::rule::{Group, Rule};
use crate::RobotsError;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Output of one parsing pass over a robots.txt body.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParsedRobots {
    /// Groups keyed by lowercased agent token.
    pub groups: HashMap<String, Group>,

    /// Absolute sitemap URLs in declaration order.
    pub sitemaps: Vec<String>,
}

/// Parses a robots.txt body.
///
/// Each line is split at the first `:` into a key and a value; keys are
/// case-insensitive. Directives seen before any `User-agent:` header bind
/// to the wildcard group. Repeated `User-agent:` lines naming the same
/// agent keep extending the same group.
pub(crate) fn parse(content: &str) -> ParsedRobots {
    let mut parsed = ParsedRobots::default();
    let mut current_agent = String::from("*");

    for line in content.lines() {
        let (key, value) = match line.split_once(':') {
            Some(parts) => parts,
            None => continue,
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();

        match key.as_str() {
            "user-agent" => {
                current_agent = value.to_lowercase();
            }
            "allow" => add_rule(&mut parsed, &current_agent, value, true),
            "disallow" => add_rule(&mut parsed, &current_agent, value, false),
            "crawl-delay" => set_crawl_delay(&mut parsed, &current_agent, value),
            "sitemap" => {
                if let Err(e) = add_sitemap(&mut parsed, value) {
                    tracing::warn!(value = %value, "dropping sitemap directive: {}", e);
                }
            }
            _ => {}
        }
    }

    parsed
}

fn group_mut<'a>(parsed: &'a mut ParsedRobots, agent: &str) -> &'a mut Group {
    parsed
        .groups
        .entry(agent.to_string())
        .or_insert_with(|| Group::new(agent))
}

fn add_rule(parsed: &mut ParsedRobots, agent: &str, path: &str, allow: bool) {
    match Rule::new(path, allow) {
        Ok(rule) => group_mut(parsed, agent).push_rule(rule),
        Err(e) => {
            tracing::warn!(agent = %agent, path = %path, "dropping unparseable rule: {}", e);
        }
    }
}

fn set_crawl_delay(parsed: &mut ParsedRobots, agent: &str, value: &str) {
    match value.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => {
            group_mut(parsed, agent).set_crawl_delay(Duration::from_secs_f64(seconds));
        }
        _ => {
            tracing::warn!(agent = %agent, value = %value, "dropping malformed crawl-delay");
        }
    }
}

fn add_sitemap(parsed: &mut ParsedRobots, value: &str) -> Result<(), RobotsError> {
    let url = Url::parse(value).map_err(|_| RobotsError::InvalidSitemap(value.to_string()))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(RobotsError::InvalidSitemap(value.to_string()));
    }

    parsed.sitemaps.push(value.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robots::rule::RulePath;

    #[test]
    fn test_parse_single_group() {
        let parsed = parse("User-agent: *\nDisallow: /admin/\nAllow: /admin/help\n");

        let group = parsed.groups.get("*").unwrap();
        assert_eq!(group.rules().len(), 2);
        assert!(!group.rules()[0].allow());
        assert!(group.rules()[1].allow());
    }

    #[test]
    fn test_parse_multiple_groups() {
        let content = "User-agent: Googlebot\nDisallow: /nogooglebot/\nUser-agent: *\nAllow: /\n";
        let parsed = parse(content);

        assert_eq!(parsed.groups.len(), 2);
        assert_eq!(parsed.groups.get("googlebot").unwrap().rules().len(), 1);
        assert_eq!(parsed.groups.get("*").unwrap().rules().len(), 1);
    }

    #[test]
    fn test_directives_before_any_header_bind_to_wildcard() {
        let parsed = parse("Disallow: /private/\n");

        let group = parsed.groups.get("*").unwrap();
        assert_eq!(group.rules().len(), 1);
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let parsed = parse("USER-AGENT: KumoBot\nDISALLOW: /a\ncrawl-DELAY: 1\n");

        let group = parsed.groups.get("kumobot").unwrap();
        assert_eq!(group.rules().len(), 1);
        assert_eq!(group.crawl_delay(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_repeated_header_extends_same_group() {
        let content = "User-agent: a\nDisallow: /one\nUser-agent: a\nDisallow: /two\n";
        let parsed = parse(content);

        assert_eq!(parsed.groups.get("a").unwrap().rules().len(), 2);
    }

    #[test]
    fn test_lines_without_colon_are_ignored() {
        let parsed = parse("# comment\n\njunk line\nUser-agent: *\nDisallow: /a\n");

        assert_eq!(parsed.groups.len(), 1);
        assert_eq!(parsed.groups.get("*").unwrap().rules().len(), 1);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let parsed = parse("User-agent: *\nHost: example.com\nNoindex: /x\nDisallow: /a\n");

        assert_eq!(parsed.groups.get("*").unwrap().rules().len(), 1);
    }

    #[test]
    fn test_crawl_delay_fractional_seconds() {
        let parsed = parse("User-agent: *\nCrawl-delay: 2.5\n");

        let group = parsed.groups.get("*").unwrap();
        assert_eq!(group.crawl_delay(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_malformed_crawl_delay_is_dropped() {
        let parsed = parse("User-agent: *\nCrawl-delay: soon\nCrawl-delay: -1\nDisallow: /a\n");

        let group = parsed.groups.get("*").unwrap();
        assert_eq!(group.crawl_delay(), None);
        assert_eq!(group.rules().len(), 1);
    }

    #[test]
    fn test_sitemaps_collected_in_order() {
        let content = "Sitemap: https://example.com/a.xml\nUser-agent: *\nDisallow: /\nSitemap: https://example.com/b.xml\n";
        let parsed = parse(content);

        assert_eq!(
            parsed.sitemaps,
            vec![
                "https://example.com/a.xml".to_string(),
                "https://example.com/b.xml".to_string(),
            ]
        );
    }

    #[test]
    fn test_invalid_sitemap_is_dropped_without_aborting() {
        let content = "Sitemap: /relative.xml\nSitemap: https://example.com/ok.xml\n";
        let parsed = parse(content);

        assert_eq!(parsed.sitemaps, vec!["https://example.com/ok.xml".to_string()]);
    }

    #[test]
    fn test_value_may_contain_colons() {
        // The split happens at the first colon only.
        let parsed = parse("Sitemap: https://example.com:8443/map.xml\n");

        assert_eq!(parsed.sitemaps.len(), 1);
    }

    #[test]
    fn test_empty_body() {
        let parsed = parse("");

        assert!(parsed.groups.is_empty());
        assert!(parsed.sitemaps.is_empty());
    }

    #[test]
    fn test_header_without_rules_creates_no_group() {
        let parsed = parse("User-agent: quietbot\n\nUser-agent: *\nDisallow: /a\n");

        // quietbot never received a directive, so no group materializes.
        assert!(parsed.groups.get("quietbot").is_none());
        assert!(parsed.groups.get("*").is_some());
    }

    #[test]
    fn test_pattern_rules_parsed() {
        let parsed = parse("User-agent: *\nDisallow: /*.gif$\n");

        let group = parsed.groups.get("*").unwrap();
        match group.rules()[0].path() {
            RulePath::Pattern { source, .. } => assert_eq!(source, "/*.gif$"),
            RulePath::Literal(_) => panic!("expected pattern"),
        }
    }
}
